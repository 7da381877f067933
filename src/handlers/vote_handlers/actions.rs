use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use super::{CsrfOnly, SelectForm, page_path};
use crate::auth::csrf;
use crate::auth::session::{active_account, viewer_key};
use crate::errors::{AppError, see_other};
use crate::models::proposal::{AdvanceAction, Vote, advance_action};
use crate::models::transaction::{ActionKind, AlertModal, FALLBACK_MESSAGE};
use crate::services::tracker::ActionTracker;
use crate::sources::{GovernanceSource, TransactionSender};

const CONNECT_WALLET: &str = "Connect a wallet to vote.";

/// POST /vote/{id}/select
/// Records the choice and opens the confirmation modal.
pub async fn select(
    tracker: web::Data<ActionTracker>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<SelectForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let proposal_id = path.into_inner();
    let vote = Vote::parse(&form.choice)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown vote choice: {}", form.choice)))?;
    let viewer = viewer_key(&session)?;
    tracker.select_vote(&viewer, &proposal_id, vote);
    Ok(see_other(&page_path(&proposal_id)))
}

/// POST /vote/{id}/dismiss
pub async fn dismiss(
    tracker: web::Data<ActionTracker>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let proposal_id = path.into_inner();
    let viewer = viewer_key(&session)?;
    tracker.dismiss_vote_modal(&viewer, &proposal_id);
    Ok(see_other(&page_path(&proposal_id)))
}

/// POST /vote/{id}/cast
/// Submits the selected vote and follows the transaction.
pub async fn cast(
    tracker: web::Data<ActionTracker>,
    sender: web::Data<dyn TransactionSender>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let proposal_id = path.into_inner();
    let viewer = viewer_key(&session)?;
    let location = page_path(&proposal_id);

    let Some(account) = active_account(&session) else {
        tracker.show_alert(&viewer, &proposal_id, AlertModal::new("Error", CONNECT_WALLET));
        return Ok(see_other(&location));
    };
    let Some(vote) = tracker.snapshot(&viewer, &proposal_id).selected_vote else {
        log::warn!("Cast without a selected vote on proposal {proposal_id}");
        return Ok(see_other(&location));
    };
    if !tracker.begin(&viewer, &proposal_id, ActionKind::Vote) {
        return Ok(see_other(&location));
    }

    log::info!("Casting {} vote on proposal {proposal_id} from {account}", vote.as_str());
    let rx = sender.cast_vote(&account, &proposal_id, vote);
    tracker.follow(&viewer, &proposal_id, ActionKind::Vote, rx);
    Ok(see_other(&location))
}

/// POST /vote/{id}/advance
/// Queues a succeeded proposal or executes a queued one past its eta.
pub async fn advance(
    tracker: web::Data<ActionTracker>,
    source: web::Data<dyn GovernanceSource>,
    sender: web::Data<dyn TransactionSender>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let proposal_id = path.into_inner();
    let viewer = viewer_key(&session)?;
    let location = page_path(&proposal_id);

    let Some(account) = active_account(&session) else {
        tracker.show_alert(&viewer, &proposal_id, AlertModal::new("Error", CONNECT_WALLET));
        return Ok(see_other(&location));
    };
    let proposal = match source.proposal(&proposal_id) {
        Ok(Some(p)) => p,
        Ok(None) => return Err(AppError::NotFound),
        Err(e) => {
            log::warn!("Could not load proposal {proposal_id} to advance it: {e}");
            tracker.show_alert(&viewer, &proposal_id, AlertModal::new("Error", FALLBACK_MESSAGE));
            return Ok(see_other(&location));
        }
    };

    let kind = match advance_action(&proposal, Utc::now()) {
        Some(AdvanceAction::Queue) => ActionKind::Queue,
        Some(AdvanceAction::Execute) => ActionKind::Execute,
        None => {
            log::warn!("Proposal {proposal_id} ({}) cannot be advanced now", proposal.status.label());
            return Ok(see_other(&location));
        }
    };
    if !tracker.begin(&viewer, &proposal_id, kind) {
        return Ok(see_other(&location));
    }
    let rx = match kind {
        ActionKind::Queue => sender.queue_proposal(&account, &proposal_id),
        _ => sender.execute_proposal(&account, &proposal_id),
    };
    log::info!("Submitting {} for proposal {proposal_id} from {account}", kind.as_str());
    tracker.follow(&viewer, &proposal_id, kind, rx);
    Ok(see_other(&location))
}

/// POST /vote/{id}/alert/dismiss
pub async fn dismiss_alert(
    tracker: web::Data<ActionTracker>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let proposal_id = path.into_inner();
    let viewer = viewer_key(&session)?;
    tracker.dismiss_alert(&viewer, &proposal_id);
    Ok(see_other(&page_path(&proposal_id)))
}
