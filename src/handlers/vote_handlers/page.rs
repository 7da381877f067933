use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use super::page_path;
use crate::auth::session::{active_account, viewer_key};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::proposal::Proposal;
use crate::models::vote_page::{VotePageInputs, VotePageView};
use crate::models::voters::ProposalVotes;
use crate::services::tracker::ActionTracker;
use crate::sources::{GovernanceSource, SourceError};
use crate::templates_structs::{
    LoadingTemplate, PageContext, ProposalListTemplate, ProposalRow, VotePageTemplate,
};

/// Flat body shown when a read against the governance source fails.
pub const FETCH_FAILED: &str = "Failed to fetch";

fn fetch_failed(err: &SourceError) -> HttpResponse {
    log::warn!("Governance source read failed: {err}");
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(FETCH_FAILED)
}

/// What the page needs from the source before it can render.
struct PageData {
    proposal: Proposal,
    votes: ProposalVotes,
    current_block: Option<u64>,
    available_votes: Option<u64>,
    has_voted: bool,
}

/// `Ok(None)` while the proposal or its votes are not indexed yet.
fn load_page_data(
    source: &dyn GovernanceSource,
    account: Option<&str>,
    proposal_id: &str,
) -> Result<Option<PageData>, SourceError> {
    let Some(proposal) = source.proposal(proposal_id)? else {
        return Ok(None);
    };
    let Some(votes) = source.votes_for_proposal(proposal_id)? else {
        return Ok(None);
    };
    let current_block = source.block_number()?;
    let (available_votes, has_voted) = match account {
        Some(account) => (
            Some(source.user_votes_as_of_block(account, proposal.created_block)?),
            source.has_voted_on_proposal(account, proposal_id)?,
        ),
        None => (None, false),
    };
    Ok(Some(PageData { proposal, votes, current_block, available_votes, has_voted }))
}

/// GET / and GET /vote
pub async fn list(
    source: web::Data<dyn GovernanceSource>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let proposals = match source.proposals() {
        Ok(p) => p,
        Err(e) => return Ok(fetch_failed(&e)),
    };
    let ctx = PageContext::build(&session, &config, "/vote")?;
    render(ProposalListTemplate {
        ctx,
        proposals: proposals.iter().map(ProposalRow::from).collect(),
    })
}

/// GET /vote/{id}
pub async fn show(
    source: web::Data<dyn GovernanceSource>,
    tracker: web::Data<ActionTracker>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let proposal_id = path.into_inner();
    let viewer = viewer_key(&session)?;
    let account = active_account(&session);
    let ctx = PageContext::build(&session, &config, &page_path(&proposal_id))?;

    // Fetch errors win over the loading state.
    let data = match load_page_data(source.get_ref(), account.as_deref(), &proposal_id) {
        Ok(Some(data)) => data,
        Ok(None) => return render(LoadingTemplate { ctx, proposal_id }),
        Err(e) => return Ok(fetch_failed(&e)),
    };

    let view = VotePageView::derive(VotePageInputs {
        proposal: &data.proposal,
        votes: &data.votes,
        active_account: account.as_deref(),
        current_block: data.current_block,
        available_votes: data.available_votes,
        has_voted: data.has_voted,
        now: Utc::now(),
    });
    let page = tracker.snapshot(&viewer, &proposal_id);

    render(VotePageTemplate::new(ctx, &config, data.proposal, view, page, data.available_votes))
}

/// GET /vote/{id}/status
/// The viewer's action states for this proposal, polled by the page script.
pub async fn status(
    tracker: web::Data<ActionTracker>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let proposal_id = path.into_inner();
    let viewer = viewer_key(&session)?;
    let page = tracker.snapshot(&viewer, &proposal_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "proposal_id": proposal_id,
        "page": page,
    })))
}
