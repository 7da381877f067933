use askama::Template;
use chrono::{DateTime, Utc};

use super::PageContext;
use crate::config::AppConfig;
use crate::models::avatar_grid::AvatarGrid;
use crate::models::links::{Content, Explorer, RenderedTransaction};
use crate::models::progress::{ProgressBar, ProgressVariant};
use crate::models::proposal::{Proposal, Vote, timing};
use crate::models::vote_page::VotePageView;
use crate::services::tracker::PageState;

/// One of the three For/Against/Abstain columns.
pub struct TallyCard {
    pub label: &'static str,
    pub css_class: &'static str,
    pub count: u64,
    pub bar: ProgressBar,
    pub grid: AvatarGrid,
}

impl TallyCard {
    fn new(vote: Vote, view: &VotePageView) -> Self {
        Self {
            label: vote.label(),
            css_class: vote.as_str(),
            count: view.tally.count(vote),
            bar: ProgressBar::new(ProgressVariant::parse(vote.as_str()), view.tally.percentage(vote)),
            grid: AvatarGrid::card(view.breakdown.nouns(vote)),
        }
    }
}

#[derive(Template)]
#[template(path = "vote/page.html")]
pub struct VotePageTemplate {
    pub ctx: PageContext,
    pub proposal: Proposal,
    pub view: VotePageView,
    pub page: PageState,
    pub cards: Vec<TallyCard>,
    pub transactions: Vec<RenderedTransaction>,
    pub proposer: Option<Content>,
    pub proposer_tx: Option<Content>,
    pub description_lines: Vec<String>,
    pub timing_label: &'static str,
    pub headline_time: Option<String>,
    pub headline_date: Option<String>,
    pub vote_choices: Vec<(&'static str, &'static str)>,
    pub advance_label: Option<String>,
    pub available_votes: u64,
    /// Label of the choice awaiting confirmation, when the voting modal is open.
    pub modal_vote_label: Option<&'static str>,
    /// Tokens already on the selected side, shown in the voting modal.
    pub modal_grid: Option<AvatarGrid>,
    pub avatar_base_url: String,
}

impl VotePageTemplate {
    pub fn new(
        ctx: PageContext,
        config: &AppConfig,
        proposal: Proposal,
        view: VotePageView,
        page: PageState,
        available_votes: Option<u64>,
    ) -> Self {
        let explorer = Explorer::new(&config.explorer_base_url);
        let offset = config.display_offset;

        let cards = Vote::ALL.iter().map(|&v| TallyCard::new(v, &view)).collect();
        let transactions = proposal.details.iter().map(|d| explorer.render_transaction(d)).collect();
        let (proposer, proposer_tx) = if proposal.proposer.is_empty() || proposal.transaction_hash.is_empty() {
            (None, None)
        } else {
            (
                Some(explorer.link_if_address(&proposal.proposer)),
                Some(explorer.transaction_link(&proposal.transaction_hash)),
            )
        };
        let headline: Option<DateTime<Utc>> = view.headline_time;

        let selected = if page.show_vote_modal { page.selected_vote } else { None };

        Self {
            ctx,
            description_lines: proposal.description.lines().map(str::to_string).collect(),
            timing_label: view.timing_copy.label(),
            headline_time: headline.map(|t| timing::format_time(t, offset)),
            headline_date: headline.map(|t| timing::format_date(t, offset)),
            vote_choices: Vote::ALL.iter().map(|v| (v.as_str(), v.button_label())).collect(),
            advance_label: view.advance_action.map(|a| a.button_label()),
            available_votes: available_votes.unwrap_or(0),
            modal_vote_label: selected.map(|v| v.label()),
            modal_grid: selected.map(|v| AvatarGrid::table(view.breakdown.nouns(v))),
            avatar_base_url: config.avatar_base_url.clone(),
            proposal,
            view,
            page,
            cards,
            transactions,
            proposer,
            proposer_tx,
        }
    }
}

/// Shown while the proposal or its votes have not been indexed yet.
#[derive(Template)]
#[template(path = "vote/loading.html")]
pub struct LoadingTemplate {
    pub ctx: PageContext,
    pub proposal_id: String,
}

pub struct ProposalRow {
    pub id: String,
    pub title: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&Proposal> for ProposalRow {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            status_label: p.status.label(),
            status_class: p.status.badge_class(),
        }
    }
}

#[derive(Template)]
#[template(path = "vote/list.html")]
pub struct ProposalListTemplate {
    pub ctx: PageContext,
    pub proposals: Vec<ProposalRow>,
}
