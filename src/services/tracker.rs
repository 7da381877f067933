use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tokio::sync::watch;

use crate::models::proposal::Vote;
use crate::models::transaction::{ActionKind, ActionState, AlertModal, TransactionStatus};
use crate::services::notify::{self, ConnectionMap};

/// Per-viewer, per-proposal UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageState {
    pub selected_vote: Option<Vote>,
    pub show_vote_modal: bool,
    pub vote: ActionState,
    pub queue: ActionState,
    pub execute: ActionState,
    pub alert: Option<AlertModal>,
}

impl PageState {
    pub fn action(&self, kind: ActionKind) -> ActionState {
        match kind {
            ActionKind::Vote => self.vote,
            ActionKind::Queue => self.queue,
            ActionKind::Execute => self.execute,
        }
    }

    fn action_mut(&mut self, kind: ActionKind) -> &mut ActionState {
        match kind {
            ActionKind::Vote => &mut self.vote,
            ActionKind::Queue => &mut self.queue,
            ActionKind::Execute => &mut self.execute,
        }
    }

    pub fn is_advance_pending(&self) -> bool {
        self.queue.is_pending() || self.execute.is_pending()
    }

    /// Apply one status change for `kind`. A successful vote closes the voting modal.
    pub fn apply(&mut self, kind: ActionKind, status: &TransactionStatus) {
        let spec = kind.spec();
        let PageState { selected_vote, show_vote_modal, vote, queue, execute, alert } = self;
        let new_alert = match kind {
            ActionKind::Vote => spec.apply(status, vote, || {
                *show_vote_modal = false;
                *selected_vote = None;
            }),
            ActionKind::Queue => spec.apply(status, queue, || {}),
            ActionKind::Execute => spec.apply(status, execute, || {}),
        };
        if new_alert.is_some() {
            *alert = new_alert;
        }
    }
}

type PageKey = (String, String);

/// Holds page state and follows transaction receivers into it.
#[derive(Clone)]
pub struct ActionTracker {
    pages: Arc<RwLock<HashMap<PageKey, PageState>>>,
    conn_map: ConnectionMap,
}

impl ActionTracker {
    pub fn new(conn_map: ConnectionMap) -> Self {
        Self { pages: Arc::new(RwLock::new(HashMap::new())), conn_map }
    }

    fn key(viewer: &str, proposal_id: &str) -> PageKey {
        (viewer.to_string(), proposal_id.to_string())
    }

    pub fn snapshot(&self, viewer: &str, proposal_id: &str) -> PageState {
        let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
        pages.get(&Self::key(viewer, proposal_id)).cloned().unwrap_or_default()
    }

    /// Run `f` on the page state. Pages back at their default state are dropped.
    pub fn update<R>(&self, viewer: &str, proposal_id: &str, f: impl FnOnce(&mut PageState) -> R) -> R {
        let key = Self::key(viewer, proposal_id);
        let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
        let page = pages.entry(key.clone()).or_default();
        let result = f(page);
        if *page == PageState::default() {
            pages.remove(&key);
        }
        result
    }

    /// Mark `kind` pending before its transaction is sent. False when the
    /// action (or, for queue/execute, either advance action) is already pending.
    pub fn begin(&self, viewer: &str, proposal_id: &str, kind: ActionKind) -> bool {
        self.update(viewer, proposal_id, |page| {
            let busy = match kind {
                ActionKind::Vote => page.vote.is_pending(),
                ActionKind::Queue | ActionKind::Execute => page.is_advance_pending(),
            };
            if !busy {
                *page.action_mut(kind) = ActionState::Pending;
            }
            !busy
        })
    }

    pub fn select_vote(&self, viewer: &str, proposal_id: &str, vote: Vote) {
        self.update(viewer, proposal_id, |page| {
            page.selected_vote = Some(vote);
            page.show_vote_modal = true;
        });
    }

    pub fn dismiss_vote_modal(&self, viewer: &str, proposal_id: &str) {
        self.update(viewer, proposal_id, |page| {
            page.show_vote_modal = false;
            page.selected_vote = None;
        });
    }

    pub fn show_alert(&self, viewer: &str, proposal_id: &str, alert: AlertModal) {
        self.update(viewer, proposal_id, |page| page.alert = Some(alert));
    }

    pub fn dismiss_alert(&self, viewer: &str, proposal_id: &str) {
        self.update(viewer, proposal_id, |page| page.alert = None);
    }

    /// Apply a status change and push it to the viewer's open pages.
    pub fn apply(&self, viewer: &str, proposal_id: &str, kind: ActionKind, status: &TransactionStatus) {
        let page = self.update(viewer, proposal_id, |page| {
            page.apply(kind, status);
            page.clone()
        });
        log::info!(
            "{} on proposal {} for {}: {:?} -> {:?}",
            kind.as_str(),
            proposal_id,
            viewer,
            status,
            page.action(kind)
        );
        let alert = if status.is_terminal() { page.alert.as_ref() } else { None };
        notify::notify_action(&self.conn_map, viewer, proposal_id, kind, page.action(kind), alert);
    }

    /// Follow `rx` on a background task until its sender goes away.
    pub fn follow(
        &self,
        viewer: &str,
        proposal_id: &str,
        kind: ActionKind,
        mut rx: watch::Receiver<TransactionStatus>,
    ) {
        let tracker = self.clone();
        let (viewer, proposal_id) = (viewer.to_string(), proposal_id.to_string());
        tokio::spawn(async move {
            // `begin` already marked the action pending
            let mut last = rx.borrow_and_update().clone();
            if !matches!(last, TransactionStatus::None) {
                tracker.apply(&viewer, &proposal_id, kind, &last);
            }
            while rx.changed().await.is_ok() {
                last = rx.borrow_and_update().clone();
                tracker.apply(&viewer, &proposal_id, kind, &last);
            }
            if !last.is_terminal() {
                tracker.apply(&viewer, &proposal_id, kind, &TransactionStatus::None);
            }
        });
    }
}
