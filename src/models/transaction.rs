use serde::Serialize;

/// Modal text used when a failure carries no usable message.
pub const FALLBACK_MESSAGE: &str = "Please try again.";

/// Status published by a transaction sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TransactionStatus {
    None,
    Mining,
    Success,
    Fail { error_message: Option<String> },
    Exception { error_message: Option<String> },
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Success
                | TransactionStatus::Fail { .. }
                | TransactionStatus::Exception { .. }
        )
    }
}

/// The three independently tracked page actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Vote,
    Queue,
    Execute,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Vote => "vote",
            ActionKind::Queue => "queue",
            ActionKind::Execute => "execute",
        }
    }

    pub fn spec(&self) -> ActionSpec {
        match self {
            ActionKind::Vote => ActionSpec {
                success_message: "Vote Successful!",
                error_message: Some(vote_error_message),
            },
            ActionKind::Queue => ActionSpec { success_message: "Proposal Queued!", error_message: None },
            ActionKind::Execute => ActionSpec { success_message: "Proposal Executed!", error_message: None },
        }
    }
}

/// In-flight state of one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
}

impl ActionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Pending)
    }
}

/// Title and body of the alert dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertModal {
    pub title: String,
    pub message: String,
}

impl AlertModal {
    pub fn new(title: &str, message: &str) -> Self {
        Self { title: title.to_string(), message: message.to_string() }
    }
}

/// Rewrites the contract's duplicate-vote revert into a readable label.
pub fn vote_error_message(error: Option<&str>) -> Option<String> {
    let error = error?;
    if error.contains("voter already voted") {
        return Some("User Already Voted".to_string());
    }
    Some(error.to_string())
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}

/// How an action reacts to status changes.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    pub success_message: &'static str,
    pub error_message: Option<fn(Option<&str>) -> Option<String>>,
}

impl ActionSpec {
    /// Apply one status change to `state`. Returns the alert to show, if any.
    /// `on_success` runs once the transaction succeeds.
    pub fn apply(
        &self,
        status: &TransactionStatus,
        state: &mut ActionState,
        on_success: impl FnOnce(),
    ) -> Option<AlertModal> {
        match status {
            TransactionStatus::None => {
                *state = ActionState::Idle;
                None
            }
            TransactionStatus::Mining => {
                *state = ActionState::Pending;
                None
            }
            TransactionStatus::Success => {
                *state = ActionState::Idle;
                on_success();
                Some(AlertModal::new("Success", self.success_message))
            }
            TransactionStatus::Fail { error_message } => {
                *state = ActionState::Idle;
                let message = non_empty(error_message.clone());
                Some(AlertModal::new(
                    "Transaction Failed",
                    message.as_deref().unwrap_or(FALLBACK_MESSAGE),
                ))
            }
            TransactionStatus::Exception { error_message } => {
                *state = ActionState::Idle;
                let message = self
                    .error_message
                    .and_then(|map| non_empty(map(error_message.as_deref())));
                Some(AlertModal::new("Error", message.as_deref().unwrap_or(FALLBACK_MESSAGE)))
            }
        }
    }
}
