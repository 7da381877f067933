// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{active_account, short_account};
use crate::config::AppConfig;
use crate::errors::AppError;

mod vote;

pub use self::vote::{LoadingTemplate, ProposalListTemplate, ProposalRow, TallyCard, VotePageTemplate};

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub app_name: String,
    pub csrf_token: String,
    pub active_account: Option<String>,
    pub account_label: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig, current_path: &str) -> Result<Self, AppError> {
        let csrf_token = csrf::get_or_create_token(session)?;
        let active_account = active_account(session);
        let account_label = active_account.as_deref().map(short_account).unwrap_or_default();
        Ok(Self {
            app_name: config.app_name.clone(),
            csrf_token,
            active_account,
            account_label,
            current_path: current_path.to_string(),
        })
    }

    pub fn is_wallet_connected(&self) -> bool {
        self.active_account.is_some()
    }
}
