use actix_session::Session;

use crate::auth::csrf::generate_token;
use crate::errors::AppError;

/// Stable per-browser key for page state; created on first use.
pub fn viewer_key(session: &Session) -> Result<String, AppError> {
    if let Some(key) = session.get::<String>("viewer")? {
        return Ok(key);
    }
    let key = generate_token();
    session.insert("viewer", &key)?;
    Ok(key)
}

/// Address of the connected wallet, if any.
pub fn active_account(session: &Session) -> Option<String> {
    session.get::<String>("active_account").unwrap_or(None)
}

pub fn set_active_account(session: &Session, account: &str) -> Result<(), AppError> {
    session.insert("active_account", account)?;
    Ok(())
}

pub fn clear_active_account(session: &Session) {
    session.remove("active_account");
}

/// "0x1234…abcd" for the header.
pub fn short_account(account: &str) -> String {
    if account.len() <= 10 || !account.is_ascii() {
        return account.to_string();
    }
    format!("{}…{}", &account[..6], &account[account.len() - 4..])
}
