use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::{clear_active_account, set_active_account};
use crate::errors::{AppError, see_other};
use crate::models::links::is_address;

#[derive(Deserialize)]
pub struct ConnectForm {
    pub csrf_token: String,
    pub account: String,
    #[serde(default)]
    pub return_to: String,
}

#[derive(Deserialize)]
pub struct DisconnectForm {
    pub csrf_token: String,
    #[serde(default)]
    pub return_to: String,
}

/// Only same-site absolute paths; anything else goes to the list.
fn safe_return_to(return_to: &str) -> &str {
    if return_to.starts_with('/') && !return_to.starts_with("//") {
        return_to
    } else {
        "/vote"
    }
}

/// POST /wallet/connect
pub async fn connect(session: Session, form: web::Form<ConnectForm>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let account = form.account.trim();
    if !is_address(account) {
        return Err(AppError::BadRequest(format!("Not a wallet address: {account}")));
    }
    set_active_account(&session, account)?;
    log::info!("Wallet {account} connected");
    Ok(see_other(safe_return_to(&form.return_to)))
}

/// POST /wallet/disconnect
pub async fn disconnect(session: Session, form: web::Form<DisconnectForm>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    clear_active_account(&session);
    Ok(see_other(safe_return_to(&form.return_to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_to_stays_on_site() {
        assert_eq!(safe_return_to("/vote/3"), "/vote/3");
        assert_eq!(safe_return_to("//evil.example"), "/vote");
        assert_eq!(safe_return_to("https://evil.example"), "/vote");
        assert_eq!(safe_return_to(""), "/vote");
    }
}
