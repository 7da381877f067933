use serde::Deserialize;

pub mod actions;
pub mod page;

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct SelectForm {
    pub csrf_token: String,
    pub choice: String,
}

fn page_path(proposal_id: &str) -> String {
    format!("/vote/{proposal_id}")
}
