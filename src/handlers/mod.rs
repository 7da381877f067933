use actix_web::web;

pub mod vote_handlers;
pub mod wallet_handlers;
pub mod ws_handlers;

/// Register every application route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Proposal list; /vote is also the back-navigation target
        .route("/", web::get().to(vote_handlers::page::list))
        .route("/vote", web::get().to(vote_handlers::page::list))
        .route("/vote/{id}", web::get().to(vote_handlers::page::show))
        .route("/vote/{id}/status", web::get().to(vote_handlers::page::status))
        // Page actions
        .route("/vote/{id}/select", web::post().to(vote_handlers::actions::select))
        .route("/vote/{id}/dismiss", web::post().to(vote_handlers::actions::dismiss))
        .route("/vote/{id}/cast", web::post().to(vote_handlers::actions::cast))
        .route("/vote/{id}/advance", web::post().to(vote_handlers::actions::advance))
        .route("/vote/{id}/alert/dismiss", web::post().to(vote_handlers::actions::dismiss_alert))
        // Wallet stand-in
        .route("/wallet/connect", web::post().to(wallet_handlers::connect))
        .route("/wallet/disconnect", web::post().to(wallet_handlers::disconnect))
        // Live updates
        .route("/ws", web::get().to(ws_handlers::ws_connect));
}
