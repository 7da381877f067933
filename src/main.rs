use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use nouns_vote::config::AppConfig;
use nouns_vote::handlers;
use nouns_vote::services::notify::new_connection_map;
use nouns_vote::services::tracker::ActionTracker;
use nouns_vote::sources::fixture::FixtureChain;
use nouns_vote::sources::{GovernanceSource, TransactionSender};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    // Seeded chain stands in for the indexer, the node and the wallet
    let chain = FixtureChain::load(&config.fixture_path, config.mining_delay)
        .map_err(|e| std::io::Error::other(format!("Failed to load {}: {e}", config.fixture_path)))?;
    let chain = Arc::new(chain);
    let source: Arc<dyn GovernanceSource> = chain.clone();
    let sender: Arc<dyn TransactionSender> = chain;

    let conn_map = new_connection_map();
    let tracker = ActionTracker::new(conn_map.clone());
    let secret_key = config.cookie_key();
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .app_data(web::Data::from(source.clone()))
            .app_data(web::Data::from(sender.clone()))
            .app_data(web::Data::new(tracker.clone()))
            .app_data(web::Data::new(conn_map.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
