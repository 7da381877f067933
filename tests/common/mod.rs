//! Shared test infrastructure for the vote page tests.
//!
//! - `fixture_data()` - A small seeded chain: one active, one succeeded and
//!   one not-yet-indexed proposal
//! - `TestState` - The app data a test server is built from
//! - `test_app!` - Builds an initialized actix test service from a `TestState`
//! - `CookieJar` - Carries the session cookie between requests
#![allow(dead_code, unused_macros)]

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::ContentType;
use actix_web::test::{self, TestRequest};
use regex::Regex;

use nouns_vote::config::AppConfig;
use nouns_vote::services::notify::{ConnectionMap, new_connection_map};
use nouns_vote::services::tracker::ActionTracker;
use nouns_vote::sources::fixture::{FixtureChain, FixtureData};
use nouns_vote::sources::{GovernanceSource, SourceError, TransactionSender};
use nouns_vote::models::proposal::Proposal;
use nouns_vote::models::voters::ProposalVotes;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Holds 2 votes since block 100.
pub const VOTER: &str = "0x1111111111111111111111111111111111111111";
/// Holds 1 vote, delegated after proposal 1 was created.
pub const LATE_VOTER: &str = "0x2222222222222222222222222222222222222222";
/// Already voted For on proposal 1.
pub const PAST_VOTER: &str = "0x6666666666666666666666666666666666666666";

pub const ACTIVE_ID: &str = "1";
pub const SUCCEEDED_ID: &str = "2";
pub const UNINDEXED_ID: &str = "3";

// ============================================================================
// FIXTURE
// ============================================================================

/// Seed data. The head sits in the middle of proposal 1's voting window.
pub fn fixture_data(timelock_delay_secs: i64) -> FixtureData {
    let json = serde_json::json!({
        "blockNumber": 1000,
        "timelockDelaySecs": timelock_delay_secs,
        "delegates": [
            { "account": VOTER, "votes": 2, "sinceBlock": 100, "nouns": ["12", "45"] },
            { "account": LATE_VOTER, "votes": 1, "sinceBlock": 950, "nouns": ["88"] },
            { "account": PAST_VOTER, "votes": 3, "sinceBlock": 100, "nouns": ["3", "9", "17"] }
        ],
        "proposals": [
            {
                "id": ACTIVE_ID,
                "title": "Fund the documentary",
                "description": "First line\nSecond <line>",
                "proposer": VOTER,
                "transactionHash": "0xdeadbeefcafebabe",
                "status": "active",
                "createdBlock": 900,
                "startBlock": 950,
                "endBlock": 1100,
                "forCount": 3,
                "againstCount": 1,
                "abstainCount": 0,
                "quorumVotes": 2,
                "details": [{
                    "target": "0x0BC3807Ec262cB779b38D65b38158acC3bfedE10",
                    "functionSig": "transfer",
                    "value": "",
                    "callData": "0x9999999999999999999999999999999999999999,1000"
                }]
            },
            {
                "id": SUCCEEDED_ID,
                "title": "Sponsor a hackathon",
                "proposer": LATE_VOTER,
                "transactionHash": "0xabcdef0123456789",
                "status": "succeeded",
                "createdBlock": 500,
                "startBlock": 510,
                "endBlock": 600,
                "forCount": 10,
                "againstCount": 2,
                "quorumVotes": 5
            },
            {
                "id": UNINDEXED_ID,
                "title": "Not indexed yet",
                "proposer": VOTER,
                "status": "pending",
                "createdBlock": 990,
                "startBlock": 1010,
                "endBlock": 1200
            }
        ],
        "votes": {
            "1": { "votes": [
                { "voter": PAST_VOTER, "supportDetailed": 1, "nouns": [{ "id": "3" }, { "id": "9" }, { "id": "17" }] },
                { "voter": "0x7777777777777777777777777777777777777777", "supportDetailed": 0, "nouns": [{ "id": "21" }] }
            ] },
            "2": { "votes": [] }
        }
    });
    serde_json::from_value(json).expect("fixture data is valid")
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct TestState {
    pub chain: Arc<FixtureChain>,
    pub source: Arc<dyn GovernanceSource>,
    pub sender: Arc<dyn TransactionSender>,
    pub tracker: ActionTracker,
    pub conn_map: ConnectionMap,
    pub config: AppConfig,
}

/// State over a fixture chain that mines instantly.
pub fn setup_state(data: FixtureData) -> TestState {
    setup_state_with_mining_delay(data, Duration::ZERO)
}

/// State over a fixture chain that holds every transaction in Mining for `delay`.
pub fn setup_state_with_mining_delay(data: FixtureData, delay: Duration) -> TestState {
    let chain = Arc::new(FixtureChain::new(data, delay));
    let source: Arc<dyn GovernanceSource> = chain.clone();
    let sender: Arc<dyn TransactionSender> = chain.clone();
    let conn_map = new_connection_map();
    TestState {
        chain,
        source,
        sender,
        tracker: ActionTracker::new(conn_map.clone()),
        conn_map,
        config: AppConfig::default(),
    }
}

/// Same as `setup_state`, but every read fails.
pub fn setup_failing_state() -> TestState {
    let mut state = setup_state(fixture_data(0));
    state.source = Arc::new(UnreachableSource);
    state
}

/// A source whose node never answers.
pub struct UnreachableSource;

impl GovernanceSource for UnreachableSource {
    fn proposals(&self) -> Result<Vec<Proposal>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
    fn proposal(&self, _id: &str) -> Result<Option<Proposal>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
    fn user_votes_as_of_block(&self, _account: &str, _block: u64) -> Result<u64, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
    fn has_voted_on_proposal(&self, _account: &str, _proposal_id: &str) -> Result<bool, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
    fn block_number(&self) -> Result<Option<u64>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
    fn votes_for_proposal(&self, _proposal_id: &str) -> Result<Option<ProposalVotes>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
}

/// Build and initialize a test service with the same wiring as `main`.
macro_rules! test_app {
    ($state:expr) => {{
        let state = &$state;
        let session_mw = actix_session::SessionMiddleware::builder(
            actix_session::storage::CookieSessionStore::default(),
            actix_web::cookie::Key::generate(),
        )
        .cookie_secure(false)
        .build();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(session_mw)
                .app_data(actix_web::web::Data::new(state.config.clone()))
                .app_data(actix_web::web::Data::from(state.source.clone()))
                .app_data(actix_web::web::Data::from(state.sender.clone()))
                .app_data(actix_web::web::Data::new(state.tracker.clone()))
                .app_data(actix_web::web::Data::new(state.conn_map.clone()))
                .configure(nouns_vote::handlers::configure),
        )
        .await
    }};
}

// ============================================================================
// HTTP HELPERS
// ============================================================================

const SESSION_COOKIE: &str = "id";

static CSRF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap());

/// Keeps the latest session cookie, like a browser would.
#[derive(Default)]
pub struct CookieJar {
    session: Option<Cookie<'static>>,
}

impl CookieJar {
    pub fn get(&self, uri: &str) -> TestRequest {
        self.attach(TestRequest::get().uri(uri))
    }

    pub fn post(&self, uri: &str, form: &[(&str, &str)]) -> TestRequest {
        let body = serde_urlencoded::to_string(form).unwrap();
        self.attach(
            TestRequest::post()
                .uri(uri)
                .insert_header(ContentType::form_url_encoded())
                .set_payload(body),
        )
    }

    fn attach(&self, req: TestRequest) -> TestRequest {
        match &self.session {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    /// Pick up a refreshed session cookie, if the response set one.
    pub fn absorb<B>(&mut self, resp: &ServiceResponse<B>) {
        if let Some(cookie) = resp.response().cookies().find(|c| c.name() == SESSION_COOKIE) {
            self.session = Some(cookie.into_owned());
        }
    }
}

pub async fn body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn csrf_token(html: &str) -> String {
    CSRF_RE
        .captures(html)
        .map(|c| c[1].to_string())
        .expect("page carries a CSRF token")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Send a request through `$app`, keeping the session cookie in `$jar`.
macro_rules! call {
    ($app:expr, $jar:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        $jar.absorb(&resp);
        resp
    }};
}

/// GET a page and return its body.
macro_rules! fetch {
    ($app:expr, $jar:expr, $uri:expr) => {{
        let req = $jar.get($uri);
        let resp = call!($app, $jar, req);
        assert!(resp.status().is_success(), "GET {} returned {}", $uri, resp.status());
        $crate::common::body_string(resp).await
    }};
}

/// GET the status JSON until `$done` holds for it, then return it.
macro_rules! wait_for_status {
    ($app:expr, $jar:expr, $proposal_id:expr, $done:expr) => {{
        let uri = format!("/vote/{}/status", $proposal_id);
        let mut last = serde_json::Value::Null;
        for _ in 0..100 {
            let req = $jar.get(&uri);
            let resp = call!($app, $jar, req);
            last = actix_web::test::read_body_json::<serde_json::Value, _>(resp).await;
            if $done(&last) {
                break;
            }
            actix_web::rt::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        last
    }};
}

/// Open `$uri`, then connect `$account` through the header form.
macro_rules! connect_wallet {
    ($app:expr, $jar:expr, $uri:expr, $account:expr) => {{
        let body = fetch!($app, $jar, $uri);
        let token = $crate::common::csrf_token(&body);
        let req = $jar.post(
            "/wallet/connect",
            &[("csrf_token", token.as_str()), ("account", $account), ("return_to", $uri)],
        );
        let resp = call!($app, $jar, req);
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        token
    }};
}
