//! Route-level checks against the real router.
//!
//! The state carries a disconnected database handle, so everything
//! asserted here must resolve before any query runs: health probes,
//! public pages without a cookie, and the auth gate's redirect.

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;

use kartei_core::health::Readiness;
use kartei_core::middleware::REQUEST_ID_HEADER;
use kartei_web::router::build_router;
use kartei_web::state::AppState;

fn disconnected_state() -> AppState {
    AppState {
        db: DatabaseConnection::default(),
        api_key: String::new(),
        readiness: Readiness::new(),
    }
}

fn disconnected_server() -> TestServer {
    TestServer::new(build_router(disconnected_state())).expect("router should build")
}

#[tokio::test]
async fn should_answer_healthz() {
    let server = disconnected_server();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_gate_readyz_on_startup() {
    let state = disconnected_state();
    let readiness = state.readiness.clone();
    let server = TestServer::new(build_router(state)).expect("router should build");

    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    readiness.set_ready();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_redirect_anonymous_visitors_to_login() {
    let server = disconnected_server();
    let gated = [
        "/dashboard",
        "/decks/edit/1",
        "/decks/edit/1/card/2",
        "/decks/study/1",
    ];
    for path in gated {
        let response = server.get(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location"),
            "/login",
            "{path} should bounce to the login form"
        );
    }
}

#[tokio::test]
async fn should_gate_mutating_routes_too() {
    let server = disconnected_server();
    let gated = [
        "/decks/create",
        "/decks/delete/1",
        "/decks/1/cards/add",
        "/cards/save/1",
        "/cards/delete/1",
    ];
    for path in gated {
        // no form body on purpose: the session check runs before the
        // body is ever read
        let response = server.post(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location"),
            "/login",
            "{path} should bounce to the login form"
        );
    }
}

#[tokio::test]
async fn should_serve_the_landing_page_to_strangers() {
    let server = disconnected_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(
        body.contains("Study anything with flashcards"),
        "landing page should carry the pitch: {body}"
    );
}

#[tokio::test]
async fn should_serve_login_and_register_forms() {
    let server = disconnected_server();

    let login = server.get("/login").await;
    login.assert_status_ok();
    assert!(login.text().contains(r#"action="/login""#));

    let register = server.get("/register").await;
    register.assert_status_ok();
    assert!(register.text().contains(r#"action="/register""#));
}

#[tokio::test]
async fn should_fall_through_unknown_paths() {
    let server = disconnected_server();
    server.get("/no/such/page").await.assert_status_not_found();
}

#[tokio::test]
async fn should_stamp_responses_with_a_request_id() {
    let server = disconnected_server();
    let response = server.get("/healthz").await;
    assert!(
        response.maybe_header(REQUEST_ID_HEADER).is_some(),
        "expected an {REQUEST_ID_HEADER} header on the response"
    );
}
