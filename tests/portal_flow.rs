use std::sync::{Arc, Mutex};

use fblogin_portal::portal::graph_portal;
use fblogin_portal::{
    Credential, FlowError, FlowState, Navigation, Outcome, PortalConfig, StatusEvent,
    StatusMessage, Transport,
};
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct Host {
    navigations: Arc<Mutex<Vec<Navigation>>>,
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl Host {
    fn navigations(&self) -> Vec<Navigation> {
        self.navigations.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }
}

fn config(server: &MockServer) -> PortalConfig {
    PortalConfig::new(
        "141368599534524".parse().unwrap(),
        server.uri().parse().unwrap(),
    )
    .with_graph_url(server.uri().parse().unwrap())
    .with_logout_url(format!("{}/logout.php", server.uri()).parse().unwrap())
    .with_app_name("Make Less Mush")
}

fn portal(
    config: PortalConfig,
    session_token: Option<&str>,
    host: &Host,
) -> fblogin_portal::LoginPortal<
    fblogin_portal::GraphClient,
    fblogin_portal::PortalClient,
    impl fblogin_portal::portal::Navigator,
    impl fblogin_portal::portal::StatusSink,
> {
    let navigations = host.navigations.clone();
    let events = host.events.clone();
    graph_portal(
        config,
        session_token.map(|t| Credential::new(t).unwrap()),
        move |n: Navigation| navigations.lock().unwrap().push(n),
        move |e: StatusEvent| events.lock().unwrap().push(e),
    )
}

async fn mount_permissions_ok(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/v2.2/me/permissions"))
        .and(query_param("access_token", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"permission": "public_profile", "status": "granted"}]
        })))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, token: &str, id: &str) {
    Mock::given(method("GET"))
        .and(path("/v2.2/me"))
        .and(query_param("fields", "id"))
        .and(query_param("access_token", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id })))
        .expect(1..)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connected_submits_and_navigates_home() {
    let server = MockServer::start().await;
    mount_permissions_ok(&server, "tok123").await;
    mount_profile(&server, "tok123", "10153").await;

    Mock::given(method("POST"))
        .and(path("/facebook-login-portal"))
        .and(body_string("user_id=10153&accessToken=tok123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), Some("tok123"), &host);

    let outcome = portal.check_login_state().await.unwrap();

    assert_eq!(outcome, Outcome::Navigated(Navigation::Redirect("/home".into())));
    assert_eq!(host.navigations(), vec![Navigation::Redirect("/home".into())]);
    assert!(host.events().is_empty());
}

#[tokio::test]
async fn test_not_authorized_shows_app_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.2/me/permissions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "User has not authorized application 141368599534524.",
                "type": "OAuthException",
                "code": 190,
                "error_subcode": 458
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.2/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), Some("tok123"), &host);

    let outcome = portal.check_login_state().await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Blocked {
            message: StatusMessage::LogIntoApp,
            ..
        }
    ));
    let events = host.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text(), "Please log into Make Less Mush.");
    assert!(host.navigations().is_empty());
}

#[tokio::test]
async fn test_unknown_shows_provider_message_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), None, &host);

    let outcome = portal.check_login_state().await.unwrap();

    assert_eq!(outcome.state(), FlowState::Blocked);
    let events = host.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text(), "Please log into Facebook.");
}

#[tokio::test]
async fn test_fetch_error_payload_skips_submission() {
    let server = MockServer::start().await;
    mount_permissions_ok(&server, "tok123").await;

    Mock::given(method("GET"))
        .and(path("/v2.2/me"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "Session has expired",
                "type": "OAuthException",
                "code": 190,
                "error_subcode": 463
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/facebook-login-portal"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), Some("tok123"), &host);

    let err = portal.check_login_state().await.unwrap_err();

    assert!(matches!(err, FlowError::FetchFailed(_)));
    assert!(host.navigations().is_empty());
    let events = host.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], StatusEvent::Failed { .. }));
}

#[tokio::test]
async fn test_logout_ends_provider_and_backend_sessions() {
    let server = MockServer::start().await;
    mount_permissions_ok(&server, "tok123").await;

    Mock::given(method("GET"))
        .and(path("/logout.php"))
        .and(query_param("access_token", "tok123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), Some("tok123"), &host);

    let navigation = portal.logout().await.unwrap();

    assert_eq!(navigation, Navigation::Redirect("/home".into()));
    assert_eq!(host.navigations(), vec![Navigation::Redirect("/home".into())]);
}

#[tokio::test]
async fn test_submission_failure_stays_on_page() {
    let server = MockServer::start().await;
    mount_permissions_ok(&server, "tok123").await;
    mount_profile(&server, "tok123", "10153").await;

    Mock::given(method("POST"))
        .and(path("/facebook-login-portal"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), Some("tok123"), &host);

    let err = portal.check_login_state().await.unwrap_err();

    assert!(matches!(err, FlowError::SubmissionFailed(_)));
    assert!(host.navigations().is_empty());
    assert_eq!(host.events()[0].text(), "Login failed. Please try again.");
}

#[tokio::test]
async fn test_repeated_checks_submit_independently() {
    let server = MockServer::start().await;
    mount_permissions_ok(&server, "tok123").await;
    mount_profile(&server, "tok123", "10153").await;

    Mock::given(method("POST"))
        .and(path("/facebook-login-portal"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(config(&server), Some("tok123"), &host);

    portal.check_login_state().await.unwrap();
    portal.check_login_state().await.unwrap();

    assert_eq!(host.navigations().len(), 2);
}

#[tokio::test]
async fn test_form_transport_does_not_post_in_background() {
    let server = MockServer::start().await;
    mount_permissions_ok(&server, "tok123").await;
    mount_profile(&server, "tok123", "10153").await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let host = Host::default();
    let portal = portal(
        config(&server).with_transport(Transport::Form),
        Some("tok123"),
        &host,
    );

    portal.check_login_state().await.unwrap();

    let navigations = host.navigations();
    assert_eq!(navigations.len(), 1);
    let Navigation::FormPost(form) = &navigations[0] else {
        panic!("expected a form post, got {:?}", navigations[0]);
    };
    assert_eq!(form.action, format!("{}/facebook-login-portal", server.uri()));
    let html = form.to_html();
    assert!(html.contains(&format!("action=\"{}/facebook-login-portal\"", server.uri())));
    assert!(html.contains("name=\"user_id\" value=\"10153\""));
    assert!(html.contains("name=\"accessToken\" value=\"tok123\""));
}
