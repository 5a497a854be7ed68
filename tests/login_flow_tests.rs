//! Integration tests for the OAuth 1.0a login flow.
//!
//! The Trade Me token endpoints are mocked with wiremock; no real network
//! or browser is touched. Terminal prompts and the browser launcher are
//! replaced with scripted fakes.

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trademe_rs::auth::{BrowserLauncher, CredentialStore, LoginFlow, UserInteraction};
use trademe_rs::{Environment, Error};

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Scripted stand-in for the terminal: canned prompt answers, recorded
/// notifications.
#[derive(Clone, Default)]
struct ScriptedInteraction {
    answers: Arc<Mutex<Vec<String>>>,
    notifications: Arc<Mutex<Vec<String>>>,
}

impl ScriptedInteraction {
    fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: Arc::new(Mutex::new(
                answers.iter().rev().map(|s| s.to_string()).collect(),
            )),
            notifications: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl UserInteraction for ScriptedInteraction {
    fn prompt(&self, _message: &str) -> trademe_rs::Result<String> {
        self.answers
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| Error::Authentication("no scripted answer left".into()))
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}

/// Records the URL instead of opening anything.
#[derive(Clone, Default)]
struct RecordingBrowser {
    opened: Arc<Mutex<Vec<String>>>,
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> bool {
        self.opened.lock().unwrap().push(url.to_string());
        true
    }
}

async fn mock_oauth_endpoints(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/Oauth/RequestToken"))
        .and(header_exists("authorization"))
        .and(body_string_contains("scope="))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("oauth_token=rt1&oauth_token_secret=rts1"),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Oauth/AccessToken"))
        .and(header_exists("authorization"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("oauth_token=at1&oauth_token_secret=ats1"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pin_flow_end_to_end() {
    init_logging();
    let server = MockServer::start().await;
    mock_oauth_endpoints(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("creds.json");
    let interaction = ScriptedInteraction::with_answers(&["9999"]);
    let browser = RecordingBrowser::default();

    let credentials = LoginFlow::new("ck", "cs")
        .environment(Environment::custom(server.uri(), server.uri()))
        .prefer_local_callback(false)
        .credential_store(CredentialStore::new(&store_path))
        .interaction(interaction.clone())
        .browser(browser.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(credentials.consumer_key, "ck");
    assert_eq!(credentials.access_token, "at1");
    assert_eq!(credentials.access_token_secret, "ats1");

    // The authorize URL carries the request token and was handed to the
    // browser launcher.
    let opened = browser.opened.lock().unwrap().clone();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].contains("/Oauth/Authorize?oauth_token=rt1"));

    // Persisted file contains exactly the four fields.
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    let object = saved.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert_eq!(object["consumer_key"], "ck");
    assert_eq!(object["consumer_secret"], "cs");
    assert_eq!(object["access_token"], "at1");
    assert_eq!(object["access_token_secret"], "ats1");
}

#[tokio::test]
async fn test_callback_flow_end_to_end() {
    init_logging();
    let server = MockServer::start().await;
    mock_oauth_endpoints(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let interaction = ScriptedInteraction::default();

    // Simulate the browser redirect once the listener is up.
    let port = 18765;
    tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        loop {
            match tokio::net::TcpStream::connect(("127.0.0.1", port)).await {
                Ok(mut stream) => {
                    let request = "GET /callback?oauth_verifier=CB42 HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n";
                    stream.write_all(request.as_bytes()).await.unwrap();
                    let mut response = String::new();
                    let _ = stream.read_to_string(&mut response).await;
                    break;
                }
                Err(_) => tokio::time::sleep(Duration::from_millis(20)).await,
            }
        }
    });

    let credentials = LoginFlow::new("ck", "cs")
        .environment(Environment::custom(server.uri(), server.uri()))
        .callback_port(port)
        .callback_timeout(Duration::from_secs(10))
        .credential_store(CredentialStore::new(dir.path().join("creds.json")))
        .interaction(interaction.clone())
        .browser(RecordingBrowser::default())
        .run()
        .await
        .unwrap();

    assert_eq!(credentials.access_token, "at1");
    assert!(interaction
        .notifications()
        .iter()
        .any(|line| line.contains("Waiting for authorization")));
}

#[tokio::test]
async fn test_callback_timeout_falls_back_to_manual_entry() {
    let server = MockServer::start().await;
    mock_oauth_endpoints(&server).await;

    let dir = tempfile::tempdir().unwrap();
    // No redirect will arrive; the flow should prompt instead.
    let interaction = ScriptedInteraction::with_answers(&["7777"]);

    let credentials = LoginFlow::new("ck", "cs")
        .environment(Environment::custom(server.uri(), server.uri()))
        .callback_port(18766)
        .callback_timeout(Duration::from_millis(200))
        .credential_store(CredentialStore::new(dir.path().join("creds.json")))
        .interaction(interaction)
        .browser(RecordingBrowser::default())
        .run()
        .await
        .unwrap();

    assert_eq!(credentials.access_token, "at1");
}

#[tokio::test]
async fn test_request_token_error_status_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Oauth/RequestToken"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid consumer key"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = LoginFlow::new("bad", "creds")
        .environment(Environment::custom(server.uri(), server.uri()))
        .prefer_local_callback(false)
        .credential_store(CredentialStore::new(dir.path().join("creds.json")))
        .interaction(ScriptedInteraction::default())
        .browser(RecordingBrowser::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
    assert!(err.to_string().contains("request token"));
}

#[tokio::test]
async fn test_access_token_missing_fields_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Oauth/RequestToken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("oauth_token=rt1&oauth_token_secret=rts1"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Oauth/AccessToken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("nothing=useful"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("creds.json"));
    let err = LoginFlow::new("ck", "cs")
        .environment(Environment::custom(server.uri(), server.uri()))
        .prefer_local_callback(false)
        .credential_store(store.clone())
        .interaction(ScriptedInteraction::with_answers(&["9999"]))
        .browser(RecordingBrowser::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
    // Nothing persisted on failure.
    assert!(store.load().unwrap().is_none());
}
