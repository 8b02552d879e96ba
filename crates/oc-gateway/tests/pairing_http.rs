//! Pairing endpoint integration tests
//!
//! Drives the gateway router with in-process requests and a real TCP
//! listener, using mock collaborators where outcomes must be controlled.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use oc_core::auth::{AuthConfig, AuthDecision, AuthFailure, ConnectAuth, ConnectRequest};
use oc_core::config::{GatewayConfig, TlsConfig};
use oc_core::error::{AuthError, RenderError};
use oc_core::net::StaticLanAddress;
use oc_core::traits::{GatewayAuthorizer, QrRenderer};
use oc_gateway::pairing::{handle_pairing_qr_request, PairingPayload, PAIRING_QR_PATH};
use oc_gateway::{build_router, GatewayServer, GatewayState};

const LOCAL_PEER: &str = "127.0.0.1:51000";
const REMOTE_PEER: &str = "192.168.1.20:51000";

/// Renders the URI itself so assertions can see what was encoded
struct FakeRenderer;

#[async_trait]
impl QrRenderer for FakeRenderer {
    async fn render_png_base64(&self, uri: &str) -> Result<String, RenderError> {
        Ok(format!("QR[{}]", uri))
    }
}

struct FailingRenderer;

#[async_trait]
impl QrRenderer for FailingRenderer {
    async fn render_png_base64(&self, _uri: &str) -> Result<String, RenderError> {
        Err(RenderError::Image("encoder crashed".to_string()))
    }
}

/// Records every credential it is asked about and answers `ok`
struct RecordingAuthorizer {
    ok: bool,
    calls: Mutex<Vec<Option<ConnectAuth>>>,
}

impl RecordingAuthorizer {
    fn new(ok: bool) -> Arc<Self> {
        Arc::new(Self {
            ok,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Option<ConnectAuth>> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl GatewayAuthorizer for RecordingAuthorizer {
    async fn authorize(&self, request: ConnectRequest<'_>) -> Result<AuthDecision, AuthError> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(request.connect_auth.cloned());
        Ok(if self.ok {
            AuthDecision::allow()
        } else {
            AuthDecision::deny(AuthFailure::Mismatch)
        })
    }
}

struct BrokenAuthorizer;

#[async_trait]
impl GatewayAuthorizer for BrokenAuthorizer {
    async fn authorize(&self, _request: ConnectRequest<'_>) -> Result<AuthDecision, AuthError> {
        Err(AuthError::Unavailable("policy store offline".to_string()))
    }
}

fn secrets(token: Option<&str>, password: Option<&str>) -> AuthConfig {
    AuthConfig {
        token: token.map(str::to_string),
        password: password.map(str::to_string),
    }
}

fn config(bind_host: &str, port: u16, tls: bool, auth: AuthConfig) -> GatewayConfig {
    GatewayConfig {
        bind_host: bind_host.to_string(),
        port,
        tls: Some(TlsConfig { enabled: tls }),
        auth,
        trusted_proxies: Vec::new(),
    }
}

fn state(config: GatewayConfig) -> GatewayState {
    GatewayState::new(config)
        .with_renderer(Arc::new(FakeRenderer))
        .with_lan_source(Arc::new(StaticLanAddress(None)))
}

fn request(method: Method, path: &str, peer: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::HOST, "127.0.0.1:18789")
        .extension(ConnectInfo(peer.parse::<SocketAddr>().expect("valid peer")))
        .body(Body::empty())
        .expect("valid request")
}

fn with_bearer(mut req: Request<Body>, token: &str) -> Request<Body> {
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().expect("valid header"),
    );
    req
}

async fn send(state: GatewayState, req: Request<Body>) -> Response {
    build_router(state).oneshot(req).await.expect("router is infallible")
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

async fn payload(response: Response) -> PairingPayload {
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).expect("Invalid payload JSON")
}

#[tokio::test]
async fn test_other_paths_are_not_handled() {
    let state = state(config("127.0.0.1", 18789, false, secrets(Some("abc"), None)));

    for (method, path) in [
        (Method::GET, "/"),
        (Method::GET, "/api/pairing"),
        (Method::GET, "/api/pairing/qr/"),
        (Method::POST, "/api/pairing/qrcode"),
        (Method::DELETE, "/API/PAIRING/QR"),
    ] {
        let (parts, _) = request(method.clone(), path, LOCAL_PEER).into_parts();
        let handled = handle_pairing_qr_request(&parts, &state)
            .await
            .expect("handler should not fail");
        assert!(handled.is_none(), "{} {} should not be handled", method, path);

        let response = send(state.clone(), request(method, path, LOCAL_PEER)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_non_get_is_method_not_allowed() {
    let authorizer = RecordingAuthorizer::new(true);
    let state = state(config("127.0.0.1", 18789, false, secrets(Some("abc"), None)))
        .with_authorizer(authorizer.clone());

    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        for peer in [LOCAL_PEER, REMOTE_PEER] {
            let req = with_bearer(request(method.clone(), PAIRING_QR_PATH, peer), "abc");
            let response = send(state.clone(), req).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(response.headers()[header::ALLOW], "GET");
        }
    }

    assert!(authorizer.calls().is_empty());
}

#[tokio::test]
async fn test_local_request_skips_credentials() {
    let authorizer = RecordingAuthorizer::new(false);
    let state = state(config("127.0.0.1", 8443, true, secrets(Some("abc"), None)))
        .with_authorizer(authorizer.clone());

    let payload = payload(send(state, request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER)).await).await;

    assert_eq!(
        payload.deep_link,
        "openclaw://gateway?host=127.0.0.1&port=8443&tls=true&token=abc"
    );
    assert_eq!(payload.qr_image_base64, format!("QR[{}]", payload.deep_link));
    assert_eq!(payload.host, "127.0.0.1");
    assert_eq!(payload.port, 8443);
    assert!(payload.tls);
    assert!(authorizer.calls().is_empty());
}

#[tokio::test]
async fn test_query_string_does_not_change_route() {
    let state = state(config("127.0.0.1", 8443, false, AuthConfig::default()));
    let req = request(Method::GET, "/api/pairing/qr?format=png", LOCAL_PEER);
    assert_eq!(send(state, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_remote_request_without_credentials_is_unauthorized() {
    let state = state(config("0.0.0.0", 18789, false, secrets(Some("abc"), Some("hunter2"))));

    let response = send(state, request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("Invalid JSON");
    assert_eq!(body, serde_json::json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_remote_request_with_wrong_token_is_unauthorized() {
    let state = state(config("0.0.0.0", 18789, false, secrets(Some("abc"), Some("hunter2"))));
    let req = with_bearer(request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER), "abd");
    assert_eq!(send(state, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_remote_request_with_token_or_password_is_served() {
    let auth = secrets(Some("abc"), Some("hunter2"));
    let state = state(config("203.0.113.9", 18789, true, auth));

    for credential in ["abc", "hunter2"] {
        let req = with_bearer(request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER), credential);
        let payload = payload(send(state.clone(), req).await).await;

        // The full secret set is disclosed whichever credential was used
        assert_eq!(
            payload.deep_link,
            "openclaw://gateway?host=203.0.113.9&port=18789&tls=true&token=abc&password=hunter2"
        );
        assert_eq!(payload.host, "203.0.113.9");
    }
}

#[tokio::test]
async fn test_remote_request_with_no_secrets_configured_is_unauthorized() {
    let state = state(config("0.0.0.0", 18789, false, AuthConfig::default()));
    let req = with_bearer(request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER), "anything");
    assert_eq!(send(state, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_is_forwarded_as_token_and_password() {
    let authorizer = RecordingAuthorizer::new(true);
    let state = state(config("127.0.0.1", 18789, false, AuthConfig::default()))
        .with_authorizer(authorizer.clone());

    let req = with_bearer(request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER), "s3cret");
    assert_eq!(send(state.clone(), req).await.status(), StatusCode::OK);

    let req = request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER);
    assert_eq!(send(state, req).await.status(), StatusCode::OK);

    assert_eq!(
        authorizer.calls(),
        vec![Some(ConnectAuth::from_bearer("s3cret")), None]
    );
}

#[tokio::test]
async fn test_denied_request_never_renders() {
    struct PanickingRenderer;

    #[async_trait]
    impl QrRenderer for PanickingRenderer {
        async fn render_png_base64(&self, _uri: &str) -> Result<String, RenderError> {
            panic!("payload must not be built for a denied request");
        }
    }

    let state = state(config("127.0.0.1", 18789, false, secrets(Some("abc"), None)))
        .with_renderer(Arc::new(PanickingRenderer))
        .with_authorizer(RecordingAuthorizer::new(false));

    let req = with_bearer(request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER), "abc");
    assert_eq!(send(state, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trusted_proxy_forwarding_local_client() {
    let mut cfg = config("127.0.0.1", 18789, false, secrets(Some("abc"), None));
    cfg.trusted_proxies = vec!["10.0.0.2".to_string()];
    let state = state(cfg);

    let mut req = request(Method::GET, PAIRING_QR_PATH, "10.0.0.2:40000");
    req.headers_mut()
        .insert("x-forwarded-for", "127.0.0.1".parse().expect("valid header"));
    assert_eq!(send(state.clone(), req).await.status(), StatusCode::OK);

    // Same claim from a peer that is not on the list
    let mut req = request(Method::GET, PAIRING_QR_PATH, "10.0.0.3:40000");
    req.headers_mut()
        .insert("x-forwarded-for", "127.0.0.1".parse().expect("valid header"));
    assert_eq!(send(state.clone(), req).await.status(), StatusCode::UNAUTHORIZED);

    // Forwarded by a proxy on this machine that is not on the list
    let mut req = request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER);
    req.headers_mut()
        .insert("x-forwarded-for", "198.51.100.4".parse().expect("valid header"));
    assert_eq!(send(state, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trusted_proxy_cannot_vouch_for_foreign_host() {
    let mut cfg = config("127.0.0.1", 18789, false, secrets(Some("abc"), None));
    cfg.trusted_proxies = vec!["127.0.0.1".to_string()];
    let state = state(cfg);

    // A rebound page behind a local reverse proxy
    let mut req = request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER);
    req.headers_mut()
        .insert(header::HOST, "evil.example.com".parse().expect("valid header"));
    req.headers_mut()
        .insert("x-forwarded-for", "127.0.0.1".parse().expect("valid header"));
    assert_eq!(send(state.clone(), req).await.status(), StatusCode::UNAUTHORIZED);

    // Proxy headers that contradict each other
    let mut req = request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER);
    req.headers_mut()
        .insert("x-forwarded-for", "127.0.0.1".parse().expect("valid header"));
    req.headers_mut()
        .insert("x-real-ip", "203.0.113.9".parse().expect("valid header"));
    assert_eq!(send(state, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wildcard_bind_scenario() {
    let cfg = GatewayConfig {
        bind_host: "0.0.0.0".to_string(),
        port: 7777,
        tls: None,
        auth: AuthConfig::default(),
        trusted_proxies: Vec::new(),
    };
    let state = GatewayState::new(cfg)
        .with_renderer(Arc::new(FakeRenderer))
        .with_lan_source(Arc::new(StaticLanAddress(Some(Ipv4Addr::new(10, 0, 0, 7)))));

    let payload = payload(send(state, request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER)).await).await;

    assert_eq!(payload.host, "10.0.0.7");
    assert_eq!(payload.port, 7777);
    assert!(!payload.tls);
    assert_eq!(
        payload.deep_link,
        "openclaw://gateway?host=10.0.0.7&port=7777&tls=false"
    );
    assert!(!payload.deep_link.contains("token="));
    assert!(!payload.deep_link.contains("password="));
}

#[tokio::test]
async fn test_wildcard_bind_without_lan_falls_back_to_loopback() {
    let state = state(config("::", 7777, false, AuthConfig::default()));
    let payload = payload(send(state, request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER)).await).await;
    assert_eq!(payload.host, "127.0.0.1");
}

#[tokio::test]
async fn test_identical_requests_give_identical_bodies() {
    let state = state(config("localhost", 8443, true, secrets(Some("abc"), Some("pw"))));

    let first = body_bytes(send(state.clone(), request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER)).await).await;
    let second = body_bytes(send(state, request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER)).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_render_failure_is_internal_error() {
    let state = state(config("127.0.0.1", 18789, false, AuthConfig::default()))
        .with_renderer(Arc::new(FailingRenderer));

    let response = send(state, request(Method::GET, PAIRING_QR_PATH, LOCAL_PEER)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("Invalid JSON");
    assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_authorizer_failure_is_internal_error() {
    let state = state(config("127.0.0.1", 18789, false, secrets(Some("abc"), None)))
        .with_authorizer(Arc::new(BrokenAuthorizer));

    let req = with_bearer(request(Method::GET, PAIRING_QR_PATH, REMOTE_PEER), "abc");
    assert_eq!(send(state, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_connect_info_is_not_local() {
    let state = state(config("127.0.0.1", 18789, false, secrets(Some("abc"), None)));
    let req = Request::builder()
        .uri(PAIRING_QR_PATH)
        .body(Body::empty())
        .expect("valid request");
    assert_eq!(send(state, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_served_over_tcp_with_png_renderer() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read address");

    let cfg = config("127.0.0.1", addr.port(), false, secrets(Some("abc"), None));
    let cancel = CancellationToken::new();
    let server = GatewayServer::new(GatewayState::new(cfg)).with_shutdown_token(cancel.clone());
    let handle = tokio::spawn(server.serve(listener));

    let mut stream = TcpStream::connect(addr).await.expect("Failed to connect");
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: 127.0.0.1:{}\r\nConnection: close\r\n\r\n",
        PAIRING_QR_PATH,
        addr.port()
    );
    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to write request");

    let mut raw = Vec::new();
    timeout(Duration::from_secs(10), stream.read_to_end(&mut raw))
        .await
        .expect("Timed out reading response")
        .expect("Failed to read response");
    let raw = String::from_utf8(raw).expect("Response is not UTF-8");

    assert!(raw.starts_with("HTTP/1.1 200 OK"), "unexpected response: {}", raw);
    let (_, body) = raw.split_once("\r\n\r\n").expect("Malformed response");
    let payload: PairingPayload = serde_json::from_str(body).expect("Invalid payload JSON");
    assert_eq!(
        payload.deep_link,
        format!(
            "openclaw://gateway?host=127.0.0.1&port={}&tls=false&token=abc",
            addr.port()
        )
    );
    assert!(!payload.qr_image_base64.is_empty());

    cancel.cancel();
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("Server did not shut down")
        .expect("Server task panicked")
        .expect("Server returned an error");
}
