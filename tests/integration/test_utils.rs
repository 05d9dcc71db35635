//! Shared helpers: temporary public roots, in-process requests and a real server on an
//! ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{HeaderMap, Method, Request, StatusCode};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use calc_server::handler::handle_request;
use calc_server::{AppState, Config, Server};

pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body>calc</body></html>";
pub const SECRET: &str = "outside the public root";

/// Temporary directory holding `public/` plus a file next to it that must never be served
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir_all(public.join("sub")).unwrap();
        std::fs::write(public.join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(public.join("styles.css"), "body { margin: 0; }").unwrap();
        std::fs::write(public.join("app.js"), "console.log('hi');").unwrap();
        std::fs::write(public.join("data.json"), r#"{"ok":true}"#).unwrap();
        std::fs::write(public.join("notes.md"), "# notes").unwrap();
        std::fs::write(public.join("sub/page.html"), "<p>nested</p>").unwrap();
        std::fs::write(dir.path().join("secret.txt"), SECRET).unwrap();
        Self { dir }
    }

    pub fn public_dir(&self) -> String {
        self.dir.path().join("public").display().to_string()
    }

    pub fn config(&self) -> Config {
        let mut config = Config::with_public_dir(self.public_dir());
        config.logging.access_log = false;
        config
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.config()).unwrap())
    }
}

/// Response parts collected for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Dispatch a request through the router without a socket
pub async fn call(state: &Arc<AppState>, method: Method, path: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap();
    let response = handle_request(req, Arc::clone(state), "127.0.0.1:40000".parse().unwrap())
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body: body.collect().await.unwrap().to_bytes(),
    }
}

/// POST a JSON value to /calculate through the router
pub async fn calculate(state: &Arc<AppState>, payload: &serde_json::Value) -> TestResponse {
    call(state, Method::POST, "/calculate", &payload.to_string()).await
}

/// Server running in the background on 127.0.0.1 with an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn start(mut config: Config) -> Self {
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.performance.shutdown_timeout = 2;

        let server = Server::bind(AppState::new(config).unwrap()).unwrap();
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run_until(async {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Send a request over TCP
    pub async fn send(&self, method: Method, path: &str, body: &str) -> TestResponse {
        send_to(self.addr, method, path, body).await
    }

    /// Signal shutdown and wait for the accept loop to finish draining
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        (&mut self.handle).await.unwrap();
    }
}

/// Send a request over TCP to `addr`
pub async fn send_to(addr: SocketAddr, method: Method, path: &str, body: &str) -> TestResponse {
    let client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
    let req = Request::builder()
        .method(method)
        .uri(format!("http://{addr}{path}"))
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap();
    let response = client.request(req).await.unwrap();

    let (parts, body) = response.into_parts();
    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body: body.collect().await.unwrap().to_bytes(),
    }
}
