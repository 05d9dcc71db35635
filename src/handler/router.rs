//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::{calculate, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Path of the calculate endpoint
pub const CALCULATE_PATH: &str = "/calculate";

/// Which handler a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Calculate,
    StaticFile,
    MethodNotAllowed,
}

/// Select a handler from method and path
pub fn route(method: &Method, path: &str) -> Route {
    match (method, path) {
        (&Method::POST, CALCULATE_PATH) => Route::Calculate,
        (&Method::GET, _) => Route::StaticFile,
        _ => Route::MethodNotAllowed,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    let started = Instant::now();
    let access_entry = state
        .access_log_enabled()
        .then(|| AccessLogEntry::start(remote_addr, &req));

    let response = dispatch(req, &state).await;

    if let Some(mut entry) = access_entry {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    match route(req.method(), req.uri().path()) {
        Route::Calculate => calculate::handle(req, state).await,
        Route::StaticFile => static_files::serve(req.uri().path(), state).await,
        Route::MethodNotAllowed => {
            logger::log_warning(&format!(
                "Method not allowed: {} {}",
                req.method(),
                req.uri().path()
            ));
            http::build_405_response()
        }
    }
}
