//! HTTP front-end for the browser UI
//!
//! Serves on the configured address (default 127.0.0.1:8501):
//! - GET  /         - upload page
//! - POST /report   - raw PDF body, returns the HTML result fragment
//! - POST /analyze  - raw PDF body, returns the Analysis as JSON
//! - GET  /health   - liveness + version
//!
//! Requests are handled one at a time on the accept loop.

use anyhow::{anyhow, Result};
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::config::VizConfig;
use crate::pipeline::analyze;
use crate::render::{html, Reporter};
use crate::types::VizError;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_FILE_NAME: &str = "upload.pdf";

pub struct AppState {
    pub config: VizConfig,
    pub reporter: Reporter,
}

impl AppState {
    pub fn new(config: VizConfig) -> Self {
        let reporter = Reporter::new(&config);
        Self { config, reporter }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self { status, content_type: "text/html; charset=utf-8", body: body.into_bytes() }
    }

    fn json(status: u16, value: &serde_json::Value) -> Self {
        Self { status, content_type: "application/json", body: value.to_string().into_bytes() }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub fn serve(state: AppState) -> Result<()> {
    let addr = state.config.server.addr.clone();
    let server = Server::http(&addr).map_err(|e| anyhow!("Failed to start server on {}: {}", addr, e))?;
    log::info!("Listening on http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &state) {
            log::error!("Error handling request: {}", e);
        }
    }
    Ok(())
}

fn handle_request(mut request: Request, state: &AppState) -> std::io::Result<()> {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_string();
    log::info!("{} {}", method, request.url());

    let limit = state.config.server.max_upload_bytes;
    let file_name = header_value(&request, "X-File-Name")
        .map(|v| urlencoding::decode(&v).map(|s| s.into_owned()).unwrap_or(v));
    let declared = request.body_length();

    let reply = match read_upload(request.as_reader(), declared, limit)? {
        Some(body) => guarded(|| route(state, &method, &path, file_name.as_deref(), &body)),
        None => too_large(limit),
    };

    let length = reply.body.len();
    let mut response = Response::new(
        StatusCode(reply.status),
        Vec::new(),
        Cursor::new(reply.body),
        Some(length),
        None,
    );
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response.add_header(header);
    }
    request.respond(response)
}

/// Read at most `limit` bytes of body. `None` when the declared length or the
/// bytes actually sent (chunked uploads declare nothing) exceed the limit.
fn read_upload<R: Read>(reader: R, declared: Option<usize>, limit: usize) -> std::io::Result<Option<Vec<u8>>> {
    if declared.is_some_and(|len| len > limit) {
        return Ok(None);
    }
    let mut body = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut body)?;
    Ok((body.len() <= limit).then_some(body))
}

/// A panic while handling one request answers 500 instead of ending the accept loop.
fn guarded(handler: impl FnOnce() -> Reply) -> Reply {
    panic::catch_unwind(AssertUnwindSafe(handler)).unwrap_or_else(|_| {
        log::error!("Request handler panicked");
        Reply::json(500, &serde_json::json!({ "error": "Internal error while processing the upload" }))
    })
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

/// Dispatch one request. Pure apart from logging, so it is testable without a socket.
pub fn route(state: &AppState, method: &Method, path: &str, file_name: Option<&str>, body: &[u8]) -> Reply {
    let source = file_name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_FILE_NAME);
    match (method, path) {
        (Method::Get, "/") | (Method::Get, "/index.html") => Reply::html(200, html::upload_page()),
        (Method::Get, "/health") => Reply::json(200, &serde_json::json!({ "status": "ok", "version": VERSION })),
        (Method::Post, "/report") => handle_report(state, source, body),
        (Method::Post, "/analyze") => handle_analyze(state, source, body),
        _ => Reply::json(404, &serde_json::json!({ "error": "Not found" })),
    }
}

/// POST /report - HTML fragment for the page's result area
fn handle_report(state: &AppState, source: &str, body: &[u8]) -> Reply {
    if body.is_empty() {
        return Reply::html(200, format!(r#"<p class="info">{}</p>"#, html::UPLOAD_PROMPT));
    }
    let fragment = analyze(source, body, &state.config.analysis)
        .and_then(|analysis| state.reporter.fragment(&analysis));
    match fragment {
        Ok(html) => Reply::html(200, html),
        Err(e) => {
            log::warn!("'{}' rejected: {}", source, e);
            Reply::html(error_status(&e), html::error_fragment(&e.to_string()))
        }
    }
}

/// POST /analyze - the structured result as JSON
fn handle_analyze(state: &AppState, source: &str, body: &[u8]) -> Reply {
    match analyze(source, body, &state.config.analysis) {
        Ok(analysis) => match serde_json::to_value(&analysis) {
            Ok(value) => Reply::json(200, &value),
            Err(e) => Reply::json(500, &serde_json::json!({ "error": e.to_string() })),
        },
        Err(e) => {
            log::warn!("'{}' rejected: {}", source, e);
            Reply::json(error_status(&e), &serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn error_status(error: &VizError) -> u16 {
    if error.is_user_error() {
        422
    } else {
        500
    }
}

fn too_large(limit: usize) -> Reply {
    Reply::json(
        413,
        &serde_json::json!({ "error": format!("Upload exceeds the {} byte limit", limit) }),
    )
}
