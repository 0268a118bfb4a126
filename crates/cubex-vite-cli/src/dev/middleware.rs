//! Request filters in front of the dev server's static files.
//!
//! The dev server only serves assets. Anyone opening it in a browser gets a page
//! pointing them to the application instead, and dot-files such as `.env` or key
//! material under the project root are never served.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use minijinja::{context, Environment};

use crate::error::Result;

const TEMPLATE_NAME: &str = "dev-server-index.html";
const TEMPLATE: &str = include_str!("../../assets/dev-server-index.html");

/// Rendered placeholder page.
#[derive(Debug, Clone)]
pub struct PlaceholderPage {
    html: String,
}

impl PlaceholderPage {
    pub fn render(app_url: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;
        let html = env
            .get_template(TEMPLATE_NAME)?
            .render(context! { APP_URL => app_url })?;
        Ok(Self { html })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// 404 so tooling does not mistake the page for real content.
    pub fn response(&self) -> Response {
        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            self.html.clone(),
        )
            .into_response()
    }
}

/// Extensions of key and certificate files.
const DENIED_EXTENSIONS: &[&str] = &[".pem", ".crt", ".key"];

/// Whether `path` names a file the dev server must not expose.
///
/// Any percent-decoded segment starting with `.` is denied (`.env`, `.env.local`,
/// `.git/`, the hot file), as are key and certificate files. Paths that do not
/// decode are denied as well.
fn is_denied_path(path: &str) -> bool {
    let Ok(decoded) = urlencoding::decode(path) else {
        return true;
    };

    decoded.split(['/', '\\']).any(|segment| {
        let segment = segment.to_ascii_lowercase();
        segment.starts_with('.')
            || DENIED_EXTENSIONS.iter().any(|ext| segment.ends_with(ext))
    })
}

/// Refuse requests for dot-files and key material with 403.
pub async fn deny_sensitive_files(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_denied_path(path) {
        tracing::warn!(path, "refused request for a protected file");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    next.run(request).await
}

fn is_index_request(method: &Method, path: &str) -> bool {
    (method == Method::GET || method == Method::HEAD) && matches!(path, "/" | "/index.html")
}

/// Answer index requests with the placeholder page; pass everything else on.
pub async fn placeholder_middleware(
    State(page): State<Arc<PlaceholderPage>>,
    request: Request,
    next: Next,
) -> Response {
    if is_index_request(request.method(), request.uri().path()) {
        tracing::debug!(path = request.uri().path(), "serving placeholder page");
        return page.response();
    }
    next.run(request).await
}
