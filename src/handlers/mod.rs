// handlers/mod.rs - request handlers grouped by surface
//
// pages  → full HTML pages (GET /, GET /weekly)
// htmx   → form posts that answer with fragments or a redirect (/log, /food)
// api    → JSON logging and read endpoints (/api/*)
// health → database liveness (GET /health)
pub mod api;
pub mod health;
pub mod htmx;
pub mod pages;

use axum::http::HeaderMap;

/// HTMX marks its requests with a non-empty `HX-Request` header
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .map(|v| !v.as_bytes().is_empty())
        .unwrap_or(false)
}
