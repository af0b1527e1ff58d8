//! Static file serving for the web form.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use include_dir::{Dir, include_dir};

use super::handlers::labels::Options;

/// Embedded web form.
static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Serve the form with the selectable options injected as static data
/// (avoids an API round-trip).
pub async fn index_handler() -> impl IntoResponse {
    match STATIC_DIR.get_file("index.html") {
        Some(file) => {
            let contents = String::from_utf8_lossy(file.contents());
            let options = match serde_json::to_string(&Options::current()) {
                Ok(json) => json,
                Err(e) => {
                    return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
                }
            };
            let script = format!("<script>window.__LABEL_OPTIONS={}</script></head>", options);
            Html(contents.replace("</head>", &script)).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Form not found").into_response(),
    }
}
