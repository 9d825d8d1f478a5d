//! Browser-facing pages: the upload form and its embedded assets.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::AppContext;

/// Routes for the upload form and its static assets.
pub fn page_routes() -> Router<AppContext> {
    Router::new()
        .route("/upload", get(upload_form))
        .route("/static/upload.js", get(upload_script))
        .route("/static/styles.css", get(stylesheet))
}

async fn upload_form() -> Html<&'static str> {
    Html(include_str!("../../static/upload.html"))
}

async fn upload_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript")],
        include_str!("../../static/upload.js"),
    )
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_str!("../../static/styles.css"),
    )
}
