use axum::{
    extract::OriginalUri,
    response::{Html, IntoResponse, Json},
};
use modkit_errors::problem::not_found;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Problem response for unmatched routes.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let path = uri.path().to_string();
    let mut resp = not_found(format!("No route for {path}"));
    resp.0 = resp.0.with_code("api_ingress.route.not_found.v1").with_instance(path);
    resp
}

pub async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Passport Desk API</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}
