use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct DashboardAssets;

/// Dashboard entry page.
pub async fn index() -> Result<Html<Vec<u8>>, StatusCode> {
    match DashboardAssets::get("index.html") {
        Some(content) => Ok(Html(content.data.into_owned())),
        None => {
            tracing::warn!("Dashboard index page is not embedded");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

pub async fn serve_asset(Path(file): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    match DashboardAssets::get(&file) {
        Some(content) => {
            let mime_type = content_type_for(&file);
            let body = content.data.into_owned();
            Ok(([(header::CONTENT_TYPE, mime_type)], body))
        }
        None => {
            tracing::warn!("Dashboard asset not found: {}", file);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

fn content_type_for(file: &str) -> &'static str {
    match file.rsplit('.').next().unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_by_extension() {
        assert_eq!(content_type_for("app.js"), "application/javascript; charset=utf-8");
        assert_eq!(content_type_for("styles.css"), "text/css; charset=utf-8");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn bundled_files_are_embedded() {
        for f in ["index.html", "app.js", "styles.css"] {
            assert!(DashboardAssets::get(f).is_some(), "{f}");
        }
    }
}
