//! Static file serving for the embedded page (web/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "web/"]
struct WebAssets;

/// Serve the page for bare `/` requests.
pub async fn index() -> Response {
    serve_embedded::<WebAssets>("index.html")
}

/// Fallback handler: serve page assets for unmatched paths, JSON 404 for
/// unknown API routes.
pub async fn fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "status": "error",
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded::<WebAssets>(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    path == "/api"
        || path
            .strip_prefix("/api")
            .is_some_and(|rest| rest.starts_with('/'))
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    let (path, asset) = match E::get(path) {
        Some(asset) => (path, Some(asset)),
        None => ("index.html", E::get("index.html")),
    };

    match asset {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_prefix_is_not_served_as_page() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/unknown"));
        assert!(!is_api_path("/apiary"));
        assert!(!is_api_path("/index.html"));
    }

    #[test]
    fn index_is_embedded() {
        let page = WebAssets::get("index.html").expect("index.html embedded");
        let html = String::from_utf8(page.data.to_vec()).unwrap();
        assert!(html.contains("/api/qr"));
    }
}
