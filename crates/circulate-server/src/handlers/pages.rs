//! Page endpoint.
//!
//! Dispatches the full request path and returns the rendered HTML.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use circulate_site::PageStatus;
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET for any path.
///
/// Content is scanned and rendered on a blocking thread.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let path = decode_path(uri.path());

    let page = tokio::task::spawn_blocking(move || state.dispatcher.dispatch(&path)).await??;

    let status = match page.status {
        PageStatus::Found => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
    };
    Ok((status, Html(page.body)).into_response())
}

/// Percent-decode a request path. Invalid UTF-8 is replaced, so such paths
/// simply fail to match any route.
fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use circulate_config::{Settings, SitePaths};
    use circulate_site::Dispatcher;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::app::create_router;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (tempfile::TempDir, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "_content/pages/index.md", "title: Home\n---\nHi\n");
        write(root, "_content/pages/my page/index.md", "title: Spaced\n---\n");
        write(root, "_content/pages/broken/index.md", "title: [\n---\n");
        fs::create_dir_all(root.join("_content/collections")).unwrap();
        write(root, "themes/default/index.html", "<h1>{{ meta.title }}</h1>");
        write(root, "themes/default/page.html", "page:{{ meta.title }}");
        write(root, "themes/default/404.html", "missing");

        let settings = Settings::default();
        let paths = SitePaths::resolve(root, &settings);
        let state = Arc::new(AppState {
            dispatcher: Dispatcher::new(settings, &paths),
        });
        (dir, state)
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, String, Response<()>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        (parts.status, body, Response::from_parts(parts, ()))
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/my%20page"), "/my page");
        assert_eq!(decode_path("/plain"), "/plain");
        assert_eq!(decode_path("/%FF"), "/\u{FFFD}");
    }

    #[tokio::test]
    async fn test_root_page() {
        let (_dir, state) = site();

        let (status, body, response) = get(state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>Home</h1>");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_percent_encoded_path() {
        let (_dir, state) = site();

        let (status, body, _) = get(state, "/my%20page").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "page:Spaced");
    }

    #[tokio::test]
    async fn test_unknown_path_renders_404() {
        let (_dir, state) = site();

        let (status, body, response) = get(state, "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "missing");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let (_dir, state) = site();

        let (status, _, _) = get(state, "/?page=2").await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_broken_front_matter_is_500() {
        let (_dir, state) = site();

        let (status, body, response) = get(state, "/broken").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(body.contains("Invalid front matter"), "{body}");
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let (_dir, state) = site();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let response = create_router(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
