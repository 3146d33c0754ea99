//! Directory-backed asset store.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_status::SetStatus;

use crate::config::AssetsConfig;
use crate::gateway::AssetStore;

#[derive(Debug, Clone)]
enum Inner {
    Plain(ServeDir),
    WithNotFoundPage(ServeDir<SetStatus<ServeFile>>),
}

/// Serves files from a directory on disk.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    inner: Inner,
}

impl StaticAssets {
    pub fn new(config: &AssetsConfig) -> Self {
        let dir = ServeDir::new(&config.root).append_index_html_on_directories(config.append_index_html);
        let inner = match &config.not_found_file {
            Some(page) => Inner::WithNotFoundPage(dir.not_found_service(ServeFile::new(page))),
            None => Inner::Plain(dir),
        };

        tracing::info!(
            root = %config.root.display(),
            not_found_page = ?config.not_found_file,
            "Static asset store ready"
        );

        Self { inner }
    }
}

#[async_trait]
impl AssetStore for StaticAssets {
    async fn fetch(&self, request: Request<Body>) -> Response<Body> {
        let result = match &self.inner {
            Inner::Plain(dir) => dir.clone().oneshot(request).await.map(|r| r.map(Body::new)),
            Inner::WithNotFoundPage(dir) => {
                dir.clone().oneshot(request).await.map(|r| r.map(Body::new))
            }
        };
        match result {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use std::path::PathBuf;

    struct TempSite {
        root: PathBuf,
    }

    impl TempSite {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("edge-gateway-assets-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(root.join("assets")).unwrap();
            std::fs::write(root.join("index.html"), "<!doctype html><p>home</p>").unwrap();
            std::fs::write(root.join("assets/app.js"), "console.log('app')").unwrap();
            std::fs::write(root.join("404.html"), "<p>nope</p>").unwrap();
            Self { root }
        }

        fn config(&self, not_found: bool) -> AssetsConfig {
            AssetsConfig {
                root: self.root.clone(),
                append_index_html: true,
                not_found_file: not_found.then(|| self.root.join("404.html")),
            }
        }
    }

    impl Drop for TempSite {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn serves_files_with_content_type() {
        let site = TempSite::new();
        let store = StaticAssets::new(&site.config(false));

        let page = store.fetch(get("/index.html")).await;
        assert_eq!(page.status(), StatusCode::OK);
        assert!(page.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));

        let script = store.fetch(get("/assets/app.js")).await;
        assert_eq!(script.status(), StatusCode::OK);
        assert!(script.headers()[header::CONTENT_TYPE].to_str().unwrap().contains("javascript"));
        let body = axum::body::to_bytes(script.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"console.log('app')");
    }

    #[tokio::test]
    async fn root_resolves_to_index() {
        let site = TempSite::new();
        let store = StaticAssets::new(&site.config(false));

        let page = store.fetch(get("/")).await;
        assert_eq!(page.status(), StatusCode::OK);
        let body = axum::body::to_bytes(page.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<!doctype html><p>home</p>");
    }

    #[tokio::test]
    async fn missing_file_is_plain_404() {
        let site = TempSite::new();
        let store = StaticAssets::new(&site.config(false));

        let response = store.fetch(get("/nope.png")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_file_uses_not_found_page() {
        let site = TempSite::new();
        let store = StaticAssets::new(&site.config(true));

        let response = store.fetch(get("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>nope</p>");
    }
}
