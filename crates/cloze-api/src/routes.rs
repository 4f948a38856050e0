//! Router construction.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Recorded audio uploads top out well under this.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::exercise))
        .route("/transcribe", post(handlers::transcribe))
        .route("/judge", post(handlers::judge_answer))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use cloze_annotate::MockAnnotator;
    use cloze_core::config::ClozeConfig;
    use cloze_speech::MockSpeechToText;

    use super::*;

    fn router() -> Router {
        let state = AppState::new(
            ClozeConfig::default(),
            Arc::new(MockAnnotator::new()),
            Arc::new(MockSpeechToText::new()),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let resp = router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let resp = router()
            .oneshot(Request::get("/transcribe").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
