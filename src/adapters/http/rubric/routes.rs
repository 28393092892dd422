//! Route configuration for draft rubric endpoints.

use axum::routing::{delete, get};
use axum::Router;

use super::handlers::{get_track_rubric, remove_track_config, upsert_track_config};
use crate::adapters::http::AppState;

pub fn rubric_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/rubric/tracks/:track_id",
            get(get_track_rubric).put(upsert_track_config),
        )
        .route(
            "/api/rubric/tracks/:track_id/criteria/:criterion_id",
            delete(remove_track_config),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::foundation::Timestamp;
    use crate::ports::CycleRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: InMemoryStore) -> Router {
        rubric_routes().with_state(AppState::in_memory(store, Arc::new(FixedClock::new(Timestamp::now()))))
    }

    fn put(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn upsert_then_read_track_rubric() {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let pillar = store.add_pillar("Delivery").await;
        let criterion = store.add_criterion(pillar.id, "Ownership").await;
        let uri = format!("/api/rubric/tracks/{}", track.id);

        let response = app(store.clone())
            .oneshot(put(
                &uri,
                json!({"pillar_id": pillar.id, "criterion_id": criterion.id, "weight": 20.0, "is_active": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app(store)
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["pillars"][0]["criteria"][0]["weight"], 20.0);
    }

    #[tokio::test]
    async fn draft_is_locked_while_a_cycle_is_active() {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let pillar = store.add_pillar("Delivery").await;
        let now = Timestamp::now();
        let window = CycleWindow::new(now.minus_days(1), now.plus_days(1)).unwrap();
        store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();

        let response = app(store)
            .oneshot(put(
                &format!("/api/rubric/tracks/{}", track.id),
                json!({"pillar_id": pillar.id, "is_active": false}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn removing_a_missing_row_is_404() {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;

        let response = app(store)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/rubric/tracks/{}/criteria/5", track.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
