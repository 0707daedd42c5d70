//! HTTP/SSE serving layer for dashboard consumers.
//!
//! Handlers read derived state from the clock or forward to collaborator
//! clients; nothing here blocks a tick. The SSE endpoint adapts the
//! clock's broadcast channel into an event stream, skipping updates for
//! subscribers that fall behind rather than applying backpressure to the
//! producer.

use crate::briefing::BriefingClient;
use crate::news::{NewsClient, NewsItem};
use crate::video::{FeedCommand, FeedRemote};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::Stream;
use futures::StreamExt;
use mission::clock::MissionClock;
use mission::config::MissionConfig;
use mission::timeline::{MilestoneRecord, TIMELINE};
use mission::{MissionPhase, MissionState, TelemetrySample};
use serde::{Deserialize, Serialize};
use shared::config_storage::{ConfigStorage, StoredConfig};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio_stream::wrappers::BroadcastStream;

/// Shared state between the clock and the HTTP handlers.
pub struct AppState {
    pub clock: MissionClock,
    pub config: Mutex<MissionConfig>,
    pub storage: ConfigStorage,
    pub briefing: BriefingClient,
    pub news: NewsClient,
    pub feeds: FeedRemote,
}

/// Build the dashboard API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/telemetry", get(get_telemetry))
        .route("/api/timeline", get(get_timeline))
        .route("/api/config", get(get_config).put(put_config))
        .route("/api/events", get(get_events))
        .route("/api/briefing", get(get_briefing))
        .route("/api/news", get(get_news))
        .route("/api/feeds/:feed_id", post(post_feed_command))
        .with_state(state)
}

/// Bind and serve until the process is torn down.
pub async fn run(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("mission console listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<MissionState> {
    Json(state.clock.current_state())
}

async fn get_telemetry(State(state): State<Arc<AppState>>) -> Json<Vec<TelemetrySample>> {
    Json(state.clock.telemetry_history())
}

async fn get_timeline() -> Json<&'static [MilestoneRecord]> {
    Json(TIMELINE)
}

async fn get_config(State(state): State<Arc<AppState>>) -> Json<StoredConfig> {
    Json(state.config.lock().unwrap().to_stored())
}

/// Requested configuration update; both fields are required here, unlike
/// the persisted shape, because an update is an explicit user action.
#[derive(Debug, Deserialize)]
struct ConfigUpdate {
    #[serde(rename = "launchDate")]
    launch_date: String,
    #[serde(rename = "videoIds")]
    video_ids: Vec<String>,
}

async fn put_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<StoredConfig>, (StatusCode, String)> {
    let updated = MissionConfig::try_update(&update.launch_date, update.video_ids)
        .map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))?;

    state.clock.set_epoch(updated.launch_epoch);
    if let Err(err) = updated.save(&state.storage) {
        // The live update stands; only the persisted copy is stale.
        tracing::warn!("failed to persist config update: {err}");
    }
    *state.config.lock().unwrap() = updated.clone();

    Ok(Json(updated.to_stored()))
}

async fn get_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.clock.subscribe()).filter_map(|update| async move {
        match update {
            Ok(update) => match Event::default().json_data(&update) {
                Ok(event) => Some(Ok(event)),
                Err(err) => {
                    tracing::warn!("dropping unserializable clock update: {err}");
                    None
                }
            },
            // Lagged subscriber: skip to the present rather than stall.
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Serialize)]
struct BriefingResponse {
    phase: MissionPhase,
    text: String,
}

async fn get_briefing(State(state): State<Arc<AppState>>) -> Json<BriefingResponse> {
    let snapshot = state.clock.current_state();
    let sample = state
        .clock
        .latest_telemetry()
        .unwrap_or_else(|| state.clock.current_sample());

    let text = state.briefing.fetch_or_fallback(snapshot.phase, sample).await;
    Json(BriefingResponse {
        phase: snapshot.phase,
        text,
    })
}

async fn get_news(State(state): State<Arc<AppState>>) -> Json<Vec<NewsItem>> {
    Json(state.news.fetch_or_empty().await)
}

async fn post_feed_command(
    State(state): State<Arc<AppState>>,
    Path(feed_id): Path<String>,
    Json(command): Json<FeedCommand>,
) -> StatusCode {
    state.feeds.send(&feed_id, command);
    StatusCode::ACCEPTED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::briefing::FALLBACK_BRIEFING;
    use crate::video::AddressedCommand;
    use chrono::{TimeDelta, Utc};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn test_state() -> (
        TempDir,
        Arc<AppState>,
        mpsc::UnboundedReceiver<AddressedCommand>,
    ) {
        let dir = TempDir::new().expect("create temp dir");
        let storage = ConfigStorage::with_path(dir.path().to_path_buf());
        let config = MissionConfig::load(&storage);
        let clock = MissionClock::with_cadence(
            &config,
            Duration::from_millis(50),
            Duration::from_millis(500),
        );
        let (feeds, feed_rx) = FeedRemote::channel();

        let state = Arc::new(AppState {
            clock,
            config: Mutex::new(config),
            storage,
            // Unreachable collaborators: handlers must degrade, not error.
            briefing: BriefingClient::new("http://127.0.0.1:1/v1/generate"),
            news: NewsClient::disabled(),
            feeds,
        });
        (dir, state, feed_rx)
    }

    #[tokio::test]
    async fn test_get_state_matches_classifier() {
        let (_dir, state, _rx) = test_state();
        state
            .clock
            .set_epoch(Utc::now() - TimeDelta::seconds(200));

        let Json(snapshot) = get_state(State(state)).await;

        assert_eq!(snapshot.phase, MissionPhase::Ascent);
        assert!((snapshot.t - 200.0).abs() < 5.0);
        assert_eq!(snapshot.active_milestone.unwrap().label, "LAS Jettison");
    }

    #[tokio::test]
    async fn test_get_timeline_serves_every_row() {
        let Json(rows) = get_timeline().await;
        assert_eq!(rows.len(), TIMELINE.len());
        assert_eq!(rows[0].label, "Call to Stations");
    }

    #[tokio::test]
    async fn test_get_config_reports_current_values() {
        let (_dir, state, _rx) = test_state();

        let Json(stored) = get_config(State(state)).await;

        assert_eq!(
            stored.launch_date.as_deref(),
            Some("2026-02-07T02:41:00.000Z")
        );
        assert_eq!(stored.video_ids.map(|ids| ids.len()), Some(3));
    }

    #[tokio::test]
    async fn test_put_config_applies_and_persists() {
        let (_dir, state, _rx) = test_state();

        let update = ConfigUpdate {
            launch_date: "2026-09-01T12:00:00Z".to_string(),
            video_ids: vec!["new-primary".to_string()],
        };
        let result = put_config(State(state.clone()), Json(update)).await;
        assert!(result.is_ok());

        let expected_epoch = "2026-09-01T12:00:00Z"
            .parse::<chrono::DateTime<Utc>>()
            .unwrap();
        assert_eq!(state.clock.epoch(), expected_epoch);
        assert_eq!(state.config.lock().unwrap().primary_feed(), "new-primary");

        let persisted = state.storage.load().unwrap().unwrap();
        assert_eq!(persisted.video_ids, Some(vec!["new-primary".to_string()]));
    }

    #[tokio::test]
    async fn test_put_config_rejects_invalid_date() {
        let (_dir, state, _rx) = test_state();
        let epoch_before = state.clock.epoch();

        let update = ConfigUpdate {
            launch_date: "next tuesday".to_string(),
            video_ids: vec!["feed".to_string()],
        };
        let result = put_config(State(state.clone()), Json(update)).await;

        let (status, _) = result.expect_err("update must be rejected");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.clock.epoch(), epoch_before);
        assert!(state.storage.load().is_none(), "nothing may be persisted");
    }

    #[tokio::test]
    async fn test_put_config_rejects_empty_feed_list() {
        let (_dir, state, _rx) = test_state();

        let update = ConfigUpdate {
            launch_date: "2026-09-01T12:00:00Z".to_string(),
            video_ids: Vec::new(),
        };
        let result = put_config(State(state), Json(update)).await;

        let (status, message) = result.expect_err("update must be rejected");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("feed list"));
    }

    #[tokio::test]
    async fn test_feed_command_is_forwarded() {
        let (_dir, state, mut feed_rx) = test_state();

        let status = post_feed_command(
            State(state),
            Path("primary-feed".to_string()),
            Json(FeedCommand::Mute),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        let command = feed_rx.try_recv().unwrap();
        assert_eq!(command.feed_id, "primary-feed");
        assert_eq!(command.command, FeedCommand::Mute);
    }

    #[tokio::test]
    async fn test_briefing_degrades_to_fallback() {
        let (_dir, state, _rx) = test_state();

        let Json(response) = get_briefing(State(state)).await;
        assert_eq!(response.text, FALLBACK_BRIEFING);
    }

    #[tokio::test]
    async fn test_news_degrades_to_empty() {
        let (_dir, state, _rx) = test_state();

        let Json(items) = get_news(State(state)).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_router_builds() {
        let (_dir, state, _rx) = test_state();
        let _app = router(state);
    }
}
