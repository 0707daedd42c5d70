//! Flight commentary from a generative language model.
//!
//! Thin client over the collaborator's HTTP API: prompt in, one short
//! status sentence out. The model is a black box, and every failure mode
//! (transport, status, response shape) collapses to a fixed fallback
//! sentence so the dashboard never renders an error in place of text.

use mission::{MissionPhase, TelemetrySample};
use serde::Deserialize;
use thiserror::Error;

/// Shown whenever the collaborator cannot produce text.
pub const FALLBACK_BRIEFING: &str =
    "All systems nominal. The crew continues to monitor the mission timeline.";

/// A failed briefing fetch. Callers on the dashboard path use
/// [`BriefingClient::fetch_or_fallback`] and never see this.
#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("briefing request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("briefing response carried no candidate text")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Client for the text-briefing collaborator.
#[derive(Debug, Clone)]
pub struct BriefingClient {
    endpoint: String,
    api_key: Option<String>,
}

impl BriefingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Attach an API key, passed as the `key` query parameter.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn request_url(&self) -> String {
        match &self.api_key {
            Some(key) => format!("{}?key={key}", self.endpoint),
            None => self.endpoint.clone(),
        }
    }

    fn prompt(phase: MissionPhase, sample: &TelemetrySample) -> String {
        format!(
            "You are the commentary system of a crewed lunar mission dashboard. \
             Mission phase: {phase}. Altitude {altitude:.1} km, velocity \
             {velocity:.0} km/h, fuel {fuel:.0}%. Write one short, calm status \
             sentence for the public dashboard.",
            altitude = sample.altitude_km,
            velocity = sample.velocity_kmh,
            fuel = sample.fuel_fraction,
        )
    }

    /// Fetch one briefing sentence. Blocking; async callers go through
    /// [`fetch_or_fallback`](Self::fetch_or_fallback) which wraps this in
    /// `spawn_blocking`.
    pub fn fetch(
        &self,
        phase: MissionPhase,
        sample: &TelemetrySample,
    ) -> Result<String, BriefingError> {
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": Self::prompt(phase, sample) }]
            }]
        });

        let response: GenerateResponse = ureq::post(&self.request_url())
            .send_json(body)?
            .body_mut()
            .read_json()?;

        let text = response
            .candidates
            .into_iter()
            .flat_map(|candidate| candidate.content.parts)
            .map(|part| part.text)
            .find(|text| !text.trim().is_empty())
            .ok_or(BriefingError::EmptyResponse)?;

        Ok(text.trim().to_string())
    }

    /// Fetch a briefing, substituting the fixed fallback sentence on any
    /// failure. Runs the blocking fetch off the async runtime so
    /// collaborator latency never touches the clock cadence.
    pub async fn fetch_or_fallback(&self, phase: MissionPhase, sample: TelemetrySample) -> String {
        let client = self.clone();
        let result =
            tokio::task::spawn_blocking(move || client.fetch(phase, &sample)).await;

        match result {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                tracing::warn!("briefing fetch failed: {err}");
                FALLBACK_BRIEFING.to_string()
            }
            Err(err) => {
                tracing::warn!("briefing task failed: {err}");
                FALLBACK_BRIEFING.to_string()
            }
        }
    }
}
