//! Serving layer and collaborator boundary for the mission dashboard.
//!
//! The derivation engine in the `mission` crate produces all state; this
//! crate fans it out to dashboard consumers over HTTP/SSE and talks to the
//! external collaborators (briefing text, news, video feed remote control).
//! Collaborator failures never reach the clock: every one collapses to a
//! fixed fallback value at this boundary.

pub mod briefing;
pub mod news;
pub mod server;
pub mod video;
