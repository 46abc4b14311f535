//! Brick - restaurant ordering assistant
//!
//! Routes each customer message to a dialogue-management service when it is
//! configured and healthy, and to a generative model otherwise, so every
//! turn gets a reply. Around that core sit a keyword and fuzzy-match entity
//! extractor, an expiring response cache, per-session history and a
//! durable conversation tracker.

pub mod agent;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod fallback;
pub mod health;
pub mod logging;
pub mod menu;
pub mod metrics;
pub mod nlp;
pub mod routing;
