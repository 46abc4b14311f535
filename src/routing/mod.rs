//! Message routing between the dialogue service and the generative fallback.
//!
//! Each turn follows a fixed sequence:
//!
//! 1. dialogue service not configured: fallback
//! 2. cached health verdict (re-probed once per interval) unhealthy: fallback
//! 3. call the dialogue service; non-empty replies are tagged `primary`
//! 4. empty, malformed or failed: fallback, tagged `fallback`
//!
//! The dialogue service is always awaited to completion before the fallback
//! starts; the two are never called concurrently for one turn.

mod orchestrator;
mod reply;

pub use orchestrator::{Orchestrator, PrimaryStatus, Turn, EVENT_LOG_LIMIT};
pub use reply::{FallbackReason, NormalizedReply, ReplyCustom, ReplySource, TROUBLE_CONNECTING};
