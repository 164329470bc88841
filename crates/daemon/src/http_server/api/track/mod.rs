//! Name-addressed track record endpoints.
//!
//! Display names are sanitized into `records/<token>.json` paths; any
//! spelling that sanitizes to the same token addresses the same record.

pub mod get;
pub mod save;

pub use get::{GetTrackRequest, GetTrackResponse};
pub use save::{SaveTrackRequest, SaveTrackResponse};
