//! Path-addressed document endpoints.
//!
//! Paths are caller-supplied and used verbatim against the remote store;
//! name sanitization applies only to the track endpoints.

pub mod get;
pub mod put;

pub use get::{GetDataRequest, GetDataResponse};
pub use put::{PutDataRequest, PutDataResponse};
