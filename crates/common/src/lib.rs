// Content synchronization core: remote store clients, the local mirror,
// and the read-modify-write engine that ties them together.
pub mod mirror;
pub mod remote;
pub mod sanitize;
pub mod sync;
pub mod version;

pub mod prelude;
