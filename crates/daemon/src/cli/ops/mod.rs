pub mod get;
pub mod health;
pub mod ls;
pub mod put;
pub mod serve;
pub mod track;
pub mod version;

pub use get::Get;
pub use health::Health;
pub use ls::Ls;
pub use put::Put;
pub use serve::Serve;
pub use track::Track;
pub use version::Version;
