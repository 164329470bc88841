//! Typed client for the daemon API, shared by the CLI and tests.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// A request type that knows how to call its own endpoint.
pub trait ApiRequest: Serialize {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder;
}
