//! HTTP client for the bulletin board's status endpoints.
//!
//! One GET per refresh cycle, no retries: the fixed-interval refresh loop
//! is the only retry mechanism the console has.

pub mod error;
pub mod status_client;

pub use error::FetchError;
pub use status_client::StatusClient;
