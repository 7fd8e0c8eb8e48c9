//! Load Generator Client
//!
//! Drives the entry server with three concurrent loops: a producer that
//! creates random entries, a consumer that lists and deletes them, and a
//! reporter that logs how many deletions have succeeded.

mod generator;
mod http;
mod readiness;
mod workers;

pub use generator::{random_batch, random_text};
pub use http::EntryClient;
pub use readiness::{server_addr, wait_for_server};
pub use workers::{
    consumer_loop, drain_once, produce_batch, producer_loop, reporter_loop, run, DeletionCounter,
};

use thiserror::Error;

// == Client Error Enum ==
/// Errors that stop a load generator loop.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or an unexpected error status
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// `BASE_URL` could not be turned into a host and port
    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Convenience Result type for the client.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
