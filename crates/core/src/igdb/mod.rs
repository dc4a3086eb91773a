//! Metadata service access.

/// Blocking HTTP client for the IGDB v4 API.
pub mod client;
mod query;

pub use client::{Credentials, IgdbClient};
pub use query::Query;

use thiserror::Error;

use crate::models::{Cover, Game, Genre, Id, Platform, ReleaseDate, Screenshot};

/// Failure of a single metadata lookup.
#[derive(Debug, Error)]
pub enum IgdbError {
    /// The request never produced a response.
    #[error("request to the metadata service failed")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        /// Endpoint that was queried.
        endpoint: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, usually a JSON error description.
        body: String,
    },
    /// The response body did not match the expected records.
    #[error("failed to decode {endpoint} response")]
    Decode {
        /// Endpoint that was queried.
        endpoint: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A lookup by id returned no record.
    #[error("{endpoint} record {id} not found")]
    NotFound {
        /// Endpoint that was queried.
        endpoint: &'static str,
        /// Requested identifier.
        id: Id,
    },
}

/// Operations the aggregation pipeline needs from the metadata service.
///
/// Every call is synchronous and independently fallible.
pub trait MetadataSource {
    /// Games whose name matches `name`. Matching is up to the service.
    fn search_games(&self, name: &str) -> Result<Vec<Game>, IgdbError>;

    /// Platform record with its display name.
    fn platform(&self, id: Id) -> Result<Platform, IgdbError>;

    /// Genre record with its display name.
    fn genre(&self, id: Id) -> Result<Genre, IgdbError>;

    /// Release-date record with date, platform and region in a single lookup.
    fn release_date(&self, id: Id) -> Result<ReleaseDate, IgdbError>;

    /// Cover record with its image identifier.
    fn cover(&self, id: Id) -> Result<Cover, IgdbError>;

    /// All screenshots for `ids` in one round trip.
    fn screenshots(&self, ids: &[Id]) -> Result<Vec<Screenshot>, IgdbError>;

    /// Single screenshot record with its image identifier.
    fn screenshot(&self, id: Id) -> Result<Screenshot, IgdbError>;

    /// High resolution URL for an image identifier.
    fn image_url(&self, image_id: &str) -> String;
}
