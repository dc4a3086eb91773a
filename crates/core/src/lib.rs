#![warn(clippy::all, missing_docs)]

//! Core logic for igdb-fetch.
//!
//! This crate hosts the metadata service client, the platform filter, the
//! description aggregator, and the writers that turn each qualifying
//! (game, platform) pairing into a directory of files.

pub mod aggregate;
pub mod config;
pub mod description;
pub mod download;
pub mod export;
pub mod filter;
pub mod igdb;
pub mod models;

#[cfg(test)]
mod testing;

pub use aggregate::{Aggregator, OrderCounter, Pairing};
pub use config::AppConfig;
pub use description::{Description, Release};
pub use download::{AssetRequest, AssetSink, HttpDownloader};
pub use export::{run, Exporter, RunSummary};
pub use filter::is_target_platform;
pub use igdb::{Credentials, IgdbClient, IgdbError, MetadataSource};
