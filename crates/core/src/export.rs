//! Writes pairings to disk as result directories.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    aggregate::{Aggregator, Pairing},
    download::AssetSink,
    igdb::MetadataSource,
};

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Games returned by the search.
    pub games_found: usize,
    /// Result directories written, in order.
    pub directories: Vec<PathBuf>,
}

/// Materializes pairings below an output root.
pub struct Exporter<S: AssetSink> {
    output_root: PathBuf,
    sink: S,
}

impl<S: AssetSink> Exporter<S> {
    /// Exporter writing below `output_root`, fetching assets through `sink`.
    pub fn new(output_root: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            output_root: output_root.into(),
            sink,
        }
    }

    /// Directory result directories are created in.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Create the pairing's directory, write its description, then fetch the
    /// cover and screenshots. An existing directory is an error.
    pub fn export(&self, pairing: &Pairing) -> Result<PathBuf> {
        let directory = self.output_root.join(&pairing.dir_name);
        fs::create_dir(&directory)
            .with_context(|| format!("failed to create {}", directory.display()))?;

        let path = pairing.description.write_to(&directory)?;
        info!(path = %path.display(), "wrote description");

        if let Some(cover) = &pairing.cover {
            self.sink.fetch(&directory, cover)?;
        }
        for screenshot in &pairing.screenshots {
            self.sink.fetch(&directory, screenshot)?;
        }

        Ok(directory)
    }
}

/// Search for `query` and export every qualifying pairing as it is found.
///
/// Stops at the first error; directories written before it stay on disk.
pub fn run<M, S>(source: &M, exporter: &Exporter<S>, query: &str) -> Result<RunSummary>
where
    M: MetadataSource + ?Sized,
    S: AssetSink,
{
    let mut directories = Vec::new();
    let games_found = Aggregator::new(source).for_each_pairing(query, |pairing| {
        directories.push(exporter.export(&pairing)?);
        Ok(())
    })?;

    info!(
        games = games_found,
        written = directories.len(),
        "run complete"
    );
    Ok(RunSummary {
        games_found,
        directories,
    })
}
