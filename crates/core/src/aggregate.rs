//! Walks search results and assembles one description per qualifying
//! (game, platform) pairing.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    description::{Description, Release},
    download::AssetRequest,
    filter::is_target_platform,
    igdb::MetadataSource,
    models::{Game, Platform},
};

/// Hands out result directory numbers for one run, starting at 1.
#[derive(Debug, Default)]
pub struct OrderCounter {
    issued: usize,
}

impl OrderCounter {
    /// Counter that has issued nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next order number.
    pub fn next_order(&mut self) -> usize {
        self.issued += 1;
        self.issued
    }

    /// Number of orders handed out so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Everything needed to materialize one qualifying pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairing {
    /// Position in discovery order, starting at 1 for the whole run.
    pub order: usize,
    /// Result directory name, `{query}_{order}`.
    pub dir_name: String,
    /// Assembled description.
    pub description: Description,
    /// Cover download, absent when the game has no cover.
    pub cover: Option<AssetRequest>,
    /// Screenshot downloads, indexed from 0 within the game.
    pub screenshots: Vec<AssetRequest>,
}

/// Builds descriptions from a [`MetadataSource`].
pub struct Aggregator<'a, M: MetadataSource + ?Sized> {
    source: &'a M,
}

impl<'a, M: MetadataSource + ?Sized> Aggregator<'a, M> {
    /// Aggregator reading from `source`.
    pub fn new(source: &'a M) -> Self {
        Self { source }
    }

    /// Collect every qualifying pairing for `query`.
    pub fn build_descriptions(&self, query: &str) -> Result<Vec<Pairing>> {
        let mut pairings = Vec::new();
        self.for_each_pairing(query, |pairing| {
            pairings.push(pairing);
            Ok(())
        })?;
        Ok(pairings)
    }

    /// Search for `query` and hand each qualifying pairing to `visit` as soon
    /// as it is assembled. Returns the number of games the search found.
    ///
    /// The first failing lookup or visit stops the walk. Every lookup for a
    /// pairing, cover and screenshots included, runs before `visit` sees it,
    /// so a lookup failure leaves no result directory for that pairing.
    pub fn for_each_pairing<F>(&self, query: &str, mut visit: F) -> Result<usize>
    where
        F: FnMut(Pairing) -> Result<()>,
    {
        let games = self
            .source
            .search_games(query)
            .with_context(|| format!("search for {query:?} failed"))?;
        info!(query, count = games.len(), "found games");

        let mut counter = OrderCounter::new();
        for game in &games {
            for &platform_id in &game.platforms {
                let platform = self
                    .source
                    .platform(platform_id)
                    .with_context(|| format!("failed to resolve platform {platform_id}"))?;
                if !is_target_platform(platform.id) {
                    continue;
                }

                let order = counter.next_order();
                info!(order, game = %game.name, platform = %platform.name, "qualifying pairing");
                let pairing = self.describe(query, order, game, &platform)?;
                visit(pairing)?;
            }
        }

        Ok(games.len())
    }

    fn describe(
        &self,
        query: &str,
        order: usize,
        game: &Game,
        platform: &Platform,
    ) -> Result<Pairing> {
        let mut genre = Vec::with_capacity(game.genres.len());
        for &genre_id in &game.genres {
            let record = self
                .source
                .genre(genre_id)
                .with_context(|| format!("failed to resolve genre {genre_id}"))?;
            debug!(genre = %record.name, "genre");
            genre.push(record.name);
        }

        let description = Description {
            name: game.name.clone(),
            genre,
            platform: platform.name.clone(),
            rating: game.aggregated_rating.unwrap_or_default(),
            igdb_url: game.url.clone().unwrap_or_default(),
            story_line: game.storyline.clone().unwrap_or_default(),
            summary: game.summary.clone().unwrap_or_default(),
            release: self.releases(game)?,
        };

        let cover = match game.cover {
            Some(cover_id) => {
                let cover = self
                    .source
                    .cover(cover_id)
                    .with_context(|| format!("failed to resolve cover {cover_id}"))?;
                Some(AssetRequest::cover(
                    self.source.image_url(&cover.image_id),
                    game.name.clone(),
                ))
            }
            None => {
                warn!(game = %game.name, "game has no cover");
                None
            }
        };

        Ok(Pairing {
            order,
            dir_name: format!("{query}_{order}"),
            description,
            cover,
            screenshots: self.screenshots(game)?,
        })
    }

    fn releases(&self, game: &Game) -> Result<Vec<Release>> {
        let mut releases = Vec::new();
        for &release_id in &game.release_dates {
            let record = self
                .source
                .release_date(release_id)
                .with_context(|| format!("failed to resolve release date {release_id}"))?;
            // The release carries its own platform, independent of the pairing's.
            if !record.platform.is_some_and(is_target_platform) {
                continue;
            }

            let release = Release {
                region: record.region_name().to_string(),
                release_date: record.human_date(),
            };
            debug!(region = %release.region, date = %release.release_date, "release");
            releases.push(release);
        }
        Ok(releases)
    }

    fn screenshots(&self, game: &Game) -> Result<Vec<AssetRequest>> {
        if game.screenshots.is_empty() {
            return Ok(Vec::new());
        }

        let listed = match self.source.screenshots(&game.screenshots) {
            Ok(listed) => listed,
            Err(err) => {
                warn!(game = %game.name, "screenshot listing failed, skipping screenshots: {err}");
                return Ok(Vec::new());
            }
        };

        listed
            .iter()
            .enumerate()
            .map(|(index, listed)| {
                let screenshot = self
                    .source
                    .screenshot(listed.id)
                    .with_context(|| format!("failed to resolve screenshot {}", listed.id))?;
                Ok(AssetRequest::screenshot(
                    self.source.image_url(&screenshot.image_id),
                    game.name.clone(),
                    index,
                ))
            })
            .collect()
    }
}
