//! Records returned by the metadata service.
//!
//! Only the fields read by the aggregation pipeline are modelled. Unknown
//! fields are ignored and absent optional fields decode to `None` or empty.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Identifier used by every service entity.
pub type Id = i64;

/// A game title with references to its related records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Service identifier.
    pub id: Id,
    /// Game title.
    #[serde(default)]
    pub name: String,
    /// Platform references, in service order.
    #[serde(default)]
    pub platforms: Vec<Id>,
    /// Genre references, in service order.
    #[serde(default)]
    pub genres: Vec<Id>,
    /// Release-date references, in service order.
    #[serde(default)]
    pub release_dates: Vec<Id>,
    /// Aggregated critic rating.
    #[serde(default)]
    pub aggregated_rating: Option<f64>,
    /// Canonical page on the service website.
    #[serde(default)]
    pub url: Option<String>,
    /// Long-form story description.
    #[serde(default)]
    pub storyline: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Cover reference.
    #[serde(default)]
    pub cover: Option<Id>,
    /// Screenshot references.
    #[serde(default)]
    pub screenshots: Vec<Id>,
}

/// Hardware or software target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Service identifier.
    pub id: Id,
    /// Display name, e.g. `PlayStation 4`.
    #[serde(default)]
    pub name: String,
}

/// Game genre.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    /// Service identifier.
    pub id: Id,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A (platform, region, date) tuple attached to a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDate {
    /// Service identifier.
    pub id: Id,
    /// Date as rendered by the service, e.g. `Nov 15, 2019`.
    #[serde(default)]
    pub human: Option<String>,
    /// Platform the release applies to.
    #[serde(default)]
    pub platform: Option<Id>,
    /// Numeric region code, see [`Region`].
    #[serde(default)]
    pub region: Option<i64>,
    /// Release date as a unix timestamp.
    #[serde(default)]
    pub date: Option<i64>,
}

impl ReleaseDate {
    /// Display name of the release region.
    pub fn region_name(&self) -> &'static str {
        self.region
            .and_then(Region::from_code)
            .map(Region::display_name)
            .unwrap_or("Unknown")
    }

    /// Human readable date, falling back to the timestamp when the service
    /// left `human` empty.
    pub fn human_date(&self) -> String {
        if let Some(human) = self.human.as_deref().filter(|value| !value.is_empty()) {
            return human.to_string();
        }
        self.date
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
            .map(|date| date.format("%b %d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Cover art reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    /// Service identifier.
    pub id: Id,
    /// Image identifier used to build image URLs.
    #[serde(default)]
    pub image_id: String,
}

/// Screenshot reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Service identifier.
    pub id: Id,
    /// Image identifier used to build image URLs.
    #[serde(default)]
    pub image_id: String,
}

/// Release regions known to the service.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Europe,
    NorthAmerica,
    Australia,
    NewZealand,
    Japan,
    China,
    Asia,
    Worldwide,
    Korea,
    Brazil,
}

impl Region {
    /// Map the service's numeric code to a region.
    pub fn from_code(code: i64) -> Option<Self> {
        let region = match code {
            1 => Region::Europe,
            2 => Region::NorthAmerica,
            3 => Region::Australia,
            4 => Region::NewZealand,
            5 => Region::Japan,
            6 => Region::China,
            7 => Region::Asia,
            8 => Region::Worldwide,
            9 => Region::Korea,
            10 => Region::Brazil,
            _ => return None,
        };
        Some(region)
    }

    /// Name written to descriptions.
    pub fn display_name(self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Australia => "Australia",
            Region::NewZealand => "New Zealand",
            Region::Japan => "Japan",
            Region::China => "China",
            Region::Asia => "Asia",
            Region::Worldwide => "Worldwide",
            Region::Korea => "Korea",
            Region::Brazil => "Brazil",
        }
    }
}
