//! Service ads as returned by the marketplace API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image shown for ads that have none of their own.
pub const DEFAULT_AD_IMAGE: &str = "/images/placeholder-ad.png";

/// An image attached to an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdImage {
    /// Image id.
    #[serde(default)]
    pub id: String,
    /// Where the image is served from.
    pub url: String,
    /// File name.
    #[serde(default)]
    pub name: String,
}

impl AdImage {
    /// The placeholder given to listed ads that carry no images.
    #[must_use]
    pub fn placeholder(ad_id: &str) -> Self {
        Self::default_for(ad_id, "default-ad.png")
    }

    /// The image returned when an ad's image list is empty or unavailable.
    #[must_use]
    pub fn fallback(ad_id: &str) -> Self {
        Self::default_for(ad_id, "default.png")
    }

    fn default_for(ad_id: &str, name: &str) -> Self {
        Self {
            id: format!("default-img-{ad_id}"),
            url: DEFAULT_AD_IMAGE.to_string(),
            name: name.to_string(),
        }
    }
}

/// A service ad published by an expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    /// Ad id.
    pub id: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub descriptions: String,
    /// Whether the ad is listed.
    #[serde(default)]
    pub is_active: bool,
    /// Id of the expert who owns the ad.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Display name of the owning expert.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Category id.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Category name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Service id.
    #[serde(default)]
    pub service_id: Option<String>,
    /// Service name.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Attached images.
    #[serde(default)]
    pub images: Vec<AdImage>,
}

impl Ad {
    /// Gives an ad without images the placeholder image.
    #[must_use]
    pub fn with_placeholder_image(mut self) -> Self {
        if self.images.is_empty() {
            self.images.push(AdImage::placeholder(&self.id));
        }
        self
    }
}
