use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Submitted venue fields, as produced by the form-binding layer. Call
/// [`VenueForm::validated`] before handing the form to a mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website_link: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

fn normalize_genres(genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .map(|g| g.trim().to_owned())
        .filter(|g| !g.is_empty())
        .collect()
}

fn require(missing: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        missing.push(field.to_owned());
    }
}

fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_owned())
}

impl VenueForm {
    /// Normalize the submitted fields and reject the form if any required
    /// field is empty. Every failing field is reported, not just the first.
    pub fn validated(mut self) -> Result<Self> {
        self.name = self.name.trim().to_owned();
        self.city = self.city.trim().to_owned();
        self.state = self.state.trim().to_owned();
        self.address = self.address.trim().to_owned();
        self.phone = self.phone.trim().to_owned();
        self.genres = normalize_genres(self.genres);

        let mut missing = Vec::new();
        require(&mut missing, "name", &self.name);
        require(&mut missing, "city", &self.city);
        require(&mut missing, "state", &self.state);
        require(&mut missing, "phone", &self.phone);
        if self.genres.is_empty() {
            missing.push("genres".to_owned());
        }

        if missing.is_empty() {
            Ok(self)
        } else {
            Err(Error::Validation(missing))
        }
    }

    pub fn genres_json(&self) -> String {
        encode_genres(&self.genres)
    }
}

impl ArtistForm {
    pub fn validated(mut self) -> Result<Self> {
        self.name = self.name.trim().to_owned();
        self.city = self.city.trim().to_owned();
        self.state = self.state.trim().to_owned();
        self.phone = self.phone.trim().to_owned();
        self.genres = normalize_genres(self.genres);

        let mut missing = Vec::new();
        require(&mut missing, "name", &self.name);
        require(&mut missing, "city", &self.city);
        require(&mut missing, "state", &self.state);
        require(&mut missing, "phone", &self.phone);
        if self.genres.is_empty() {
            missing.push("genres".to_owned());
        }

        if missing.is_empty() {
            Ok(self)
        } else {
            Err(Error::Validation(missing))
        }
    }

    pub fn genres_json(&self) -> String {
        encode_genres(&self.genres)
    }
}
