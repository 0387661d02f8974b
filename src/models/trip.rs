use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

/// Top-level planning entity owned by one principal.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    // The backend sends "" for trips without a cover image.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Trip {
    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    pub fn location_text(&self) -> String {
        match (self.city.as_deref(), self.country.as_deref()) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(city), None) => city.to_string(),
            (None, Some(country)) => country.to_string(),
            (None, None) => String::new(),
        }
    }

    pub fn draft(&self) -> TripDraft {
        TripDraft {
            owner_id: self.owner_id.clone(),
            title: self.title.clone(),
            notes: self.notes.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            image_url: self.image_url.clone(),
        }
    }
}

/// Payload for trip create and update calls.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TripDraft {
    pub owner_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub image_url: Option<String>,
}
