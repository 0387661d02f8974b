use serde::{Deserialize, Serialize};

/// An image attached to a trip, optionally to one of its destinations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    pub trip_id: String,
    pub destination_id: Option<String>,
    pub image_url: String,
    pub caption: Option<String>,
}

impl Photo {
    pub fn caption_text(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}

/// Metadata registered with the backend after the binary upload.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PhotoDraft {
    pub image_url: String,
    pub caption: Option<String>,
    pub destination_id: Option<String>,
}
