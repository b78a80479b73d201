//! Core data models for the APOD viewer
//!
//! This module contains the record type for a single day's Astronomy Picture
//! of the Day entry, shared between the fetcher, the history store, and the UI.

pub mod apod;

pub use apod::{ApodClient, FetchError};

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder used when the API response carries no copyright attribution
pub const NO_COPYRIGHT: &str = "No copyright info";

/// One day's APOD metadata entry
///
/// Field order matters: it is the column order of the persisted CSV history
/// file (`date,title,explanation,copyright,media_type,url,hdurl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodRecord {
    /// Calendar date of the entry, the unique key within the history file
    pub date: NaiveDate,
    /// Display title
    pub title: String,
    /// Free-text description of the picture
    pub explanation: String,
    /// Copyright attribution, [`NO_COPYRIGHT`] when the API omits it
    pub copyright: String,
    /// Kind of media the entry points at
    pub media_type: MediaType,
    /// Standard-resolution media URL
    pub url: String,
    /// High-resolution media URL, empty when the API omits it
    pub hdurl: String,
}

/// Kind of media an APOD entry points at
///
/// The feed occasionally serves entries that are neither images nor videos
/// (interactive pages, for example); those map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
            MediaType::Other => write!(f, "other"),
        }
    }
}

impl ApodRecord {
    /// Returns the high-resolution URL if present, falling back to the
    /// standard-resolution one
    pub fn best_url(&self) -> &str {
        if self.hdurl.is_empty() {
            &self.url
        } else {
            &self.hdurl
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ApodRecord {
        ApodRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            title: "Galaxy Wars".to_string(),
            explanation: "Two galaxies collide.".to_string(),
            copyright: "Jane Doe".to_string(),
            media_type: MediaType::Image,
            url: "https://apod.nasa.gov/image/2401/small.jpg".to_string(),
            hdurl: "https://apod.nasa.gov/image/2401/big.jpg".to_string(),
        }
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = sample_record();

        let json = serde_json::to_string(&record).expect("Failed to serialize ApodRecord");
        let deserialized: ApodRecord =
            serde_json::from_str(&json).expect("Failed to deserialize ApodRecord");

        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_media_type_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&MediaType::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&MediaType::Video).unwrap(), "\"video\"");
        assert_eq!(serde_json::to_string(&MediaType::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_media_type_unknown_string_maps_to_other() {
        let parsed: MediaType = serde_json::from_str("\"interactive\"").unwrap();
        assert_eq!(parsed, MediaType::Other);
    }

    #[test]
    fn test_media_type_display() {
        assert_eq!(MediaType::Image.to_string(), "image");
        assert_eq!(MediaType::Video.to_string(), "video");
        assert_eq!(MediaType::Other.to_string(), "other");
    }

    #[test]
    fn test_best_url_prefers_hd() {
        let record = sample_record();
        assert_eq!(record.best_url(), "https://apod.nasa.gov/image/2401/big.jpg");
    }

    #[test]
    fn test_best_url_falls_back_to_standard() {
        let mut record = sample_record();
        record.hdurl = String::new();
        assert_eq!(record.best_url(), "https://apod.nasa.gov/image/2401/small.jpg");
    }
}
