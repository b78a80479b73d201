//! NASA APOD API client
//!
//! This module provides functionality to fetch Astronomy Picture of the Day
//! metadata from the NASA API and parse it into our record structure.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{ApodRecord, MediaType, NO_COPYRIGHT};

/// Base URL for the NASA APOD API
const APOD_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Errors that can occur when fetching APOD data
///
/// Each failure kind is tagged so callers can tell a transport problem from
/// "the service has nothing for this date", even though the viewer surfaces
/// them all as one generic message.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body was not the JSON shape we expect
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response decoded but a required field was absent
    #[error("missing expected field in response: {0}")]
    MissingField(&'static str),
}

/// Raw APOD API response before required-field checks and defaulting
#[derive(Debug, Deserialize)]
struct ApodResponse {
    date: Option<String>,
    title: Option<String>,
    explanation: Option<String>,
    copyright: Option<String>,
    media_type: Option<MediaType>,
    url: Option<String>,
    hdurl: Option<String>,
}

/// Client for fetching APOD metadata from the NASA API
#[derive(Debug, Clone)]
pub struct ApodClient {
    /// HTTP client for making requests
    client: Client,
    /// NASA API key sent with every request
    api_key: String,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl ApodClient {
    /// Creates a new ApodClient with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: APOD_BASE_URL.to_string(),
        }
    }

    /// Creates a new ApodClient with a custom base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Builds the request URL for a given date string
    fn request_url(&self, date: &str) -> String {
        format!("{}?date={}&api_key={}", self.base_url, date, self.api_key)
    }

    /// Fetches the APOD entry for the given date
    ///
    /// # Arguments
    /// * `date` - Date string in `YYYY-MM-DD` format. The value is passed to
    ///   the service as-is; no local range validation is performed, so an
    ///   out-of-range or impossible date simply fails with a status error.
    ///
    /// # Returns
    /// * `Ok(ApodRecord)` - The entry, with `copyright`/`hdurl` defaulted when absent
    /// * `Err(FetchError)` - If the request, status, or body parsing fails
    pub async fn fetch(&self, date: &str) -> Result<ApodRecord, FetchError> {
        let url = self.request_url(date);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body = %body, requested = date, "raw APOD response");

        if !status.is_success() {
            return Err(FetchError::Status { status, body });
        }

        let raw: ApodResponse = serde_json::from_str(&body)?;
        parse_response(raw)
    }
}

/// Checks required fields and applies defaults to a raw API response
fn parse_response(raw: ApodResponse) -> Result<ApodRecord, FetchError> {
    let date_str = raw.date.ok_or(FetchError::MissingField("date"))?;
    let date = chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| FetchError::MissingField("date"))?;

    let title = raw.title.ok_or(FetchError::MissingField("title"))?;
    let explanation = raw
        .explanation
        .ok_or(FetchError::MissingField("explanation"))?;
    let media_type = raw
        .media_type
        .ok_or(FetchError::MissingField("media_type"))?;
    let url = raw.url.ok_or(FetchError::MissingField("url"))?;

    Ok(ApodRecord {
        date,
        title,
        explanation,
        copyright: raw.copyright.unwrap_or_else(|| NO_COPYRIGHT.to_string()),
        media_type,
        url,
        hdurl: raw.hdurl.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn full_response_json() -> &'static str {
        r#"{
            "date": "2024-01-01",
            "title": "The Horsehead Nebula",
            "explanation": "A dark nebula in Orion.",
            "copyright": "Jane Doe",
            "media_type": "image",
            "url": "https://apod.nasa.gov/image/2401/horsehead.jpg",
            "hdurl": "https://apod.nasa.gov/image/2401/horsehead_big.jpg",
            "service_version": "v1"
        }"#
    }

    #[test]
    fn test_parse_full_response() {
        let raw: ApodResponse = serde_json::from_str(full_response_json()).unwrap();
        let record = parse_response(raw).unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.title, "The Horsehead Nebula");
        assert_eq!(record.explanation, "A dark nebula in Orion.");
        assert_eq!(record.copyright, "Jane Doe");
        assert_eq!(record.media_type, MediaType::Image);
        assert_eq!(record.url, "https://apod.nasa.gov/image/2401/horsehead.jpg");
        assert_eq!(
            record.hdurl,
            "https://apod.nasa.gov/image/2401/horsehead_big.jpg"
        );
    }

    #[test]
    fn test_parse_defaults_missing_copyright_and_hdurl() {
        let raw: ApodResponse = serde_json::from_str(
            r#"{
                "date": "2024-01-02",
                "title": "T",
                "explanation": "E",
                "media_type": "image",
                "url": "http://x/1"
            }"#,
        )
        .unwrap();
        let record = parse_response(raw).unwrap();

        assert_eq!(record.copyright, NO_COPYRIGHT);
        assert_eq!(record.hdurl, "");
    }

    #[test]
    fn test_parse_missing_date_is_an_error() {
        let raw: ApodResponse = serde_json::from_str(
            r#"{
                "title": "T",
                "explanation": "E",
                "media_type": "image",
                "url": "http://x/1"
            }"#,
        )
        .unwrap();

        let err = parse_response(raw).unwrap_err();
        assert!(matches!(err, FetchError::MissingField("date")));
    }

    #[test]
    fn test_parse_unparseable_date_is_an_error() {
        let raw: ApodResponse = serde_json::from_str(
            r#"{
                "date": "January 1st",
                "title": "T",
                "explanation": "E",
                "media_type": "image",
                "url": "http://x/1"
            }"#,
        )
        .unwrap();

        let err = parse_response(raw).unwrap_err();
        assert!(matches!(err, FetchError::MissingField("date")));
    }

    #[test]
    fn test_parse_missing_required_fields() {
        let cases = [
            (r#"{"date":"2024-01-01","explanation":"E","media_type":"image","url":"u"}"#, "title"),
            (r#"{"date":"2024-01-01","title":"T","media_type":"image","url":"u"}"#, "explanation"),
            (r#"{"date":"2024-01-01","title":"T","explanation":"E","url":"u"}"#, "media_type"),
            (r#"{"date":"2024-01-01","title":"T","explanation":"E","media_type":"image"}"#, "url"),
        ];

        for (json, field) in cases {
            let raw: ApodResponse = serde_json::from_str(json).unwrap();
            match parse_response(raw) {
                Err(FetchError::MissingField(name)) => assert_eq!(name, field),
                other => panic!("Expected MissingField({}), got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_parse_video_entry() {
        let raw: ApodResponse = serde_json::from_str(
            r#"{
                "date": "2024-03-05",
                "title": "Solar Flare",
                "explanation": "E",
                "media_type": "video",
                "url": "https://www.youtube.com/embed/abc"
            }"#,
        )
        .unwrap();
        let record = parse_response(raw).unwrap();

        assert_eq!(record.media_type, MediaType::Video);
    }

    #[test]
    fn test_request_url_contains_date_and_key() {
        let client = ApodClient::new("DEMO_KEY");
        let url = client.request_url("2024-01-01");

        assert_eq!(
            url,
            "https://api.nasa.gov/planetary/apod?date=2024-01-01&api_key=DEMO_KEY"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = ApodClient::with_base_url("k", "http://localhost:9999/apod".to_string());
        let url = client.request_url("2024-01-01");

        assert!(url.starts_with("http://localhost:9999/apod?"));
    }
}
