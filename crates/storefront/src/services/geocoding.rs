//! Address search against a Nominatim-compatible geocoder.
//!
//! Used when adding a saved location: the user types a partial address and
//! picks one of the returned places, which carries a place id and
//! coordinates.

use echoeats_core::location::Coordinates;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::GeocoderConfig;

/// Maximum number of places returned per search.
const RESULT_LIMIT: u8 = 5;

/// Errors that can occur when talking to the geocoder.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoder returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A returned place could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A candidate place for an address search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    /// Short name, e.g. the building or street.
    pub name: String,
    /// Full formatted address.
    pub address: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPlaceId {
    Number(u64),
    Text(String),
}

/// One entry of a Nominatim `jsonv2` response.
#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: RawPlaceId,
    #[serde(default)]
    name: Option<String>,
    display_name: String,
    lat: String,
    lon: String,
}

impl TryFrom<RawPlace> for PlaceSuggestion {
    type Error = GeocodingError;

    fn try_from(raw: RawPlace) -> Result<Self, Self::Error> {
        let parse = |value: &str, what: &str| {
            value
                .parse::<f64>()
                .map_err(|e| GeocodingError::Parse(format!("invalid {what} {value:?}: {e}")))
        };
        let coordinates = Coordinates {
            lat: parse(&raw.lat, "latitude")?,
            lng: parse(&raw.lon, "longitude")?,
        };
        let place_id = match raw.place_id {
            RawPlaceId::Number(n) => n.to_string(),
            RawPlaceId::Text(s) => s,
        };
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| raw.display_name.split(',').next().map(str::trim).map(String::from))
            .unwrap_or_default();

        Ok(Self {
            place_id,
            name,
            address: raw.display_name,
            coordinates,
        })
    }
}

/// HTTP client for the geocoder.
#[derive(Clone)]
pub struct GeocodingClient {
    client: reqwest::Client,
    url: Url,
}

impl GeocodingClient {
    /// Create a new geocoding client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodingError> {
        let mut headers = HeaderMap::new();
        // Nominatim's usage policy requires an identifying user agent
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| GeocodingError::Parse(format!("Invalid user agent: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Search for places matching a free-text address.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceSuggestion>, GeocodingError> {
        let response = self.client.get(self.search_url(query)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let places: Vec<RawPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        let suggestions = places
            .into_iter()
            .map(PlaceSuggestion::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = suggestions.len(), "Geocoder results");
        Ok(suggestions)
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", &RESULT_LIMIT.to_string());
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> GeocodingClient {
        GeocodingClient::new(&GeocoderConfig {
            url: Url::parse("https://geo.example/search").unwrap(),
            user_agent: "echoeats-test".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = client().search_url("5th Ave & 23rd");
        assert_eq!(url.host_str(), Some("geo.example"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "5th Ave & 23rd".to_string())));
        assert!(pairs.contains(&("format".to_string(), "jsonv2".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "5".to_string())));
    }

    #[test]
    fn test_parse_nominatim_place() {
        let raw: Vec<RawPlace> = serde_json::from_str(
            r#"[{
                "place_id": 307,
                "name": "",
                "display_name": "350 5th Ave, New York, NY 10118",
                "lat": "40.7484",
                "lon": "-73.9857"
            }, {
                "place_id": "abc",
                "name": "Flatiron Building",
                "display_name": "Flatiron Building, 175 5th Ave, New York",
                "lat": "40.7411",
                "lon": "-73.9897"
            }]"#,
        )
        .unwrap();
        let places: Vec<PlaceSuggestion> = raw
            .into_iter()
            .map(PlaceSuggestion::try_from)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(places[0].place_id, "307");
        assert_eq!(places[0].name, "350 5th Ave");
        assert!((places[0].coordinates.lng + 73.9857).abs() < 1e-9);
        assert_eq!(places[1].place_id, "abc");
        assert_eq!(places[1].name, "Flatiron Building");
    }

    #[test]
    fn test_bad_coordinates_are_rejected() {
        let raw: RawPlace = serde_json::from_str(
            r#"{"place_id": 1, "display_name": "x", "lat": "north", "lon": "0"}"#,
        )
        .unwrap();
        assert!(matches!(
            PlaceSuggestion::try_from(raw),
            Err(GeocodingError::Parse(_))
        ));
    }
}
