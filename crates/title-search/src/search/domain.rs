use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Postal address identifying the property under search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_number: Option<String>,
}

impl fmt::Display for PropertyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

/// Scope of records the backend should pull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    Full,
    Quick,
    LienOnly,
    EncumbranceOnly,
}

impl SearchType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Full, Self::Quick, Self::LienOnly, Self::EncumbranceOnly]
    }

    /// Wire form, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Quick => "quick",
            Self::LienOnly => "lien_only",
            Self::EncumbranceOnly => "encumbrance_only",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full Search",
            Self::Quick => "Quick Search",
            Self::LienOnly => "Lien Only",
            Self::EncumbranceOnly => "Encumbrance Only",
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "full" => Ok(Self::Full),
            "quick" => Ok(Self::Quick),
            "lien_only" => Ok(Self::LienOnly),
            "encumbrance_only" => Ok(Self::EncumbranceOnly),
            other => Err(format!(
                "'{other}' is not a search type (expected one of: full, quick, lien_only, encumbrance_only)"
            )),
        }
    }
}

/// Validated title search request, serialized as the POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub property_address: PropertyAddress,
    #[serde(default)]
    pub search_type: SearchType,
    #[serde(default)]
    pub include_historical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}

/// Server-side lifecycle of a search; searches complete asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl SearchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

/// Recorded instrument transferring ownership from grantor to grantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deed {
    pub deed_type: String,
    pub grantor: String,
    pub grantee: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub recording_date: DateTime<Utc>,
    pub document_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_page: Option<String>,
}

/// Recorded financial claim against the property by a creditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lien {
    pub lien_type: String,
    pub creditor: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub recording_date: DateTime<Utc>,
    pub document_number: String,
    pub status: String,
}

/// Recorded restriction or claim other than a lien (e.g. an easement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encumbrance {
    pub encumbrance_type: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub recording_date: DateTime<Utc>,
    pub document_number: String,
}

/// Full response body of a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSearchResult {
    pub search_id: String,
    pub property_address: PropertyAddress,
    pub status: SearchStatus,
    #[serde(default)]
    pub deeds: Vec<Deed>,
    #[serde(default)]
    pub liens: Vec<Lien>,
    #[serde(default)]
    pub encumbrances: Vec<Encumbrance>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_risk_score")]
    pub risk_score: Option<f64>,
}

/// The backend emits ISO-8601 datetimes, sometimes without a UTC offset.
/// Accept RFC 3339, a naive datetime, or a bare date; hold everything as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(format!("'{raw}' is not a recognized ISO-8601 timestamp"))
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    if let Some(amount) = value {
        if amount < 0.0 || !amount.is_finite() {
            return Err(serde::de::Error::custom(format!(
                "lien amount must be a non-negative number, got {amount}"
            )));
        }
    }
    Ok(value)
}

fn deserialize_risk_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    if let Some(score) = value {
        if !(0.0..=100.0).contains(&score) {
            return Err(serde::de::Error::custom(format!(
                "risk_score must lie in [0, 100], got {score}"
            )));
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> PropertyAddress {
        PropertyAddress {
            street: "123 Main St".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            zip_code: "90001".to_string(),
            county: None,
            parcel_number: None,
        }
    }

    #[test]
    fn search_request_round_trips_through_json() {
        let request = SearchRequest {
            property_address: PropertyAddress {
                county: Some("Los Angeles".to_string()),
                parcel_number: Some("5021-007-012".to_string()),
                ..address()
            },
            search_type: SearchType::LienOnly,
            include_historical: true,
            jurisdiction: Some("CA".to_string()),
        };

        let encoded = serde_json::to_string(&request).expect("request encodes");
        let decoded: SearchRequest = serde_json::from_str(&encoded).expect("request decodes");
        assert_eq!(decoded, request);
    }

    #[test]
    fn absent_optionals_are_omitted_from_the_wire() {
        let request = SearchRequest {
            property_address: address(),
            search_type: SearchType::Full,
            include_historical: false,
            jurisdiction: None,
        };

        let encoded = serde_json::to_value(&request).expect("request encodes");
        assert_eq!(
            encoded,
            json!({
                "property_address": {
                    "street": "123 Main St",
                    "city": "Los Angeles",
                    "state": "CA",
                    "zip_code": "90001",
                },
                "search_type": "full",
                "include_historical": false,
            })
        );
    }

    #[test]
    fn search_type_uses_snake_case_wire_values() {
        for search_type in SearchType::ordered() {
            let encoded = serde_json::to_value(search_type).expect("encodes");
            assert_eq!(encoded, json!(search_type.as_str()));
            assert_eq!(
                search_type.as_str().parse::<SearchType>().expect("parses"),
                search_type
            );
        }
        assert!("full_search".parse::<SearchType>().is_err());
    }

    #[test]
    fn result_decodes_backend_payload_with_naive_timestamps() {
        let payload = json!({
            "search_id": "ts-0001",
            "property_address": {
                "street": "123 Main St",
                "city": "Los Angeles",
                "state": "CA",
                "zip_code": "90001",
                "county": "Los Angeles",
            },
            "status": "completed",
            "deeds": [{
                "deed_type": "Grant Deed",
                "grantor": "Anna Smith",
                "grantee": "Bob Jones",
                "recording_date": "2019-06-14T00:00:00",
                "document_number": "2019-0614233",
                "book_page": "1021/44",
            }],
            "liens": [],
            "encumbrances": [],
            "created_at": "2024-02-01T09:30:00",
            "completed_at": "2024-02-01T09:31:12Z",
            "risk_score": 87.0,
        });

        let result: TitleSearchResult = serde_json::from_value(payload).expect("result decodes");
        assert_eq!(result.status, SearchStatus::Completed);
        assert_eq!(result.deeds.len(), 1);
        assert_eq!(result.deeds[0].recording_date.to_rfc3339(), "2019-06-14T00:00:00+00:00");
        assert_eq!(result.risk_score, Some(87.0));
    }

    #[test]
    fn record_lists_default_to_empty() {
        let payload = json!({
            "search_id": "ts-0002",
            "property_address": address(),
            "status": "pending",
            "created_at": "2024-02-01",
        });

        let result: TitleSearchResult = serde_json::from_value(payload).expect("result decodes");
        assert!(result.deeds.is_empty());
        assert!(result.liens.is_empty());
        assert!(result.encumbrances.is_empty());
        assert_eq!(result.completed_at, None);
        assert_eq!(result.risk_score, None);
    }

    #[test]
    fn rejects_unparseable_recording_date() {
        let payload = json!({
            "deed_type": "Grant Deed",
            "grantor": "A",
            "grantee": "B",
            "recording_date": "June 14th 2019",
            "document_number": "x",
        });
        assert!(serde_json::from_value::<Deed>(payload).is_err());
    }

    #[test]
    fn rejects_negative_lien_amount() {
        let payload = json!({
            "lien_type": "Tax Lien",
            "creditor": "County of Los Angeles",
            "amount": -250.0,
            "recording_date": "2022-03-01T00:00:00",
            "document_number": "2022-030155",
            "status": "active",
        });
        assert!(serde_json::from_value::<Lien>(payload).is_err());
    }

    #[test]
    fn rejects_out_of_range_risk_score() {
        let payload = json!({
            "search_id": "ts-0003",
            "property_address": address(),
            "status": "completed",
            "created_at": "2024-02-01T09:30:00",
            "risk_score": 100.5,
        });
        assert!(serde_json::from_value::<TitleSearchResult>(payload).is_err());
    }

    #[test]
    fn address_display_matches_postal_form() {
        assert_eq!(address().to_string(), "123 Main St, Los Angeles, CA 90001");
    }
}
