use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One labeled fragment of a formatted address (street, city, postal code)
/// in the legacy response format. All fields are required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

/// Display name carried by the structured response format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Address component in the structured response format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAddressComponent {
    pub long_text: String,
    pub short_text: String,
    pub types: Vec<String>,
}

/// Place details as returned by either API generation.
///
/// Every field is optional: a response may carry the legacy snake_case
/// fields, the structured camelCase fields, or both at once. The flat
/// permissive shape is deliberate — which generation is actually populated
/// is detected downstream, not enforced here. Unknown foreign keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    // legacy format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Vec<AddressComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,

    // structured format
    #[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LocalizedText>,
    #[serde(default, rename = "formattedAddress", skip_serializing_if = "Option::is_none")]
    pub structured_formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    #[serde(default, rename = "addressComponents", skip_serializing_if = "Option::is_none")]
    pub structured_address_components: Option<Vec<StructuredAddressComponent>>,
}

impl PlaceDetails {
    pub fn has_legacy_fields(&self) -> bool {
        self.address_components.is_some() || self.formatted_address.is_some()
    }

    pub fn has_structured_fields(&self) -> bool {
        self.display_name.is_some()
            || self.structured_formatted_address.is_some()
            || self.location.is_some()
            || self.structured_address_components.is_some()
    }
}

/// A single result from the structured search endpoint.
///
/// Declares only the structured field set; a payload carrying legacy keys
/// such as `address_components` fails deserialization outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PlaceResult {
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub address_components: Option<Vec<StructuredAddressComponent>>,
}

impl From<PlaceResult> for PlaceDetails {
    fn from(result: PlaceResult) -> Self {
        Self {
            display_name: result.display_name,
            structured_formatted_address: result.formatted_address,
            location: result.location,
            structured_address_components: result.address_components,
            ..Default::default()
        }
    }
}

/// Envelope the structured search endpoint wraps its results in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub places: Vec<PlaceResult>,
}

/// Which response generation a record carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceFormat {
    Legacy,
    Structured,
    Mixed,
}

impl PlaceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Structured => "structured",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

/// The single canonical place shape produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPlace {
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub components: Vec<CanonicalComponent>,
    pub source_format: PlaceFormat,
}

/// JSON artifact written by the load phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEnvelope {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub skipped: usize,
    pub places: Vec<CanonicalPlace>,
}

#[derive(Debug, Clone)]
pub struct NormalizeResult {
    pub normalized: Vec<CanonicalPlace>,
    pub skipped: Vec<PlaceDetails>,
    pub json_output: String,
    pub csv_output: String,
}
