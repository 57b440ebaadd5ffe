use crate::domain::model::{
    AddressComponent, CanonicalComponent, CanonicalPlace, PlaceDetails, PlaceFormat,
    StructuredAddressComponent,
};
use crate::utils::validation::validate_range;

/// Detects which response generation a record carries. Returns `None` for
/// records with no recognizable field from either generation.
pub fn detect_format(place: &PlaceDetails) -> Option<PlaceFormat> {
    match (place.has_legacy_fields(), place.has_structured_fields()) {
        (true, true) => Some(PlaceFormat::Mixed),
        (true, false) => Some(PlaceFormat::Legacy),
        (false, true) => Some(PlaceFormat::Structured),
        (false, false) => None,
    }
}

/// Collapses a hybrid record into the canonical shape.
///
/// For mixed records the preferred generation wins per field, falling back
/// to the other generation where the preferred one has nothing. Display
/// name and location only exist in the structured generation. Out-of-range
/// coordinates are kept but logged.
pub fn canonicalize(place: &PlaceDetails, prefer_legacy: bool) -> Option<CanonicalPlace> {
    let format = detect_format(place)?;

    let legacy_address = place.formatted_address.clone();
    let structured_address = place.structured_formatted_address.clone();
    let formatted_address = if prefer_legacy {
        legacy_address.or(structured_address)
    } else {
        structured_address.or(legacy_address)
    };

    let legacy_components = place
        .address_components
        .as_ref()
        .map(|components| components.iter().map(from_legacy_component).collect::<Vec<_>>());
    let structured_components = place
        .structured_address_components
        .as_ref()
        .map(|components| components.iter().map(from_structured_component).collect::<Vec<_>>());
    let components = if prefer_legacy {
        legacy_components.or(structured_components)
    } else {
        structured_components.or(legacy_components)
    }
    .unwrap_or_default();

    let location = place.location;
    if let Some(location) = &location {
        if validate_range("location.lat", location.lat, -90.0, 90.0).is_err()
            || validate_range("location.lng", location.lng, -180.0, 180.0).is_err()
        {
            tracing::warn!(
                "Keeping out-of-range coordinates: lat={}, lng={}",
                location.lat,
                location.lng
            );
        }
    }

    Some(CanonicalPlace {
        display_name: place.display_name.as_ref().map(|name| name.text.clone()),
        formatted_address,
        location,
        components,
        source_format: format,
    })
}

fn from_legacy_component(component: &AddressComponent) -> CanonicalComponent {
    CanonicalComponent {
        long_name: component.long_name.clone(),
        short_name: component.short_name.clone(),
        types: component.types.clone(),
    }
}

fn from_structured_component(component: &StructuredAddressComponent) -> CanonicalComponent {
    CanonicalComponent {
        long_name: component.long_text.clone(),
        short_name: component.short_text.clone(),
        types: component.types.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LatLng, LocalizedText};

    fn legacy_record() -> PlaceDetails {
        PlaceDetails {
            address_components: Some(vec![AddressComponent {
                long_name: "London".to_string(),
                short_name: "London".to_string(),
                types: vec!["locality".to_string()],
            }]),
            formatted_address: Some("London, UK".to_string()),
            ..Default::default()
        }
    }

    fn structured_record() -> PlaceDetails {
        PlaceDetails {
            display_name: Some(LocalizedText {
                text: "British Museum".to_string(),
            }),
            structured_formatted_address: Some("Great Russell St, London, UK".to_string()),
            location: Some(LatLng {
                lat: 51.5194,
                lng: -0.1270,
            }),
            structured_address_components: Some(vec![StructuredAddressComponent {
                long_text: "Great Russell Street".to_string(),
                short_text: "Great Russell St".to_string(),
                types: vec!["route".to_string()],
            }]),
            ..Default::default()
        }
    }

    fn mixed_record() -> PlaceDetails {
        let mut record = structured_record();
        record.formatted_address = Some("Legacy address, London".to_string());
        record.address_components = Some(vec![AddressComponent {
            long_name: "United Kingdom".to_string(),
            short_name: "UK".to_string(),
            types: vec!["country".to_string()],
        }]);
        record
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&legacy_record()), Some(PlaceFormat::Legacy));
        assert_eq!(
            detect_format(&structured_record()),
            Some(PlaceFormat::Structured)
        );
        assert_eq!(detect_format(&mixed_record()), Some(PlaceFormat::Mixed));
        assert_eq!(detect_format(&PlaceDetails::default()), None);
    }

    #[test]
    fn test_canonicalize_legacy_record() {
        let place = canonicalize(&legacy_record(), false).unwrap();

        assert_eq!(place.source_format, PlaceFormat::Legacy);
        assert_eq!(place.formatted_address.as_deref(), Some("London, UK"));
        assert_eq!(place.components.len(), 1);
        assert_eq!(place.components[0].long_name, "London");
        // Legacy responses carry neither a display name nor a location.
        assert!(place.display_name.is_none());
        assert!(place.location.is_none());
    }

    #[test]
    fn test_canonicalize_structured_record() {
        let place = canonicalize(&structured_record(), false).unwrap();

        assert_eq!(place.source_format, PlaceFormat::Structured);
        assert_eq!(place.display_name.as_deref(), Some("British Museum"));
        assert_eq!(
            place.formatted_address.as_deref(),
            Some("Great Russell St, London, UK")
        );
        assert_eq!(place.location.unwrap().lng, -0.1270);
        assert_eq!(place.components[0].long_name, "Great Russell Street");
        assert_eq!(place.components[0].short_name, "Great Russell St");
    }

    #[test]
    fn test_canonicalize_mixed_prefers_structured_by_default() {
        let place = canonicalize(&mixed_record(), false).unwrap();

        assert_eq!(place.source_format, PlaceFormat::Mixed);
        assert_eq!(
            place.formatted_address.as_deref(),
            Some("Great Russell St, London, UK")
        );
        assert_eq!(place.components[0].long_name, "Great Russell Street");
    }

    #[test]
    fn test_canonicalize_mixed_prefer_legacy_flips_selection() {
        let place = canonicalize(&mixed_record(), true).unwrap();

        assert_eq!(place.source_format, PlaceFormat::Mixed);
        assert_eq!(
            place.formatted_address.as_deref(),
            Some("Legacy address, London")
        );
        assert_eq!(place.components[0].short_name, "UK");
        // Structured-only fields still come through.
        assert_eq!(place.display_name.as_deref(), Some("British Museum"));
        assert!(place.location.is_some());
    }

    #[test]
    fn test_canonicalize_prefer_legacy_falls_back_per_field() {
        // Structured-only record with legacy preference: every field falls
        // back to the structured generation.
        let place = canonicalize(&structured_record(), true).unwrap();

        assert_eq!(
            place.formatted_address.as_deref(),
            Some("Great Russell St, London, UK")
        );
        assert_eq!(place.components.len(), 1);
    }

    #[test]
    fn test_canonicalize_empty_record() {
        assert!(canonicalize(&PlaceDetails::default(), false).is_none());
    }

    #[test]
    fn test_canonicalize_keeps_out_of_range_coordinates() {
        let mut record = structured_record();
        record.location = Some(LatLng {
            lat: 123.0,
            lng: 200.0,
        });

        let place = canonicalize(&record, false).unwrap();
        assert_eq!(place.location.unwrap().lat, 123.0);
    }
}
