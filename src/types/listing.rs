//! Property listing input and its validation contract

use crate::schema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a listing was rejected before inference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown {field}: '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be 0 or 1 (got {value})")]
    NotAFlag { field: &'static str, value: i64 },

    #[error("floor {floor} exceeds floorCount {floor_count}")]
    FloorAboveTop { floor: f64, floor_count: f64 },
}

/// One property's attributes, matching the training schema.
///
/// Field names on the wire follow the training CSV's camelCase. Optional
/// fields default to the values the preprocessing step imputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    /// City the property is located in
    pub city: String,

    /// Building type (blockOfFlats, tenement, apartmentBuilding)
    #[serde(rename = "type")]
    pub property_type: String,

    /// Total floor area in square meters
    pub square_meters: f64,

    /// Number of rooms (excluding kitchen and bathroom)
    pub rooms: f64,

    /// Floor the apartment is on (0 = ground floor)
    #[serde(default = "default_floor")]
    pub floor: f64,

    /// Total floors in the building
    #[serde(default = "default_floor_count")]
    pub floor_count: f64,

    /// Year the building was constructed
    #[serde(default = "default_build_year")]
    pub build_year: f64,

    /// Straight-line distance to the city centre in km
    pub centre_distance: f64,

    /// Number of points of interest within 500 m
    pub poi_count: f64,

    /// Distance to the nearest school in km
    pub school_distance: f64,

    /// Distance to the nearest clinic in km
    pub clinic_distance: f64,

    /// Distance to the nearest post office in km
    pub post_office_distance: f64,

    /// Distance to the nearest kindergarten in km
    pub kindergarten_distance: f64,

    /// Distance to the nearest restaurant in km
    pub restaurant_distance: f64,

    /// Distance to the nearest college in km
    pub college_distance: f64,

    /// Distance to the nearest pharmacy in km
    pub pharmacy_distance: f64,

    /// Legal ownership form (condominium, cooperative, municipal)
    pub ownership: String,

    /// Building material (brick, concreteSlab)
    #[serde(default = "default_building_material")]
    pub building_material: String,

    /// Condition label (low, premium, unknown)
    #[serde(default = "default_condition")]
    pub condition: String,

    /// 1 if an assigned parking spot is included
    #[serde(default)]
    pub has_parking_space: i64,

    /// 1 if the apartment has a balcony or terrace
    #[serde(default)]
    pub has_balcony: i64,

    /// 1 if the building has a working elevator
    #[serde(default)]
    pub has_elevator: i64,

    /// 1 if the building is monitored or guarded
    #[serde(default)]
    pub has_security: i64,

    /// 1 if a basement or storage unit is included
    #[serde(default)]
    pub has_storage_room: i64,
}

fn default_floor() -> f64 {
    1.0
}

fn default_floor_count() -> f64 {
    1.0
}

fn default_build_year() -> f64 {
    1980.0
}

fn default_building_material() -> String {
    "brick".to_string()
}

fn default_condition() -> String {
    "unknown".to_string()
}

impl PropertyListing {
    /// Check every field against the documented domains.
    ///
    /// Numeric ranges follow the training data; categorical values must be
    /// members of the known sets from the training schema. Returns the first
    /// violation found. A listing that passes is safe to encode and predict.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_category("city", &self.city, schema::CITIES)?;
        check_category("type", &self.property_type, schema::PROPERTY_TYPES)?;
        check_category("ownership", &self.ownership, schema::OWNERSHIP_FORMS)?;
        check_category(
            "buildingMaterial",
            &self.building_material,
            schema::BUILDING_MATERIALS,
        )?;
        check_category("condition", &self.condition, schema::CONDITIONS)?;

        check_range("squareMeters", self.square_meters, 10.0, 500.0)?;
        check_range("rooms", self.rooms, 1.0, 10.0)?;
        check_range("floor", self.floor, 0.0, 50.0)?;
        check_range("floorCount", self.floor_count, 1.0, 50.0)?;
        check_range("buildYear", self.build_year, 1800.0, 2030.0)?;
        check_range("centreDistance", self.centre_distance, 0.0, 100.0)?;
        check_range("poiCount", self.poi_count, 0.0, 1000.0)?;

        let distances = [
            ("schoolDistance", self.school_distance),
            ("clinicDistance", self.clinic_distance),
            ("postOfficeDistance", self.post_office_distance),
            ("kindergartenDistance", self.kindergarten_distance),
            ("restaurantDistance", self.restaurant_distance),
            ("collegeDistance", self.college_distance),
            ("pharmacyDistance", self.pharmacy_distance),
        ];
        for (field, value) in distances {
            check_range(field, value, 0.0, 100.0)?;
        }

        let flags = [
            ("hasParkingSpace", self.has_parking_space),
            ("hasBalcony", self.has_balcony),
            ("hasElevator", self.has_elevator),
            ("hasSecurity", self.has_security),
            ("hasStorageRoom", self.has_storage_room),
        ];
        for (field, value) in flags {
            if value != 0 && value != 1 {
                return Err(ValidationError::NotAFlag { field, value });
            }
        }

        // An apartment cannot sit above the building's top floor
        if self.floor > self.floor_count {
            return Err(ValidationError::FloorAboveTop {
                floor: self.floor,
                floor_count: self.floor_count,
            });
        }

        Ok(())
    }
}

fn check_category(
    field: &'static str,
    value: &str,
    domain: &[&str],
) -> Result<(), ValidationError> {
    if schema::category_index(domain, value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory {
            field,
            value: value.to_string(),
        })
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
impl PropertyListing {
    /// Representative valid listing used across unit tests.
    pub(crate) fn sample() -> Self {
        Self {
            city: "warszawa".to_string(),
            property_type: "blockOfFlats".to_string(),
            square_meters: 50.0,
            rooms: 2.0,
            floor: 3.0,
            floor_count: 10.0,
            build_year: 2010.0,
            centre_distance: 2.5,
            poi_count: 10.0,
            school_distance: 0.5,
            clinic_distance: 1.0,
            post_office_distance: 0.5,
            kindergarten_distance: 0.5,
            restaurant_distance: 0.3,
            college_distance: 2.0,
            pharmacy_distance: 0.4,
            ownership: "condominium".to_string(),
            building_material: "brick".to_string(),
            condition: "unknown".to_string(),
            has_parking_space: 1,
            has_balcony: 1,
            has_elevator: 1,
            has_security: 0,
            has_storage_room: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing() -> PropertyListing {
        PropertyListing::sample()
    }

    #[test]
    fn test_valid_listing_passes() {
        assert_eq!(sample_listing().validate(), Ok(()));
    }

    #[test]
    fn test_unknown_city_rejected() {
        let mut listing = sample_listing();
        listing.city = "atlantis".to_string();
        assert_eq!(
            listing.validate(),
            Err(ValidationError::UnknownCategory {
                field: "city",
                value: "atlantis".to_string(),
            })
        );
    }

    #[test]
    fn test_negative_area_rejected() {
        let mut listing = sample_listing();
        listing.square_meters = -10.0;
        assert!(matches!(
            listing.validate(),
            Err(ValidationError::OutOfRange {
                field: "squareMeters",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_distance_rejected() {
        let mut listing = sample_listing();
        listing.centre_distance = f64::NAN;
        assert_eq!(
            listing.validate(),
            Err(ValidationError::NotFinite {
                field: "centreDistance"
            })
        );
    }

    #[test]
    fn test_floor_above_top_rejected() {
        let mut listing = sample_listing();
        listing.floor = 12.0;
        listing.floor_count = 4.0;
        assert!(matches!(
            listing.validate(),
            Err(ValidationError::FloorAboveTop { .. })
        ));
    }

    #[test]
    fn test_flag_must_be_binary() {
        let mut listing = sample_listing();
        listing.has_balcony = 2;
        assert_eq!(
            listing.validate(),
            Err(ValidationError::NotAFlag {
                field: "hasBalcony",
                value: 2,
            })
        );
    }

    #[test]
    fn test_missing_required_field_fails_deserialization() {
        // No "city" key: required fields have no serde default
        let json = r#"{
            "type": "blockOfFlats",
            "squareMeters": 50.0,
            "rooms": 2,
            "centreDistance": 2.0,
            "poiCount": 10,
            "schoolDistance": 0.5,
            "clinicDistance": 1.0,
            "postOfficeDistance": 0.5,
            "kindergartenDistance": 0.5,
            "restaurantDistance": 0.5,
            "collegeDistance": 2.0,
            "pharmacyDistance": 0.5,
            "ownership": "condominium"
        }"#;
        assert!(serde_json::from_str::<PropertyListing>(json).is_err());
    }

    #[test]
    fn test_optional_fields_take_training_defaults() {
        let json = r#"{
            "city": "krakow",
            "type": "tenement",
            "squareMeters": 64.0,
            "rooms": 3,
            "centreDistance": 1.2,
            "poiCount": 25,
            "schoolDistance": 0.5,
            "clinicDistance": 1.0,
            "postOfficeDistance": 0.5,
            "kindergartenDistance": 0.5,
            "restaurantDistance": 0.5,
            "collegeDistance": 2.0,
            "pharmacyDistance": 0.5,
            "ownership": "cooperative"
        }"#;
        let listing: PropertyListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.floor, 1.0);
        assert_eq!(listing.floor_count, 1.0);
        assert_eq!(listing.build_year, 1980.0);
        assert_eq!(listing.building_material, "brick");
        assert_eq!(listing.condition, "unknown");
        assert_eq!(listing.has_elevator, 0);
        assert_eq!(listing.validate(), Ok(()));
    }
}
