//! Feature encoding for price model inference.
//!
//! Turns a validated listing into the flat numeric vector the exported
//! models consume: the numeric columns in training order, followed by one
//! one-hot block per categorical column. Standardization of the numeric
//! block is baked into the exported ONNX graph, so raw values go in here.

use crate::schema;
use crate::types::listing::PropertyListing;

/// Encoder matching the training pipeline's column transformer.
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a listing into the model input layout.
    ///
    /// A categorical value outside its domain leaves its block all-zero,
    /// the same behavior the training encoder was fitted with for unseen
    /// categories. Validation upstream rejects such listings anyway.
    pub fn encode(&self, listing: &PropertyListing) -> Vec<f32> {
        let mut features = Vec::with_capacity(schema::encoded_len());

        features.push(listing.square_meters as f32);
        features.push(listing.rooms as f32);
        features.push(listing.floor as f32);
        features.push(listing.floor_count as f32);
        features.push(listing.build_year as f32);
        features.push(listing.centre_distance as f32);
        features.push(listing.poi_count as f32);
        features.push(listing.school_distance as f32);
        features.push(listing.clinic_distance as f32);
        features.push(listing.post_office_distance as f32);
        features.push(listing.kindergarten_distance as f32);
        features.push(listing.restaurant_distance as f32);
        features.push(listing.college_distance as f32);
        features.push(listing.pharmacy_distance as f32);
        features.push(listing.has_parking_space as f32);
        features.push(listing.has_balcony as f32);
        features.push(listing.has_elevator as f32);
        features.push(listing.has_security as f32);
        features.push(listing.has_storage_room as f32);

        push_one_hot(&mut features, schema::CITIES, &listing.city);
        push_one_hot(&mut features, schema::PROPERTY_TYPES, &listing.property_type);
        push_one_hot(&mut features, schema::OWNERSHIP_FORMS, &listing.ownership);
        push_one_hot(
            &mut features,
            schema::BUILDING_MATERIALS,
            &listing.building_material,
        );
        push_one_hot(&mut features, schema::CONDITIONS, &listing.condition);

        features
    }

    /// Width of the vectors this encoder produces.
    pub fn feature_count(&self) -> usize {
        schema::encoded_len()
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn push_one_hot(features: &mut Vec<f32>, domain: &[&str], value: &str) {
    let hot = schema::category_index(domain, value);
    for slot in 0..domain.len() {
        features.push(if hot == Some(slot) { 1.0 } else { 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::PropertyListing;

    fn sample_listing() -> PropertyListing {
        PropertyListing::sample()
    }

    #[test]
    fn test_encoded_width() {
        let encoder = FeatureEncoder::new();
        let features = encoder.encode(&sample_listing());
        assert_eq!(features.len(), encoder.feature_count());
        assert_eq!(features.len(), 46);
    }

    #[test]
    fn test_numeric_block_order() {
        let encoder = FeatureEncoder::new();
        let listing = sample_listing();
        let features = encoder.encode(&listing);

        assert_eq!(features[0], 50.0); // squareMeters
        assert_eq!(features[1], 2.0); // rooms
        assert_eq!(features[4], 2010.0); // buildYear
        assert_eq!(features[14], 1.0); // hasParkingSpace
        assert_eq!(features[18], 0.0); // hasStorageRoom
    }

    #[test]
    fn test_one_hot_block_has_single_hot_slot() {
        let encoder = FeatureEncoder::new();
        let features = encoder.encode(&sample_listing());

        // City block starts right after the 19 numeric slots
        let city_block = &features[19..19 + schema::CITIES.len()];
        assert_eq!(city_block.iter().sum::<f32>(), 1.0);
        // "warszawa" is the second known city
        assert_eq!(city_block[1], 1.0);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = FeatureEncoder::new();
        let listing = sample_listing();
        assert_eq!(encoder.encode(&listing), encoder.encode(&listing));
    }

    #[test]
    fn test_unknown_category_encodes_all_zero_block() {
        let encoder = FeatureEncoder::new();
        let mut listing = sample_listing();
        listing.condition = "ruined".to_string();

        let features = encoder.encode(&listing);
        let condition_block = &features[features.len() - schema::CONDITIONS.len()..];
        assert!(condition_block.iter().all(|&slot| slot == 0.0));
    }
}
