//! Feature schema shared by validation and encoding.
//!
//! Mirrors the training pipeline's column layout: numeric features first,
//! then one one-hot block per categorical feature, categories in training
//! order. The served models were exported against this exact layout.

/// Cities present in the training data.
pub const CITIES: &[&str] = &[
    "szczecin",
    "warszawa",
    "krakow",
    "poznan",
    "gdansk",
    "wroclaw",
    "lodz",
    "gdynia",
    "bialystok",
    "bydgoszcz",
    "czestochowa",
    "katowice",
    "lublin",
    "radom",
    "rzeszow",
    "sosnowiec",
];

/// Building types present in the training data.
pub const PROPERTY_TYPES: &[&str] = &["blockOfFlats", "tenement", "apartmentBuilding"];

/// Legal ownership forms present in the training data.
pub const OWNERSHIP_FORMS: &[&str] = &["condominium", "cooperative", "municipal"];

/// Building materials present in the training data.
pub const BUILDING_MATERIALS: &[&str] = &["brick", "concreteSlab"];

/// Condition labels present in the training data (missing values were
/// labelled "unknown" during preprocessing).
pub const CONDITIONS: &[&str] = &["low", "premium", "unknown"];

/// Numeric features in training order.
pub const NUMERIC_FEATURES: &[&str] = &[
    "squareMeters",
    "rooms",
    "floor",
    "floorCount",
    "buildYear",
    "centreDistance",
    "poiCount",
    "schoolDistance",
    "clinicDistance",
    "postOfficeDistance",
    "kindergartenDistance",
    "restaurantDistance",
    "collegeDistance",
    "pharmacyDistance",
    "hasParkingSpace",
    "hasBalcony",
    "hasElevator",
    "hasSecurity",
    "hasStorageRoom",
];

/// One-hot blocks in training order: (feature name, category domain).
pub const CATEGORICAL_BLOCKS: &[(&str, &[&str])] = &[
    ("city", CITIES),
    ("type", PROPERTY_TYPES),
    ("ownership", OWNERSHIP_FORMS),
    ("buildingMaterial", BUILDING_MATERIALS),
    ("condition", CONDITIONS),
];

/// Width of the encoded feature vector the models consume.
pub fn encoded_len() -> usize {
    NUMERIC_FEATURES.len()
        + CATEGORICAL_BLOCKS
            .iter()
            .map(|(_, domain)| domain.len())
            .sum::<usize>()
}

/// Resolve a raw categorical value against a domain.
///
/// Matching is case-insensitive and ignores surrounding whitespace, so
/// "Warszawa" and " warszawa " both resolve. Returns the index within the
/// domain, which is also the value's slot in its one-hot block.
pub fn category_index(domain: &[&str], raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    domain
        .iter()
        .position(|known| known.eq_ignore_ascii_case(trimmed))
}
