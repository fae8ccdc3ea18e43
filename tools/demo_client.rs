//! Demo Dashboard Client
//!
//! Generates sample property listings and submits them to the prediction
//! service, printing the returned estimates. Stands in for the dashboard
//! front-end when exercising the API by hand.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

const CITIES: &[&str] = &[
    "warszawa", "krakow", "gdansk", "wroclaw", "poznan", "lodz", "szczecin", "lublin",
];
const PROPERTY_TYPES: &[&str] = &["blockOfFlats", "tenement", "apartmentBuilding"];
const OWNERSHIP_FORMS: &[&str] = &["condominium", "cooperative", "municipal"];

/// Listing structure matching the service's expected format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    city: String,
    #[serde(rename = "type")]
    property_type: String,
    square_meters: f64,
    rooms: f64,
    floor: f64,
    floor_count: f64,
    build_year: f64,
    centre_distance: f64,
    poi_count: f64,
    school_distance: f64,
    clinic_distance: f64,
    post_office_distance: f64,
    kindergarten_distance: f64,
    restaurant_distance: f64,
    college_distance: f64,
    pharmacy_distance: f64,
    ownership: String,
    building_material: String,
    condition: String,
    has_parking_space: i64,
    has_balcony: i64,
    has_elevator: i64,
    has_security: i64,
    has_storage_room: i64,
}

/// Listing generator for demo traffic
struct ListingGenerator {
    rng: rand::rngs::ThreadRng,
}

impl ListingGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate a random listing within the valid input ranges
    fn generate(&mut self) -> Listing {
        let floor_count = self.rng.gen_range(1..=12) as f64;
        // A listing can never sit above the building's top floor
        let floor = self.rng.gen_range(0..=floor_count as u32) as f64;

        Listing {
            city: self.random_choice(CITIES).to_string(),
            property_type: self.random_choice(PROPERTY_TYPES).to_string(),
            square_meters: self.rng.gen_range(25.0..120.0),
            rooms: self.rng.gen_range(1..=5) as f64,
            floor,
            floor_count,
            build_year: self.rng.gen_range(1950..=2023) as f64,
            centre_distance: self.rng.gen_range(0.5..15.0),
            poi_count: self.rng.gen_range(0..60) as f64,
            school_distance: self.rng.gen_range(0.1..3.0),
            clinic_distance: self.rng.gen_range(0.1..3.0),
            post_office_distance: self.rng.gen_range(0.1..3.0),
            kindergarten_distance: self.rng.gen_range(0.1..3.0),
            restaurant_distance: self.rng.gen_range(0.1..3.0),
            college_distance: self.rng.gen_range(0.5..8.0),
            pharmacy_distance: self.rng.gen_range(0.1..3.0),
            ownership: self.random_choice(OWNERSHIP_FORMS).to_string(),
            building_material: "brick".to_string(),
            condition: "unknown".to_string(),
            has_parking_space: self.rng.gen_range(0..=1),
            has_balcony: self.rng.gen_range(0..=1),
            has_elevator: i64::from(floor_count > 4.0),
            has_security: self.rng.gen_range(0..=1),
            has_storage_room: self.rng.gen_range(0..=1),
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("demo_client=info".parse()?),
        )
        .init();

    info!("Starting Demo Dashboard Client");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let api_url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("http://127.0.0.1:8000");
    let mode = args.get(2).map(|s| s.as_str()).unwrap_or("sale");
    let count: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);
    let delay_ms: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(250);

    info!(
        api_url = %api_url,
        mode = %mode,
        count = count,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    let client = awc::Client::default();
    let endpoint = format!("{}/predict/{}", api_url, mode);
    let mut generator = ListingGenerator::new();
    let mut served = 0u64;
    let mut failed = 0u64;

    for i in 0..count {
        let listing = generator.generate();

        let response = client.post(&endpoint).send_json(&listing).await;

        match response {
            Ok(mut resp) => {
                let body: Value = resp.json().await.unwrap_or(Value::Null);
                if resp.status().is_success() {
                    served += 1;
                    let price = body["data"]["predicted_price"].as_f64().unwrap_or(0.0);
                    let per_m2 = body["data"]["price_per_m2"].as_f64().unwrap_or(0.0);
                    info!(
                        listing = i + 1,
                        city = %listing.city,
                        square_meters = format!("{:.1}", listing.square_meters),
                        estimate = format!("{:.0} PLN", price),
                        per_m2 = format!("{:.0} PLN/m2", per_m2),
                        "Estimate received"
                    );
                } else {
                    failed += 1;
                    let message = body["error"].as_str().unwrap_or("unknown error");
                    warn!(
                        listing = i + 1,
                        status = %resp.status(),
                        error = %message,
                        "Service rejected the request"
                    );
                }
            }
            Err(e) => {
                failed += 1;
                warn!(listing = i + 1, error = %e, "Could not reach the service");
            }
        }

        if delay_ms > 0 && i + 1 < count {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    info!(served = served, failed = failed, "Demo client finished");
    Ok(())
}
