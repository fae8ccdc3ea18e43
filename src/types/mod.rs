//! Request and response data structures

pub mod estimate;
pub mod listing;
pub mod mode;
pub mod response;

pub use estimate::PriceEstimate;
pub use listing::{PropertyListing, ValidationError};
pub use mode::{ParseModeError, PriceMode};
pub use response::ApiResponse;
