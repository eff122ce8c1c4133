pub mod entity;
pub mod invariants;

pub use entity::{Property, PropertyStatus};
pub use invariants::validate_listing_price;
