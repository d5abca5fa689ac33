//! Geolocation domain: coordinate model and source contract.

pub mod model;
pub mod source;

pub use model::Location;
pub use source::GeoSource;
