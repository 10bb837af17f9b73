pub mod geo;
pub mod ranking;

mod error;

pub use error::Error;
pub use geo::GeoPoint;
pub use ranking::{Candidate, Ranked};

pub type Result<T, E = Error> = std::result::Result<T, E>;
