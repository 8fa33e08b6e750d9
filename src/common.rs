pub mod error;
pub mod in_flight;
