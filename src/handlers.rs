pub mod dashboard;
pub mod movements;
pub mod products;
pub mod users;
