pub mod dashboard;
pub mod movement;
pub mod product;
pub mod user;
