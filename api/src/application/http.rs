pub mod food_analysis;
pub mod recipe;
pub mod server;
