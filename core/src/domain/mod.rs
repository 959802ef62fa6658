pub mod common;
pub mod completion;
pub mod food_analysis;
pub mod inference;
pub mod recipe;
