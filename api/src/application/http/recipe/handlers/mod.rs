pub mod generate_recipe;
