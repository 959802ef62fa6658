pub mod analyze_image;
