pub mod detected_item;

pub use detected_item::*;
