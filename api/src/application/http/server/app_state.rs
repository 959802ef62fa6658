use std::sync::Arc;

use foodwaste_core::application::FoodWasteService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FoodWasteService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FoodWasteService) -> Self {
        Self { args, service }
    }
}
