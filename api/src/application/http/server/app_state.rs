use std::sync::Arc;

use taskhub_core::application::TaskhubService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: TaskhubService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: TaskhubService) -> Self {
        Self { args, service }
    }
}
