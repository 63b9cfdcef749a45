//! Shared server state

use std::sync::Arc;
use std::time::Instant;

use dash_stock::DashboardEngine;

use crate::page::PageRenderer;

/// Read-only handles every handler needs; cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<DashboardEngine>,
    pub renderer: Arc<PageRenderer>,
    started_at: Instant,
}

impl AppState {
    pub fn new(engine: DashboardEngine, renderer: PageRenderer) -> Self {
        Self {
            engine: Arc::new(engine),
            renderer: Arc::new(renderer),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
