use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::models::WrappedData;

/// What the presentation knows about the summary right now
#[derive(Debug, Clone)]
pub struct DataState {
    pub data: Option<Arc<WrappedData>>,
    pub loading: bool,
    pub error: Option<String>,
    /// When the current data arrived
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Default for DataState {
    fn default() -> Self {
        Self::loading()
    }
}

impl DataState {
    /// Initial state: a fetch is in flight
    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            loaded_at: None,
        }
    }

    /// Start (or restart) a fetch, keeping previously loaded data visible
    pub fn begin_reload(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn set_loaded(&mut self, data: WrappedData) {
        self.data = Some(Arc::new(data));
        self.loading = false;
        self.error = None;
        self.loaded_at = Some(Utc::now());
    }

    pub fn set_failed(&mut self, error: impl Into<String>) {
        self.loading = false;
        self.error = Some(error.into());
    }

    /// Loaded data, if any
    pub fn data(&self) -> Option<&WrappedData> {
        self.data.as_deref()
    }

    pub fn has_failed(&self) -> bool {
        !self.loading && self.error.is_some()
    }
}
