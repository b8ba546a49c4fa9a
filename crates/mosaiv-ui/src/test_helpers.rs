//! Read-only accessors for message-driven tests. Compiled only with the
//! `test-helpers` feature.

use crate::app::App;

impl App {
    pub fn status(&self) -> &str {
        &self.status_message
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    pub fn random_seeds(&self) -> bool {
        self.random_seeds
    }

    pub fn source_name(&self) -> Option<&str> {
        self.session.source().map(|s| s.name.as_str())
    }

    pub fn live_images(&self) -> usize {
        self.session.live_images()
    }
}
