//! Layout configuration

use serde::{Deserialize, Serialize};

use crate::Size;

/// Layout engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform viewport, used to resolve `position: fixed`
    pub viewport: Size,

    /// Log every assigned frame at debug level
    pub debug_log_frames: bool,
}

impl Config {
    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // No platform viewport until the host provides one
            viewport: Size::ZERO,
            debug_log_frames: false,
        }
    }
}
