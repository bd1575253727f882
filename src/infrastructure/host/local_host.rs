use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::host::{ColorSchemeSource, FullscreenControl};

/// Color scheme fixed at startup from configuration
#[derive(Debug, Clone, Copy)]
pub struct StaticColorScheme {
    prefers_dark: bool,
}

impl StaticColorScheme {
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark }
    }
}

impl ColorSchemeSource for StaticColorScheme {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

/// Fullscreen flag for hosts without a window manager to talk to
#[derive(Debug, Default)]
pub struct LocalFullscreen {
    active: AtomicBool,
}

impl FullscreenControl for LocalFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn set_fullscreen(&self, value: bool) {
        self.active.store(value, Ordering::SeqCst);
    }
}
