//! Host capabilities consumed by the dashboard but owned by the environment.

pub trait ColorSchemeSource: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

pub trait FullscreenControl: Send + Sync {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&self, value: bool);
}
