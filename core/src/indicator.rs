//! Busy indicator capability and the controller that owns its mode.
//!
//! # Design
//! The indicator itself is an external collaborator (a spinner, an overlay,
//! nothing at all). `IndicatorController` wraps it with the auto-mode flag:
//! in auto mode the dispatcher toggles the indicator around every request;
//! in manual mode a caller owns it across several operations.
//!
//! The flag is an atomic and concurrent writers are last-writer-wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::trace;

/// Something that can signal an in-flight request.
///
/// Implementations must be idempotent: two `show` calls look like one.
pub trait BusyIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Headless indicator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndicator;

impl BusyIndicator for NoopIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}

pub struct IndicatorController {
    indicator: Arc<dyn BusyIndicator>,
    auto_mode: AtomicBool,
}

impl IndicatorController {
    /// Starts in auto mode.
    pub fn new(indicator: Arc<dyn BusyIndicator>) -> Self {
        Self {
            indicator,
            auto_mode: AtomicBool::new(true),
        }
    }

    pub fn noop() -> Self {
        Self::new(Arc::new(NoopIndicator))
    }

    pub fn is_auto_mode(&self) -> bool {
        self.auto_mode.load(Ordering::Acquire)
    }

    /// Show the indicator and suspend automatic hiding until `hide_manual`.
    pub fn show_manual(&self) {
        self.auto_mode.store(false, Ordering::Release);
        trace!("indicator shown manually");
        self.indicator.show();
    }

    /// Hide the indicator and return to auto mode.
    pub fn hide_manual(&self) {
        self.indicator.hide();
        trace!("indicator hidden manually");
        self.auto_mode.store(true, Ordering::Release);
    }

    pub(crate) fn show_auto(&self) {
        if self.is_auto_mode() {
            self.indicator.show();
        }
    }

    pub(crate) fn hide_auto(&self) {
        if self.is_auto_mode() {
            self.indicator.hide();
        }
    }
}

impl Default for IndicatorController {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for IndicatorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorController")
            .field("auto_mode", &self.is_auto_mode())
            .finish_non_exhaustive()
    }
}
