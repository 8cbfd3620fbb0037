//! Terminal spinner used as the busy indicator.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use fetch_core::BusyIndicator;
use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Draws on stderr; indicatif hides it when stderr is not a terminal.
pub struct Spinner {
    message: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            bar: Mutex::new(None),
        }
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.bar().is_some()
    }
}

impl BusyIndicator for Spinner {
    fn show(&self) {
        let mut bar = self.bar();
        if bar.is_some() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(self.message.clone());
        spinner.enable_steady_tick(TICK);
        *bar = Some(spinner);
    }

    fn hide(&self) {
        if let Some(spinner) = self.bar().take() {
            spinner.finish_and_clear();
        }
    }
}
