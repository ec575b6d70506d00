//! Busy indicator on stderr, driven by the API client's in-flight counter.

use std::time::Duration;

use haras_api::ActivityTracker;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_millis(80);

/// Shows a spinner while at least one request is in flight. Dropping it
/// clears the line.
pub struct Spinner {
    bar: ProgressBar,
    task: JoinHandle<()>,
}

impl Spinner {
    pub fn attach(activity: &ActivityTracker) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message("Carregando...");

        let mut rx = activity.subscribe();
        let task = tokio::spawn({
            let bar = bar.clone();
            async move {
                while rx.changed().await.is_ok() {
                    let in_flight = *rx.borrow_and_update();
                    if in_flight > 0 {
                        bar.reset();
                        bar.enable_steady_tick(TICK);
                    } else {
                        bar.disable_steady_tick();
                        bar.finish_and_clear();
                    }
                }
            }
        });

        Self { bar, task }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.task.abort();
        self.bar.finish_and_clear();
    }
}
