//! Spinner shown on stderr while a batch is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// The spinner currently drawing, if any. Other stderr output goes through it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn set_active(bar: Option<ProgressBar>) {
    *ACTIVE.lock().unwrap_or_else(PoisonError::into_inner) = bar;
}

/// Runs `f` with the active spinner hidden, so whatever `f` writes to the terminal is not
/// drawn over a spinner frame. Without a spinner `f` just runs.
pub fn suspend_progress<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let active = ACTIVE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    match active {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

/// A background task that ticks a spinner until [`Progress::finish`] is called.
///
/// Purely cosmetic: nothing about a batch depends on it.
pub struct Progress {
    done: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Progress {
    /// Starts ticking every `interval`.
    pub fn start(message: impl Into<String>, interval: Duration) -> Self {
        Self::start_with_bar(ProgressBar::new_spinner(), message, interval)
    }

    /// A progress handle that draws nothing.
    pub fn hidden() -> Self {
        Progress {
            done: None,
            task: None,
        }
    }

    fn start_with_bar(bar: ProgressBar, message: impl Into<String>, interval: Duration) -> Self {
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.into());
        set_active(Some(bar.clone()));

        let (done, mut finished) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = &mut finished => break,
                    _ = ticker.tick() => bar.tick(),
                }
            }
            set_active(None);
            bar.finish_and_clear();
        });

        Progress {
            done: Some(done),
            task: Some(task),
        }
    }

    /// Signals completion and waits for the spinner to clear itself.
    pub async fn finish(mut self) {
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}
