use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::app::{LogEntry, RunUpdate, Severity};

/// Wakes the presentation thread after an update has been queued.
pub type Repaint = Box<dyn Fn() + Send>;

/// Worker-side end of the update channel.
///
/// Everything the worker wants to show goes through here so the log is only
/// ever touched by the thread that drains the receiver.
pub struct Logger {
    sender: mpsc::Sender<RunUpdate>,
    repaint: Repaint,
}

impl Logger {
    pub fn new(sender: mpsc::Sender<RunUpdate>, repaint: Repaint) -> Self {
        Logger { sender, repaint }
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.send(RunUpdate::Log(LogEntry::new(message, severity)));
    }

    pub fn finish(&self) {
        self.send(RunUpdate::Finished);
    }

    fn send(&self, update: RunUpdate) {
        // The window may already be gone; nobody is left to read it then.
        if self.sender.send(update).is_ok() {
            (self.repaint)();
        }
    }
}

pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}
