use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// A single progress notification: completion fraction plus a status line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub fraction: f64,
    pub message: String,
}

/// Forwards progress notifications for one extraction request.
///
/// Fractions are clamped to `[0.0, 1.0]` and never decrease: a value lower
/// than the last one reported is raised to it. Updates are delivered to an
/// optional channel; a dropped receiver is ignored.
#[derive(Debug)]
pub struct ProgressReporter {
    sender: Option<mpsc::UnboundedSender<ProgressUpdate>>,
    last: f64,
    emitted: usize,
}

impl ProgressReporter {
    pub fn new(sender: mpsc::UnboundedSender<ProgressUpdate>) -> Self {
        Self {
            sender: Some(sender),
            last: 0.0,
            emitted: 0,
        }
    }

    /// A reporter that records the fraction but delivers nothing.
    pub fn silent() -> Self {
        Self {
            sender: None,
            last: 0.0,
            emitted: 0,
        }
    }

    /// Create a reporter together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Report progress.
    pub fn report(&mut self, fraction: f64, message: impl Into<String>) {
        let fraction = if fraction.is_nan() {
            self.last
        } else {
            fraction.clamp(0.0, 1.0).max(self.last)
        };
        self.last = fraction;
        self.emitted += 1;

        let update = ProgressUpdate {
            fraction,
            message: message.into(),
        };
        debug!(fraction = update.fraction, message = %update.message, "progress");

        if let Some(sender) = &self.sender {
            let _ = sender.send(update);
        }
    }

    /// Report completion (fraction 1.0).
    pub fn finish(&mut self, message: impl Into<String>) {
        self.report(1.0, message);
    }

    /// Last fraction reported, 0.0 if nothing was reported yet.
    pub fn fraction(&self) -> f64 {
        self.last
    }

    pub fn is_complete(&self) -> bool {
        self.last >= 1.0
    }

    /// Number of updates reported so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}
