use std::collections::VecDeque;

/// User-facing run log, newest message first.
///
/// Every line is also emitted as a `tracing` event.
#[derive(Clone, Debug, Default)]
pub struct CaptureLog {
    lines: VecDeque<String>,
}

impl CaptureLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` and emit it at `info` level.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "emoview::capture", "{message}");
        self.lines.push_front(message);
    }

    /// Lines, newest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` when nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/log.rs"]
mod tests;
