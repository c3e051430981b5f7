use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Leveled log sink.
///
/// Call sites pass `format_args!` so an inert logger never allocates.
pub trait Logger: Send + Sync {
    fn debug(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _args: fmt::Arguments<'_>) {}
    fn info(&self, _args: fmt::Arguments<'_>) {}
    fn warn(&self, _args: fmt::Arguments<'_>) {}
    fn error(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards entries to `tracing` under the `playfab` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: "playfab", "{}", args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "playfab", "{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(target: "playfab", "{}", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target: "playfab", "{}", args);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Keeps every entry in memory. Intended for tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in emission order.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn record(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.lock().push((level, args.to_string()));
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(LogLevel, String)>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        self.record(LogLevel::Debug, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.record(LogLevel::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.record(LogLevel::Warn, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.record(LogLevel::Error, args);
    }
}
