//! Logging capability consumed by the request engine and client.
//!
//! The engine only ever sees `dyn Logger`. Binaries pick the sink:
//! [`TracingLogger`] forwards into the `tracing` ecosystem, [`NoopLogger`] is
//! the inert default, [`MemoryLogger`] keeps entries for assertions.

pub mod logger;

pub use logger::{LogLevel, Logger, MemoryLogger, NoopLogger, TracingLogger};
