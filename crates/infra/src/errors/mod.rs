//! Conversions from third-party errors into the domain error taxonomy.

mod conversions;

pub use conversions::{InfraError, IntoTransportError};
