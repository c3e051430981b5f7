//! Pooled HTTP transport.

pub mod transport;

pub use transport::{HttpTransport, HttpTransportBuilder, Transport, TransportRequest, TransportResponse};
