//! Blocking client core for the Wowcher API.
//!
//! # Overview
//! Each remote operation is a type implementing `ApiMethod`: `Orders` pages
//! through a deal's orders, `Status` pushes shipment updates and `EchoTest`
//! checks connectivity. A `Request` is built once from typed arguments and
//! sent through a `Transport`, by default `UreqTransport`.
//!
//! # Design
//! - Endpoint URI and verb are associated constants, never mutated.
//! - Arguments are shaped into body and query before any I/O; missing
//!   arguments fail at build time.
//! - One `call` is one HTTP round-trip. No retry, rate limiting or caching.
//! - The library logs through `tracing` and never installs a subscriber.

pub mod error;
pub mod http;
pub mod method;
pub mod orders;
pub mod status;
pub mod transport;
pub mod types;

pub use echo_test::EchoTest;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use method::{ApiMethod, Endpoint, Request, DOMAIN};
pub use orders::{Orders, OrdersArgs};
pub use status::Status;
pub use transport::{Transport, TransportConfig, UreqTransport};
pub use types::{EchoEnvelope, OrderStatus};
