//! HTTP transport layer
//!
//! One request, one connection, one outcome. Requests are built by
//! [`Transport`] from the configured base URL, carry the session token as
//! `X-Auth-Token`, and always ask the server to close the connection after
//! the exchange.

pub use request::RequestBuilder;
pub use response::Response;
pub use streaming::StreamingResponse;
pub(crate) use transport::Transport;

mod request;
mod response;
mod streaming;
mod transport;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
