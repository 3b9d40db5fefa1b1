//! HTTP client layer: `ApiHttp` with bearer auth, timeout and single-flight refresh.

pub mod client;
mod refresh;
pub mod transport;

pub use client::{ApiHttp, RequestOptions, REFRESH_ENDPOINT};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
