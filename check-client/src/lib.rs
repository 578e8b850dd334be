//! # check-client
//!
//! Device-facing half of the VOLT acceptance harness.
//!
//! ## Features
//!
//! - **Transport Abstraction**: [`Transport`] with `get`/`post`/`delete`,
//!   injected into everything that talks to the device
//! - **Real HTTP**: [`HttpTransport`] backed by reqwest with a per-request timeout
//! - **Scripted Fake**: [`MockTransport`] for offline tests
//! - **Probe**: [`Probe`] issues one request and compares the status code,
//!   folding every transport failure into a failed [`ProbeOutcome`]
//!
//! ## Example
//!
//! ```ignore
//! use check_client::{HttpTransport, HttpTransportConfig, Method, Probe};
//!
//! let transport = HttpTransport::new(HttpTransportConfig::new("192.168.4.1"))?;
//! let probe = Probe::new(Arc::new(transport), "volt2024");
//! let outcome = probe.probe("/api/status", Method::Get, None, 200).await;
//! println!("{}", outcome.message);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod probe;
pub mod transport;

pub use probe::{Probe, ProbeOutcome, DEFAULT_TIMEOUT, STATUS_ENDPOINT, WIFI_ADD_ENDPOINT};
pub use transport::{
    DeviceResponse, HttpTransport, HttpTransportConfig, Method, MockTransport, RecordedRequest,
    Transport, TransportError,
};
