//! Session API for the hosting application
//!
//! [`HuntSession`] owns the tracker and the registry and is driven either
//! directly or by draining an [`EventSource`](crate::sensors::EventSource).

pub mod session;
pub mod types;

pub use session::HuntSession;
pub use types::{CallbackHandle, EventCallback, HuntEvent, SessionSummary};
