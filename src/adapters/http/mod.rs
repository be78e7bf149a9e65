//! HTTP adapter - the REST surface and its request pipeline.

pub mod pipeline;
pub mod response;
pub mod session;

mod router;

pub use pipeline::{dispatch_raw, dispatch_rest, HandlerError, RequestLogger};
pub use response::{RawResponse, ResponseStatus, RestResponse};
pub use router::app_router;
pub use session::SessionApi;
