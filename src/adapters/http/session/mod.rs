//! Session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AttachmentResponse, SessionResponse};
pub use handlers::SessionApi;
pub use routes::session_routes;
