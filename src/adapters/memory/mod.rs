//! In-memory repositories.
//!
//! Sessions are ephemeral by contract (the retention window caps their
//! lifetime), so a process-local store is a legitimate production backend,
//! not just a test double. The attachment repository holds a handle to the
//! session map so orphan detection stays inside the repository boundary.

mod attachment;
mod session;

pub use attachment::InMemoryAttachmentRepository;
pub use session::InMemorySessionRepository;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;

/// Shared session map; lock is never held across an await point.
pub(crate) type SessionMap = Arc<RwLock<HashMap<SessionId, Session>>>;
