//! Herald core: the operator session and everything that decides whether a
//! protected view may render.
//!
//! The crate is platform neutral. Browser storage, the wall clock and the
//! router are reached through the [`KeyValueStore`], [`Clock`] and
//! [`Navigator`] seams so the whole lifecycle can be exercised natively.

pub mod clock;
pub mod credential;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod session;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use credential::{Claims, Credential};
pub use error::{SessionError, SessionResult};
pub use guard::{GuardDecision, GuardState, RouteGuard};
pub use navigation::{APP_ROOT, DEFAULT_PROTECTED_PATH, LOGIN_PATH, Navigator};
pub use session::{SessionState, SessionStore};
pub use storage::{KeyValueStore, TOKEN_EXPIRATION_KEY, TOKEN_KEY, erase_credential};

#[cfg(any(test, feature = "tests"))]
pub use clock::ManualClock;
#[cfg(any(test, feature = "tests"))]
pub use storage::MemoryStore;
