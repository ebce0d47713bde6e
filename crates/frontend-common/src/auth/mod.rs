//! Session context and route guarding

pub mod context;
pub mod guard;

pub use context::{
    AuthContext, AuthProvider, BrowserAdminClient, BrowserSession, use_auth, use_is_authenticated,
    use_session_state,
};
pub use guard::ProtectedRoute;
