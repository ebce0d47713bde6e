//! Browser glue for the Herald admin console: the storage and navigation
//! implementations behind the session core, the Yew session context and the
//! route guard component.

pub mod auth;
pub mod browser;
pub mod components;
pub mod config;

pub use auth::{AuthContext, AuthProvider, ProtectedRoute};
pub use browser::{BrowserNavigator, BrowserStorage};
pub use components::Spinner;
pub use config::AppConfig;
