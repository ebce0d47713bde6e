//! Session context and provider

use crate::browser::{BrowserNavigator, BrowserStorage};
use crate::config::AppConfig;
use chrono::{DateTime, Utc};
use herald_core::{SessionResult, SessionState, SessionStore};
use herald_http::{AdminClient, ClientBuilder, ClientError, PublicClient};
use std::rc::Rc;
use yew::prelude::*;

/// The session store as wired in the browser
pub type BrowserSession = SessionStore<BrowserStorage>;

/// Gateway-backed client over browser storage
pub type BrowserAdminClient = AdminClient<BrowserStorage, BrowserNavigator>;

/// Bumped after every session mutation so consumers re-render
#[derive(Default, PartialEq)]
struct Revision(u64);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Handle on the single session store, shared through Yew context.
///
/// Mutations go through the store and then notify the provider, so every
/// consumer observes the same lifecycle.
#[derive(Clone)]
pub struct AuthContext {
    session: Rc<BrowserSession>,
    revision: UseReducerHandle<Revision>,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && self.revision.0 == other.revision.0
    }
}

impl AuthContext {
    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_valid(&self) -> bool {
        self.session.is_valid()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.expires_at()
    }

    /// Adopt a freshly issued token
    pub fn accept(&self, token: impl Into<String>) -> SessionResult<()> {
        let result = self.session.accept(token);
        self.notify();
        result
    }

    /// Re-check the in-memory credential, clearing it if it has lapsed
    pub fn check_validity(&self) -> bool {
        let valid = self.session.check_validity();
        if !valid {
            self.notify();
        }
        valid
    }

    /// Log out
    pub fn remove(&self) {
        self.session.remove();
        self.notify();
    }

    /// Tell consumers the store changed underneath them
    pub fn notify(&self) {
        self.revision.dispatch(());
    }

    /// Client for the login endpoint
    pub fn public_client(&self) -> Result<PublicClient, ClientError> {
        ClientBuilder::new()
            .base_url(AppConfig::api_base_url())
            .build_public()
    }

    /// Client for the collection endpoints; reads the credential from storage on every call
    pub fn admin_client(&self) -> Result<BrowserAdminClient, ClientError> {
        ClientBuilder::new()
            .base_url(AppConfig::api_base_url())
            .build_admin(BrowserStorage, BrowserNavigator)
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

/// Owns the session store for the lifetime of the app
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let session = use_memo((), |_| BrowserSession::new(BrowserStorage));
    let revision = use_reducer(Revision::default);

    let context = AuthContext {
        session,
        revision,
    };

    // Restore from storage once the tree has mounted
    {
        let context = context.clone();
        use_effect_with((), move |_| {
            let state = context.session.initialize();
            tracing::debug!(?state, "Session restored");
            context.notify();
            || ()
        });
    }

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to get the current session state
#[hook]
pub fn use_session_state() -> SessionState {
    let auth = use_auth();
    auth.state()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.state() == SessionState::Valid
}
