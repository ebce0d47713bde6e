//! Route guard state machine
//!
//! ```text
//! Loading ──► Rendering ◄──┐
//!    │            │        │ accept() + navigation
//!    └──────► Blocked ─────┘
//! ```
//!
//! The guard re-validates on mount and on every navigation-path change, never
//! on a timer: expiry is caught when the operator tries to use a protected
//! view. [`RouteGuard::admits`] decides during render, before the protected
//! tree mounts; the redirect it queues is carried out afterwards with
//! [`RouteGuard::flush_redirect`].

use crate::clock::Clock;
use crate::navigation::{LOGIN_PATH, Navigator};
use crate::session::SessionStore;
use crate::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    /// Session initialization has not finished; render nothing
    #[default]
    Loading,
    /// No valid session; a redirect to the login entry point was issued
    Blocked,
    Rendering,
}

/// What the caller should do for the current path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Wait,
    Render,
    /// Client-side redirect replacing the current history entry
    Redirect { to: &'static str },
}

#[derive(Debug, Default)]
pub struct RouteGuard {
    state: GuardState,
    last_path: Option<String>,
    pending_redirect: Option<&'static str>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Path of the last evaluation made after loading finished
    pub fn last_path(&self) -> Option<&str> {
        self.last_path.as_deref()
    }

    pub fn should_render(&self) -> bool {
        self.state == GuardState::Rendering
    }

    /// Decide for `path` without navigating.
    ///
    /// While the session is loading nothing is evaluated. Otherwise the
    /// session is re-checked; on failure the credential is removed.
    pub fn evaluate<S, C>(&mut self, session: &SessionStore<S, C>, path: &str) -> GuardDecision
    where
        S: KeyValueStore,
        C: Clock,
    {
        if session.is_loading() {
            self.state = GuardState::Loading;
            return GuardDecision::Wait;
        }

        self.last_path = Some(path.to_string());

        if session.check_validity() {
            if self.state != GuardState::Rendering {
                tracing::debug!(path, "Guard admitted protected view");
            }
            self.state = GuardState::Rendering;
            GuardDecision::Render
        } else {
            session.remove();
            tracing::warn!(path, "No valid session, redirecting to login");
            self.state = GuardState::Blocked;
            GuardDecision::Redirect { to: LOGIN_PATH }
        }
    }

    /// Decide whether the protected view may render for `path`.
    ///
    /// Re-validates when `path` differs from the last evaluated path or when
    /// loading has just finished; otherwise the previous outcome stands. A
    /// failed check queues a redirect for [`Self::flush_redirect`].
    pub fn admits<S, C>(&mut self, session: &SessionStore<S, C>, path: &str) -> bool
    where
        S: KeyValueStore,
        C: Clock,
    {
        let fresh = self.state == GuardState::Loading || self.last_path.as_deref() != Some(path);
        let decision = fresh.then(|| self.evaluate(session, path));
        if let Some(GuardDecision::Redirect { to }) = decision {
            self.pending_redirect = Some(to);
        }
        self.should_render()
    }

    /// Carry out a queued redirect through `navigator`. Returns whether one was issued.
    pub fn flush_redirect<N>(&mut self, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        match self.pending_redirect.take() {
            Some(to) => {
                navigator.replace(to);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::credential::tests::token_expiring_at;
    use crate::navigation::mock::MockNavigator;
    use crate::storage::MemoryStore;
    use chrono::Duration;

    fn signed_in() -> (SessionStore<MemoryStore, ManualClock>, MemoryStore, ManualClock) {
        let storage = MemoryStore::new();
        let clock = ManualClock::default();
        let session = SessionStore::with_clock(storage.clone(), clock.clone());
        session.initialize();
        session
            .accept(token_expiring_at(clock.now() + Duration::minutes(15)))
            .unwrap();
        (session, storage, clock)
    }

    #[test]
    fn waits_while_loading() {
        let session = SessionStore::with_clock(MemoryStore::new(), ManualClock::default());
        let mut navigator = MockNavigator::new();
        navigator.expect_replace().never();
        navigator.expect_hard_redirect().never();

        let mut guard = RouteGuard::new();
        assert!(!guard.admits(&session, "/raids"));
        assert!(!guard.flush_redirect(&navigator));
        assert_eq!(guard.state(), GuardState::Loading);
        assert!(guard.last_path().is_none());
    }

    #[test]
    fn renders_with_valid_session() {
        let (session, _, _) = signed_in();
        let mut navigator = MockNavigator::new();
        navigator.expect_replace().never();

        let mut guard = RouteGuard::new();
        assert!(guard.admits(&session, "/raids"));
        assert!(!guard.flush_redirect(&navigator));
        assert!(guard.should_render());
    }

    #[test]
    fn expiry_between_navigations_redirects_with_replace() {
        let (session, storage, clock) = signed_in();
        let mut navigator = MockNavigator::new();
        navigator
            .expect_replace()
            .withf(|path| path == LOGIN_PATH)
            .times(1)
            .return_const(());
        navigator.expect_hard_redirect().never();

        let mut guard = RouteGuard::new();
        assert!(guard.admits(&session, "/raids"));

        clock.advance(Duration::minutes(16));

        // Decided before anything under /links mounts
        assert!(!guard.admits(&session, "/links"));
        assert_eq!(guard.state(), GuardState::Blocked);
        assert_eq!(guard.last_path(), Some("/links"));
        assert!(storage.is_empty());

        assert!(guard.flush_redirect(&navigator));
        assert!(!guard.flush_redirect(&navigator));
    }

    #[test]
    fn same_path_keeps_previous_outcome() {
        let (session, storage, clock) = signed_in();
        let mut guard = RouteGuard::new();
        assert!(guard.admits(&session, "/raids"));

        // Re-renders on the same path do not re-check; expiry is caught on the next navigation
        clock.advance(Duration::minutes(16));
        assert!(guard.admits(&session, "/raids"));
        assert!(!storage.is_empty());

        assert!(!guard.admits(&session, "/arts"));
        assert!(storage.is_empty());
    }

    #[test]
    fn admits_once_loading_finishes() {
        let storage = MemoryStore::new();
        let clock = ManualClock::default();
        let session = SessionStore::with_clock(storage.clone(), clock.clone());
        let mut guard = RouteGuard::new();

        assert!(!guard.admits(&session, "/raids"));

        let issued = SessionStore::with_clock(storage, clock.clone());
        issued.initialize();
        issued
            .accept(token_expiring_at(clock.now() + Duration::minutes(5)))
            .unwrap();
        session.initialize();

        assert!(guard.admits(&session, "/raids"));
    }

    #[test]
    fn absent_session_is_blocked_on_mount() {
        let session = SessionStore::with_clock(MemoryStore::new(), ManualClock::default());
        session.initialize();

        let mut guard = RouteGuard::new();
        assert_eq!(
            guard.evaluate(&session, "/arts"),
            GuardDecision::Redirect { to: LOGIN_PATH }
        );
        assert!(!guard.should_render());
    }

    #[test]
    fn blocked_stays_blocked_until_new_login() {
        let (session, _, clock) = signed_in();
        let mut guard = RouteGuard::new();
        clock.advance(Duration::hours(1));

        assert_eq!(guard.state(), GuardState::Loading);
        assert!(matches!(guard.evaluate(&session, "/raids"), GuardDecision::Redirect { .. }));
        assert!(matches!(guard.evaluate(&session, "/raids"), GuardDecision::Redirect { .. }));

        session
            .accept(token_expiring_at(clock.now() + Duration::hours(1)))
            .unwrap();
        assert_eq!(guard.evaluate(&session, "/links"), GuardDecision::Render);
        assert_eq!(guard.state(), GuardState::Rendering);
    }
}
