//! Session store: the single source of truth for "is the operator signed in"

use crate::clock::{Clock, SystemClock};
use crate::credential::Credential;
use crate::error::SessionResult;
use crate::storage::{KeyValueStore, erase_credential, read_credential, write_credential};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};

/// Projection of the current credential
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Storage has not been read yet
    Unknown,
    Absent,
    Valid,
    /// Credential present but past its expiration instant
    Expired,
}

/// Owns the in-memory credential and mirrors every change into storage.
///
/// Storage is read once, by [`SessionStore::initialize`]. After that the
/// in-memory credential is authoritative and storage is write-only from the
/// store's point of view. All methods take `&self`; the store is meant to be
/// shared behind an `Rc` on a single-threaded event loop.
pub struct SessionStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    credential: RefCell<Option<Credential>>,
    loading: Cell<bool>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SessionStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            credential: RefCell::new(None),
            loading: Cell::new(true),
        }
    }

    /// Load the persisted credential. Only the first call does anything.
    ///
    /// A missing half, an unreadable expiration or an expired credential all
    /// end in `Absent`; the last two also erase storage.
    pub fn initialize(&self) -> SessionState {
        if !self.loading.get() {
            tracing::debug!("Session already initialized");
            return self.state();
        }

        match read_credential(&self.storage) {
            None => tracing::debug!("No persisted credential"),
            Some((token, expiration)) => match Credential::from_persisted(token, &expiration) {
                Some(credential) if credential.is_valid_at(self.clock.now()) => {
                    tracing::debug!(expires_at = %credential.expires_at(), "Restored session");
                    self.credential.replace(Some(credential));
                }
                Some(_) => {
                    tracing::warn!("Persisted credential has expired");
                    erase_credential(&self.storage);
                }
                None => {
                    tracing::warn!("Persisted expiration is unreadable, discarding credential");
                    erase_credential(&self.storage);
                }
            },
        }

        self.loading.set(false);
        self.state()
    }

    /// Take a freshly issued token.
    ///
    /// Fails with `MalformedCredential` before touching anything if the token
    /// cannot be decoded. Expiry is not checked; an already-expired token is
    /// accepted and caught by the next [`SessionStore::check_validity`].
    pub fn accept(&self, token: impl Into<String>) -> SessionResult<()> {
        let credential = Credential::parse(token).inspect_err(|e| {
            tracing::warn!("Rejected token: {e}");
        })?;

        if let Err(error) = write_credential(&self.storage, &credential) {
            self.credential.replace(None);
            return Err(error);
        }

        tracing::debug!(expires_at = %credential.expires_at(), "Accepted credential");
        self.credential.replace(Some(credential));
        self.loading.set(false);
        Ok(())
    }

    /// Re-check the in-memory credential against the clock. No storage reads.
    ///
    /// Invalidates and returns `false` when there is no credential or it has
    /// expired.
    pub fn check_validity(&self) -> bool {
        let valid = self
            .credential
            .borrow()
            .as_ref()
            .is_some_and(|credential| credential.is_valid_at(self.clock.now()));

        if !valid {
            if self.credential.borrow().is_some() {
                tracing::warn!("Session expired");
            }
            self.invalidate();
        }
        valid
    }

    /// Drop the credential from memory and storage. Idempotent.
    pub fn remove(&self) {
        self.invalidate();
    }

    fn invalidate(&self) {
        erase_credential(&self.storage);
        self.credential.replace(None);
    }

    /// Current state, computed without side effects
    pub fn state(&self) -> SessionState {
        if self.loading.get() {
            return SessionState::Unknown;
        }
        match self.credential.borrow().as_ref() {
            None => SessionState::Absent,
            Some(credential) if credential.is_valid_at(self.clock.now()) => SessionState::Valid,
            Some(_) => SessionState::Expired,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_valid(&self) -> bool {
        self.state() == SessionState::Valid
    }

    pub fn token(&self) -> Option<String> {
        self.credential
            .borrow()
            .as_ref()
            .map(|credential| credential.token().to_string())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.credential.borrow().as_ref().map(Credential::expires_at)
    }

    /// The persisted store this session mirrors into
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::credential::tests::token_expiring_at;
    use crate::error::SessionError;
    use crate::storage::{MemoryStore, TOKEN_EXPIRATION_KEY, TOKEN_KEY};
    use chrono::Duration;

    fn store() -> (SessionStore<MemoryStore, ManualClock>, MemoryStore, ManualClock) {
        let storage = MemoryStore::new();
        let clock = ManualClock::default();
        let session = SessionStore::with_clock(storage.clone(), clock.clone());
        (session, storage, clock)
    }

    #[test]
    fn starts_loading_and_unknown() {
        let (session, _, _) = store();
        assert!(session.is_loading());
        assert_eq!(session.state(), SessionState::Unknown);
    }

    #[test]
    fn initialize_with_empty_storage_is_absent() {
        let (session, storage, _) = store();
        assert_eq!(session.initialize(), SessionState::Absent);
        assert!(!session.is_loading());
        assert!(storage.is_empty());
    }

    #[test]
    fn initialize_erases_expired_credential() {
        let (session, storage, clock) = store();
        let an_hour_ago = clock.now() - Duration::hours(1);
        storage.set(TOKEN_KEY, "abc.def.ghi").unwrap();
        storage
            .set(
                TOKEN_EXPIRATION_KEY,
                &an_hour_ago.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            )
            .unwrap();

        assert_eq!(session.initialize(), SessionState::Absent);
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(TOKEN_EXPIRATION_KEY), None);
    }

    #[test]
    fn initialize_restores_valid_credential() {
        let (session, storage, clock) = store();
        let in_an_hour = clock.now() + Duration::hours(1);
        storage.set(TOKEN_KEY, "abc.def.ghi").unwrap();
        storage
            .set(TOKEN_EXPIRATION_KEY, &in_an_hour.to_rfc3339())
            .unwrap();

        assert_eq!(session.initialize(), SessionState::Valid);
        assert_eq!(session.token().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn initialize_treats_half_present_credential_as_absent() {
        let (session, storage, _) = store();
        storage.set(TOKEN_KEY, "abc.def.ghi").unwrap();

        assert_eq!(session.initialize(), SessionState::Absent);
        assert!(session.token().is_none());
    }

    #[test]
    fn initialize_discards_unreadable_expiration() {
        let (session, storage, _) = store();
        storage.set(TOKEN_KEY, "abc.def.ghi").unwrap();
        storage.set(TOKEN_EXPIRATION_KEY, "not a date").unwrap();

        assert_eq!(session.initialize(), SessionState::Absent);
        assert!(storage.is_empty());
    }

    #[test]
    fn initialize_runs_once() {
        let (session, storage, clock) = store();
        session.initialize();

        storage.set(TOKEN_KEY, "abc.def.ghi").unwrap();
        storage
            .set(TOKEN_EXPIRATION_KEY, &(clock.now() + Duration::hours(1)).to_rfc3339())
            .unwrap();

        assert_eq!(session.initialize(), SessionState::Absent);
    }

    #[test]
    fn accepted_future_token_is_valid() {
        let (session, storage, clock) = store();
        session.initialize();
        let exp = clock.now() + Duration::minutes(30);

        session.accept(token_expiring_at(exp)).unwrap();

        assert!(session.check_validity());
        assert_eq!(session.state(), SessionState::Valid);
        assert!(storage.get(TOKEN_KEY).is_some());
        assert!(storage.get(TOKEN_EXPIRATION_KEY).is_some());
    }

    #[test]
    fn accepted_past_token_fails_next_check() {
        let (session, storage, clock) = store();
        session.initialize();

        session
            .accept(token_expiring_at(clock.now() - Duration::minutes(5)))
            .unwrap();
        assert_eq!(session.state(), SessionState::Expired);

        assert!(!session.check_validity());
        assert_eq!(session.state(), SessionState::Absent);
        assert!(storage.is_empty());
    }

    #[test]
    fn malformed_token_leaves_everything_untouched() {
        let (session, storage, clock) = store();
        session.initialize();
        let token = token_expiring_at(clock.now() + Duration::hours(2));
        session.accept(token.clone()).unwrap();
        let before = storage.snapshot();

        let err = session.accept("onlyonepart").unwrap_err();

        assert!(matches!(err, SessionError::MalformedCredential { .. }));
        assert_eq!(storage.snapshot(), before);
        assert_eq!(session.token(), Some(token));
    }

    #[test]
    fn token_unusable_as_header_is_never_stored() {
        let (session, storage, clock) = store();
        session.initialize();
        let token = token_expiring_at(clock.now() + Duration::hours(2));

        let err = session.accept(format!("{token}\nx")).unwrap_err();

        assert!(matches!(err, SessionError::MalformedCredential { .. }));
        assert!(storage.snapshot().is_empty());
        assert_eq!(session.state(), SessionState::Absent);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn storage_failure_on_accept_is_reported() {
        let clock = ManualClock::default();
        let session = SessionStore::with_clock(MemoryStore::read_only(), clock.clone());
        session.initialize();

        let err = session
            .accept(token_expiring_at(clock.now() + Duration::hours(1)))
            .unwrap_err();

        assert!(matches!(err, SessionError::Storage { .. }));
        assert_eq!(session.state(), SessionState::Absent);
    }

    #[test]
    fn expiry_is_fixed_at_acceptance() {
        let (session, storage, clock) = store();
        session.initialize();
        let exp = clock.now() + Duration::minutes(10);
        session.accept(token_expiring_at(exp)).unwrap();

        // Tampering with storage after acceptance does not move the in-memory instant
        storage
            .set(TOKEN_EXPIRATION_KEY, &(exp + Duration::days(365)).to_rfc3339())
            .unwrap();
        clock.advance(Duration::minutes(11));

        assert!(!session.check_validity());
    }

    #[test]
    fn check_validity_reads_memory_not_storage() {
        let (session, storage, clock) = store();
        session.initialize();
        session
            .accept(token_expiring_at(clock.now() + Duration::hours(1)))
            .unwrap();

        storage.remove(TOKEN_KEY);
        storage.remove(TOKEN_EXPIRATION_KEY);

        assert!(session.check_validity());
    }

    #[test]
    fn accept_then_initialize_on_fresh_instance_agrees() {
        let storage = MemoryStore::new();
        let clock = ManualClock::default();

        let first = SessionStore::with_clock(storage.clone(), clock.clone());
        first.initialize();
        first
            .accept(token_expiring_at(clock.now() + Duration::hours(3)))
            .unwrap();

        let second = SessionStore::with_clock(storage.clone(), clock.clone());
        assert_eq!(second.initialize(), SessionState::Valid);
        assert_eq!(second.check_validity(), first.check_validity());
        assert_eq!(second.expires_at(), first.expires_at());
    }

    #[test]
    fn accept_then_initialize_on_fresh_instance_agrees_when_expired() {
        let storage = MemoryStore::new();
        let clock = ManualClock::default();

        let first = SessionStore::with_clock(storage.clone(), clock.clone());
        first.initialize();
        first
            .accept(token_expiring_at(clock.now() - Duration::seconds(1)))
            .unwrap();

        let second = SessionStore::with_clock(storage.clone(), clock.clone());
        assert_eq!(second.initialize(), SessionState::Absent);
        assert!(!first.check_validity());
    }

    #[test]
    fn remove_is_idempotent() {
        let (session, storage, clock) = store();
        session.initialize();
        session
            .accept(token_expiring_at(clock.now() + Duration::hours(1)))
            .unwrap();

        session.remove();
        let once = (storage.snapshot(), session.state(), session.token());
        session.remove();
        let twice = (storage.snapshot(), session.state(), session.token());

        assert_eq!(once, twice);
        assert_eq!(session.state(), SessionState::Absent);
    }
}
