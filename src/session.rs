//! Per-user sessions: the selected target, submitted form data, expiry.
//!
//! The original UI kept these in browser storage with expiry stamps;
//! here the server owns them so the pipeline only ever sees values the
//! store vouches for. Form data lives minutes (it holds personal data),
//! a target selection lives for the length of a campaign.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StampaError;
use crate::form::FormData;

/// Validity window for submitted form data.
pub const FORM_EXPIRY_SECS: i64 = 3 * 60;

/// Validity window for a target selection.
pub const TARGET_EXPIRY_SECS: i64 = 60 * 24 * 60 * 60;

/// A value plus the moment it stops being valid.
#[derive(Debug, Clone)]
struct Expiring<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<T> Expiring<T> {
    fn new(value: T, ttl_secs: i64, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: now + Duration::seconds(ttl_secs),
        }
    }

    fn live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// One user's session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    target: Option<Expiring<String>>,
    form: Option<Expiring<FormData>>,
    /// Bumped on every new generation request. A pipeline run compares
    /// its own number against this before publishing: a mismatch means a
    /// newer request superseded it and its artifact must be dropped.
    generation: u64,
}

impl Session {
    /// Select a target, discarding any previously submitted form data.
    pub fn select_target(&mut self, name: String, now: DateTime<Utc>) {
        self.form = None;
        self.target = Some(Expiring::new(name, TARGET_EXPIRY_SECS, now));
    }

    /// Store freshly submitted form data.
    pub fn submit_form(&mut self, form: FormData, now: DateTime<Utc>) {
        self.form = Some(Expiring::new(form, FORM_EXPIRY_SECS, now));
    }

    /// The selected target, if the selection is still valid.
    pub fn target(&self, now: DateTime<Utc>) -> Option<&str> {
        self.target
            .as_ref()
            .filter(|t| t.live(now))
            .map(|t| t.value.as_str())
    }

    /// Submitted form data at hand-off time.
    ///
    /// Absence and staleness are distinct: no submission yet is the
    /// silent "nothing to generate" case, an expired one must be
    /// re-entered and is surfaced to the user.
    pub fn form(&self, now: DateTime<Utc>) -> Result<&FormData, StampaError> {
        match &self.form {
            None => Err(StampaError::MissingFormData),
            Some(f) if !f.live(now) => Err(StampaError::ExpiredData),
            Some(f) => Ok(&f.value),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Claim the next generation number for a new request.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Drop expired values. Returns true when anything was removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> bool {
        let mut removed = false;
        if self.form.as_ref().is_some_and(|f| !f.live(now)) {
            self.form = None;
            removed = true;
        }
        if self.target.as_ref().is_some_and(|t| !t.live(now)) {
            self.target = None;
            removed = true;
        }
        removed
    }

    fn is_empty(&self) -> bool {
        self.target.is_none() && self.form.is_none()
    }
}

/// Shared session map keyed by a browser-held id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the session for `id`, creating it on first use.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.write().await;
        f(sessions.entry(id).or_default())
    }

    /// Drop expired values everywhere and forget emptied sessions.
    /// Returns how many sessions were touched.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let mut touched = 0;
        sessions.retain(|_, session| {
            if session.sweep(now) {
                touched += 1;
            }
            !session.is_empty()
        });
        touched
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> FormData {
        FormData {
            name: "Ann".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_missing_then_present_then_expired() {
        let now = Utc::now();
        let mut session = Session::default();
        assert!(matches!(
            session.form(now),
            Err(StampaError::MissingFormData)
        ));

        session.submit_form(form(), now);
        assert_eq!(session.form(now).unwrap().name, "Ann");

        let later = now + Duration::seconds(FORM_EXPIRY_SECS + 1);
        assert!(matches!(session.form(later), Err(StampaError::ExpiredData)));
    }

    #[test]
    fn test_target_selection_outlives_form() {
        let now = Utc::now();
        let mut session = Session::default();
        session.select_target("Jane Doe".into(), now);
        session.submit_form(form(), now);

        let later = now + Duration::seconds(FORM_EXPIRY_SECS + 1);
        assert_eq!(session.target(later), Some("Jane Doe"));
        assert!(matches!(session.form(later), Err(StampaError::ExpiredData)));

        let much_later = now + Duration::seconds(TARGET_EXPIRY_SECS + 1);
        assert_eq!(session.target(much_later), None);
    }

    #[test]
    fn test_selecting_a_target_discards_form_data() {
        let now = Utc::now();
        let mut session = Session::default();
        session.submit_form(form(), now);
        session.select_target("Jane Doe".into(), now);
        assert!(matches!(
            session.form(now),
            Err(StampaError::MissingFormData)
        ));
    }

    #[test]
    fn test_generation_numbers_supersede() {
        let mut session = Session::default();
        let first = session.next_generation();
        let second = session.next_generation();
        assert!(second > first);
        // The first pipeline run checks back in and finds itself stale.
        assert_ne!(session.generation(), first);
        assert_eq!(session.generation(), second);
    }

    #[tokio::test]
    async fn test_store_sweep_drops_expired_and_empty() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        let now = Utc::now();
        store
            .with_session(id, |s| s.submit_form(form(), now))
            .await;
        assert_eq!(store.len().await, 1);

        let later = now + Duration::seconds(FORM_EXPIRY_SECS + 1);
        let touched = store.sweep(later).await;
        assert_eq!(touched, 1);
        // Nothing left in the session, so the entry itself is gone.
        assert_eq!(store.len().await, 0);
    }
}
