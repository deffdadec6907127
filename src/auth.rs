//! Auth Gate
//!
//! Decides whether an action may run for the persisted session.

use thiserror::Error;
use tracing::debug;

use crate::{stores::SessionStore, users::Session};

/// Reasons an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Nobody is logged in.
    #[error("you are not logged in, run `boxoffice login` first")]
    Unauthenticated,

    /// The logged in user may not perform the action.
    #[error("only organizers can manage the catalog")]
    Forbidden,
}

/// Guards actions that need a logged in user.
#[derive(Debug, Clone)]
pub struct AuthGate {
    sessions: SessionStore,
}

impl AuthGate {
    /// Create a gate over the persisted session.
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    /// Returns the current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.sessions.load()
    }

    /// Returns the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when nobody is logged in.
    pub fn require_session(&self) -> Result<Session, AuthError> {
        self.session().ok_or_else(|| {
            debug!("no stored session");

            AuthError::Unauthenticated
        })
    }

    /// Returns the current session of an organizer.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when nobody is logged in and
    /// [`AuthError::Forbidden`] when the user is not an organizer.
    pub fn require_organizer(&self) -> Result<Session, AuthError> {
        let session = self.require_session()?;

        if !session.is_organizer() {
            debug!(user = %session.user_id(), "organizer role required");

            return Err(AuthError::Forbidden);
        }

        Ok(session)
    }
}
