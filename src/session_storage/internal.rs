use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use log::{debug, trace};
use tokio::time::Instant;
use uuid::Uuid;
use crate::data::KnownUser;
use crate::rng::make_uuid;
use crate::session_storage::flash::{Flash, FlashMessages};


#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SessionId(Uuid);

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(SessionId)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Per-visitor state, kept in memory for the lifetime of the process.
///
/// The lock is never held across an await point, so it's a plain mutex
/// that can also be used from synchronous responders.
pub struct SessionStorage {
    state: Mutex<State>,
    idle_timeout: Duration,
}

#[derive(Default)]
struct State {
    sessions: HashMap<SessionId, Session>,
}

struct Session {
    user: Option<KnownUser>,
    flash: FlashMessages,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Session {
            user: None,
            flash: FlashMessages::default(),
            last_seen: now,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachedSession {
    pub id: SessionId,
    pub user: Option<KnownUser>,
    pub is_new: bool,
}

impl SessionStorage {
    pub fn new(idle_timeout: Duration) -> Self {
        SessionStorage {
            state: Mutex::new(State::default()),
            idle_timeout,
        }
    }

    /// Resumes the session if it's still alive, starts a new one otherwise.
    pub fn attach(&self, id: Option<SessionId>) -> AttachedSession {
        let now = Instant::now();
        let mut state = self.lock();
        if let Some(id) = id
            && let Some(session) = state.sessions.get_mut(&id)
            && !self.is_expired(session, now)
        {
            trace!("resuming session {id}");
            session.last_seen = now;
            return AttachedSession {
                id,
                user: session.user.clone(),
                is_new: false,
            }
        }

        let before = state.sessions.len();
        state.sessions.retain(|_, session| !self.is_expired(session, now));
        if before != state.sessions.len() {
            debug!("pruned {} idle sessions", before - state.sessions.len());
        }

        let id = SessionId(make_uuid(&mut rand::rng()));
        debug!("starting session {id}");
        state.sessions.insert(id, Session::new(now));
        AttachedSession {
            id,
            user: None,
            is_new: true,
        }
    }

    /// Binds the user to a brand new session id, retiring `id`.
    ///
    /// Anything still queued for the old session moves along with it.
    pub fn log_in(&self, id: SessionId, user: KnownUser) -> SessionId {
        let now = Instant::now();
        let mut state = self.lock();
        let flash = state.sessions
            .remove(&id)
            .map(|session| session.flash)
            .unwrap_or_default();
        let new_id = SessionId(make_uuid(&mut rand::rng()));
        debug!("session {id} logged in as {}, continuing as {new_id}", user.id);
        state.sessions.insert(
            new_id,
            Session {
                user: Some(user),
                flash,
                last_seen: now,
            },
        );
        new_id
    }

    pub fn log_out(&self, id: SessionId) -> Option<KnownUser> {
        debug!("session {id} logged out");
        let mut user = None;
        self.with_session(id, |session| user = session.user.take());
        user
    }

    /// Messages queued within one request accumulate until the next drain.
    pub fn queue_flash(&self, id: SessionId, flash: Flash) {
        trace!("queueing flash {flash:?} for session {id}");
        self.with_session(id, |session| session.flash.push(flash));
    }

    /// Returns everything queued so far and leaves the queue empty.
    pub fn drain_flash(&self, id: SessionId) -> FlashMessages {
        self.lock()
            .sessions
            .get_mut(&id)
            .map(|session| std::mem::take(&mut session.flash))
            .unwrap_or_default()
    }

    // initializes sessions that were pruned mid-request
    fn with_session(&self, id: SessionId, f: impl FnOnce(&mut Session)) {
        let now = Instant::now();
        let mut state = self.lock();
        let session = state.sessions
            .entry(id)
            .or_insert_with(|| Session::new(now));
        session.last_seen = now;
        f(session)
    }

    fn is_expired(&self, session: &Session, now: Instant) -> bool {
        now.duration_since(session.last_seen) > self.idle_timeout
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
