use crate::data::KnownUser;
use crate::session_storage::SessionId;

#[derive(Debug)]
pub struct LoginResult {
    /// Replaces the session id the login came in with.
    pub session_id: SessionId,
    pub user: KnownUser,
}
