use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, error, trace};
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use crate::data::KnownUser;
use crate::lib_constants::SESSION_COOKIE_NAME;
use crate::routes::Reply;
use crate::routes::interceptor::not_authorized;
use crate::session_storage::{AttachedSession, FlashMessages, SessionId, SessionStorage};

/// The visitor's session, attached (and started if needed) for this request.
#[derive(Debug)]
pub struct Visit(AttachedSession);

/// What interceptors see and pass along.
#[derive(Clone, Debug)]
pub struct RequestContext {
    session_id: SessionId,
    user: Option<KnownUser>,
}

/// The session attached for this request plus the flash it was carrying.
pub(super) struct AttachedVisit {
    pub(super) session: AttachedSession,
    pub(super) flash: FlashMessages,
}

struct VisitSlot(Option<AttachedVisit>);

#[async_trait]
impl<'r> FromRequest<'r> for Visit {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let slot = request.local_cache(|| VisitSlot(attach(request)));
        match slot.0 {
            Some(ref visit) => Outcome::Success(Visit(visit.session.clone())),
            None => Outcome::Error((Status::InternalServerError, ())),
        }
    }
}

// flash queued by earlier requests is taken here, so it's shown by this
// request or not at all
fn attach(request: &Request<'_>) -> Option<AttachedVisit> {
    let Some(sessions) = request.rocket().state::<Arc<SessionStorage>>() else {
        error!("session storage is not set up");
        return None;
    };
    let cookies = request.cookies();
    let known_id = cookies
        .get_private(SESSION_COOKIE_NAME)
        .and_then(|cookie| SessionId::from_str(cookie.value()).ok());
    let session = sessions.attach(known_id);
    if session.is_new {
        debug!("handing out session cookie for {}", session.id);
        set_session_cookie(cookies, session.id);
    }
    let flash = sessions.drain_flash(session.id);
    if !flash.is_empty() {
        trace!("delivering flash for session {}", session.id);
    }
    Some(AttachedVisit { session, flash })
}

pub(super) fn set_session_cookie(cookies: &CookieJar<'_>, id: SessionId) {
    cookies.add_private(
        Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
    );
}

/// The visit attached by a [`Visit`] guard earlier in this request, if any.
pub(super) fn attached_visit<'r>(request: &'r Request<'_>) -> Option<&'r AttachedVisit> {
    request.local_cache(|| VisitSlot(None)).0.as_ref()
}

impl From<AttachedSession> for Visit {
    fn from(value: AttachedSession) -> Self {
        Visit(value)
    }
}

impl From<Visit> for RequestContext {
    fn from(value: Visit) -> Self {
        RequestContext {
            session_id: value.0.id,
            user: value.0.user,
        }
    }
}

impl RequestContext {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged in user; anonymous visitors get sent to the login page.
    pub fn user(&self) -> Result<&KnownUser, Reply> {
        self.user.as_ref().ok_or_else(not_authorized)
    }
}
