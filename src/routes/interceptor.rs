use log::debug;
use crate::routes::{Reply, RequestContext};
use crate::session_storage::Flash;

pub const LOGIN_PATH: &str = "/users/login";
pub const NOT_AUTHORIZED: &str = "Not Authorized";

/// Runs before a handler and either passes the context on or answers the
/// request itself.
pub type Interceptor = fn(RequestContext) -> Result<RequestContext, Reply>;

/// Interceptors of a route group, in the order they run.
pub struct Pipeline(&'static [Interceptor]);

pub const IDEAS: Pipeline = Pipeline(&[ensure_authenticated]);
pub const PAGES: Pipeline = Pipeline(&[]);
pub const USERS: Pipeline = Pipeline(&[]);

impl Pipeline {
    pub fn admit(
        &self,
        context: impl Into<RequestContext>,
    ) -> Result<RequestContext, Reply> {
        self.0
            .iter()
            .try_fold(context.into(), |context, interceptor| interceptor(context))
    }
}

pub fn ensure_authenticated(context: RequestContext) -> Result<RequestContext, Reply> {
    if context.is_authenticated() {
        Ok(context)
    } else {
        debug!("session {} is not logged in", context.session_id());
        Err(not_authorized())
    }
}

pub fn not_authorized() -> Reply {
    Reply::redirect_with(LOGIN_PATH, Flash::error_msg(NOT_AUTHORIZED))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::time::Duration;
    use uuid::Uuid;
    use crate::data::{KnownUser, UserId};
    use crate::email_string::EmailString;
    use crate::routes::Visit;
    use crate::session_storage::{FlashKind, SessionStorage};
    use super::*;

    fn context(logged_in: bool) -> RequestContext {
        let storage = SessionStorage::new(Duration::from_secs(60));
        let mut id = storage.attach(None).id;
        if logged_in {
            id = storage.log_in(
                id,
                KnownUser {
                    id: UserId(Uuid::from_u128(1)),
                    name: "Jane".into(),
                    email: EmailString::from_str("jane@example.com").unwrap(),
                },
            );
        }
        Visit::from(storage.attach(Some(id))).into()
    }

    #[tokio::test]
    async fn anonymous_visitors_are_redirected_to_login() {
        match IDEAS.admit(context(false)) {
            Err(Reply::Redirect { to, flash: Some(flash) }) => {
                assert_eq!(to, LOGIN_PATH);
                assert_eq!(flash.kind, FlashKind::ErrorMsg);
                assert_eq!(flash.message, NOT_AUTHORIZED);
            },
            r => panic!("unexpected result: {r:?}"),
        }
    }

    #[tokio::test]
    async fn logged_in_users_pass_unchanged() {
        let before = context(true);
        let after = IDEAS.admit(before.clone()).expect("should be admitted");
        assert_eq!(after.session_id(), before.session_id());
        assert_eq!(after.user().ok().map(|u| u.name.as_str()), Some("Jane"));
    }

    #[tokio::test]
    async fn empty_pipeline_admits_everyone() {
        assert!(USERS.admit(context(false)).is_ok());
    }
}
