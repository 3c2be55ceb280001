use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, info};
use crate::data::KnownUser;
use crate::email_string::EmailString;
use crate::session_storage::{SessionId, SessionStorage};
use crate::user_db::{CredentialsCheck, NewUser, ProductionUserDb, Registration, UserDb};

mod errors;
mod model;

pub use errors::AccessGranterError;
pub use model::LoginResult;

/// Checks credentials and binds the resulting identity to a fresh session.
#[async_trait]
pub trait AccessGranter: Send + Sync + 'static {
    async fn login_user(
        &self,
        session_id: SessionId,
        email: &EmailString,
        password: &str,
    ) -> Result<LoginResult, AccessGranterError>;

    async fn register_user(
        &self,
        new_user: NewUser,
    ) -> Result<KnownUser, AccessGranterError>;

    async fn logout_user(
        &self,
        session_id: SessionId,
    ) -> Option<KnownUser>;
}

pub type ProductionAccessGranter = AccessGranterImpl<ProductionUserDb>;

pub struct AccessGranterImpl<U: UserDb> {
    user_db: U,
    sessions: Arc<SessionStorage>,
}

impl<U: UserDb> AccessGranterImpl<U> {
    pub fn new(
        user_db: U,
        sessions: Arc<SessionStorage>,
    ) -> Self {
        AccessGranterImpl {
            user_db,
            sessions,
        }
    }
}

#[async_trait]
impl<U: UserDb + 'static> AccessGranter for AccessGranterImpl<U> {
    async fn login_user(
        &self,
        session_id: SessionId,
        email: &EmailString,
        password: &str,
    ) -> Result<LoginResult, AccessGranterError> {
        debug!("logging user \"{email}\" in");
        match self.user_db.check_user_credentials(email, password).await? {
            CredentialsCheck::Valid(user) => {
                let user = KnownUser::from(&user);
                let session_id = self.sessions.log_in(session_id, user.clone());
                info!("user \"{email}\" logged in");
                Ok(
                    LoginResult {
                        session_id,
                        user,
                    }
                )
            },
            CredentialsCheck::UnknownUser => Err(AccessGranterError::UnknownUser),
            CredentialsCheck::WrongPassword => {
                info!("wrong password for user \"{email}\"");
                Err(AccessGranterError::InvalidCredentials)
            },
        }
    }

    async fn register_user(
        &self,
        new_user: NewUser,
    ) -> Result<KnownUser, AccessGranterError> {
        debug!("registering user \"{}\"", new_user.email);
        match self.user_db.register_user(new_user).await? {
            Registration::Registered(user) => {
                info!("user \"{}\" registered", user.email);
                Ok(KnownUser::from(&user))
            },
            Registration::AlreadyRegistered => Err(AccessGranterError::AlreadyRegistered),
        }
    }

    async fn logout_user(
        &self,
        session_id: SessionId,
    ) -> Option<KnownUser> {
        let user = self.sessions.log_out(session_id);
        if let Some(ref user) = user {
            info!("user \"{}\" logged out", user.email);
        }
        user
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::time::Duration;
    use argon2::password_hash::PasswordHashString;
    use tokio::sync::Mutex;
    use uuid::Uuid;
    use crate::data::UserId;
    use crate::email_string::EmailString;
    use crate::hasher::Hasher;
    use crate::hasher::tests::fast_hasher;
    use crate::user_db::{User, UserDbError};
    use super::*;

    #[derive(Default)]
    struct TestUserDb {
        users: Mutex<HashMap<EmailString, (User, String)>>,
    }

    #[async_trait]
    impl UserDb for TestUserDb {
        async fn check_user_credentials(
            &self,
            email: &EmailString,
            password: &str,
        ) -> Result<CredentialsCheck, UserDbError> {
            Ok(
                match self.users.lock().await.get(email) {
                    None => CredentialsCheck::UnknownUser,
                    Some((user, p)) if p == password => CredentialsCheck::Valid(user.clone()),
                    Some(_) => CredentialsCheck::WrongPassword,
                }
            )
        }

        async fn register_user(
            &self,
            new_user: NewUser,
        ) -> Result<Registration, UserDbError> {
            let mut users = self.users.lock().await;
            if users.contains_key(&new_user.email) {
                return Ok(Registration::AlreadyRegistered);
            }
            let user = User {
                id: UserId(Uuid::from_u128(users.len() as u128 + 1)),
                name: new_user.name,
                email: new_user.email.clone(),
                hash: dummy_hash(),
            };
            users.insert(new_user.email, (user.clone(), new_user.password));
            Ok(Registration::Registered(user))
        }
    }

    fn dummy_hash() -> PasswordHashString {
        fast_hasher().generate_hash("irrelevant").unwrap()
    }

    fn email(s: &str) -> EmailString {
        EmailString::from_str(s).unwrap()
    }

    fn make_granter() -> (AccessGranterImpl<TestUserDb>, Arc<SessionStorage>) {
        let sessions = Arc::new(SessionStorage::new(Duration::from_secs(60)));
        (AccessGranterImpl::new(TestUserDb::default(), sessions.clone()), sessions)
    }

    async fn register(granter: &AccessGranterImpl<TestUserDb>) -> KnownUser {
        granter
            .register_user(NewUser {
                name: "Jane".into(),
                email: email("jane@example.com"),
                password: "1234".into(),
            })
            .await
            .expect("registration failed")
    }

    #[tokio::test]
    async fn login_binds_session() {
        let (granter, sessions) = make_granter();
        let registered = register(&granter).await;
        let session = sessions.attach(None).id;

        let logged_in = granter.login_user(session, &email("jane@example.com"), "1234")
            .await.expect("login failed");
        assert_eq!(logged_in.user, registered);
        assert_ne!(logged_in.session_id, session);
        assert_eq!(sessions.attach(Some(logged_in.session_id)).user, Some(registered.clone()));
        assert!(sessions.attach(Some(session)).is_new, "pre-login session still alive");

        assert_eq!(granter.logout_user(logged_in.session_id).await, Some(registered));
        assert_eq!(sessions.attach(Some(logged_in.session_id)).user, None);
    }

    #[tokio::test]
    async fn failed_logins_leave_session_anonymous() {
        let (granter, sessions) = make_granter();
        register(&granter).await;
        let session = sessions.attach(None).id;

        let err = granter.login_user(session, &email("jane@example.com"), "nope")
            .await.expect_err("should fail");
        assert!(matches!(err, AccessGranterError::InvalidCredentials), "wrong error: {err:#?}");
        let err = granter.login_user(session, &email("john@example.com"), "1234")
            .await.expect_err("should fail");
        assert!(matches!(err, AccessGranterError::UnknownUser), "wrong error: {err:#?}");
        let attached = sessions.attach(Some(session));
        assert!(!attached.is_new);
        assert_eq!(attached.user, None);
    }

    #[tokio::test]
    async fn double_registration_fails() {
        let (granter, _) = make_granter();
        register(&granter).await;
        let err = granter
            .register_user(NewUser {
                name: "Other Jane".into(),
                email: email("jane@example.com"),
                password: "5678".into(),
            })
            .await
            .expect_err("should fail");
        assert!(matches!(err, AccessGranterError::AlreadyRegistered), "wrong error: {err:#?}");
    }
}
