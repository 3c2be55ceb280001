use std::str::FromStr;
use log::debug;
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::{get, post, routes, FromForm, Route, State};
use crate::access_granter::{AccessGranter, AccessGranterError};
use crate::email_string::EmailString;
use crate::lib_constants::MIN_PASSWORD_LEN;
use crate::routes::ideas::IDEAS_PATH;
use crate::routes::interceptor::{LOGIN_PATH, USERS};
use crate::routes::visit::set_session_cookie;
use crate::routes::{Reply, View, Visit};
use crate::session_storage::Flash;
use crate::user_db::NewUser;
use crate::util::OptionStrExt;

pub const REGISTER_PATH: &str = "/users/register";

pub const MISSING_CREDENTIALS: &str = "Missing credentials";
pub const NO_USER_FOUND: &str = "No user found";
pub const PASSWORD_INCORRECT: &str = "Password incorrect";

pub const NAME_MISSING: &str = "Please add a name";
pub const EMAIL_MISSING: &str = "Please add an email";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 4 characters";

#[derive(Debug, FromForm)]
struct LoginForm {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, FromForm)]
struct RegisterForm {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    password2: Option<String>,
}

impl RegisterForm {
    fn validate(&self) -> Result<NewUser, Vec<&'static str>> {
        let mut errors = Vec::new();

        let name = self.name.nonblank();
        if name.is_none() {
            errors.push(NAME_MISSING);
        }
        let email = match self.email.nonblank() {
            None => {
                errors.push(EMAIL_MISSING);
                None
            },
            Some(email) => match EmailString::from_str(&email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.push(EMAIL_INVALID);
                    None
                },
            },
        };
        let password = self.password.as_deref().unwrap_or_default();
        if password != self.password2.as_deref().unwrap_or_default() {
            errors.push(PASSWORDS_DIFFER);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(PASSWORD_TOO_SHORT);
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(
                NewUser {
                    name,
                    email,
                    password: password.to_owned(),
                }
            ),
            _ => Err(errors),
        }
    }
}

#[get("/login")]
fn login_form(visit: Visit) -> Result<Reply, Reply> {
    USERS.admit(visit)?;
    Ok(View::new("users/login").into())
}

#[post("/login", data = "<form>")]
async fn login(
    visit: Visit,
    form: Form<LoginForm>,
    cookies: &CookieJar<'_>,
    access_granter: &State<Box<dyn AccessGranter>>,
) -> Result<Reply, Reply> {
    let context = USERS.admit(visit)?;
    let (Some(email), Some(password)) = (
        form.email.nonblank(),
        form.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Ok(Reply::redirect_with(LOGIN_PATH, Flash::error(MISSING_CREDENTIALS)));
    };
    let Ok(email) = EmailString::from_str(&email) else {
        debug!("\"{email}\" can't be a registered email");
        return Ok(Reply::redirect_with(LOGIN_PATH, Flash::error(NO_USER_FOUND)));
    };

    match access_granter.login_user(context.session_id(), &email, password).await {
        Ok(login) => {
            set_session_cookie(cookies, login.session_id);
            Ok(Reply::redirect(IDEAS_PATH))
        },
        Err(AccessGranterError::UnknownUser) => Ok(
            Reply::redirect_with(LOGIN_PATH, Flash::error(NO_USER_FOUND))
        ),
        Err(AccessGranterError::InvalidCredentials) => Ok(
            Reply::redirect_with(LOGIN_PATH, Flash::error(PASSWORD_INCORRECT))
        ),
        Err(e) => Err(e.into()),
    }
}

#[get("/register")]
fn register_form(visit: Visit) -> Result<Reply, Reply> {
    USERS.admit(visit)?;
    Ok(View::new("users/register").into())
}

#[post("/register", data = "<form>")]
async fn register(
    visit: Visit,
    form: Form<RegisterForm>,
    access_granter: &State<Box<dyn AccessGranter>>,
) -> Result<Reply, Reply> {
    USERS.admit(visit)?;
    let new_user = form.validate()
        .map_err(|errors|
            View::new("users/register")
                .with("errors", errors)
                .with("name", &form.name)
                .with("email", &form.email)
        )?;

    match access_granter.register_user(new_user).await {
        Ok(_) => Ok(
            Reply::redirect_with(
                LOGIN_PATH,
                Flash::success_msg("You are now registered and can log in"),
            )
        ),
        Err(AccessGranterError::AlreadyRegistered) => Ok(
            Reply::redirect_with(REGISTER_PATH, Flash::error_msg("Email already registered"))
        ),
        Err(e) => Err(e.into()),
    }
}

#[get("/logout")]
async fn logout(
    visit: Visit,
    access_granter: &State<Box<dyn AccessGranter>>,
) -> Result<Reply, Reply> {
    let context = USERS.admit(visit)?;
    access_granter.logout_user(context.session_id()).await;
    Ok(Reply::redirect_with(LOGIN_PATH, Flash::success_msg("You are logged out")))
}

pub fn user_routes() -> Vec<Route> {
    routes![
        login_form,
        login,
        register_form,
        register,
        logout,
    ]
}
