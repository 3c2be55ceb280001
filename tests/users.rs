use std::error::Error;
use assert_fs::TempDir;
use rocket::http::Status;
use crate::common::*;

mod common;

#[tokio::test]
async fn landing_and_about_pages() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = client(&dir).await?;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let cookie = response.headers().get_one("Set-Cookie").unwrap_or_default().to_owned();
    assert!(cookie.starts_with("jotathought_session="), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(response.into_string().await.unwrap_or_default().contains("Jot-A-Thought"));

    assert!(get_page(&client, "/about").await.contains("About"));
    assert_eq!(client.get("/nowhere").dispatch().await.status(), Status::NotFound);
    Ok(())
}

#[tokio::test]
async fn register_login_logout() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = client(&dir).await?;

    register(&client, "Jane", "Jane@Example.com").await;
    let body = get_page(&client, "/users/login").await;
    assert!(body.contains("You are now registered and can log in"), "{body}");
    let users = std::fs::read_to_string(dir.path().join("users.toml"))?;
    assert!(users.contains("jane@example.com"), "{users}");
    assert!(!users.contains(PASSWORD), "{users}");

    login(&client, "jane@example.com").await;
    let body = get_page(&client, "/ideas").await;
    assert!(body.contains("Jane"), "{body}");

    logout(&client).await;
    let body = get_page(&client, "/users/login").await;
    assert!(body.contains("You are logged out"), "{body}");
    let response = client.get("/ideas").dispatch().await;
    assert_redirect(&response, "/users/login");
    Ok(())
}

#[tokio::test]
async fn login_issues_a_new_session_cookie() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = client(&dir).await?;
    register(&client, "Jane", "jane@example.com").await;
    let session_value = |client: &rocket::local::asynchronous::Client| client.cookies()
        .get_private(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned());

    let before = session_value(&client).expect("no session before login");
    login(&client, "jane@example.com").await;
    let after = session_value(&client).expect("no session after login");
    assert_ne!(before, after, "session id survived login");
    assert!(get_page(&client, "/ideas").await.contains("Jane"));

    logout(&client).await;
    assert_eq!(session_value(&client), Some(after), "logout shouldn't rotate the session");
    Ok(())
}

#[test]
fn test_secret_key_is_usable() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let config = rocket::Config::try_from(test_figment(&dir))?;
    assert!(!config.secret_key.is_zero());
    Ok(())
}

#[tokio::test]
async fn login_failures() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = client(&dir).await?;
    register(&client, "Jane", "jane@example.com").await;
    get_page(&client, "/users/login").await;

    let response = post_form(&client, "/users/login", "email=john@example.com&password=1234").await;
    assert_redirect(&response, "/users/login");
    assert!(get_page(&client, "/users/login").await.contains("No user found"));

    let response = post_form(&client, "/users/login", "email=jane@example.com&password=4321").await;
    assert_redirect(&response, "/users/login");
    assert!(get_page(&client, "/users/login").await.contains("Password incorrect"));

    let response = post_form(&client, "/users/login", "email=&password=").await;
    assert_redirect(&response, "/users/login");
    assert!(get_page(&client, "/users/login").await.contains("Missing credentials"));

    let response = client.get("/ideas").dispatch().await;
    assert_redirect(&response, "/users/login");
    Ok(())
}

#[tokio::test]
async fn registration_is_validated() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = client(&dir).await?;

    let response = post_form(
        &client,
        "/users/register",
        "name=Jane&email=jane@example.com&password=q7z&password2=q7y",
    ).await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap_or_default();
    assert!(body.contains("Passwords do not match"), "{body}");
    assert!(body.contains("Password must be at least 4 characters"), "{body}");
    assert!(body.contains("jane@example.com"), "email wasn't kept: {body}");
    assert!(!body.contains("q7z"), "password was echoed: {body}");
    assert!(!dir.path().join("users.toml").exists());
    Ok(())
}

#[tokio::test]
async fn email_can_only_be_registered_once() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = client(&dir).await?;
    register(&client, "Jane", "jane@example.com").await;

    let response = post_form(
        &client,
        "/users/register",
        "name=Other&email=JANE@example.com&password=5678&password2=5678",
    ).await;
    assert_redirect(&response, "/users/register");
    let body = get_page(&client, "/users/register").await;
    assert!(body.contains("Email already registered"), "{body}");
    Ok(())
}

#[tokio::test]
async fn users_survive_restart() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    {
        let client = client(&dir).await?;
        register(&client, "Jane", "jane@example.com").await;
        login(&client, "jane@example.com").await;
        post_form(&client, "/ideas", "title=Persistent&details=survives").await;
    }

    let client = client(&dir).await?;
    login(&client, "jane@example.com").await;
    assert!(get_page(&client, "/ideas").await.contains("Persistent"));
    Ok(())
}
