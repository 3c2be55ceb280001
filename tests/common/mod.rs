use std::error::Error;
use std::path::PathBuf;
use assert_fs::TempDir;
use figment::Figment;
use jotathought::app_setup::build_rocket;
use jotathought::config::figment::FigmentExt;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::{Client, LocalResponse};

pub const TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
pub const SECRET_KEY: &str = "8c6b0f3d5a2e4f7192a1b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f7a8";

pub const SESSION_COOKIE: &str = "jotathought_session";

pub const PASSWORD: &str = "1234";

pub fn test_figment(dir: &TempDir) -> Figment {
    Figment::from(rocket::Config::debug_default())
        .setup_app_defaults()
        .merge(("template_dir", TEMPLATE_DIR))
        .merge(("secret_key", SECRET_KEY))
        .merge(("log_level", "off"))
        .merge(("data_directory", dir.path()))
        .merge(("user_db", dir.path().join("users.toml")))
        .merge(("argon2_m_cost", 64))
        .merge(("argon2_t_cost", 1))
        .merge(("argon2_p_cost", 1))
}

pub async fn client(dir: &TempDir) -> Result<Client, Box<dyn Error>> {
    Ok(Client::tracked(build_rocket(test_figment(dir))?).await?)
}

pub async fn post_form<'c>(
    client: &'c Client,
    uri: impl Into<String>,
    body: &str,
) -> LocalResponse<'c> {
    client.post(uri.into())
        .header(ContentType::Form)
        .body(body)
        .dispatch()
        .await
}

pub async fn get_page(client: &Client, uri: impl Into<String>) -> String {
    let response = client.get(uri.into()).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    response.into_string().await.unwrap_or_default()
}

pub fn assert_redirect(response: &LocalResponse<'_>, to: &str) {
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some(to));
}

pub async fn register(client: &Client, name: &str, email: &str) {
    let response = post_form(
        client,
        "/users/register",
        &format!("name={name}&email={email}&password={PASSWORD}&password2={PASSWORD}"),
    ).await;
    assert_redirect(&response, "/users/login");
}

pub async fn login(client: &Client, email: &str) {
    let response = post_form(
        client,
        "/users/login",
        &format!("email={email}&password={PASSWORD}"),
    ).await;
    assert_redirect(&response, "/ideas");
}

pub async fn logout(client: &Client) {
    let response = client.get("/users/logout").dispatch().await;
    assert_redirect(&response, "/users/login");
}

pub async fn register_and_login(client: &Client, name: &str, email: &str) {
    register(client, name, email).await;
    login(client, email).await;
    // drop the registration flash
    get_page(client, "/ideas").await;
}

/// Ids of the ideas currently on disk.
pub fn stored_ideas(dir: &TempDir) -> Vec<String> {
    let ideas_dir: PathBuf = dir.path().join("ideas");
    let Ok(entries) = std::fs::read_dir(ideas_dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            entry.file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(".toml"))
                .filter(|id| !id.contains(".tmp."))
                .map(str::to_owned)
        })
        .collect()
}
