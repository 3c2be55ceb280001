use rocket::{get, routes, Route};
use crate::routes::interceptor::PAGES;
use crate::routes::{Reply, View, Visit};

pub const APP_TITLE: &str = "Jot-A-Thought";

#[get("/")]
fn index(visit: Visit) -> Result<Reply, Reply> {
    PAGES.admit(visit)?;
    Ok(View::new("index").with("title", APP_TITLE).into())
}

#[get("/about")]
fn about(visit: Visit) -> Result<Reply, Reply> {
    PAGES.admit(visit)?;
    Ok(View::new("about").into())
}

pub fn page_routes() -> Vec<Route> {
    routes![
        index,
        about,
    ]
}
