use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;
use ideas::idea_routes;
use pages::page_routes;
use users::user_routes;

mod ideas;
mod interceptor;
mod method_override;
mod pages;
mod reply;
mod users;
mod visit;

pub use interceptor::{ensure_authenticated, Interceptor, Pipeline};
pub use method_override::MethodOverride;
pub use reply::{ErrorKind, Reply, View};
pub use visit::{RequestContext, Visit};

pub trait WebRocketBuildExt {
    fn install_jotathought_web(self) -> Self;
}

impl WebRocketBuildExt for Rocket<Build> {
    fn install_jotathought_web(self) -> Self {
        self
            .attach(Template::fairing())
            .attach(MethodOverride)
            .mount("/", page_routes())
            .mount("/ideas", idea_routes())
            .mount("/users", user_routes())
    }
}
