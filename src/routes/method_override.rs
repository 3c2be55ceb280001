use std::str::FromStr;
use async_trait::async_trait;
use log::{debug, trace};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Method;
use rocket::{Data, Request};

pub const METHOD_OVERRIDE_PARAM: &str = "_method";

/// Lets plain HTML forms reach `PUT` and `DELETE` routes through a
/// `?_method=` query parameter. A leading `_method` form field is already
/// handled by rocket itself.
pub struct MethodOverride;

#[async_trait]
impl Fairing for MethodOverride {
    fn info(&self) -> Info {
        Info {
            name: "method override",
            kind: Kind::Request,
        }
    }

    async fn on_request(
        &self,
        req: &mut Request<'_>,
        _data: &mut Data<'_>,
    ) {
        if req.method() != Method::Post {
            return;
        }
        let Some(method) = overriding_method(req) else {
            return;
        };
        debug!("overriding POST {} with {method}", req.uri());
        req.set_method(method);
    }
}

fn overriding_method(req: &Request<'_>) -> Option<Method> {
    let requested = req.query_value::<&str>(METHOD_OVERRIDE_PARAM)?.ok()?;
    match Method::from_str(&requested.to_ascii_uppercase()) {
        Ok(method @ (Method::Put | Method::Patch | Method::Delete)) => Some(method),
        _ => {
            trace!("ignoring method override to \"{requested}\"");
            None
        },
    }
}
