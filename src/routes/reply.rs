use std::sync::Arc;
use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Redirect, Responder};
use rocket::Request;
use rocket_dyn_templates::Template;
use serde::Serialize;
use serde_json::{Map, Value};
use crate::access_granter::AccessGranterError;
use crate::session_storage::{Flash, SessionStorage};
use crate::storage::StorageError;
use crate::routes::visit::attached_visit;

/// What a handler wants done with the request.
#[derive(Debug)]
pub enum Reply {
    Render(View),
    Redirect {
        to: &'static str,
        flash: Option<Flash>,
    },
    Error(ErrorKind),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
}

/// A template name plus the data it's rendered with.
#[derive(Debug)]
pub struct View {
    template: &'static str,
    context: Map<String, Value>,
}

impl View {
    pub fn new(template: &'static str) -> Self {
        View {
            template,
            context: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.context.insert(key.to_owned(), value);
            },
            Err(e) => error!("cannot pass \"{key}\" to \"{}\": {e}", self.template),
        }
        self
    }

}

impl Reply {
    pub fn redirect(to: &'static str) -> Self {
        Reply::Redirect {
            to,
            flash: None,
        }
    }

    pub fn redirect_with(to: &'static str, flash: Flash) -> Self {
        Reply::Redirect {
            to,
            flash: Some(flash),
        }
    }
}

impl From<View> for Reply {
    fn from(value: View) -> Self {
        Reply::Render(value)
    }
}

impl ErrorKind {
    pub fn status(self) -> Status {
        match self {
            ErrorKind::Internal => Status::InternalServerError,
        }
    }
}

impl From<StorageError> for Reply {
    fn from(e: StorageError) -> Self {
        error!("idea storage failure: {e}");
        Reply::Error(ErrorKind::Internal)
    }
}

impl From<AccessGranterError> for Reply {
    fn from(e: AccessGranterError) -> Self {
        error!("authentication failure: {e}");
        Reply::Error(ErrorKind::Internal)
    }
}

impl<'r> Responder<'r, 'static> for Reply {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let visit = attached_visit(req);
        match self {
            Reply::Render(view) => {
                let View { template, context } = view
                    .with("flash", visit.map(|v| &v.flash))
                    .with("user", visit.and_then(|v| v.session.user.as_ref()));
                Template::render(template, Value::Object(context)).respond_to(req)
            },
            Reply::Redirect { to, flash } => {
                if let Some(flash) = flash {
                    let sessions = req.rocket().state::<Arc<SessionStorage>>();
                    match (sessions, visit) {
                        (Some(sessions), Some(visit)) => sessions.queue_flash(visit.session.id, flash),
                        _ => warn!("no session to queue {flash:?} in"),
                    }
                }
                Redirect::to(to).respond_to(req)
            },
            Reply::Error(kind) => Err(kind.status()),
        }
    }
}
