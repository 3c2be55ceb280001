use std::str::FromStr;
use log::{debug, info};
use rocket::form::Form;
use rocket::{delete, get, post, put, routes, FromForm, Route, State};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use crate::data::{Idea, IdeaContents, IdeaId, KnownUser};
use crate::routes::interceptor::{IDEAS, NOT_AUTHORIZED};
use crate::routes::{Reply, View, Visit};
use crate::session_storage::Flash;
use crate::storage::IdeaStorage;
use crate::util::OptionStrExt;

pub const IDEAS_PATH: &str = "/ideas";

pub const TITLE_MISSING: &str = "Please add a title";
pub const DETAILS_MISSING: &str = "Please add some details";
pub const IDEA_NOT_FOUND: &str = "Idea note not found";

#[derive(Debug, FromForm)]
struct IdeaForm {
    title: Option<String>,
    details: Option<String>,
}

impl IdeaForm {
    /// One message per missing field, in form order.
    fn validate(&self) -> Result<IdeaContents, Vec<&'static str>> {
        match (self.title.nonblank(), self.details.nonblank()) {
            (Some(title), Some(details)) => Ok(IdeaContents { title, details }),
            (title, details) => Err(
                [
                    title.is_none().then_some(TITLE_MISSING),
                    details.is_none().then_some(DETAILS_MISSING),
                ]
                    .into_iter()
                    .flatten()
                    .collect()
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct IdeaView<'a> {
    id: String,
    title: &'a str,
    details: &'a str,
    created_at: String,
}

impl<'a> From<&'a Idea> for IdeaView<'a> {
    fn from(idea: &'a Idea) -> Self {
        let created_at = idea.created_at
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
            .or_else(|_| idea.created_at.format(&Rfc3339))
            .unwrap_or_default();
        IdeaView {
            id: idea.id.to_string(),
            title: &idea.title,
            details: &idea.details,
            created_at,
        }
    }
}

#[get("/")]
async fn index(
    visit: Visit,
    storage: &State<IdeaStorage>,
) -> Result<Reply, Reply> {
    let context = IDEAS.admit(visit)?;
    let ideas = storage.list_ideas(context.user()?.id).await?;
    Ok(
        View::new("ideas/index")
            .with("ideas", ideas.iter().map(IdeaView::from).collect::<Vec<_>>())
            .into()
    )
}

#[get("/add")]
fn add(visit: Visit) -> Result<Reply, Reply> {
    IDEAS.admit(visit)?;
    Ok(View::new("ideas/add").into())
}

#[get("/edit/<id>")]
async fn edit(
    id: &str,
    visit: Visit,
    storage: &State<IdeaStorage>,
) -> Result<Reply, Reply> {
    let context = IDEAS.admit(visit)?;
    let idea = owned_idea(storage, context.user()?, id).await?;
    Ok(View::new("ideas/edit").with("idea", IdeaView::from(&idea)).into())
}

#[post("/", data = "<form>")]
async fn create(
    visit: Visit,
    form: Form<IdeaForm>,
    storage: &State<IdeaStorage>,
) -> Result<Reply, Reply> {
    let context = IDEAS.admit(visit)?;
    let user = context.user()?;
    let contents = form.validate()
        .map_err(|errors|
            View::new("ideas/add")
                .with("errors", errors)
                .with("title", &form.title)
                .with("details", &form.details)
        )?;
    let idea = storage.create_idea(user.id, contents).await?;
    info!("user {} added idea {}", user.id, idea.id);
    Ok(Reply::redirect_with(IDEAS_PATH, Flash::success_msg("Idea note added")))
}

#[put("/<id>", data = "<form>")]
async fn update(
    id: &str,
    visit: Visit,
    form: Form<IdeaForm>,
    storage: &State<IdeaStorage>,
) -> Result<Reply, Reply> {
    let context = IDEAS.admit(visit)?;
    let idea = owned_idea(storage, context.user()?, id).await?;
    let contents = form.validate()
        .map_err(|errors| {
            let submitted = Idea {
                title: form.title.clone().unwrap_or_default(),
                details: form.details.clone().unwrap_or_default(),
                ..idea.clone()
            };
            View::new("ideas/edit")
                .with("errors", errors)
                .with("idea", IdeaView::from(&submitted))
        })?;
    let updated = Idea {
        title: contents.title,
        details: contents.details,
        ..idea
    };
    storage.update_idea(&updated).await?;
    info!("idea {} updated", updated.id);
    Ok(Reply::redirect_with(IDEAS_PATH, Flash::success_msg("Idea note updated")))
}

#[delete("/<id>")]
async fn remove(
    id: &str,
    visit: Visit,
    storage: &State<IdeaStorage>,
) -> Result<Reply, Reply> {
    let context = IDEAS.admit(visit)?;
    let user = context.user()?;
    if let Ok(id) = IdeaId::from_str(id) {
        match storage.read_idea(id).await? {
            Some(idea) if !idea.is_owned_by(user.id) => return Err(not_owner(user, &idea)),
            Some(_) => {
                storage.delete_idea(id).await?;
                info!("idea {id} removed");
            },
            None => debug!("idea {id} is already gone"),
        }
    } else {
        debug!("\"{id}\" is not an idea id, nothing to remove");
    }
    Ok(Reply::redirect_with(IDEAS_PATH, Flash::success_msg("Idea note removed")))
}

/// Reads the idea, answering with a redirect back to the list if it's
/// missing or belongs to someone else.
async fn owned_idea(
    storage: &IdeaStorage,
    user: &KnownUser,
    id: &str,
) -> Result<Idea, Reply> {
    let idea = match IdeaId::from_str(id) {
        Ok(id) => storage.read_idea(id).await?,
        Err(_) => None,
    };
    match idea {
        None => {
            debug!("idea \"{id}\" not found");
            Err(Reply::redirect_with(IDEAS_PATH, Flash::error_msg(IDEA_NOT_FOUND)))
        },
        Some(idea) if !idea.is_owned_by(user.id) => Err(not_owner(user, &idea)),
        Some(idea) => Ok(idea),
    }
}

fn not_owner(user: &KnownUser, idea: &Idea) -> Reply {
    debug!("user {} doesn't own idea {}", user.id, idea.id);
    Reply::redirect_with(IDEAS_PATH, Flash::error_msg(NOT_AUTHORIZED))
}

pub fn idea_routes() -> Vec<Route> {
    routes![
        index,
        add,
        edit,
        create,
        update,
        remove,
    ]
}
