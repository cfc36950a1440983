//! Post handlers
//!
//! Every handler runs inside its own span (scoped by `#[instrument]`, so it
//! closes on every return path) and records [`BT_NAME`] with a fixed label
//! once the storage call has succeeded.

use crate::error::AppError;
use crate::extractors::{Notices, PostId};
use crate::flash;
use crate::views::{self, CreatePage, EditPage, IndexPage, PostPage};
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use blog_core::{BlogError, Post, PostDraft, PostStore};
use tracing::{field::Empty, info, instrument, Span};

/// Span attribute naming the business transaction a handler served
pub const BT_NAME: &str = "appdynamics.bt.name";

fn mark(label: &'static str) {
    Span::current().record(BT_NAME, label);
}

#[instrument(name = "get-blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
async fn get_post(store: &dyn PostStore, id: i64) -> Result<Post, AppError> {
    let post = store.fetch_one(id).await?;
    mark("get-blog-post");
    Ok(post)
}

#[instrument(name = "index", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn index(State(state): State<AppState>, notices: Notices) -> Result<Response, AppError> {
    let posts = state.store.fetch_all().await?;
    mark("index");

    let expire_cookie = notices.has_cookie();
    let page = views::render(&IndexPage {
        notices: notices.into_vec(),
        posts,
    })?
    .into_response();

    Ok(if expire_cookie { flash::clear(page) } else { page })
}

#[instrument(name = "blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn show(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Response, AppError> {
    let post = get_post(state.store.as_ref(), id).await?;
    mark("blog-post");

    Ok(views::render(&PostPage {
        notices: vec![],
        post,
    })?
    .into_response())
}

#[instrument(name = "create-blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn create_form() -> Result<Response, AppError> {
    mark("create_blog_post");

    Ok(views::render(&CreatePage {
        notices: vec![],
        title: String::new(),
        content: String::new(),
    })?
    .into_response())
}

#[instrument(name = "create-blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn create(
    State(state): State<AppState>,
    Form(draft): Form<PostDraft>,
) -> Result<Response, AppError> {
    match draft.clone().validate() {
        Ok(valid) => {
            let id = state.store.insert(&valid).await?;
            mark("create_blog_post");
            info!(post_id = id, "Post created");
            Ok(flash::redirect("/", &[]))
        }
        Err(BlogError::Validation(notice)) => {
            mark("create_blog_post");
            Ok(views::render(&CreatePage {
                notices: vec![notice],
                title: draft.title,
                content: draft.content,
            })?
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(name = "edit-blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn edit_form(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Response, AppError> {
    let post = get_post(state.store.as_ref(), id).await?;
    mark("edit_blog_post");

    Ok(views::render(&EditPage {
        notices: vec![],
        post,
    })?
    .into_response())
}

#[instrument(name = "edit-blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn edit(
    State(state): State<AppState>,
    PostId(id): PostId,
    Form(draft): Form<PostDraft>,
) -> Result<Response, AppError> {
    let post = get_post(state.store.as_ref(), id).await?;

    match draft.validate() {
        Ok(valid) => {
            state.store.update(id, &valid).await?;
            mark("edit_blog_post");
            info!(post_id = id, "Post updated");
            Ok(flash::redirect("/", &[]))
        }
        Err(BlogError::Validation(notice)) => {
            mark("edit_blog_post");
            Ok(views::render(&EditPage {
                notices: vec![notice],
                post,
            })?
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(name = "delete-blog-post", skip_all, fields(appdynamics.bt.name = Empty))]
pub async fn delete(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Response, AppError> {
    let post = get_post(state.store.as_ref(), id).await?;
    state.store.delete(id).await?;
    mark("delete-blog-post");
    info!(post_id = id, "Post deleted");

    Ok(flash::redirect(
        "/",
        &[format!("\"{}\" was successfully deleted!", post.title)],
    ))
}
