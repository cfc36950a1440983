//! HTML views

use crate::error::AppError;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use blog_core::Post;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub notices: Vec<String>,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostPage {
    pub notices: Vec<String>,
    pub post: Post,
}

/// Create form; `title`/`content` echo a rejected submission.
#[derive(Template)]
#[template(path = "create.html")]
pub struct CreatePage {
    pub notices: Vec<String>,
    pub title: String,
    pub content: String,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditPage {
    pub notices: Vec<String>,
    pub post: Post,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub notices: Vec<String>,
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

/// Generic 404 page.
pub fn not_found() -> Response {
    let page = NotFoundPage { notices: vec![] };
    match page.render() {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not-found page: {}", e);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
