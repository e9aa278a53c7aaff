use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    application::{
        error::HttpError,
        pages::{PageService, RenderMode},
    },
    presentation::views::render_html_response,
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub pages: Arc<PageService>,
}

impl HttpState {
    pub fn new(pages: PageService) -> Self {
        Self {
            pages: Arc::new(pages),
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/books/table", get(books_table_partial))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    render_books(&state, RenderMode::Page).await
}

async fn books_table_partial(State(state): State<HttpState>) -> Response {
    render_books(&state, RenderMode::Fragment).await
}

async fn render_books(state: &HttpState, mode: RenderMode) -> Response {
    match state.pages.load_and_render(mode).await {
        Ok(html) => render_html_response(html, StatusCode::OK),
        Err(err) => err.into_response(),
    }
}

async fn fallback(uri: Uri) -> Response {
    HttpError::new(
        "infra::http::public::fallback",
        StatusCode::NOT_FOUND,
        "Not found",
        format!("no route for `{}`", uri.path()),
    )
    .into_response()
}
