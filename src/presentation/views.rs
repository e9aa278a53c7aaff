use crate::domain::books::{BookId, BookRecord};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Column labels of the header row, in display order.
pub const HEADER_LABELS: [&str; 3] = ["Title", "Author", "Description"];

/// Heading shown above the table when none is configured.
pub const DEFAULT_HEADING: &str = "My books";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

pub fn render_html_response(html: String, status: StatusCode) -> Response {
    (status, Html(html)).into_response()
}

/// One data row of the books table, borrowed from the record it projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRowView<'a> {
    /// Stable row identifier for host bookkeeping; not part of the markup.
    pub key: &'a BookId,
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
}

impl<'a> BookRowView<'a> {
    pub fn from_record(record: &'a BookRecord) -> Self {
        Self {
            key: &record.id,
            title: &record.title,
            author: &record.author,
            description: &record.description,
        }
    }

    /// Cell values in column order.
    pub fn cells(&self) -> [&'a str; 3] {
        [self.title, self.author, self.description]
    }
}

/// Render tree of the books table: heading, fixed header row and one row per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooksTableView<'a> {
    pub heading: &'a str,
    pub header: [&'static str; 3],
    pub rows: Vec<BookRowView<'a>>,
}

impl BooksTableView<'_> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Project `books` into a table view. Rows keep input order; nothing is filtered or sorted.
pub fn books_table<'a>(heading: &'a str, books: &'a [BookRecord]) -> BooksTableView<'a> {
    BooksTableView {
        heading,
        header: HEADER_LABELS,
        rows: books.iter().map(BookRowView::from_record).collect(),
    }
}

#[derive(Template)]
#[template(path = "partials/books_table.html")]
pub struct BooksTablePartial<'a> {
    pub view: BooksTableView<'a>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub view: BooksTableView<'a>,
}
