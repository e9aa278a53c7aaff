//! Rendering the books page from the current catalog.

use metrics::counter;
use tracing::{debug, instrument};

use crate::{
    application::{
        catalog::{BooksSource, load_books},
        error::AppError,
    },
    config::PageSettings,
    domain::books::BookRecord,
    presentation::views::{
        BooksTablePartial, IndexTemplate, TemplateRenderError, books_table, render_template,
    },
};

pub(crate) const METRIC_RENDER_TOTAL: &str = "booksapp_render_total";
pub(crate) const METRIC_RENDERED_ROWS_TOTAL: &str = "booksapp_rendered_rows_total";

/// Whether to emit a complete HTML document or only the table container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Page,
    Fragment,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Page => "page",
            RenderMode::Fragment => "fragment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub heading: String,
    pub title: String,
    pub books: BooksSource,
}

impl From<&PageSettings> for PageConfig {
    fn from(settings: &PageSettings) -> Self {
        Self {
            heading: settings.heading.clone(),
            title: settings.title.clone(),
            books: BooksSource::from_path(&settings.books_path),
        }
    }
}

pub struct PageService {
    config: PageConfig,
}

impl PageService {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Render `books` without touching the catalog.
    pub fn render(
        &self,
        books: &[BookRecord],
        mode: RenderMode,
    ) -> Result<String, TemplateRenderError> {
        let view = books_table(&self.config.heading, books);
        let rows = view.row_count();

        let html = match mode {
            RenderMode::Page => render_template(IndexTemplate {
                title: &self.config.title,
                view,
            })?,
            RenderMode::Fragment => render_template(BooksTablePartial { view })?,
        };

        counter!(METRIC_RENDER_TOTAL, "mode" => mode.as_str()).increment(1);
        counter!(METRIC_RENDERED_ROWS_TOTAL).increment(rows as u64);
        debug!(mode = mode.as_str(), rows, "rendered books table");

        Ok(html)
    }

    /// Reload the catalog and render it. Nothing is cached between calls.
    #[instrument(skip(self), fields(source = %self.config.books))]
    pub async fn load_and_render(&self, mode: RenderMode) -> Result<String, AppError> {
        let books = load_books(&self.config.books).await?;
        Ok(self.render(&books, mode)?)
    }
}
