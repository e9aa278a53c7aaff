//! Loading the books catalog from a JSON document.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::domain::books::BookRecord;

/// Where the catalog is read from. A path of `-` selects standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooksSource {
    Stdin,
    File(PathBuf),
}

impl BooksSource {
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }
}

impl fmt::Display for BooksSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooksSource::Stdin => f.write_str("<stdin>"),
            BooksSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read books from `{origin}`")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse books from `{origin}`")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode a JSON array of book records. Record order is preserved.
pub fn parse_books(bytes: &[u8], origin: &str) -> Result<Vec<BookRecord>, CatalogError> {
    serde_json::from_slice(bytes).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })
}

pub async fn load_books(source: &BooksSource) -> Result<Vec<BookRecord>, CatalogError> {
    let origin = source.to_string();
    let bytes = match source {
        BooksSource::File(path) => tokio::fs::read(path).await,
        BooksSource::Stdin => {
            let mut buffer = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buffer)
                .await
                .map(|_| buffer)
        }
    }
    .map_err(|source| CatalogError::Read {
        origin: origin.clone(),
        source,
    })?;

    let books = parse_books(&bytes, &origin)?;
    debug!(origin = %origin, count = books.len(), "loaded books catalog");
    Ok(books)
}
