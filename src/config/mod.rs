//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::presentation::views::DEFAULT_HEADING;

mod cli;

pub use cli::{
    CliArgs, Command, LoggingOverrides, PageOverrides, RenderArgs, ServeArgs, ServeOverrides,
};


const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "booksapp";
const ENV_PREFIX: &str = "BOOKSAPP";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BOOKS_PATH: &str = "books.json";
const STDIN_BOOKS_PATH: &str = "-";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub page: PageSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub heading: String,
    pub title: String,
    pub books_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    resolve(raw, cli.command.as_ref())
}

/// Apply the command's CLI overrides on top of the file/env layers and validate.
fn resolve(mut raw: RawSettings, command: Option<&Command>) -> Result<Settings, LoadError> {
    let serving = match command {
        Some(Command::Serve(args)) => {
            raw.apply_serve_overrides(&args.overrides);
            true
        }
        Some(Command::Render(args)) => {
            raw.apply_page_overrides(&args.page);
            raw.apply_logging_overrides(&args.logging);
            false
        }
        None => {
            raw.apply_serve_overrides(&ServeOverrides::default());
            true
        }
    };

    let settings = Settings::from_raw(raw)?;

    // The server re-reads the catalog per request; stdin can only be consumed once.
    if serving && settings.page.books_path.as_os_str() == STDIN_BOOKS_PATH {
        return Err(LoadError::invalid(
            "books.path",
            "standard input cannot be served; point the server at a file",
        ));
    }

    Ok(settings)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    page: RawPageSettings,
    books: RawBooksSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        self.apply_page_overrides(&overrides.page);
        self.apply_logging_overrides(&overrides.logging);
    }

    fn apply_page_overrides(&mut self, overrides: &PageOverrides) {
        if let Some(path) = overrides.books_path.as_ref() {
            self.books.path = Some(path.clone());
        }
        if let Some(heading) = overrides.heading.as_ref() {
            self.page.heading = Some(heading.clone());
        }
        if let Some(title) = overrides.title.as_ref() {
            self.page.title = Some(title.clone());
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            page,
            books,
        } = raw;

        let server = build_server_settings(server)?;
        let logging = build_logging_settings(logging)?;
        let page = build_page_settings(page, books)?;

        Ok(Self {
            server,
            logging,
            page,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid("server.port", "port must be greater than zero"));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    Ok(ServerSettings { addr })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_page_settings(
    page: RawPageSettings,
    books: RawBooksSettings,
) -> Result<PageSettings, LoadError> {
    let heading = page.heading.unwrap_or_else(|| DEFAULT_HEADING.to_string());
    if heading.trim().is_empty() {
        return Err(LoadError::invalid("page.heading", "must not be blank"));
    }

    let title = page
        .title
        .and_then(|value| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| heading.clone());

    let books_path = books.path.unwrap_or_else(|| PathBuf::from(DEFAULT_BOOKS_PATH));
    if books_path.as_os_str().is_empty() {
        return Err(LoadError::invalid("books.path", "must not be empty"));
    }

    Ok(PageSettings {
        heading,
        title,
        books_path,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPageSettings {
    heading: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBooksSettings {
    path: Option<PathBuf>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
