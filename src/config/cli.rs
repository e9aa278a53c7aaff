use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the booksapp binary.
#[derive(Debug, Parser)]
#[command(name = "booksapp", version, about = "Render a books catalog as an HTML table")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BOOKSAPP_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the rendered books page over HTTP.
    Serve(Box<ServeArgs>),
    /// Render the books page once and write it out.
    Render(RenderArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct PageOverrides {
    /// Override the books catalog path (`-` reads standard input).
    #[arg(long = "books", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub books_path: Option<PathBuf>,

    /// Override the heading shown above the table.
    #[arg(long = "heading", value_name = "TEXT")]
    pub heading: Option<String>,

    /// Override the document title.
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub page: PageOverrides,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub page: PageOverrides,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Write the markup to this file instead of standard output.
    #[arg(long = "output", short = 'o', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Emit only the table container instead of a full HTML document.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub fragment: bool,
}
