use std::{path::Path, process};

use booksapp::{
    application::{
        catalog::load_books,
        error::AppError,
        pages::{PageConfig, PageService, RenderMode},
    },
    config,
    infra::{
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use tokio::io::AsyncWriteExt;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Render(args) => run_render(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let pages = PageService::new(PageConfig::from(&settings.page));
    let router = http::build_router(HttpState::new(pages));

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;

    info!(
        addr = %settings.server.addr,
        books = %settings.page.books_path.display(),
        "serving books page"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let pages = PageService::new(PageConfig::from(&settings.page));
    let mode = if args.fragment {
        RenderMode::Fragment
    } else {
        RenderMode::Page
    };

    let books = load_books(&pages.config().books).await?;
    let html = pages.render(&books, mode)?;

    match args.output.as_deref() {
        Some(path) => write_output(path, &html).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(html.as_bytes())
                .await
                .map_err(InfraError::from)?;
            stdout.write_all(b"\n").await.map_err(InfraError::from)?;
            stdout.flush().await.map_err(InfraError::from)?;
        }
    }

    info!(rows = books.len(), mode = mode.as_str(), "rendered books");
    Ok(())
}

async fn write_output(path: &Path, html: &str) -> Result<(), InfraError> {
    if let Ok(metadata) = tokio::fs::metadata(path).await
        && metadata.is_dir()
    {
        return Err(InfraError::configuration(format!(
            "output path `{}` is a directory",
            path.display()
        )));
    }

    tokio::fs::write(path, html).await?;
    info!(path = %path.display(), "wrote rendered markup");
    Ok(())
}
