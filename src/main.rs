use clap::Parser;
use protoform::adapters::file_set_client::{FileSetSource, HttpFileSetSource, StaticFileSetSource};
use protoform::adapters::form_handler::{FormPageService, FormState};
use protoform::adapters::health_handler::HealthHandler;
use protoform::adapters::html_renderer::{method_action, HtmlRenderer};
use protoform::cli::{Cli, Command, OutputFormat};
use protoform::config::Settings;
use protoform::form::FormBuilder;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    match cli.command.clone() {
        Command::Render {
            service,
            method,
            file_set,
            format,
        } => render(&settings, &service, &method, file_set.as_deref(), format).await,
        Command::List { file_set } => list(&settings, file_set.as_deref()).await,
        Command::Serve => serve(settings).await,
    }
}

/// Pick the file-set source and the service path it is queried with
fn source_for(
    settings: &Settings,
    file_set: Option<&Path>,
) -> anyhow::Result<(Arc<dyn FileSetSource>, String)> {
    let service_path = settings.source.service_path.clone();
    let source: Arc<dyn FileSetSource> = match (file_set, &service_path) {
        (Some(path), _) => Arc::new(StaticFileSetSource::from_path(path)?),
        (None, Some(_)) => Arc::new(HttpFileSetSource::new()),
        (None, None) => anyhow::bail!("Either --file-set or --service-path is required"),
    };
    Ok((source, service_path.unwrap_or_default()))
}

async fn render(
    settings: &Settings,
    service_name: &str,
    method_name: &str,
    file_set: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (source, service_path) = source_for(settings, file_set)?;
    let service = FormPageService::new(source, FormBuilder::new(settings.form.clone()));
    let outcome = service
        .method_form(&service_path, service_name, method_name)
        .await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Html => {
            let renderer = HtmlRenderer::new()?;
            let action = method_action(&service_path, method_name);
            print!("{}", renderer.render_form(&action, &outcome, &HashSet::new())?);
        }
    }
    Ok(())
}

async fn list(settings: &Settings, file_set: Option<&Path>) -> anyhow::Result<()> {
    let (source, service_path) = source_for(settings, file_set)?;
    let service = FormPageService::new(source, FormBuilder::new(settings.form.clone()));

    for entry in service.methods(&service_path).await? {
        println!("{}.{}\t{}", entry.service, entry.method, entry.request_type);
    }
    Ok(())
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let host = settings.server.host.clone();
    let port = settings.server.port;
    info!("Starting Protoform on {}:{}", host, port);

    let settings = Arc::new(settings);
    let form_state = FormState {
        service: Arc::new(FormPageService::new(
            Arc::new(HttpFileSetSource::new()),
            FormBuilder::new(settings.form.clone()),
        )),
        renderer: Arc::new(HtmlRenderer::new()?),
        source: settings.source.clone(),
    };
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));

    let app = protoform::create_app(health_handler, form_state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
