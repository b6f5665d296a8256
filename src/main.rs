//! readmate - Reading assistant engine
//!
//! Main entry point for the readmate CLI.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use readmate_assist::{AssistConfig, AssistService, TranslationCache};
use readmate_dom::{Page, Viewport};
use readmate_protocols::{PageContext, types::overlay};
use readmate_provider_openrouter::{OpenRouterConfig, OpenRouterProvider};
use readmate_session::{BatchOutcome, PageController};
use readmate_store::{FileStore, Settings};
use readmate_style::{builtin_theme, theme_css};

mod cli;
mod config;

use cli::{AidKind, Cli, Commands, KeyAction};
use config::AppConfig;

/// Default settings location: `~/.readmate/settings.json`.
fn default_settings_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".readmate").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from(".readmate-settings.json"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

fn build_service(
    config: &AppConfig,
    store: Arc<FileStore>,
) -> Arc<AssistService> {
    let mut provider_config = OpenRouterConfig::default();
    if let Some(base_url) = &config.provider.base_url {
        provider_config.base_url = base_url.clone();
    }
    let provider = Arc::new(OpenRouterProvider::with_config(store.clone(), provider_config));

    let mut assist_config = AssistConfig::default();
    if let Some(model) = &config.provider.model {
        assist_config.model = model.clone();
    }
    if let Some(max_tokens) = config.provider.max_tokens {
        assist_config.max_tokens = max_tokens;
    }

    Arc::new(AssistService::with_config(
        provider,
        store,
        assist_config,
        TranslationCache::new(),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());
    let settings_path = cli.settings.clone().unwrap_or_else(default_settings_path);
    let store = Arc::new(FileStore::new(&settings_path));
    let service = build_service(&config, store.clone());
    let settings = Settings::new(store);

    match cli.command {
        Commands::Translate {
            file,
            lang,
            batch_size,
            output,
        } => {
            let batch_size = config.translate.batch_size.unwrap_or(batch_size);
            run_translate(&service, &file, &lang, batch_size, output.as_deref()).await
        }
        Commands::Theme { file, name, output } => {
            run_theme(&settings, &file, name, output.as_deref()).await
        }
        Commands::Aid {
            kind,
            text,
            title,
            html,
        } => run_aid(&service, kind, &text, title, html).await,
        Commands::Key { action } => run_key(&service, action).await,
    }
}

/// Translate a document's main content, driving the scroll scheduler with a
/// simulated viewport sweep down the page.
async fn run_translate(
    service: &Arc<AssistService>,
    file: &std::path::Path,
    lang: &str,
    batch_size: usize,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !service.has_api_key().await? {
        return Err("API key is not configured; run `readmate key save <key>` first".into());
    }

    let html = std::fs::read_to_string(file)?;
    let page = Page::parse(&html);
    let mut controller =
        PageController::new(page, service.clone()).with_batch_size(batch_size);

    let report = controller.start_translation(lang).await?;
    info!(total = report.total, "translation session started");
    let progress = controller.progress().unwrap_or(report);
    println!("translated {}/{}", progress.translated, progress.total);

    // Sweep the viewport down the document; the scheduler prefetches each
    // next batch as the translated frontier approaches.
    let mut viewport = Viewport::new(800.0, 600.0);
    let sweep_limit = controller.content_height().unwrap_or(0.0) + 2.0 * viewport.height;
    while viewport.scroll_top < sweep_limit {
        match controller.poll_scroll(&viewport).await {
            Some(BatchOutcome::Translated { .. }) => {
                let progress = controller.progress().expect("session exists");
                println!("translated {}/{}", progress.translated, progress.total);
            }
            Some(BatchOutcome::Completed) => {
                println!("translation complete");
                break;
            }
            Some(BatchOutcome::Failed { error }) => {
                return Err(format!("translation failed: {error}").into());
            }
            _ => {}
        }
        viewport.scroll_top += 300.0;
    }

    write_document(controller.page(), output)
}

/// Apply a named theme (or the saved custom theme) to a document. The
/// choice is remembered per document, the way the extension remembers one
/// per domain; omitting the name re-applies the remembered theme.
async fn run_theme(
    settings: &Settings,
    file: &std::path::Path,
    name: Option<String>,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(file)?;
    let page = Page::parse(&html);
    let domain = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let name = match name {
        Some(name) => {
            if name != "default" && builtin_theme(&name).is_none() {
                return Err(format!("unknown theme: {name}").into());
            }
            settings.set_theme_for_domain(&domain, &name).await?;
            name
        }
        None => settings
            .theme_for_domain(&domain)
            .await?
            .unwrap_or_else(|| "default".to_string()),
    };

    if name == "default" {
        page.remove_element_by_id(overlay::THEME_STYLE);
        return write_document(&page, output);
    }

    let mut theme =
        builtin_theme(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
    if name == "custom" {
        if let Some(custom) = settings.custom_theme().await? {
            theme = custom;
        } else {
            warn!("no saved custom theme, using its starting values");
        }
    }

    page.ensure_style(overlay::THEME_STYLE, &theme_css(&theme));
    info!(theme = name, "theme applied");
    write_document(&page, output)
}

async fn run_aid(
    service: &Arc<AssistService>,
    kind: AidKind,
    text: &str,
    title: Option<String>,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = PageContext { title, url: None };
    let result = match kind {
        AidKind::Simplify => service.simplify(text, &context).await?,
        AidKind::Explain => service.explain(text, &context).await?,
        AidKind::Summarize => service.summarize(text, &context).await?,
    };
    if html {
        println!("{}", readmate_style::markdown::render(&result));
    } else {
        println!("{result}");
    }
    Ok(())
}

async fn run_key(
    service: &Arc<AssistService>,
    action: KeyAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        KeyAction::Save { api_key } => {
            service.save_api_key(&api_key).await?;
            println!("API key saved");
        }
        KeyAction::Check => {
            if service.has_api_key().await? {
                println!("API key is configured");
            } else {
                println!("No API key configured");
            }
        }
    }
    Ok(())
}

fn write_document(
    page: &Page,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = page.to_html();
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
            info!(path = %path.display(), "document written");
        }
        None => println!("{html}"),
    }
    Ok(())
}
