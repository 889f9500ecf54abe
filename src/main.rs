use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::{Parser, Subcommand};
use serde_json::Value;

use sign_reader::app::{drain_ui_events, AppState, UiEvent};
use sign_reader::{
    BackendClient, Config, JsonFileStore, RequestError, DEFAULT_BACKEND_URL, DEFAULT_CAMERA,
    DEFAULT_TIMEOUT_MS,
};

#[derive(Debug, Parser)]
#[command(name = "sign-reader", version, about = "Talk to a sign-language recognition backend")]
struct Cli {
    /// Backend URL for this run only (not persisted)
    #[arg(long, env = "SIGN_READER_BACKEND_URL")]
    backend_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "SIGN_READER_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Settings file holding the saved backend URL
    #[arg(long, env = "SIGN_READER_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether the backend is reachable
    Health,
    /// Print the video feed URL for a camera
    VideoUrl {
        #[arg(long, default_value_t = DEFAULT_CAMERA)]
        camera: u32,
    },
    /// Print the accumulated text
    Text,
    /// Clear the accumulated text
    Clear,
    /// Remove the last accumulated character
    Backspace,
    /// Save a new backend URL for future runs
    SetUrl { url: String },
    /// Print the backend URL in effect
    ShowUrl,
    /// Poll the accumulated text and print it whenever it changes
    Watch {
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: u64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("sign-reader starting: {cli:?}");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> ExitCode {
    let store = match cli.settings {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location(),
    };
    let settings_path = store.path().to_path_buf();
    let config = Config::new(DEFAULT_BACKEND_URL, cli.timeout_ms);
    let mut client = match BackendClient::new(config, store) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let events_rx = client.subscribe();

    client.load_backend_url();
    if let Some(url) = &cli.backend_url {
        client.config_mut().set_base_url(url);
    }

    let mut state = AppState::new();
    let code = match cli.command {
        Command::Health => {
            if client.probe_health().await {
                println!("online");
                ExitCode::SUCCESS
            } else {
                println!("offline");
                ExitCode::FAILURE
            }
        }
        Command::VideoUrl { camera } => {
            println!("{}", client.video_feed_url(camera));
            ExitCode::SUCCESS
        }
        Command::Text => print_json(client.fetch_text().await),
        Command::Clear => print_json(client.clear_text().await),
        Command::Backspace => print_json(client.backspace_text().await),
        Command::SetUrl { url } => match client.set_backend_url(&url) {
            Ok(()) => {
                println!("{}", client.config().base_url());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!(
                    "Failed to save backend URL to {}: {e}",
                    settings_path.display()
                );
                ExitCode::FAILURE
            }
        },
        Command::ShowUrl => {
            println!("{}", client.config().base_url());
            ExitCode::SUCCESS
        }
        Command::Watch { interval_ms } => {
            watch(&client, &events_rx, &mut state, Duration::from_millis(interval_ms)).await;
            return ExitCode::SUCCESS;
        }
    };

    drain_ui_events(&mut state, &events_rx, Instant::now());
    render_banner(&state);
    code
}

fn print_json(result: Result<Value, RequestError>) -> ExitCode {
    match result {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        // The failure itself is reported through the error banner.
        Err(_) => ExitCode::FAILURE,
    }
}

async fn watch(
    client: &BackendClient,
    events: &async_channel::Receiver<UiEvent>,
    state: &mut AppState,
    interval: Duration,
) {
    log::info!("Watching {} every {} ms", client.config().base_url(), interval.as_millis());
    let mut ticker = tokio::time::interval(interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let fetched = tokio::select! {
            _ = &mut shutdown => break,
            fetched = async {
                ticker.tick().await;
                client.fetch_text().await
            } => fetched,
        };

        if let Ok(body) = fetched {
            if state.record_text(body.clone()) {
                println!("[{}] {}", Local::now().format("%H:%M:%S"), display_text(&body));
            }
        }

        if let Some(message) = refresh_banner(state, events, Instant::now()) {
            eprintln!("error: {message}");
        }
    }
}

/// Apply queued events and expire the banner. Returns a message that has
/// just appeared and should be rendered.
fn refresh_banner(
    state: &mut AppState,
    events: &async_channel::Receiver<UiEvent>,
    now: Instant,
) -> Option<String> {
    let before = state.banner.visible_message(now).map(str::to_owned);
    drain_ui_events(state, events, now);
    let current = state.banner.visible_message(now).map(str::to_owned);
    if state.banner.hide_expired(now) {
        log::info!("Error banner cleared");
    }

    if current.is_some() && current != before {
        current
    } else {
        None
    }
}

/// Prefer a top-level `text` field; fall back to the raw JSON.
fn display_text(body: &Value) -> String {
    match body.get("text").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => body.to_string(),
    }
}

fn render_banner(state: &AppState) {
    if let Some(message) = state.banner.visible_message(Instant::now()) {
        eprintln!("error: {message}");
    }
}
