#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use domain::models::SessionStoreBox;
use domain::models::Transport;
use infrastructure::stores::StoreManager;
use infrastructure::transports::http::HttpTransport;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::SessionController;
use crate::domain::services::Themes;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Tablebook has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

fn open_store() -> Result<SessionStoreBox> {
    let ephemeral = Config::get(ConfigKey::Ephemeral) == "true";
    let state_file = Config::get(ConfigKey::StateFile);

    match StoreManager::get(ephemeral, &state_file) {
        Ok(store) => return Ok(store),
        Err(err) => {
            tracing::warn!(error = ?err, state_file = %state_file, "Unable to open state file, keeping state in memory");
            return StoreManager::get(true, &state_file);
        }
    }
}

fn build_session(transport: &HttpTransport) -> Result<SessionController> {
    let config_error = transport.validate().err();
    if let Some(err) = &config_error {
        tracing::warn!(error = %err, "Booking service is not configured");
    }

    let default_theme = Themes::resolve(
        &Config::get(ConfigKey::Theme),
        env::var("COLORFGBG").ok(),
    );

    return Ok(SessionController::new(
        Config::session_settings()?,
        open_store()?,
        config_error,
        default_theme,
    ));
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("TABLEBOOK_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(|| return env::temp_dir())
            .join("tablebook")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("tablebook")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready = match cli::parse().await {
        Ok(ready) => ready,
        Err(ready_err) => {
            handle_error(ready_err);
            return;
        }
    };
    if !ready {
        process::exit(0);
    }

    let transport = HttpTransport::new(Config::transport_config());
    let session = match build_session(&transport) {
        Ok(session) => session,
        Err(session_err) => {
            handle_error(session_err);
            return;
        }
    };

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(Box::new(transport), event_tx, &mut action_rx).await;
    });

    let ui_future = ui::start(action_tx, event_rx, session);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(join_err)) => Err(join_err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if let Err(err) = res {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
