#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SessionStore;
use crate::domain::models::StoreSlot;
use crate::domain::models::Theme;
use crate::domain::services::actions::help_text;
use crate::infrastructure::stores::StoreManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Prints what is persisted for the current conversation.
fn print_conversation() -> Result<()> {
    let store = StoreManager::get(false, &Config::get(ConfigKey::StateFile))?;
    let lines = StoreSlot::iter()
        .map(|slot| {
            let value = store.get(slot).unwrap_or_else(|| return "(not set)".to_string());
            return format!("{slot}: {value}");
        })
        .collect::<Vec<String>>();

    println!("{}", lines.join("\n"));
    return Ok(());
}

fn reset_conversation() -> Result<()> {
    let mut store = StoreManager::get(false, &Config::get(ConfigKey::StateFile))?;
    store.clear(StoreSlot::ConversationId)?;
    println!("Forgot the current conversation. The next chat starts fresh.");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_conversation() -> Command {
    return Command::new("conversation")
        .about("Inspect or forget the persisted conversation.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show").about("Print the persisted conversation id and theme."),
        )
        .subcommand(
            Command::new("reset")
                .about("Forget the persisted conversation id so the next chat starts with a fresh greeting."),
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for Tablebook")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Tablebook with environment variable RUST_LOG=tablebook")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        )
        .subcommand(
            Command::new("state-path").about("Output path to the file holding the persisted conversation.")
        );

    return cmd;
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .long(ConfigKey::ApiURL.to_string())
        .env(ConfigKey::ApiURL.env_var())
        .num_args(1)
        .help("URL of the booking service chat endpoint.")
        .global(true);
}

fn arg_api_token() -> Arg {
    return Arg::new(ConfigKey::ApiToken.to_string())
        .long(ConfigKey::ApiToken.to_string())
        .env(ConfigKey::ApiToken.env_var())
        .num_args(1)
        .hide_env_values(true)
        .help("Bearer token sent to the booking service.")
        .global(true);
}

fn arg_theme() -> Arg {
    return Arg::new(ConfigKey::Theme.to_string())
        .short('t')
        .long(ConfigKey::Theme.to_string())
        .env(ConfigKey::Theme.env_var())
        .num_args(1)
        .help("Starting theme when none was saved. Defaults to the terminal background if it can be detected, otherwise dark.")
        .value_parser(PossibleValuesParser::new(Theme::VARIANTS))
        .global(true);
}

fn arg_duplicate_window() -> Arg {
    return Arg::new(ConfigKey::DuplicateWindow.to_string())
        .long(ConfigKey::DuplicateWindow.to_string())
        .env(ConfigKey::DuplicateWindow.env_var())
        .num_args(1)
        .help(format!(
            "Milliseconds during which an identical submission is ignored. [default: {}]",
            Config::default(ConfigKey::DuplicateWindow)
        ))
        .global(true);
}

fn arg_confirmation_pattern() -> Arg {
    return Arg::new(ConfigKey::ConfirmationPattern.to_string())
        .long(ConfigKey::ConfirmationPattern.to_string())
        .env(ConfigKey::ConfirmationPattern.env_var())
        .num_args(1)
        .help(format!(
            "Regular expression matched against the latest reply to detect a confirmed booking. [default: {}]",
            Config::default(ConfigKey::ConfirmationPattern)
        ))
        .global(true);
}

fn arg_state_file() -> Arg {
    return Arg::new(ConfigKey::StateFile.to_string())
        .long(ConfigKey::StateFile.to_string())
        .env(ConfigKey::StateFile.env_var())
        .num_args(1)
        .help(format!(
            "File where the conversation id and theme are saved between runs. [default: {}]",
            Config::default(ConfigKey::StateFile)
        ))
        .global(true);
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start chatting with the booking service. This is the default command.")
        .arg(
            Arg::new(ConfigKey::Ephemeral.to_string())
                .long(ConfigKey::Ephemeral.to_string())
                .help("Keep the conversation id and theme in memory only, nothing is saved.")
                .action(ArgAction::SetTrue),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:")
                || line.starts_with("HOTKEYS:")
                || line.starts_with("CHIPS:")
            {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("tablebook")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_conversation())
        .subcommand(subcommand_debug())
        .arg(arg_api_url())
        .arg(arg_api_token())
        .arg(arg_theme())
        .arg(arg_duplicate_window())
        .arg(arg_confirmation_pattern())
        .arg(arg_state_file())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env(ConfigKey::ConfigFile.env_var())
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

async fn load_chat_config(matches: &ArgMatches, chat_matches: Option<&ArgMatches>) -> Result<()> {
    let mut all_matches = vec![matches];
    if let Some(chat_matches) = chat_matches {
        all_matches.push(chat_matches);
    }

    Config::load(build(), all_matches).await?;

    let ephemeral = chat_matches
        .map(|chat_matches| return chat_matches.get_flag(&ConfigKey::Ephemeral.to_string()))
        .unwrap_or(false);
    if ephemeral {
        Config::set(ConfigKey::Ephemeral, "true");
    }

    return Ok(());
}

/// Parses arguments and runs one-shot subcommands. Returns true when the
/// chat UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(|| return path::PathBuf::from("."))
                        .join("tablebook/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                Some(("state-path", _)) => {
                    Config::load(build(), vec![&matches, debug_matches]).await?;
                    println!("{}", Config::get(ConfigKey::StateFile));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            load_chat_config(&matches, Some(subcmd_matches)).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("conversation", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("show", _)) => {
                    print_conversation()?;
                }
                Some(("reset", _)) => {
                    reset_conversation()?;
                }
                _ => {
                    subcommand_conversation().print_long_help()?;
                }
            }

            return Ok(false);
        }
        _ => {
            load_chat_config(&matches, None).await?;
        }
    }

    return Ok(true);
}
