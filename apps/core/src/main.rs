// PrepBot Entry Point
// Intent-based job interview preparation chatbot

mod brain;
mod config;
mod error;
mod fs_manager;
mod models;
mod preflight;
mod session;
mod translator;

#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use brain::{Chatbot, IntentStore, Language};
use clap::{Parser, Subcommand};
use config::{LogFormat, Settings};
use session::ChatLog;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

const TITLE: &str = "Job Interview Preparation Chatbot";
const SUBTITLE: &str = "Intents-Based Chatbot using NLP";
const ABOUT: &str = "This chatbot assists users in preparing for job interviews by providing tips, \
answering common questions, and offering advice. It utilizes NLP, machine learning, and \
multilingual support for an interactive experience.";

/// PrepBot - practice job interview questions with an intent-based chatbot
#[derive(Parser)]
#[command(name = "prepbot", version, about)]
struct Cli {
    /// Path to the intents JSON catalog
    #[arg(short, long)]
    intents: Option<PathBuf>,

    /// Language code or name (en, es, fr, hi, de, zh-cn)
    #[arg(short, long)]
    language: Option<String>,

    /// Seed for reproducible response selection
    #[arg(long)]
    seed: Option<u64>,

    /// Classifier iteration cap
    #[arg(long)]
    max_iter: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive conversation (default)
    Chat,
    /// Answer a single message and exit
    Ask {
        /// The message to answer
        text: String,
        /// Print the whole turn record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the intents of the catalog
    Intents,
    /// Validate the catalog and the trained classifier
    Check,
    /// Describe the chatbot
    About,
}

impl Cli {
    /// Log format, known before the rest of the settings are read
    fn log_format(&self) -> anyhow::Result<LogFormat> {
        if self.json_logs {
            return Ok(LogFormat::Json);
        }
        Ok(config::log_format_from_env()?)
    }

    /// Flags win over environment values
    fn apply(&self, settings: &mut Settings) -> anyhow::Result<()> {
        if let Some(path) = &self.intents {
            settings.intents_path = path.clone();
        }
        if let Some(lang) = &self.language {
            settings.language = lang.parse()?;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(max_iter) = self.max_iter {
            settings.max_iter = max_iter;
        }
        settings.validate()?;
        Ok(())
    }
}

fn init_tracing(format: LogFormat, verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_bot(settings: &Settings) -> anyhow::Result<Chatbot> {
    let store = IntentStore::load(&settings.intents_path)?;
    let bot = Chatbot::train(store, settings).context("failed to train the classifier")?;
    Ok(bot)
}

/// Commands understood inside the chat loop
#[derive(Debug, PartialEq, Eq)]
enum ChatCommand {
    Quit,
    History,
    Transcript,
    About,
    Languages,
    SetLanguage(String),
    Message(String),
}

impl ChatCommand {
    fn parse(input: &str) -> Self {
        let mut parts = input.splitn(2, char::is_whitespace);
        match parts.next().unwrap_or_default() {
            "/quit" | "/exit" => ChatCommand::Quit,
            "/history" => ChatCommand::History,
            "/transcript" => ChatCommand::Transcript,
            "/about" => ChatCommand::About,
            "/languages" => ChatCommand::Languages,
            "/lang" => ChatCommand::SetLanguage(parts.next().unwrap_or_default().trim().to_string()),
            _ => ChatCommand::Message(input.to_string()),
        }
    }
}

async fn run_chat(bot: &Chatbot, mut language: Language) -> anyhow::Result<()> {
    let mut log = ChatLog::new();
    info!("Conversation {} started in {}", log.id(), language);

    println!("{}\n{}", TITLE, SUBTITLE);
    println!("Type a message, or /history, /transcript, /lang <code>, /languages, /about, /quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match ChatCommand::parse(input) {
            ChatCommand::Quit => break,
            ChatCommand::History => println!("{}\n", log.render_history()),
            ChatCommand::Transcript => println!("{}\n", log.render_transcript()),
            ChatCommand::About => println!("{}\n", ABOUT),
            ChatCommand::Languages => {
                for lang in Language::ALL {
                    println!("  {:<6} {}", lang.code(), lang.name());
                }
                println!();
            }
            ChatCommand::SetLanguage(raw) => match raw.parse::<Language>() {
                Ok(lang) => {
                    language = lang;
                    println!("Language set to {}.\n", language);
                }
                Err(e) => println!("{}\n", e),
            },
            ChatCommand::Message(text) => {
                log.push_user(text.as_str());
                let reply = bot.respond(&text, language).await;
                println!("Bot: {}\n", reply);
                log.push_bot(reply);
            }
        }
    }

    info!(
        "Conversation {} ended after {} messages",
        log.id(),
        log.entries().len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format()?, cli.verbose);

    let mut settings = Settings::from_env().context("invalid PREPBOT_* environment")?;
    cli.apply(&mut settings)?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::About => println!("{}\n\n{}", TITLE, ABOUT),
        Command::Intents => {
            let store = IntentStore::load(&settings.intents_path)?;
            for intent in store.iter() {
                println!(
                    "{:<28} {:>3} patterns  {:>2} responses",
                    intent.tag,
                    intent.patterns.len(),
                    intent.responses.len()
                );
            }
        }
        Command::Check => {
            let report = preflight::run_preflight(&settings);
            for check in &report.checks {
                let mark = if check.passed {
                    "ok  "
                } else if check.warning_only {
                    "warn"
                } else {
                    "FAIL"
                };
                println!("[{}] {}: {}", mark, check.name, check.message);
                if let Some(details) = &check.details {
                    println!("       {}", details);
                }
            }
            println!("{}", report.summary);
            if !report.ready_to_start {
                bail!("preflight checks failed");
            }
        }
        Command::Ask { text, json } => {
            let bot = load_bot(&settings)?;
            let packet = bot.process(&text, settings.language).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&packet)?);
            } else {
                println!("{}", packet.reply);
            }
        }
        Command::Chat => {
            let bot = load_bot(&settings)?;
            run_chat(&bot, settings.language).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod chat_command_tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ChatCommand::parse("/quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/exit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/history"), ChatCommand::History);
        assert_eq!(ChatCommand::parse("/transcript"), ChatCommand::Transcript);
        assert_eq!(
            ChatCommand::parse("/lang  fr"),
            ChatCommand::SetLanguage("fr".to_string())
        );
        assert_eq!(ChatCommand::parse("/lang"), ChatCommand::SetLanguage(String::new()));
    }

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            ChatCommand::parse("how do I answer salary questions?"),
            ChatCommand::Message("how do I answer salary questions?".to_string())
        );
    }

    #[test]
    fn test_cli_flags_override_settings() {
        let cli = Cli::parse_from(["prepbot", "--language", "es", "--seed", "9", "--json-logs", "check"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings).unwrap();
        assert_eq!(settings.language, Language::Spanish);
        assert_eq!(settings.seed, Some(9));
        assert!(matches!(cli.command, Some(Command::Check)));
    }

    #[test]
    fn test_log_format_resolved_before_settings() {
        temp_env::with_var(config::ENV_LOG_FORMAT, Some("json"), || {
            let cli = Cli::parse_from(["prepbot", "about"]);
            assert_eq!(cli.log_format().unwrap(), LogFormat::Json);
        });
        temp_env::with_var(config::ENV_LOG_FORMAT, Some("pretty"), || {
            let cli = Cli::parse_from(["prepbot", "--json-logs", "about"]);
            assert_eq!(cli.log_format().unwrap(), LogFormat::Json);
        });
        temp_env::with_var(config::ENV_LOG_FORMAT, Some("xml"), || {
            let cli = Cli::parse_from(["prepbot", "about"]);
            assert!(cli.log_format().is_err());
        });
    }

    #[test]
    fn test_cli_rejects_zero_max_iter() {
        let cli = Cli::parse_from(["prepbot", "--max-iter", "0"]);
        let mut settings = Settings::default();
        assert!(cli.apply(&mut settings).is_err());
    }
}
