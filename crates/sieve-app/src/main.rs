use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sieve_config::{LinkScheme, SourceKind};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub mod controller;
pub mod events;
pub mod profile;

use self::controller::SieveController;
use self::events::{
    handle_glossary, handle_prefs_set, handle_prefs_show, handle_sieve_file,
    handle_strip_furigana,
};
use self::profile::load_preferences;

#[derive(Parser, Debug)]
#[command(name = "kanji-sieve", version, about = "Vocabulary extraction for Japanese texts")]
struct Cli {
    /// Preference profile to load and save
    #[arg(long, global = true, default_value = "kanji_sieve.json")]
    profile: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, classify and look up the vocabulary of a text file
    Sieve {
        file: PathBuf,
        /// Dictionary site the report links to
        #[arg(long)]
        link: Option<LinkScheme>,
        /// Skip a lookup source for this run
        #[arg(long)]
        disable: Vec<SourceKind>,
        /// Leave the grade breakdown out of the report
        #[arg(long)]
        no_grades: bool,
    },
    /// Look up a word list, one word per line
    Glossary {
        wordlist: PathBuf,
        #[arg(long)]
        link: Option<LinkScheme>,
    },
    /// Remove furigana lines from OCR output
    StripFurigana {
        file: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show or change saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    Show,
    Set { key: String, value: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("SIEVE_LOG_JSON").is_ok_and(|v| v == "1");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(atty::is(atty::Stream::Stderr)),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("run", id = %run_id);
    let _guard = span.enter();

    let prefs = load_preferences(&cli.profile)?;

    match cli.command {
        Command::Sieve {
            file,
            link,
            disable,
            no_grades,
        } => {
            let mut prefs = prefs;
            if let Some(link) = link {
                prefs = prefs.with_link(link);
            }
            for kind in disable {
                prefs = prefs.with_source(kind, false);
            }
            if no_grades {
                prefs = prefs.with_grades(false);
            }

            tracing::info!(file = %file.display(), "sieving");
            let artifacts = handle_sieve_file(&file, &SieveController::new(&prefs))?;
            for path in artifacts.written() {
                println!("{}", path.display());
            }
            if artifacts.report.is_err() {
                print!("{}", artifacts.markdown);
            }
            let failed = artifacts.failures().count();
            if failed > 0 {
                anyhow::bail!("{failed} output file(s) could not be written");
            }
        }
        Command::Glossary { wordlist, link } => {
            let prefs = match link {
                Some(link) => prefs.with_link(link),
                None => prefs,
            };
            tracing::info!(wordlist = %wordlist.display(), "building glossary");
            let path = handle_glossary(&wordlist, &SieveController::new(&prefs))?;
            println!("{}", path.display());
        }
        Command::StripFurigana { file, output } => {
            let path = handle_strip_furigana(&file, output.as_deref(), &prefs)?;
            println!("{}", path.display());
        }
        Command::Prefs { action } => match action {
            PrefsAction::Show => print!("{}", handle_prefs_show(&prefs)),
            PrefsAction::Set { key, value } => {
                handle_prefs_set(&cli.profile, &key, &value)?;
            }
        },
    }

    tracing::info!("done");
    Ok(())
}
