use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use pdfx_sandbox::application::chain::ChainStore;
use pdfx_sandbox::application::interpreter::Interpreter;
use pdfx_sandbox::application::library::{self, PRESETS};
use pdfx_sandbox::application::payments::PaymentStore;
use pdfx_sandbox::application::runner::SandboxRunner;
use pdfx_sandbox::domain::ports::{ClockRef, KeyValueStoreRef};
use pdfx_sandbox::infrastructure::clock::SystemClock;
use pdfx_sandbox::infrastructure::in_memory::InMemoryKeyValueStore;
use pdfx_sandbox::infrastructure::pacing::FixedDelay;
use pdfx_sandbox::interfaces::console::ConsoleHandlers;
use pdfx_sandbox::interfaces::csv::ledger_writer::LedgerWriter;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_DEBUG_ERROR: &str = "TypeError: Cannot read properties of null (reading 'data')";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent storage (optional). Uses RocksDB when built with
    /// the `storage-rocksdb` feature, JSON files otherwise.
    #[arg(long, global = true, env = "PDFX_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interpret a script and apply its effects
    Run {
        #[command(flatten)]
        source: ScriptSource,

        /// Delay before each effect, in milliseconds
        #[arg(long, default_value_t = 0, env = "PDFX_DELAY_MS")]
        delay_ms: u64,
    },
    /// Print the plan for a script without applying it
    Plan {
        #[command(flatten)]
        source: ScriptSource,
    },
    /// Ask the mock debugger about a failing script
    Debug {
        #[command(flatten)]
        source: ScriptSource,

        /// Error message reported by the script
        #[arg(long, default_value = DEFAULT_DEBUG_ERROR)]
        error: String,
    },
    /// List the built-in demo scripts
    Presets,
    /// Inspect or reset the mock chain
    Chain {
        #[command(subcommand)]
        action: ChainAction,
    },
    /// Inspect or settle mock payment sessions
    Payments {
        #[command(subcommand)]
        action: PaymentAction,
    },
}

#[derive(Args)]
struct ScriptSource {
    /// Script file, or `-` for stdin
    #[arg(required_unless_present = "preset", conflicts_with = "preset")]
    script: Option<PathBuf>,

    /// Use a built-in demo script instead of a file
    #[arg(long)]
    preset: Option<String>,
}

#[derive(Subcommand)]
enum ChainAction {
    /// Print all events as CSV, newest first
    List,
    /// Remove all events
    Clear,
}

#[derive(Subcommand)]
enum PaymentAction {
    /// Print all sessions as CSV, newest first
    List,
    /// Mark a pending session as paid
    Confirm { id: String },
    /// Mark a pending session as failed
    Fail { id: String },
    /// Remove all sessions
    Clear,
}

impl ScriptSource {
    fn load(&self) -> Result<String> {
        if let Some(id) = &self.preset {
            let preset = library::find(id).ok_or_else(|| miette!("Unknown preset: {id}"))?;
            return Ok(preset.code.to_string());
        }
        match self.script.as_deref() {
            Some(path) if path == Path::new("-") => {
                let mut script = String::new();
                io::stdin().read_to_string(&mut script).into_diagnostic()?;
                Ok(script)
            }
            Some(path) => std::fs::read_to_string(path).into_diagnostic(),
            None => Err(miette!("No script given")),
        }
    }
}

fn open_backing(db_path: Option<PathBuf>) -> Result<KeyValueStoreRef> {
    match db_path {
        Some(db_path) => open_persistent(&db_path),
        None => Ok(Arc::new(InMemoryKeyValueStore::new())),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent(db_path: &Path) -> Result<KeyValueStoreRef> {
    use pdfx_sandbox::infrastructure::rocksdb::RocksDBStore;

    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent(db_path: &Path) -> Result<KeyValueStoreRef> {
    use pdfx_sandbox::infrastructure::json_file::JsonFileStore;

    eprintln!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to JSON file storage."
    );
    let store = JsonFileStore::open(db_path).into_diagnostic()?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let backing = open_backing(cli.db_path)?;
    let clock: ClockRef = Arc::new(SystemClock);
    let runner = SandboxRunner::new(
        Interpreter::new(clock.clone()),
        PaymentStore::new(backing.clone(), clock.clone()),
        ChainStore::new(backing, clock),
    );

    match cli.command {
        Command::Run { source, delay_ms } => {
            let script = source.load()?;
            let console = ConsoleHandlers::new(io::stdout());
            if script.trim().is_empty() {
                console
                    .println("Error: Cannot run an empty script.")
                    .into_diagnostic()?;
                return Err(miette!("Cannot run an empty script"));
            }

            console
                .println(&format!(
                    "Interpreting script with MockAI Runtime...\n---\n{script}\n---"
                ))
                .into_diagnostic()?;
            let runner = runner.with_pacer(Arc::new(FixedDelay::from_millis(delay_ms)));
            runner.run(&script, &console).await;
            console
                .println("--- MockAI interpretation finished ---")
                .into_diagnostic()?;
        }
        Command::Plan { source } => {
            let script = source.load()?;
            let plan = runner.interpreter().interpret(&script);
            let rendered = serde_json::to_string_pretty(&plan).into_diagnostic()?;
            println!("{rendered}");
        }
        Command::Debug { source, error } => {
            let script = source.load()?;
            if script.trim().is_empty() {
                ConsoleHandlers::new(io::stdout())
                    .println("Error: Cannot debug an empty script.")
                    .into_diagnostic()?;
                return Err(miette!("Cannot debug an empty script"));
            }
            let advice = runner.interpreter().debug(&script, &error);
            println!("{}", advice.to_markdown());
        }
        Command::Presets => {
            for preset in PRESETS {
                println!("{}\t{}\t{}", preset.id, preset.name, preset.description);
            }
        }
        Command::Chain { action } => match action {
            ChainAction::List => {
                let events = runner.chain().list().await.into_diagnostic()?;
                LedgerWriter::new(io::stdout().lock())
                    .write_events(&events)
                    .into_diagnostic()?;
            }
            ChainAction::Clear => runner.chain().clear().await.into_diagnostic()?,
        },
        Command::Payments { action } => match action {
            PaymentAction::List => {
                let sessions = runner.payments().list().await.into_diagnostic()?;
                LedgerWriter::new(io::stdout().lock())
                    .write_sessions(&sessions)
                    .into_diagnostic()?;
            }
            PaymentAction::Confirm { id } => {
                let console = ConsoleHandlers::new(io::stdout());
                let confirmed = runner.confirm_payment(&id, &console).await.into_diagnostic()?;
                if confirmed.is_none() {
                    return Err(miette!("No pending payment session {id}"));
                }
            }
            PaymentAction::Fail { id } => {
                match runner.payments().fail_session(&id).await.into_diagnostic()? {
                    Some(session) => println!("> Payment {} marked as failed.", session.id),
                    None => return Err(miette!("No pending payment session {id}")),
                }
            }
            PaymentAction::Clear => runner.payments().clear().await.into_diagnostic()?,
        },
    }

    Ok(())
}
