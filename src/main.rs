use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use iexpense::{run, Command, Config, ExpenseStore, FileStore, KeyValueStore, MemoryStore};

#[derive(Parser)]
#[command(name = "iexpense", version, about = "Track expenses in a local store")]
struct Cli {
    /// Directory holding the saved expense list
    #[arg(long, env = "IEXPENSE_DATA_DIR", default_value = iexpense::config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Storage key the expense list is saved under
    #[arg(long, env = "IEXPENSE_KEY", default_value = iexpense::config::DEFAULT_KEY)]
    key: String,

    /// Currency code shown in front of amounts
    #[arg(long, env = "IEXPENSE_CURRENCY", default_value = iexpense::config::DEFAULT_CURRENCY)]
    currency: String,

    /// Keep expenses in memory only; nothing is read or written on disk
    #[arg(long)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run_cli() {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config {
        data_dir: cli.data_dir,
        key: cli.key,
        currency: cli.currency,
    };

    if cli.in_memory {
        execute(MemoryStore::new(), cli.command, &config)
    } else {
        execute(FileStore::new(&config.data_dir), cli.command, &config)
    }
}

fn execute<S>(backend: S, command: Command, config: &Config) -> anyhow::Result<()>
where
    S: KeyValueStore,
{
    let mut store = ExpenseStore::open(backend, config.key.as_str());
    run(command, &mut store, config, io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["iexpense", "list"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from(iexpense::config::DEFAULT_DATA_DIR));
        assert_eq!(cli.key, "Items");
        assert_eq!(cli.currency, "USD");
        assert!(!cli.in_memory);
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::try_parse_from([
            "iexpense",
            "--data-dir",
            "/tmp/expenses",
            "--key",
            "Work",
            "--currency",
            "EUR",
            "--in-memory",
            "clear",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/expenses"));
        assert_eq!(cli.key, "Work");
        assert_eq!(cli.currency, "EUR");
        assert!(cli.in_memory);
        assert_eq!(cli.command, Command::Clear);
    }

    #[test]
    fn test_remove_requires_positions() {
        assert!(Cli::try_parse_from(["iexpense", "remove"]).is_err());
    }

    #[test]
    fn test_remove_keeps_given_positions() {
        let cli = Cli::try_parse_from(["iexpense", "--in-memory", "remove", "2", "0"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Remove {
                positions: vec![2, 0]
            }
        );
    }

    #[test]
    fn test_add_parses_decimal_amount() {
        let cli = Cli::try_parse_from(["iexpense", "add", "Coffee", "Food", "3.50"]).unwrap();
        match cli.command {
            Command::Add {
                name,
                category,
                amount,
            } => {
                assert_eq!(name, "Coffee");
                assert_eq!(category, "Food");
                assert_eq!(amount.to_string(), "3.50");
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_add_rejects_non_numeric_amount() {
        assert!(Cli::try_parse_from(["iexpense", "add", "Coffee", "Food", "cheap"]).is_err());
    }

    #[test]
    fn test_execute_in_memory_leaves_no_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("unused"),
            ..Config::default()
        };
        execute(MemoryStore::new(), Command::Clear, &config).unwrap();
        assert!(!config.data_dir.exists());
    }
}
