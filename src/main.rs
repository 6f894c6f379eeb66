use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sizewatch::cmd;
use std::path::PathBuf;
use std::process;

/// Bundle size budgets for build artifacts
///
/// sizewatch measures your build output, compares it with the last build of
/// your base branch and fails CI when a file grows past its budget.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure configured files and check them against their budgets
    Check {
        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Branch name (defaults to the current git branch)
        #[arg(long)]
        branch: Option<String>,

        /// Commit SHA (defaults to git HEAD)
        #[arg(long, value_name = "SHA")]
        commit: Option<String>,

        /// Target branch of a pull request build
        #[arg(long)]
        base_branch: Option<String>,

        /// Skip commit records and only check budgets
        #[arg(long)]
        local: bool,
    },

    /// Compare two measurement files
    Diff {
        /// Current measurements (JSON with "files" and "groups")
        #[arg(value_name = "CURRENT")]
        current: PathBuf,

        /// Baseline measurements
        #[arg(short, long, value_name = "BASE")]
        base: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a starter .sizewatch.toml
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Some(Commands::Check {
            json,
            output,
            branch,
            commit,
            base_branch,
            local,
        }) => cmd::cmd_check(&cmd::CheckOptions {
            json,
            output,
            branch,
            commit,
            base_branch,
            local,
        }),
        Some(Commands::Diff {
            current,
            base,
            json,
        }) => cmd::cmd_diff(&current, base.as_deref(), json),
        Some(Commands::Init) => cmd::cmd_init(),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("sizewatch v{}", env!("CARGO_PKG_VERSION"));
            println!("Bundle size budgets for build artifacts\n");
            println!("Usage: sizewatch <COMMAND>\n");
            println!("Commands:");
            println!("  check        Measure configured files and check budgets");
            println!("  diff         Compare two measurement files");
            println!("  init         Create a starter .sizewatch.toml");
            println!("  completions  Generate shell completions");
            println!("\nRun 'sizewatch <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use sizewatch::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }
}
