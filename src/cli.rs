use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "job-board", about = "REST API for job postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Keep jobs in process memory instead of Postgres
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
    /// Load jobs from a JSON array file
    Seed {
        file: PathBuf,
        /// Delete every existing job first
        #[arg(long)]
        reset: bool,
    },
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Serve { in_memory: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["job-board"]).unwrap();
        assert_eq!(cli.command(), Command::Serve { in_memory: false });
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["job-board", "serve", "--in-memory"]).unwrap();
        assert_eq!(cli.command(), Command::Serve { in_memory: true });

        let cli = Cli::try_parse_from(["job-board", "seed", "jobs.json", "--reset"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Seed {
                file: PathBuf::from("jobs.json"),
                reset: true
            }
        );

        assert!(Cli::try_parse_from(["job-board", "seed"]).is_err());
    }
}
