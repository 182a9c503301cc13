use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::io;

use crate::config::{self, Config, ConfigPaths, Credentials};
use crate::services::{
    GithubClient, InterestService, PortfolioService, StargazerService, TimelineStyle,
};

/// For catching up on the activity and health of your public GitHub projects
#[derive(Parser)]
#[command(name = "ghportfolio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store your GitHub username and access token
    Setup,

    /// Display overall interest in your profile/portfolio
    #[command(alias = "t")]
    Totals,

    /// Display all public repos under your profile
    #[command(alias = "l")]
    List {
        /// Only show repos with open issues or PRs
        #[arg(long)]
        filter: bool,
    },

    /// Display historical stats on stars, forks, and clones of a project
    #[command(alias = "i")]
    Interest {
        /// Repository name (or owner/name)
        project: String,

        /// Draw sparklines instead of daily counts
        #[arg(long)]
        chart: bool,

        /// Chart the all-time star total instead of the last 30 days
        #[arg(long)]
        totals: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let paths = ConfigPaths::default_location()?;

        if let Commands::Setup = self.command {
            let stdin = io::stdin();
            config::run_setup(&paths, &mut stdin.lock(), &mut io::stdout())
                .context("failed to setup the CLI tool")?;
            return Ok(());
        }

        let (config, credentials) = load_or_setup(&paths)?;
        let client = GithubClient::new(Some(credentials.token.clone()))?;

        match self.command {
            Commands::Setup => Ok(()),
            Commands::Totals => {
                let totals = PortfolioService::new(client, &credentials.username)
                    .totals()
                    .context("Failed to list projects")?;
                println!("{}", totals);
                Ok(())
            }
            Commands::List { filter } => {
                let table = PortfolioService::new(client, &credentials.username)
                    .list(filter)
                    .context("Failed to list projects")?;
                println!("{}", table);
                Ok(())
            }
            Commands::Interest {
                project,
                chart,
                totals,
            } => {
                let full_name = full_repo_name(&credentials.username, &project);
                let stargazers = StargazerService::new(client.clone())
                    .with_page_size(config.page_size)
                    .with_concurrency(config.concurrency)
                    .with_backoff(config.backoff.clone());
                let service = InterestService::new(client, stargazers);
                let today = Local::now().date_naive();

                let style = if chart {
                    TimelineStyle::Sparkline
                } else {
                    TimelineStyle::Counts
                };
                let output = if totals {
                    service.totals(&full_name, today)
                } else {
                    service.timeline(&full_name, today, style)
                };
                println!("{}", output.context("Failed to get project interest info")?);
                Ok(())
            }
        }
    }
}

/// Load credentials, running interactive setup first when they are missing
fn load_or_setup(paths: &ConfigPaths) -> anyhow::Result<(Config, Credentials)> {
    let config = Config::load(paths)?;
    match config.credentials() {
        Ok(credentials) => Ok((config, credentials)),
        Err(e) => {
            eprintln!("{}", e);
            let stdin = io::stdin();
            let credentials = config::run_setup(paths, &mut stdin.lock(), &mut io::stdout())
                .context("failed to setup the CLI tool")?;
            Ok((config, credentials))
        }
    }
}

/// `project` may already be `owner/name`; otherwise it belongs to `username`
fn full_repo_name(username: &str, project: &str) -> String {
    if project.contains('/') {
        project.to_string()
    } else {
        format!("{}/{}", username, project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["ghportfolio"]).is_err());
    }

    #[test]
    fn test_cli_parse_list_filter() {
        let cli = Cli::try_parse_from(["ghportfolio", "list", "--filter"]).unwrap();
        assert!(matches!(cli.command, Commands::List { filter: true }));
    }

    #[test]
    fn test_cli_parse_aliases() {
        let cli = Cli::try_parse_from(["ghportfolio", "t"]).unwrap();
        assert!(matches!(cli.command, Commands::Totals));

        let cli = Cli::try_parse_from(["ghportfolio", "l"]).unwrap();
        assert!(matches!(cli.command, Commands::List { filter: false }));
    }

    #[test]
    fn test_cli_parse_interest_flags() {
        let cli =
            Cli::try_parse_from(["ghportfolio", "i", "dotfiles", "--chart", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Interest {
                project,
                chart,
                totals,
            } => {
                assert_eq!(project, "dotfiles");
                assert!(chart);
                assert!(!totals);
            }
            _ => panic!("expected interest"),
        }
    }

    #[test]
    fn test_cli_interest_requires_project() {
        assert!(Cli::try_parse_from(["ghportfolio", "interest", "--totals"]).is_err());
    }

    #[test]
    fn test_full_repo_name() {
        assert_eq!(full_repo_name("octo", "cat"), "octo/cat");
        assert_eq!(full_repo_name("octo", "rust-lang/rust"), "rust-lang/rust");
    }
}
