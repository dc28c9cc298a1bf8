//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use types::{LeagueId, Season, Week};

#[derive(Debug, Parser)]
#[clap(name = "ffl-roundup", version, about = "Weekly ESPN fantasy football roundups")]
pub struct Cli {
    /// League ID (or set `ESPN_LEAGUE_ID` env var).
    #[clap(long, short, global = true, env = "ESPN_LEAGUE_ID")]
    pub league_id: Option<LeagueId>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the web server.
    Serve {
        /// Port to listen on.
        #[clap(long, short, env = "PORT")]
        port: Option<u16>,

        /// Address to bind.
        #[clap(long, env = "BIND_ADDR")]
        bind: Option<IpAddr>,
    },

    /// Check that the league can be read and list its teams.
    CheckLeague {
        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,
    },

    /// Build one week's roundup in the terminal.
    Report {
        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Week to report on.
        #[clap(long, short)]
        week: Week,

        /// Output the report and narrative as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Delete stored narratives so they are regenerated.
    ClearNarratives {
        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Only this week; without it every stored narrative is removed.
        #[clap(long, short)]
        week: Option<Week>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_args() {
        let cli = Cli::try_parse_from([
            "ffl-roundup", "report", "--season", "2024", "--week", "5", "--json", "-l", "777",
        ])
        .unwrap();

        assert_eq!(cli.league_id, Some(LeagueId::new(777)));
        match cli.command {
            Commands::Report { season, week, json } => {
                assert_eq!(season, Season::new(2024));
                assert_eq!(week, Week::new(5));
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_week_required_and_port_validated() {
        assert!(Cli::try_parse_from(["ffl-roundup", "report"]).is_err());
        assert!(Cli::try_parse_from(["ffl-roundup", "serve", "--port", "x"]).is_err());
    }

    #[test]
    fn test_serve_reads_bind_from_environment() {
        std::env::remove_var("BIND_ADDR");
        let cli = Cli::try_parse_from(["ffl-roundup", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { bind: None, .. }));

        std::env::set_var("BIND_ADDR", "127.0.0.1");
        let from_env = Cli::try_parse_from(["ffl-roundup", "serve"]);
        let explicit = Cli::try_parse_from(["ffl-roundup", "serve", "--bind", "10.0.0.2"]);
        std::env::remove_var("BIND_ADDR");

        match from_env.unwrap().command {
            Commands::Serve { bind, .. } => assert_eq!(bind, Some("127.0.0.1".parse().unwrap())),
            other => panic!("unexpected command {other:?}"),
        }
        // the flag wins over the environment
        match explicit.unwrap().command {
            Commands::Serve { bind, .. } => assert_eq!(bind, Some("10.0.0.2".parse().unwrap())),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_clear_narratives_args() {
        let cli = Cli::try_parse_from(["ffl-roundup", "clear-narratives", "-s", "2024", "-w", "3"])
            .unwrap();
        match cli.command {
            Commands::ClearNarratives { season, week } => {
                assert_eq!(season, Season::new(2024));
                assert_eq!(week, Some(Week::new(3)));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["ffl-roundup", "clear-narratives"]).unwrap();
        assert!(matches!(cli.command, Commands::ClearNarratives { week: None, .. }));
    }
}
