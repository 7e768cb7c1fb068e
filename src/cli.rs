use std::net::Ipv4Addr;

use clap::{Parser, Subcommand};

use crate::dataset::DEFAULT_DATASET;
use crate::error::RResult;
use crate::optimizer::{RouteQuery, parse_travel_date};

#[derive(Parser, Debug, Clone)]
pub struct RouteQueryArgsBuilder {
    /// Origin station or airport code
    #[arg(short, long)]
    origin: String,
    /// Destination station or airport code
    #[arg(short, long)]
    destination: String,
    /// Maximum transfers allowed
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=3))]
    max_transfers: u32,
    /// Travel date as YYYY-MM-DD, defaults to today
    #[arg(short, long)]
    travel_date: Option<String>,
}

impl RouteQueryArgsBuilder {
    pub fn finalize(self) -> RResult<RouteQuery> {
        let Self {
            origin,
            destination,
            max_transfers,
            travel_date,
        } = self;

        Ok(RouteQuery {
            origin,
            destination,
            max_transfers,
            travel_date: parse_travel_date(travel_date.as_deref())?,
        })
    }
}

#[derive(Subcommand)]
pub enum Mode {
    /// Serve the route API on a given address and ports
    Serve {
        /// Ipv4 served, defaults to 0.0.0.0
        #[arg(short, long, default_value_t = Ipv4Addr::new(0, 0, 0, 0))]
        address: Ipv4Addr,

        /// Port exposed on the server
        #[arg(short, long, value_parser = clap::value_parser!(u16), num_args = 1.., default_values_t = [8100u16])]
        ports: Vec<u16>,
    },
    /// Find routes between two locations and print a comparison table
    Query {
        #[command(flatten)]
        query_args: RouteQueryArgsBuilder,
    },
    /// Prompt for origin, destination and transfer budget on stdin
    Interactive,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the unified segment list
    #[arg(long, default_value_t = String::from(DEFAULT_DATASET))]
    pub dataset: String,
    /// Fixes the seat-availability draw for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
    /// What mode is used
    #[command(subcommand)]
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_query_args_finalize() {
        let builder = RouteQueryArgsBuilder {
            origin: "del".to_string(),
            destination: "BLR".to_string(),
            max_transfers: 2,
            travel_date: Some("2025-01-01".to_string()),
        };

        let query = builder.finalize().unwrap();
        assert_eq!(query.origin, "del");
        assert_eq!(query.max_transfers, 2);
        assert_eq!(
            query.travel_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_query_args_reject_bad_date() {
        let builder = RouteQueryArgsBuilder {
            origin: "DEL".to_string(),
            destination: "BLR".to_string(),
            max_transfers: 3,
            travel_date: Some("01-01-2025".to_string()),
        };

        let err = builder.finalize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid travel date format. Expected YYYY-MM-DD."
        );
    }

    #[test]
    fn test_cli_parses_query_mode() {
        let cli = Cli::try_parse_from([
            "multimodal-routing-engine",
            "query",
            "--origin",
            "DEL",
            "--destination",
            "BLR",
            "--max-transfers",
            "1",
        ])
        .unwrap();

        assert_eq!(cli.dataset, DEFAULT_DATASET);
        match cli.mode {
            Mode::Query { query_args } => {
                let query = query_args.finalize().unwrap();
                assert_eq!(query.origin, "DEL");
                assert_eq!(query.destination, "BLR");
                assert_eq!(query.max_transfers, 1);
            }
            _ => panic!("expected query mode"),
        }
    }

    #[test]
    fn test_cli_rejects_transfer_budget_out_of_range() {
        let result = Cli::try_parse_from([
            "multimodal-routing-engine",
            "query",
            "--origin",
            "DEL",
            "--destination",
            "BLR",
            "--max-transfers",
            "4",
        ]);

        assert!(result.is_err());
    }
}
