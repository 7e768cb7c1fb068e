use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::dataset::load_segments;
use crate::error::RResult;
use crate::optimizer::{OptimizerConfig, RouteDocument, RouteQuery, find_routes, parse_travel_date};
use crate::utils::format_duration;

/// Runs one query against the unified segment list and prints the quick
/// comparison table of the selected routes.
pub fn run_query(dataset: &Path, query: RouteQuery, config: &OptimizerConfig) -> RResult<()> {
    let records = load_segments(dataset)?;
    let document = find_routes(&records, &query, config)?;
    print_comparison(&document);
    Ok(())
}

/// Console front-end collecting the request on stdin.
pub fn run_interactive(dataset: &Path, config: &OptimizerConfig) -> RResult<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let origin = prompt(&mut lines, "Enter origin station/airport code (e.g., JP, DEL): ")?;
    let destination = prompt(
        &mut lines,
        "Enter destination station/airport code (e.g., KOTA, BLR): ",
    )?;

    let max_transfers = loop {
        let answer = prompt(&mut lines, "Maximum transfers allowed (0-3): ")?;
        match answer.parse::<u32>() {
            Ok(value) if value <= 3 => break value,
            Ok(_) => println!("Please enter 0-3"),
            Err(_) => println!("Invalid input"),
        }
    };

    let date_answer = prompt(&mut lines, "Travel date (YYYY-MM-DD, blank for today): ")?;
    let travel_date = parse_travel_date(Some(&date_answer))?;

    run_query(
        dataset,
        RouteQuery {
            origin,
            destination,
            max_transfers,
            travel_date,
        },
        config,
    )
}

fn prompt(lines: &mut io::Lines<io::StdinLock<'_>>, text: &str) -> RResult<String> {
    print!("{text}");
    io::stdout().flush()?;

    let line = lines
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))??;
    Ok(line.trim().to_string())
}

fn print_comparison(document: &RouteDocument) {
    println!();
    println!("{:-<90}", "");
    println!(
        "{:<14} {:<22} {:<10} {:<10} {:<9} {:<8} {:<7}",
        "Route", "Category", "Time", "Cost", "Transfers", "Seats", "Safety"
    );
    println!("{:-<90}", "");

    for route in &document.optimal_routes {
        let objectives = &route.objectives;
        println!(
            "{:<14} {:<22} {:<10} {:<10.0} {:<9} {:<7.1}% {:<6.0}/100",
            route.route_id,
            route.category,
            format_duration(objectives.time),
            objectives.cost,
            objectives.transfers,
            objectives.seat_prob,
            objectives.safety_score,
        );
    }

    println!("{:-<90}", "");
    println!(
        "{} routes generated, {} on the Pareto frontier, {} selected",
        document.metadata.total_routes_generated,
        document.metadata.pareto_front_size,
        document.metadata.optimal_routes_count
    );
}
