use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use futures::future::join_all;
use log::LevelFilter;

use multimodal_routing_engine::{
    Cli, Mode, OptimizerConfig, run_interactive, run_query, run_service,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .with_module_level("multimodal_routing_engine", LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let cli = Cli::parse();

    let dataset = PathBuf::from(cli.dataset);
    let config = OptimizerConfig {
        seat_seed: cli.seed,
        ..OptimizerConfig::default()
    };

    match cli.mode {
        Mode::Serve { address, ports } => {
            let services: Vec<_> = ports
                .into_iter()
                .map(|port| {
                    let dataset = dataset.clone();
                    let config = config.clone();
                    async move {
                        run_service(dataset, config, address, port).await;
                    }
                })
                .collect();
            join_all(services).await;
        }
        Mode::Query { query_args } => {
            run_query(&dataset, query_args.finalize()?, &config)?;
        }
        Mode::Interactive => {
            run_interactive(&dataset, &config)?;
        }
    }

    Ok(())
}
