use clap::Parser;
use pmembw::classifier::PerfWorkloadClassifier;
use pmembw::cli::Cli;
use pmembw::config::EstimatorConfig;
use pmembw::estimator;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
///
/// Diagnostics go to stderr; stdout carries only the estimate.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let config = EstimatorConfig::from_cli(Cli::parse());
    let classifier = PerfWorkloadClassifier::new(config.perf.clone());

    let status = match estimator::run(&config, &classifier) {
        Ok(estimate) => {
            // A zero estimate prints as the bare "0"; any real figure
            // keeps its decimal point ("3500.0", not "3500").
            if estimate == 0.0 {
                println!("0");
            } else {
                println!("{estimate:?}");
            }
            0
        }
        Err(e) => {
            eprintln!("{e}");
            // The contract is one numeric line no matter what.
            println!("0");
            i32::from(e.is_fatal())
        }
    };
    std::process::exit(status);
}
