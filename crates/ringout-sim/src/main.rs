use tracing_subscriber::EnvFilter;

use ringout_sim::Simulation;
use ringout_sim::config::SimConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Ringout simulation starting");

    let config = SimConfig::load();
    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        },
    };

    let report = sim.run();
    tracing::info!(
        ticks = report.ticks,
        finished = report.finished,
        rounds = report.rounds_played,
        "Simulation finished"
    );
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize report");
            std::process::exit(1);
        },
    }
}
