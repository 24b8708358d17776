use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use task_schedule::config::ServiceConfig;
use task_schedule::generator::DataGenerator;
use task_schedule::models::GenerateResponse;
use task_schedule::scheduler::{ScheduleKpi, ScheduleRequest, TaskScheduler};

#[derive(Parser)]
#[command(
    name = "task-schedule",
    about = "Greedy task-to-staff scheduler",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate locations and open tasks from a config file
    Generate {
        /// Path to the TOML service config
        #[arg(short, long)]
        config: PathBuf,
        /// RNG seed for a reproducible problem
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Generate a problem and schedule it.
    ///
    /// Prints the remaining open tasks, the locations, the scheduled
    /// tasks and the staff pool as JSON.
    Schedule {
        /// Path to the TOML service config
        #[arg(short, long)]
        config: PathBuf,
        /// RNG seed for a reproducible problem
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("task_schedule=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, seed } => generate(&config, seed),
        Commands::Schedule { config, seed } => schedule(&config, seed),
    }
}

fn load_config(path: &Path) -> anyhow::Result<ServiceConfig> {
    let config = ServiceConfig::from_file(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    info!(
        path = %path.display(),
        start = %config.start_date(),
        end = %config.end_date(),
        "config loaded"
    );
    Ok(config)
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn generate(path: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let config = load_config(path)?;
    let generator = DataGenerator::new(&config).context("invalid generator config")?;
    let mut rng = rng(seed);

    let locations = generator.generate_locations(&mut rng);
    let new_tasks = generator
        .generate_new_tasks(&locations, &mut rng)
        .context("generating tasks")?;

    print_json(&GenerateResponse {
        locations,
        new_tasks,
    })
}

fn schedule(path: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let config = load_config(path)?;
    let generator = DataGenerator::new(&config).context("invalid generator config")?;
    let mut rng = rng(seed);

    let locations = generator.generate_locations(&mut rng);
    let tasks = generator
        .generate_new_tasks(&locations, &mut rng)
        .context("generating tasks")?;
    let staff = generator
        .generate_staff(&locations, &mut rng)
        .context("generating staff")?;

    let scheduler_config = config.scheduler_config();
    let request = ScheduleRequest::new(scheduler_config, locations, tasks, staff);
    let response = TaskScheduler::new(scheduler_config)
        .schedule_request(request)
        .context("scheduling")?;

    let kpi = ScheduleKpi::for_response(&response);
    info!(
        scheduled = kpi.scheduled_count,
        open = kpi.open_count,
        scheduled_rate = kpi.scheduled_rate,
        avg_utilization = kpi.avg_utilization,
        "schedule ready"
    );

    print_json(&response)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing response")?;
    println!("{json}");
    Ok(())
}
