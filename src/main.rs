use std::collections::BTreeSet;
use std::time::Duration;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, Level};

use u_roster::config::{FleetProblem, GaConfig, ShiftRules};
use u_roster::models::{DayRoster, DriverId, TripRow, Weekday};
use u_roster::scheduler::{RosterKpi, WeeklyScheduler};
use u_roster::RosterError;

#[derive(Parser)]
#[clap(author, version, about = "Optimize a weekly bus-driver roster", long_about = None)]
struct Cli {
    /// Number of vehicles
    #[arg(long, default_value_t = 10)]
    fleet_size: u32,

    /// Number of Regular drivers (weekdays only, fixed shift)
    #[arg(long, default_value_t = 5)]
    regular_drivers: u32,

    /// Number of Flexible drivers (rotating days off)
    #[arg(long, default_value_t = 7)]
    flexible_drivers: u32,

    #[arg(long, default_value_t = 50)]
    population_size: usize,

    #[arg(long, default_value_t = 100)]
    generations: usize,

    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,

    #[arg(long, default_value_t = 0.5)]
    crossover_rate: f64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Optimize weekdays one after another instead of concurrently
    #[arg(long)]
    sequential: bool,

    /// Wall-clock cap per day search, in seconds
    #[arg(long)]
    time_limit_secs: Option<u64>,

    /// Optimize a single weekday (0 = Monday .. 6 = Sunday)
    #[arg(long)]
    day: Option<usize>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Serialize)]
struct DayReport {
    weekday: Weekday,
    fitness: i64,
    drivers: BTreeSet<DriverId>,
    trips: Vec<TripRow>,
    kpi: RosterKpi,
}

impl DayReport {
    fn new(scheduler: &WeeklyScheduler, roster: DayRoster) -> Self {
        let kpi = scheduler.kpi(&roster);
        info!(
            day = %roster.weekday,
            fitness = roster.fitness,
            trips = kpi.trip_count,
            vehicles = kpi.vehicles_used,
            uncovered_ticks = kpi.uncovered_ticks,
            "roster"
        );
        Self {
            weekday: roster.weekday,
            fitness: roster.fitness,
            trips: roster.schedule.rows(),
            drivers: roster.drivers,
            kpi,
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config = GaConfig::default()
        .with_population_size(cli.population_size)
        .with_generations(cli.generations)
        .with_mutation_rate(cli.mutation_rate)
        .with_crossover_rate(cli.crossover_rate)
        .with_parallel(!cli.sequential);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(secs) = cli.time_limit_secs {
        config = config.with_time_limit(Duration::from_secs(secs));
    }

    let problem = FleetProblem::new(cli.fleet_size, cli.regular_drivers, cli.flexible_drivers);
    let scheduler = WeeklyScheduler::new(problem, ShiftRules::default(), config)?;

    let reports: Vec<DayReport> = match cli.day {
        Some(index) => {
            let weekday = Weekday::from_index(index).ok_or(RosterError::InvalidWeekday(index))?;
            let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
            let mut rng = SmallRng::seed_from_u64(seed);
            let roster = scheduler.optimize_day(weekday, &mut rng);
            vec![DayReport::new(&scheduler, roster)]
        }
        None => scheduler
            .run()
            .days
            .into_iter()
            .map(|roster| DayReport::new(&scheduler, roster))
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
