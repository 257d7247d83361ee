#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use cardio_roster::{
    config::{self, Settings},
    io,
    report::{coverage_gaps, fairness, weekly_vacation_notes, ReportRenderer, TextReport},
    scheduler::{ScheduleOutput, Solver},
    seed,
    storage::{JsonStorage, Storage},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification cardiologie (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier de réglages JSON (chemins et fenêtre par défaut)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Fichier JSON de la photographie (praticiens, sites, fériés, congés)
    #[arg(long, global = true)]
    snapshot: Option<String>,

    /// Fichier JSON des règles
    #[arg(long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Écrire le jeu de démonstration (photographie + règles)
    Seed,

    /// Résoudre le planning et l'exporter
    Solve {
        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,
        /// YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_calls_csv: Option<String>,
    },

    /// Lister les trous de couverture
    Coverage {
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Métriques d'équité par praticien
    Fairness {
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Notes de congés d'une semaine
    Vacations {
        /// Lundi de la semaine (YYYY-MM-DD)
        #[arg(long)]
        week_start: NaiveDate,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Importer des congés depuis un CSV dans la photographie
    ImportVacations {
        #[arg(long)]
        csv: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }
    #[cfg(not(feature = "logging"))]
    let _ = cli.log;

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(path) = cli.snapshot {
        settings.snapshot_path = path.into();
    }
    if let Some(path) = cli.rules {
        settings.rules_path = path.into();
    }
    let storage = JsonStorage::open(&settings.snapshot_path)?;

    let code = match cli.cmd {
        Commands::Seed => {
            storage.save(&seed::demo_snapshot())?;
            config::save_rules(&settings.rules_path, &seed::demo_rules())?;
            println!(
                "Demo data written to {} and {}",
                settings.snapshot_path.display(),
                settings.rules_path.display()
            );
            0
        }
        Commands::Solve {
            start,
            end,
            out_json,
            out_csv,
            out_calls_csv,
        } => {
            let schedule = solve(&storage, &settings, start, end)?;
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &schedule)?;
            }
            if let Some(path) = out_calls_csv {
                io::export_calls_csv(path, &schedule)?;
            }
            let gaps = schedule.assignments.iter().filter(|a| a.is_gap()).count();
            println!(
                "{} assignment(s), {} call(s), {} gap(s)",
                schedule.assignments.len(),
                schedule.call_assignments.len(),
                gaps
            );
            0
        }
        Commands::Coverage { start, end } => {
            let schedule = solve(&storage, &settings, start, end)?;
            let coverage = coverage_gaps(&schedule);
            print!("{}", TextReport.render_coverage(&coverage));
            // Code 2 = WARNING/INCOMPLETE
            if coverage.is_empty() {
                0
            } else {
                2
            }
        }
        Commands::Fairness {
            start,
            end,
            out_csv,
        } => {
            let schedule = solve(&storage, &settings, start, end)?;
            let metrics = fairness(&schedule);
            if let Some(path) = out_csv {
                io::export_fairness_csv(path, &metrics)?;
            }
            print!("{}", TextReport.render_fairness(&metrics));
            0
        }
        Commands::Vacations {
            week_start,
            start,
            end,
        } => {
            let schedule = solve(&storage, &settings, start, end)?;
            for note in weekly_vacation_notes(&schedule, week_start) {
                println!("{note}");
            }
            0
        }
        Commands::ImportVacations { csv } => {
            let requests = io::import_vacations_csv(&csv)?;
            let imported = storage.update(|snapshot| {
                for request in &requests {
                    if snapshot.find_provider(request.provider_id.as_str()).is_none() {
                        tracing::warn!(provider = %request.provider_id, "vacation for unknown provider");
                    }
                }
                let count = requests.len();
                snapshot.vacation_requests.extend(requests);
                Ok(count)
            })?;
            println!("Imported {imported} vacation request(s) from {csv}");
            0
        }
    };

    std::process::exit(code);
}

fn solve(
    storage: &JsonStorage,
    settings: &Settings,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<ScheduleOutput> {
    let snapshot = storage
        .load()
        .with_context(|| "loading snapshot (run `cardio-roster seed` for demo data)")?;
    let rules = config::load_rules(&settings.rules_path)?;
    let start = start.unwrap_or(settings.window_start);
    let end = end.unwrap_or(settings.window_end);
    let schedule = Solver::new(&snapshot, &rules).solve(start, end)?;
    Ok(schedule)
}
