//! liftplan - Workout program assignment and personalization

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use liftplan::program::{
    JsonCatalog, ProgramPreferences, ProgramTemplate, ProgramType, StaticCatalog, TemplateCatalog,
    UserProgram,
};
use liftplan::service::Assignment;
use liftplan::tui::App;
use liftplan::{Database, PersonalizationTuning, ProgramService};

const DB_PATH: &str = "liftplan.db";

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(author, version, about = "Workout program assignment and personalization")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "LIFTPLAN_DB", default_value = DB_PATH)]
    db: String,

    /// JSON template catalog (built-in templates if not set)
    #[arg(long, env = "LIFTPLAN_CATALOG")]
    catalog: Option<PathBuf>,

    /// JSON file with personalization tuning overrides
    #[arg(long, env = "LIFTPLAN_TUNING")]
    tuning: Option<PathBuf>,

    #[command(flatten)]
    tuning_flags: PersonalizationTuning,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a program (or update an existing one)
    Assign {
        user: String,

        /// Day labels, one per training day (e.g., "Mon,Wed,Fri")
        #[arg(short, long, value_delimiter = ',', required = true)]
        days: Vec<String>,

        /// Equipment available
        #[arg(short = 't', long = "type", value_enum, default_value = "gym")]
        program_type: ProgramType,

        /// Training goal (e.g., "gain muscle", "lose weight")
        #[arg(short, long, requires = "minutes")]
        goal: Option<String>,

        /// Session length in minutes
        #[arg(short, long, requires = "goal")]
        minutes: Option<i32>,
    },

    /// Rename training days, keeping logged progress
    Relabel {
        user: String,

        #[arg(short, long, value_delimiter = ',', required = true)]
        days: Vec<String>,

        #[arg(short, long, requires = "minutes")]
        goal: Option<String>,

        #[arg(short, long, requires = "goal")]
        minutes: Option<i32>,
    },

    /// Change goal, session length, equipment or days of an existing program
    Prefs {
        user: String,

        #[arg(short, long, value_delimiter = ',', required = true)]
        days: Vec<String>,

        #[arg(short = 't', long = "type", value_enum, default_value = "gym")]
        program_type: ProgramType,

        #[arg(short, long)]
        goal: String,

        #[arg(short, long)]
        minutes: i32,
    },

    /// Show a user's program
    Show {
        user: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log reps and weight for an exercise
    Log {
        user: String,

        /// Day number (1-based)
        #[arg(short, long)]
        day: usize,

        /// Exercise name as shown in the program
        #[arg(short, long)]
        exercise: String,

        #[arg(short, long)]
        reps: Option<i32>,

        #[arg(short, long)]
        weight: Option<f64>,
    },

    /// List templates in the catalog
    Templates {
        #[arg(short, long)]
        days: Option<usize>,

        #[arg(short = 't', long = "type", value_enum)]
        program_type: Option<ProgramType>,
    },

    /// List users with a stored program
    Users,

    /// Open TUI dashboard for a user
    Tui { user: String },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let mut tuning = match &cli.tuning {
        Some(path) => PersonalizationTuning::from_file(path)?,
        None => PersonalizationTuning::default(),
    };
    tuning.merge_from_cli(&cli.tuning_flags, &matches)?;

    let catalog: Box<dyn TemplateCatalog> = match &cli.catalog {
        Some(path) => Box::new(JsonCatalog::open(path)?),
        None => Box::new(StaticCatalog::builtin()),
    };

    match cli.command {
        Commands::Tui { user } => {
            let db = Database::open(&cli.db)?;
            let mut app = App::new(db, &user)?;
            app.run()?;
        }

        Commands::Users => {
            let db = Database::open(&cli.db)?;
            for user in db.user_ids()? {
                println!("{}", user);
            }
        }

        Commands::Templates { days, program_type } => {
            let templates = list_templates(catalog.as_ref(), days, program_type)?;
            println!("Templates:");
            println!("{:-<60}", "");
            for t in &templates {
                println!("{} days | {:14} | {}", t.days, t.program_type.label(), t.name);
            }
        }

        command => {
            let service = ProgramService::new(catalog, Database::open(&cli.db)?, tuning);
            run_program_command(&service, command)?;
        }
    }

    Ok(())
}

fn run_program_command(
    service: &ProgramService<Box<dyn TemplateCatalog>, Database>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Assign { user, days, program_type, goal, minutes } => {
            let preferences = preferences_from(goal, minutes);
            let assignment = service.assign(&user, &days, program_type, preferences.as_ref())?;
            print_assignment(&assignment);
        }

        Commands::Relabel { user, days, goal, minutes } => {
            let preferences = preferences_from(goal, minutes);
            if !service.relabel_days(&user, &days, preferences.as_ref())? {
                bail!("Could not relabel: no program for '{}' or day count differs", user);
            }
            println!("Relabeled days for {}", user);
        }

        Commands::Prefs { user, days, program_type, goal, minutes } => {
            let preferences = ProgramPreferences::new(goal, minutes);
            if !service.update_preferences(&user, program_type, &days, &preferences)? {
                bail!("Preferences for '{}' were not saved", user);
            }
            println!("Updated preferences for {}", user);
        }

        Commands::Show { user, json } => match service.get_program(&user)? {
            Some(program) if json => println!("{}", serde_json::to_string_pretty(&program)?),
            Some(program) => print_program(&program),
            None => println!("No program for {}", user),
        },

        Commands::Log { user, day, exercise, reps, weight } => {
            if day == 0 {
                bail!("Day numbers start at 1");
            }
            if !service.log_progress(&user, day - 1, &exercise, reps, weight)? {
                bail!("Progress for '{}' was not saved", user);
            }
            println!("Logged: {} (day {})", exercise, day);
        }

        Commands::Templates { .. } | Commands::Users | Commands::Tui { .. } => {}
    }
    Ok(())
}

fn preferences_from(goal: Option<String>, minutes: Option<i32>) -> Option<ProgramPreferences> {
    match (goal, minutes) {
        (Some(goal), Some(minutes)) => Some(ProgramPreferences::new(goal, minutes)),
        _ => None,
    }
}

fn list_templates(
    catalog: &dyn TemplateCatalog,
    days: Option<usize>,
    program_type: Option<ProgramType>,
) -> Result<Vec<ProgramTemplate>> {
    let day_counts: Vec<usize> = match days {
        Some(d) => vec![d],
        None => (liftplan::program::MIN_DAYS..=liftplan::program::MAX_DAYS).collect(),
    };

    let mut templates = Vec::new();
    for d in day_counts {
        let found = match program_type {
            Some(t) => catalog.lookup(d, t)?,
            None => catalog.templates_for_days(d)?,
        };
        templates.extend(found);
    }
    Ok(templates)
}

fn print_assignment(assignment: &Assignment) {
    println!("Change: {}", assignment.change.label());
    if !assignment.change.preserves_progress() {
        println!("Logged progress was reset");
    }
    if let Some(report) = &assignment.report {
        println!(
            "Goal: {} (rest {}s between sets)",
            report.goal.label(),
            report.rest_seconds
        );
        for fit in &report.days {
            println!(
                "  Day {}: ~{:.0} min of {:.0} min ({:?})",
                fit.day_index + 1,
                fit.estimated_seconds / 60.0,
                fit.target_seconds / 60.0,
                fit.outcome
            );
        }
    }
    println!();
    print_program(&assignment.program);
}

fn print_program(program: &UserProgram) {
    println!(
        "{} | {} | {} days, {} exercises",
        program.template_name,
        program.program_type.label(),
        program.days,
        program.exercise_count()
    );
    if let Some(p) = &program.preferences {
        println!("Goal: {} | {} min", p.workout_goal, p.workout_length_minutes);
    }
    for day in &program.schedule {
        println!("{:-<60}", "");
        println!("{} - {}", day.day_name, day.focus);
        for e in &day.exercises {
            println!(
                "  {:28} | {}x{:12} | done {:3} | {} {}",
                e.name, e.sets, e.target_reps, e.reps_completed, e.weight.value, e.weight.unit
            );
        }
    }
}
