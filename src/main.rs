/// Command line frontend for HabitSip
///
/// This file sets up logging, parses arguments, resolves the database
/// location and dispatches to the library. Everything here is thin
/// presentation glue; the store and statistics live in the library crate.

use clap::{Parser, Subcommand};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use habitsip::{
    DrinkKind, DrinkLog, ExportError, Goal, HabitSip, OnboardingStep, ReminderTime, ThemePref,
};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".habitsip");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("habitsip");
            p
        }),
        // 3. User's config directory
        dirs::config_dir().map(|mut p| {
            p.push("habitsip");
            p
        }),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habitsip");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        // Try to create the directory
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file); // Clean up test file
                let mut db_path = potential_path.clone();
                db_path.push("habitsip.db");
                return Ok(db_path);
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("habitsip");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habitsip.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for HabitSip
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save the record for a date (replacing any existing one)
    Log {
        /// Date to log, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Total drinks; defaults to the breakdown sum, or 0 (a clean day)
        #[arg(long)]
        drinks: Option<u32>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        beer: Option<u32>,
        #[arg(long)]
        wine: Option<u32>,
        #[arg(long)]
        spirits: Option<u32>,
        #[arg(long)]
        cocktail: Option<u32>,
    },
    /// Show the record for a single date
    Show { date: NaiveDate },
    /// List every record, oldest first
    List,
    /// Delete the record for a date
    Delete { date: NaiveDate },
    /// Delete the entire log collection
    Clear {
        /// Actually do it
        #[arg(long)]
        yes: bool,
    },
    /// Show the dashboard statistics
    Status {
        /// Re-derive and reprint every couple of seconds
        #[arg(long)]
        watch: bool,
    },
    /// Show the achievement catalog
    Achievements,
    /// Export the collection as CSV
    Export {
        /// Directory to write into, defaults to the system temp dir
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Run the first-time setup wizard
    Setup,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print every preference
    Show,
    /// Set one preference
    Set {
        /// One of: name, goal, cost, reminder, reminder-time, theme
        field: String,
        value: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habitsip={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let app = HabitSip::open(db_path)?;
    let today = Local::now().date_naive();

    match args.command {
        Command::Log {
            date,
            drinks,
            note,
            beer,
            wine,
            spirits,
            cocktail,
        } => {
            let date = date.unwrap_or(today);

            let mut breakdown = BTreeMap::new();
            for (label, count) in [
                ("beer", beer),
                ("wine", wine),
                ("spirits", spirits),
                ("cocktail", cocktail),
            ] {
                if let Some(n) = count {
                    breakdown.insert(label.to_string(), n);
                }
            }
            let breakdown = if breakdown.is_empty() { None } else { Some(breakdown) };

            let drinks = drinks
                .or_else(|| breakdown.as_ref().map(|b| b.values().sum()))
                .unwrap_or(0);
            let kind = DrinkKind::for_entry(drinks, breakdown.as_ref());
            let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

            let entry = DrinkLog::new(date, drinks, kind, note, breakdown)?;
            app.save_log(&entry).await;
            println!("Logged {} drink(s) for {} ({})", entry.drinks, entry.date, entry.kind);
        }

        Command::Show { date } => match app.log_for_date(date).await {
            Some(log) => print_log(&log),
            None => println!("No record for {}", date),
        },

        Command::List => {
            let mut logs = app.logs().await;
            logs.sort_by_key(|l| l.date);
            if logs.is_empty() {
                println!("No records yet.");
            }
            for log in logs {
                print_log(&log);
            }
        }

        Command::Delete { date } => {
            app.delete_log(date).await;
            println!("Deleted record for {}", date);
        }

        Command::Clear { yes } => {
            if !yes {
                println!("This deletes every record. Re-run with --yes to confirm.");
            } else {
                app.clear_logs().await;
                println!("All records deleted.");
            }
        }

        Command::Status { watch } => {
            print_dashboard(&app, today).await;
            if watch {
                let mut ticker = tokio::time::interval(std::time::Duration::from_secs(2));
                ticker.tick().await; // first tick fires immediately
                loop {
                    ticker.tick().await;
                    println!();
                    print_dashboard(&app, Local::now().date_naive()).await;
                }
            }
        }

        Command::Achievements => {
            for status in app.achievements().await {
                let marker = if status.unlocked { "🏆" } else { "🔒" };
                println!("{} {} — {}", marker, status.title, status.description);
            }
        }

        Command::Export { out } => match app.export_csv(out.as_deref()).await {
            Ok(path) => println!("Exported to {}", path.display()),
            Err(ExportError::NoLogs) => {
                eprintln!("No logs to export.");
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },

        Command::Settings { action } => match action {
            SettingsAction::Show => print_settings(&app).await,
            SettingsAction::Set { field, value } => set_setting(&app, &field, &value).await?,
        },

        Command::Setup => run_setup(&app).await?,
    }

    Ok(())
}

fn print_log(log: &DrinkLog) {
    let note = log.note.as_deref().unwrap_or("");
    print!("{}  {:>2} drink(s)  {:<10} {}", log.date, log.drinks, log.kind.to_string(), note);
    if let Some(breakdown) = &log.breakdown {
        let parts: Vec<String> = breakdown.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        print!("  [{}]", parts.join(", "));
    }
    println!();
}

async fn print_dashboard(app: &HabitSip, today: NaiveDate) {
    let stats = app.dashboard(today).await;
    println!("Current streak:         {} days", stats.current_streak);
    println!("Best streak:            {} days", stats.best_streak);
    println!("Clean days this month:  {}", stats.clean_this_month);
    println!("Total drinks this week: {}", stats.drinks_this_week);
    println!("Money saved:            ${:.2}", stats.money_saved);
}

async fn print_settings(app: &HabitSip) {
    let prefs = app.prefs();
    println!("name:          {}", prefs.user_name().await.unwrap_or_default());
    println!(
        "goal:          {}",
        prefs.goal().await.map(|g| g.to_string()).unwrap_or_default()
    );
    println!(
        "cost:          {}",
        prefs.avg_cost().await.map(|c| format!("{:.2}", c)).unwrap_or_default()
    );
    let reminder = prefs.reminder().await;
    println!("reminder:      {}", reminder.enabled);
    println!("reminder-time: {}", reminder.time);
    println!("theme:         {}", prefs.theme().await);
}

async fn set_setting(
    app: &HabitSip,
    field: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = app.prefs();
    match field {
        "name" => prefs.set_user_name(value).await,
        "goal" => {
            let goal: Goal = value.parse().map_err(|_| "goal must be Sobriety or Moderation")?;
            prefs.set_goal(goal).await;
        }
        "cost" => {
            let cost: f64 = value.parse().map_err(|_| "cost must be a number")?;
            prefs.set_avg_cost(cost).await;
        }
        "reminder" => {
            let enabled: bool = value.parse().map_err(|_| "reminder must be true or false")?;
            prefs.set_daily_reminder(enabled).await;
        }
        "reminder-time" => {
            let time: ReminderTime = value.parse().map_err(|_| "reminder-time must be HH:MM")?;
            prefs.set_reminder_time(time).await;
        }
        "theme" => {
            let theme: ThemePref =
                value.parse().map_err(|_| "theme must be light, dark or system")?;
            prefs.set_theme(theme).await;
        }
        other => return Err(format!("unknown setting: {}", other).into()),
    }
    println!("Saved.");
    Ok(())
}

fn prompt(text: &str) -> Result<String, std::io::Error> {
    print!("{} ", text);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Walk the onboarding sequence, persisting each answer
async fn run_setup(app: &HabitSip) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = app.prefs();
    let mut step = OnboardingStep::first();

    while !step.is_terminal() {
        println!("\n{}", step.title());
        match step {
            OnboardingStep::Welcome => {
                println!("Track your drinks, build clean streaks, see what you save.");
            }
            OnboardingStep::Name => {
                let name = prompt("Your name:")?;
                if !name.is_empty() {
                    prefs.set_user_name(&name).await;
                }
            }
            OnboardingStep::Goal => {
                let answer = prompt("Sobriety (no alcohol) or Moderation (cut back)?")?;
                match answer.parse::<Goal>() {
                    Ok(goal) => prefs.set_goal(goal).await,
                    Err(()) => println!("Skipping goal; set it later with `settings set goal`."),
                }
            }
            OnboardingStep::Cost => {
                let answer = prompt("Average cost per drink:")?;
                match answer.parse::<f64>() {
                    Ok(cost) if cost >= 0.0 => prefs.set_avg_cost(cost).await,
                    _ => println!("Skipping cost; set it later with `settings set cost`."),
                }
            }
            OnboardingStep::Reminder => {
                let answer = prompt("Enable a daily check-in reminder? [y/N]")?;
                let enabled = matches!(answer.as_str(), "y" | "Y" | "yes");
                prefs.set_daily_reminder(enabled).await;
                if enabled {
                    let time = prompt("Reminder time (HH:MM, default 20:00):")?;
                    if let Ok(time) = time.parse::<ReminderTime>() {
                        prefs.set_reminder_time(time).await;
                    }
                }
            }
            OnboardingStep::Main => unreachable!("terminal step"),
        }
        step = step.next();
    }

    prefs.set_onboarding_done(true).await;
    println!("\nAll set. Log your first day with `habitsip log`.");
    Ok(())
}
