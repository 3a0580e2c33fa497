//! `reserva` CLI: slot availability and permission checks from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a day, reservations JSON on stdin
//! curl -s "$API/classrooms/c-1/reservations?day=2026-03-16" | reserva slots --date 2026-03-16
//!
//! # Same, from a file, editing reservation r-7, with a custom facility config
//! reserva --config campus.toml slots --date 2026-03-16 -i day.json --exclude r-7
//!
//! # Menu visible to a tutor
//! reserva nav --role TUTOR
//!
//! # May user u-1 (a student) cancel this reservation?
//! # Other actions: edit, confirm, reject, delete
//! reserva check --role STUDENT --actor u-1 --action cancel -i reservation.json
//!
//! # Validate a config file
//! reserva check-config campus.toml
//! ```
//!
//! Set `RUST_LOG=debug` to see engine diagnostics on stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use reservation_engine::{
    blocking_reservations, compute_slots, load_config, parse_instant, EngineConfig, Reservation,
    ReservationId, ReservationStatus, Role, SlotRequest, UserId,
};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "reserva",
    version,
    about = "Classroom slot availability and reservation permission checks"
)]
struct Cli {
    /// Facility configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the bookable slots of one classroom for one day
    Slots {
        /// Day in facility local time (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Reservations JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Current instant (ISO 8601); defaults to the system clock
        #[arg(long)]
        now: Option<String>,
        /// Reservation being edited; it does not block its own slots
        #[arg(long)]
        exclude: Option<String>,
        /// Only consider reservations of this classroom
        #[arg(long)]
        classroom: Option<String>,
    },
    /// Print the navigation menu visible to a role
    Nav {
        /// Role claim (ADMIN, PROFESSOR, TUTOR, STUDENT); no role sees nothing
        #[arg(long)]
        role: Option<String>,
    },
    /// Check whether a caller may act on a reservation; prints true or false
    Check {
        /// Role claim of the caller
        #[arg(long)]
        role: Option<String>,
        /// User id of the caller
        #[arg(long)]
        actor: String,
        #[arg(long, value_enum)]
        action: Action,
        /// Reservation JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Validate a configuration file and print a summary
    CheckConfig {
        /// Path to the TOML file
        path: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Action {
    Edit,
    Confirm,
    Reject,
    Cancel,
    Delete,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Slots {
            date,
            input,
            now,
            exclude,
            classroom,
        } => {
            let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
            let now = parse_now(now.as_deref())?;
            let config = resolve_config(config_path)?;
            let raw = read_input(input.as_deref())?;
            let reservations: Vec<Reservation> =
                serde_json::from_str(&raw).context("Failed to parse reservations JSON")?;

            let relevant = reservations
                .iter()
                .filter(|r| classroom.as_deref().is_none_or(|c| r.classroom_id.as_str() == c));
            let blocking = blocking_reservations(relevant);
            debug!(
                total = reservations.len(),
                blocking = blocking.len(),
                "reservations loaded"
            );

            let exclude = exclude.map(ReservationId::new);
            let slots = compute_slots(
                &config.hours,
                &SlotRequest {
                    day,
                    reservations: &blocking,
                    now,
                    exclude: exclude.as_ref(),
                },
            );
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::Nav { role } => {
            let role = parse_role(role.as_deref())?;
            let config = resolve_config(config_path)?;
            let links = config.policy.filter_nav_links(role, &config.nav);
            println!("{}", serde_json::to_string_pretty(&links)?);
        }
        Commands::Check {
            role,
            actor,
            action,
            input,
        } => {
            let role = parse_role(role.as_deref())?;
            let actor = UserId::new(actor);
            let config = resolve_config(config_path)?;
            let raw = read_input(input.as_deref())?;
            let reservation: Reservation =
                serde_json::from_str(&raw).context("Failed to parse reservation JSON")?;

            let policy = &config.policy;
            let allowed = match action {
                Action::Edit => policy.can_edit_reservation(role, &actor, &reservation),
                Action::Confirm => policy.can_transition_status(
                    role,
                    &actor,
                    &reservation,
                    ReservationStatus::Confirmed,
                ),
                Action::Reject => policy.can_transition_status(
                    role,
                    &actor,
                    &reservation,
                    ReservationStatus::Rejected,
                ),
                Action::Cancel => policy.can_cancel_reservation(role, &actor, &reservation),
                Action::Delete => policy.can_delete_reservation(role, &actor, &reservation),
            };
            info!(
                ?action,
                ?role,
                %actor,
                reservation = %reservation.id,
                allowed,
                "permission check"
            );
            println!("{}", allowed);
        }
        Commands::CheckConfig { path } => return check_config(&path),
    }
    Ok(ExitCode::SUCCESS)
}

fn check_config(path: &str) -> Result<ExitCode> {
    match load_config(path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Timezone:     {}", config.hours.timezone.name());
            println!("  Opening hour: {:02}:00", config.hours.opening_hour);
            println!(
                "  Slot length:  {} min",
                config.hours.slot_duration.num_minutes()
            );
            let managers: Vec<&str> = config
                .policy
                .facility_managers
                .iter()
                .map(Role::as_str)
                .collect();
            println!("  Facility managers: {}", managers.join(", "));
            println!("  Menu entries: {}", config.nav.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!("  {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn resolve_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("Failed to load config: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn parse_role(role: Option<&str>) -> Result<Option<Role>> {
    role.map(|r| r.parse::<Role>())
        .transpose()
        .context("Invalid --role")
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => parse_instant(s).context("Invalid --now"),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
