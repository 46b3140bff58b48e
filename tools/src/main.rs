//! securecheck: command-line front end for the SecureCheck stop ledger.
//!
//! Usage:
//!   securecheck --db ledger.db init
//!   securecheck --db ledger.db log --date 2024-03-14 --time 22:15 --vehicle RJ01AB1234 ...
//!   securecheck --db ledger.db report "Top 10 vehicles in drug-related stops" --country India
//!   securecheck --db ledger.db --role admin recreate --yes

mod clean;
mod render;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use securecheck_core::{
    export,
    ingest::{self, StopDraft},
    record::{self, DriverGender, StopDuration, StopOutcome, VIOLATIONS},
    reports::{self, ReportOptions},
    rows::{TableResult, Value},
    session::{Role, SessionContext},
    store::LedgerStore,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Officer,
    Admin,
}

#[derive(Debug, Parser)]
#[command(name = "securecheck", version, about = "SecureCheck check-post stop ledger")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = "securecheck.db")]
    db: String,

    /// Operator role. Gates visibility of the admin surface only.
    #[arg(long, global = true, value_enum, default_value = "officer")]
    role: RoleArg,

    #[command(subcommand)]
    command: Commands,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the ledger table if it does not exist.
    Init,
    /// Log a new stop and check the vehicle's arrest history.
    Log(LogArgs),
    /// Show a vehicle's stop history, newest first.
    Lookup {
        vehicle: String,
        #[arg(long, default_value_t = 200)]
        limit: u32,
        /// Write the history as CSV to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List the report catalog.
    Reports,
    /// Run a cataloged report by name.
    Report {
        name: String,
        /// Restrict country-dimension reports to one country.
        #[arg(long)]
        country: Option<String>,
        /// Override the report's minimum group size.
        #[arg(long)]
        min_group_size: Option<u32>,
        /// Write the result as CSV to this path (or the default report
        /// file name if the path is a directory).
        #[arg(long)]
        export: Option<PathBuf>,
        /// Print the result as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Ledger-wide headline figures.
    Kpis {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the ledger schema (admin).
    Schema,
    /// Drop and recreate the ledger table, discarding all rows (admin).
    Recreate {
        /// Confirm the destructive operation.
        #[arg(long)]
        yes: bool,
    },
    /// Normalize a raw spreadsheet export into the canonical row format.
    Clean { input: PathBuf, output: PathBuf },
    /// Bulk-load cleaned rows into the ledger.
    Import { input: PathBuf },
}

#[derive(Debug, Args)]
struct LogArgs {
    /// Stop date, YYYY-MM-DD.
    #[arg(long)]
    date: String,
    /// Stop time, HH:MM or HH:MM:SS.
    #[arg(long)]
    time: String,
    #[arg(long, default_value = "India")]
    country: String,
    #[arg(long)]
    vehicle: String,
    /// One of M, F, Unknown.
    #[arg(long, default_value = "Unknown")]
    gender: String,
    #[arg(long, default_value_t = 30)]
    age: u32,
    #[arg(long, default_value = "Other")]
    race: String,
    /// One of Speeding, DUI, Signal, Seatbelt, Equipment, Other.
    #[arg(long, default_value = "Other")]
    violation: String,
    /// One of "0-15 Min", "16-30 Min", ">30 Min".
    #[arg(long, default_value = "0-15 Min")]
    duration: String,
    /// One of Warning, Citation, Arrest.
    #[arg(long, default_value = "Warning")]
    outcome: String,
    #[arg(long)]
    search_conducted: bool,
    /// Search type when a search was conducted; ignored otherwise.
    #[arg(long, default_value = "Frisk")]
    search_type: String,
    #[arg(long)]
    arrested: bool,
    #[arg(long)]
    drugs: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    // Every failure is reported and converted to a nonzero exit; nothing
    // here panics on operator input.
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let session = SessionContext::new(match cli.role {
        RoleArg::Officer => Role::Officer,
        RoleArg::Admin => Role::Admin,
    });

    // Cleaning is offline; it never touches the ledger.
    if let Commands::Clean { input, output } = &cli.command {
        let summary = clean::clean_export(input, output)?;
        println!(
            "Cleaned {} rows into {} ({} skipped) -> {}",
            summary.rows_in,
            summary.rows_out,
            summary.skipped,
            output.display()
        );
        return Ok(());
    }

    let store = LedgerStore::open(&cli.db)?;
    store.init_schema()?;

    match cli.command {
        Commands::Init => {
            println!("Ledger initialized at {}", cli.db);
        }
        Commands::Log(args) => cmd_log(&store, args)?,
        Commands::Lookup {
            vehicle,
            limit,
            export,
        } => cmd_lookup(&store, &vehicle, limit, export.as_deref())?,
        Commands::Reports => {
            for report in reports::catalog() {
                let tag = if report.country_dimension {
                    "  [country filter]"
                } else {
                    ""
                };
                println!("{}: {}{tag}", report.name, report.summary);
            }
        }
        Commands::Report {
            name,
            country,
            min_group_size,
            export,
            json,
        } => {
            let opts = ReportOptions {
                country,
                min_group_size,
            };
            let result = reports::run(&store, &name, &opts)?;
            if result.is_empty() {
                println!("Report ran successfully but returned no rows.");
            } else if json {
                println!("{}", export::to_json(&result)?);
            } else {
                println!("Results for: {name}");
                println!("{}", render::render(&result));
            }
            if let Some(path) = export {
                let path = resolve_export_path(path, &name);
                write_csv_file(&result, &path)?;
                println!("Exported to {}", path.display());
            }
        }
        Commands::Kpis { json } => {
            let kpis = store.kpi_summary()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&kpis)?);
            } else {
                println!("Total stops:     {}", kpis.total_stops);
                println!("Total arrests:   {}", kpis.total_arrests);
                println!("Drug-related:    {} ({:.1}%)", kpis.drug_stops, kpis.drug_rate_pct);
                println!("Unique vehicles: {}", kpis.unique_vehicles);
            }
        }
        Commands::Schema => {
            require_admin(&session, "schema")?;
            let info = store.table_info()?;
            let result = TableResult {
                columns: vec![
                    "cid".into(),
                    "name".into(),
                    "type".into(),
                    "notnull".into(),
                    "default".into(),
                    "pk".into(),
                ],
                rows: info
                    .iter()
                    .map(|c| {
                        vec![
                            Value::Integer(c.cid),
                            Value::Text(c.name.clone()),
                            Value::Text(c.decl_type.clone()),
                            Value::Integer(c.notnull as i64),
                            c.default_value
                                .clone()
                                .map(Value::Text)
                                .unwrap_or(Value::Null),
                            Value::Integer(c.primary_key as i64),
                        ]
                    })
                    .collect(),
            };
            println!("{}", render::render(&result));
        }
        Commands::Recreate { yes } => {
            require_admin(&session, "recreate")?;
            if !yes {
                bail!("recreate discards every record; pass --yes to confirm");
            }
            store.recreate()?;
            println!("Table recreated. Existing data was removed.");
        }
        Commands::Import { input } => {
            let summary = clean::import_cleaned(&store, &input)?;
            println!(
                "Imported {} rows ({} skipped)",
                summary.inserted, summary.skipped
            );
        }
        Commands::Clean { .. } => unreachable!("handled before the store opens"),
    }

    Ok(())
}

fn cmd_log(store: &LedgerStore, args: LogArgs) -> Result<()> {
    let stop_datetime = record::parse_stop_datetime(&args.date, &args.time)?;
    let Some(driver_gender) = DriverGender::parse(&args.gender) else {
        bail!("invalid gender '{}'; expected M, F, or Unknown", args.gender);
    };
    if !VIOLATIONS.contains(&args.violation.as_str()) {
        bail!(
            "invalid violation '{}'; expected one of {}",
            args.violation,
            VIOLATIONS.join(", ")
        );
    }
    let Some(stop_duration) = StopDuration::parse(&args.duration) else {
        bail!(
            "invalid duration '{}'; expected \"0-15 Min\", \"16-30 Min\", or \">30 Min\"",
            args.duration
        );
    };
    let Some(stop_outcome) = StopOutcome::parse(&args.outcome) else {
        bail!(
            "invalid outcome '{}'; expected Warning, Citation, or Arrest",
            args.outcome
        );
    };

    let draft = StopDraft {
        stop_datetime,
        country_name: args.country,
        vehicle_number: args.vehicle,
        driver_gender,
        driver_age: args.age,
        driver_race: args.race,
        violation: args.violation,
        stop_duration,
        stop_outcome,
        search_conducted: args.search_conducted,
        search_type: args.search_type,
        is_arrested: args.arrested,
        drugs_related_stop: args.drugs,
    };

    let outcome = ingest::ingest(store, draft)?;
    println!("{}", outcome.advisory.message(&outcome.vehicle_number));
    println!("Log recorded successfully (stop_id={}).", outcome.stop_id);
    Ok(())
}

fn cmd_lookup(
    store: &LedgerStore,
    vehicle: &str,
    limit: u32,
    export: Option<&Path>,
) -> Result<()> {
    let vehicle = record::normalize_vehicle_number(vehicle);
    if vehicle.is_empty() {
        bail!("enter a vehicle number");
    }
    let history = store.vehicle_history(&vehicle, limit)?;
    if history.is_empty() {
        println!("No records found for vehicle {vehicle}.");
        return Ok(());
    }
    println!("{}", render::render(&history));
    if let Some(path) = export {
        write_csv_file(&history, path)?;
        println!("Exported to {}", path.display());
    }
    Ok(())
}

fn require_admin(session: &SessionContext, what: &str) -> Result<()> {
    if !session.can_administer() {
        bail!("'{what}' is part of the admin surface; rerun with --role admin");
    }
    Ok(())
}

fn resolve_export_path(path: PathBuf, report_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(export::report_file_name(report_name))
    } else {
        path
    }
}

fn write_csv_file(result: &TableResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    export::write_csv(result, file)?;
    Ok(())
}
