mod config;
mod content;
mod dates;
mod derive;
mod error;
mod export;
mod form;
mod model;
mod normalize;
mod preview;
mod printable;
mod reference;
mod session;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use inquire::Select;
use log::debug;

use crate::config::{Workspace, load_agency, load_settings, setup_config_wizard};
use crate::error::Error;
use crate::export::BrowserWindow;
use crate::model::{Booking, DocumentKind, RawFlightForm, RawHotelForm};
use crate::normalize::{normalize_flight, normalize_hotel};
use crate::preview::render_preview;
use crate::printable::{RenderOptions, Renderer};
use crate::session::Session;

// ==========================================
// Constants
// ==========================================
const EXPORT_OPT: &str = "🖨️  Export to PDF";
const BACK_OPT: &str = "⬅️  Back to Form";
const QUIT_OPT: &str = "🚪 Quit";

// ==========================================
// Structs & Enums
// ==========================================

#[derive(Parser)]
#[command(name = "voucher-maker")]
#[command(version, about = "Hotel and flight booking vouchers, printable to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in a booking, preview the voucher and export it
    New {
        /// Skip the voucher type menu
        #[arg(long, value_enum)]
        kind: Option<DocumentKind>,
    },
    /// Render a voucher from a TOML or JSON booking file
    Render {
        /// Booking file (.toml or .json)
        input: PathBuf,

        #[arg(long, value_enum)]
        kind: DocumentKind,

        #[arg(long, value_enum, default_value_t = OutputFormat::Preview)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the printable voucher in a browser print window
        #[arg(long)]
        print: bool,

        /// With --print, write the print file without opening it
        #[arg(long, requires = "print")]
        no_open: bool,
    },
    /// Generate a new hotel booking reference
    Reference,
    /// Configure data directory and browser
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Terminal tables
    Preview,
    /// Standalone printable HTML
    Html,
    /// Preview document tree as JSON
    Json,
}

// ==========================================
// Main Function
// ==========================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("❌ Error: {}", e);
        }
        return;
    };

    let result = match command {
        Commands::New { kind } => run_interactive(kind),
        Commands::Render {
            input,
            kind,
            format,
            output,
            print,
            no_open,
        } => run_render(&input, kind, format, output.as_deref(), print, no_open),
        Commands::Reference => {
            println!("{}", reference::hotel_reference(&mut rand::rng()));
            Ok(())
        }
        Commands::Config => setup_config_wizard().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

// ==========================================
// 1. Interactive Form / Preview Loop
// ==========================================

fn run_interactive(fixed_kind: Option<DocumentKind>) -> anyhow::Result<()> {
    let settings = load_settings()?;
    let workspace = Workspace::new(settings.root());
    let agency = load_agency(&workspace)?;
    let renderer = Renderer::from_dir(&workspace.templates_dir())?;

    let mut rng = rand::rng();
    let mut session = Session::new();
    let mut hotel_draft: Option<RawHotelForm> = None;
    let mut flight_draft: Option<RawFlightForm> = None;

    loop {
        // Form
        let kind = match fixed_kind {
            Some(k) => k,
            None => form::select_kind()?,
        };
        let normalized = match kind {
            DocumentKind::Hotel => {
                let raw = form::collect_hotel(hotel_draft.as_ref(), &mut rng)?;
                let result = normalize_hotel(&raw, &mut rng).map(Booking::Hotel);
                hotel_draft = Some(raw);
                result
            }
            DocumentKind::Flight => {
                let raw = form::collect_flight(flight_draft.as_ref())?;
                let result = normalize_flight(&raw).map(Booking::Flight);
                flight_draft = Some(raw);
                result
            }
        };
        let booking = match normalized {
            Ok(b) => b,
            Err(e) => {
                println!("❌ {}", e);
                continue;
            }
        };

        // Preview
        println!("\n{}", render_preview(&booking, &agency));
        session.generate(booking)?;

        loop {
            let action = Select::new("Next step:", vec![EXPORT_OPT, BACK_OPT, QUIT_OPT]).prompt()?;
            if action == EXPORT_OPT {
                let today = Local::now().date_naive();
                let mut window = BrowserWindow::new(workspace.output_dir(), today)
                    .with_browser(settings.browser.clone());
                let options = RenderOptions {
                    booked_on: today,
                    auto_print: true,
                };
                match session.export(&renderer, &agency, options, &mut window) {
                    Ok(job) => println!("✅ Voucher opened for printing: {}", job.path.display()),
                    Err(e @ Error::ExportUnavailable(_)) => println!("⚠️  {}", e),
                    Err(e) => return Err(e.into()),
                }
            } else if action == BACK_OPT {
                session.back_to_form()?;
                break;
            } else {
                return Ok(());
            }
        }
    }
}

// ==========================================
// 2. Non-interactive Rendering
// ==========================================

fn run_render(
    input: &Path,
    kind: DocumentKind,
    format: OutputFormat,
    output: Option<&Path>,
    print: bool,
    no_open: bool,
) -> anyhow::Result<()> {
    let settings = load_settings()?;
    let workspace = Workspace::new(settings.root());
    let agency = load_agency(&workspace)?;
    let booking = load_booking(input, kind)?;
    let today = Local::now().date_naive();

    let rendered = match format {
        OutputFormat::Preview => render_preview(&booking, &agency).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&render_preview(&booking, &agency))?,
        OutputFormat::Html => {
            let renderer = Renderer::from_dir(&workspace.templates_dir())?;
            let options = RenderOptions {
                booked_on: today,
                auto_print: false,
            };
            renderer.render_printable(&booking, &agency, options)?
        }
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✅ Written: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    if print {
        let renderer = Renderer::from_dir(&workspace.templates_dir())?;
        let mut session = Session::new();
        session.generate(booking)?;
        let mut window =
            BrowserWindow::new(workspace.output_dir(), today).with_browser(settings.browser);
        if no_open {
            window = window.without_launch();
        }
        let options = RenderOptions {
            booked_on: today,
            auto_print: true,
        };
        let job = session.export(&renderer, &agency, options, &mut window)?;
        if no_open {
            println!("✅ Print file written: {}", job.path.display());
        } else {
            println!("✅ Voucher opened for printing: {}", job.path.display());
        }
    }
    Ok(())
}

fn load_booking(path: &Path, kind: DocumentKind) -> anyhow::Result<Booking> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    debug!("Loading {} booking from {}", kind, path.display());

    let booking = match kind {
        DocumentKind::Hotel => {
            let raw: RawHotelForm = if is_json {
                serde_json::from_str(&content)?
            } else {
                toml::from_str(&content)?
            };
            Booking::Hotel(normalize_hotel(&raw, &mut rand::rng())?)
        }
        DocumentKind::Flight => {
            let raw: RawFlightForm = if is_json {
                serde_json::from_str(&content)?
            } else {
                toml::from_str(&content)?
            };
            Booking::Flight(normalize_flight(&raw)?)
        }
    };
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_hotel_toml_and_flight_json() {
        let dir = tempfile::tempdir().unwrap();

        let hotel_path = dir.path().join("stay.toml");
        fs::write(
            &hotel_path,
            r#"
            hotel_name = "Sea View"
            check_in_date = "2024-01-10"
            check_out_date = "2024-01-15"
            adults = 2
            children = 0
            room_count = 1
            guest_names = ["Aakash"]
            "#,
        )
        .unwrap();
        let hotel = load_booking(&hotel_path, DocumentKind::Hotel).unwrap();
        assert_eq!(hotel.kind(), DocumentKind::Hotel);
        assert!(hotel.reference().starts_with("HOTEL"));

        let flight_path = dir.path().join("trip.JSON");
        fs::write(
            &flight_path,
            r#"{"flight_number": "AI-202", "airline_name": "Air India",
                "passenger_name": "Meera", "travel_date": "2024-03-01",
                "adults": "1", "children": 0}"#,
        )
        .unwrap();
        let flight = load_booking(&flight_path, DocumentKind::Flight).unwrap();
        assert_eq!(flight.reference(), "AI-202");
    }

    #[test]
    fn demo_bookings_load() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

        let hotel = load_booking(&demos.join("hotel.toml"), DocumentKind::Hotel).unwrap();
        match &hotel {
            Booking::Hotel(h) => {
                assert_eq!(h.hotel_name, "Taj Palace");
                assert!(h.multiple_guests);
                assert_eq!(h.guest_names.len(), 3);
            }
            other => panic!("expected hotel booking, got {:?}", other),
        }

        let flight = load_booking(&demos.join("flight.json"), DocumentKind::Flight).unwrap();
        assert_eq!(flight.reference(), "AI-202");
        assert_eq!(flight.lead_name(), "Meera Nair");
    }

    #[test]
    fn invalid_booking_file_reports_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "flight_number = \"AI-202\"\nairline_name = \"Air India\"\n").unwrap();
        let err = load_booking(&path, DocumentKind::Flight).unwrap_err();
        assert!(err.to_string().contains("passenger_name"), "{}", err);
    }

    #[test]
    fn cli_parses_render_arguments() {
        let cli = Cli::try_parse_from([
            "voucher-maker",
            "render",
            "stay.toml",
            "--kind",
            "hotel",
            "--format",
            "html",
            "-o",
            "out.html",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Render {
                kind, format, output, print, ..
            }) => {
                assert_eq!(kind, DocumentKind::Hotel);
                assert!(matches!(format, OutputFormat::Html));
                assert_eq!(output, Some(PathBuf::from("out.html")));
                assert!(!print);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn no_open_requires_print() {
        let args = ["voucher-maker", "render", "trip.json", "--kind", "flight", "--no-open"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
