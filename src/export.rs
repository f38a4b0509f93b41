//! Hands printable vouchers to a browser window
//!
//! The window is the host's print-to-PDF path: the document is written once,
//! opened, and its own onload script raises the print dialog and closes it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::thread::{self, JoinHandle};

use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use slug::slugify;

use crate::error::{Error, Result};
use crate::model::Booking;

#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob {
    pub path: PathBuf,
}

/// Something that can show a document and print it
pub trait PrintSurface {
    fn print(&mut self, booking: &Booking, html: &str) -> Result<PrintJob>;
}

/// `HOTEL123456_aakash-sharma.html`
pub fn voucher_file_name(booking: &Booking) -> String {
    let reference = sanitize_reference(booking.reference());
    let name = slugify(booking.lead_name());
    if name.is_empty() {
        format!("{}.html", reference)
    } else {
        format!("{}_{}.html", reference, name)
    }
}

// References are user-supplied; keep them readable but path-safe.
fn sanitize_reference(reference: &str) -> String {
    reference
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

pub struct BrowserWindow {
    output_root: PathBuf,
    browser: Option<String>,
    booked_on: NaiveDate,
    launch: bool,
}

impl BrowserWindow {
    /// Documents land under `<output_root>/<year>/`.
    pub fn new(output_root: impl Into<PathBuf>, booked_on: NaiveDate) -> Self {
        BrowserWindow {
            output_root: output_root.into(),
            browser: None,
            booked_on,
            launch: true,
        }
    }

    pub fn with_browser(mut self, browser: Option<String>) -> Self {
        self.browser = browser;
        self
    }

    /// Write the document but do not open it
    pub fn without_launch(mut self) -> Self {
        self.launch = false;
        self
    }

    fn open(&self, path: &Path) -> Result<()> {
        let mut command = match &self.browser {
            Some(browser) => {
                let mut c = Command::new(browser);
                c.arg(path);
                c
            }
            None => system_opener(path),
        };
        debug!("Launching {:?}", command);
        let child = command
            .spawn()
            .map_err(|e| Error::ExportUnavailable(format!("cannot open window: {}", e)))?;
        reap(child);
        Ok(())
    }
}

impl PrintSurface for BrowserWindow {
    fn print(&mut self, booking: &Booking, html: &str) -> Result<PrintJob> {
        let dir = self.output_root.join(self.booked_on.year().to_string());
        let path = dir.join(voucher_file_name(booking));

        fs::create_dir_all(&dir)
            .and_then(|_| fs::write(&path, html))
            .map_err(|e| {
                Error::ExportUnavailable(format!("cannot write {}: {}", path.display(), e))
            })?;

        if self.launch {
            self.open(&path)?;
        }
        info!("Exported {} voucher to {}", booking.kind(), path.display());
        Ok(PrintJob { path })
    }
}

/// Collects the opener's exit status on a background thread.
fn reap(mut child: Child) -> JoinHandle<()> {
    thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Window process {} exited with {}", child.id(), status),
        Err(e) => warn!("Failed to wait for window process {}: {}", child.id(), e),
    })
}

#[cfg(target_os = "macos")]
fn system_opener(path: &Path) -> Command {
    let mut c = Command::new("open");
    c.arg(path);
    c
}

#[cfg(target_os = "windows")]
fn system_opener(path: &Path) -> Command {
    let mut c = Command::new("explorer");
    c.arg(path);
    c
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_opener(path: &Path) -> Command {
    let mut c = Command::new("xdg-open");
    c.arg(path);
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FlightBooking, HotelBooking, MealPlan, RoomType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn hotel() -> Booking {
        Booking::Hotel(HotelBooking {
            booking_reference: "HOTEL482913".into(),
            hotel_name: "Taj Palace".into(),
            guest_names: vec!["Aakash Sharma".into()],
            multiple_guests: false,
            check_in_date: d(2024, 1, 10),
            check_out_date: d(2024, 1, 15),
            adults: 1,
            children: 0,
            room_type: RoomType::Standard,
            room_count: 1,
            meal_plan: MealPlan::RoomOnly,
        })
    }

    #[test]
    fn file_name_combines_reference_and_slug() {
        assert_eq!(voucher_file_name(&hotel()), "HOTEL482913_aakash-sharma.html");

        let flight = Booking::Flight(FlightBooking {
            flight_number: "AI 202/B".into(),
            airline_name: "Air India".into(),
            passenger_name: "Meera".into(),
            travel_date: d(2024, 3, 1),
            return_date: None,
            adults: 1,
            children: 0,
        });
        assert_eq!(voucher_file_name(&flight), "AI_202_B_meera.html");
    }

    #[test]
    fn writes_document_under_year() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = BrowserWindow::new(dir.path(), d(2024, 1, 2)).without_launch();
        let job = window.print(&hotel(), "<html></html>").unwrap();
        assert_eq!(job.path, dir.path().join("2024").join("HOTEL482913_aakash-sharma.html"));
        assert_eq!(fs::read_to_string(&job.path).unwrap(), "<html></html>");
    }

    #[test]
    fn missing_browser_is_export_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = BrowserWindow::new(dir.path(), d(2024, 1, 2))
            .with_browser(Some("/nonexistent/browser-for-voucher-tests".into()));
        match window.print(&hotel(), "<html></html>") {
            Err(Error::ExportUnavailable(reason)) => assert!(reason.contains("cannot open window")),
            other => panic!("expected ExportUnavailable, got {:?}", other),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn opener_process_is_reaped() {
        let child = Command::new("true").spawn().unwrap();
        let proc_entry = PathBuf::from(format!("/proc/{}", child.id()));
        reap(child).join().unwrap();
        assert!(!proc_entry.exists());
    }

    #[cfg(unix)]
    #[test]
    fn launching_browser_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = BrowserWindow::new(dir.path(), d(2024, 1, 2)).with_browser(Some("true".into()));
        let job = window.print(&hotel(), "<html></html>").unwrap();
        assert!(job.path.exists());
    }

    #[test]
    fn unwritable_output_is_export_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();
        let mut window = BrowserWindow::new(&blocker, d(2024, 1, 2)).without_launch();
        assert!(matches!(
            window.print(&hotel(), "<html></html>"),
            Err(Error::ExportUnavailable(_))
        ));
    }
}
