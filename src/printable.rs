//! Standalone HTML voucher for the print window
//!
//! Section order is fixed by the template: header, booking meta,
//! guest/passenger, schedule, line items, info and terms.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use tera::{Context, Tera};

use crate::content::{self, LINE_ITEM_HEADERS, LineItem, TOTAL_PAYABLE};
use crate::dates::format_short;
use crate::derive::derive_fields;
use crate::error::{Error, Result};
use crate::model::{AgencyProfile, Booking, DocumentKind};

pub const TEMPLATE_NAME: &str = "voucher.html";

// Embed template at compile time to ensure availability
const DEFAULT_TEMPLATE: &str = include_str!("../templates/voucher.html");

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Printed as the booking date
    pub booked_on: NaiveDate,
    /// Open the print dialog once the window has loaded
    pub auto_print: bool,
}

#[derive(Serialize)]
struct StayContext {
    room_type: &'static str,
    room_count: u32,
    meal_plan: &'static str,
}

#[derive(Serialize)]
struct FlightContext<'a> {
    flight_number: &'a str,
    airline_name: &'a str,
}

#[derive(Serialize)]
struct VoucherContext<'a> {
    kind: DocumentKind,
    title: &'static str,
    heading: String,
    reference: &'a str,
    booking_date: String,
    agency: &'a AgencyProfile,
    party_label: &'static str,
    party_size: u32,
    names: Vec<&'a str>,
    guest_summary: String,
    start_label: &'static str,
    start: String,
    end_label: &'static str,
    end: String,
    duration_label: &'static str,
    duration_text: String,
    reversed: bool,
    stay: Option<StayContext>,
    flight: Option<FlightContext<'a>>,
    item_heading: &'static str,
    item_headers: [&'static str; 5],
    line_items: Vec<LineItem>,
    total_payable: u32,
    inclusions: [&'static str; 8],
    terms: Vec<String>,
    auto_print: bool,
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Renderer over the built-in template
    pub fn embedded() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        Ok(Renderer { tera })
    }

    /// Renderer over `<dir>/voucher.html`, seeding it with the built-in
    /// template when the file does not exist yet.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let template_path = dir.join(TEMPLATE_NAME);
        if !template_path.exists() {
            info!("Initializing default template at {}", template_path.display());
            fs::write(&template_path, DEFAULT_TEMPLATE)?;
        }

        let mut tera = Tera::default();
        tera.add_template_file(&template_path, Some(TEMPLATE_NAME))?;
        Ok(Renderer { tera })
    }

    pub fn render_printable(
        &self,
        booking: &Booking,
        agency: &AgencyProfile,
        options: RenderOptions,
    ) -> Result<String> {
        let context = voucher_context(booking, agency, options);
        debug!("Rendering printable {} voucher {}", context.kind, context.reference);
        let context = Context::from_serialize(&context)?;
        self.tera.render(TEMPLATE_NAME, &context).map_err(Error::from)
    }
}

fn voucher_context<'a>(
    booking: &'a Booking,
    agency: &'a AgencyProfile,
    options: RenderOptions,
) -> VoucherContext<'a> {
    let derived = derive_fields(booking);
    let kind = booking.kind();

    let (heading, names, stay, flight) = match booking {
        Booking::Hotel(h) => (
            h.hotel_name.clone(),
            h.guest_names.iter().map(String::as_str).collect(),
            Some(StayContext {
                room_type: h.room_type.label(),
                room_count: h.room_count,
                meal_plan: h.meal_plan.label(),
            }),
            None,
        ),
        Booking::Flight(f) => (
            format!("{} {}", f.airline_name, f.flight_number),
            vec![f.passenger_name.as_str()],
            None,
            Some(FlightContext {
                flight_number: &f.flight_number,
                airline_name: &f.airline_name,
            }),
        ),
    };

    VoucherContext {
        kind,
        title: kind.title(),
        heading,
        reference: booking.reference(),
        booking_date: format_short(options.booked_on),
        agency,
        party_label: derived.party_label,
        party_size: derived.party_size,
        names,
        guest_summary: derived.guest_summary,
        start_label: derived.start_label,
        start: format_short(derived.start),
        end_label: derived.end_label,
        end: derived
            .end
            .map(format_short)
            .unwrap_or_else(|| "One-way".to_string()),
        duration_label: derived.duration_label,
        duration_text: derived.duration_text,
        reversed: derived.reversed,
        stay,
        flight,
        item_heading: content::item_heading(kind),
        item_headers: LINE_ITEM_HEADERS,
        line_items: content::line_items(kind),
        total_payable: TOTAL_PAYABLE,
        inclusions: content::inclusions(kind),
        terms: content::terms(kind),
        auto_print: options.auto_print,
    }
}
