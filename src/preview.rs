//! On-screen voucher: a document tree shown as terminal tables

use std::fmt;

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::debug;
use serde::Serialize;

use crate::content::{self, FLIGHT_HIGHLIGHTS, LINE_ITEM_HEADERS, TOTAL_PAYABLE};
use crate::dates::format_long;
use crate::derive::{DerivedFields, derive_fields};
use crate::model::{AgencyProfile, Booking, DocumentKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub title: String,
    pub tagline: &'static str,
    pub reference_label: &'static str,
    pub reference: String,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub heading: String,
    pub column: Column,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    Fields(Vec<Field>),
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    List(Vec<String>),
    Banner {
        title: String,
        note: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

fn field(label: &str, value: impl Into<String>) -> Field {
    Field {
        label: label.to_string(),
        value: value.into(),
    }
}

fn panel(heading: &str, column: Column, body: Block) -> Panel {
    Panel {
        heading: heading.to_string(),
        column,
        body,
    }
}

pub fn render_preview(booking: &Booking, agency: &AgencyProfile) -> Document {
    let derived = derive_fields(booking);
    let kind = booking.kind();
    debug!("Rendering {} preview for {}", kind, booking.reference());

    let mut panels = match booking {
        Booking::Hotel(h) => vec![
            panel(
                "Hotel Information",
                Column::Left,
                Block::Fields(vec![
                    field("Hotel", h.hotel_name.clone()),
                    field("Location", "Premium Location"),
                ]),
            ),
            party_panel("Guest Details", &h.guest_names.join(", "), &derived),
            schedule_panel("Stay Details", &derived, None),
            panel(
                "Room Details",
                Column::Full,
                Block::Fields(vec![
                    field("Room Type", h.room_type.label()),
                    field("Rooms", h.room_count.to_string()),
                    field("Meal Plan", h.meal_plan.label()),
                ]),
            ),
        ],
        Booking::Flight(f) => vec![
            panel(
                "Flight Information",
                Column::Left,
                Block::Fields(vec![
                    field("Airline", f.airline_name.clone()),
                    field("Flight Number", f.flight_number.clone()),
                    field("Route", "International Route"),
                ]),
            ),
            party_panel("Passenger Details", &f.passenger_name, &derived),
            schedule_panel(
                "Travel Schedule",
                &derived,
                Some(("Gate opens 2 hours before", "Check-in required")),
            ),
            panel(
                "Fare Details",
                Column::Full,
                Block::Fields(
                    FLIGHT_HIGHLIGHTS
                        .iter()
                        .map(|(label, value)| field(label, *value))
                        .collect(),
                ),
            ),
        ],
    };

    panels.extend(static_panels(kind, agency));

    let (tagline, reference_label, arrival_note) = match kind {
        DocumentKind::Hotel => (
            "Confirmation & Booking Details",
            "Voucher #",
            "Present this voucher at check-in",
        ),
        DocumentKind::Flight => (
            "Boarding Pass & Travel Details",
            "Booking Reference",
            "Present this voucher at the airport",
        ),
    };
    panels.push(panel(
        "Status",
        Column::Full,
        Block::Banner {
            title: "Booking Confirmed".to_string(),
            note: arrival_note.to_string(),
        },
    ));

    Document {
        kind,
        title: kind.title().to_uppercase(),
        tagline,
        reference_label,
        reference: booking.reference().to_string(),
        panels,
    }
}

fn party_panel(heading: &str, names: &str, derived: &DerivedFields) -> Panel {
    panel(
        heading,
        Column::Left,
        Block::Fields(vec![
            field(&format!("{} Name", derived.party_label), names),
            field("Party", derived.guest_summary.clone()),
            field("Total", derived.party_size.to_string()),
        ]),
    )
}

/// `notes` are the departure and return reminders shown under each date.
fn schedule_panel(heading: &str, derived: &DerivedFields, notes: Option<(&str, &str)>) -> Panel {
    let mut fields = vec![field(derived.start_label, format_long(derived.start))];
    if let Some((departure, _)) = notes {
        fields.push(field("Departure Note", departure));
    }
    match derived.end {
        Some(end) => {
            fields.push(field(derived.end_label, format_long(end)));
            if let Some((_, ret)) = notes {
                fields.push(field("Return Note", ret));
            }
        }
        None => fields.push(field(derived.end_label, "One-way")),
    }
    fields.push(field(derived.duration_label, derived.duration_text.clone()));
    if derived.reversed {
        fields.push(field(
            "Warning",
            format!("{} is before {}", derived.end_label, derived.start_label),
        ));
    }
    panel(heading, Column::Right, Block::Fields(fields))
}

fn static_panels(kind: DocumentKind, agency: &AgencyProfile) -> Vec<Panel> {
    let mut header = vec![content::item_heading(kind).to_string()];
    header.extend(LINE_ITEM_HEADERS.iter().map(|h| h.to_string()));

    let mut rows: Vec<Vec<String>> = content::line_items(kind)
        .into_iter()
        .map(|i| {
            vec![
                i.description.to_string(),
                i.unit.to_string(),
                i.quantity.to_string(),
                i.gst.to_string(),
                i.amount.to_string(),
                i.taxable.to_string(),
            ]
        })
        .collect();
    rows.push(vec![
        "Total Payable Amount".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        TOTAL_PAYABLE.to_string(),
    ]);

    vec![
        panel(
            "Package Details",
            Column::Full,
            Block::Table { header, rows },
        ),
        panel(
            "Package Includes",
            Column::Full,
            Block::List(content::inclusions(kind).iter().map(|s| s.to_string()).collect()),
        ),
        panel("Terms & Conditions", Column::Full, Block::List(content::terms(kind))),
        panel(
            "Contact",
            Column::Full,
            Block::Fields(vec![
                field("Agency", agency.name.clone()),
                field("Contact Number", agency.contact_number.clone()),
                field("Mobile Number", agency.mobile_number.clone()),
                field("Email", agency.email.clone()),
            ]),
        ),
    ]
}

// ==========================================
// Terminal rendering
// ==========================================

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut head = Table::new();
        head.set_content_arrangement(ContentArrangement::Dynamic);
        head.set_header(vec![
            Cell::new(&self.title).add_attribute(Attribute::Bold),
            Cell::new(self.reference_label),
        ]);
        head.add_row(vec![
            Cell::new(self.tagline),
            Cell::new(&self.reference).add_attribute(Attribute::Bold),
        ]);
        writeln!(f, "{head}")?;

        for p in &self.panels {
            writeln!(f, "{}", panel_table(p))?;
        }
        Ok(())
    }
}

fn panel_table(p: &Panel) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let heading = Cell::new(&p.heading)
        .add_attribute(Attribute::Bold)
        .fg(Color::Rgb { r: 30, g: 58, b: 138 });

    match &p.body {
        Block::Fields(fields) => {
            table.set_header(vec![heading, Cell::new("")]);
            for fld in fields {
                let value = Cell::new(&fld.value);
                let value = if fld.label == "Warning" {
                    value.fg(Color::Rgb { r: 185, g: 28, b: 28 })
                } else {
                    value
                };
                table.add_row(vec![Cell::new(&fld.label), value]);
            }
        }
        Block::Table { header, rows } => {
            table.set_header(vec![heading]);
            table.add_row(header.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
            for row in rows {
                table.add_row(row.iter().map(Cell::new));
            }
        }
        Block::List(items) => {
            table.set_header(vec![heading]);
            for (i, item) in items.iter().enumerate() {
                table.add_row(vec![Cell::new(format!("{}. {}", i + 1, item))]);
            }
        }
        Block::Banner { title, note } => {
            table.set_header(vec![Cell::new(title)
                .add_attribute(Attribute::Bold)
                .fg(Color::Rgb { r: 4, g: 120, b: 87 })]);
            table.add_row(vec![Cell::new(note)]);
        }
    }
    table
}
