//! Computed voucher fields shared by the preview and the printable document
//!
//! Both renderers call [`derive_fields`] and never compute durations or
//! party summaries on their own, so the two outputs cannot disagree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Booking, DocumentKind};

/// Whole days between two dates, ignoring order.
pub fn derive_nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// `"2 Adults - 1 Child"`. A noun is plural unless its count is exactly one.
pub fn derive_guest_summary(adults: u32, children: u32) -> String {
    format!(
        "{} - {}",
        counted(adults, "Adult", "Adults"),
        counted(children, "Child", "Children")
    )
}

pub(crate) fn counted(n: u32, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedFields {
    pub kind: DocumentKind,
    /// "Guest" or "Passenger"
    pub party_label: &'static str,
    pub party_size: u32,
    pub guest_summary: String,
    pub start_label: &'static str,
    pub start: NaiveDate,
    pub end_label: &'static str,
    pub end: Option<NaiveDate>,
    /// Nights for a stay, days for a return trip, `None` for one-way.
    pub duration: Option<u32>,
    pub duration_label: &'static str,
    pub duration_text: String,
    /// End date precedes start date; the duration is still positive.
    pub reversed: bool,
}

pub fn derive_fields(booking: &Booking) -> DerivedFields {
    match booking {
        Booking::Hotel(h) => {
            let nights = derive_nights(h.check_in_date, h.check_out_date);
            DerivedFields {
                kind: DocumentKind::Hotel,
                party_label: "Guest",
                party_size: h.adults.saturating_add(h.children),
                guest_summary: derive_guest_summary(h.adults, h.children),
                start_label: "Check-in",
                start: h.check_in_date,
                end_label: "Check-out",
                end: Some(h.check_out_date),
                duration: Some(nights),
                duration_label: "Total Duration",
                duration_text: counted(nights, "Night", "Nights"),
                reversed: h.check_out_date < h.check_in_date,
            }
        }
        Booking::Flight(f) => {
            let days = f.return_date.map(|r| derive_nights(f.travel_date, r));
            DerivedFields {
                kind: DocumentKind::Flight,
                party_label: "Passenger",
                party_size: f.adults.saturating_add(f.children),
                guest_summary: derive_guest_summary(f.adults, f.children),
                start_label: "Departure",
                start: f.travel_date,
                end_label: "Return",
                end: f.return_date,
                duration: days,
                duration_label: "Trip Duration",
                duration_text: match days {
                    Some(d) => counted(d, "Day", "Days"),
                    None => "One-way".to_string(),
                },
                reversed: f.return_date.is_some_and(|r| r < f.travel_date),
            }
        }
    }
}
