//! Fixed voucher content. None of it depends on the booking beyond its kind.

use serde::Serialize;

use crate::model::DocumentKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub description: &'static str,
    pub unit: u32,
    pub quantity: u32,
    pub gst: &'static str,
    pub amount: u32,
    pub taxable: u32,
}

pub const TOTAL_PAYABLE: u32 = 32863;

/// Package table columns after the item heading
pub const LINE_ITEM_HEADERS: [&str; 5] = ["Unit", "Quantity", "GST", "Amount", "Taxable Pay GST+Service"];

/// First column heading of the package table
pub fn item_heading(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Hotel => "Room Type",
        DocumentKind::Flight => "Flight Type",
    }
}

pub fn line_items(kind: DocumentKind) -> Vec<LineItem> {
    let (first, second) = match kind {
        DocumentKind::Hotel => ("Single Room", "Double Room"),
        DocumentKind::Flight => ("Economy Class", "Business Class"),
    };
    vec![
        LineItem {
            description: first,
            unit: 1,
            quantity: 2,
            gst: "18%",
            amount: 16850,
            taxable: 19883,
        },
        LineItem {
            description: second,
            unit: 1,
            quantity: 1,
            gst: "18%",
            amount: 11000,
            taxable: 12980,
        },
    ]
}

pub fn inclusions(kind: DocumentKind) -> [&'static str; 8] {
    match kind {
        DocumentKind::Hotel => [
            "Breakfast",
            "Pool",
            "Daily House Keeping",
            "Garden",
            "Wifi",
            "Smoking rooms",
            "Air conditioning",
            "Safety deposit box",
        ],
        DocumentKind::Flight => [
            "In-flight meals",
            "Seat selection",
            "Baggage allowance",
            "Lounge access",
            "Entertainment",
            "Wi-Fi",
            "Priority boarding",
            "Travel insurance",
        ],
    }
}

pub fn terms(kind: DocumentKind) -> Vec<String> {
    let venue = match kind {
        DocumentKind::Hotel => "hotel",
        DocumentKind::Flight => "airport",
    };
    vec![
        "All booking must be made in advance.".to_string(),
        "Booking made with vouchers is not refundable in cash.".to_string(),
        "Vouchers are not refundable in cash or replaceable if lost, destroyed, or stolen."
            .to_string(),
        format!(
            "All vouchers must be presented by the bearer on arrival at the {} and must be mentioned when booking.",
            venue
        ),
        "Any remaining amount is not exchangeable for cash or another voucher and will be automatically forfeited."
            .to_string(),
    ]
}

/// Fare summary shown under a flight preview
pub const FLIGHT_HIGHLIGHTS: [(&str, &str); 3] = [
    ("Seat Class", "Economy"),
    ("Baggage", "20kg Included"),
    ("Status", "CONFIRMED"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_items_add_up_to_total() {
        for kind in [DocumentKind::Hotel, DocumentKind::Flight] {
            let sum: u32 = line_items(kind).iter().map(|i| i.taxable).sum();
            assert_eq!(sum, TOTAL_PAYABLE);
        }
    }

    #[test]
    fn terms_name_the_venue() {
        assert!(terms(DocumentKind::Hotel)[3].contains("at the hotel"));
        assert!(terms(DocumentKind::Flight)[3].contains("at the airport"));
    }
}
