//! Interactive booking form
//!
//! Collects raw, unvalidated values; checking them is the normalizer's job.
//! A previous draft pre-fills every prompt when the user comes back from
//! the preview.

use chrono::{Duration, Local, NaiveDate};
use inquire::{Confirm, DateSelect, Select, Text};
use rand::Rng;

use crate::dates::parse_date;
use crate::model::{DocumentKind, MealPlan, RawFlightForm, RawHotelForm, RawNumber, RoomType};
use crate::reference::hotel_reference;

const HOTEL_TAB: &str = "🏨 Hotel Voucher";
const FLIGHT_TAB: &str = "✈️  Flight Voucher";

pub fn select_kind() -> anyhow::Result<DocumentKind> {
    let choice = Select::new("Voucher type:", vec![HOTEL_TAB, FLIGHT_TAB]).prompt()?;
    Ok(if choice == HOTEL_TAB {
        DocumentKind::Hotel
    } else {
        DocumentKind::Flight
    })
}

pub fn collect_hotel<R: Rng>(
    draft: Option<&RawHotelForm>,
    rng: &mut R,
) -> anyhow::Result<RawHotelForm> {
    let draft = draft.cloned().unwrap_or_default();
    println!("\n--- Hotel Voucher ---");

    // Pre-filled like the form's "Generate" button.
    let reference_default = draft
        .booking_reference
        .clone()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| hotel_reference(rng));
    let booking_reference = Text::new("Booking Number:")
        .with_default(&reference_default)
        .prompt()?;

    let hotel_name = Text::new("Hotel Name:")
        .with_default(&draft.hotel_name)
        .prompt()?;

    let check_in = DateSelect::new("Check-in Date:")
        .with_default(draft_date(&draft.check_in_date).unwrap_or_else(today))
        .prompt()?;
    let check_out = DateSelect::new("Check-out Date:")
        .with_default(draft_date(&draft.check_out_date).unwrap_or(check_in + Duration::days(1)))
        .prompt()?;

    let room_type = Select::new("Room Type:", RoomType::ALL.to_vec())
        .with_starting_cursor(menu_cursor(&RoomType::ALL, &draft.room_type))
        .prompt()?;
    let room_count = number_prompt("Number of Rooms:", &draft.room_count, "1")?;
    let meal_plan = Select::new("Meal Plan:", MealPlan::ALL.to_vec())
        .with_starting_cursor(menu_cursor(&MealPlan::ALL, &draft.meal_plan))
        .prompt()?;

    let adults = number_prompt("Adults:", &draft.adults, "1")?;
    let children = number_prompt("Children:", &draft.children, "0")?;

    // Only offered for parties of two or more; a bad count is reported later.
    let party = party_hint(&adults, &children);
    let multiple_guests = party > 1
        && Confirm::new("Enter names for all guests?")
            .with_default(draft.multiple_guests)
            .prompt()?;

    let guest_names = if multiple_guests {
        let names = Text::new(&format!("Guest Names ({} guests):", party))
            .with_default(&draft.guest_names.join(", "))
            .with_help_message(&format!(
                "Separate names with commas. {} names expected ({} adults and {} children).",
                party,
                adults,
                children
            ))
            .prompt()?;
        names.split(',').map(|n| n.trim().to_string()).collect()
    } else {
        let label = if party > 1 { "Primary Guest Name:" } else { "Guest Name:" };
        let primary = draft.guest_names.first().cloned().unwrap_or_default();
        vec![Text::new(label).with_default(&primary).prompt()?]
    };

    Ok(RawHotelForm {
        booking_reference: Some(booking_reference),
        hotel_name,
        check_in_date: iso(check_in),
        check_out_date: iso(check_out),
        adults,
        children,
        multiple_guests,
        guest_names,
        room_type: room_type.value().to_string(),
        room_count,
        meal_plan: meal_plan.value().to_string(),
    })
}

pub fn collect_flight(draft: Option<&RawFlightForm>) -> anyhow::Result<RawFlightForm> {
    let draft = draft.cloned().unwrap_or_default();
    println!("\n--- Flight Voucher ---");

    let flight_number = Text::new("Flight Number:")
        .with_default(&draft.flight_number)
        .with_placeholder("e.g., AI-202")
        .prompt()?;
    let airline_name = Text::new("Airline Name:")
        .with_default(&draft.airline_name)
        .prompt()?;
    let passenger_name = Text::new("Passenger Name:")
        .with_default(&draft.passenger_name)
        .prompt()?;

    let travel = DateSelect::new("Travel Date:")
        .with_default(draft_date(&draft.travel_date).unwrap_or_else(today))
        .prompt()?;
    let has_return = Confirm::new("Add a return date?")
        .with_default(draft.travel_date.is_empty() || !draft.return_date.is_empty())
        .prompt()?;
    let return_date = if has_return {
        let d = DateSelect::new("Return Date:")
            .with_default(draft_date(&draft.return_date).unwrap_or(travel + Duration::days(1)))
            .prompt()?;
        iso(d)
    } else {
        String::new()
    };

    let adults = number_prompt("Adults:", &draft.adults, "1")?;
    let children = number_prompt("Children:", &draft.children, "0")?;

    Ok(RawFlightForm {
        flight_number,
        airline_name,
        passenger_name,
        travel_date: iso(travel),
        return_date,
        adults,
        children,
    })
}

fn number_prompt(message: &str, draft: &RawNumber, fallback: &str) -> anyhow::Result<RawNumber> {
    let current = draft.to_string();
    let default = if current.trim().is_empty() { fallback } else { current.as_str() };
    Ok(RawNumber::Text(Text::new(message).with_default(default).prompt()?))
}

fn count_hint(value: &RawNumber) -> u32 {
    match value {
        RawNumber::Integer(n) => u32::try_from(*n).unwrap_or(0),
        RawNumber::Text(s) => s.trim().parse().unwrap_or(0),
    }
}

fn party_hint(adults: &RawNumber, children: &RawNumber) -> u32 {
    count_hint(adults).saturating_add(count_hint(children))
}

fn menu_cursor<T: std::str::FromStr + PartialEq>(options: &[T], current: &str) -> usize {
    current
        .parse::<T>()
        .ok()
        .and_then(|c| options.iter().position(|o| *o == c))
        .unwrap_or(0)
}

fn draft_date(value: &str) -> Option<NaiveDate> {
    parse_date("draft", value).ok()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
