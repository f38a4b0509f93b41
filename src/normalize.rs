//! Turns raw form records into canonical bookings
//!
//! Every failure names the offending field. Nothing is defaulted except the
//! hotel reference and the two menu choices, which the form pre-selects.

use log::{debug, warn};
use rand::Rng;

use crate::dates::{parse_date, parse_optional_date};
use crate::error::{Error, Result};
use crate::model::{
    FlightBooking, HotelBooking, MealPlan, RawFlightForm, RawHotelForm, RawNumber, RoomType,
};
use crate::reference::hotel_reference;

pub fn normalize_hotel<R: Rng>(raw: &RawHotelForm, rng: &mut R) -> Result<HotelBooking> {
    let booking_reference = match raw.booking_reference.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => {
            let generated = hotel_reference(rng);
            debug!("Assigned booking reference {}", generated);
            generated
        }
    };

    let hotel_name = required_text("hotel_name", &raw.hotel_name)?;
    let check_in_date = parse_date("check_in_date", &raw.check_in_date)?;
    let check_out_date = parse_date("check_out_date", &raw.check_out_date)?;

    let adults = parse_count("adults", &raw.adults)?;
    if adults == 0 {
        return Err(Error::validation("adults", "at least one adult is required"));
    }
    let children = parse_count("children", &raw.children)?;
    let room_count = parse_count("room_count", &raw.room_count)?;
    if room_count == 0 {
        return Err(Error::validation("room_count", "at least one room is required"));
    }

    let room_type = parse_choice::<RoomType>(&raw.room_type)?;
    let meal_plan = parse_choice::<MealPlan>(&raw.meal_plan)?;

    let party = party_size(adults, children)?;
    // The per-guest list is only offered for parties of two or more.
    let multiple_guests = raw.multiple_guests && party > 1;
    let names: Vec<String> = raw
        .guest_names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect();

    let guest_names = if multiple_guests {
        if names.len() != party as usize {
            return Err(Error::validation(
                "guest_names",
                format!(
                    "{} names expected ({} adults and {} children), got {}",
                    party,
                    adults,
                    children,
                    names.len()
                ),
            ));
        }
        names
    } else {
        match names.into_iter().next() {
            Some(primary) => vec![primary],
            None => return Err(Error::validation("guest_names", "guest name is required")),
        }
    };

    if check_out_date < check_in_date {
        warn!(
            "Check-out {} is before check-in {} for {}",
            check_out_date, check_in_date, booking_reference
        );
    }

    Ok(HotelBooking {
        booking_reference,
        hotel_name,
        guest_names,
        multiple_guests,
        check_in_date,
        check_out_date,
        adults,
        children,
        room_type,
        room_count,
        meal_plan,
    })
}

pub fn normalize_flight(raw: &RawFlightForm) -> Result<FlightBooking> {
    let flight_number = required_text("flight_number", &raw.flight_number)?;
    let airline_name = required_text("airline_name", &raw.airline_name)?;
    let passenger_name = required_text("passenger_name", &raw.passenger_name)?;
    let travel_date = parse_date("travel_date", &raw.travel_date)?;
    let return_date = parse_optional_date("return_date", &raw.return_date)?;

    let adults = parse_count("adults", &raw.adults)?;
    if adults == 0 {
        return Err(Error::validation("adults", "at least one adult is required"));
    }
    let children = parse_count("children", &raw.children)?;
    party_size(adults, children)?;

    debug!("Normalized flight {} for {}", flight_number, passenger_name);

    Ok(FlightBooking {
        flight_number,
        airline_name,
        passenger_name,
        travel_date,
        return_date,
        adults,
        children,
    })
}

fn required_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "value is required"));
    }
    Ok(trimmed.to_string())
}

/// Non-negative integer count. Blank text is a failed parse, not zero.
fn parse_count(field: &'static str, value: &RawNumber) -> Result<u32> {
    match value {
        RawNumber::Integer(n) => u32::try_from(*n)
            .map_err(|_| Error::validation(field, format!("{} is not a non-negative integer", n))),
        RawNumber::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::validation(field, format!("{:?} is not a non-negative integer", s))),
    }
}

fn party_size(adults: u32, children: u32) -> Result<u32> {
    adults
        .checked_add(children)
        .ok_or_else(|| Error::validation("children", "party size too large"))
}

fn parse_choice<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = Error> + Default,
{
    if value.trim().is_empty() {
        return Ok(T::default());
    }
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use regex::Regex;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    fn raw_hotel() -> RawHotelForm {
        RawHotelForm {
            booking_reference: Some("HOTEL123456".into()),
            hotel_name: " Taj Palace ".into(),
            check_in_date: "2024-01-10".into(),
            check_out_date: "2024-01-15".into(),
            adults: RawNumber::Integer(2),
            children: RawNumber::Text("1".into()),
            multiple_guests: false,
            guest_names: vec!["Aakash".into()],
            room_type: "deluxe".into(),
            room_count: RawNumber::Integer(1),
            meal_plan: "Breakfast Included".into(),
        }
    }

    fn raw_flight() -> RawFlightForm {
        RawFlightForm {
            flight_number: "AI-202".into(),
            airline_name: "Air India".into(),
            passenger_name: "Rohan".into(),
            travel_date: "2024-03-01".into(),
            return_date: "".into(),
            adults: RawNumber::Integer(1),
            children: RawNumber::Integer(0),
        }
    }

    fn field_of(err: Error) -> &'static str {
        match err {
            Error::Validation { field, .. } | Error::DateFormat { field, .. } => field,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn hotel_fields_are_canonicalized() {
        let b = normalize_hotel(&raw_hotel(), &mut rng()).unwrap();
        assert_eq!(b.booking_reference, "HOTEL123456");
        assert_eq!(b.hotel_name, "Taj Palace");
        assert_eq!(b.check_in_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(b.adults, 2);
        assert_eq!(b.children, 1);
        assert_eq!(b.room_type, RoomType::Deluxe);
        assert_eq!(b.meal_plan, MealPlan::Breakfast);
    }

    #[test]
    fn empty_reference_is_generated() {
        let re = Regex::new(r"^HOTEL\d{6}$").unwrap();
        for reference in [None, Some(String::new()), Some("   ".to_string())] {
            let mut raw = raw_hotel();
            raw.booking_reference = reference;
            let b = normalize_hotel(&raw, &mut rng()).unwrap();
            assert!(re.is_match(&b.booking_reference), "{}", b.booking_reference);
        }
    }

    #[test]
    fn single_name_mode_keeps_only_primary() {
        let mut raw = raw_hotel();
        raw.guest_names = vec!["".into(), "Aakash".into(), "Rohan".into()];
        let b = normalize_hotel(&raw, &mut rng()).unwrap();
        // Three guests but one name: the shorthand is allowed.
        assert_eq!(b.guest_names, vec!["Aakash".to_string()]);
        assert!(!b.multiple_guests);
    }

    #[test]
    fn multi_guest_mode_requires_every_name() {
        let mut raw = raw_hotel();
        raw.multiple_guests = true;
        raw.guest_names = vec!["Aakash".into(), " ".into(), "Rohan".into()];
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "guest_names");

        raw.guest_names.push("Pratik".into());
        let b = normalize_hotel(&raw, &mut rng()).unwrap();
        assert_eq!(b.guest_names, vec!["Aakash", "Rohan", "Pratik"]);
        assert!(b.multiple_guests);
    }

    #[test]
    fn multi_guest_flag_ignored_for_single_traveller() {
        let mut raw = raw_hotel();
        raw.adults = RawNumber::Integer(1);
        raw.children = RawNumber::Integer(0);
        raw.multiple_guests = true;
        let b = normalize_hotel(&raw, &mut rng()).unwrap();
        assert!(!b.multiple_guests);
        assert_eq!(b.guest_names.len(), 1);
    }

    #[test]
    fn missing_guest_name_is_rejected() {
        let mut raw = raw_hotel();
        raw.guest_names = vec!["  ".into()];
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "guest_names");
    }

    #[test]
    fn numeric_failures_name_the_field() {
        let mut raw = raw_hotel();
        raw.adults = RawNumber::Text("two".into());
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "adults");

        let mut raw = raw_hotel();
        raw.children = RawNumber::Integer(-1);
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "children");

        let mut raw = raw_hotel();
        raw.room_count = RawNumber::Text("".into());
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "room_count");

        let mut raw = raw_hotel();
        raw.room_count = RawNumber::Integer(0);
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "room_count");

        let mut raw_f = raw_flight();
        raw_f.adults = RawNumber::Integer(0);
        assert_eq!(field_of(normalize_flight(&raw_f).unwrap_err()), "adults");
    }

    #[test]
    fn oversized_party_is_rejected() {
        let mut raw = raw_hotel();
        raw.adults = RawNumber::Text(u32::MAX.to_string());
        raw.children = RawNumber::Integer(1);
        raw.multiple_guests = true;
        assert_eq!(field_of(normalize_hotel(&raw, &mut rng()).unwrap_err()), "children");

        let mut raw_f = raw_flight();
        raw_f.adults = RawNumber::Integer(i64::from(u32::MAX));
        raw_f.children = RawNumber::Integer(1);
        assert_eq!(field_of(normalize_flight(&raw_f).unwrap_err()), "children");

        raw_f.children = RawNumber::Integer(0);
        assert_eq!(normalize_flight(&raw_f).unwrap().adults, u32::MAX);
    }

    #[test]
    fn bad_dates_surface_as_date_errors() {
        let mut raw = raw_hotel();
        raw.check_out_date = "15th".into();
        match normalize_hotel(&raw, &mut rng()).unwrap_err() {
            Error::DateFormat { field, .. } => assert_eq!(field, "check_out_date"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn blank_menu_choices_take_defaults() {
        let mut raw = raw_hotel();
        raw.room_type = String::new();
        raw.meal_plan = " ".into();
        let b = normalize_hotel(&raw, &mut rng()).unwrap();
        assert_eq!(b.room_type, RoomType::Standard);
        assert_eq!(b.meal_plan, MealPlan::RoomOnly);
    }

    #[test]
    fn normalize_hotel_is_idempotent() {
        let mut raw = raw_hotel();
        raw.booking_reference = None;
        raw.multiple_guests = true;
        raw.guest_names = vec!["A".into(), "B".into(), "C".into()];
        let first = normalize_hotel(&raw, &mut rng()).unwrap();
        let again = normalize_hotel(&RawHotelForm::from(&first), &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn flight_without_return_is_one_way() {
        let f = normalize_flight(&raw_flight()).unwrap();
        assert_eq!(f.return_date, None);
        assert_eq!(f.flight_number, "AI-202");

        let again = normalize_flight(&RawFlightForm::from(&f)).unwrap();
        assert_eq!(f, again);
    }

    #[test]
    fn flight_requires_identity_fields() {
        for field in ["flight_number", "airline_name", "passenger_name"] {
            let mut raw = raw_flight();
            match field {
                "flight_number" => raw.flight_number.clear(),
                "airline_name" => raw.airline_name = "  ".into(),
                _ => raw.passenger_name.clear(),
            }
            assert_eq!(field_of(normalize_flight(&raw).unwrap_err()), field);
        }
    }
}
