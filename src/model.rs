use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Hotel,
    Flight,
}

impl DocumentKind {
    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Hotel => "Hotel Voucher",
            DocumentKind::Flight => "Flight Voucher",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Hotel => f.write_str("hotel"),
            DocumentKind::Flight => f.write_str("flight"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    #[default]
    Standard,
    Deluxe,
    Suite,
    Family,
    Executive,
}

impl RoomType {
    pub const ALL: [RoomType; 5] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Suite,
        RoomType::Family,
        RoomType::Executive,
    ];

    pub fn value(self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Suite => "suite",
            RoomType::Family => "family",
            RoomType::Executive => "executive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomType::Standard => "Standard Room",
            RoomType::Deluxe => "Deluxe Room",
            RoomType::Suite => "Suite",
            RoomType::Family => "Family Room",
            RoomType::Executive => "Executive Suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RoomType::ALL
            .into_iter()
            .find(|t| matches_choice(s, t.value(), t.label()))
            .ok_or_else(|| Error::validation("room_type", format!("unknown room type {:?}", s)))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MealPlan {
    #[default]
    RoomOnly,
    Breakfast,
    HalfBoard,
    FullBoard,
    AllInclusive,
}

impl MealPlan {
    pub const ALL: [MealPlan; 5] = [
        MealPlan::RoomOnly,
        MealPlan::Breakfast,
        MealPlan::HalfBoard,
        MealPlan::FullBoard,
        MealPlan::AllInclusive,
    ];

    pub fn value(self) -> &'static str {
        match self {
            MealPlan::RoomOnly => "room_only",
            MealPlan::Breakfast => "breakfast",
            MealPlan::HalfBoard => "half_board",
            MealPlan::FullBoard => "full_board",
            MealPlan::AllInclusive => "all_inclusive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealPlan::RoomOnly => "Room Only",
            MealPlan::Breakfast => "Breakfast Included",
            MealPlan::HalfBoard => "Half Board",
            MealPlan::FullBoard => "Full Board",
            MealPlan::AllInclusive => "All Inclusive",
        }
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealPlan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MealPlan::ALL
            .into_iter()
            .find(|p| matches_choice(s, p.value(), p.label()))
            .ok_or_else(|| Error::validation("meal_plan", format!("unknown meal plan {:?}", s)))
    }
}

// Accepts the stored value ("half_board") or the menu label ("Half Board").
fn matches_choice(input: &str, value: &str, label: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case(value) || input.eq_ignore_ascii_case(label)
}

/// Static contact block printed on every voucher.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AgencyProfile {
    pub name: String,
    pub contact_number: String,
    pub mobile_number: String,
    pub email: String,
    pub gstin: String,
    pub state_address: String,
    pub logo_path: String,
    pub closing_line: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelBooking {
    pub booking_reference: String,
    pub hotel_name: String,
    pub guest_names: Vec<String>,
    #[serde(default)]
    pub multiple_guests: bool,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub room_type: RoomType,
    pub room_count: u32,
    pub meal_plan: MealPlan,
}

impl HotelBooking {
    pub fn primary_guest(&self) -> &str {
        self.guest_names.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FlightBooking {
    pub flight_number: String,
    pub airline_name: String,
    pub passenger_name: String,
    pub travel_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
}

/// A canonical booking, tagged with the voucher it produces.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Booking {
    Hotel(HotelBooking),
    Flight(FlightBooking),
}

impl Booking {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Booking::Hotel(_) => DocumentKind::Hotel,
            Booking::Flight(_) => DocumentKind::Flight,
        }
    }

    /// Hotel vouchers carry a generated reference; flights are identified by flight number.
    pub fn reference(&self) -> &str {
        match self {
            Booking::Hotel(h) => &h.booking_reference,
            Booking::Flight(f) => &f.flight_number,
        }
    }

    pub fn lead_name(&self) -> &str {
        match self {
            Booking::Hotel(h) => h.primary_guest(),
            Booking::Flight(f) => &f.passenger_name,
        }
    }
}

// ==========================================
// Raw form records
// ==========================================

/// A count as typed into the form: either already numeric or free text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawNumber {
    Integer(i64),
    Text(String),
}

impl Default for RawNumber {
    fn default() -> Self {
        RawNumber::Text(String::new())
    }
}

impl From<u32> for RawNumber {
    fn from(n: u32) -> Self {
        RawNumber::Integer(i64::from(n))
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawNumber::Integer(n) => write!(f, "{}", n),
            RawNumber::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RawHotelForm {
    pub booking_reference: Option<String>,
    pub hotel_name: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub adults: RawNumber,
    pub children: RawNumber,
    pub multiple_guests: bool,
    pub guest_names: Vec<String>,
    pub room_type: String,
    pub room_count: RawNumber,
    pub meal_plan: String,
}

impl From<&HotelBooking> for RawHotelForm {
    fn from(b: &HotelBooking) -> Self {
        RawHotelForm {
            booking_reference: Some(b.booking_reference.clone()),
            hotel_name: b.hotel_name.clone(),
            check_in_date: b.check_in_date.format("%Y-%m-%d").to_string(),
            check_out_date: b.check_out_date.format("%Y-%m-%d").to_string(),
            adults: b.adults.into(),
            children: b.children.into(),
            multiple_guests: b.multiple_guests,
            guest_names: b.guest_names.clone(),
            room_type: b.room_type.value().to_string(),
            room_count: b.room_count.into(),
            meal_plan: b.meal_plan.value().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RawFlightForm {
    pub flight_number: String,
    pub airline_name: String,
    pub passenger_name: String,
    pub travel_date: String,
    pub return_date: String,
    pub adults: RawNumber,
    pub children: RawNumber,
}

impl From<&FlightBooking> for RawFlightForm {
    fn from(b: &FlightBooking) -> Self {
        RawFlightForm {
            flight_number: b.flight_number.clone(),
            airline_name: b.airline_name.clone(),
            passenger_name: b.passenger_name.clone(),
            travel_date: b.travel_date.format("%Y-%m-%d").to_string(),
            return_date: b
                .return_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            adults: b.adults.into(),
            children: b.children.into(),
        }
    }
}
