use std::fmt::{self, Display};
use std::future::ready;

use csr_agents_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

const INQUIRY_BOOKINGS: [i64; 2] = [100, 200];
const CONFIRMED_BOOKINGS: [i64; 2] = [300, 400];

/// A booking identifier, sent either as a number or as a string of digits.
#[derive(Clone, Debug, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum BookingId {
    /// An integer identifier.
    Number(i64),
    /// A number with a fractional part or outside the `i64` range.
    Float(f64),
    /// A textual identifier, which may or may not hold a number.
    Text(String),
}

impl BookingId {
    /// Returns the identifier as an integer, if it is one.
    ///
    /// Floats count only when they are whole, so `100.0` is booking 100 and
    /// `100.5` is no booking at all.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            BookingId::Number(id) => Some(*id),
            BookingId::Float(id) => {
                let in_range = *id >= i64::MIN as f64 && *id < i64::MAX as f64;
                (id.fract() == 0.0 && in_range).then_some(*id as i64)
            }
            BookingId::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Status of a campervan booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// The customer asked about the booking but hasn't committed.
    Inquiry,
    /// The booking is paid and confirmed.
    Confirmed,
    /// The booking is not known.
    Unknown,
}

impl BookingStatus {
    /// Looks up the status of a booking.
    pub fn of(booking_id: &BookingId) -> Self {
        match booking_id.as_number() {
            Some(id) if INQUIRY_BOOKINGS.contains(&id) => BookingStatus::Inquiry,
            Some(id) if CONFIRMED_BOOKINGS.contains(&id) => {
                BookingStatus::Confirmed
            }
            _ => BookingStatus::Unknown,
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Inquiry => write!(f, "Inquiry"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
            BookingStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct BookingStatusParameters {
    #[schemars(
        description = "The booking identifier, a number or a string containing digits."
    )]
    booking_id: BookingId,
}

/// A tool for checking the status of a campervan booking.
pub struct BookingStatusTool {
    parameter_schema: Value,
}

impl BookingStatusTool {
    /// Creates a new booking status tool.
    #[inline]
    pub fn new() -> Self {
        BookingStatusTool {
            parameter_schema: schema_for!(BookingStatusParameters).to_value(),
        }
    }
}

impl Default for BookingStatusTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for BookingStatusTool {
    type Input = BookingStatusParameters;

    fn name(&self) -> &str {
        "get_booking_status"
    }

    fn description(&self) -> &str {
        r#"
Returns the status for a campervan booking.
One of: "Inquiry", "Confirmed", or "Unknown"."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: BookingStatusParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let status = BookingStatus::of(&input.booking_id);
        trace!("booking {:?} is {status}", input.booking_id);
        ready(Ok(status.to_string()))
    }
}
