//! Simulated customers for the customer service demo.

use rand::Rng;

/// What customers may want when they reach out.
pub const PURPOSE_POOL: [&str; 17] = [
    "I want to request for invoice.",
    "I want to do cancellation.",
    "I want to inquire about the status.",
    "I want to ask to move the pickup date.",
    "I want to ask if there are some promos I can grab.",
    "I want to upgrade my campervan.",
    "I want to add extra insurance coverage.",
    "I want to change the drop-off location.",
    "I want to extend my rental period.",
    "I want to ask about payment options.",
    "I want to report an issue with my booking.",
    "I want to confirm if pets are allowed.",
    "I want to request a child seat.",
    "I want to ask about fuel policy.",
    "I want to check if I can pick up earlier.",
    "I want to ask about cancellation fees.",
    "I want to ask refund. My email is jane.doe@example.com. Customer id is 999. \
     It is pricey for me.",
];

/// Booking ids the simulated customers hold.
pub const BOOKING_ID_POOL: [u32; 4] = [100, 200, 300, 400];

/// A simulated customer: why they reach out and which booking they hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CustomerContext {
    purpose: &'static str,
    booking_id: u32,
}

impl CustomerContext {
    /// Creates a customer context.
    #[inline]
    pub fn new(purpose: &'static str, booking_id: u32) -> Self {
        Self {
            purpose,
            booking_id,
        }
    }

    /// Draws a purpose and a booking id from the pools.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let purpose = PURPOSE_POOL[rng.random_range(0..PURPOSE_POOL.len())];
        let booking_id = BOOKING_ID_POOL[rng.random_range(0..BOOKING_ID_POOL.len())];
        Self::new(purpose, booking_id)
    }

    /// Returns the purpose.
    #[inline]
    pub fn purpose(&self) -> &'static str {
        self.purpose
    }

    /// Returns the booking id.
    #[inline]
    pub fn booking_id(&self) -> u32 {
        self.booking_id
    }

    /// Returns the message the customer opens the conversation with.
    pub fn message(&self) -> String {
        format!("{} My booking number is {}", self.purpose, self.booking_id)
    }
}
