use std::future::ready;

use csr_agents_core::money::format_usd;
use csr_agents_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single item the customer wants refunded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RefundItem {
    /// Code of the charged item.
    #[schemars(description = "Code of the charged item.")]
    pub item_code: String,
    /// Amount to refund, in dollars.
    #[schemars(description = "Amount to refund, in dollars.")]
    pub amount: f64,
}

/// A refund request for a rental booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RefundRequest {
    /// The booking identifier.
    #[schemars(description = "The booking identifier.")]
    pub booking_id: String,
    /// Where the refund confirmation goes.
    #[schemars(description = "Email address of the customer.")]
    pub customer_email: String,
    /// Reason given by the customer.
    #[schemars(description = "Why the customer wants a refund.")]
    pub reason: String,
    /// Items to refund.
    #[schemars(description = "Items to refund, may be empty.")]
    pub requests: Vec<RefundItem>,
}

impl RefundRequest {
    /// Sum of all item amounts.
    pub fn total(&self) -> f64 {
        self.requests.iter().map(|item| item.amount).sum()
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct RentalRefundParameters {
    #[schemars(description = "The refund request.")]
    request: RefundRequest,
}

/// A tool for filing a refund of a rental booking.
pub struct RentalRefundTool {
    parameter_schema: Value,
}

impl RentalRefundTool {
    /// Creates a new rental refund tool.
    #[inline]
    pub fn new() -> Self {
        RentalRefundTool {
            parameter_schema: schema_for!(RentalRefundParameters).to_value(),
        }
    }
}

impl Default for RentalRefundTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for RentalRefundTool {
    type Input = RentalRefundParameters;

    fn name(&self) -> &str {
        "process_rental_refund"
    }

    fn description(&self) -> &str {
        r#"
Files a refund for a campervan rental booking.
Requires the booking id, the customer email, the reason, and the items to refund."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: RentalRefundParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(process_refund(&input.request))
    }
}

fn process_refund(request: &RefundRequest) -> ToolResult {
    if let Some(item) = request
        .requests
        .iter()
        .find(|item| !item.amount.is_finite() || item.amount < 0.0)
    {
        return Err(ToolError::invalid_input().with_reason(format!(
            "refund amount of `{}` must be a non-negative number",
            item.item_code
        )));
    }

    let mut message = format!(
        "Refund for booking id: {} will be sent to {}, Reason specified is {}",
        request.booking_id, request.customer_email, request.reason
    );
    if !request.requests.is_empty() {
        message.push_str(&format!(
            ". Total refund requested: {}",
            format_usd(request.total())
        ));
    }
    debug!(
        "refund filed for booking {} with {} items",
        request.booking_id,
        request.requests.len()
    );
    Ok(message)
}
