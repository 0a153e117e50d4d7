use std::future::ready;

use csr_agents_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct RentalInvoiceParameters {
    #[schemars(description = "The booking identifier.")]
    booking_id: String,
    #[schemars(description = "The amount to invoice, as given by the customer.")]
    amount: String,
}

/// A tool for generating a rental invoice.
pub struct RentalInvoiceTool {
    parameter_schema: Value,
}

impl RentalInvoiceTool {
    /// Creates a new rental invoice tool.
    #[inline]
    pub fn new() -> Self {
        RentalInvoiceTool {
            parameter_schema: schema_for!(RentalInvoiceParameters).to_value(),
        }
    }
}

impl Default for RentalInvoiceTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for RentalInvoiceTool {
    type Input = RentalInvoiceParameters;

    fn name(&self) -> &str {
        "get_rental_invoice"
    }

    fn description(&self) -> &str {
        "Generates the invoice of a campervan rental booking."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: RentalInvoiceParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(Ok(format!("{} invoice is {}", input.booking_id, input.amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invoice() {
        let tool = RentalInvoiceTool::new();
        let result = tool
            .execute(RentalInvoiceParameters {
                booking_id: "300".to_owned(),
                amount: "$1,250".to_owned(),
            })
            .await;
        assert_eq!(result.unwrap(), "300 invoice is $1,250");
    }
}
