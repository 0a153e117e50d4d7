use std::future::ready;

use csr_agents_core::mortgage::LoanQuoteRequest;
use csr_agents_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct MortgageParameters {
    #[schemars(description = "The amount borrowed, in dollars.")]
    principal_amount: f64,
    #[schemars(description = "Annual interest rate in percent, e.g. 7 for 7%.")]
    annualized_rate: f64,
    #[schemars(description = "Loan term in whole years.")]
    number_of_years: u32,
}

/// A tool for quoting the monthly payment of a fixed-rate mortgage.
pub struct MortgageTool {
    parameter_schema: Value,
}

impl MortgageTool {
    /// Creates a new mortgage tool.
    #[inline]
    pub fn new() -> Self {
        MortgageTool {
            parameter_schema: schema_for!(MortgageParameters).to_value(),
        }
    }
}

impl Default for MortgageTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for MortgageTool {
    type Input = MortgageParameters;

    fn name(&self) -> &str {
        "calculate_mortgage"
    }

    fn description(&self) -> &str {
        r#"
Calculates the fixed monthly payment of a fully amortizing mortgage.
Returns the payment in US dollars, e.g. "$5,322.42."."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: MortgageParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let request = LoanQuoteRequest::new(
            input.principal_amount,
            input.annualized_rate,
            input.number_of_years,
        );
        let result = request
            .quote()
            .map(|quote| format!("{quote}."))
            .map_err(|err| ToolError::invalid_input().with_reason(err.to_string()));
        ready(result)
    }
}
