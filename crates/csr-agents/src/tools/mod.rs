//! A set of built-in tools that the demo agents use.

mod booking_status;
pub mod crypto;
mod mortgage;
mod rental_invoice;
mod rental_refund;

use csr_agents_core::tool::Registry;

pub use booking_status::{BookingId, BookingStatus, BookingStatusTool};
pub use crypto::{
    BitcoinPriceTool, CoinGeckoClient, CryptoPricesTool, PriceError,
    PriceSource, PriceTable,
};
pub use mortgage::MortgageTool;
pub use rental_invoice::RentalInvoiceTool;
pub use rental_refund::{RefundItem, RefundRequest, RentalRefundTool};

/// Creates a registry holding every built-in tool.
///
/// Both price tools share `price_source`.
pub fn registry<S: PriceSource + Clone>(price_source: S) -> Registry {
    Registry::new()
        .with_tool(MortgageTool::new())
        .with_tool(BookingStatusTool::new())
        .with_tool(RentalInvoiceTool::new())
        .with_tool(RentalRefundTool::new())
        .with_tool(CryptoPricesTool::new(price_source.clone()))
        .with_tool(BitcoinPriceTool::new(price_source))
}
