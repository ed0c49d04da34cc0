//! # pos-receipt
//!
//! Sale receipts for the preschool point of sale.
//!
//! A stored sale becomes a [`SaleReceiptRequest`], which the
//! [`ReceiptRenderer`] turns into either an ESC/POS byte stream for the
//! thermal printer or a plain text preview. Printer I/O comes from
//! `ticket-printer`.
//!
//! ```ignore
//! use pos_receipt::{PrinterLayoutConfig, ReceiptService};
//! use ticket_printer::NetworkPrinter;
//!
//! let layout = PrinterLayoutConfig::for_paper_mm(80).with_logo("logo.png");
//! let service = ReceiptService::new(NetworkPrinter::new("192.168.1.50", 9100)?, layout);
//!
//! let request = draft.finalize(sale_id, &business)?;
//! if let Err(e) = service.print(&request).await {
//!     show_message(&e.user_message());
//! }
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod logger;
pub mod money;
pub mod profile;
pub mod renderer;
pub mod sale;
pub mod service;
pub mod types;

// Re-exports
pub use config::{Config, PrinterTarget, TargetPrinter};
pub use error::{PRINT_FAILED_MESSAGE, ReceiptError, SaleError};
pub use layout::{LineStyle, PrinterLayoutConfig, ReceiptWriter, SizeHint};
pub use logger::init_logger;
pub use money::{format_money, round_money};
pub use profile::{
    BusinessProfileProvider, JsonProfileProvider, StaticProfileProvider, apply_profile,
    resolve_profile,
};
pub use renderer::ReceiptRenderer;
pub use sale::{CatalogProduct, Customer, PaymentMethod, SaleDraft, folio_for};
pub use service::ReceiptService;
pub use types::{BusinessProfile, LineItem, SaleReceiptRequest, SaleTotals};
