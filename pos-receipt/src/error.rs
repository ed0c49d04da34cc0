//! Receipt error types

use thiserror::Error;
use ticket_printer::PrintError;

/// Message shown to the cashier when printing fails after a sale was saved
pub const PRINT_FAILED_MESSAGE: &str = "could not print, sale was still recorded";

/// Errors surfaced while printing or previewing a receipt
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Printer could not be opened or the write failed
    #[error("Printer unavailable: {0}")]
    Spooler(#[source] PrintError),

    /// Preview file could not be written
    #[error("Failed to write preview {path}: {source}")]
    Preview {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Business profile file exists but is unreadable or malformed
    #[error("Invalid business profile {path}: {reason}")]
    Profile { path: String, reason: String },

    /// Stored sale request could not be decoded
    #[error("Invalid sale request: {0}")]
    Request(#[from] serde_json::Error),
}

impl From<PrintError> for ReceiptError {
    fn from(err: PrintError) -> Self {
        ReceiptError::Spooler(err)
    }
}

impl ReceiptError {
    /// Single actionable message for the end user
    ///
    /// Print failures make clear that the sale itself is already stored and
    /// the ticket can be printed again.
    pub fn user_message(&self) -> String {
        match self {
            ReceiptError::Spooler(_) => PRINT_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors when finalizing a sale draft
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaleError {
    #[error("The cart is empty")]
    EmptyCart,

    #[error("No student selected")]
    NoCustomer,

    #[error("No payment method selected")]
    NoPaymentMethod,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Cart line {0} does not exist")]
    LineNotFound(usize),
}
