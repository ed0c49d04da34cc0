//! # ticket-printer
//!
//! ESC/POS thermal receipt printer library - low-level printing only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Single-byte code page encoding (Windows-1252)
//! - Monochrome raster images for logos
//! - Network printing (TCP port 9100), raw device files, Windows spooler
//!
//! WHAT to print (sale receipts, previews) lives in `pos-receipt`.
//!
//! ## Example
//!
//! ```ignore
//! use ticket_printer::{Align, EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.align(Align::Center);
//! builder.bold();
//! builder.line("PREESCOLAR");
//! builder.bold_off();
//! builder.align(Align::Left);
//! builder.line(&"-".repeat(48));
//! builder.line("Folio: F0001");
//! builder.feed(3).cut();
//!
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;
mod raster;

// Re-exports
pub use encoding::{PLACEHOLDER, encode_text, pad_width, text_width, truncate_width};
pub use error::{PrintError, PrintResult};
pub use escpos::{Align, EscPosBuilder, RASTER_COMMAND};
pub use printer::{DevicePrinter, NetworkPrinter, Printer};
pub use raster::{MAX_RASTER_DIMENSION, RasterImage};

#[cfg(feature = "image")]
pub use raster::{load_logo, rasterize};

#[cfg(windows)]
pub use printer::WindowsPrinter;
