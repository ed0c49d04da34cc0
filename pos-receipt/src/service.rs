//! Receipt delivery: render, then print or save a preview

use std::path::Path;

use ticket_printer::Printer;
use tracing::{error, info, instrument};

use crate::error::ReceiptError;
use crate::layout::PrinterLayoutConfig;
use crate::renderer::ReceiptRenderer;
use crate::types::SaleReceiptRequest;

/// Prints receipts on one printer with one paper layout
///
/// The sale is expected to be stored before printing; a failed print can
/// be retried by calling [`ReceiptService::print`] again with the same
/// request.
pub struct ReceiptService<P> {
    printer: P,
    layout: PrinterLayoutConfig,
}

impl<P: Printer> ReceiptService<P> {
    pub fn new(printer: P, layout: PrinterLayoutConfig) -> Self {
        Self { printer, layout }
    }

    pub fn layout(&self) -> &PrinterLayoutConfig {
        &self.layout
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Render the ESC/POS receipt and send it to the printer
    #[instrument(skip_all, fields(folio = %request.folio))]
    pub async fn print(&self, request: &SaleReceiptRequest) -> Result<(), ReceiptError> {
        let data = ReceiptRenderer::new(&self.layout).render_escpos(request);

        if let Err(e) = self.printer.print(&data).await {
            error!(error = %e, "receipt print failed");
            return Err(ReceiptError::Spooler(e));
        }

        info!(bytes = data.len(), "receipt printed");
        Ok(())
    }

    /// Render the text preview and save it to `path`
    pub fn preview(
        &self,
        request: &SaleReceiptRequest,
        path: &Path,
    ) -> Result<String, ReceiptError> {
        ReceiptRenderer::new(&self.layout).write_preview(request, path)
    }
}
