//! Sale receipt renderer
//!
//! Sections, in order:
//! logo, business header, folio and time, student, item table, totals,
//! payment method, footer, cut.
//!
//! The same sequence drives both the ESC/POS stream and the text preview.

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use ticket_printer::{Align, RasterImage};
use tracing::{debug, info, instrument, warn};

use crate::error::ReceiptError;
use crate::layout::{
    EscPosWriter, LineStyle, PreviewWriter, PrinterLayoutConfig, ReceiptWriter, SizeHint,
};
use crate::money::format_money;
use crate::types::{SaleReceiptRequest, non_blank};

/// Timestamp printed next to the folio
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Renders sale receipts for one paper layout
pub struct ReceiptRenderer<'a> {
    config: &'a PrinterLayoutConfig,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(config: &'a PrinterLayoutConfig) -> Self {
        Self { config }
    }

    /// Render the ESC/POS byte stream, stamped with the current local time
    pub fn render_escpos(&self, request: &SaleReceiptRequest) -> Vec<u8> {
        self.render_escpos_at(request, Local::now().naive_local())
    }

    #[instrument(skip_all, fields(folio = %request.folio, items = request.line_items.len()))]
    pub fn render_escpos_at(&self, request: &SaleReceiptRequest, now: NaiveDateTime) -> Vec<u8> {
        let mut w = EscPosWriter::new(self.config.line_width_chars);
        self.assemble(&mut w, request, now);
        let data = w.finish();
        debug!(bytes = data.len(), "receipt rendered");
        data
    }

    /// Render the plain text preview, stamped with the current local time
    pub fn render_preview(&self, request: &SaleReceiptRequest) -> String {
        self.render_preview_at(request, Local::now().naive_local())
    }

    #[instrument(skip_all, fields(folio = %request.folio, items = request.line_items.len()))]
    pub fn render_preview_at(&self, request: &SaleReceiptRequest, now: NaiveDateTime) -> String {
        let mut w = PreviewWriter::new(self.config.line_width_chars);
        self.assemble(&mut w, request, now);
        w.finish()
    }

    /// Render the preview and overwrite `path` with it
    #[instrument(skip(self, request, path), fields(folio = %request.folio, path = %path.display()))]
    pub fn write_preview(
        &self,
        request: &SaleReceiptRequest,
        path: &Path,
    ) -> Result<String, ReceiptError> {
        let text = self.render_preview(request);
        std::fs::write(path, &text).map_err(|source| ReceiptError::Preview {
            path: path.display().to_string(),
            source,
        })?;
        info!(bytes = text.len(), "preview written");
        Ok(text)
    }

    fn assemble<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest, now: NaiveDateTime) {
        self.render_logo(w, request);
        self.render_business_header(w, request);
        w.rule();
        self.render_folio(w, request, now);
        self.render_customer(w, request);
        w.rule();
        self.render_items(w, request);
        w.rule();
        self.render_totals(w, request);
        w.rule();
        w.line(&format!("Pago: {}", request.payment_method_label), LineStyle::LEFT);
        self.render_footer(w, request);
        w.end();
    }

    fn render_logo<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest) {
        if !w.renders_images() {
            w.logo(None);
            return;
        }
        if !request.print_logo {
            return;
        }
        if let Some(image) = self.load_logo() {
            w.logo(Some(&image));
        }
    }

    /// Resolve the configured logo; any failure skips the logo section
    fn load_logo(&self) -> Option<RasterImage> {
        let Some(path) = self.config.logo_path.as_deref() else {
            debug!("no logo configured");
            return None;
        };
        match ticket_printer::load_logo(path, self.config.logo_max_width_pixels) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(error = %e, "logo skipped");
                None
            }
        }
    }

    fn render_business_header<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest) {
        let business = &request.business;
        let centered = LineStyle::aligned(Align::Center);

        w.line(
            business.display_name.trim(),
            centered.bold().size(SizeHint::Large),
        );
        if let Some(key) = non_blank(&business.registration_key) {
            w.line(key, centered);
        }
        if let Some(tagline) = non_blank(&business.tagline) {
            w.line(tagline, centered);
        }
        if let Some(legal_id) = non_blank(&business.legal_id) {
            w.line(&format!("RFC: {}", legal_id), centered);
        }
        if let Some(address) = non_blank(&business.address) {
            w.line(address, centered);
        }
        if let Some(phone) = non_blank(&business.phone) {
            w.line(&format!("Tel: {}", phone), centered);
        }
    }

    /// Folio on the left, timestamp flush with the right edge
    ///
    /// A folio too long for both gets no padding; the line is never cut.
    fn render_folio<W: ReceiptWriter>(
        &self,
        w: &mut W,
        request: &SaleReceiptRequest,
        now: NaiveDateTime,
    ) {
        let label = format!("Folio: {}", request.folio);
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let used = label.chars().count() + timestamp.chars().count();
        let padding = w.width().saturating_sub(used);
        w.line(
            &format!("{}{}{}", label, " ".repeat(padding), timestamp),
            LineStyle::LEFT,
        );
    }

    fn render_customer<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest) {
        w.line(&format!("Alumno: {}", request.customer_name), LineStyle::LEFT);
        w.line(
            &format!("Matrícula: {}", request.customer_reference),
            LineStyle::LEFT,
        );
    }

    fn render_items<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest) {
        let columns = self.config.item_columns();
        let grouping = self.config.thousands_grouping;

        w.line(
            &columns.row("Descripción", "Uds", "P.U.", "Importe"),
            LineStyle::LEFT.bold(),
        );
        w.rule();

        for item in &request.line_items {
            let row = columns.row(
                &item.description,
                &item.quantity.to_string(),
                &format_money(item.unit_price, grouping),
                &format_money(item.line_total(), grouping),
            );
            w.line(&row, LineStyle::LEFT);
        }
    }

    fn render_totals<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest) {
        let totals = &request.totals;
        let grouping = self.config.thousands_grouping;
        let right = LineStyle::aligned(Align::Right);

        w.line(
            &format!("SUBTOTAL: {}", format_money(totals.subtotal, grouping)),
            right,
        );
        w.line(
            &format!("IVA: {}", format_money(totals.tax_amount, grouping)),
            right,
        );
        w.line(
            &format!("TOTAL: {}", format_money(totals.total, grouping)),
            right.bold().size(SizeHint::Large),
        );
    }

    fn render_footer<W: ReceiptWriter>(&self, w: &mut W, request: &SaleReceiptRequest) {
        let style = LineStyle::aligned(Align::Center).bold();
        for line in &request.business.footer_lines {
            let line = line.trim();
            if !line.is_empty() {
                w.line(line, style);
            }
        }
    }
}
