//! Fixed-width line layout for receipts
//!
//! A receipt is written line by line through a [`ReceiptWriter`]. Two
//! targets exist:
//! - [`EscPosWriter`] emits printer commands; the device does alignment.
//! - [`PreviewWriter`] emits plain text padded with spaces.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use ticket_printer::{
    Align, EscPosBuilder, PLACEHOLDER, RasterImage, pad_width, text_width, truncate_width,
};

/// Placeholder written by the preview where the logo would print
pub const LOGO_PLACEHOLDER: &str = "[LOGO]";

/// Widest logo most 58mm/80mm printers accept, in dots
pub const DEFAULT_LOGO_MAX_WIDTH: u32 = 384;

const QUANTITY_COLUMN_WIDTH: usize = 3;
/// Separator written before each numeric column
const COLUMN_GAP: &str = " ";
const NUMERIC_COLUMNS: usize = 3;
const ELLIPSIS: &str = "...";

/// Paper and layout settings, fixed for the lifetime of a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterLayoutConfig {
    /// Monospace columns per line (32 on 58mm paper, 48 on 80mm)
    pub line_width_chars: usize,
    /// Logos wider than this are scaled down
    pub logo_max_width_pixels: u32,
    /// Description column width in item rows
    pub description_width: usize,
    /// Thousands separator in currency fields
    pub thousands_grouping: bool,
    /// Logo image printed on top of the receipt
    pub logo_path: Option<PathBuf>,
}

impl PrinterLayoutConfig {
    /// Layout for a paper roll width in millimetres
    pub fn for_paper_mm(paper_width_mm: u32) -> Self {
        let (line_width_chars, description_width) = if paper_width_mm == 58 {
            (32, 8)
        } else {
            (48, 20)
        };
        Self {
            line_width_chars,
            logo_max_width_pixels: DEFAULT_LOGO_MAX_WIDTH,
            description_width,
            thousands_grouping: true,
            logo_path: None,
        }
    }

    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.thousands_grouping = grouping;
        self
    }

    pub fn with_description_width(mut self, width: usize) -> Self {
        self.description_width = width;
        self
    }

    /// Column widths for item rows
    ///
    /// Unit price and amount split what is left after the description,
    /// the quantity and the gaps between numeric columns.
    pub fn item_columns(&self) -> ItemColumns {
        let description = self.description_width.min(self.line_width_chars);
        let rest = self
            .line_width_chars
            .saturating_sub(description + QUANTITY_COLUMN_WIDTH + NUMERIC_COLUMNS * COLUMN_GAP.len());
        let unit_price = rest / 2;
        ItemColumns {
            description,
            quantity: QUANTITY_COLUMN_WIDTH,
            unit_price,
            amount: rest - unit_price,
        }
    }
}

impl Default for PrinterLayoutConfig {
    fn default() -> Self {
        Self::for_paper_mm(80)
    }
}

/// Widths of the item table: description | qty | unit price | amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemColumns {
    pub description: usize,
    pub quantity: usize,
    pub unit_price: usize,
    pub amount: usize,
}

impl ItemColumns {
    /// Lay out one row; numeric cells are right-aligned and never cut
    ///
    /// A gap always precedes each numeric cell, so an oversized value
    /// widens the row instead of running into its neighbour.
    pub fn row(&self, description: &str, quantity: &str, unit_price: &str, amount: &str) -> String {
        format!(
            "{}{gap}{:>qw$}{gap}{:>pw$}{gap}{:>aw$}",
            self.fit_description(description),
            quantity,
            unit_price,
            amount,
            gap = COLUMN_GAP,
            qw = self.quantity,
            pw = self.unit_price,
            aw = self.amount,
        )
    }

    /// Pad to the column, or cut and mark with an ellipsis
    pub fn fit_description(&self, description: &str) -> String {
        let width = self.description;
        if text_width(description) <= width {
            return pad_width(description, width, false);
        }
        if width <= ELLIPSIS.len() {
            return truncate_width(description, width);
        }
        let kept = truncate_width(description, width - ELLIPSIS.len());
        format!("{}{}", kept, ELLIPSIS)
    }
}

/// Character size for a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeHint {
    /// Condensed font B
    Small,
    #[default]
    Normal,
    /// Double height, same column count
    Large,
    /// Double width and height
    Double,
}

/// How a single line is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStyle {
    pub align: Align,
    pub bold: bool,
    pub size: SizeHint,
}

impl LineStyle {
    pub const LEFT: Self = Self {
        align: Align::Left,
        bold: false,
        size: SizeHint::Normal,
    };

    pub fn aligned(align: Align) -> Self {
        Self {
            align,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, size: SizeHint) -> Self {
        self.size = size;
        self
    }
}

/// Output target for receipt lines
pub trait ReceiptWriter {
    /// Columns per line
    fn width(&self) -> usize;

    /// Write one logical line; always ends with a single `\n`
    fn line(&mut self, text: &str, style: LineStyle);

    /// Whether this target prints images; the logo is only loaded if so
    fn renders_images(&self) -> bool;

    /// Logo section; `None` when the logo is disabled or unavailable
    fn logo(&mut self, image: Option<&RasterImage>);

    /// Finish the document (feed and cut on paper)
    fn end(&mut self);

    /// Horizontal rule across the full width
    fn rule(&mut self) {
        let rule = "-".repeat(self.width());
        self.line(&rule, LineStyle::LEFT);
    }
}

/// Plain text receipt for previews and records
#[derive(Debug, Clone)]
pub struct PreviewWriter {
    buf: String,
    width: usize,
}

impl PreviewWriter {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    /// Render a line without appending it
    ///
    /// Right alignment pads on the left up to the line width; text that is
    /// already as wide as the line is left untouched, never truncated.
    /// Control characters print as the placeholder, as they do on paper.
    pub fn format_line(&self, text: &str, style: LineStyle) -> String {
        let text: String = text
            .chars()
            .map(|c| if c.is_control() { char::from(PLACEHOLDER) } else { c })
            .collect();
        let slack = self.width.saturating_sub(text_width(&text));
        let padding = match style.align {
            Align::Left => 0,
            Align::Center => slack / 2,
            Align::Right => slack,
        };
        format!("{}{}\n", " ".repeat(padding), text)
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl ReceiptWriter for PreviewWriter {
    fn width(&self) -> usize {
        self.width
    }

    fn line(&mut self, text: &str, style: LineStyle) {
        let line = self.format_line(text, style);
        self.buf.push_str(&line);
    }

    fn renders_images(&self) -> bool {
        false
    }

    fn logo(&mut self, _image: Option<&RasterImage>) {
        self.line(LOGO_PLACEHOLDER, LineStyle::aligned(Align::Center));
    }

    fn end(&mut self) {}
}

/// ESC/POS receipt for thermal printers
pub struct EscPosWriter {
    builder: EscPosBuilder,
}

impl EscPosWriter {
    pub fn new(width: usize) -> Self {
        Self {
            builder: EscPosBuilder::new(width),
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.builder.build()
    }
}

impl ReceiptWriter for EscPosWriter {
    fn width(&self) -> usize {
        self.builder.width()
    }

    fn line(&mut self, text: &str, style: LineStyle) {
        let b = &mut self.builder;
        b.align(style.align);
        if style.bold {
            b.bold();
        } else {
            b.bold_off();
        }
        match style.size {
            SizeHint::Small => {
                b.font_small();
            }
            SizeHint::Normal => {}
            SizeHint::Large => {
                b.double_height();
            }
            SizeHint::Double => {
                b.double_size();
            }
        }
        b.line(text);

        match style.size {
            SizeHint::Small => {
                b.font_standard();
            }
            SizeHint::Normal => {}
            SizeHint::Large | SizeHint::Double => {
                b.reset_size();
            }
        }
        if style.bold {
            b.bold_off();
        }
    }

    fn renders_images(&self) -> bool {
        true
    }

    fn logo(&mut self, image: Option<&RasterImage>) {
        if let Some(image) = image {
            self.builder.raster(image);
        }
    }

    fn end(&mut self) {
        self.builder.feed(3).cut();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_paper_widths() {
        assert_eq!(PrinterLayoutConfig::for_paper_mm(58).line_width_chars, 32);
        assert_eq!(PrinterLayoutConfig::for_paper_mm(80).line_width_chars, 48);
        assert_eq!(PrinterLayoutConfig::default().description_width, 20);
    }

    #[test]
    fn test_preview_right_align_fills_width() {
        for width in [32, 48] {
            let w = PreviewWriter::new(width);
            for text in ["", "TOTAL: 1392.00", "x"] {
                let line = w.format_line(text, LineStyle::aligned(Align::Right));
                let body = line.strip_suffix('\n').unwrap();
                assert_eq!(body.chars().count(), width);
                assert!(body.ends_with(text));
            }
        }
    }

    #[test]
    fn test_preview_right_align_never_truncates() {
        let w = PreviewWriter::new(8);
        let line = w.format_line("SUBTOTAL: 1200.00", LineStyle::aligned(Align::Right));
        assert_eq!(line, "SUBTOTAL: 1200.00\n");
    }

    #[test]
    fn test_preview_center_and_left() {
        let w = PreviewWriter::new(10);
        assert_eq!(w.format_line("abcd", LineStyle::aligned(Align::Center)), "   abcd\n");
        assert_eq!(w.format_line("abcd", LineStyle::LEFT.bold()), "abcd\n");
    }

    #[test]
    fn test_preview_control_chars_stay_on_one_line() {
        let w = PreviewWriter::new(12);
        assert_eq!(w.format_line("Ana\nLópez\t", LineStyle::LEFT), "Ana?López?\n");
        assert_eq!(
            w.format_line("a\r\nb", LineStyle::aligned(Align::Right)),
            "        a??b\n"
        );
    }

    #[test]
    fn test_preview_rule() {
        for width in [32, 48] {
            let mut w = PreviewWriter::new(width);
            w.rule();
            let out = w.finish();
            let body = out.strip_suffix('\n').unwrap();
            assert_eq!(body.len(), width);
            assert!(body.chars().all(|c| c == '-'));
        }
    }

    #[test]
    fn test_preview_logo_placeholder() {
        let mut w = PreviewWriter::new(10);
        w.logo(None);
        assert_eq!(w.finish(), "  [LOGO]\n");
    }

    #[test]
    fn test_escpos_line_styles() {
        let mut w = EscPosWriter::new(32);
        w.line("TOTAL", LineStyle::aligned(Align::Right).bold().size(SizeHint::Large));
        let data = w.finish();

        // ESC a 2, ESC E 1, GS ! 1, text, LF, GS ! 0, ESC E 0
        let expected = [
            0x1B, 0x61, 0x02, 0x1B, 0x45, 0x01, 0x1D, 0x21, 0x01, b'T', b'O', b'T', b'A', b'L',
            b'\n', 0x1D, 0x21, 0x00, 0x1B, 0x45, 0x00,
        ];
        assert!(contains(&data, &expected));
    }

    #[test]
    fn test_escpos_no_manual_padding() {
        let mut w = EscPosWriter::new(32);
        w.line("Centro", LineStyle::aligned(Align::Center));
        let data = w.finish();
        assert!(contains(&data, &[0x1B, 0x61, 0x01, 0x1B, 0x45, 0x00, b'C']));
    }

    #[test]
    fn test_escpos_small_font() {
        let mut w = EscPosWriter::new(32);
        w.line("nota", LineStyle::LEFT.size(SizeHint::Small));
        let data = w.finish();
        assert!(contains(&data, &[0x1B, 0x4D, 0x01, b'n']));
        assert!(data.ends_with(&[b'\n', 0x1B, 0x4D, 0x00]));
    }

    #[test]
    fn test_escpos_end_cuts() {
        let mut w = EscPosWriter::new(32);
        w.end();
        assert!(w.finish().ends_with(&[0x1B, 0x64, 3, 0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_item_columns_fill_line() {
        for paper in [58, 80] {
            let config = PrinterLayoutConfig::for_paper_mm(paper);
            let cols = config.item_columns();
            let row = cols.row("Uniforme", "1", "350.00", "350.00");
            assert_eq!(row.chars().count(), config.line_width_chars);
        }
    }

    #[test]
    fn test_fit_description() {
        let cols = PrinterLayoutConfig::for_paper_mm(58).item_columns();
        assert_eq!(cols.fit_description("Libros"), "Libros  ");
        assert_eq!(cols.fit_description("Colegiatura de septiembre"), "Coleg...");
        assert_eq!(cols.fit_description("Uniforme"), "Uniforme");
    }

    #[test]
    fn test_numbers_overflow_instead_of_truncating() {
        let cols = ItemColumns {
            description: 4,
            quantity: 2,
            unit_price: 3,
            amount: 3,
        };
        assert_eq!(cols.row("ab", "10", "1000.00", "9"), "ab   10 1000.00   9");
    }

    #[test]
    fn test_item_columns_per_paper() {
        let narrow = PrinterLayoutConfig::for_paper_mm(58).item_columns();
        assert_eq!(
            (narrow.description, narrow.quantity, narrow.unit_price, narrow.amount),
            (8, 3, 9, 9)
        );
        let wide = PrinterLayoutConfig::for_paper_mm(80).item_columns();
        assert_eq!(
            (wide.description, wide.quantity, wide.unit_price, wide.amount),
            (20, 3, 11, 11)
        );
    }

    #[test]
    fn test_largest_grouped_price_fits_58mm() {
        let config = PrinterLayoutConfig::for_paper_mm(58);
        let row = config
            .item_columns()
            .row("Colegiatura", "1", "99,999.99", "99,999.99");
        assert_eq!(row, "Coleg...   1 99,999.99 99,999.99");
        assert_eq!(row.chars().count(), 32);
    }
}
