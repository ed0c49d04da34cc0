use std::path::PathBuf;

use ticket_printer::{DevicePrinter, NetworkPrinter, PrintError, PrintResult, Printer};

use crate::layout::{DEFAULT_LOGO_MAX_WIDTH, PrinterLayoutConfig};

/// Receipt printing configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PAPER_WIDTH_MM | 80 | Paper roll width (58 or 80) |
/// | DESCRIPTION_WIDTH | 8 / 20 | Description column in item rows |
/// | THOUSANDS_GROUPING | true | Comma separator in amounts |
/// | LOGO_PATH | - | Logo image file |
/// | LOGO_MAX_WIDTH | 384 | Logo width limit in dots |
/// | PRINTER_ADDR | - | Network printer, `host:port` |
/// | PRINTER_DEVICE | - | Raw device, e.g. `/dev/usb/lp0` |
/// | PRINTER_NAME | - | Windows spooler queue (default queue if empty) |
/// | BUSINESS_PROFILE | - | Business profile JSON file |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | - | Directory for daily log files |
#[derive(Debug, Clone)]
pub struct Config {
    pub paper_width_mm: u32,
    pub description_width: Option<usize>,
    pub thousands_grouping: bool,
    pub logo_path: Option<PathBuf>,
    pub logo_max_width: u32,
    pub printer: PrinterTarget,
    pub business_profile: Option<PathBuf>,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            paper_width_mm: env_parse("PAPER_WIDTH_MM").unwrap_or(80),
            description_width: env_parse("DESCRIPTION_WIDTH"),
            thousands_grouping: env_parse("THOUSANDS_GROUPING").unwrap_or(true),
            logo_path: env_string("LOGO_PATH").map(PathBuf::from),
            logo_max_width: env_parse("LOGO_MAX_WIDTH").unwrap_or(DEFAULT_LOGO_MAX_WIDTH),
            printer: PrinterTarget::from_env(),
            business_profile: env_string("BUSINESS_PROFILE").map(PathBuf::from),
            log_level: env_string("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: env_string("LOG_DIR"),
        }
    }

    /// Paper layout derived from this configuration
    pub fn layout(&self) -> PrinterLayoutConfig {
        let mut layout = PrinterLayoutConfig::for_paper_mm(self.paper_width_mm)
            .with_grouping(self.thousands_grouping);
        if let Some(width) = self.description_width {
            layout = layout.with_description_width(width);
        }
        if let Some(path) = &self.logo_path {
            layout = layout.with_logo(path.clone());
        }
        layout.logo_max_width_pixels = self.logo_max_width;
        layout
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.trim().parse().ok())
}

/// Where receipts are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterTarget {
    /// Raw TCP printer, `host:port`
    Network(String),
    /// Character device or spool file
    Device(PathBuf),
    /// Windows spooler queue; `None` selects the default printer
    Spooler(Option<String>),
    Unconfigured,
}

impl PrinterTarget {
    fn from_env() -> Self {
        if let Some(addr) = env_string("PRINTER_ADDR") {
            return PrinterTarget::Network(addr);
        }
        if let Some(device) = env_string("PRINTER_DEVICE") {
            return PrinterTarget::Device(PathBuf::from(device));
        }
        match std::env::var("PRINTER_NAME") {
            Ok(name) if name.trim().is_empty() => PrinterTarget::Spooler(None),
            Ok(name) => PrinterTarget::Spooler(Some(name)),
            Err(_) => PrinterTarget::Unconfigured,
        }
    }

    /// Open the configured printer adapter
    pub fn connect(&self) -> PrintResult<TargetPrinter> {
        match self {
            PrinterTarget::Network(addr) => Ok(TargetPrinter::Network(NetworkPrinter::from_addr(addr)?)),
            PrinterTarget::Device(path) => Ok(TargetPrinter::Device(DevicePrinter::new(path.clone()))),
            #[cfg(windows)]
            PrinterTarget::Spooler(Some(name)) => Ok(TargetPrinter::Spooler(
                ticket_printer::WindowsPrinter::new(name),
            )),
            #[cfg(windows)]
            PrinterTarget::Spooler(None) => Ok(TargetPrinter::Spooler(
                ticket_printer::WindowsPrinter::system_default()?,
            )),
            #[cfg(not(windows))]
            PrinterTarget::Spooler(_) => Err(PrintError::InvalidConfig(
                "Spooler printing is only supported on Windows".to_string(),
            )),
            PrinterTarget::Unconfigured => Err(PrintError::InvalidConfig(
                "No printer configured".to_string(),
            )),
        }
    }
}

/// Printer adapter selected at runtime
#[derive(Debug, Clone)]
pub enum TargetPrinter {
    Network(NetworkPrinter),
    Device(DevicePrinter),
    #[cfg(windows)]
    Spooler(ticket_printer::WindowsPrinter),
}

impl Printer for TargetPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        match self {
            TargetPrinter::Network(p) => p.print(data).await,
            TargetPrinter::Device(p) => p.print(data).await,
            #[cfg(windows)]
            TargetPrinter::Spooler(p) => p.print(data).await,
        }
    }

    async fn is_online(&self) -> bool {
        match self {
            TargetPrinter::Network(p) => p.is_online().await,
            TargetPrinter::Device(p) => p.is_online().await,
            #[cfg(windows)]
            TargetPrinter::Spooler(p) => p.is_online().await,
        }
    }
}
