use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pos_receipt::logger::cleanup_old_logs;
use pos_receipt::{
    Config, JsonProfileProvider, PrinterTarget, ReceiptError, ReceiptRenderer, ReceiptService,
    SaleReceiptRequest, apply_profile, init_logger,
};
use tracing::{error, info, warn};

/// Render and print sale receipts
#[derive(Debug, Parser)]
#[command(name = "pos-receipt", version)]
struct Cli {
    /// Paper roll width in millimetres (58 or 80)
    #[arg(long, global = true, env = "PAPER_WIDTH_MM")]
    paper_width_mm: Option<u32>,

    /// Width of the description column in item rows
    #[arg(long, global = true, env = "DESCRIPTION_WIDTH")]
    description_width: Option<usize>,

    /// Print amounts without thousands separators
    #[arg(long, global = true)]
    no_grouping: bool,

    /// Logo image printed on receipts that ask for it
    #[arg(long, global = true, env = "LOGO_PATH")]
    logo: Option<PathBuf>,

    /// Business profile JSON replacing the one stored in the request
    #[arg(long, global = true, env = "BUSINESS_PROFILE")]
    business: Option<PathBuf>,

    #[arg(long, global = true, env = "LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the text preview of a sale request
    Preview {
        /// Sale request JSON file
        request: PathBuf,

        /// Write the preview here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Send a sale request to the receipt printer
    Print {
        /// Sale request JSON file
        request: PathBuf,

        /// Network printer, `host:port`
        #[arg(long)]
        addr: Option<String>,

        /// Raw printer device, e.g. /dev/usb/lp0
        #[arg(long)]
        device: Option<PathBuf>,
    },
}

impl Cli {
    /// Command line values win over the environment
    fn apply(&self, config: &mut Config) {
        if let Some(mm) = self.paper_width_mm {
            config.paper_width_mm = mm;
        }
        if let Some(width) = self.description_width {
            config.description_width = Some(width);
        }
        if self.no_grouping {
            config.thousands_grouping = false;
        }
        if let Some(path) = &self.logo {
            config.logo_path = Some(path.clone());
        }
        if let Some(path) = &self.business {
            config.business_profile = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    cli.apply(&mut config);

    if let Err(e) = init_logger(&config.log_level, config.log_json, config.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }
    if let Some(dir) = &config.log_dir {
        if let Err(e) = cleanup_old_logs(Path::new(dir)) {
            warn!(error = %e, "log cleanup failed");
        }
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "command failed");
            let message = match e.downcast_ref::<ReceiptError>() {
                Some(receipt_err) => receipt_err.user_message(),
                None => format!("{e:#}"),
            };
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let layout = config.layout();

    match command {
        Command::Preview { request, out } => {
            let request = load_request(&request, config)?;
            let renderer = ReceiptRenderer::new(&layout);
            match out {
                Some(path) => {
                    renderer.write_preview(&request, &path)?;
                    info!(path = %path.display(), "preview saved");
                }
                None => print!("{}", renderer.render_preview(&request)),
            }
        }
        Command::Print {
            request,
            addr,
            device,
        } => {
            let request = load_request(&request, config)?;
            let target = match (addr, device) {
                (Some(addr), _) => PrinterTarget::Network(addr),
                (None, Some(device)) => PrinterTarget::Device(device),
                (None, None) => config.printer.clone(),
            };
            let printer = target.connect().map_err(ReceiptError::from)?;
            ReceiptService::new(printer, layout).print(&request).await?;
            info!(folio = %request.folio, "receipt printed");
        }
    }

    Ok(())
}

/// Read a stored sale request, swapping in the configured business profile
fn load_request(path: &Path, config: &Config) -> anyhow::Result<SaleReceiptRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sale request {}", path.display()))?;
    let mut request: SaleReceiptRequest =
        serde_json::from_str(&content).map_err(ReceiptError::from)?;

    if let Some(profile_path) = &config.business_profile {
        apply_profile(&JsonProfileProvider::new(profile_path), &mut request)?;
    }

    Ok(request)
}
