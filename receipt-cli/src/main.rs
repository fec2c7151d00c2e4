//! Receipt command-line front end
//!
//! Renders bill JSON exported by the POS as fixed-width receipt text, writes
//! ESC/POS jobs to files, and sends them to network thermal printers.

mod config;
mod logger;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use config::Config;
use receipt_printer::{
    Charset, CutMode, FilePrinter, NetworkPrinter, PaperWidth, PrintError, PrintOptions, Printer,
    ReceiptJob, ReceiptTextFormatter,
};
use shared::BillData;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "receipt", version, about = "Format and print fixed-width restaurant receipts")]
struct Cli {
    /// Log filter (overrides LOG_LEVEL; RUST_LOG still wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the receipt text to stdout
    Render {
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Write the ESC/POS job to a file or device node
    Escpos {
        #[command(flatten)]
        layout: LayoutArgs,
        #[command(flatten)]
        device: DeviceArgs,
        /// Output path
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Send the receipt to a network printer
    Print {
        #[command(flatten)]
        layout: LayoutArgs,
        #[command(flatten)]
        device: DeviceArgs,
        #[command(flatten)]
        target: PrinterArgs,
    },
    /// Check that the network printer is reachable
    Check {
        #[command(flatten)]
        target: PrinterArgs,
    },
}

#[derive(Debug, Args)]
struct LayoutArgs {
    /// Bill JSON file
    bill: PathBuf,

    /// Characters per line
    #[arg(long, conflicts_with = "paper")]
    width: Option<usize>,

    /// Paper preset: 58 or 80 (mm)
    #[arg(long, value_parser = parse_paper)]
    paper: Option<PaperWidth>,

    /// Replace the bill's currency symbol
    #[arg(long)]
    currency: Option<String>,
}

#[derive(Debug, Args)]
struct DeviceArgs {
    /// Printer text encoding: utf8, gbk or latin1
    #[arg(long)]
    charset: Option<Charset>,

    /// Lines fed before the cut
    #[arg(long)]
    feed: Option<u8>,

    /// Cut mode: full, partial or none
    #[arg(long, default_value = "full")]
    cut: CutMode,

    /// Kick the cash drawer
    #[arg(long)]
    drawer: bool,

    /// Number of copies
    #[arg(long, default_value_t = 1)]
    copies: u8,

    /// Print in bold
    #[arg(long)]
    bold: bool,
}

#[derive(Debug, Args)]
struct PrinterArgs {
    /// Printer address host[:port] (defaults to PRINTER_ADDR)
    #[arg(long)]
    printer: Option<String>,

    /// Connection timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn parse_paper(s: &str) -> Result<PaperWidth, String> {
    PaperWidth::parse(s).ok_or_else(|| format!("unknown paper size '{}', expected 58 or 80", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logger::init_logger(&config.log_level, cli.json_logs)?;

    match cli.command {
        Command::Render { layout } => {
            let (formatter, bill) = prepare(&layout, &config)?;
            println!("{}", formatter.format(&bill));
        }
        Command::Escpos {
            layout,
            device,
            out,
        } => {
            let (formatter, bill) = prepare(&layout, &config)?;
            let job = ReceiptJob::from_bill(&formatter, &bill, &print_options(&device, &config));

            FilePrinter::new(&out)
                .print(job.bytes())
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), bytes = job.bytes().len(), "ESC/POS job written");
        }
        Command::Print {
            layout,
            device,
            target,
        } => {
            let (formatter, bill) = prepare(&layout, &config)?;
            let job = ReceiptJob::from_bill(&formatter, &bill, &print_options(&device, &config));

            let printer = network_printer(&target, &config)?;
            printer
                .print(job.bytes())
                .await
                .with_context(|| format!("failed to print on {}", printer.addr()))?;
            tracing::info!(bill = %bill.bill.bill_number, addr = %printer.addr(), "Receipt printed");
        }
        Command::Check { target } => {
            let printer = network_printer(&target, &config)?;
            if !printer.is_online().await {
                return Err(PrintError::Offline(printer.addr().to_string()).into());
            }
            println!("{} online", printer.addr());
        }
    }

    Ok(())
}

/// Load the bill and build the formatter for the requested layout
fn prepare(layout: &LayoutArgs, config: &Config) -> anyhow::Result<(ReceiptTextFormatter, BillData)> {
    let width = layout
        .width
        .or(layout.paper.map(PaperWidth::columns))
        .unwrap_or(config.width);
    let formatter = ReceiptTextFormatter::new(width)?;

    let mut bill = load_bill(&layout.bill)?;
    if let Some(currency) = layout.currency.as_ref().or(config.currency.as_ref()) {
        bill.currency = currency.clone();
    }

    tracing::debug!(
        width,
        items = bill.items.len(),
        bill = %bill.bill.bill_number,
        "bill loaded"
    );
    Ok((formatter, bill))
}

fn load_bill(path: &Path) -> anyhow::Result<BillData> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    BillData::from_slice(&bytes).with_context(|| format!("invalid bill in {}", path.display()))
}

fn print_options(device: &DeviceArgs, config: &Config) -> PrintOptions {
    PrintOptions {
        charset: device.charset.unwrap_or(config.charset),
        feed_lines: device.feed.unwrap_or(config.feed_lines),
        cut: device.cut,
        open_drawer: device.drawer,
        copies: device.copies,
        bold: device.bold,
    }
}

fn network_printer(target: &PrinterArgs, config: &Config) -> anyhow::Result<NetworkPrinter> {
    let addr = target
        .printer
        .as_deref()
        .or(config.printer_addr.as_deref())
        .context("no printer address: pass --printer or set PRINTER_ADDR")?;
    let timeout = target.timeout_ms.unwrap_or(config.printer_timeout_ms);

    Ok(NetworkPrinter::from_addr(addr)?.with_timeout(Duration::from_millis(timeout)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_print_command() {
        let cli = Cli::try_parse_from([
            "receipt",
            "print",
            "bill.json",
            "--paper",
            "80",
            "--charset",
            "gbk",
            "--cut",
            "partial",
            "--printer",
            "10.0.0.5",
        ])
        .unwrap();

        let Command::Print {
            layout,
            device,
            target,
        } = cli.command
        else {
            panic!("expected print command");
        };
        assert_eq!(layout.paper, Some(PaperWidth::Mm80));
        assert_eq!(device.charset, Some(Charset::Gbk));
        assert_eq!(device.cut, CutMode::Partial);
        assert_eq!(target.printer.as_deref(), Some("10.0.0.5"));
    }

    #[test]
    fn test_width_conflicts_with_paper() {
        let result = Cli::try_parse_from([
            "receipt", "render", "bill.json", "--width", "40", "--paper", "58",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_print_options_fall_back_to_config() {
        let cli = Cli::try_parse_from(["receipt", "escpos", "bill.json", "--out", "job.bin"])
            .unwrap();
        let Command::Escpos { device, .. } = cli.command else {
            panic!("expected escpos command");
        };

        let config = Config {
            charset: Charset::Latin1,
            feed_lines: 7,
            ..Default::default()
        };
        let options = print_options(&device, &config);
        assert_eq!(options.charset, Charset::Latin1);
        assert_eq!(options.feed_lines, 7);
        assert_eq!(options.cut, CutMode::Full);
        assert_eq!(options.copies, 1);
    }

    fn sample_layout(currency: Option<&str>) -> LayoutArgs {
        LayoutArgs {
            bill: Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/sample_bill.json"),
            width: None,
            paper: None,
            currency: currency.map(str::to_string),
        }
    }

    #[test]
    fn test_prepare_sample_bill() {
        let (formatter, bill) = prepare(&sample_layout(None), &Config::default()).unwrap();
        assert_eq!(formatter.width(), 32);
        assert_eq!(bill.bill.bill_number, "1042");

        let text = formatter.format(&bill);
        assert!(text.contains("GST 5.0%"));
        assert!(text.contains("₹25.20"));
    }

    #[test]
    fn test_currency_override() {
        let config = Config {
            currency: Some("INR ".to_string()),
            width: 48,
            ..Default::default()
        };
        let (formatter, bill) = prepare(&sample_layout(None), &config).unwrap();
        assert_eq!(formatter.width(), 48);
        assert_eq!(bill.currency, "INR ");

        // The flag beats the environment
        let (_, bill) = prepare(&sample_layout(Some("Rs.")), &config).unwrap();
        assert_eq!(bill.currency, "Rs.");
    }

    #[test]
    fn test_missing_bill_file() {
        let mut layout = sample_layout(None);
        layout.bill = PathBuf::from("does-not-exist.json");
        let err = prepare(&layout, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn test_missing_printer_address() {
        let target = PrinterArgs {
            printer: None,
            timeout_ms: None,
        };
        let err = network_printer(&target, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("PRINTER_ADDR"));
    }
}
