use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use ripcalc_ipv6::ReportOptions;
use tracing::{debug, warn, Level};

mod batch;
mod output;

use batch::BatchProcessor;
use output::{Calculated, OutputFormat};

/// IPv4 and IPv6 subnet calculator
#[derive(Parser)]
#[command(name = "ripcalc")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  ripcalc 192.168.0.0/24\n  ripcalc 2001:db8::/64\n  ripcalc --ipv6-mask --ipv6-binary 2001:db8::/64\n  ripcalc batch --file networks.txt --output csv")]
struct Cli {
    /// IPv4 or IPv6 address in CIDR notation
    #[arg(value_name = "CIDR")]
    cidr: Option<String>,

    /// Show netmask and wildcard for IPv6 (always shown for IPv4)
    #[arg(long = "ipv6-mask", global = true)]
    ipv6_mask: bool,

    /// Show binary representation for IPv6 (always shown for IPv4)
    #[arg(long = "ipv6-binary", global = true)]
    ipv6_binary: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            mask: self.ipv6_mask,
            binary: self.ipv6_binary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate many CIDRs from a file or stdin, one per line
    Batch(BatchArgs),
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Batch(ref args)) => handle_batch(args, cli.output, cli.report_options())?,
        None => {
            let text = handle_calc(cli.cidr.as_deref(), cli.output, cli.report_options())?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_calc(cidr: Option<&str>, format: OutputFormat, options: ReportOptions) -> Result<String> {
    let cidr = cidr.ok_or_else(|| anyhow!("no CIDR argument provided (see --help)"))?;
    let result = Calculated::from_cidr(cidr.trim())?;
    debug!(family = %result.family(), "calculated network");
    output::render(&result, format, options)
}

fn handle_batch(args: &BatchArgs, format: OutputFormat, options: ReportOptions) -> Result<()> {
    let inputs = batch::read_inputs(args.file.as_deref())?;
    let processor = BatchProcessor::new(args.workers)?;
    debug!(
        "Batch processing {} CIDRs with {} workers",
        inputs.len(),
        processor.thread_count()
    );

    let results = processor.process(inputs);
    let failed: Vec<_> = results.iter().filter(|r| r.result.is_err()).collect();
    for r in &failed {
        if let Err(ref e) = r.result {
            warn!("{}: {}", r.input, e);
        }
    }

    let text = batch::render(&results, format, options)?;
    if !text.is_empty() {
        println!("{}", text);
    }

    if !failed.is_empty() {
        bail!("{} of {} inputs failed", failed.len(), results.len());
    }
    Ok(())
}
