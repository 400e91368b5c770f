//! printscan — discover and query network printers over SNMP.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use printscan_core::{
    ClientConfig, RetryConfig, RetryingClient, ScanOptions, SnmpClient, UdpSnmpClient,
    gather_brand_info, gather_info, scan,
};
use printscan_types::{AttributeCatalog, BrandInfo, DiscoveredPrinter, PrinterInfo};

#[derive(Parser)]
#[command(name = "printscan")]
#[command(version, about = "Discover and query network printers over SNMP", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: Format,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Read-only community string
    #[arg(long, global = true, env = "PRINTSCAN_COMMUNITY", default_value = "public")]
    community: String,

    /// Agent UDP port
    #[arg(long, global = true, env = "PRINTSCAN_PORT", default_value_t = 161)]
    port: u16,

    /// Per-query timeout in milliseconds
    #[arg(long, global = true, env = "PRINTSCAN_TIMEOUT_MS", default_value_t = 2000)]
    timeout_ms: u64,

    /// Retries per probe for unreachable targets (0 = no retries)
    #[arg(long, global = true, env = "PRINTSCAN_RETRIES", default_value_t = 0)]
    retries: u32,
}

#[derive(Args)]
struct SweepArgs {
    /// Subnet prefix host suffixes are appended to
    #[arg(long, env = "PRINTSCAN_PREFIX", default_value = "192.168.1.")]
    prefix: String,

    /// First host suffix to probe
    #[arg(long, default_value_t = 1)]
    start: u8,

    /// Last host suffix to probe (inclusive)
    #[arg(long, default_value_t = 254)]
    end: u8,

    /// Probes in flight at once (1 = sequential sweep)
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Overall sweep budget in milliseconds
    #[arg(long)]
    sweep_timeout_ms: Option<u64>,
}

impl SweepArgs {
    fn to_options(&self) -> ScanOptions {
        let mut options = ScanOptions::new(self.prefix.clone())
            .range(self.start..=self.end)
            .concurrency(self.concurrency);
        if let Some(ms) = self.sweep_timeout_ms {
            options = options.sweep_timeout(Duration::from_millis(ms));
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep a subnet for the first responding printer
    Scan {
        #[command(flatten)]
        sweep: SweepArgs,
    },

    /// Gather common attributes (status, reported address) from a printer
    Info {
        /// Printer address
        address: Ipv4Addr,
    },

    /// Gather one brand's attributes from a printer
    Brand {
        /// Printer address
        address: Ipv4Addr,

        /// Brand namespace to query
        #[arg(long, default_value = "HP")]
        brand: String,
    },

    /// Sweep, then gather common and brand attributes from the responder
    Discover {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Brand namespace to query after discovery
        #[arg(long, default_value = "HP")]
        brand: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging.
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        port = cli.connection.port,
        timeout_ms = cli.connection.timeout_ms,
        retries = cli.connection.retries,
        "client configured"
    );

    let client = build_client(&cli.connection)?;
    let catalog = AttributeCatalog::default();

    match &cli.command {
        Commands::Scan { sweep } => {
            let found = scan(client.as_ref(), &catalog, &sweep.to_options()).await?;
            print_scan_result(cli.format, found.as_ref());
        }
        Commands::Info { address } => {
            let info = gather_info(client.as_ref(), &catalog, *address).await;
            print_info(cli.format, &info);
        }
        Commands::Brand { address, brand } => {
            let info = gather_brand_info(client.as_ref(), &catalog, *address, brand).await;
            print_brand_info(cli.format, brand, &info);
        }
        Commands::Discover { sweep, brand } => {
            let Some(printer) = scan(client.as_ref(), &catalog, &sweep.to_options()).await? else {
                print_scan_result(cli.format, None);
                return Ok(());
            };
            let info = gather_info(client.as_ref(), &catalog, printer.address).await;
            let brand_info =
                gather_brand_info(client.as_ref(), &catalog, printer.address, brand).await;

            match cli.format {
                Format::Json => {
                    let report = serde_json::json!({
                        "printer": printer,
                        "info": info,
                        "brand": brand,
                        "brand_attributes": brand_info,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Format::Text => {
                    print_scan_result(Format::Text, Some(&printer));
                    print_info(Format::Text, &info);
                    print_brand_info(Format::Text, brand, &brand_info);
                }
            }
        }
    }

    Ok(())
}

fn build_client(connection: &ConnectionArgs) -> Result<Box<dyn SnmpClient>> {
    let config = ClientConfig::new()
        .community(connection.community.clone())
        .port(connection.port)
        .timeout(Duration::from_millis(connection.timeout_ms));
    let client = UdpSnmpClient::new(config)?;

    if connection.retries > 0 {
        Ok(Box::new(RetryingClient::new(
            client,
            RetryConfig::probes(connection.retries),
        )))
    } else {
        Ok(Box::new(client))
    }
}

/// Fall back to the JSON null literal when serialization fails, so the
/// output stream always carries a valid document.
fn json_or_null(json: serde_json::Result<String>) -> String {
    json.unwrap_or_else(|_| "null".into())
}

fn print_scan_result(format: Format, found: Option<&DiscoveredPrinter>) {
    match format {
        Format::Json => {
            println!("{}", json_or_null(serde_json::to_string_pretty(&found)));
        }
        Format::Text => match found {
            Some(printer) => {
                println!("Found {} at {}", printer.device_name, printer.address);
            }
            None => println!("No printer responded in the scanned range"),
        },
    }
}

fn print_info(format: Format, info: &PrinterInfo) {
    match format {
        Format::Json => {
            println!("{}", json_or_null(serde_json::to_string_pretty(info)));
        }
        Format::Text => {
            println!("Printer {}", info.address);
            println!("  status:           {}", display_value(info.status.as_deref()));
            println!(
                "  reported address: {}",
                display_value(info.reported_address.as_deref())
            );
        }
    }
}

fn print_brand_info(format: Format, brand: &str, info: &BrandInfo) {
    match format {
        Format::Json => {
            println!("{}", json_or_null(serde_json::to_string_pretty(info)));
        }
        Format::Text => {
            if info.is_empty() {
                println!("No attributes registered for brand {brand:?}");
                return;
            }
            println!("{brand} attributes:");
            for (name, value) in info {
                println!("  {name}: {}", display_value(value.as_deref()));
            }
        }
    }
}

fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or("(no value)")
}
