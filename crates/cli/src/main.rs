use clap::Parser;
use dot_lookup_domain::{CliOverrides, Config, DomainError, DotServer, RecordType};
use dot_lookup_infrastructure::dns::transport::TlsTransport;
use dot_lookup_infrastructure::dns::QueryDriver;
use std::process::ExitCode;
use tracing::{debug, info};

mod bootstrap;
mod output;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "dot-lookup")]
#[command(version)]
#[command(about = "Resolve a name over DNS-over-TLS and print host-style answers")]
struct Cli {
    /// Domain name to look up
    domain: String,

    /// Server alias (cloudflare, quad9, cleanbrowsing, or one from the config) or an IP/hostname
    server: String,

    /// Record type: A, AAAA, CNAME or NS; anything else queries A
    record_type: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Connect and read timeout in seconds
    #[arg(short = 't', long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log each answer's TTL to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// The requested type, falling back to the config default when omitted
    /// and to A when the name is not recognised.
    fn record_type(&self, config: &Config) -> RecordType {
        match self.record_type.as_deref() {
            Some(name) => name.parse().unwrap_or_else(|_| {
                debug!(requested = %name, "Unknown record type, querying A");
                RecordType::A
            }),
            None => config.default_record_type(),
        }
    }
}

/// Where a failure is reported and what it says.
#[derive(Debug, PartialEq, Eq)]
enum Report {
    Stdout(String),
    Stderr(String),
}

impl Report {
    fn emit(&self) {
        match self {
            Report::Stdout(line) => println!("{line}"),
            Report::Stderr(line) => eprintln!("{line}"),
        }
    }
}

/// Help and version requests are not failures; every real parse error is.
fn parse_exit_status(error: &clap::Error) -> u8 {
    if error.use_stderr() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}

/// Not-found goes to stdout like an answer line; everything else is an error on stderr.
fn report(error: &anyhow::Error) -> Report {
    match error.downcast_ref::<DomainError>() {
        Some(e) if e.is_not_found() => Report::Stdout(e.to_string()),
        Some(e) => Report::Stderr(format!("Error ({:?}): {e}", e.kind())),
        None => Report::Stderr(format!("Error: {error:#}")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_status(&e));
        }
    };

    let cli_overrides = CliOverrides {
        port: cli.port,
        timeout_secs: cli.timeout,
        log_level: cli.log_level.clone(),
    };

    let config = match bootstrap::load_config(cli.config.as_deref(), cli_overrides) {
        Ok(config) => config,
        Err(e) => {
            report(&e).emit();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    bootstrap::init_logging(&config.logging.level, cli.log_level.as_deref(), cli.verbose);

    match run(&cli, &config).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            report(&e).emit();
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let record_type = cli.record_type(config);
    let server = DotServer::from_arg(&cli.server, config.lookup.port, &config.servers)?;

    info!(
        domain = %cli.domain,
        server = %server,
        tls_name = %server.tls_name,
        record_type = %record_type,
        "Resolving"
    );

    let driver = QueryDriver::from_config(TlsTransport::new(), &config.lookup);
    let answers = driver.resolve(&server, &cli.domain, record_type).await?;

    output::print_answers(&cli.domain, &answers);
    Ok(())
}
