use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aurarecon::config::{Config, CONFIG_FILE};
use aurarecon::error::ScanError;
use aurarecon::knowledge;
use aurarecon::output::OutputFormat;
use aurarecon::rules::{RuleEngine, Severity};
use aurarecon::ScanOptions;

#[derive(Parser)]
#[command(
    name = "aurarecon",
    about = "Discover and enrich exposed Aura RPC actions on Experience Cloud sites",
    version,
    author
)]
struct Cli {
    /// Verbose logging to stderr (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a site page and the scripts it loads
    Scan {
        /// Absolute http(s) URL of the entry page
        url: String,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, sarif)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Minimum severity to fail (info, low, medium, high, critical)
        #[arg(long)]
        fail_on: Option<String>,

        /// Per-request timeout in seconds (0 disables)
        #[arg(long, env = "AURARECON_TIMEOUT")]
        timeout: Option<u64>,

        /// Maximum number of script resources to fetch (at most 15)
        #[arg(long)]
        max_scripts: Option<usize>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all vulnerability detection rules
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// List the controllers and actions in the knowledge base
    ListControllers {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .aurarecon.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "aurarecon=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Scan {
            url,
            config,
            format,
            fail_on,
            timeout,
            max_scripts,
            output,
        } => {
            cmd_scan(
                url,
                config,
                format,
                fail_on,
                timeout,
                max_scripts,
                output,
            )
            .await
        }
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::ListControllers { format } => cmd_list_controllers(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_scan(
    url: String,
    config: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    timeout: Option<u64>,
    max_scripts: Option<usize>,
    output_path: Option<PathBuf>,
) -> Result<i32, ScanError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let fail_on = fail_on_str.and_then(|s| {
        let sev = Severity::from_str_lenient(&s);
        if sev.is_none() {
            eprintln!("Warning: unknown severity '{}', using config default", s);
        }
        sev
    });

    let options = ScanOptions {
        config_path: config,
        format,
        fail_on_override: fail_on,
        timeout_override: timeout,
        max_scripts_override: max_scripts,
    };

    let report = aurarecon::scan(&url, &options).await?;
    let rendered = aurarecon::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = findings above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_rules(format_str: String) -> Result<i32, ScanError> {
    let engine = RuleEngine::new();
    let rules = engine.list_rules();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<10} {:<44} {:<10} {:<8} CATEGORY",
                "ID", "NAME", "SEVERITY", "CWE"
            );
            println!("{}", "-".repeat(96));
            for rule in &rules {
                println!(
                    "{:<10} {:<44} {:<10} {:<8} {}",
                    rule.id,
                    rule.name,
                    rule.default_severity.to_string(),
                    rule.cwe_id.as_deref().unwrap_or("-"),
                    rule.category,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_list_controllers(format_str: String) -> Result<i32, ScanError> {
    let controllers = knowledge::controllers();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(controllers)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<32} {:<28} {:<10} {:<5} PARAMS",
                "CONTROLLER", "ACTION", "RISK", "AUTH"
            );
            println!("{}", "-".repeat(96));
            for controller in controllers {
                for action in controller.actions {
                    let params: Vec<&str> = action.params.iter().map(|p| p.name).collect();
                    println!(
                        "{:<32} {:<28} {:<10} {:<5} {}",
                        controller.name,
                        action.name,
                        action.risk.to_string(),
                        if action.requires_auth { "yes" } else { "no" },
                        params.join(", "),
                    );
                }
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, ScanError> {
    let path = PathBuf::from(CONFIG_FILE);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", CONFIG_FILE);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", CONFIG_FILE);

    Ok(0)
}
