//! KiBoM CLI - KiCad bill of materials generation from the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use kibom::bom::columns::KNOWN_COLUMNS;
use kibom::{BomSummary, GenerateOptions, KiBomCore, OutputFormat, ValueParser};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kibom")]
#[command(about = "KiCad bill of materials generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an XML BoM
    Xml {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Write a CSV BoM
    Csv {
        #[command(flatten)]
        run: RunArgs,

        /// Field separator
        #[arg(long, value_name = "CHAR")]
        separator: Option<char>,

        /// Do not append the statistics block
        #[arg(long)]
        hide_stats: bool,
    },

    /// Normalize a component value
    Parse {
        /// Value as written in the schematic, e.g. 4k7 or 0.1uF
        value: String,

        /// Decimal separator (defaults to the locale's)
        #[arg(long, value_name = "CHAR")]
        decimal_point: Option<char>,
    },

    /// Check whether two component values are equal
    Compare {
        a: String,
        b: String,

        /// Decimal separator (defaults to the locale's)
        #[arg(long, value_name = "CHAR")]
        decimal_point: Option<char>,
    },

    /// List the columns understood without component fields
    Columns,
}

#[derive(Args)]
struct RunArgs {
    /// BoM input document (JSON)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Number of boards to build
    #[arg(short, long)]
    number: Option<u32>,

    /// Assembly variant name
    #[arg(long)]
    variant: Option<String>,

    /// Keep Do Not Fit groups in the output
    #[arg(long)]
    keep_dnf: bool,

    /// Print the run summary
    #[arg(short, long, value_enum, default_value = "human")]
    format: SummaryFormat,
}

#[derive(Clone, ValueEnum)]
enum SummaryFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Xml { run } => handle_generate(run, OutputFormat::Xml, GenerateOptions::default()),
        Commands::Csv {
            run,
            separator,
            hide_stats,
        } => {
            let overrides = GenerateOptions {
                csv_separator: separator,
                hide_stats: hide_stats.then_some(true),
                ..Default::default()
            };
            handle_generate(run, OutputFormat::Csv, overrides)
        }
        Commands::Parse {
            value,
            decimal_point,
        } => handle_parse(&value, parser(decimal_point)),
        Commands::Compare { a, b, decimal_point } => handle_compare(&a, &b, parser(decimal_point)),
        Commands::Columns => {
            handle_columns();
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "kibom=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parser(decimal_point: Option<char>) -> ValueParser {
    match decimal_point {
        Some(c) => ValueParser::with_decimal_point(c),
        None => ValueParser::from_locale(),
    }
}

fn handle_generate(run: RunArgs, format: OutputFormat, mut overrides: GenerateOptions) -> i32 {
    overrides.number = run.number;
    overrides.variant = run.variant;
    if run.keep_dnf {
        overrides.ignore_dnf = Some(false);
    }

    if let Some(guessed) = OutputFormat::from_path(&run.output) {
        if guessed != format {
            tracing::warn!(
                "Output {} does not look like a {:?} file",
                run.output.display(),
                format
            );
        }
    }

    match KiBomCore::generate(&run.input, &run.output, format, &overrides) {
        Ok(summary) => {
            output_summary(&summary, &run.format);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn output_summary(summary: &BomSummary, format: &SummaryFormat) {
    match format {
        SummaryFormat::Human => {
            println!("Wrote {}", summary.output.display());
            println!("  Groups:            {} ({} written)", summary.n_groups, summary.groups_written);
            println!("  Components:        {}", summary.total_components);
            println!("  Fitted:            {}", summary.fitted_components);
            println!("  Build quantity:    {}", summary.build_quantity);
        }
        SummaryFormat::Json => match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        },
    }
}

fn handle_parse(value: &str, parser: ValueParser) -> i32 {
    match parser.parse(value) {
        Some(parsed) => {
            println!("magnitude:  {}", parsed.magnitude);
            println!("multiplier: {:e}", parsed.multiplier());
            println!(
                "unit:       {}",
                parsed.unit.map(|u| u.symbol()).unwrap_or("-")
            );
            println!("canonical:  {}", parsed);
            0
        }
        None => {
            println!("{:?}: unparseable", value);
            1
        }
    }
}

fn handle_compare(a: &str, b: &str, parser: ValueParser) -> i32 {
    if parser.compare(a, b) {
        println!("equal");
        0
    } else {
        println!("different");
        1
    }
}

fn handle_columns() {
    println!("Known columns:\n");
    for (name, description) in KNOWN_COLUMNS {
        println!("  {}", name);
        println!("    {}", description);
    }
    println!("\nAny other heading is looked up in the component fields.");
}
