//! # carelabel CLI
//!
//! Command-line interface for generating clothing care labels.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive session (default)
//! carelabel
//!
//! # One-shot generation
//! carelabel generate --composition "95% cotton, 5% elastane" --care washable --sizes 36,38 --colors white
//!
//! # Web form
//! carelabel serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use carelabel::{
    LabelError,
    batch::{LabelGenerator, LabelRequest},
    catalog::{CareType, LabelColor, Size, TemplateStore},
    config::LabelConfig,
    interactive, logging, pdf,
    server::{self, ServerConfig},
};

/// carelabel - Clothing care label generator
#[derive(Parser, Debug)]
#[command(name = "carelabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the template images
    #[arg(long, global = true, default_value = ".")]
    templates: PathBuf,

    /// Directory labels are written to
    #[arg(long, global = true, default_value = "output_labels")]
    output: PathBuf,

    /// Log file (also mirrored to stdout)
    #[arg(long, global = true, default_value = logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// JSON file overriding layout values
    #[arg(long, global = true, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Font file tried before the built-in candidates (repeatable)
    #[arg(long = "font", global = true, value_name = "FILE")]
    fonts: Vec<PathBuf>,

    /// Log debug details
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask for the label parameters on the console
    Interactive,

    /// Generate labels without prompting
    Generate {
        /// Composition, e.g. "95% cotton, 5% elastane"
        #[arg(long)]
        composition: String,

        /// Care variant: washable or not_washable
        #[arg(long, default_value = "washable")]
        care: CareType,

        /// Comma-separated sizes (all sizes when omitted)
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<Size>,

        /// Comma-separated colors: white, black (both when omitted)
        #[arg(long, value_delimiter = ',')]
        colors: Vec<LabelColor>,
    },

    /// Serve the web form
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logging::init(&cli.log_file, level) {
        eprintln!("Warning: file logging unavailable ({}), continuing without it", e);
    }

    // Without PDF output there is nothing useful to do
    pdf::self_check()?;

    let mut config = match &cli.layout {
        Some(path) => LabelConfig::from_json_file(path)?,
        None => LabelConfig::default(),
    };
    if !cli.fonts.is_empty() {
        let mut candidates = cli.fonts.clone();
        candidates.append(&mut config.font_candidates);
        config.font_candidates = candidates;
    }

    let generator = LabelGenerator::new(config, TemplateStore::standard(&cli.templates));

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            interactive::run(&generator, &cli.output, &mut input, &mut out)?;
        }
        Commands::Generate {
            composition,
            care,
            sizes,
            colors,
        } => {
            let sizes = if sizes.is_empty() { Size::ALL.to_vec() } else { sizes };
            let colors = if colors.is_empty() {
                LabelColor::ALL.to_vec()
            } else {
                colors
            };
            let request = LabelRequest::new(composition, care, sizes, colors);
            let report = generator.generate(&request, &cli.output);
            println!(
                "Created {} labels ({} failed) in {}",
                report.generated,
                report.errors,
                report.output_dir.display()
            );
        }
        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
                scratch_dir: None,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, generator))?;
        }
    }

    Ok(())
}
