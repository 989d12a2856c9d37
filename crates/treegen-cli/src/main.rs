//! treegen CLI
//!
//! Commands:
//! - `treegen interface <snapshot>` - Nested type declaration for a snapshot
//! - `treegen instantiate <snapshot>` - Script that rebuilds the snapshot
//! - `treegen markup <snapshot>` - JSX markup for the snapshot's GUI tree
//! - `treegen watch [dir]` - Push asset types to the local server on change

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use treegen::codegen::DEFAULT_WRAP_WIDTH;
use treegen::metadata::DEFAULT_API_DUMP_URL;
use treegen::{Generator, GeneratorConfig};

mod bridge;
mod ui;

use bridge::BridgeConfig;

#[derive(Parser)]
#[command(name = "treegen")]
#[command(about = "Describe scene snapshots as TypeScript")]
struct Cli {
    /// API dump location (URL or file)
    #[arg(long, global = true, env = "TREEGEN_API_DUMP", default_value = DEFAULT_API_DUMP_URL)]
    api_dump: String,

    /// JSON table of default property values per class
    #[arg(long, global = true, env = "TREEGEN_DEFAULTS")]
    defaults: Option<PathBuf>,

    /// Attribute length above which markup goes one attribute per line
    #[arg(long, global = true, default_value_t = DEFAULT_WRAP_WIDTH)]
    wrap_width: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the nested type declaration for a snapshot
    Interface {
        snapshot: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a script that rebuilds a snapshot
    Instantiate {
        snapshot: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate JSX markup for a snapshot
    Markup {
        snapshot: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Watch a directory of snapshots and push their types on change
    Watch {
        #[arg(default_value = "assets")]
        dir: PathBuf,

        /// Asset-types endpoint
        #[arg(long, default_value = bridge::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Minimum milliseconds between updates for one asset
        #[arg(long, default_value_t = bridge::DEFAULT_THROTTLE.as_millis() as u64)]
        throttle_ms: u64,

        /// File-system debounce in milliseconds
        #[arg(long, default_value_t = bridge::DEFAULT_DEBOUNCE.as_millis() as u64)]
        debounce_ms: u64,
    },
}

#[derive(Clone, Copy)]
enum Output {
    Interface,
    Instantiation,
    Markup,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treegen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = GeneratorConfig {
        api_dump: cli.api_dump,
        defaults: cli.defaults,
        markup_wrap_width: cli.wrap_width,
    };

    let spinner = ui::spinner("Fetching API data...");
    let generator = Generator::from_config(&config).await;
    spinner.finish_and_clear();
    let generator = generator?;

    match cli.command {
        Commands::Interface { snapshot, output } => {
            generate(&generator, Output::Interface, &snapshot, output.as_deref())?;
        }

        Commands::Instantiate { snapshot, output } => {
            generate(&generator, Output::Instantiation, &snapshot, output.as_deref())?;
        }

        Commands::Markup { snapshot, output } => {
            generate(&generator, Output::Markup, &snapshot, output.as_deref())?;
        }

        Commands::Watch {
            dir,
            endpoint,
            throttle_ms,
            debounce_ms,
        } => {
            let config = BridgeConfig {
                assets_dir: dir,
                endpoint,
                throttle: Duration::from_millis(throttle_ms),
                debounce: Duration::from_millis(debounce_ms),
            };
            bridge::run(&generator, config).await?;
        }
    }

    Ok(())
}

fn generate(
    generator: &Generator,
    kind: Output,
    snapshot: &Path,
    output: Option<&Path>,
) -> miette::Result<()> {
    let start = Instant::now();
    let root = treegen::scene::load_snapshot(snapshot)?;

    let code = match kind {
        Output::Interface => generator.generate_interface(&root)?,
        Output::Instantiation => generator.generate_instantiation(&root)?,
        Output::Markup => generator.generate_markup(&root)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &code)
                .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
            ui::success(&format!("Wrote {}", path.display()));
            ui::timing("Generated", start.elapsed().as_millis());
        }
        None => println!("{}", code.trim_end()),
    }

    Ok(())
}
