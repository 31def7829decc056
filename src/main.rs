use clap::{Parser, Subcommand};
use kustos::{audit, batch, config, listing, output, thumbs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kustos")]
#[command(about = "Maintenance toolkit for a numbered bilingual art catalogue")]
#[command(long_about = "\
Maintenance toolkit for a numbered bilingual art catalogue

One HTML page per work (item7.html or item07.html), each embedding an
English and a German description inside <div class=\"text-block\">.

Catalogue structure:

  catalogue-root/
  ├── catalogue.toml           # Config (optional, defaults match the live site)
  ├── item1.html               # Work pages, unpadded or zero-padded numbering
  ├── item02.html
  ├── assets/images/           # Source images for thumbnails
  ├── assets/thumbs/           # Generated thumbnails (numeric stems)
  ├── assets/catalogue/        # Full-size JPEGs referenced by the pages
  └── catalogue/index.html     # Generated listing page

Run 'kustos gen-config' to print a documented catalogue.toml.")]
#[command(version)]
struct Cli {
    /// Catalogue root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize the bilingual text-block of every page (EN before DE)
    Reorder {
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate JPEG thumbnails from the source images
    Thumbs,
    /// Generate the catalogue index page from present thumbnails
    Listing,
    /// Cross-check page numbering against image assets
    Audit,
    /// Print a stock catalogue.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.root)?;

    match cli.command {
        Command::Reorder { dry_run, json } => {
            let report = batch::reorder_range(&cli.root, &config, dry_run);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_reorder_report(&report, dry_run);
            }
        }
        Command::Thumbs => {
            init_thread_pool(&config.processing);
            let report = thumbs::generate_thumbnails(&cli.root, &config.thumbnails)?;
            output::print_thumbs_report(&report, &config.thumbnails.output_dir);
        }
        Command::Listing => {
            let report = listing::generate_listing(&cli.root, &config)?;
            output::print_listing_report(&report, &config.listing.output_file);
        }
        Command::Audit => {
            let report = audit::audit_catalogue(&cli.root, &config)?;
            output::print_audit_report(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
