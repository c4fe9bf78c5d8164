/*!
cmapfilter Command Line Interface

Provides commands for turning catalogue colormaps into SVG transfer filters and for
previewing two-color interpolations across colorspaces.
*/

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cmapfilter::{
    compose_preview, Catalogue, Color, ColorSpace, Config, JsonWriter, SvgFilterWriter, Writer,
    VERSION,
};

#[derive(Parser)]
#[command(name = "cmapfilter")]
#[command(about = "Colormaps as SVG feComponentTransfer filters")]
#[command(version = VERSION)]
pub struct Cli {
    /// Collection file or directory to load (repeatable); replaces the built-in collection
    #[arg(long, global = true)]
    pub catalogue: Vec<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List colormap names in catalogue order
    List,

    /// Print the per-channel tableValues of a colormap
    Tables {
        /// Colormap name
        name: String,

        /// Number of evenly spaced samples per channel
        #[arg(long)]
        samples: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TableFormat::Plain)]
        format: TableFormat,
    },

    /// Emit SVG filter markup for a colormap
    Filter {
        /// Colormap name
        name: String,

        /// Filter element id
        #[arg(long)]
        id: Option<String>,

        /// Number of evenly spaced samples per channel
        #[arg(long)]
        samples: Option<usize>,

        /// Wrap the filter in an <svg> element
        #[arg(long)]
        standalone: bool,

        /// Output file path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render two-color interpolations through several colorspaces to a PNG
    Preview {
        /// Colormap whose end colors are used as defaults for --start and --end
        name: Option<String>,

        /// Start color (any CSS color)
        #[arg(long)]
        start: Option<String>,

        /// End color (any CSS color)
        #[arg(long)]
        end: Option<String>,

        /// Colorspace to interpolate through (repeatable)
        #[arg(long = "space")]
        spaces: Vec<String>,

        /// Samples per strip
        #[arg(long)]
        samples: Option<usize>,

        /// Rows per strip
        #[arg(long)]
        height: Option<usize>,

        /// Output PNG path
        #[arg(long)]
        output: PathBuf,
    },

    /// Show the default preview colorspaces and every accepted name
    Spaces,

    /// Report catalogue entries whose colors cannot be decoded
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    /// One line of values per channel
    Plain,
    /// JSON object keyed by channel
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmapfilter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let sources = if cli.catalogue.is_empty() {
        config.catalogues.clone()
    } else {
        cli.catalogue.clone()
    };

    match cli.command {
        Commands::List => {
            let catalogue = load_catalogue(&sources)?;
            for name in catalogue.names() {
                println!("{}", name);
            }
        }

        Commands::Tables {
            name,
            samples,
            format,
        } => {
            let catalogue = load_catalogue(&sources)?;
            let tables = catalogue
                .colormap(&name)?
                .sample(samples.unwrap_or(config.table.samples));
            match format {
                TableFormat::Plain => println!("{}", tables),
                TableFormat::Json => {
                    let doc = JsonWriter::with_name(&name).write(&tables)?;
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                }
            }
        }

        Commands::Filter {
            name,
            id,
            samples,
            standalone,
            output,
        } => {
            let catalogue = load_catalogue(&sources)?;
            let tables = catalogue
                .colormap(&name)?
                .sample(samples.unwrap_or(config.table.samples));
            let writer = SvgFilterWriter::new(id.unwrap_or(config.table.filter_id))
                .standalone(standalone);
            let svg = writer.write(&tables)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("SVG filter '{}' written to {}", writer.id(), path.display());
                }
                None => print!("{}", svg),
            }
        }

        Commands::Preview {
            name,
            start,
            end,
            spaces,
            samples,
            height,
            output,
        } => {
            let colormap = match &name {
                Some(name) => Some(load_catalogue(&sources)?.colormap(name)?),
                None => None,
            };
            let start = match (start, &colormap) {
                (Some(css), _) => Color::parse(&css)?,
                (None, Some(cmap)) => cmap.start(),
                (None, None) => bail!("--start is required when no colormap is named"),
            };
            let end = match (end, &colormap) {
                (Some(css), _) => Color::parse(&css)?,
                (None, Some(cmap)) => cmap.end(),
                (None, None) => bail!("--end is required when no colormap is named"),
            };

            let spaces = if spaces.is_empty() {
                config.preview.spaces.clone()
            } else {
                spaces
                    .iter()
                    .map(|s| s.parse::<ColorSpace>())
                    .collect::<Result<Vec<_>, _>>()?
            };

            let preview = compose_preview(
                start,
                end,
                &spaces,
                samples.unwrap_or(config.preview.samples),
                height.unwrap_or(config.preview.strip_height),
            )?;
            preview.save_png(&output)?;

            println!("{} -> {}", start.to_hex(), end.to_hex());
            for caption in preview.captions() {
                println!("{}", caption);
            }
        }

        Commands::Spaces => {
            println!("Default preview colorspaces:");
            for space in &config.preview.spaces {
                println!("  {}", space);
            }
            println!("\nAll colorspaces:");
            for space in ColorSpace::all() {
                println!("  {}", space);
            }
        }

        Commands::Check => {
            let catalogue = load_catalogue(&sources)?;
            let invalid = catalogue.invalid_entries();
            if invalid.is_empty() {
                println!("All {} colormaps are valid", catalogue.len());
            } else {
                for name in &invalid {
                    if let Some(Err(e)) = catalogue.get(name).map(|entry| entry.colormap()) {
                        eprintln!("{}: {}", name, e);
                    }
                }
                bail!("{} of {} colormaps are invalid", invalid.len(), catalogue.len());
            }
        }
    }

    Ok(())
}

/// Merge the given collection files and directories, or fall back to the built-in set.
fn load_catalogue(sources: &[PathBuf]) -> anyhow::Result<Catalogue> {
    if sources.is_empty() {
        return Ok(Catalogue::builtin());
    }

    let mut catalogue = Catalogue::new();
    for source in sources {
        catalogue.merge(load_source(source)?);
    }
    info!(
        "Loaded {} colormaps from {} sources",
        catalogue.len(),
        sources.len()
    );
    Ok(catalogue)
}

fn load_source(path: &Path) -> anyhow::Result<Catalogue> {
    let catalogue = if path.is_dir() {
        Catalogue::load_dir(path)
    } else {
        Catalogue::load(path)
    };
    catalogue.with_context(|| format!("Failed to load catalogue {}", path.display()))
}
