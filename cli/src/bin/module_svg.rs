use clap::{Parser, Subcommand};
use cli::{RenderConfig, load_grid};
use color_eyre::eyre::Result;
use module_svg::{SvgDocument, TracedOutline};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a module grid to SVG
    Render {
        /// Grid file: text (`#` dark, `.` light) or an image mask
        #[arg(short, long)]
        input: PathBuf,
        /// TOML or JSON file with render options
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Trace a single path instead of one rect per module
        #[arg(long)]
        use_path: bool,
        /// Pixel size of one module
        #[arg(long)]
        module_size: Option<u32>,
        /// Pixel padding on all sides
        #[arg(long)]
        offset: Option<u32>,
        /// Module color (hex without '#')
        #[arg(long)]
        color: Option<String>,
        /// Background color (hex without '#')
        #[arg(long)]
        fill: Option<String>,
        /// Value of the shape-rendering attribute
        #[arg(long)]
        shape_rendering: Option<String>,
        /// Emit an embeddable fragment instead of a complete document
        #[arg(long)]
        fragment: bool,
        /// Luma threshold for image masks
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Trace the grid's outline and export it as GeoJSON
    Outline {
        /// Grid file: text or an image mask
        #[arg(short, long)]
        input: PathBuf,
        /// Write the GeoJSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Luma threshold for image masks
        #[arg(long, default_value = "128")]
        threshold: u8,
    },
    /// Decode path data and summarize its loops
    Inspect {
        /// Value of a path's `d` attribute
        #[arg(short, long)]
        path_data: String,
        /// Side length of the grid the path was traced from
        #[arg(short, long)]
        size: usize,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries the document, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            config,
            output,
            use_path,
            module_size,
            offset,
            color,
            fill,
            shape_rendering,
            fragment,
            threshold,
        } => {
            let mut config = match config {
                Some(path) => RenderConfig::from_file(&path)?,
                None => RenderConfig::default(),
            };

            let options = &mut config.options;
            options.use_path |= use_path;
            if fragment {
                options.standalone = false;
            }
            options.module_size = module_size.or(options.module_size);
            options.offset = offset.unwrap_or(options.offset);
            options.color = color.unwrap_or_else(|| options.color.clone());
            options.fill = fill.or_else(|| options.fill.clone());
            options.shape_rendering = shape_rendering.unwrap_or_else(|| options.shape_rendering.clone());
            config.threshold = threshold.unwrap_or(config.threshold);

            render(&input, &config, output.as_deref())?;
        }
        Commands::Outline {
            input,
            output,
            threshold,
        } => {
            let grid = load_grid(&input, threshold)?;
            let outline = TracedOutline::trace(&grid)?;
            info!(
                "Traced {} loops ({} holes) from {} edges",
                outline.loops.len(),
                outline.hole_count(),
                outline.edge_count
            );
            write_output(output.as_deref(), &outline.to_geojson_string()?)?;
        }
        Commands::Inspect { path_data, size } => {
            let outline = TracedOutline::from_path_data(size, &path_data)?;
            println!(
                "{} loops, {} outer, {} holes, {} unit edges",
                outline.loops.len(),
                outline.outer_count(),
                outline.hole_count(),
                outline.edge_count
            );
            for (i, edge_loop) in outline.loops.iter().enumerate() {
                println!(
                    "  loop {}: start {}, {} edges, {}",
                    i,
                    edge_loop.start().map(|v| v.to_string()).unwrap_or_default(),
                    edge_loop.len(),
                    edge_loop.orientation()
                );
            }
            println!("{}", outline.rasterize().to_text());
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&RenderConfig::schema())?);
        }
    }

    Ok(())
}

fn render(input: &Path, config: &RenderConfig, output: Option<&Path>) -> Result<()> {
    let grid = load_grid(input, config.threshold)?;
    info!(
        "Rendering {} with the {} strategy",
        input.display(),
        config.options.strategy()
    );

    let document = SvgDocument::render(&grid, &config.options)?;
    info!(
        "Canvas {}x{} px, {} dark modules",
        document.dimension,
        document.dimension,
        grid.dark_count()
    );

    write_output(output, &document.to_string())
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
