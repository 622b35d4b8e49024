use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fcg")]
#[command(
    version,
    about = "Figma Component Generator - Turn Figma frames into Angular components",
    long_about = "Figma Component Generator (FCG)\n\nModes:\n- fetch: download a Figma document as JSON.\n- component: walk one frame and write <name>.component.{html,css,ts}.\n- extract: collect the first page's frames and their rendered images into a layout file.\n- emit: turn a layout file into an absolutely positioned page component.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML or YAML) for file key/token/output paths/timeouts; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the raw document JSON for a Figma file
    Fetch {
        #[arg(long, help = "Figma file key or URL (falls back to file_key in config)")]
        file: Option<String>,

        #[arg(
            long,
            short,
            help = "Where to save the document (default: figma_<FILE_KEY>.json)"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Generate a component from one frame
    Component {
        #[arg(
            long,
            help = "Figma file key or URL; a node-id in the URL selects the frame"
        )]
        file: Option<String>,

        #[arg(
            long,
            conflicts_with = "file",
            value_name = "PATH",
            help = "Saved document JSON (from `fcg fetch`) instead of a live fetch"
        )]
        input: Option<PathBuf>,

        #[arg(long, help = "Node id of the frame to generate (e.g. 1:2)")]
        node_id: Option<String>,

        #[arg(long, help = "Component name (default: the frame name)")]
        name: Option<String>,

        #[arg(long, value_name = "DIR", help = "Output directory for component files")]
        output_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Extract frames and image URLs into a layout file
    Extract {
        #[arg(long, help = "Figma file key or URL (falls back to file_key in config)")]
        file: Option<String>,

        #[arg(long, value_name = "PATH", help = "Layout file to write")]
        layout: Option<PathBuf>,

        #[arg(long, help = "Image export scale (0.01-4, default from config)")]
        scale: Option<f32>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Emit a page component from a layout file
    Emit {
        #[arg(long, value_name = "PATH", help = "Layout file to read")]
        layout: Option<PathBuf>,

        #[arg(long, help = "Component name (default: figma-layout)")]
        name: Option<String>,

        #[arg(long, value_name = "DIR", help = "Output directory for component files")]
        output_dir: Option<PathBuf>,

        #[arg(
            long,
            help = "Download frame images into <output-dir>/assets and reference them locally"
        )]
        download_assets: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
