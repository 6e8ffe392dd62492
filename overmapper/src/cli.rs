use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::{Report, eyre::eyre};
use overmap_core::{OutputFormat, RenderConfig, SeenConfig};

#[derive(Parser, Debug)]
#[command(
    name = "overmapper",
    version,
    about = "Renders Cataclysm: DDA overmap saves as text or HTML maps",
    long_about = "Extracts overmap terrain definitions from the game data into a terrain table \
                  (prepare), then renders the overmap tiles of a save directory using that table \
                  (convert). The explored area recorded in a save's seen files can be drawn as a \
                  PNG image (seen)"
)]
pub struct Cli {
    /// Log progress: files processed, terrains parsed, tiles found
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Terrain table file written by `prepare` and read by `convert` and `inspect`
    #[arg(
        short,
        long,
        global = true,
        default_value = "terrain.dat",
        value_name = "PATH"
    )]
    pub table: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract overmap terrain definitions from a game directory into the table file
    Prepare {
        /// Game root, containing `data/json` and `data/mods`
        #[arg(value_name = "CDDA_DIR")]
        root: PathBuf,
    },

    /// Render the overmap tiles of a save directory
    Convert(ConvertArgs),

    /// Print the table size and how the given terrain identifiers resolve
    Inspect {
        #[arg(value_name = "IDENTIFIER")]
        ids: Vec<String>,
    },

    /// Draw the explored area of a save as a PNG image
    Seen(SeenArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Emit plain text instead of an HTML document
    #[arg(short, long)]
    pub plain: bool,

    /// Characters per tile row
    #[arg(short = 'W', long, default_value_t = 180, value_name = "CHARS")]
    pub tile_width: usize,

    /// Rows per tile
    #[arg(short = 'H', long, default_value_t = 180, value_name = "ROWS")]
    pub tile_height: usize,

    /// Z-level layer to render; 10 is ground level
    #[arg(short, long, default_value_t = 10, value_name = "INDEX")]
    pub layer: usize,

    /// Output file; defaults to stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Save directory holding the `o.<x>.<y>` tile files
    #[arg(value_name = "SAVE_DIR")]
    pub save: PathBuf,
}

#[derive(Args, Debug)]
pub struct SeenArgs {
    /// Tiles per overmap row
    #[arg(short = 'x', long, default_value_t = 180, value_name = "TILES")]
    pub map_width: usize,

    /// Tile rows per overmap
    #[arg(short = 'y', long, default_value_t = 180, value_name = "TILES")]
    pub map_height: usize,

    /// Z-level layer to draw; 10 is ground level
    #[arg(short, long, default_value_t = 10, value_name = "INDEX")]
    pub layer: usize,

    /// Pixels per tile
    #[arg(short, long, default_value_t = 2, value_name = "PIXELS")]
    pub scale: usize,

    /// Don't outline every overmap
    #[arg(long)]
    pub no_grid: bool,

    /// Don't outline the overmap at 0,0
    #[arg(long)]
    pub no_origin: bool,

    /// Mark tiles that carry a map note
    #[arg(short, long)]
    pub notes: bool,

    /// Save directory holding the `#<player>.seen.<x>.<y>` files
    #[arg(value_name = "SAVE_DIR")]
    pub save: PathBuf,

    /// PNG file to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

impl Cli {
    /// Validates the CLI arguments
    pub fn validate(&self) -> Result<(), Report> {
        match &self.command {
            Command::Convert(args) => args.validate(),
            Command::Seen(args) => args.validate(),
            Command::Prepare { .. } | Command::Inspect { .. } => Ok(()),
        }
    }
}

impl ConvertArgs {
    pub fn validate(&self) -> Result<(), Report> {
        if self.tile_width == 0 {
            return Err(eyre!("Tile width must be positive"));
        }

        if self.tile_height == 0 {
            return Err(eyre!("Tile height must be positive"));
        }

        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            layer: self.layer,
            format: if self.plain { OutputFormat::Plain } else { OutputFormat::Html },
        }
    }
}

impl SeenArgs {
    pub fn validate(&self) -> Result<(), Report> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(eyre!("Overmap size must be positive"));
        }

        if self.scale == 0 {
            return Err(eyre!("Scale must be positive"));
        }

        Ok(())
    }

    pub fn seen_config(&self) -> SeenConfig {
        SeenConfig {
            map_width: self.map_width,
            map_height: self.map_height,
            layer: self.layer,
            scale: self.scale,
            grid: !self.no_grid,
            origin: !self.no_origin,
            notes: self.notes,
        }
    }
}
