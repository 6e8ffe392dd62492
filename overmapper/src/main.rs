mod cli;
mod image_file;
mod logging;
mod table_file;
mod terrain_extractor;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use overmap_core::{OvermapGrid, OvermapRenderer, SeenRenderer, TerrainTable, resolve};

use crate::{
    cli::{Cli, Command, ConvertArgs, SeenArgs},
    image_file::save_png,
    logging::{LoggingConfig, init_logging},
    table_file::{load_table, save_table},
};

/// Exit status for command line usage errors.
const EXIT_USAGE: u8 = 1;
/// Exit status for fatal errors.
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help and version go to stdout and are not failures
            let _ = err.print();
            return ExitCode::from(usage_status(&err));
        },
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("FATAL: {report:?}");
            ExitCode::from(EXIT_FATAL)
        },
    }
}

fn usage_status(err: &clap::Error) -> u8 {
    if err.use_stderr() { EXIT_USAGE } else { 0 }
}

fn run(cli: &Cli) -> Result<()> {
    // panic hook
    color_eyre::install()?;

    let logging_config = LoggingConfig::from_env(cli.verbose);
    let _guard = init_logging(&logging_config).wrap_err("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "overmapper starting up"
    );

    cli.validate()?;

    match &cli.command {
        Command::Prepare { root } => {
            let table = terrain_extractor::prepare(root)
                .wrap_err_with(|| format!("Failed to prepare terrain from {}", root.display()))?;
            save_table(&table, &cli.table)
        },
        Command::Convert(args) => convert(&load_table(&cli.table)?, args),
        Command::Inspect { ids } => {
            inspect(&load_table(&cli.table)?, ids);
            Ok(())
        },
        Command::Seen(args) => seen(args),
    }
}

fn convert(table: &TerrainTable, args: &ConvertArgs) -> Result<()> {
    let grid = OvermapGrid::discover(&args.save)?;
    let renderer = OvermapRenderer::new(table, args.render_config());

    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(create_output(path)?);
            renderer.render(&grid, &mut out)?;
            out.into_inner()
                .map_err(|e| e.into_error())
                .and_then(|file| file.sync_all())
                .wrap_err_with(|| format!("Failed to finish writing {}", path.display()))?;
        },
        None => {
            let mut out = BufWriter::new(std::io::stdout().lock());
            renderer.render(&grid, &mut out)?;
            out.flush().wrap_err("Failed to write to stdout")?;
        },
    }

    Ok(())
}

fn seen(args: &SeenArgs) -> Result<()> {
    let renderer = SeenRenderer::new(args.seen_config())?;
    let grid = SeenRenderer::discover(&args.save)?;
    let image = renderer.render(&grid)?;
    save_png(&image, &args.output)
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).wrap_err_with(|| format!("Failed to create output file {}", path.display()))
}

fn inspect(table: &TerrainTable, ids: &[String]) {
    println!("terrain table: {} entries", table.len());
    for id in ids {
        let symbol = resolve(table, id);
        let color = if symbol.color.is_empty() { "-" } else { symbol.color };
        println!("{id}: glyph {:?}, color {color}", symbol.glyph);
    }
}
