use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inkboard::input::{ControllerSettings, Region, SurfaceController};
use inkboard::script::Script;
use inkboard::session::{self, StoreOptions};
use inkboard::{Config, ui};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("INKBOARD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "inkboard")]
#[command(version = VERSION, about = "Whiteboard drawing surface with shape tools")]
struct Cli {
    /// Use this config file instead of ~/.config/inkboard/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture script and write the result as PNG
    Render {
        /// JSON gesture script
        script: PathBuf,

        /// Destination PNG file
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,

        /// Also add the drawing to the drawing store
        #[arg(long)]
        save: bool,
    },
    /// Manage saved drawings
    Drawings {
        #[command(subcommand)]
        action: DrawingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DrawingsCommand {
    /// List saved drawings
    List,
    /// Re-render a saved drawing as PNG
    Export {
        /// Index shown by `drawings list`
        index: usize,

        /// Destination PNG file
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,
    },
    /// Remove every saved drawing
    Clear,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::get_config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let store = session::options_from_config(&config.storage, &config_dir)?;

    match cli.command {
        Command::Render {
            script,
            output,
            save,
        } => render_script(&config, &store, &script, &output, save),
        Command::Drawings { action } => match action {
            DrawingsCommand::List => list_drawings(&store),
            DrawingsCommand::Export { index, output } => {
                export_drawing(&config, &store, index, &output)
            }
            DrawingsCommand::Clear => clear_drawings(&store),
        },
    }
}

fn render_script(
    config: &Config,
    store: &StoreOptions,
    script_path: &Path,
    output: &Path,
    save: bool,
) -> Result<()> {
    let script = Script::load(script_path)?;
    let mut controller = SurfaceController::new(ControllerSettings::from_config(config));
    script.run(&mut controller, config.canvas.device_pixel_ratio)?;

    let surface = controller
        .surface()
        .context("script did not produce a drawing surface")?;
    write_png(surface, output)?;

    let (width, height) = surface.logical_size();
    println!(
        "Rendered {}x{} ({} strokes) to {}",
        width,
        height,
        controller.frame().len(),
        output.display()
    );
    log::info!(
        "Final state: {}",
        ui::status_text(
            controller.tool(),
            controller.color(),
            controller.brush_size()
        )
    );

    if save {
        match session::record_from_controller(&controller) {
            Some(record) => {
                let count = session::save_drawing(record, store)?;
                println!("Saved drawing ({count} in store)");
            }
            None => println!("Nothing drawn; drawing not saved"),
        }
    }

    Ok(())
}

fn list_drawings(store: &StoreOptions) -> Result<()> {
    let drawings = session::load_drawings(store)?;
    if drawings.is_empty() {
        println!("No saved drawings in {}", store.base_dir.display());
        return Ok(());
    }

    for (index, record) in drawings.iter().enumerate() {
        println!(
            "{:>3}  {}  {}x{}  {} strokes",
            index,
            record.saved_at,
            record.width,
            record.height,
            record.shapes.len()
        );
    }
    Ok(())
}

fn export_drawing(config: &Config, store: &StoreOptions, index: usize, output: &Path) -> Result<()> {
    let drawings = session::load_drawings(store)?;
    let Some(record) = drawings.get(index) else {
        bail!(
            "no saved drawing at index {} ({} saved)",
            index,
            drawings.len()
        );
    };

    let mut controller = SurfaceController::new(ControllerSettings::from_config(config));
    controller
        .init_surface(
            Region::sized(f64::from(record.width), f64::from(record.height)),
            config.canvas.device_pixel_ratio,
        )
        .context("failed to create export surface")?;
    controller
        .load_record(record)
        .context("failed to render saved drawing")?;
    let surface = controller
        .surface()
        .context("saved drawing produced no surface")?;
    write_png(surface, output)?;
    println!("Exported drawing {} to {}", index, output.display());
    Ok(())
}

fn clear_drawings(store: &StoreOptions) -> Result<()> {
    if session::clear_drawings(store)? {
        println!("Removed saved drawings from {}", store.base_dir.display());
    } else {
        println!("No saved drawings to remove");
    }
    Ok(())
}

fn write_png(surface: &inkboard::draw::Surface, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    surface
        .write_png(&mut writer)
        .with_context(|| format!("failed to write PNG to {}", output.display()))?;
    Ok(())
}
