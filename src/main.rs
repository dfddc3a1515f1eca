use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::{Parser, Subcommand};
use parcel_blocks::{Block, MaterialCatalog};
use parcel_chunk::ChunkCache;
use parcel_edit::{EditMap, ParcelOps};
use parcel_runtime::{Budget, Scheduler};
use parcel_world::options::GeneratorOptions;
use parcel_world::{CHUNK_SIZE, ParcelGrid, ParcelId, WorldId};

#[derive(Parser)]
#[command(name = "parcel", about = "Plot-grid worldgen and bulk operations demo")]
struct Cli {
    /// Generator options TOML; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an ASCII overview of the tiling around the origin.
    Map {
        /// Half-width of the rendered area, in sections.
        #[arg(long, default_value_t = 2)]
        sections: i32,
    },
    /// Resolve a world column to its parcel, if any.
    Locate { x: i32, z: i32 },
    /// Run a budgeted clear of one parcel, reporting progress per tick.
    Clear {
        parcel_x: i32,
        parcel_z: i32,
        /// Worktime budget per scheduler tick, in milliseconds.
        #[arg(long, default_value_t = 10)]
        budget_ms: u64,
    },
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let options = match &cli.config {
        Some(path) => GeneratorOptions::from_path(path)?,
        None => GeneratorOptions::default(),
    };
    let mut catalog = MaterialCatalog::new();
    for key in options.materials.iter() {
        catalog.intern(key);
    }
    let grid = Arc::new(ParcelGrid::new(&options, &catalog, WorldId(0))?);

    match cli.command {
        Command::Map { sections } => render_map(&grid, sections),
        Command::Locate { x, z } => match grid.locate(x, z) {
            Some(parcel) => {
                let corner = grid.bottom_corner(parcel);
                let home = grid.home_location(parcel);
                println!("parcel ({}, {})", parcel.x, parcel.z);
                println!("  corner: ({}, {})", corner.x, corner.z);
                println!("  home:   ({:.1}, {:.1}, {:.1})", home.x, home.y, home.z);
            }
            None => println!("no parcel at ({x}, {z})"),
        },
        Command::Clear {
            parcel_x,
            parcel_z,
            budget_ms,
        } => {
            let parcel = ParcelId::new(WorldId(0), parcel_x, parcel_z);
            let sink = Arc::new(Mutex::new(EditMap::new()));
            let ops = ParcelOps::new(Arc::clone(&grid), Arc::clone(&sink));
            let mut scheduler = Scheduler::new(Budget::WorkTime(Duration::from_millis(budget_ms)));

            let worker = ops.clear(&mut scheduler, parcel);
            let total = ops.footprint(parcel).block_count();
            log::info!("clearing parcel ({parcel_x}, {parcel_z}): {total} blocks");

            let mut ticks = 0u64;
            while !worker.is_done() {
                let stats = scheduler.tick();
                ticks += 1;
                log::info!(
                    "tick {ticks}: {} units, progress {:.1}%",
                    stats.units_run,
                    worker.progress() * 100.0
                );
            }
            for event in scheduler.drain_events() {
                log::debug!("task {} finished: {:?}", event.id, event.status);
            }
            let writes = sink.lock().map(|m| m.block_writes()).unwrap_or(0);
            println!(
                "{:?} after {ticks} ticks, {writes} blocks written",
                worker.status()
            );
        }
    }
    Ok(())
}

fn render_map(grid: &ParcelGrid, sections: i32) {
    let span = grid.layout().section_size * sections;
    let chunks_across = (2 * span) / CHUNK_SIZE as i32 + 2;
    let mut cache = ChunkCache::new((chunks_across * chunks_across) as usize);

    for wz in -span..=span {
        let mut row = String::with_capacity((2 * span + 1) as usize);
        for wx in -span..=span {
            let size = CHUNK_SIZE as i32;
            let buf = cache.get_or_generate(grid, wx.div_euclid(size), wz.div_euclid(size));
            let lx = wx.rem_euclid(size) as usize;
            let lz = wz.rem_euclid(size) as usize;
            let top = (0..buf.sy)
                .rev()
                .map(|y| buf.get_local(lx, y, lz))
                .find(|b| !b.is_air())
                .unwrap_or(Block::AIR);
            row.push(surface_symbol(grid, top));
        }
        println!("{row}");
    }
}

fn surface_symbol(grid: &ParcelGrid, block: Block) -> char {
    let palette = grid.palette();
    if block == palette.floor {
        '#'
    } else if block == palette.wall {
        '+'
    } else if block == palette.path_alt {
        ':'
    } else if block == palette.path_main {
        '.'
    } else {
        '?'
    }
}
