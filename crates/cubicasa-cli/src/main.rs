// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `cubicasa` - inspect CubiCasa floor plans from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cubicasa_data::{load_layouts, DataManager};
use cubicasa_model::{Building, EntityKind, Floor, FloorPlanLoader, ProgressCallback};
use cubicasa_parser::CubiCasaLoader;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cubicasa", version, about = "Load CubiCasa5k floor plans")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one model.svg
    Floor {
        svg: PathBuf,
        /// Print the floor as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load one building directory
    Building {
        dir: PathBuf,
        /// Print the building as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the dataset (downloading if needed) and list its buildings
    Dataset {
        /// Use this directory instead of the cache locations
        #[arg(long)]
        path: Option<PathBuf>,
        /// Load at most this many buildings
        #[arg(long)]
        limit: Option<usize>,
        /// Print the buildings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the directory the dataset is (or would be) stored in
    Locate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Floor { svg, json } => {
            let floor = CubiCasaLoader::new()
                .load_floor(&svg)
                .with_context(|| format!("loading {}", svg.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&floor)?);
            } else {
                print_floor(&floor);
            }
        }
        Command::Building { dir, json } => {
            let building = CubiCasaLoader::new()
                .load_building(&dir)
                .with_context(|| format!("loading building {}", dir.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&building)?);
            } else {
                print_building(&building);
            }
        }
        Command::Dataset { path, limit, json } => {
            let manager = DataManager::from_env()?;
            let progress: ProgressCallback = Box::new(|phase, percent| {
                info!("{phase}: {percent:.0}%");
            });
            let buildings = load_layouts(&manager, path.as_deref(), limit, Some(progress))
                .context("loading dataset")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&buildings)?);
            } else {
                for building in &buildings {
                    print_building(building);
                }
                println!("{} buildings", buildings.len());
            }
        }
        Command::Locate => {
            let manager = DataManager::from_env()?;
            println!("{}", manager.locate().display());
        }
    }

    Ok(())
}

fn print_floor(floor: &Floor) {
    print!(
        "F{} {}x{} px",
        floor.floor_index, floor.width_pixels, floor.height_pixels
    );
    if let Some(ppm) = floor.pixels_per_meter {
        print!(", {ppm} px/m");
    }
    println!(" ({})", floor.source_path.display());

    for kind in EntityKind::all() {
        let count = floor.entities_of_kind(*kind).count();
        if count > 0 {
            println!("  {:<8} {count}", kind.display_name());
        }
    }
}

fn print_building(building: &Building) {
    println!(
        "{}: {} floors, {} entities",
        building.building_id,
        building.floor_count(),
        building.entity_count()
    );
    for floor in &building.floors {
        print!("  ");
        print_floor(floor);
    }
}
