//! Ship probe
//!
//! Builds a ship from PNG layers and prints its mesh statistics.
//!
//! Usage: ship_probe <structural.png> [--ropes <png>] [--electrical <png>]
//!        [--params <json>] [--materials <json>]
//!
//! Set `RUST_LOG=debug` to see per-stage builder logs.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use wreckyard_engine::builder::{RasterLayer, ShipBuilder, ShipDefinition};
use wreckyard_engine::material::{palette, MaterialDatabase};
use wreckyard_engine::ship::FrontierKind;
use wreckyard_engine::SimulationParameters;

struct ProbeArgs {
    structural: PathBuf,
    ropes: Option<PathBuf>,
    electrical: Option<PathBuf>,
    params: Option<PathBuf>,
    materials: Option<PathBuf>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <structural.png> [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --ropes <file>         Rope layer (PNG, same size as the structural layer)");
    eprintln!("  --electrical <file>    Electrical layer (PNG, same size as the structural layer)");
    eprintln!("  --params <file>        Simulation parameters (JSON, omitted fields keep defaults)");
    eprintln!("  --materials <file>     Material database (JSON, default palette otherwise)");
}

fn parse_args(args: &[String]) -> Option<ProbeArgs> {
    let structural = PathBuf::from(args.get(1)?);
    let mut probe = ProbeArgs {
        structural,
        ropes: None,
        electrical: None,
        params: None,
        materials: None,
    };

    let mut i = 2;
    while i < args.len() {
        let value = args.get(i + 1).map(PathBuf::from);
        let slot = match args[i].as_str() {
            "--ropes" => &mut probe.ropes,
            "--electrical" => &mut probe.electrical,
            "--params" => &mut probe.params,
            "--materials" => &mut probe.materials,
            other => {
                eprintln!("Error: unknown option '{}'", other);
                return None;
            }
        };
        if value.is_none() {
            eprintln!("Error: {} requires a file path", args[i]);
            return None;
        }
        *slot = value;
        i += 2;
    }
    Some(probe)
}

fn ship_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ship".to_string())
}

fn run(probe: ProbeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = match &probe.params {
        Some(path) => SimulationParameters::load(path)?,
        None => SimulationParameters::default(),
    };
    let materials = match &probe.materials {
        Some(path) => MaterialDatabase::load(path)?,
        None => palette::default_database(),
    };

    let mut definition = ShipDefinition::new(ship_name(&probe.structural), RasterLayer::load_png(&probe.structural)?);
    if let Some(path) = &probe.ropes {
        definition = definition.with_ropes(RasterLayer::load_png(path)?);
    }
    if let Some(path) = &probe.electrical {
        definition = definition.with_electrical(RasterLayer::load_png(path)?);
    }

    let builder = ShipBuilder::new(Arc::new(materials), params);
    let (ship, report) = builder.build(&definition)?;

    println!("===========================================");
    println!("   {}", definition.name);
    println!("===========================================");
    println!("Points:               {}", report.point_count);
    println!("Springs:              {}", report.spring_count);
    println!("Triangles:            {}", report.triangle_count);
    println!("Filtered triangles:   {}", report.filtered_triangle_count);
    println!("Electrical elements:  {}", report.electrical_element_count);
    println!("Connected components: {}", ship.connected_component_count());

    let mass = ship.mass_aggregate();
    println!(
        "Total mass:           {:.1} kg (center {:.2}, {:.2})",
        mass.total_mass, mass.center_of_mass.x, mass.center_of_mass.y
    );

    println!();
    println!(
        "Frontiers:            {} external, {} internal",
        ship.frontiers().count_of(FrontierKind::External),
        ship.frontiers().count_of(FrontierKind::Internal)
    );
    for (i, frontier) in ship.frontiers().iter().enumerate() {
        println!("  #{:<3} {:?}: {} edges", i, frontier.kind, frontier.len());
    }

    if let Some(ordering) = &report.ordering {
        println!();
        println!("Orderings (ACMR / vertex miss ratio):");
        for (strategy, metrics) in &ordering.candidates {
            let marker = if *strategy == ordering.chosen { "*" } else { " " };
            println!(
                "  {} {:<12} {:.3} / {:.3}",
                marker,
                format!("{:?}", strategy),
                metrics.acmr,
                metrics.vertex_miss_ratio
            );
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ship_probe");
    let Some(probe) = parse_args(&args) else {
        print_usage(program);
        std::process::exit(1);
    };

    if let Err(e) = run(probe) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
