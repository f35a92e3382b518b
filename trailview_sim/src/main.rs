//! Trailview scenario harness CLI
//!
//! Converts synthetic trajectories with the ribbon converters and reports
//! mesh statistics; optionally exports the produced scene updates as JSON.

use clap::Parser;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;
use trailview_core::converter::{MessageConverter, TrajectoryRibbonConverter};
use trailview_core::scene::TriangleListPrimitive;
use trailview_sim::{ScenarioExport, ScenarioId, ScenarioRun};

#[derive(Parser, Debug)]
#[command(name = "trailview-sim")]
#[command(about = "Run ribbon conversion over synthetic trajectory scenarios", long_about = None)]
struct Args {
    /// Master seed for determinism
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Scenario to run (straight_run, lane_change, stop_and_go, serpentine, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Number of trajectory points per scenario
    #[arg(short, long, default_value = "50")]
    points: usize,

    /// Ribbon style (straight, smooth, both)
    #[arg(long, default_value = "both")]
    style: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Export produced scene updates to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn styles_for(style: &str) -> Vec<(&'static str, TrajectoryRibbonConverter)> {
    match style {
        "straight" => vec![("straight", TrajectoryRibbonConverter::straight())],
        "smooth" => vec![("smooth", TrajectoryRibbonConverter::smooth())],
        "both" => vec![
            ("straight", TrajectoryRibbonConverter::straight()),
            ("smooth", TrajectoryRibbonConverter::smooth()),
        ],
        other => {
            eprintln!(
                "Error: unknown style {:?} (expected straight, smooth or both)",
                other
            );
            std::process::exit(1);
        }
    }
}

/// Index/color correspondence the renderer relies on.
fn mesh_is_consistent(triangles: &TriangleListPrimitive) -> bool {
    triangles.points.len() == triangles.colors.len()
        && triangles.indices.len() % 3 == 0
        && triangles
            .indices
            .iter()
            .all(|&i| (i as usize) < triangles.points.len())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args.scenario.parse().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            eprintln!(
                "Available scenarios: straight_run, lane_change, stop_and_go, serpentine, all"
            );
            std::process::exit(1);
        })]
    };

    let converters = styles_for(&args.style);
    let mut export = ScenarioExport::new(args.seed);
    let mut failed_count = 0;

    info!("Trailview scenario harness (seed={})", args.seed);

    for scenario in &scenarios {
        debug!("{}: {}", scenario.name(), scenario.description());
        let msg = scenario.generate(args.seed, args.points);

        for (style_name, converter) in &converters {
            let update = converter.convert(&msg);
            let triangles = &update.entities[0].triangles[0];

            if mesh_is_consistent(triangles) {
                info!(
                    "✓ {} [{}]: {} points -> {} vertices, {} triangles",
                    scenario.name(),
                    style_name,
                    msg.points.len(),
                    triangles.points.len(),
                    triangles.indices.len() / 3,
                );
            } else {
                failed_count += 1;
                error!(
                    "✗ {} [{}]: inconsistent mesh ({} vertices, {} colors, {} indices)",
                    scenario.name(),
                    style_name,
                    triangles.points.len(),
                    triangles.colors.len(),
                    triangles.indices.len(),
                );
            }

            export.add_run(ScenarioRun {
                scenario: scenario.name().to_string(),
                style: style_name.to_string(),
                point_count: msg.points.len(),
                vertex_count: triangles.points.len(),
                triangle_count: triangles.indices.len() / 3,
                scene: update,
            });
        }
    }

    if let Some(path) = &args.export {
        match export.write_to_file(path) {
            Ok(()) => info!("Exported {} runs to {}", export.runs.len(), path),
            Err(e) => {
                error!("Export to {} failed: {}", path, e);
                failed_count += 1;
            }
        }
    }

    // Exit with proper code for CI
    if failed_count > 0 {
        std::process::exit(1);
    }
}
