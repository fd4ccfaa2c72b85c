use anyhow::Context;
use clap::Parser;
use gridpath::{
    config::{self, Scenario},
    search::path_cost,
    Algorithm, Heuristic, Point, SearchOptions,
};
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Search a grid from a start cell to a goal cell and draw the result.
///
/// Without `--config`, the scenario at the default config path is used if it
/// exists, and the built-in 30x15 demo diagram otherwise.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Scenario file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    #[arg(long, value_enum)]
    heuristic: Option<Heuristic>,

    /// Start cell, as `x,y`
    #[arg(short, long)]
    start: Option<Point>,

    /// Goal cell, as `x,y`
    #[arg(short, long)]
    goal: Option<Point>,

    /// Show each visited cell's predecessor direction
    #[arg(long)]
    arrows: bool,

    /// Show the cost so far of each visited cell
    #[arg(long)]
    costs: bool,

    /// Give up after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Write the effective scenario to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Render the result as a gif
    #[cfg(feature = "map-render")]
    #[arg(long)]
    gif: Option<PathBuf>,

    /// Paint the result over the scenario's source image, as a png
    #[cfg(feature = "image-grid")]
    #[arg(long)]
    overlay: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn load_scenario(cli: &Cli) -> anyhow::Result<Scenario> {
    if let Some(path) = &cli.config {
        return Scenario::load(path).with_context(|| format!("loading {}", path.display()));
    }
    match config::default_path().filter(|path| path.exists()) {
        Some(path) => {
            Scenario::load(&path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Scenario::diagram1()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(if cli.verbose {
                    LevelFilter::DEBUG.into()
                } else {
                    LevelFilter::WARN.into()
                })
                .from_env_lossy(),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut scenario = load_scenario(&cli)?;
    if let Some(algorithm) = cli.algorithm {
        scenario.algorithm = algorithm;
    }
    if let Some(heuristic) = cli.heuristic {
        scenario.heuristic = heuristic;
    }
    if let Some(start) = cli.start {
        scenario.start = start;
    }
    if let Some(goal) = cli.goal {
        scenario.goal = goal;
    }
    if let Some(path) = &cli.save {
        scenario
            .save(path)
            .with_context(|| format!("saving {}", path.display()))?;
    }

    let options = match cli.timeout_ms {
        Some(ms) => SearchOptions::with_timeout(Duration::from_millis(ms)),
        None => SearchOptions::default(),
    };
    let outcome = scenario.run(&options).context("running scenario")?;

    let mut scene = outcome.scene().arrows(cli.arrows);
    if cli.costs {
        if let Some(costs) = &outcome.exploration.cost_so_far {
            scene = scene.costs(costs);
        }
    }
    print!("{scene}");

    match &outcome.path {
        Some(path) => {
            let cost = path_cost(&outcome.grid, path)?;
            println!(
                "{}: {} steps, cost {cost}, {} expanded",
                outcome.algorithm,
                path.len() - 1,
                outcome.exploration.expanded
            );
        }
        None => println!(
            "{}: no path from {} to {}, {} expanded",
            outcome.algorithm, outcome.start, outcome.goal, outcome.exploration.expanded
        ),
    }

    #[cfg(feature = "map-render")]
    if let Some(path) = &cli.gif {
        scene
            .render_gif(path, gridpath::geometry::map::Style::Grid)
            .with_context(|| format!("rendering {}", path.display()))?;
    }

    #[cfg(feature = "image-grid")]
    if let Some(path) = &cli.overlay {
        let Some(source) = &scenario.image else {
            anyhow::bail!("--overlay needs a scenario with an [image] table");
        };
        let image = image::open(scenario.resolve(&source.path))
            .with_context(|| format!("opening {}", source.path.display()))?;
        gridpath::draw::overlay::save_overlay(&image, &scene, source.segmentation.cell_size, path)
            .with_context(|| format!("rendering {}", path.display()))?;
    }

    Ok(())
}
