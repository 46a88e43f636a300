use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use tack::{
    timed, Color3, GridBounds, Heading, HexCoord, HexCoordSet, Pathfinder,
    PlannerConfig,
};

/// Color applied to every overlay in the `overlays` output format
const OVERLAY_TINT: Color3 = Color3::from_hex(0xf5a623);

/// CLI for finding paths across a hex grid for agents that can't turn on the
/// spot.
#[derive(Debug, StructOpt)]
#[structopt(name = "tack")]
struct Opt {
    /// Path to a config file that defines the scenario to solve. Supported
    /// formats: JSON, TOML. Any other flags given override values from the
    /// file.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// The tile the agent starts on, as `x,y,z`. Defaults to the center of
    /// the grid.
    #[structopt(long, allow_hyphen_values = true)]
    origin: Option<HexCoord>,

    /// The direction the agent faces before its first move, e.g. `north` or
    /// `south_east`
    #[structopt(long)]
    heading: Option<Heading>,

    /// The tile to find a path to, as `x,y,z`
    #[structopt(short, long, allow_hyphen_values = true)]
    target: Option<HexCoord>,

    /// A tile the agent can't enter, as `x,y,z`. Can be given multiple
    /// times. These are added to any blocked tiles from the config file.
    #[structopt(short, long, allow_hyphen_values = true, number_of_values = 1)]
    blocked: Vec<HexCoord>,

    /// Override the grid radius from the config file
    #[structopt(long)]
    radius: Option<u16>,

    /// The format to print the result in. Supported formats:
    ///
    /// text - The headings of each step, in order
    ///
    /// json - The full path, as a list of steps
    ///
    /// overlays - The tile markers for the path, as a JSON list
    ///
    /// cfg - The fully resolved scenario, in TOML format. Doesn't run a
    ///   search at all
    #[structopt(short, long, default_value = "text")]
    format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for `--format`!
    /// Human-readable list of headings
    Text,
    /// Serialized path
    Json,
    /// Serialized overlays, ready for a renderer
    Overlays,
    /// The scenario itself, after merging config and flags
    Cfg,
}

/// Everything needed to run a single search. This can be loaded from a config
/// file, then overridden piece by piece with flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    heading: Option<Heading>,
    origin: Option<HexCoord>,
    target: Option<HexCoord>,
    blocked: Vec<HexCoord>,
    planner: PlannerConfig,
}

impl Scenario {
    /// Apply overrides from the command line
    fn merge_opt(&mut self, opt: &Opt) {
        if let Some(origin) = opt.origin {
            self.origin = Some(origin);
        }
        if let Some(heading) = opt.heading {
            self.heading = Some(heading);
        }
        if let Some(target) = opt.target {
            self.target = Some(target);
        }
        self.blocked.extend(opt.blocked.iter().copied());
        if let Some(radius) = opt.radius {
            self.planner.grid.radius = radius;
        }
    }
}

/// Render a scenario as TOML. TOML wants plain values before tables, which
/// the field order can't guarantee (`blocked` may be an empty array after the
/// coordinate tables), so go through [toml::Value] to let it sort them.
fn scenario_to_toml(scenario: &Scenario) -> anyhow::Result<String> {
    let value = toml::Value::try_from(scenario)
        .context("error serializing scenario")?;
    toml::to_string_pretty(&value).context("error serializing scenario")
}

fn load_config(config_path: &Path) -> anyhow::Result<Scenario> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Run the search for a scenario. Returns `None` if there's no path.
fn solve(scenario: &Scenario) -> anyhow::Result<Option<tack::Path>> {
    let grid = GridBounds::from_config(&scenario.planner.grid)?;
    let origin = scenario.origin.unwrap_or(HexCoord::ORIGIN);
    let heading = scenario
        .heading
        .ok_or_else(|| anyhow!("no heading given; pass --heading"))?;
    let target = scenario
        .target
        .ok_or_else(|| anyhow!("no target given; pass --target"))?;
    if !grid.contains(origin) {
        bail!("origin {} is outside the grid", origin);
    }
    let blocked: HexCoordSet = scenario.blocked.iter().copied().collect();
    if blocked.contains(&origin) {
        warn!("Origin {} is blocked, but the agent is already there", origin);
    }

    info!(
        "Searching from {} facing {} to {} ({} tiles, {} blocked)",
        origin,
        heading,
        target,
        grid.len(),
        blocked.len()
    );
    let pathfinder = timed!(
        "Path search",
        log::Level::Info,
        Pathfinder::with_config(
            &scenario.planner.search,
            origin,
            heading,
            &grid,
            &blocked,
        )
    )?;
    let path = pathfinder.to_coord(target);
    match &path {
        Some(path) => info!("Found path of length {}", path.len()),
        None => info!("No path from {} to {}", origin, target),
    }
    Ok(path)
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let mut scenario = match &opt.config {
        Some(config_path) => {
            let scenario = load_config(config_path)?;
            info!("Loaded scenario from {:?}", config_path);
            scenario
        }
        None => Scenario::default(),
    };
    scenario.merge_opt(&opt);

    let output = match opt.format {
        OutputFormat::Text => match solve(&scenario)? {
            Some(path) if path.is_empty() => "already there".to_owned(),
            Some(path) => path.to_string(),
            None => "no path".to_owned(),
        },
        OutputFormat::Json => solve(&scenario)?
            .map_or_else(|| "null".to_owned(), |path| path.to_json()),
        OutputFormat::Overlays => solve(&scenario)?
            .map_or_else(
                || "null".to_owned(),
                |path| path.to_overlays(OVERLAY_TINT).to_json(),
            ),
        OutputFormat::Cfg => scenario_to_toml(&scenario)?,
    };
    println!("{}", output);
    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_to_toml() {
        let scenario = Scenario {
            heading: Some(Heading::South),
            origin: Some(HexCoord::new_xy(1, -1)),
            target: Some(HexCoord::new_xy(0, 2)),
            blocked: vec![],
            planner: PlannerConfig::default(),
        };
        let output = scenario_to_toml(&scenario).unwrap();
        let parsed: Scenario = toml::from_str(&output).unwrap();
        assert_eq!(parsed, scenario);

        let scenario = Scenario {
            blocked: vec![HexCoord::ORIGIN, HexCoord::new_xy(-1, 1)],
            ..scenario
        };
        let output = scenario_to_toml(&scenario).unwrap();
        let parsed: Scenario = toml::from_str(&output).unwrap();
        assert_eq!(parsed, scenario);
    }

    #[test]
    fn test_empty_scenario_to_toml() {
        let output = scenario_to_toml(&Scenario::default()).unwrap();
        let parsed: Scenario = toml::from_str(&output).unwrap();
        assert_eq!(parsed, Scenario::default());
    }
}
