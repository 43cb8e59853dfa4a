//! Command-line shell for the fire dashboard core.
//!
//! Loads the source tables and the risk model once per invocation, runs a
//! single query and prints the result as JSON on stdout.

mod load;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use firewatch_core::aggregate::{
    available_biomes, available_years, biome_counts, biome_totals, compare_years, default_comparison,
    default_year, map_markers, monthly_intensity, seasonal_pattern, spatial_filter, yearly_totals,
    BiomeFilter, BiomeTotal, MapMarker, MapSelection,
};
use firewatch_core::biome::{legend, LegendEntry};
use firewatch_core::config::InputBounds;
use firewatch_core::encoding::CategorySelection;
use firewatch_core::features::{build_feature_vector, FireInputs};
use firewatch_core::model::{assess_risk, schema_for};
use firewatch_core::Biome;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "firewatch", about = "Fire occurrence trends, maps and risk estimates for Brazilian biomes")]
struct Cli {
    /// Dashboard configuration JSON (defaults to the deployed model settings).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TrendArgs {
    /// Monthly per-biome fire count table.
    #[arg(short, long, default_value = "dados_para_dashboard.csv")]
    data: PathBuf,

    /// Biome name, or "Todos" for every biome.
    #[arg(short, long, default_value = "Todos")]
    biome: String,
}

#[derive(Args, Debug)]
struct PointArgs {
    /// Point detection table.
    #[arg(short, long, default_value = "dados_para_mapa.csv")]
    points: PathBuf,

    /// Comma-separated biome names. Omit for every biome in the table;
    /// pass an empty string to select none.
    #[arg(short, long)]
    biomes: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fire counts per year.
    Trends(TrendArgs),
    /// Total fire counts per biome, largest first.
    Ranking {
        #[arg(short, long, default_value = "dados_para_dashboard.csv")]
        data: PathBuf,
    },
    /// Year × month intensity grid.
    Heatmap(TrendArgs),
    /// Annual cycle per biome.
    Seasonal(TrendArgs),
    /// Detections of one year, filtered by biome.
    Map {
        #[command(flatten)]
        points: PointArgs,
        /// Year to show (defaults to the most recent).
        #[arg(short, long)]
        year: Option<i32>,
        /// Include one marker per detection in the output.
        #[arg(long)]
        markers: bool,
    },
    /// Two years side by side with a shared biome filter.
    Compare {
        #[command(flatten)]
        points: PointArgs,
        #[arg(long)]
        year_a: Option<i32>,
        #[arg(long)]
        year_b: Option<i32>,
    },
    /// Selectable categories and input bounds of the prediction form.
    Options {
        #[arg(short, long, default_value = "modelo_risco_fogo.json")]
        model: PathBuf,
    },
    /// Estimate fire risk for one set of conditions.
    Predict {
        #[arg(short, long, default_value = "modelo_risco_fogo.json")]
        model: PathBuf,
        #[arg(long, default_value_t = 15)]
        days_without_rain: u32,
        #[arg(long, default_value_t = 0.0)]
        precipitation: f64,
        #[arg(long, default_value_t = 8)]
        month: u32,
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, default_value_t = -55.0, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long, default_value = "Amazônia")]
        biome: String,
        #[arg(long, default_value = "AQUA_M")]
        satellite: String,
        /// Also print the feature row sent to the model.
        #[arg(long)]
        show_features: bool,
    },
}

// ── Output types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MapReport {
    year: i32,
    total: usize,
    warning: Option<&'static str>,
    legend: Vec<LegendEntry>,
    by_biome: Vec<BiomeTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markers: Option<Vec<MapMarker>>,
}

impl MapReport {
    fn new(selection: &MapSelection<'_>, present: &[Biome], with_markers: bool) -> Self {
        Self {
            year: selection.year,
            total: selection.len(),
            warning: selection.warning.map(|w| w.message()),
            legend: legend(present),
            by_biome: biome_counts(selection),
            markers: with_markers.then(|| map_markers(selection)),
        }
    }
}

#[derive(Serialize)]
struct FormOptions<'a> {
    biomes: &'a [String],
    satellites: &'a [String],
    bounds: &'a InputBounds,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `None` → every biome present; `Some("")` → no biome.
fn biome_set(arg: Option<&str>, present: &[Biome]) -> Result<BTreeSet<Biome>> {
    match arg {
        None => Ok(present.iter().copied().collect()),
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| -> Result<Biome> { Ok(s.parse()?) })
            .collect(),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Trends(args) => {
            let records = load::load_fire_counts(&args.data)?;
            let filter: BiomeFilter = args.biome.parse()?;
            print_json(&yearly_totals(&records, filter))
        }
        Command::Ranking { data } => {
            let records = load::load_fire_counts(&data)?;
            print_json(&biome_totals(&records))
        }
        Command::Heatmap(args) => {
            let records = load::load_fire_counts(&args.data)?;
            let filter: BiomeFilter = args.biome.parse()?;
            print_json(&monthly_intensity(&records, filter))
        }
        Command::Seasonal(args) => {
            let records = load::load_fire_counts(&args.data)?;
            let filter: BiomeFilter = args.biome.parse()?;
            print_json(&seasonal_pattern(&records, filter))
        }
        Command::Map { points, year, markers } => {
            let table = load::load_fire_points(&points.points)?;
            let present = available_biomes(&table);
            let years = available_years(&table);
            let Some(year) = year.or_else(|| default_year(&years)) else {
                bail!("point table has no years");
            };
            let set = biome_set(points.biomes.as_deref(), &present)?;
            let selection = spatial_filter(&table, year, &set);
            print_json(&MapReport::new(&selection, &present, markers))
        }
        Command::Compare { points, year_a, year_b } => {
            let table = load::load_fire_points(&points.points)?;
            let present = available_biomes(&table);
            let Some((def_a, def_b)) = default_comparison(&available_years(&table)) else {
                bail!("point table has no years");
            };
            let set = biome_set(points.biomes.as_deref(), &present)?;
            let cmp = compare_years(&table, year_a.unwrap_or(def_a), year_b.unwrap_or(def_b), &set);
            print_json(&[
                MapReport::new(&cmp.left, &present, false),
                MapReport::new(&cmp.right, &present, false),
            ])
        }
        Command::Options { model } => {
            let model = load::load_model(&model, &config)?;
            let schema = schema_for(&model, &config.encoding)?;
            print_json(&FormOptions {
                biomes: schema.encoder().biome.options(),
                satellites: schema.encoder().satellite.options(),
                bounds: &config.bounds,
            })
        }
        Command::Predict {
            model,
            days_without_rain,
            precipitation,
            month,
            latitude,
            longitude,
            biome,
            satellite,
            show_features,
        } => {
            let model = load::load_model(&model, &config)?;
            let schema = schema_for(&model, &config.encoding)?;
            let inputs = FireInputs {
                days_without_rain,
                precipitation_mm: precipitation,
                month,
                latitude,
                longitude,
                selection: CategorySelection::new(biome, satellite),
            };
            if show_features {
                let row = build_feature_vector(&inputs, &schema, &config.bounds)?;
                eprintln!("{}", serde_json::to_string_pretty(&row)?);
            }
            let assessment = assess_risk(&model, &schema, &config.bounds, &inputs)?;
            log::info!("risk {} ({})", assessment.label, assessment.tier);
            print_json(&assessment)
        }
    }
}
