use anyhow::{bail, Context};
use app11core::prelude::{AssemblyOptions, GrammarVersion, ImageField, DEFAULT_TRACK_INTERVAL};
use app11core::records::ReportKind;
use cache::NumberCache;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use ingest::DetectionSchema;
use log::{debug, info, LevelFilter};
use std::path::PathBuf;
use workflow::config::MissionConfig;
use workflow::layout::{MissionLayout, PARAMETERS_FILE};
use workflow::runner::Runner;

mod cache;
mod ingest;
mod workflow;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GrammarArg {
    #[value(name = "2023")]
    Repmus2023,
    #[value(name = "2024")]
    Repmus2024,
}

impl From<GrammarArg> for GrammarVersion {
    fn from(arg: GrammarArg) -> Self {
        match arg {
            GrammarArg::Repmus2023 => GrammarVersion::Repmus2023,
            GrammarArg::Repmus2024 => GrammarVersion::Repmus2024,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Generates the APP-11 reports for an area and task")]
struct Args {
    /// Tasking element the reports are for, e.g. TE4
    element: String,
    /// Area, e.g. MWD
    area: String,
    /// Task order number, e.g. EH01
    task: String,
    /// Top level directory holding the data and reports folders
    directory: PathBuf,
    /// Print debug information
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Only print errors
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,
    /// Only generate the report of this kind
    #[arg(long, value_parser = parse_kind)]
    only: Option<ReportKind>,
    /// Number the reports consecutively from this value instead of using the cache
    #[arg(long)]
    start_number: Option<u32>,
    /// Exercise grammar revision
    #[arg(long, value_enum, default_value_t = GrammarArg::Repmus2024)]
    grammar: GrammarArg,
    /// Column layout of Mines.csv
    #[arg(long, value_enum, default_value_t = DetectionSchema::Current)]
    schema: DetectionSchema,
    /// Add the full coverage summary to the Complete report
    #[arg(long, default_value_t = false)]
    full_summary: bool,
    /// Add the vehicle track history to the Complete report
    #[arg(long, default_value_t = false)]
    track_history: bool,
    /// Add the narrative times to the Complete report
    #[arg(long, default_value_t = false)]
    narrative: bool,
    /// Write `-` where a detection has no image instead of dropping the field
    #[arg(long, default_value_t = false)]
    image_placeholder: bool,
}

impl Args {
    fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            grammar: self.grammar.into(),
            image_field: if self.image_placeholder {
                ImageField::Placeholder
            } else {
                ImageField::Omit
            },
            include_full_summary: self.full_summary,
            include_track_history: self.track_history,
            include_narrative: self.narrative,
            track_interval: DEFAULT_TRACK_INTERVAL,
        }
    }
}

fn parse_kind(value: &str) -> Result<ReportKind, String> {
    value.parse().map_err(|err: app11core::ReportError| err.to_string())
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(LevelFilter::Error);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);
    info!("Generating APP-11 reports...");

    let layout = MissionLayout::new(&args.directory, &args.element, &args.area, &args.task);
    if !layout.root().is_dir() {
        bail!("directory '{}' does not exist", layout.root().display());
    }
    if !layout.parameters().is_file() {
        bail!(
            "directory '{}' does not contain a file '{}'",
            layout.data_dir().display(),
            PARAMETERS_FILE
        );
    }

    let config = MissionConfig::load(layout.parameters())?;
    let present = config.report_kinds(None)?;
    let kinds = config.report_kinds(args.only)?;

    let cache_path = layout.number_cache();
    let mut cache = NumberCache::load(&cache_path)?;
    let allocation = cache
        .allocate(&args.area, &args.task, &present, args.start_number)
        .context("choosing serial numbers")?;

    let runner = Runner::new(config, layout, args.assembly_options(), args.schema);
    let result = runner.execute(&allocation.select(&kinds), &Utc::now())?;

    for report in &result.reports {
        debug!("{} report {} -> {}", report.kind, report.serial, report.path.display());
    }
    debug!("serial numbers used: {:?}", result.serial_numbers());
    if let Some(numbers) = allocation.record {
        cache.record(&args.area, &args.task, numbers);
        cache.save(&cache_path)?;
    }

    info!(
        "APP-11 reports generated successfully: {} reports, {} lines, {} detections, {} track points",
        result.reports.len(),
        result.tally.total_lines(),
        result.tally.detections,
        result.tally.track_points
    );
    Ok(())
}
