//! # Saorsa Floor Plan CLI
//!
//! Headless host for the floor plan viewer: loads a layout JSON file, drives
//! the viewer through the same control surface an interactive host uses,
//! and writes a PNG or JPEG snapshot.
//!
//! ## Usage
//!
//! ```bash
//! floorplan-render plan.json -o plan.png
//! floorplan-render building.json --level "First Floor" --zoom 2 -o first.jpg
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap, with `FLOORPLAN_*`
//!   environment fallbacks
//! - `RenderJob` - Resolved configuration for one render
//! - `run` - Loads the floor, renders it and writes the snapshot

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use plan_core::transform::{MAX_SCALE, MIN_SCALE};
use plan_core::viewport::BUTTON_ZOOM_STEP;
use plan_core::{DisplayOptions, FloorLayout, PlanDocument};
use plan_renderer::export::DEFAULT_JPEG_QUALITY;
use plan_renderer::{fonts, ExportConfig, ExportFormat, FloorPlanViewer, FrameReport};
use serde::Serialize;

/// Snapshot encoding selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => Self::Png,
            OutputFormat::Jpeg => Self::Jpeg,
        }
    }
}

/// Command-line arguments for floorplan-render.
#[derive(Debug, Clone, Parser)]
#[command(name = "floorplan-render")]
#[command(about = "Render a floor plan layout to a raster snapshot")]
#[command(version)]
pub struct CliArgs {
    /// Layout JSON: a single floor or a `{ "floors": [...] }` document
    pub input: PathBuf,

    /// Output image path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Floor to render by level name (default: first floor)
    #[arg(long, env = "FLOORPLAN_LEVEL")]
    pub level: Option<String>,

    /// Surface width in CSS pixels
    #[arg(long, env = "FLOORPLAN_WIDTH", default_value = "800")]
    pub width: f64,

    /// Surface height in CSS pixels
    #[arg(long, env = "FLOORPLAN_HEIGHT", default_value = "600")]
    pub height: f64,

    /// Physical pixels per CSS pixel
    #[arg(long, env = "FLOORPLAN_DPR", default_value = "1")]
    pub device_pixel_ratio: f64,

    /// Initial pixels per foot (clamped to 2..=50)
    #[arg(long, env = "FLOORPLAN_SCALE", default_value = "10")]
    pub scale: f64,

    /// Button zoom steps to apply; negative zooms out
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub zoom: i32,

    /// Horizontal pan in CSS pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub pan_x: f64,

    /// Vertical pan in CSS pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub pan_y: f64,

    /// Hide the 5 ft grid
    #[arg(long)]
    pub no_grid: bool,

    /// Hide overall dimension runs
    #[arg(long)]
    pub no_dimensions: bool,

    /// Hide room names and areas
    #[arg(long)]
    pub no_labels: bool,

    /// Output encoding (default: from the output extension, else PNG)
    #[arg(long, value_enum, env = "FLOORPLAN_FORMAT")]
    pub format: Option<OutputFormat>,

    /// JPEG quality, 0.0 to 1.0
    #[arg(long, env = "FLOORPLAN_QUALITY", default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: f32,

    /// Extra font file used for labels
    #[arg(long, env = "FLOORPLAN_FONT")]
    pub font: Option<PathBuf>,

    /// Print the frame report as JSON on stdout
    #[arg(long)]
    pub report: bool,
}

/// Resolved configuration for one render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Layout JSON path.
    pub input: PathBuf,
    /// Snapshot path.
    pub output: PathBuf,
    /// Floor level to select.
    pub level: Option<String>,
    /// Surface width in CSS pixels.
    pub width: f64,
    /// Surface height in CSS pixels.
    pub height: f64,
    /// Device pixel ratio.
    pub device_pixel_ratio: f64,
    /// Display flags and initial scale.
    pub options: DisplayOptions,
    /// Button zoom steps.
    pub zoom_steps: i32,
    /// Pan delta in CSS pixels.
    pub pan: (f64, f64),
    /// Snapshot encoding.
    pub format: ExportFormat,
    /// Encoder settings.
    pub export: ExportConfig,
    /// Extra font file.
    pub font: Option<PathBuf>,
}

impl From<CliArgs> for RenderJob {
    fn from(args: CliArgs) -> Self {
        let format = args
            .format
            .map_or_else(|| format_for_path(&args.output), ExportFormat::from);
        Self {
            options: DisplayOptions {
                show_grid: !args.no_grid,
                show_dimensions: !args.no_dimensions,
                show_room_labels: !args.no_labels,
                scale: args.scale,
            },
            input: args.input,
            output: args.output,
            level: args.level,
            width: args.width,
            height: args.height,
            device_pixel_ratio: args.device_pixel_ratio,
            zoom_steps: args.zoom,
            pan: (args.pan_x, args.pan_y),
            format,
            export: ExportConfig::default().with_quality(args.quality),
            font: args.font,
        }
    }
}

/// Pick an encoding from a file extension. Unknown extensions use PNG.
#[must_use]
pub fn format_for_path(path: &Path) -> ExportFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => ExportFormat::Jpeg,
        _ => ExportFormat::Png,
    }
}

/// Button zooms needed to cross the whole scale range; further steps are
/// no-ops.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_zoom_steps() -> u32 {
    ((MAX_SCALE / MIN_SCALE).ln() / BUTTON_ZOOM_STEP.ln()).ceil() as u32
}

/// Number of button zooms to apply for a `--zoom` value.
#[must_use]
pub fn zoom_step_count(steps: i32) -> u32 {
    steps.unsigned_abs().min(max_zoom_steps())
}

/// Outcome of a render, printed with `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    /// Level that was rendered.
    pub level: String,
    /// Snapshot path.
    pub output: PathBuf,
    /// Encoded size in bytes.
    pub bytes: usize,
    /// Final pixels per foot.
    pub scale: f64,
    /// What the last frame drew.
    pub frame: FrameReport,
}

/// Load one floor from a layout file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the requested
/// level does not exist, or the floor fails validation.
pub fn load_floor(path: &Path, level: Option<&str>) -> anyhow::Result<FloorLayout> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file {}", path.display()))?;
    let doc = PlanDocument::from_json(&json)
        .with_context(|| format!("Failed to parse layout file {}", path.display()))?;

    let floor = match level {
        Some(level) => doc.floor(level)?.clone(),
        None => doc
            .first_floor()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} contains no floors", path.display()))?,
    };
    floor
        .validate()
        .with_context(|| format!("Floor '{}' is not renderable", floor.level))?;
    Ok(floor)
}

/// Render a job and write the snapshot.
///
/// # Errors
///
/// Returns an error if loading, rendering, encoding or writing fails.
pub fn run(job: &RenderJob) -> anyhow::Result<RenderSummary> {
    let floor = load_floor(&job.input, job.level.as_deref())?;
    tracing::info!(
        rooms = floor.rooms.len(),
        walls = floor.walls.len(),
        "Loaded floor '{}' from {}",
        floor.level,
        job.input.display()
    );

    let fonts = match &job.font {
        Some(path) => fonts::with_font_file(path)?,
        None => fonts::system_fonts(),
    };

    let mut viewer = FloorPlanViewer::with_fonts(job.options, fonts);
    viewer.resize(job.width, job.height, job.device_pixel_ratio)?;
    viewer.set_layout(Some(Arc::new(floor.clone())))?;

    for _ in 0..zoom_step_count(job.zoom_steps) {
        if job.zoom_steps > 0 {
            viewer.zoom_in();
        } else {
            viewer.zoom_out();
        }
    }
    viewer.pan_by(job.pan.0, job.pan.1);

    let bytes = viewer
        .export_bytes(job.format, &job.export)
        .ok_or_else(|| anyhow::anyhow!("No surface mounted"))??;
    std::fs::write(&job.output, &bytes)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;

    tracing::info!(
        "Wrote {} ({} bytes, {})",
        job.output.display(),
        bytes.len(),
        job.format.mime_type()
    );

    Ok(RenderSummary {
        level: floor.level,
        output: job.output.clone(),
        bytes: bytes.len(),
        scale: viewer.viewport().scale(),
        frame: viewer.last_report().cloned().unwrap_or_default(),
    })
}
