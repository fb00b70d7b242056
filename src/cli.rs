//! CLI argument parsing and command dispatch.
//!
//! Each subcommand maps onto one compositor: parse arguments into the
//! compositor's policy struct, load the input, compose, save. Value parsing
//! for paper sizes, orientations, colors, anchors, and page ranges goes
//! through the same `FromStr` implementations the library exposes, so CLI
//! error messages match library ones.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::compose::fit::{self, FitPolicy, TargetSize};
use crate::compose::nup::{self, GridPolicy};
use crate::compose::paginate::{self, ImageData, PaginatePolicy};
use crate::compose::stack::{self, StackPolicy};
use crate::compose::text::{
    Anchor, BandSlots, HeaderFooterPolicy, NumberingPolicy, add_headers_footers, add_page_numbers,
};
use crate::config::{Color, PageRange};
use crate::error::{ComposeError, Result};
use crate::font::BuiltinFont;
use crate::geometry::{Orientation, PaperSize, ScalingMode, Unit};
use crate::io::{PdfReader, PdfWriter};

/// Compose, tile, and stamp PDF pages.
#[derive(Parser, Debug)]
#[command(name = "pdfcompose")]
#[command(version)]
#[command(about = "Page layout and composition for PDFs", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The operation to run.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print a JSON summary of the operation to stdout
    ///
    /// Implies --quiet for progress lines.
    #[arg(long, global = true)]
    pub json: bool,
}

/// The available composition operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tile multiple pages per sheet in a grid
    Nup(NupArgs),

    /// Standardize every page to one canvas size
    Resize(ResizeArgs),

    /// Stack all pages vertically onto one tall page
    Stack(StackArgs),

    /// Stamp page numbers at an anchor position
    Number(NumberArgs),

    /// Stamp header and footer text bands
    HeaderFooter(HeaderFooterArgs),

    /// Slice a tall image across multiple pages
    PaginateImage(PaginateImageArgs),
}

/// Arguments for the `nup` subcommand.
#[derive(Args, Debug)]
pub struct NupArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Pages per sheet: 2, 4, 9, or 16
    #[arg(short, long, value_name = "N", default_value_t = 4)]
    pub pages_per_sheet: usize,

    /// Output sheet size (letter, legal, tabloid, a3, a4, a5)
    #[arg(long, value_name = "SIZE", default_value = "a4")]
    pub paper: PaperSize,

    /// Sheet orientation (auto, portrait, landscape)
    #[arg(long, value_name = "ORIENT", default_value = "auto")]
    pub orientation: Orientation,

    /// Tile edge to edge, without sheet margins or cell gutters
    #[arg(long)]
    pub no_margins: bool,

    /// Stroke a border around each placed page, in the given color
    ///
    /// Accepts named colors (black, gray, ...) or #rrggbb.
    #[arg(long, value_name = "COLOR")]
    pub border: Option<Color>,
}

/// Arguments for the `resize` subcommand.
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Target paper size (letter, legal, tabloid, a3, a4, a5)
    #[arg(long, value_name = "SIZE", default_value = "a4", conflicts_with_all = ["width", "height"])]
    pub paper: PaperSize,

    /// Custom target width (requires --height)
    #[arg(long, value_name = "N", requires = "height")]
    pub width: Option<f64>,

    /// Custom target height (requires --width)
    #[arg(long, value_name = "N", requires = "width")]
    pub height: Option<f64>,

    /// Unit for custom dimensions (pt, in, mm)
    #[arg(long, value_name = "UNIT", default_value = "pt")]
    pub unit: Unit,

    /// Target orientation (auto, portrait, landscape)
    #[arg(long, value_name = "ORIENT", default_value = "auto")]
    pub orientation: Orientation,

    /// Scaling mode: fit (letterbox) or fill (crop)
    #[arg(long, value_name = "MODE", default_value = "fit")]
    pub mode: ScalingMode,

    /// Canvas background color
    #[arg(long, value_name = "COLOR", default_value = "white")]
    pub background: Color,
}

/// Arguments for the `stack` subcommand.
#[derive(Args, Debug)]
pub struct StackArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Vertical gap between stacked pages, in points
    #[arg(short, long, value_name = "PT", default_value_t = 0.0)]
    pub spacing: f64,

    /// Background color behind the stacked pages
    #[arg(long, value_name = "COLOR", default_value = "white")]
    pub background: Color,

    /// Draw a separator rule inside each gap
    #[arg(long)]
    pub separator: bool,
}

/// Arguments for the `number` subcommand.
#[derive(Args, Debug)]
pub struct NumberArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Label position (top|bottom - left|center|right)
    #[arg(short, long, value_name = "ANCHOR", default_value = "bottom-center")]
    pub anchor: Anchor,

    /// Font size in points
    #[arg(long, value_name = "PT", default_value_t = 12.0)]
    pub font_size: f64,

    /// Label color
    #[arg(long, value_name = "COLOR", default_value = "black")]
    pub color: Color,

    /// Pages to stamp, e.g. "2-10" or "1,3,5-8" (default: all)
    #[arg(long, value_name = "RANGE")]
    pub pages: Option<PageRange>,

    /// Label template; {page} and {total} are substituted
    #[arg(long, value_name = "TEXT", default_value = "{page}")]
    pub template: String,
}

/// Arguments for the `header-footer` subcommand.
#[derive(Args, Debug)]
pub struct HeaderFooterArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Header text, left slot ({page}/{total} substituted)
    #[arg(long, value_name = "TEXT")]
    pub header_left: Option<String>,

    /// Header text, center slot
    #[arg(long, value_name = "TEXT")]
    pub header_center: Option<String>,

    /// Header text, right slot
    #[arg(long, value_name = "TEXT")]
    pub header_right: Option<String>,

    /// Footer text, left slot
    #[arg(long, value_name = "TEXT")]
    pub footer_left: Option<String>,

    /// Footer text, center slot
    #[arg(long, value_name = "TEXT")]
    pub footer_center: Option<String>,

    /// Footer text, right slot
    #[arg(long, value_name = "TEXT")]
    pub footer_right: Option<String>,

    /// Font size in points
    #[arg(long, value_name = "PT", default_value_t = 10.0)]
    pub font_size: f64,

    /// Text color
    #[arg(long, value_name = "COLOR", default_value = "black")]
    pub color: Color,

    /// Pages to stamp, e.g. "2-10" (default: all)
    #[arg(long, value_name = "RANGE")]
    pub pages: Option<PageRange>,
}

/// Arguments for the `paginate-image` subcommand.
#[derive(Args, Debug)]
pub struct PaginateImageArgs {
    /// Input image file (PNG or JPEG)
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Output paper size (letter, legal, tabloid, a3, a4, a5)
    #[arg(long, value_name = "SIZE", default_value = "a4")]
    pub paper: PaperSize,

    /// Page orientation (portrait, landscape)
    #[arg(long, value_name = "ORIENT", default_value = "portrait")]
    pub orientation: Orientation,

    /// Uniform page margin in points
    #[arg(long, value_name = "PT", default_value_t = 36.0)]
    pub margin: f64,
}

/// Machine-readable result of one operation, for `--json`.
#[derive(Debug, Serialize)]
pub struct OperationSummary {
    /// Subcommand name.
    pub operation: &'static str,
    /// Input file path.
    pub input: PathBuf,
    /// Output file path.
    pub output: PathBuf,
    /// Pages in the input document, absent for image inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_pages: Option<usize>,
    /// Pages in the output document.
    pub output_pages: usize,
    /// Size of the written file in bytes.
    pub bytes_written: u64,
}

/// Progress reporting to stderr, silenced by --quiet or --json.
struct Progress {
    enabled: bool,
}

impl Progress {
    fn info(&self, msg: &str) {
        if self.enabled {
            eprintln!("{msg}");
        }
    }

    fn success(&self, msg: &str) {
        if self.enabled {
            eprintln!("\u{2713} {msg}");
        }
    }
}

/// Run a parsed CLI invocation to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let progress = Progress {
        enabled: !cli.quiet && !cli.json,
    };

    let summary = match cli.command {
        Command::Nup(args) => run_nup(args, &progress).await?,
        Command::Resize(args) => run_resize(args, &progress).await?,
        Command::Stack(args) => run_stack(args, &progress).await?,
        Command::Number(args) => run_number(args, &progress).await?,
        Command::HeaderFooter(args) => run_header_footer(args, &progress).await?,
        Command::PaginateImage(args) => run_paginate_image(args, &progress).await?,
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| ComposeError::Io(std::io::Error::other(e)))?;
        println!("{json}");
    }

    Ok(())
}

async fn load(progress: &Progress, path: &Path) -> Result<crate::io::LoadedPdf> {
    progress.info(&format!("Loading: {}", path.display()));
    PdfReader::new().load(path).await
}

async fn save(
    progress: &Progress,
    doc: lopdf::Document,
    path: &Path,
) -> Result<(usize, u64)> {
    let pages = doc.get_pages().len();
    let bytes = PdfWriter::new().save(doc, path).await?;
    progress.success(&format!(
        "Wrote {} ({} page(s), {} bytes)",
        path.display(),
        pages,
        bytes
    ));
    Ok((pages, bytes))
}

async fn run_nup(args: NupArgs, progress: &Progress) -> Result<OperationSummary> {
    let loaded = load(progress, &args.input).await?;
    let policy = GridPolicy {
        pages_per_sheet: args.pages_per_sheet,
        paper_size: args.paper,
        orientation: args.orientation,
        use_margins: !args.no_margins,
        border: args.border,
    };
    let doc = nup::compose(&loaded.document, &policy)?;
    let (pages, bytes) = save(progress, doc, &args.output).await?;
    Ok(OperationSummary {
        operation: "nup",
        input: args.input,
        output: args.output,
        input_pages: Some(loaded.page_count),
        output_pages: pages,
        bytes_written: bytes,
    })
}

async fn run_resize(args: ResizeArgs, progress: &Progress) -> Result<OperationSummary> {
    let loaded = load(progress, &args.input).await?;
    let target = match (args.width, args.height) {
        (Some(width), Some(height)) => TargetSize::Custom {
            width,
            height,
            unit: args.unit,
        },
        _ => TargetSize::Named(args.paper),
    };
    let policy = FitPolicy {
        target,
        orientation: args.orientation,
        scaling_mode: args.mode,
        background: args.background,
    };
    let doc = fit::compose(&loaded.document, &policy)?;
    let (pages, bytes) = save(progress, doc, &args.output).await?;
    Ok(OperationSummary {
        operation: "resize",
        input: args.input,
        output: args.output,
        input_pages: Some(loaded.page_count),
        output_pages: pages,
        bytes_written: bytes,
    })
}

async fn run_stack(args: StackArgs, progress: &Progress) -> Result<OperationSummary> {
    let loaded = load(progress, &args.input).await?;
    let policy = StackPolicy {
        spacing: args.spacing,
        background: args.background,
        draw_separator: args.separator,
    };
    let doc = stack::compose(&loaded.document, &policy)?;
    let (pages, bytes) = save(progress, doc, &args.output).await?;
    Ok(OperationSummary {
        operation: "stack",
        input: args.input,
        output: args.output,
        input_pages: Some(loaded.page_count),
        output_pages: pages,
        bytes_written: bytes,
    })
}

async fn run_number(args: NumberArgs, progress: &Progress) -> Result<OperationSummary> {
    let loaded = load(progress, &args.input).await?;
    let policy = NumberingPolicy {
        anchor: args.anchor,
        font_size: args.font_size,
        color: args.color,
        pages: args.pages,
        template: args.template,
    };
    let doc = add_page_numbers(&loaded.document, &policy, BuiltinFont::Helvetica)?;
    let (pages, bytes) = save(progress, doc, &args.output).await?;
    Ok(OperationSummary {
        operation: "number",
        input: args.input,
        output: args.output,
        input_pages: Some(loaded.page_count),
        output_pages: pages,
        bytes_written: bytes,
    })
}

async fn run_header_footer(
    args: HeaderFooterArgs,
    progress: &Progress,
) -> Result<OperationSummary> {
    let loaded = load(progress, &args.input).await?;
    let policy = HeaderFooterPolicy {
        header: BandSlots {
            left: args.header_left,
            center: args.header_center,
            right: args.header_right,
        },
        footer: BandSlots {
            left: args.footer_left,
            center: args.footer_center,
            right: args.footer_right,
        },
        font_size: args.font_size,
        color: args.color,
        pages: args.pages,
    };
    let doc = add_headers_footers(&loaded.document, &policy, BuiltinFont::Helvetica)?;
    let (pages, bytes) = save(progress, doc, &args.output).await?;
    Ok(OperationSummary {
        operation: "header-footer",
        input: args.input,
        output: args.output,
        input_pages: Some(loaded.page_count),
        output_pages: pages,
        bytes_written: bytes,
    })
}

async fn run_paginate_image(
    args: PaginateImageArgs,
    progress: &Progress,
) -> Result<OperationSummary> {
    PdfReader::check_path(&args.image)?;
    progress.info(&format!("Loading: {}", args.image.display()));

    let image_path = args.image.clone();
    let image = tokio::task::spawn_blocking(move || -> Result<ImageData> {
        let decoded = image::open(&image_path)
            .map_err(|e| ComposeError::FailedToLoad {
                path: image_path.clone(),
                reason: e.to_string(),
            })?
            .to_rgb8();
        ImageData::new(decoded.width(), decoded.height(), decoded.into_raw())
    })
    .await
    .map_err(|e| ComposeError::Io(std::io::Error::other(format!("decode task failed: {e}"))))??;

    let policy = PaginatePolicy {
        paper_size: args.paper,
        orientation: args.orientation,
        margin: args.margin,
    };
    let doc = paginate::compose(&image, &policy)?;
    let (pages, bytes) = save(progress, doc, &args.output).await?;
    Ok(OperationSummary {
        operation: "paginate-image",
        input: args.image,
        output: args.output,
        input_pages: None,
        output_pages: pages,
        bytes_written: bytes,
    })
}
