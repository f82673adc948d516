use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use funny_face_core::detection::domain::face_detector::FaceDetector;
use funny_face_core::detection::infrastructure::observation_file_detector::ObservationFileDetector;
use funny_face_core::frames::domain::frame_source::FrameSource;
use funny_face_core::frames::domain::image_writer::ImageWriter;
use funny_face_core::frames::infrastructure::image_file_reader::ImageFileReader;
use funny_face_core::frames::infrastructure::image_file_writer::ImageFileWriter;
use funny_face_core::frames::infrastructure::tagged_frame_source::TaggedFrameSource;
use funny_face_core::overlay::domain::feature_selection::FeatureSelection;
use funny_face_core::pipeline::render_overlay_use_case::{OverlayMode, RenderOverlayUseCase};
use funny_face_core::shared::constants::IMAGE_EXTENSIONS;
use funny_face_core::shared::geometry::NormalizedRect;
use funny_face_core::shared::orientation::Orientation;

/// Burn clown features (or a debug rectangle) into a still image.
#[derive(Parser, Debug)]
#[command(name = "funny-face")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file.
    output: PathBuf,

    /// JSON file of face observations from the landmark analyzer.
    #[arg(long)]
    observations: Option<PathBuf>,

    /// Features to draw (comma-separated: eyes,nose,mouth or none). All by default.
    #[arg(long, value_delimiter = ',')]
    features: Option<Vec<String>>,

    /// Highlight a normalized rectangle X,Y,W,H (bottom-left origin) instead
    /// of drawing features.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    debug_rect: Option<Vec<f64>>,

    /// Override the input's orientation tag (e.g. up, left-mirrored).
    #[arg(long)]
    orientation: Option<String>,

    /// Display scale carried on the image.
    #[arg(long)]
    scale: Option<f64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mode = overlay_mode(&cli)?;
    let orientation = cli.orientation.as_deref().map(parse_orientation).transpose()?;
    let reader: Box<dyn FrameSource> = Box::new(TaggedFrameSource::new(
        Box::new(ImageFileReader::new()),
        orientation,
        cli.scale,
    )?);
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());
    let detector = build_detector(&cli, &mode)?;

    let mut use_case = RenderOverlayUseCase::new(reader, image_writer, detector, mode);
    let faces = use_case.execute(&cli.input, &cli.output)?;
    if let OverlayMode::FunnyFace(_) = mode {
        log::info!("Decorated {faces} face(s)");
    }
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

fn overlay_mode(cli: &Cli) -> Result<OverlayMode, Box<dyn std::error::Error>> {
    if let Some(values) = &cli.debug_rect {
        return Ok(OverlayMode::DebugRect(Some(parse_rect(values)?)));
    }
    let features = match &cli.features {
        Some(names) => parse_features(names)?,
        None => FeatureSelection::all(),
    };
    Ok(OverlayMode::FunnyFace(features))
}

fn build_detector(
    cli: &Cli,
    mode: &OverlayMode,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    match (&cli.observations, mode) {
        (Some(path), OverlayMode::FunnyFace(_)) => {
            let detector = ObservationFileDetector::open(path)?;
            Ok(Box::new(detector))
        }
        (None, OverlayMode::FunnyFace(_)) => {
            log::warn!("No --observations given; output will have no faces drawn");
            Ok(Box::new(ObservationFileDetector::new(Vec::new())))
        }
        (_, OverlayMode::DebugRect(_)) => Ok(Box::new(ObservationFileDetector::new(Vec::new()))),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Unsupported input format: {} (expected one of: {})",
            cli.input.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    if !is_image(&cli.output) {
        return Err(format!(
            "Unsupported output format: {} (expected one of: {})",
            cli.output.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    if let Some(path) = &cli.observations {
        if !path.exists() {
            return Err(format!("Observations file not found: {}", path.display()).into());
        }
    }
    if cli.debug_rect.is_some() && cli.observations.is_some() {
        return Err("--debug-rect and --observations are mutually exclusive".into());
    }
    if let Some(values) = &cli.debug_rect {
        parse_rect(values)?;
    }
    if let Some(scale) = cli.scale {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(format!("Scale must be a positive number, got {scale}").into());
        }
    }
    if let Some(name) = &cli.orientation {
        parse_orientation(name)?;
    }
    if let Some(names) = &cli.features {
        parse_features(names)?;
    }
    Ok(())
}

fn parse_features(names: &[String]) -> Result<FeatureSelection, String> {
    if names.len() == 1 && names[0].trim() == "none" {
        return Ok(FeatureSelection::none());
    }
    FeatureSelection::from_names(names)
}

fn parse_rect(values: &[f64]) -> Result<NormalizedRect, String> {
    match values {
        [x, y, w, h] if values.iter().all(|v| v.is_finite()) => {
            if *w < 0.0 || *h < 0.0 {
                return Err(format!("Debug rect size must be non-negative, got {w}x{h}"));
            }
            Ok(NormalizedRect::new(*x, *y, *w, *h))
        }
        _ => Err(format!(
            "Debug rect must be four finite numbers X,Y,W,H, got {values:?}"
        )),
    }
}

fn parse_orientation(name: &str) -> Result<Orientation, String> {
    Orientation::parse(&name.to_lowercase()).ok_or_else(|| {
        let names: Vec<String> = Orientation::ALL.iter().map(|o| o.to_string()).collect();
        format!(
            "Unknown orientation '{name}', expected one of: {}",
            names.join(", ")
        )
    })
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
