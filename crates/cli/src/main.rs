mod report;
mod scenario;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use facemark_core::capture::domain::capture_gate::CaptureMode;
use facemark_core::capture::domain::frame_source::FrameSource;
use facemark_core::capture::infrastructure::blank_frame_source::BlankFrameSource;
use facemark_core::capture::infrastructure::image_file_source::ImageFileSource;
use facemark_core::classification::infrastructure::replay_gender_classifier::ReplayGenderClassifier;
use facemark_core::detection::infrastructure::replay_face_detector::ReplayFaceDetector;
use facemark_core::pipeline::capture_session::CaptureSession;
use facemark_core::pipeline::session_config::SessionConfig;
use facemark_core::pipeline::session_logger::StdoutSessionLogger;
use facemark_core::presentation::infrastructure::recording_presenter::RecordingPresenter;
use facemark_core::shared::constants::{
    CLASSIFICATION_CONFIDENCE_THRESHOLD, CLASSIFICATION_CROP_PADDING, IMAGE_EXTENSIONS,
};

use report::{format_text, CycleReport};
use scenario::Scenario;

/// Replays a recorded capture scenario through the face marker overlay
/// and reports where each marker ends up and how it is colored.
#[derive(Parser)]
#[command(name = "facemark")]
struct Cli {
    /// Scenario file (JSON) with the viewport and the faces seen per capture.
    scenario: PathBuf,

    /// Minimum classifier confidence for a gendered marker color (0.0-1.0).
    #[arg(long, default_value_t = CLASSIFICATION_CONFIDENCE_THRESHOLD)]
    confidence_threshold: f64,

    /// Padding around each face before classification, as a fraction of the image (0.0-0.5).
    #[arg(long, default_value_t = CLASSIFICATION_CROP_PADDING)]
    crop_padding: f64,

    /// Still image used as the camera feed (default: blank frames of the scenario's capture size).
    #[arg(long)]
    image: Option<PathBuf>,

    /// Frames the camera delivers per capture request.
    #[arg(long, default_value = "3")]
    burst: usize,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
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

    let scenario = Scenario::load(&cli.scenario)?;
    let config = SessionConfig {
        crop_padding: cli.crop_padding,
        confidence_threshold: cli.confidence_threshold,
        ..SessionConfig::default()
    };

    let (mut source, (width, height)) = open_source(&cli, &scenario)?;
    log::info!(
        "Replaying {} captures at {width}x{height}",
        scenario.cycles.len()
    );

    let presenter = RecordingPresenter::new();
    let handle = presenter.handle();
    let mut session = CaptureSession::new(
        Box::new(ReplayFaceDetector::new(scenario.detection_script())),
        Box::new(ReplayGenderClassifier::new(scenario.classification_script(
            width,
            height,
            config.crop_padding,
        ))),
        Box::new(presenter),
        config,
        Box::new(StdoutSessionLogger::new()),
    )?;
    session.set_viewport(scenario.viewport.into());
    if let Some(orientation) = scenario.device_orientation {
        session.set_device_orientation(orientation.into());
    }

    let mut reports = Vec::with_capacity(scenario.cycles.len());
    for (i, cycle) in scenario.cycles.iter().enumerate() {
        if let Some(viewport) = cycle.viewport {
            session.set_viewport(viewport.into());
        }
        if let Some(orientation) = cycle.device_orientation {
            session.set_device_orientation(orientation.into());
        }

        if session.mode() == CaptureMode::Captured {
            session.tap();
        }
        session.tap();
        if !session.capture_from(source.as_mut())? {
            return Err(format!("Camera delivered no frame for capture {}", i + 1).into());
        }
        session.settle()?;
        reports.push(CycleReport::collect(&session, &handle));
    }
    session.summary();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", format_text(&reports));
    }
    Ok(())
}

fn open_source(
    cli: &Cli,
    scenario: &Scenario,
) -> Result<(Box<dyn FrameSource>, (u32, u32)), Box<dyn std::error::Error>> {
    match &cli.image {
        Some(path) => {
            let source = ImageFileSource::new(path, cli.burst);
            let size = source.dimensions()?;
            Ok((Box::new(source), size))
        }
        None => {
            let (width, height) = (scenario.capture.width, scenario.capture.height);
            Ok((
                Box::new(BlankFrameSource::new(width, height, cli.burst)),
                (width, height),
            ))
        }
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.scenario.exists() {
        return Err(format!("Scenario file not found: {}", cli.scenario.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence_threshold) {
        return Err(format!(
            "Confidence threshold must be between 0.0 and 1.0, got {}",
            cli.confidence_threshold
        )
        .into());
    }
    if !(0.0..=0.5).contains(&cli.crop_padding) {
        return Err(format!(
            "Crop padding must be between 0.0 and 0.5, got {}",
            cli.crop_padding
        )
        .into());
    }
    if cli.burst == 0 {
        return Err("Burst must be at least 1".into());
    }
    if let Some(image) = &cli.image {
        if !image.exists() {
            return Err(format!("Image file not found: {}", image.display()).into());
        }
        if !is_image(image) {
            return Err(format!("Unsupported image format: {}", image.display()).into());
        }
    }
    Ok(())
}

fn is_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
