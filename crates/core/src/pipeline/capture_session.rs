use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::select;

use crate::capture::domain::capture_gate::{CaptureGate, CaptureMode};
use crate::capture::domain::frame_source::FrameSource;
use crate::classification::domain::classification_crop::extract_crop;
use crate::classification::domain::gender_classifier::{Classification, GenderClassifier};
use crate::classification::domain::gender_color::color_for;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::infrastructure::oracle_worker::OracleWorker;
use crate::pipeline::session_config::SessionConfig;
use crate::pipeline::session_logger::SessionLogger;
use crate::presentation::domain::presenter::Presenter;
use crate::shared::error::{SendError, SessionError};
use crate::shared::frame::Frame;
use crate::shared::geometry::{DeviceOrientation, NormalizedRect, Orientation, Viewport};
use crate::tracking::domain::coordinate_translator::CoordinateTranslator;
use crate::tracking::domain::marker::{MarkerId, TrackedMarker};
use crate::tracking::domain::marker_assigner::{Assignment, MarkerAssigner};

const DETECTION_WORKER: &str = "detection";
const CLASSIFICATION_WORKER: &str = "classification";

struct DetectionJob {
    cycle: u64,
    frame: Arc<Frame>,
}

struct DetectionOutcome {
    cycle: u64,
    frame: Arc<Frame>,
    faces: Result<Vec<NormalizedRect>, SendError>,
    elapsed_ms: f64,
}

struct ClassificationJob {
    cycle: u64,
    marker: MarkerId,
    crop: Frame,
}

struct ClassificationOutcome {
    cycle: u64,
    marker: MarkerId,
    result: Result<Option<Classification>, SendError>,
    elapsed_ms: f64,
}

enum OracleEvent {
    Detected(DetectionOutcome),
    Classified(ClassificationOutcome),
}

/// How the marker set changed in one capture cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleDelta {
    pub cycle: u64,
    pub reused: Vec<MarkerId>,
    pub created: Vec<MarkerId>,
    pub removed: Vec<MarkerId>,
}

/// Coordinates one camera screen: capture gating, detection, marker
/// assignment and classification coloring.
///
/// Oracles run on worker threads; their results are applied here, on the
/// caller's thread, by [`pump`](Self::pump) or [`settle`](Self::settle).
/// The session is the only place the marker set changes.
pub struct CaptureSession {
    config: SessionConfig,
    translator: CoordinateTranslator,
    assigner: MarkerAssigner,
    gate: CaptureGate,
    markers: Vec<TrackedMarker>,
    cycle: u64,
    outstanding: usize,
    last_delta: Option<CycleDelta>,
    presenter: Box<dyn Presenter>,
    logger: Box<dyn SessionLogger>,
    detection: OracleWorker<DetectionJob, DetectionOutcome>,
    classification: OracleWorker<ClassificationJob, ClassificationOutcome>,
}

impl CaptureSession {
    pub fn new(
        mut detector: Box<dyn FaceDetector>,
        mut classifier: Box<dyn GenderClassifier>,
        presenter: Box<dyn Presenter>,
        config: SessionConfig,
        logger: Box<dyn SessionLogger>,
    ) -> Result<Self, SessionError> {
        let detection = OracleWorker::spawn(
            DETECTION_WORKER,
            config.channel_capacity,
            move |job: DetectionJob| {
                let started = Instant::now();
                let faces = detector
                    .detect(&job.frame)
                    .map_err(|e| -> SendError { e.to_string().into() });
                DetectionOutcome {
                    cycle: job.cycle,
                    frame: job.frame,
                    faces,
                    elapsed_ms: elapsed_ms(started),
                }
            },
        )?;

        let classification = OracleWorker::spawn(
            CLASSIFICATION_WORKER,
            config.channel_capacity,
            move |job: ClassificationJob| {
                let started = Instant::now();
                let result = classifier
                    .classify(&job.crop)
                    .map_err(|e| -> SendError { e.to_string().into() });
                ClassificationOutcome {
                    cycle: job.cycle,
                    marker: job.marker,
                    result,
                    elapsed_ms: elapsed_ms(started),
                }
            },
        )?;

        Ok(Self {
            config,
            translator: CoordinateTranslator::default(),
            assigner: MarkerAssigner::new(),
            gate: CaptureGate::new(),
            markers: Vec::new(),
            cycle: 0,
            outstanding: 0,
            last_delta: None,
            presenter,
            logger,
            detection,
            classification,
        })
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.translator.set_viewport(viewport);
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.translator.set_orientation(orientation);
    }

    pub fn set_device_orientation(&mut self, device: DeviceOrientation) {
        self.translator.set_device_orientation(device);
    }

    /// User tap on the screen. Dismissing a captured still takes it down
    /// and hides the markers; they stay tracked and reappear when the next
    /// capture reuses them.
    pub fn tap(&mut self) -> CaptureMode {
        let before = self.gate.mode();
        let after = self.gate.tap();
        if before == CaptureMode::Captured && after == CaptureMode::Idle {
            self.presenter.hide_capture();
            for marker in &self.markers {
                self.presenter.hide_marker(marker.id);
            }
            self.logger.info(&format!(
                "Capture {} dismissed, {} markers hidden",
                self.cycle,
                self.markers.len()
            ));
        }
        after
    }

    /// Hands a camera frame to the session. Returns `true` if the frame
    /// was taken for a new cycle; every other frame is dropped.
    ///
    /// The gate only closes once the detector has the frame, so a lost
    /// detection worker leaves the request pending.
    pub fn offer_frame(&mut self, frame: Frame) -> Result<bool, SessionError> {
        if self.gate.mode() != CaptureMode::RequestAwaiting {
            return Ok(false);
        }

        let next = self.cycle + 1;
        let frame = Arc::new(frame);
        self.detection.submit(DetectionJob {
            cycle: next,
            frame: Arc::clone(&frame),
        })?;
        self.outstanding += 1;

        self.gate.offer();
        self.cycle = next;
        self.presenter.show_capture(&frame);
        self.logger.info(&format!("Captured frame {} for cycle {}", frame.index(), self.cycle));
        Ok(true)
    }

    /// Streams `source` until the gate takes a frame, then stops it.
    pub fn capture_from(&mut self, source: &mut dyn FrameSource) -> Result<bool, SessionError> {
        source
            .start()
            .map_err(|e| SessionError::NoInputDevice(e.to_string()))?;

        let accepted = self.offer_until_accepted(source.frames());
        source.stop();
        accepted
    }

    fn offer_until_accepted(
        &mut self,
        frames: impl Iterator<Item = Result<Frame, Box<dyn std::error::Error>>>,
    ) -> Result<bool, SessionError> {
        for frame in frames {
            match frame {
                Ok(frame) => {
                    if self.offer_frame(frame)? {
                        return Ok(true);
                    }
                }
                Err(e) => log::warn!("Skipping unreadable frame: {e}"),
            }
        }
        Ok(false)
    }

    /// Applies every oracle result that is already available. Returns how
    /// many were handled.
    pub fn pump(&mut self) -> Result<usize, SessionError> {
        let mut handled = 0;
        while let Some(event) = self.next_event(false)? {
            self.dispatch(event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Blocks until every submitted oracle request has been answered and
    /// applied.
    pub fn settle(&mut self) -> Result<(), SessionError> {
        while self.outstanding > 0 {
            if let Some(event) = self.next_event(true)? {
                self.dispatch(event)?;
            }
        }
        Ok(())
    }

    pub fn markers(&self) -> &[TrackedMarker] {
        &self.markers
    }

    pub fn mode(&self) -> CaptureMode {
        self.gate.mode()
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn last_delta(&self) -> Option<&CycleDelta> {
        self.last_delta.as_ref()
    }

    pub fn translator(&self) -> &CoordinateTranslator {
        &self.translator
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn summary(&self) {
        self.logger.summary();
    }

    fn next_event(&self, block: bool) -> Result<Option<OracleEvent>, SessionError> {
        let detections = self.detection.results();
        let classifications = self.classification.results();

        let detected = |msg: Result<DetectionOutcome, _>| {
            msg.map(OracleEvent::Detected)
                .map_err(|_| SessionError::WorkerDisconnected(DETECTION_WORKER))
        };
        let classified = |msg: Result<ClassificationOutcome, _>| {
            msg.map(OracleEvent::Classified)
                .map_err(|_| SessionError::WorkerDisconnected(CLASSIFICATION_WORKER))
        };

        let event = if block {
            select! {
                recv(detections) -> msg => detected(msg),
                recv(classifications) -> msg => classified(msg),
            }
        } else {
            select! {
                recv(detections) -> msg => detected(msg),
                recv(classifications) -> msg => classified(msg),
                default => return Ok(None),
            }
        };
        event.map(Some)
    }

    fn dispatch(&mut self, event: OracleEvent) -> Result<(), SessionError> {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event {
            OracleEvent::Detected(outcome) => self.apply_detections(outcome),
            OracleEvent::Classified(outcome) => {
                self.apply_classification(outcome);
                Ok(())
            }
        }
    }

    fn apply_detections(&mut self, outcome: DetectionOutcome) -> Result<(), SessionError> {
        self.logger.timing("detect", outcome.elapsed_ms);
        if outcome.cycle != self.cycle {
            log::debug!(
                "Discarding detections from superseded cycle {}",
                outcome.cycle
            );
            return Ok(());
        }

        let faces = outcome.faces.unwrap_or_else(|e| {
            log::warn!(
                "Face detection failed on cycle {}, treating frame as empty: {e}",
                outcome.cycle
            );
            Vec::new()
        });

        let started = Instant::now();
        let assignment = self
            .assigner
            .assign(&self.markers, &faces, &self.translator);
        self.logger.timing("assign", elapsed_ms(started));

        let (delta, owners) = self.apply_assignment(&assignment);
        log::info!(
            "Cycle {}: {} faces, {} markers reused, {} created, {} removed",
            self.cycle,
            faces.len(),
            delta.reused.len(),
            delta.created.len(),
            delta.removed.len()
        );
        self.logger.metric("faces", faces.len() as f64);
        self.logger.metric("markers_created", delta.created.len() as f64);
        self.logger.metric("markers_removed", delta.removed.len() as f64);
        self.logger.cycle(self.cycle);
        self.last_delta = Some(delta);

        self.request_classifications(&outcome.frame, &faces, &owners)
    }

    /// Pushes an assignment to the presenter: removals first, then moves,
    /// then new markers. Returns the delta and the marker now owning each
    /// detection.
    fn apply_assignment(
        &mut self,
        assignment: &Assignment,
    ) -> (CycleDelta, Vec<Option<MarkerId>>) {
        let mut owners = vec![None; assignment.screen_rects.len()];

        for &marker in &assignment.stale_markers {
            self.presenter.remove_marker(marker);
        }

        let live = assignment.pairs.len() + assignment.unmatched_detections.len();
        let mut markers = Vec::with_capacity(live);
        let mut reused = Vec::with_capacity(assignment.pairs.len());
        for &(marker, detection) in &assignment.pairs {
            let rect = assignment.screen_rects[detection];
            self.presenter.reposition_marker(marker, rect);
            markers.push(TrackedMarker::new(marker, rect));
            reused.push(marker);
            owners[detection] = Some(marker);
        }

        let mut created = Vec::with_capacity(assignment.unmatched_detections.len());
        for &detection in &assignment.unmatched_detections {
            let rect = assignment.screen_rects[detection];
            let marker = self.presenter.create_marker(rect);
            markers.push(TrackedMarker::new(marker, rect));
            created.push(marker);
            owners[detection] = Some(marker);
        }

        self.markers = markers;
        let delta = CycleDelta {
            cycle: self.cycle,
            reused,
            created,
            removed: assignment.stale_markers.clone(),
        };
        (delta, owners)
    }

    fn request_classifications(
        &mut self,
        frame: &Frame,
        faces: &[NormalizedRect],
        owners: &[Option<MarkerId>],
    ) -> Result<(), SessionError> {
        for (bbox, owner) in faces.iter().zip(owners) {
            let Some(marker) = *owner else { continue };
            let Some(crop) = extract_crop(frame, bbox, self.config.crop_padding) else {
                log::debug!("{marker} lies outside the captured frame, not classified");
                continue;
            };
            self.classification.submit(ClassificationJob {
                cycle: self.cycle,
                marker,
                crop,
            })?;
            self.outstanding += 1;
        }
        Ok(())
    }

    fn apply_classification(&mut self, outcome: ClassificationOutcome) {
        self.logger.timing("classify", outcome.elapsed_ms);
        let live = self.markers.iter().any(|m| m.id == outcome.marker);
        if outcome.cycle != self.cycle || !live {
            log::debug!(
                "Discarding classification for {} from cycle {}",
                outcome.marker,
                outcome.cycle
            );
            return;
        }

        match outcome.result {
            Ok(Some(classification)) => {
                let color = color_for(&classification, self.config.confidence_threshold);
                log::debug!(
                    "{} classified {} ({:.2}), color {color}",
                    outcome.marker,
                    classification.label,
                    classification.confidence
                );
                self.presenter.set_marker_color(outcome.marker, color);
            }
            Ok(None) => log::debug!("No classification for {}", outcome.marker),
            Err(e) => log::warn!("Gender classification failed for {}: {e}", outcome.marker),
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
