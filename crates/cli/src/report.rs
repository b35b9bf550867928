use serde::Serialize;

use facemark_core::pipeline::capture_session::CaptureSession;
use facemark_core::presentation::infrastructure::recording_presenter::PresenterHandle;
use facemark_core::tracking::domain::marker::MarkerId;

#[derive(Debug, PartialEq, Serialize)]
pub struct MarkerReport {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub visible: bool,
}

/// What the overlay shows after one capture settled.
#[derive(Debug, PartialEq, Serialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub reused: Vec<u32>,
    pub created: Vec<u32>,
    pub removed: Vec<u32>,
    pub markers: Vec<MarkerReport>,
}

impl CycleReport {
    pub fn collect(session: &CaptureSession, presenter: &PresenterHandle) -> Self {
        let (reused, created, removed) = session
            .last_delta()
            .map(|d| (ids(&d.reused), ids(&d.created), ids(&d.removed)))
            .unwrap_or_default();

        let markers = session
            .markers()
            .iter()
            .filter_map(|marker| {
                let view = presenter.marker(marker.id)?;
                Some(MarkerReport {
                    id: marker.id.0,
                    x: view.rect.x,
                    y: view.rect.y,
                    width: view.rect.width,
                    height: view.rect.height,
                    color: view.color.to_string(),
                    visible: view.visible,
                })
            })
            .collect();

        Self {
            cycle: session.cycle(),
            reused,
            created,
            removed,
            markers,
        }
    }
}

fn ids(markers: &[MarkerId]) -> Vec<u32> {
    markers.iter().map(|m| m.0).collect()
}

pub fn format_text(reports: &[CycleReport]) -> String {
    let mut lines = Vec::new();
    for report in reports {
        lines.push(format!(
            "Cycle {}: reused {:?}, created {:?}, removed {:?}",
            report.cycle, report.reused, report.created, report.removed
        ));
        for marker in &report.markers {
            lines.push(format!(
                "  marker#{:<3} x={:7.1} y={:7.1} w={:6.1} h={:6.1}  {}",
                marker.id, marker.x, marker.y, marker.width, marker.height, marker.color
            ));
        }
    }
    lines.join("\n")
}
