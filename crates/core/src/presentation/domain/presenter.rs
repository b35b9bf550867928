use crate::shared::color::Color;
use crate::shared::frame::Frame;
use crate::shared::geometry::ScreenRect;
use crate::tracking::domain::marker::MarkerId;

/// Domain interface for whatever draws the face markers.
///
/// The presenter owns marker state and issues the handles; the session
/// only tells it what changed. Calls arrive from the session's thread.
pub trait Presenter: Send {
    /// Draws a new marker at `rect` with the neutral color.
    fn create_marker(&mut self, rect: ScreenRect) -> MarkerId;

    /// Moves an existing marker and makes it visible.
    fn reposition_marker(&mut self, marker: MarkerId, rect: ScreenRect);

    /// Removes a marker for good; its handle is never reused by the session.
    fn remove_marker(&mut self, marker: MarkerId);

    fn set_marker_color(&mut self, marker: MarkerId, color: Color);

    /// Hides a marker while keeping it for the next capture.
    fn hide_marker(&mut self, marker: MarkerId);

    /// Displays the captured still behind the markers.
    fn show_capture(&mut self, _frame: &Frame) {}

    /// Takes the captured still down so the live preview shows again.
    fn hide_capture(&mut self) {}
}

/// Everything a presenter is asked to do, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerEvent {
    Created { marker: MarkerId, rect: ScreenRect },
    Repositioned { marker: MarkerId, rect: ScreenRect },
    Removed { marker: MarkerId },
    Colored { marker: MarkerId, color: Color },
    Hidden { marker: MarkerId },
    CaptureShown {
        index: usize,
        width: u32,
        height: u32,
    },
    CaptureHidden,
}

impl MarkerEvent {
    /// The marker the event refers to, if any.
    pub fn marker(&self) -> Option<MarkerId> {
        match self {
            MarkerEvent::Created { marker, .. }
            | MarkerEvent::Repositioned { marker, .. }
            | MarkerEvent::Removed { marker }
            | MarkerEvent::Colored { marker, .. }
            | MarkerEvent::Hidden { marker } => Some(*marker),
            MarkerEvent::CaptureShown { .. } | MarkerEvent::CaptureHidden => None,
        }
    }
}
