use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::presentation::domain::presenter::{MarkerEvent, Presenter};
use crate::shared::color::Color;
use crate::shared::frame::Frame;
use crate::shared::geometry::ScreenRect;
use crate::tracking::domain::marker::MarkerId;

/// What a marker currently looks like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerView {
    pub rect: ScreenRect,
    pub color: Color,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct PresenterState {
    pub events: Vec<MarkerEvent>,
    pub markers: BTreeMap<MarkerId, MarkerView>,
    next_id: u32,
}

/// Headless presenter that keeps marker state in memory and records every
/// call as a [`MarkerEvent`].
///
/// The session takes ownership of the presenter, so inspection goes
/// through a [`PresenterHandle`] obtained before handing it over.
#[derive(Default)]
pub struct RecordingPresenter {
    state: Arc<Mutex<PresenterState>>,
}

/// Shared read access to a [`RecordingPresenter`]'s state.
#[derive(Clone)]
pub struct PresenterHandle {
    state: Arc<Mutex<PresenterState>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> PresenterHandle {
        PresenterHandle {
            state: self.state.clone(),
        }
    }

    fn state(&self) -> MutexGuard<'_, PresenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event: MarkerEvent) {
        log::debug!("{event:?}");
        self.state().events.push(event);
    }

    fn update(&self, marker: MarkerId, f: impl FnOnce(&mut MarkerView)) {
        match self.state().markers.get_mut(&marker) {
            Some(view) => f(view),
            None => log::warn!("Ignoring update for unknown {marker}"),
        }
    }
}

impl PresenterHandle {
    pub fn events(&self) -> Vec<MarkerEvent> {
        self.lock().events.clone()
    }

    /// Drains the recorded events, leaving marker state untouched.
    pub fn take_events(&self) -> Vec<MarkerEvent> {
        std::mem::take(&mut self.lock().events)
    }

    pub fn markers(&self) -> BTreeMap<MarkerId, MarkerView> {
        self.lock().markers.clone()
    }

    pub fn marker(&self, id: MarkerId) -> Option<MarkerView> {
        self.lock().markers.get(&id).copied()
    }

    fn lock(&self) -> MutexGuard<'_, PresenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Presenter for RecordingPresenter {
    fn create_marker(&mut self, rect: ScreenRect) -> MarkerId {
        let marker = {
            let mut state = self.state();
            state.next_id += 1;
            let marker = MarkerId(state.next_id);
            state.markers.insert(
                marker,
                MarkerView {
                    rect,
                    color: Color::NEUTRAL,
                    visible: true,
                },
            );
            marker
        };
        self.record(MarkerEvent::Created { marker, rect });
        marker
    }

    fn reposition_marker(&mut self, marker: MarkerId, rect: ScreenRect) {
        self.update(marker, |view| {
            view.rect = rect;
            view.visible = true;
        });
        self.record(MarkerEvent::Repositioned { marker, rect });
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.state().markers.remove(&marker);
        self.record(MarkerEvent::Removed { marker });
    }

    fn set_marker_color(&mut self, marker: MarkerId, color: Color) {
        self.update(marker, |view| view.color = color);
        self.record(MarkerEvent::Colored { marker, color });
    }

    fn hide_marker(&mut self, marker: MarkerId) {
        self.update(marker, |view| view.visible = false);
        self.record(MarkerEvent::Hidden { marker });
    }

    fn show_capture(&mut self, frame: &Frame) {
        self.record(MarkerEvent::CaptureShown {
            index: frame.index(),
            width: frame.width(),
            height: frame.height(),
        });
    }

    fn hide_capture(&mut self) {
        self.record(MarkerEvent::CaptureHidden);
    }
}
