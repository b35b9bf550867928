use crate::shared::geometry::ScreenRect;

/// Handle of an on-screen face marker, issued by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// The session's view of a live marker: its handle and where it is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedMarker {
    pub id: MarkerId,
    pub rect: ScreenRect,
}

impl TrackedMarker {
    pub fn new(id: MarkerId, rect: ScreenRect) -> Self {
        Self { id, rect }
    }
}
