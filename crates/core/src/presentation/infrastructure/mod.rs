pub mod recording_presenter;
