//! External collaborators
//!
//! The park core never plays audio or draws UI itself. It calls these traits
//! and the host (browser shell, native window, test harness) implements them.

/// Plays and stops sounds by id.
pub trait AudioSink {
    fn play(&mut self, sound: &str);
    fn stop(&mut self, sound: &str);
}

/// Shows and hides the info modal by content id.
pub trait ModalPresenter {
    fn show(&mut self, content_id: &str);
    fn hide(&mut self);
}

/// Mouse cursor the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Audio sink that only logs. Used by the headless and windowed drivers.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: &str) {
        log::info!("audio: play {sound}");
    }

    fn stop(&mut self, sound: &str) {
        log::info!("audio: stop {sound}");
    }
}

/// Modal presenter that only logs.
#[derive(Debug, Default)]
pub struct LogModal;

impl ModalPresenter for LogModal {
    fn show(&mut self, content_id: &str) {
        log::info!("modal: show {content_id}");
    }

    fn hide(&mut self) {
        log::info!("modal: hide");
    }
}

/// Records every call, for tests and scripted runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingAudio {
    pub played: Vec<String>,
    pub stopped: Vec<String>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: &str) {
        self.played.push(sound.to_string());
    }

    fn stop(&mut self, sound: &str) {
        self.stopped.push(sound.to_string());
    }
}

/// Records the modal calls and the currently shown id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingModal {
    pub shown: Vec<String>,
    pub hidden: usize,
}

impl ModalPresenter for RecordingModal {
    fn show(&mut self, content_id: &str) {
        self.shown.push(content_id.to_string());
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}
