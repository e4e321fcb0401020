use spr::engine::config::TimingConfig;
use spr::input::{self, Source};
use spr::playback::{Frame, PlaybackController, PlaybackState};
use spr::rendering::{FrameRenderer, RendererError};
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

#[derive(Default)]
struct Recorder {
    frames: Vec<Frame>,
}

impl FrameRenderer for Recorder {
    fn render(&mut self, frame: &Frame) -> Result<(), RendererError> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RendererError> {
        self.frames.clear();
        Ok(())
    }
}

#[test]
fn end_to_end_reading() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Hello, world! This is a test\n\nof the RSVP reader.").unwrap();

    let loaded = input::load(&Source::File(file.path().to_path_buf())).unwrap();
    assert_eq!(loaded.word_count(), 10);

    let mut controller = PlaybackController::new(Recorder::default(), TimingConfig::default());
    controller.load_text(&loaded.text).unwrap();
    assert_eq!(controller.document().len(), 10);
    assert!(controller.document().units()[2].is_sentence_start());
    assert!(controller.document().units()[6].is_sentence_start());

    let mut now = Instant::now();
    controller.play(now).unwrap();
    while controller.state() == PlaybackState::Playing {
        now += controller.time_until_next_emission(now).unwrap();
        controller.tick(now).unwrap();
    }

    let texts: Vec<&str> = controller
        .renderer()
        .frames
        .iter()
        .map(|f| f.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec!["Hello,", "world!", "This", "is", "a", "test", "of", "the", "RSVP", "reader."]
    );
    assert_eq!(controller.state(), PlaybackState::Finished);
    assert_eq!(controller.progress(), (10, 10));
}

#[test]
fn total_reading_time_follows_pacing() {
    let mut controller = PlaybackController::new(Recorder::default(), TimingConfig::default());
    controller.load_text("Hello, world.").unwrap();

    let start = Instant::now();
    let mut now = start;
    controller.play(now).unwrap();
    while controller.state() == PlaybackState::Playing {
        now += controller.time_until_next_emission(now).unwrap();
        controller.tick(now).unwrap();
    }

    // 230ms for the clause pause, 260ms for the sentence pause
    assert_eq!(now - start, Duration::from_millis(490));
}

#[test]
fn empty_source_is_rejected() {
    let file = NamedTempFile::new().unwrap();
    let result = input::load(&Source::File(file.path().to_path_buf()));
    assert!(matches!(result, Err(input::LoadError::Empty(_))));
}
