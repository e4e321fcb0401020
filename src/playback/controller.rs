use super::command::Command;
use super::frame::Frame;
use super::state::PlaybackState;
use super::timer::Timer;
use crate::engine::config::TimingConfig;
use crate::engine::error::{Result, SprError};
use crate::reading::pacing::validate_rate;
use crate::reading::Document;
use crate::rendering::renderer::FrameRenderer;
use log::{debug, error, info};
use std::time::{Duration, Instant};

/// How far behind `now` the next emission may be anchored after a late tick
const CATCH_UP_LIMIT: Duration = Duration::from_millis(50);

/// Drives a document through the renderer, one unit per timer expiry.
///
/// Single-threaded: the owner calls [`apply`](Self::apply) for queued commands
/// and [`tick`](Self::tick) whenever [`time_until_next_emission`](Self::time_until_next_emission)
/// has elapsed. Time is passed in, never read, so behaviour is reproducible.
pub struct PlaybackController<R: FrameRenderer> {
    document: Document,
    state: PlaybackState,
    base_wpm: u32,
    rate_multiplier: f64,
    config: TimingConfig,
    timer: Timer,
    renderer: R,
}

impl<R: FrameRenderer> PlaybackController<R> {
    pub fn new(renderer: R, config: TimingConfig) -> Self {
        let base_wpm = config.clamp_wpm(config.wpm);
        let rate_multiplier = config.clamp_rate(validate_rate(config.rate).unwrap_or(1.0));
        Self {
            document: Document::new(Vec::new()),
            state: PlaybackState::Stopped,
            base_wpm,
            rate_multiplier,
            config,
            timer: Timer::new(),
            renderer,
        }
    }

    /// Replaces the document, re-paced to the current speed. Any state → Stopped.
    pub fn load(&mut self, mut document: Document) -> Result<()> {
        self.timer.cancel();
        document.rewind();
        document.repace(self.base_wpm, self.rate_multiplier, &self.config)?;
        info!("Loaded document with {} units", document.len());
        self.document = document;
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    pub fn load_text(&mut self, text: &str) -> Result<()> {
        let document = Document::from_text(text, self.base_wpm, self.rate_multiplier, &self.config)?;
        self.load(document)
    }

    /// Stopped|Paused → Playing, arming the unit after the cursor.
    pub fn play(&mut self, now: Instant) -> Result<()> {
        match self.state {
            PlaybackState::Playing | PlaybackState::Finished => return Ok(()),
            PlaybackState::Stopped | PlaybackState::Paused => {}
        }

        match self.document.next_index() {
            Some(index) => {
                self.arm(index, now);
                self.state = PlaybackState::Playing;
                debug!("Playing from unit {}", index);
            }
            None => self.finish(),
        }
        Ok(())
    }

    /// Playing → Paused. The pending emission is dropped; the cursor stays put.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.timer.cancel();
            self.state = PlaybackState::Paused;
            debug!("Paused at cursor {}", self.document.cursor());
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            _ => self.play(now),
        }
    }

    /// Moves the cursor by `delta`, clamped to the document. Never emits a frame.
    pub fn seek(&mut self, delta: isize, now: Instant) -> Result<()> {
        if self.state == PlaybackState::Finished {
            debug!("Ignoring seek({}) after finish", delta);
            return Ok(());
        }
        if self.document.is_empty() {
            self.finish();
            return Ok(());
        }

        let cursor = self.document.set_cursor(self.document.cursor().saturating_add(delta));
        debug!("Seek {} -> cursor {}", delta, cursor);

        if self.state == PlaybackState::Playing {
            self.timer.cancel();
            match self.document.next_index() {
                Some(index) => self.arm(index, now),
                None => {
                    // Nothing left to arm; stay seekable instead of finishing
                    self.state = PlaybackState::Paused;
                    debug!("Seek reached the last unit, paused");
                }
            }
        }
        Ok(())
    }

    /// Positions the cursor so that the next sentence is emitted next.
    pub fn jump_to_next_sentence(&mut self, now: Instant) -> Result<bool> {
        match self.document.find_next_sentence_start() {
            Some(target) => {
                self.seek_to_emit(target, now)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rewinds to the start of the current sentence, or the previous one when
    /// already at a sentence start.
    pub fn jump_to_previous_sentence(&mut self, now: Instant) -> Result<bool> {
        if self.document.cursor() < 0 {
            return Ok(false);
        }
        let target = self.document.find_previous_sentence_start().unwrap_or(0);
        self.seek_to_emit(target, now)?;
        Ok(true)
    }

    fn seek_to_emit(&mut self, target: usize, now: Instant) -> Result<()> {
        let delta = (target as isize - 1) - self.document.cursor();
        self.seek(delta, now)
    }

    /// Changes the rate multiplier and re-paces units not yet emitted.
    ///
    /// A non-positive rate is rejected and the previous one kept. While
    /// playing, the pending emission keeps its arming instant and only its
    /// delay changes, so repeating the same rate is a no-op.
    pub fn set_rate(&mut self, rate_multiplier: f64) -> Result<()> {
        let rate = validate_rate(rate_multiplier)?;
        self.document.repace(self.base_wpm, rate, &self.config)?;
        self.rate_multiplier = rate;
        self.rearm_pending();
        debug!("Rate set to {:.2}", rate);
        Ok(())
    }

    pub fn adjust_rate(&mut self, delta: f64) -> Result<()> {
        let stepped = ((self.rate_multiplier + delta) * 100.0).round() / 100.0;
        self.set_rate(self.config.clamp_rate(stepped))
    }

    /// Changes the base speed, clamped to the configured WPM range.
    pub fn set_wpm(&mut self, wpm: u32) -> Result<()> {
        let wpm = self.config.clamp_wpm(wpm);
        self.document.repace(wpm, self.rate_multiplier, &self.config)?;
        self.base_wpm = wpm;
        self.rearm_pending();
        debug!("WPM set to {}", wpm);
        Ok(())
    }

    pub fn adjust_wpm(&mut self, delta: i32) -> Result<()> {
        let wpm = (self.base_wpm as i64 + delta as i64).clamp(1, u32::MAX as i64) as u32;
        self.set_wpm(wpm)
    }

    /// Back to the first unit, Stopped.
    pub fn restart(&mut self) -> Result<()> {
        let document = std::mem::replace(&mut self.document, Document::new(Vec::new()));
        self.load(document)?;
        self.renderer.clear()?;
        Ok(())
    }

    /// Applies one queued command.
    pub fn apply(&mut self, command: Command, now: Instant) -> Result<()> {
        match command {
            Command::Play => self.play(now),
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::TogglePause => self.toggle_pause(now),
            Command::Seek(delta) => self.seek(delta, now),
            Command::NextSentence => self.jump_to_next_sentence(now).map(|_| ()),
            Command::PreviousSentence => self.jump_to_previous_sentence(now).map(|_| ()),
            Command::SetRate(rate) => self.set_rate(rate),
            Command::AdjustRate(delta) => self.adjust_rate(delta),
            Command::SetWpm(wpm) => self.set_wpm(wpm),
            Command::AdjustWpm(delta) => self.adjust_wpm(delta),
            Command::Restart => {
                self.restart()?;
                self.play(now)
            }
        }
    }

    /// Emits the pending unit if its deadline has passed.
    ///
    /// Emitting the last unit finishes playback; otherwise the next unit is
    /// armed from the expired deadline. At most one frame per call.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Frame>> {
        if self.state != PlaybackState::Playing {
            return Ok(None);
        }
        let Some(pending) = self.timer.take_due(now) else {
            return Ok(None);
        };

        if self.document.next_index() != Some(pending.index) {
            return Err(self.fault(format!(
                "pending unit {} does not follow cursor {}",
                pending.index,
                self.document.cursor()
            )));
        }

        let previous = self.document.cursor();
        self.document.set_cursor(pending.index as isize);
        let Some(frame) = self.document.current().map(Frame::from_unit) else {
            return Err(self.fault(format!("unit {} missing", pending.index)));
        };

        if let Err(err) = self.renderer.render(&frame) {
            self.document.set_cursor(previous);
            return Err(self.fault(err.to_string()));
        }

        // Chain from the expired deadline so wake-up latency does not
        // accumulate, but never schedule further back than CATCH_UP_LIMIT.
        let anchor = now
            .checked_sub(CATCH_UP_LIMIT)
            .map_or(pending.deadline, |floor| pending.deadline.max(floor));
        match self.document.next_index() {
            Some(next) => self.arm(next, anchor),
            None => self.finish(),
        }
        Ok(Some(frame))
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> isize {
        self.document.cursor()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn base_wpm(&self) -> u32 {
        self.base_wpm
    }

    pub fn rate_multiplier(&self) -> f64 {
        self.rate_multiplier
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frame for the unit at the cursor, without emitting it.
    pub fn current_frame(&self) -> Option<Frame> {
        self.document.current().map(Frame::from_unit)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn time_until_next_emission(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Delay the pending emission was armed with.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.timer.pending().map(|p| p.delay())
    }

    /// (units shown, total units)
    pub fn progress(&self) -> (usize, usize) {
        ((self.document.cursor() + 1) as usize, self.document.len())
    }

    fn arm(&mut self, index: usize, now: Instant) {
        let delay = self
            .document
            .unit(index)
            .map(|unit| unit.duration_ms())
            .unwrap_or(self.config.min_duration_ms);
        self.timer.arm(index, now, Duration::from_millis(delay));
    }

    fn rearm_pending(&mut self) {
        let Some(index) = self.timer.pending().map(|p| p.index) else {
            return;
        };
        if let Some(unit) = self.document.unit(index) {
            self.timer.rearm(Duration::from_millis(unit.duration_ms()));
        }
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.state = PlaybackState::Finished;
        info!("Playback finished after {} units", self.document.len());
    }

    fn fault(&mut self, message: String) -> SprError {
        error!("Scheduling fault: {}", message);
        self.timer.cancel();
        self.state = PlaybackState::Paused;
        SprError::Scheduling(message)
    }
}
