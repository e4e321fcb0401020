use crate::engine::config::DisplayConfig;
use crate::engine::error::{Result, SprError};
use crate::playback::{PlaybackController, PlaybackState};
use crate::rendering::{CellRenderer, PivotSegments};
use crate::ui::input::CommandQueue;
use crate::ui::keymap::{help_scroll_step, InputEvent};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme::Theme;
use crate::ui::view::{
    help_max_scroll, progress_row, render_context, render_help_popup, render_placeholder,
    render_progress_bar, render_status_line, render_word_display, StatusInfo,
};
use log::{debug, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Style,
    widgets::Block,
    Terminal, TerminalOptions, Viewport,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Rows used by the inline viewport
const INLINE_HEIGHT: u16 = 5;

/// Longest wait between redraws while nothing is scheduled
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Why the event loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Finished,
}

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    // Dropped after the terminal so the screen is restored last
    _guard: TerminalGuard,
    theme: Theme,
    display: DisplayConfig,
    label: String,
    show_help: bool,
    help_scroll: u16,
    help_max: u16,
    message: Option<String>,
}

impl TuiManager {
    pub fn new(theme: Theme, display: DisplayConfig, label: String) -> Result<Self> {
        let guard = TerminalGuard::new(display.inline).map_err(terminal_error)?;

        let viewport = if display.inline {
            Viewport::Inline(INLINE_HEIGHT)
        } else {
            Viewport::Fullscreen
        };
        let backend = CrosstermBackend::new(io::stdout());
        let terminal =
            Terminal::with_options(backend, TerminalOptions { viewport }).map_err(terminal_error)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
            theme,
            display,
            label,
            show_help: false,
            help_scroll: 0,
            help_max: 0,
            message: None,
        })
    }

    /// Runs until the user quits, or until playback finishes when `auto_exit` is set.
    ///
    /// Each iteration redraws, waits for a queued command or the next emission
    /// deadline, applies the command and lets the controller emit.
    pub fn run(
        &mut self,
        controller: &mut PlaybackController<CellRenderer>,
        queue: &CommandQueue,
        auto_exit: bool,
    ) -> Result<ExitReason> {
        loop {
            self.render_frame(controller)?;

            if auto_exit && controller.state() == PlaybackState::Finished {
                debug!("Auto-exit after finish");
                return Ok(ExitReason::Finished);
            }

            let timeout = controller
                .time_until_next_emission(Instant::now())
                .map_or(IDLE_TICK, |remaining| remaining.min(IDLE_TICK));

            let event = queue.recv_timeout(timeout)?;
            if self.show_help {
                if let Some(step) = event.and_then(help_scroll_step) {
                    self.scroll_help(step);
                    continue;
                }
            }

            match event {
                Some(InputEvent::Quit) => return Ok(ExitReason::Quit),
                Some(InputEvent::Back) if self.show_help => self.show_help = false,
                Some(InputEvent::Back) => return Ok(ExitReason::Quit),
                Some(InputEvent::ToggleHelp) => {
                    self.show_help = !self.show_help;
                    self.help_scroll = 0;
                }
                Some(InputEvent::Playback(command)) => {
                    self.message = None;
                    if let Err(e) = controller.apply(command, Instant::now()) {
                        warn!("Command {:?} failed: {}", command, e);
                        self.message = Some(e.to_string());
                    }
                    if command.moves_cursor() && controller.state() != PlaybackState::Playing {
                        let frame = controller.current_frame();
                        controller.renderer_mut().preview(frame);
                    }
                }
                None => {}
            }

            if let Err(e) = controller.tick(Instant::now()) {
                self.message = Some(e.to_string());
            }
        }
    }

    fn scroll_help(&mut self, step: i32) {
        // Offsets past help_max would be clamped on draw but swallow key presses
        self.help_scroll = (self.help_scroll as i32 + step).clamp(0, self.help_max as i32) as u16;
    }

    pub fn render_frame(&mut self, controller: &mut PlaybackController<CellRenderer>) -> Result<()> {
        let theme = self.theme;
        let display = &self.display;
        let show_help = self.show_help;
        let help_scroll = self.help_scroll;
        let mut help_max = self.help_max;
        let message = self.message.as_deref();
        let label = self.label.as_str();

        self.terminal
            .draw(|frame| {
                let area = frame.area();
                frame.render_widget(
                    Block::default().style(Style::default().bg(theme.background)),
                    area,
                );
                if area.height == 0 || area.width == 0 {
                    return;
                }

                let status = StatusInfo {
                    state: controller.state(),
                    wpm: controller.base_wpm(),
                    rate: controller.rate_multiplier(),
                    label,
                    progress: controller.progress(),
                    message,
                };
                let status_row = area.bottom() - 1;
                frame.render_widget(render_status_line(&status, &theme), row(area, status_row));

                let renderer = controller.renderer_mut();
                renderer.update_terminal_size(area.width, area.height);
                let word_row = area.y + renderer.get_center_row().min(area.height - 1);

                match renderer.current_frame().cloned() {
                    Some(word) => {
                        let start_column = renderer.calculate_start_column(&word).unwrap_or(0);
                        let segments = PivotSegments::of(&word);
                        frame.render_widget(
                            render_word_display(&segments, start_column, &theme),
                            row(area, word_row),
                        );

                        if display.show_context && display.context_words > 0 {
                            let (before, after) =
                                controller.document().context(display.context_words);
                            let left = Rect::new(
                                area.x,
                                word_row,
                                start_column.saturating_sub(1),
                                1,
                            );
                            frame.render_widget(render_context(before, Alignment::Right, &theme), left);

                            let word_end = start_column
                                .saturating_add(UnicodeWidthStr::width(word.text.as_str()) as u16)
                                .saturating_add(1);
                            if word_end < area.width {
                                let right =
                                    Rect::new(area.x + word_end, word_row, area.width - word_end, 1);
                                frame.render_widget(
                                    render_context(after, Alignment::Left, &theme),
                                    right,
                                );
                            }
                        }
                    }
                    None => {
                        frame.render_widget(
                            render_placeholder(controller.state(), &theme),
                            row(area, word_row),
                        );
                    }
                }

                if display.show_progress_bar {
                    if let Some(bar_row) = progress_row(word_row, status_row) {
                        let width = (area.width / 3).max(1);
                        frame.render_widget(
                            render_progress_bar(controller.progress(), width, &theme),
                            row(area, bar_row),
                        );
                    }
                }

                if show_help {
                    help_max = help_max_scroll(area);
                    render_help_popup(frame, &theme, help_scroll);
                }
            })
            .map_err(terminal_error)?;
        self.help_max = help_max;
        self.help_scroll = self.help_scroll.min(help_max);
        Ok(())
    }
}

fn row(area: Rect, y: u16) -> Rect {
    Rect::new(area.x, y, area.width, 1)
}

fn terminal_error(err: io::Error) -> SprError {
    SprError::Terminal(err.to_string())
}
