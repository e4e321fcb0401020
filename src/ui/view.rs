use crate::playback::PlaybackState;
use crate::reading::Unit;
use crate::rendering::PivotSegments;
use crate::ui::keymap::KEY_HELP;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame as TuiFrame,
};

/// Everything the status line shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo<'a> {
    pub state: PlaybackState,
    pub wpm: u32,
    pub rate: f64,
    pub label: &'a str,
    pub progress: (usize, usize),
    pub message: Option<&'a str>,
}

/// The current unit, padded so the pivot cluster starts at `start_column`.
pub fn render_word_display(
    segments: &PivotSegments,
    start_column: u16,
    theme: &Theme,
) -> Paragraph<'static> {
    let text_style = Style::default().fg(theme.text);
    let anchor_style = Style::default()
        .fg(theme.anchor)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::raw(" ".repeat(start_column as usize)),
        Span::styled(segments.prefix.clone(), text_style),
        Span::styled(segments.pivot.clone(), anchor_style),
        Span::styled(segments.suffix.clone(), text_style),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Left)
        .style(Style::default().bg(theme.background))
}

/// Dimmed neighbouring units. Left context hugs the word from the right.
pub fn render_context(units: &[Unit], alignment: Alignment, theme: &Theme) -> Paragraph<'static> {
    let text = units
        .iter()
        .map(|unit| unit.text())
        .collect::<Vec<_>>()
        .join(" ");

    Paragraph::new(text)
        .alignment(alignment)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
}

pub fn render_progress_bar(progress: (usize, usize), width: u16, theme: &Theme) -> Line<'static> {
    let (current, total) = progress;
    let width = width as usize;
    let filled_len = if total == 0 {
        0
    } else {
        (current.min(total) * width) / total
    };
    let empty_len = width - filled_len;

    Line::from(vec![
        Span::styled("─".repeat(filled_len), Style::default().fg(theme.text)),
        Span::styled("─".repeat(empty_len), Style::default().fg(theme.dimmed)),
    ])
    .alignment(Alignment::Center)
}

pub fn render_status_line(status: &StatusInfo<'_>, theme: &Theme) -> Line<'static> {
    let (current, total) = status.progress;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", status.state.label()),
            Style::default()
                .fg(theme.background)
                .bg(theme.anchor)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} wpm  x{:.2}  {}/{}  {}",
                status.wpm, status.rate, current, total, status.label
            ),
            Style::default().fg(theme.dimmed),
        ),
    ];
    if let Some(message) = status.message {
        spans.push(Span::styled(
            format!("  {}", message),
            Style::default().fg(theme.anchor),
        ));
    }
    spans.push(Span::styled("  ? help", Style::default().fg(theme.dimmed)));
    Line::from(spans)
}

/// Shown on the word row while nothing has been emitted.
pub fn render_placeholder(state: PlaybackState, theme: &Theme) -> Paragraph<'static> {
    let text = match state {
        PlaybackState::Finished => "Finished. Press r to restart or q to quit",
        PlaybackState::Playing => "",
        PlaybackState::Stopped | PlaybackState::Paused => "Press Space to start",
    };
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
}

/// Row for the progress bar: two below the word, or one when space is short.
pub fn progress_row(word_row: u16, status_row: u16) -> Option<u16> {
    [word_row + 2, word_row + 1]
        .into_iter()
        .find(|&row| row < status_row)
}

/// Lines of the help popup, including the closing hint.
fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(theme.anchor)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = KEY_HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", key), key_style),
                Span::styled(*action, Style::default().fg(theme.text)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press ? or Esc to close",
        Style::default().fg(theme.dimmed),
    )));
    lines
}

fn help_popup_area(area: Rect) -> Rect {
    let popup_width = 44u16.min(area.width);
    let popup_height = (KEY_HELP.len() as u16 + 4).min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Largest useful scroll offset for the help popup in `area`.
pub fn help_max_scroll(area: Rect) -> u16 {
    let total_lines = KEY_HELP.len() as u16 + 2;
    // popup height minus the top and bottom border rows
    let inner_height = help_popup_area(area).height.saturating_sub(2);
    total_lines.saturating_sub(inner_height)
}

/// Centered key binding popup over the current frame.
///
/// `scroll` is clamped here because the visible height is only known at
/// draw time. A hint on the bottom border shows which way there is more.
pub fn render_help_popup(frame: &mut TuiFrame, theme: &Theme, scroll: u16) {
    let area = frame.area();
    let popup_area = help_popup_area(area);
    let max_scroll = help_max_scroll(area);
    let scroll = scroll.min(max_scroll);

    frame.render_widget(Clear, popup_area);

    let mut block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(theme.anchor)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.dimmed))
        .style(Style::default().bg(theme.background));

    if max_scroll > 0 {
        let hint = match (scroll > 0, scroll < max_scroll) {
            (false, _) => " ↓ j/k ",
            (true, true) => " ↑↓ j/k ",
            (true, false) => " ↑ j/k ",
        };
        block = block.title_bottom(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.dimmed),
        )));
    }

    frame.render_widget(
        Paragraph::new(help_lines(theme))
            .scroll((scroll, 0))
            .block(block),
        popup_area,
    );
}
