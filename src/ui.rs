use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use digitar::{Phase, Snapshot};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
/// Lines of reference text kept visible around the active word
const TEXT_LINES: u16 = 5;

/// Greedy word wrap: the word indices on each line for a given width.
/// A word wider than the line gets a line of its own.
pub fn wrap_words(words: &[String], width: usize) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = vec![];
    let mut current: Vec<usize> = vec![];
    let mut used = 0;

    for (idx, word) in words.iter().enumerate() {
        let w = word.width();
        let needed = if current.is_empty() { w } else { used + 1 + w };
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
            used = w;
        } else {
            used = needed;
        }
        current.push(idx);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// First line to show so the active word sits on the second visible line
pub fn scroll_offset(lines: &[Vec<usize>], active_word: Option<usize>) -> usize {
    active_word
        .and_then(|w| lines.iter().position(|l| l.contains(&w)))
        .map(|line| line.saturating_sub(1))
        .unwrap_or(0)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.session.snapshot();
        match snap.phase {
            Phase::Finished => render_results(&snap, area, buf),
            _ => render_typing(&snap, area, buf),
        }
    }
}

fn render_typing(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let padding = area.height.saturating_sub(TEXT_LINES + 6) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(1), // stats
            Constraint::Length(1),
            Constraint::Length(TEXT_LINES),
            Constraint::Length(1),
            Constraint::Length(1), // input
            Constraint::Length(1),
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    let stats = Paragraph::new(Span::styled(
        format!(
            "{}s   {} wpm   {} lpm   {}% acc",
            snap.remaining_secs, snap.metrics.wpm, snap.metrics.lpm, snap.metrics.accuracy
        ),
        dim_bold_style,
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    let width = chunks[3].width.max(1) as usize;
    let lines = wrap_words(snap.words, width);
    let first = scroll_offset(&lines, snap.active_word);
    let text: Vec<Line> = lines
        .iter()
        .skip(first)
        .take(TEXT_LINES as usize)
        .map(|line| {
            let mut spans = Vec::with_capacity(line.len() * 2);
            for (n, &idx) in line.iter().enumerate() {
                if n > 0 {
                    spans.push(Span::raw(" "));
                }
                let style = if idx < snap.cursor {
                    dim_bold_style
                } else if Some(idx) == snap.active_word {
                    Style::default()
                        .patch(bold_style)
                        .add_modifier(Modifier::UNDERLINED)
                } else {
                    bold_style
                };
                spans.push(Span::styled(snap.words[idx].as_str(), style));
            }
            Line::from(spans)
        })
        .collect();
    Paragraph::new(text).render(chunks[3], buf);

    let input_style = if snap.on_track {
        Style::default().patch(bold_style).fg(Color::Green)
    } else {
        Style::default().patch(bold_style).fg(Color::Red)
    };
    let input = match snap.phase {
        Phase::Paused => Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).patch(bold_style),
        ),
        Phase::Idle if snap.input.is_empty() => Span::styled("start typing...", italic_style),
        _ => Span::styled(format!("> {}", snap.input), input_style),
    };
    Paragraph::new(input).render(chunks[5], buf);

    let legend = match snap.phase {
        Phase::Idle => format!(
            "(tab) duration: {}s / (enter) start / (esc)ape",
            snap.duration_secs
        ),
        Phase::Paused => "(ctrl+p) resume / (ctrl+r) restart / (esc)ape".to_string(),
        _ => "(space) next word / (ctrl+p) pause / (ctrl+r) restart / (esc)ape".to_string(),
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[7], buf);
}

fn render_results(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // stats
            Constraint::Length(1), // word summary
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
            Constraint::Min(1),
        ])
        .split(area);

    let stats = Paragraph::new(Span::styled(
        format!(
            "{} wpm   {} lpm   {}% acc",
            snap.metrics.wpm, snap.metrics.lpm, snap.metrics.accuracy
        ),
        bold_style,
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    let summary = Paragraph::new(Span::styled(
        format!(
            "{} of {} words correct in {}s",
            snap.correct_words,
            snap.cursor,
            snap.duration_secs - snap.remaining_secs
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    summary.render(chunks[2], buf);

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (n)ew session / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[4], buf);
}
