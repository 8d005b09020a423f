use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use rust_i18n::t;

use crate::session::PracticeSession;
use crate::ui::theme::Theme;

/// Target item, its hints, and the learner's input.
pub struct PracticeArea<'a> {
    session: &'a PracticeSession,
    now: Instant,
    theme: &'a Theme,
}

impl<'a> PracticeArea<'a> {
    pub fn new(session: &'a PracticeSession, now: Instant, theme: &'a Theme) -> Self {
        Self {
            session,
            now,
            theme,
        }
    }
}

/// Per-character match of `input` against the same position in `expected`.
fn char_matches(input: &str, expected: &str) -> Vec<(char, bool)> {
    let mut expected = expected.chars();
    input
        .chars()
        .map(|ch| (ch, expected.next() == Some(ch)))
        .collect()
}

impl Widget for PracticeArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(item) = self.session.current_item() else {
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            item.display_text(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[1], buf);

        let mut hint = vec![
            Span::styled(
                format!("{}: ", t!("practice.reading")),
                Style::default().fg(colors.text_pending()),
            ),
            Span::styled(item.target_hint(), Style::default().fg(colors.text_hint())),
        ];
        if let Some(translation) = item.translation() {
            hint.push(Span::styled(
                format!("   {}: ", t!("practice.meaning")),
                Style::default().fg(colors.text_pending()),
            ));
            hint.push(Span::styled(translation, Style::default().fg(colors.fg())));
        }
        Paragraph::new(Line::from(hint))
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        let mut typed: Vec<Span> = char_matches(self.session.input(), item.expected_input())
            .into_iter()
            .map(|(ch, ok)| {
                let style = if ok {
                    Style::default().fg(colors.text_correct())
                } else {
                    Style::default()
                        .fg(colors.text_incorrect())
                        .add_modifier(Modifier::UNDERLINED)
                };
                Span::styled(ch.to_string(), style)
            })
            .collect();
        if self.session.accepts_input() {
            typed.push(Span::styled("\u{2581}", Style::default().fg(colors.accent_dim())));
        }
        let input_border = if self.session.is_awaiting_advance() {
            colors.success()
        } else {
            colors.border_focused()
        };
        let input_area = centered_columns(layout[3], 40);
        Paragraph::new(Line::from(typed))
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(input_border)))
            .render(input_area, buf);

        let feedback = match self.session.advance_remaining(self.now) {
            Some(remaining) => vec![
                Span::styled(
                    t!("practice.correct").to_string(),
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  {}",
                        t!(
                            "practice.next_in",
                            secs = format!("{:.1}", remaining.as_secs_f64())
                        )
                    ),
                    Style::default().fg(colors.text_pending()),
                ),
            ],
            None => vec![Span::styled(
                t!("practice.prompt").to_string(),
                Style::default().fg(colors.text_pending()),
            )],
        };
        Paragraph::new(Line::from(feedback))
            .alignment(Alignment::Center)
            .render(layout[4], buf);
    }
}

fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
