use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use rust_i18n::t;

use crate::session::SessionStats;
use crate::ui::components::stats_panel::accuracy_color;
use crate::ui::theme::Theme;

/// Summary shown once the last item of a drill has been typed.
pub struct Results<'a> {
    pub stats: &'a SessionStats,
    pub item_count: usize,
    pub theme: &'a Theme,
}

impl<'a> Results<'a> {
    pub fn new(stats: &'a SessionStats, item_count: usize, theme: &'a Theme) -> Self {
        Self {
            stats,
            item_count,
            theme,
        }
    }
}

impl Widget for Results<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(t!("results.title").to_string())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            t!("results.items", count = self.item_count).to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let row = |label: String, value: String, style: Style| {
            Paragraph::new(Line::from(vec![
                Span::styled(format!("  {label:<10}"), Style::default().fg(colors.fg())),
                Span::styled(value, style),
            ]))
        };

        row(
            t!("stats.wpm").to_string(),
            format!("{:.0}", self.stats.wpm),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )
        .render(layout[1], buf);

        row(
            t!("stats.accuracy").to_string(),
            format!(
                "{:.1}%  ({}/{})",
                self.stats.accuracy, self.stats.correct, self.stats.total_events
            ),
            Style::default()
                .fg(accuracy_color(colors, self.stats.accuracy))
                .add_modifier(Modifier::BOLD),
        )
        .render(layout[2], buf);

        row(
            t!("stats.time").to_string(),
            format!("{:.1}s", self.stats.elapsed_secs),
            Style::default().fg(colors.fg()),
        )
        .render(layout[3], buf);

        row(
            t!("stats.incorrect").to_string(),
            self.stats.incorrect.to_string(),
            Style::default().fg(if self.stats.incorrect == 0 {
                colors.success()
            } else {
                colors.error()
            }),
        )
        .render(layout[4], buf);

        Paragraph::new(Line::from(Span::styled(
            t!("results.footer").to_string(),
            Style::default().fg(colors.accent()),
        )))
        .render(layout[6], buf);
    }
}
