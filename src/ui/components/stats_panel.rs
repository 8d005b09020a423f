use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use rust_i18n::t;

use crate::session::SessionStats;
use crate::ui::theme::{Theme, ThemeColors};

/// Live drill figures shown beside the practice area.
pub struct StatsPanel<'a> {
    stats: SessionStats,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: SessionStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

pub fn accuracy_color(colors: &ThemeColors, accuracy: f64) -> Color {
    if accuracy >= 95.0 {
        colors.success()
    } else if accuracy >= 85.0 {
        colors.warning()
    } else {
        colors.error()
    }
}

/// One-line summary for narrow terminals.
pub fn compact_summary(stats: &SessionStats) -> String {
    format!(
        "{}: {:.0} | {}: {:.1}% | {}: {}",
        t!("stats.wpm"),
        stats.wpm,
        t!("stats.accuracy"),
        stats.accuracy,
        t!("stats.incorrect"),
        stats.incorrect
    )
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let stats = self.stats;

        let label = |key: String| Span::styled(format!("{key}: "), Style::default().fg(colors.fg()));

        let lines = vec![
            Line::from(vec![
                label(t!("stats.wpm").to_string()),
                Span::styled(format!("{:.0}", stats.wpm), Style::default().fg(colors.accent())),
            ]),
            Line::from(""),
            Line::from(vec![
                label(t!("stats.accuracy").to_string()),
                Span::styled(
                    format!("{:.1}%", stats.accuracy),
                    Style::default().fg(accuracy_color(colors, stats.accuracy)),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label(t!("stats.correct").to_string()),
                Span::styled(stats.correct.to_string(), Style::default().fg(colors.success())),
            ]),
            Line::from(vec![
                label(t!("stats.incorrect").to_string()),
                Span::styled(stats.incorrect.to_string(), Style::default().fg(colors.error())),
            ]),
            Line::from(""),
            Line::from(vec![
                label(t!("stats.time").to_string()),
                Span::styled(
                    format!("{:.1}s", stats.elapsed_secs),
                    Style::default().fg(colors.fg()),
                ),
            ]),
        ];

        let block = Block::bordered()
            .title(t!("stats.title").to_string())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_color_bands() {
        let colors = ThemeColors::default();
        assert_eq!(accuracy_color(&colors, 100.0), colors.success());
        assert_eq!(accuracy_color(&colors, 90.0), colors.warning());
        assert_eq!(accuracy_color(&colors, 50.0), colors.error());
    }

    #[test]
    fn test_compact_summary() {
        let stats = SessionStats::compute(3, 1, 60.0);
        let text = compact_summary(&stats);
        assert!(text.contains("75.0%"));
        assert!(text.ends_with(": 1"));
    }
}
