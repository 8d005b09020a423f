use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use rust_i18n::t;

use crate::app::DiagramView;
use crate::ui::theme::Theme;

/// Stroke-order popup over the kana chart. Terminals cannot draw the SVG,
/// so this shows the glyph, its stroke count and where the file came from.
pub struct DiagramPopup<'a> {
    view: &'a DiagramView,
    source_dir: &'a str,
    theme: &'a Theme,
}

impl<'a> DiagramPopup<'a> {
    pub fn new(view: &'a DiagramView, source_dir: &'a str, theme: &'a Theme) -> Self {
        Self {
            view,
            source_dir,
            theme,
        }
    }
}

impl Widget for DiagramPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let kana = match self.view {
            DiagramView::Found(diagram) => diagram.character.as_str(),
            DiagramView::Missing(kana) => kana.as_str(),
        };
        let block = Block::bordered()
            .title(t!("diagram.title", kana = kana).to_string())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                kana,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        match self.view {
            DiagramView::Found(diagram) => lines.push(Line::from(Span::styled(
                t!("diagram.strokes", count = diagram.stroke_count()).to_string(),
                Style::default().fg(colors.fg()),
            ))),
            DiagramView::Missing(_) => lines.push(Line::from(Span::styled(
                t!("diagram.missing", kana = kana, dir = self.source_dir).to_string(),
                Style::default().fg(colors.warning()),
            ))),
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            t!("diagram.footer").to_string(),
            Style::default().fg(colors.text_pending()),
        )));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
