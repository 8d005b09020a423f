use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::data::kana::ROW_WIDTH;
use crate::data::{KanaItem, KanaTable};
use crate::engine::KanaCriteria;
use crate::ui::layout::scroll_offset;
use crate::ui::theme::Theme;

const CELL_WIDTH: usize = 6;
const LABEL_WIDTH: usize = 6;

/// Hiragana chart, one line per row, with selection marks and a cursor.
pub struct KanaGrid<'a> {
    table: &'a KanaTable,
    criteria: &'a KanaCriteria,
    cursor: usize,
    title: String,
    theme: &'a Theme,
}

impl<'a> KanaGrid<'a> {
    pub fn new(
        table: &'a KanaTable,
        criteria: &'a KanaCriteria,
        cursor: usize,
        title: String,
        theme: &'a Theme,
    ) -> Self {
        Self {
            table,
            criteria,
            cursor,
            title,
            theme,
        }
    }
}

/// Whether `item` ends up in the drill built from `criteria`.
/// Individual picks override rows; with neither, everything is in.
pub fn is_effectively_selected(criteria: &KanaCriteria, item: &KanaItem) -> bool {
    if !criteria.chars.is_empty() {
        criteria.is_char_selected(&item.text)
    } else if !criteria.rows.is_empty() {
        criteria.is_row_selected(item.group)
    } else {
        true
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let used = Span::raw(text).width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

impl Widget for KanaGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let cursor_group = self
            .table
            .items()
            .get(self.cursor)
            .map(|k| k.group)
            .unwrap_or(0);
        let offset = scroll_offset(cursor_group, inner.height as usize);

        let mut lines: Vec<Line> = Vec::new();
        for (group, label) in self.table.rows().iter().enumerate().skip(offset) {
            let row_selected = self.criteria.is_row_selected(group);
            let marker = if row_selected { "\u{25cf}" } else { "\u{25cb}" };
            let mut spans = vec![
                Span::styled(
                    format!(" {marker} "),
                    Style::default().fg(if row_selected {
                        colors.accent()
                    } else {
                        colors.text_pending()
                    }),
                ),
                Span::styled(
                    pad_to(label, LABEL_WIDTH),
                    Style::default().fg(colors.text_hint()),
                ),
            ];

            let mut column = 0;
            for (idx, item) in self
                .table
                .items()
                .iter()
                .enumerate()
                .filter(|(_, k)| k.group == group)
            {
                // Gaps (や行, わ行) keep their vowel column.
                while column < item.position {
                    spans.push(Span::raw(" ".repeat(CELL_WIDTH)));
                    column += 1;
                }

                let mut style = if self.criteria.is_char_selected(&item.text) {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else if is_effectively_selected(self.criteria, item) {
                    Style::default().fg(colors.fg())
                } else {
                    Style::default().fg(colors.text_pending())
                };
                if idx == self.cursor {
                    style = style.bg(colors.selected_bg()).add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(pad_to(&format!(" {}", item.text), CELL_WIDTH), style));
                column += 1;
            }
            while column < ROW_WIDTH {
                spans.push(Span::raw(" ".repeat(CELL_WIDTH)));
                column += 1;
            }

            lines.push(Line::from(spans));
            if lines.len() >= inner.height as usize {
                break;
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
