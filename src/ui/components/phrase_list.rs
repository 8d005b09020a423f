use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use rust_i18n::t;

use crate::data::{Difficulty, PhraseItem};
use crate::engine::PhraseCriteria;
use crate::ui::layout::scroll_offset;
use crate::ui::theme::Theme;

pub fn difficulty_label(difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Beginner => t!("difficulty.beginner"),
        Difficulty::Intermediate => t!("difficulty.intermediate"),
        Difficulty::Advanced => t!("difficulty.advanced"),
    }
    .to_string()
}

/// Filter bar plus the phrases that pass it, with pick marks.
pub struct PhraseList<'a> {
    phrases: &'a [&'a PhraseItem],
    criteria: &'a PhraseCriteria,
    cursor: usize,
    title: String,
    theme: &'a Theme,
}

impl<'a> PhraseList<'a> {
    pub fn new(
        phrases: &'a [&'a PhraseItem],
        criteria: &'a PhraseCriteria,
        cursor: usize,
        title: String,
        theme: &'a Theme,
    ) -> Self {
        Self {
            phrases,
            criteria,
            cursor,
            title,
            theme,
        }
    }
}

impl Widget for PhraseList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let all = t!("phrases.all").to_string();
        let category = self.criteria.category.clone().unwrap_or_else(|| all.clone());
        let difficulty = self.criteria.difficulty.map(difficulty_label).unwrap_or(all);
        let filters = Line::from(vec![
            Span::styled(
                format!(" {}: ", t!("phrases.category")),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                category,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {}: ", t!("phrases.difficulty")),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                difficulty,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(filters).render(layout[0], buf);

        if self.phrases.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", t!("phrases.empty")),
                Style::default().fg(colors.warning()),
            )))
            .render(layout[1], buf);
            return;
        }

        let height = layout[1].height as usize;
        let offset = scroll_offset(self.cursor, height);
        let lines: Vec<Line> = self
            .phrases
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(idx, phrase)| {
                let picked = self.criteria.is_picked(&phrase.text);
                let is_cursor = idx == self.cursor;
                let mark = if picked { "[x]" } else { "[ ]" };
                let base = if is_cursor {
                    Style::default().bg(colors.selected_bg())
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {mark} "),
                        base.fg(if picked {
                            colors.accent()
                        } else {
                            colors.text_pending()
                        }),
                    ),
                    Span::styled(
                        phrase.text.clone(),
                        base.fg(colors.fg()).add_modifier(if is_cursor {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Span::styled(
                        format!("  {}", phrase.reading),
                        base.fg(colors.text_hint()),
                    ),
                    Span::styled(
                        format!("  {}", phrase.translation),
                        base.fg(colors.text_pending()),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines).render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(text: &str) -> PhraseItem {
        PhraseItem {
            text: text.to_string(),
            reading: "reading".to_string(),
            translation: "meaning".to_string(),
            category: "Greetings".to_string(),
            difficulty: Difficulty::Beginner,
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_picked_phrases_are_marked() {
        let theme = Theme::default();
        let a = phrase("abc");
        let b = phrase("def");
        let phrases = vec![&a, &b];
        let mut criteria = PhraseCriteria::default();
        criteria.toggle_phrase("def");

        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        PhraseList::new(&phrases, &criteria, 0, String::new(), &theme).render(area, &mut buf);
        assert!(row(&buf, 3).contains("[ ] abc"));
        assert!(row(&buf, 4).contains("[x] def"));
    }

    #[test]
    fn test_empty_filter_result_shows_notice() {
        let theme = Theme::default();
        let criteria = PhraseCriteria::default();
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        PhraseList::new(&[], &criteria, 0, String::new(), &theme).render(area, &mut buf);
        let text: String = (0..area.height).map(|y| row(&buf, y)).collect();
        assert!(text.contains(&t!("phrases.empty").to_string()));
    }
}
