use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use rust_i18n::t;

use crate::app::{App, AppScreen, PracticeMode};
use crate::ui::components::diagram_popup::DiagramPopup;
use crate::ui::components::kana_grid::KanaGrid;
use crate::ui::components::phrase_list::PhraseList;
use crate::ui::components::practice_area::PracticeArea;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::results::Results;
use crate::ui::components::stats_panel::{StatsPanel, compact_summary};
use crate::ui::layout::{self, AppLayout};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::ModeSelect => render_mode_select(frame, app),
        AppScreen::KanaSelect => render_kana_select(frame, app),
        AppScreen::PhraseSelect => render_phrase_select(frame, app),
        AppScreen::KanaPractice | AppScreen::PhrasePractice => render_practice(frame, app),
    }
}

fn header<'a>(title: String, info: String, theme: &Theme) -> Paragraph<'a> {
    let colors = &theme.colors;
    Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn footer<'a>(hints: String, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(theme.colors.text_pending()),
    )))
    .wrap(Wrap { trim: false })
}

fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn selection_summary(app: &App, mode: PracticeMode) -> String {
    let count = app.derived_items().len();
    if count == 0 {
        return format!(" | {}", t!("app.start_disabled"));
    }
    match mode {
        PracticeMode::Kana => format!(" | {}", t!("kana.selected", count = count)),
        PracticeMode::Phrases => format!(" | {}", t!("phrases.selected", count = count)),
    }
}

fn render_mode_select(frame: &mut Frame, app: &App) {
    let [top, body, bottom] = screen_chunks(frame.area());

    frame.render_widget(
        header(format!(" {} ", t!("app.title")), String::new(), app.theme),
        top,
    );

    let menu_area = layout::centered_rect(50, 60, body);
    frame.render_widget(&app.menu, menu_area);

    frame.render_widget(
        footer(t!("menu.footer", theme = app.config.theme).to_string(), app.theme),
        bottom,
    );
}

fn render_kana_select(frame: &mut Frame, app: &App) {
    let [top, body, bottom] = screen_chunks(frame.area());

    let mut info = selection_summary(app, PracticeMode::Kana);
    let hints = match app.kana_range.as_ref() {
        Some(range) => {
            let mode = if range.additive {
                t!("kana.range_add")
            } else {
                t!("kana.range")
            };
            info.push_str(&format!(" | {mode}"));
            t!("kana.range_footer")
        }
        None => t!("kana.footer"),
    };
    frame.render_widget(header(t!("kana.title").to_string(), info, app.theme), top);

    let grid = KanaGrid::new(
        &app.kana,
        &app.kana_criteria,
        app.kana_cursor,
        t!("kana.title").to_string(),
        app.theme,
    );
    frame.render_widget(grid, body);

    frame.render_widget(footer(hints.to_string(), app.theme), bottom);

    if let Some(view) = app.diagram.as_ref() {
        let popup_area = layout::centered_rect(40, 40, body);
        let popup = DiagramPopup::new(view, &app.config.stroke_diagram_dir, app.theme);
        frame.render_widget(popup, popup_area);
    }
}

fn render_phrase_select(frame: &mut Frame, app: &App) {
    let [top, body, bottom] = screen_chunks(frame.area());

    frame.render_widget(
        header(
            t!("phrases.title").to_string(),
            selection_summary(app, PracticeMode::Phrases),
            app.theme,
        ),
        top,
    );

    let visible = app.visible_phrases();
    let list = PhraseList::new(
        &visible,
        &app.phrase_criteria,
        app.phrase_cursor,
        t!("phrases.title").to_string(),
        app.theme,
    );
    frame.render_widget(list, body);

    frame.render_widget(footer(t!("phrases.footer").to_string(), app.theme), bottom);
}

fn render_practice(frame: &mut Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let area = frame.area();

    if let Some(stats) = app.last_stats.as_ref() {
        let centered = layout::centered_rect(50, 60, area);
        frame.render_widget(Results::new(stats, session.set().len(), app.theme), centered);
        return;
    }

    let app_layout = AppLayout::new(area);
    let now = Instant::now();
    let stats = session.live_stats(now);
    let title = match app.screen {
        AppScreen::PhrasePractice => t!("practice.phrase_title"),
        _ => t!("practice.kana_title"),
    }
    .to_string();
    let position = t!(
        "practice.position",
        current = session.index() + 1,
        total = session.set().len()
    );
    let info = if app_layout.tier.show_sidebar() {
        format!(" {position}")
    } else {
        format!(" {position} | {}", compact_summary(&stats))
    };
    frame.render_widget(header(title, info, app.theme), app_layout.header);

    let show_progress = app_layout.tier.show_progress_bar(area.height);
    let mut constraints = vec![Constraint::Min(8)];
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    frame.render_widget(
        PracticeArea::new(session, now, app.theme),
        main_layout[0],
    );

    if show_progress {
        let progress = ProgressBar::new(
            &t!("practice.progress"),
            session.answered(),
            session.set().len(),
            app.theme,
        );
        frame.render_widget(progress, main_layout[1]);
    }

    if let Some(sidebar) = app_layout.sidebar {
        frame.render_widget(StatsPanel::new(stats, app.theme), sidebar);
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            t!("practice.footer").to_string(),
            Style::default().fg(app.theme.colors.text_pending()),
        ))),
        app_layout.footer,
    );
}
