use std::time::Instant;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::data::{KanaItem, KanaTable, PhraseItem, PhraseTable};
use crate::diagram::{self, DirDiagramSource, StrokeDiagram, StrokeDiagramSource};
use crate::engine::selection::{kana_in_rect, select_kana_set, select_phrase_set};
use crate::engine::{
    KANA_RANDOM_SAMPLE, KanaCriteria, PHRASE_RANDOM_SAMPLE, PhraseCriteria, PracticeItem,
    PracticeOrder, PracticeSet,
};
use crate::session::{Advance, InputOutcome, PracticeSession, SessionStats};
use crate::speech::{self, SharedSpeaker, Speaker};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    ModeSelect,
    KanaSelect,
    PhraseSelect,
    KanaPractice,
    PhrasePractice,
}

impl AppScreen {
    pub fn practice_mode(self) -> Option<PracticeMode> {
        match self {
            AppScreen::KanaSelect | AppScreen::KanaPractice => Some(PracticeMode::Kana),
            AppScreen::PhraseSelect | AppScreen::PhrasePractice => Some(PracticeMode::Phrases),
            AppScreen::ModeSelect => None,
        }
    }

    pub fn is_practice(self) -> bool {
        matches!(self, AppScreen::KanaPractice | AppScreen::PhrasePractice)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeMode {
    Kana,
    Phrases,
}

impl PracticeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PracticeMode::Kana => "kana",
            PracticeMode::Phrases => "phrases",
        }
    }

    pub fn select_screen(self) -> AppScreen {
        match self {
            PracticeMode::Kana => AppScreen::KanaSelect,
            PracticeMode::Phrases => AppScreen::PhraseSelect,
        }
    }

    pub fn practice_screen(self) -> AppScreen {
        match self {
            PracticeMode::Kana => AppScreen::KanaPractice,
            PracticeMode::Phrases => AppScreen::PhrasePractice,
        }
    }

    pub fn sample_size(self) -> usize {
        match self {
            PracticeMode::Kana => KANA_RANDOM_SAMPLE,
            PracticeMode::Phrases => PHRASE_RANDOM_SAMPLE,
        }
    }
}

/// Stroke diagram popup contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagramView {
    Found(StrokeDiagram),
    Missing(String),
}

/// A rectangle selection on the kana grid, anchored where it started and
/// stretched by the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KanaRange {
    pub anchor: usize,
    pub additive: bool,
    base: Vec<String>,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub kana: KanaTable,
    pub phrases: PhraseTable,
    pub kana_criteria: KanaCriteria,
    pub kana_cursor: usize,
    pub kana_range: Option<KanaRange>,
    pub phrase_criteria: PhraseCriteria,
    pub phrase_cursor: usize,
    pub session: Option<PracticeSession>,
    pub last_stats: Option<SessionStats>,
    pub diagram: Option<DiagramView>,
    pub should_quit: bool,
    diagrams: Box<dyn StrokeDiagramSource>,
    speaker: SharedSpeaker,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let speaker = speech::from_config(config.speech_enabled, &config.speech_command);
        let diagrams = Box::new(DirDiagramSource::new(&config.stroke_diagram_dir));
        Self::with_collaborators(config, speaker, diagrams)
    }

    pub fn with_collaborators(
        config: Config,
        speaker: Box<dyn Speaker>,
        diagrams: Box<dyn StrokeDiagramSource>,
    ) -> Result<Self> {
        let kana = KanaTable::load()?;
        let phrases = PhraseTable::load()?;
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        Ok(Self {
            screen: AppScreen::ModeSelect,
            config,
            theme,
            menu,
            kana,
            phrases,
            kana_criteria: KanaCriteria::default(),
            kana_cursor: 0,
            kana_range: None,
            phrase_criteria: PhraseCriteria::default(),
            phrase_cursor: 0,
            session: None,
            last_stats: None,
            diagram: None,
            should_quit: false,
            diagrams,
            speaker: SharedSpeaker::new(speaker),
            rng: SmallRng::from_entropy(),
        })
    }

    pub fn select_mode(&mut self, mode: PracticeMode) {
        if self.screen != AppScreen::ModeSelect {
            return;
        }
        self.kana_criteria = KanaCriteria::default();
        self.kana_cursor = 0;
        self.kana_range = None;
        self.phrase_criteria = PhraseCriteria::default();
        self.phrase_cursor = 0;
        self.screen = mode.select_screen();
        tracing::debug!(mode = mode.as_str(), "mode selected");
    }

    /// Return to mode selection, discarding any drill in progress.
    pub fn go_back(&mut self) {
        self.screen = AppScreen::ModeSelect;
        self.session = None;
        self.last_stats = None;
        self.diagram = None;
        self.kana_range = None;
        self.kana_criteria = KanaCriteria::default();
        self.phrase_criteria = PhraseCriteria::default();
    }

    /// Items the current selection screen would start a drill with.
    pub fn derived_items(&self) -> Vec<PracticeItem> {
        match self.screen {
            AppScreen::KanaSelect => select_kana_set(self.kana.items(), &self.kana_criteria),
            AppScreen::PhraseSelect => {
                select_phrase_set(self.phrases.items(), &self.phrase_criteria)
            }
            _ => Vec::new(),
        }
    }

    pub fn can_start(&self) -> bool {
        !self.derived_items().is_empty()
    }

    /// Start a drill from the current selection. Returns false (and stays
    /// put) when there is nothing to practice.
    pub fn start_practice(&mut self, order: PracticeOrder) -> bool {
        let Some(mode) = self.screen.practice_mode() else {
            return false;
        };
        if self.screen.is_practice() {
            return false;
        }
        let items = self.derived_items();
        self.start_with_items(mode, items, order)
    }

    /// Start a drill over `items`, sampled when `order` is random.
    pub fn start_with_items(
        &mut self,
        mode: PracticeMode,
        items: Vec<PracticeItem>,
        order: PracticeOrder,
    ) -> bool {
        if items.is_empty() {
            tracing::debug!(mode = mode.as_str(), "start ignored: empty selection");
            return false;
        }
        let set = PracticeSet::build(items, order, mode.sample_size(), &mut self.rng);
        let len = set.len();
        match PracticeSession::new(set, Box::new(self.speaker.clone())) {
            Ok(session) => {
                self.session = Some(session);
                self.last_stats = None;
                self.diagram = None;
                self.screen = mode.practice_screen();
                tracing::info!(
                    mode = mode.as_str(),
                    order = order.as_str(),
                    items = len,
                    "practice started"
                );
                true
            }
            Err(err) => {
                tracing::debug!(%err, "practice not started");
                false
            }
        }
    }

    pub fn type_char(&mut self, ch: char, now: Instant) -> Option<InputOutcome> {
        let session = self.session.as_mut()?;
        let mut text = session.input().to_string();
        text.push(ch);
        Some(session.update_input(&text, now))
    }

    pub fn paste(&mut self, pasted: &str, now: Instant) -> Option<InputOutcome> {
        let session = self.session.as_mut()?;
        let text = format!("{}{pasted}", session.input());
        Some(session.update_input(&text, now))
    }

    pub fn backspace(&mut self, now: Instant) -> Option<InputOutcome> {
        let session = self.session.as_mut()?;
        let mut text = session.input().to_string();
        // Nothing to delete is not an edit.
        text.pop()?;
        Some(session.update_input(&text, now))
    }

    pub fn restart_practice(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset();
            self.last_stats = None;
            tracing::debug!("practice restarted");
        }
    }

    /// Drive the delayed advance of the live drill.
    pub fn tick(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.tick(now) {
            Some(Advance::Completed(stats)) => self.on_complete(stats),
            Some(Advance::Next(index)) => tracing::debug!(index, "next item"),
            None => {}
        }
    }

    fn on_complete(&mut self, stats: SessionStats) {
        tracing::info!(
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            elapsed_secs = stats.elapsed_secs,
            "drill complete"
        );
        self.last_stats = Some(stats);
    }

    pub fn cursor_kana(&self) -> Option<&KanaItem> {
        self.kana.items().get(self.kana_cursor)
    }

    pub fn kana_move_horizontal(&mut self, delta: isize) {
        let len = self.kana.items().len();
        if len == 0 {
            return;
        }
        let next = self.kana_cursor as isize + delta;
        self.kana_cursor = next.clamp(0, len as isize - 1) as usize;
        self.stretch_kana_range();
    }

    /// Jump to the neighbouring row, landing on the closest column.
    pub fn kana_move_vertical(&mut self, delta: isize) {
        let Some(current) = self.cursor_kana() else {
            return;
        };
        let target_group = current.group as isize + delta;
        if target_group < 0 || target_group >= self.kana.row_count() as isize {
            return;
        }
        let position = current.position as isize;
        let best = self
            .kana
            .items()
            .iter()
            .enumerate()
            .filter(|(_, k)| k.group as isize == target_group)
            .min_by_key(|(_, k)| (k.position as isize - position).abs())
            .map(|(idx, _)| idx);
        if let Some(idx) = best {
            self.kana_cursor = idx;
            self.stretch_kana_range();
        }
    }

    pub fn kana_toggle_char(&mut self) {
        if let Some(text) = self.cursor_kana().map(|k| k.text.clone()) {
            self.kana_criteria.toggle_char(&text);
        }
    }

    pub fn kana_toggle_row(&mut self) {
        if let Some(group) = self.cursor_kana().map(|k| k.group) {
            self.kana_criteria.toggle_row(group);
        }
    }

    pub fn kana_select_all(&mut self) {
        self.kana_criteria.select_all(&self.kana);
    }

    pub fn kana_select_none(&mut self) {
        self.kana_criteria.select_none();
    }

    /// Anchor a rectangle selection at the cursor. The rectangle replaces the
    /// individual picks, or adds to them when `additive`.
    pub fn kana_begin_range(&mut self, additive: bool) {
        if self.screen != AppScreen::KanaSelect {
            return;
        }
        self.kana_range = Some(KanaRange {
            anchor: self.kana_cursor,
            additive,
            base: self.kana_criteria.chars.clone(),
        });
        self.stretch_kana_range();
    }

    fn stretch_kana_range(&mut self) {
        let Some(range) = self.kana_range.as_ref() else {
            return;
        };
        let items = self.kana.items();
        let (Some(anchor), Some(cursor)) = (items.get(range.anchor), items.get(self.kana_cursor))
        else {
            return;
        };
        let chosen = kana_in_rect(items, anchor, cursor);
        self.kana_criteria
            .apply_range(&range.base, &chosen, range.additive);
    }

    pub fn kana_commit_range(&mut self) {
        if let Some(range) = self.kana_range.take() {
            tracing::debug!(
                additive = range.additive,
                picked = self.kana_criteria.chars.len(),
                "range selected"
            );
        }
    }

    /// Drop the rectangle and restore the picks it started from.
    pub fn kana_cancel_range(&mut self) {
        if let Some(range) = self.kana_range.take() {
            self.kana_criteria.chars = range.base;
        }
    }

    /// Phrases passing the category and difficulty filters, in table order.
    pub fn visible_phrases(&self) -> Vec<&PhraseItem> {
        let filters = PhraseCriteria {
            category: self.phrase_criteria.category.clone(),
            difficulty: self.phrase_criteria.difficulty,
            picked: Vec::new(),
        };
        self.phrases
            .items()
            .iter()
            .filter(|p| filters.matches(p))
            .collect()
    }

    pub fn cursor_phrase(&self) -> Option<&PhraseItem> {
        self.visible_phrases().get(self.phrase_cursor).copied()
    }

    pub fn phrase_move(&mut self, delta: isize) {
        let len = self.visible_phrases().len();
        if len == 0 {
            self.phrase_cursor = 0;
            return;
        }
        let next = self.phrase_cursor as isize + delta;
        self.phrase_cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn phrase_toggle(&mut self) {
        if let Some(text) = self.cursor_phrase().map(|p| p.text.clone()) {
            self.phrase_criteria.toggle_phrase(&text);
        }
    }

    pub fn phrase_cycle_category(&mut self) {
        self.phrase_criteria.cycle_category(&self.phrases);
        self.phrase_move(0);
    }

    pub fn phrase_cycle_difficulty(&mut self) {
        self.phrase_criteria.cycle_difficulty();
        self.phrase_move(0);
    }

    pub fn phrase_select_all_filtered(&mut self) {
        self.phrase_criteria.select_all_filtered(&self.phrases);
    }

    pub fn phrase_clear_picks(&mut self) {
        self.phrase_criteria.clear_picks();
    }

    /// Pronounce the entry under the cursor on a selection screen.
    pub fn speak_at_cursor(&mut self) {
        let text = match self.screen {
            AppScreen::KanaSelect => self.cursor_kana().map(|k| k.text.clone()),
            AppScreen::PhraseSelect => self.cursor_phrase().map(|p| p.text.clone()),
            _ => None,
        };
        if let Some(text) = text {
            if let Err(err) = self.speaker.speak(&text) {
                tracing::warn!(%err, %text, "pronunciation playback failed");
            }
        }
    }

    /// Open the stroke diagram for the kana under the cursor. Only basic
    /// hiragana have diagrams; returns false for anything else.
    pub fn show_stroke_diagram(&mut self) -> bool {
        if self.screen != AppScreen::KanaSelect {
            return false;
        }
        let Some(text) = self.cursor_kana().map(|k| k.text.clone()) else {
            return false;
        };
        if !diagram::has_stroke_data(&text) {
            return false;
        }
        self.diagram = Some(match self.diagrams.fetch_stroke_diagram(&text) {
            Some(found) => DiagramView::Found(found),
            None => DiagramView::Missing(text),
        });
        true
    }

    pub fn close_stroke_diagram(&mut self) {
        self.diagram = None;
    }

    pub fn cycle_theme(&mut self) {
        let Some(name) = Theme::next_name(&self.config.theme) else {
            return;
        };
        if let Some(new_theme) = Theme::load(&name) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
            self.config.theme = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::data::Difficulty;
    use crate::session::{ADVANCE_DELAY, SessionPhase};
    use crate::speech::{NullSpeaker, SpeechError};

    struct FakeDiagrams;

    impl StrokeDiagramSource for FakeDiagrams {
        fn fetch_stroke_diagram(&self, character: &str) -> Option<StrokeDiagram> {
            (character == "あ").then(|| StrokeDiagram {
                character: character.to_string(),
                markup: "<svg><path/><path/><path/></svg>".to_string(),
            })
        }
    }

    fn test_app() -> App {
        App::with_collaborators(
            Config::default(),
            Box::new(NullSpeaker),
            Box::new(FakeDiagrams),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_on_mode_select() {
        let app = test_app();
        assert_eq!(app.screen, AppScreen::ModeSelect);
        assert!(app.session.is_none());
        assert!(!app.can_start());
    }

    #[test]
    fn test_mode_select_and_back() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        assert_eq!(app.screen, AppScreen::KanaSelect);
        app.kana_toggle_row();
        app.go_back();
        assert_eq!(app.screen, AppScreen::ModeSelect);

        app.select_mode(PracticeMode::Phrases);
        assert_eq!(app.screen, AppScreen::PhraseSelect);
        // Criteria are rebuilt on every visit.
        assert!(!app.kana_criteria.has_selection());
    }

    #[test]
    fn test_select_mode_only_from_mode_select() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.select_mode(PracticeMode::Phrases);
        assert_eq!(app.screen, AppScreen::KanaSelect);
    }

    #[test]
    fn test_sequential_kana_start_uses_selection() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.kana_toggle_row(); // row of あ
        assert!(app.start_practice(PracticeOrder::Sequential));
        assert_eq!(app.screen, AppScreen::KanaPractice);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.set().len(), 5);
        assert_eq!(session.current_item().unwrap().display_text(), "あ");
    }

    #[test]
    fn test_random_start_caps_sample() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        assert!(app.start_practice(PracticeOrder::Random));
        assert_eq!(app.session.as_ref().unwrap().set().len(), KANA_RANDOM_SAMPLE);

        app.go_back();
        app.select_mode(PracticeMode::Phrases);
        assert!(app.start_practice(PracticeOrder::Random));
        assert_eq!(app.screen, AppScreen::PhrasePractice);
        assert_eq!(app.session.as_ref().unwrap().set().len(), PHRASE_RANDOM_SAMPLE);
    }

    #[test]
    fn test_empty_selection_cannot_start() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Phrases);
        app.phrase_cycle_category(); // Greetings
        app.phrase_criteria.difficulty = Some(Difficulty::Advanced);
        assert!(!app.can_start());
        assert!(!app.start_practice(PracticeOrder::Sequential));
        assert!(!app.start_practice(PracticeOrder::Random));
        assert_eq!(app.screen, AppScreen::PhraseSelect);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_typing_through_a_drill() {
        let t0 = Instant::now();
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.kana_toggle_char(); // あ
        app.kana_move_horizontal(1);
        app.kana_toggle_char(); // い
        assert!(app.start_practice(PracticeOrder::Sequential));

        assert_eq!(app.type_char('x', t0), Some(InputOutcome::Incorrect));
        assert_eq!(app.backspace(t0), Some(InputOutcome::Cleared));
        assert_eq!(app.backspace(t0), None);
        assert_eq!(app.type_char('あ', t0), Some(InputOutcome::Correct));
        app.tick(t0 + ADVANCE_DELAY);
        assert_eq!(app.paste("い", t0 + ADVANCE_DELAY), Some(InputOutcome::Correct));
        assert!(app.last_stats.is_none());
        app.tick(t0 + ADVANCE_DELAY * 2);

        let stats = app.last_stats.unwrap();
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(app.session.as_ref().unwrap().phase(), SessionPhase::Completed);
    }

    #[test]
    fn test_back_during_dwell_discards_pending_advance() {
        let t0 = Instant::now();
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.start_practice(PracticeOrder::Sequential);
        app.type_char('あ', t0);
        app.go_back();
        app.tick(t0 + Duration::from_secs(5));
        assert!(app.session.is_none());
        assert!(app.last_stats.is_none());

        // A fresh drill is not touched by the old timer.
        app.select_mode(PracticeMode::Kana);
        app.start_practice(PracticeOrder::Sequential);
        app.tick(t0 + Duration::from_secs(10));
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.index(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_restart_keeps_practice_set() {
        let t0 = Instant::now();
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.start_practice(PracticeOrder::Random);
        let before: Vec<String> = app
            .session
            .as_ref()
            .unwrap()
            .set()
            .items()
            .iter()
            .map(|i| i.display_text().to_string())
            .collect();
        app.type_char('x', t0);
        app.restart_practice();
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.incorrect_count(), 0);
        let after: Vec<String> = session
            .set()
            .items()
            .iter()
            .map(|i| i.display_text().to_string())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_start_with_items_bypasses_selection() {
        let mut app = test_app();
        let items: Vec<PracticeItem> = app.phrases.items()[..3]
            .iter()
            .cloned()
            .map(PracticeItem::from)
            .collect();
        assert!(app.start_with_items(PracticeMode::Phrases, items, PracticeOrder::Sequential));
        assert_eq!(app.screen, AppScreen::PhrasePractice);
        assert_eq!(app.session.as_ref().unwrap().set().len(), 3);
        assert!(!app.start_with_items(PracticeMode::Kana, Vec::new(), PracticeOrder::Random));
    }

    #[test]
    fn test_input_ignored_outside_practice() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        assert_eq!(app.type_char('あ', Instant::now()), None);
    }

    #[test]
    fn test_kana_vertical_navigation_picks_nearest_column() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        // ら行 row 8, column 2 is る; row 9 only has columns 0, 2, 4.
        app.kana_cursor = app.kana.items().iter().position(|k| k.text == "る").unwrap();
        app.kana_move_vertical(1);
        assert_eq!(app.cursor_kana().unwrap().text, "を");
        app.kana_move_vertical(-2);
        assert_eq!(app.cursor_kana().unwrap().text, "ゆ");
        // Top row stays put.
        app.kana_cursor = 0;
        app.kana_move_vertical(-1);
        assert_eq!(app.kana_cursor, 0);
    }

    #[test]
    fn test_kana_range_replaces_picks() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.kana_toggle_char(); // あ, dropped by a replacing range
        app.kana_move_horizontal(6); // き
        app.kana_begin_range(false);
        assert_eq!(app.kana_criteria.chars, vec!["き"]);
        app.kana_move_vertical(1); // し
        app.kana_move_horizontal(1); // す
        assert_eq!(app.kana_criteria.chars, vec!["き", "く", "し", "す"]);
        app.kana_commit_range();
        assert!(app.kana_range.is_none());

        let texts: Vec<String> = app
            .derived_items()
            .iter()
            .map(|i| i.display_text().to_string())
            .collect();
        assert_eq!(texts, vec!["き", "く", "し", "す"]);
    }

    #[test]
    fn test_kana_range_adds_and_shrinks() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.kana_toggle_char(); // あ
        app.kana_move_vertical(1); // か
        app.kana_begin_range(true);
        app.kana_move_horizontal(2); // く
        assert_eq!(app.kana_criteria.chars, vec!["あ", "か", "き", "く"]);
        // Moving back toward the anchor shrinks the rectangle.
        app.kana_move_horizontal(-1);
        assert_eq!(app.kana_criteria.chars, vec!["あ", "か", "き"]);
        app.kana_cancel_range();
        assert_eq!(app.kana_criteria.chars, vec!["あ"]);
    }

    #[test]
    fn test_kana_range_cleared_on_back() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.kana_begin_range(false);
        app.go_back();
        assert!(app.kana_range.is_none());
        app.kana_begin_range(false);
        assert!(app.kana_range.is_none());
    }

    #[test]
    fn test_kana_horizontal_navigation_clamps() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        app.kana_move_horizontal(-1);
        assert_eq!(app.kana_cursor, 0);
        app.kana_move_horizontal(1000);
        assert_eq!(app.kana_cursor, app.kana.items().len() - 1);
    }

    #[test]
    fn test_phrase_cursor_follows_filters() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Phrases);
        app.phrase_move(50);
        assert_eq!(app.phrase_cursor, 50);
        app.phrase_cycle_category(); // Greetings, 9 entries
        assert_eq!(app.phrase_cursor, 8);
        app.phrase_toggle();
        assert!(app.phrase_criteria.is_picked(&app.visible_phrases()[8].text));
        let items = app.derived_items();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_stroke_diagram_only_for_basic_hiragana() {
        let mut app = test_app();
        app.select_mode(PracticeMode::Kana);
        assert!(app.show_stroke_diagram());
        match app.diagram.as_ref().unwrap() {
            DiagramView::Found(d) => assert_eq!(d.stroke_count(), 3),
            DiagramView::Missing(_) => panic!("expected diagram"),
        }
        app.close_stroke_diagram();

        app.kana_move_horizontal(1); // い, source has nothing
        assert!(app.show_stroke_diagram());
        assert_eq!(app.diagram, Some(DiagramView::Missing("い".to_string())));

        app.kana_cursor = app.kana.items().iter().position(|k| k.text == "が").unwrap();
        app.close_stroke_diagram();
        assert!(!app.show_stroke_diagram());
        assert!(app.diagram.is_none());
    }

    /// Logs each utterance and the one it cut off.
    struct Voice {
        log: Rc<RefCell<Vec<String>>>,
        playing: Option<String>,
    }

    impl Speaker for Voice {
        fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
            if let Some(previous) = self.playing.take() {
                self.log.borrow_mut().push(format!("cancel {previous}"));
            }
            self.log.borrow_mut().push(text.to_string());
            self.playing = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_drill_speech_cuts_off_selection_speech() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let voice = Voice {
            log: log.clone(),
            playing: None,
        };
        let mut app =
            App::with_collaborators(Config::default(), Box::new(voice), Box::new(FakeDiagrams))
                .unwrap();
        app.select_mode(PracticeMode::Kana);
        app.kana_move_horizontal(1);
        app.speak_at_cursor(); // い
        app.kana_move_horizontal(-1);
        app.kana_toggle_char();
        assert!(app.start_practice(PracticeOrder::Sequential));
        app.type_char('あ', Instant::now());
        assert_eq!(*log.borrow(), vec!["い", "cancel い", "あ"]);
    }

    #[test]
    fn test_cycle_theme_changes_config() {
        let mut app = test_app();
        let before = app.config.theme.clone();
        app.cycle_theme();
        assert_ne!(app.config.theme, before);
        assert_eq!(app.theme.name, app.config.theme);
    }
}
