use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::{Difficulty, KanaItem, KanaTable, PhraseItem, PhraseTable};
use crate::engine::item::PracticeItem;

pub const KANA_RANDOM_SAMPLE: usize = 20;
pub const PHRASE_RANDOM_SAMPLE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeOrder {
    Sequential,
    Random,
}

impl PracticeOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            PracticeOrder::Sequential => "sequential",
            PracticeOrder::Random => "random",
        }
    }
}

/// Kana filter chosen on the selection screen.
///
/// Individual picks win over row picks, and row picks win over the full table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KanaCriteria {
    pub rows: Vec<usize>,
    pub chars: Vec<String>,
}

impl KanaCriteria {
    pub fn toggle_row(&mut self, group: usize) {
        if let Some(pos) = self.rows.iter().position(|&g| g == group) {
            self.rows.remove(pos);
        } else {
            self.rows.push(group);
        }
    }

    pub fn toggle_char(&mut self, text: &str) {
        if let Some(pos) = self.chars.iter().position(|c| c == text) {
            self.chars.remove(pos);
        } else {
            self.chars.push(text.to_string());
        }
    }

    pub fn select_all(&mut self, table: &KanaTable) {
        self.rows = (0..table.row_count()).collect();
        self.chars.clear();
    }

    pub fn select_none(&mut self) {
        self.rows.clear();
        self.chars.clear();
    }

    pub fn has_selection(&self) -> bool {
        !self.rows.is_empty() || !self.chars.is_empty()
    }

    pub fn is_row_selected(&self, group: usize) -> bool {
        self.rows.contains(&group)
    }

    pub fn is_char_selected(&self, text: &str) -> bool {
        self.chars.iter().any(|c| c == text)
    }

    /// Set the individual picks to the kana of a range selection. When
    /// `additive`, the picks held before the range started are kept in front.
    pub fn apply_range(&mut self, base: &[String], chosen: &[&KanaItem], additive: bool) {
        let mut chars = if additive { base.to_vec() } else { Vec::new() };
        for item in chosen {
            if !chars.contains(&item.text) {
                chars.push(item.text.clone());
            }
        }
        self.chars = chars;
    }
}

/// Kana inside the grid rectangle whose opposite corners are `a` and `b`.
///
/// Rows span the two groups and columns span the two vowel positions, so a
/// rectangle crossing や行 or わ行 simply skips their empty cells.
pub fn kana_in_rect<'a>(table: &'a [KanaItem], a: &KanaItem, b: &KanaItem) -> Vec<&'a KanaItem> {
    let rows = a.group.min(b.group)..=a.group.max(b.group);
    let columns = a.position.min(b.position)..=a.position.max(b.position);
    table
        .iter()
        .filter(|k| rows.contains(&k.group) && columns.contains(&k.position))
        .collect()
}

/// Phrase filter chosen on the selection screen. `None` means "all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhraseCriteria {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub picked: Vec<String>,
}

impl PhraseCriteria {
    pub fn matches(&self, phrase: &PhraseItem) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| c == phrase.category);
        let difficulty_ok = self.difficulty.is_none_or(|d| d == phrase.difficulty);
        let picked_ok = self.picked.is_empty() || self.picked.contains(&phrase.text);
        category_ok && difficulty_ok && picked_ok
    }

    /// Advance through "all", then each category in table order.
    pub fn cycle_category(&mut self, table: &PhraseTable) {
        let categories = table.categories();
        self.category = match self.category.as_deref() {
            None => categories.first().map(|c| c.to_string()),
            Some(current) => categories
                .iter()
                .position(|c| *c == current)
                .and_then(|idx| categories.get(idx + 1))
                .map(|c| c.to_string()),
        };
    }

    pub fn cycle_difficulty(&mut self) {
        self.difficulty = match self.difficulty {
            None => Some(Difficulty::Beginner),
            Some(Difficulty::Beginner) => Some(Difficulty::Intermediate),
            Some(Difficulty::Intermediate) => Some(Difficulty::Advanced),
            Some(Difficulty::Advanced) => None,
        };
    }

    pub fn toggle_phrase(&mut self, text: &str) {
        if let Some(pos) = self.picked.iter().position(|p| p == text) {
            self.picked.remove(pos);
        } else {
            self.picked.push(text.to_string());
        }
    }

    /// Pick every phrase that currently passes the category and difficulty filters.
    pub fn select_all_filtered(&mut self, table: &PhraseTable) {
        let filters_only = PhraseCriteria {
            category: self.category.clone(),
            difficulty: self.difficulty,
            picked: Vec::new(),
        };
        self.picked = table
            .items()
            .iter()
            .filter(|p| filters_only.matches(p))
            .map(|p| p.text.clone())
            .collect();
    }

    pub fn clear_picks(&mut self) {
        self.picked.clear();
    }

    pub fn is_picked(&self, text: &str) -> bool {
        self.picked.iter().any(|p| p == text)
    }

    pub fn has_selection(&self) -> bool {
        self.category.is_some() || self.difficulty.is_some() || !self.picked.is_empty()
    }
}

pub fn select_kana_set(table: &[KanaItem], criteria: &KanaCriteria) -> Vec<PracticeItem> {
    let chosen: Vec<&KanaItem> = if !criteria.chars.is_empty() {
        table
            .iter()
            .filter(|k| criteria.is_char_selected(&k.text))
            .collect()
    } else if !criteria.rows.is_empty() {
        table
            .iter()
            .filter(|k| criteria.is_row_selected(k.group))
            .collect()
    } else {
        table.iter().collect()
    };
    chosen
        .into_iter()
        .cloned()
        .map(PracticeItem::Kana)
        .collect()
}

pub fn select_phrase_set(table: &[PhraseItem], criteria: &PhraseCriteria) -> Vec<PracticeItem> {
    table
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .map(PracticeItem::Phrase)
        .collect()
}

/// Uniform random permutation of `items`, truncated to `n`.
///
/// `SliceRandom::shuffle` is a Fisher-Yates shuffle.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out.truncate(n.min(items.len()));
    out
}

/// The items of one drill, fixed for the lifetime of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeSet {
    items: Vec<PracticeItem>,
    order: PracticeOrder,
}

impl PracticeSet {
    pub fn sequential(items: Vec<PracticeItem>) -> Self {
        Self {
            items,
            order: PracticeOrder::Sequential,
        }
    }

    pub fn random<R: Rng + ?Sized>(items: &[PracticeItem], n: usize, rng: &mut R) -> Self {
        Self {
            items: sample(items, n, rng),
            order: PracticeOrder::Random,
        }
    }

    pub fn build<R: Rng + ?Sized>(
        items: Vec<PracticeItem>,
        order: PracticeOrder,
        sample_size: usize,
        rng: &mut R,
    ) -> Self {
        match order {
            PracticeOrder::Sequential => Self::sequential(items),
            PracticeOrder::Random => Self::random(&items, sample_size, rng),
        }
    }

    pub fn items(&self) -> &[PracticeItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&PracticeItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn order(&self) -> PracticeOrder {
        self.order
    }
}
