use crate::data::{KanaItem, PhraseItem};

/// One thing to type during a drill, regardless of where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PracticeItem {
    Kana(KanaItem),
    Phrase(PhraseItem),
}

impl PracticeItem {
    /// Native-script text shown as the prompt.
    pub fn display_text(&self) -> &str {
        match self {
            PracticeItem::Kana(k) => &k.text,
            PracticeItem::Phrase(p) => &p.text,
        }
    }

    /// What the learner has to type. Same as the display text.
    pub fn expected_input(&self) -> &str {
        self.display_text()
    }

    /// Romaji reading shown as a hint.
    pub fn target_hint(&self) -> &str {
        match self {
            PracticeItem::Kana(k) => &k.reading,
            PracticeItem::Phrase(p) => &p.reading,
        }
    }

    pub fn translation(&self) -> Option<&str> {
        match self {
            PracticeItem::Kana(_) => None,
            PracticeItem::Phrase(p) => Some(&p.translation),
        }
    }
}

impl From<KanaItem> for PracticeItem {
    fn from(item: KanaItem) -> Self {
        PracticeItem::Kana(item)
    }
}

impl From<PhraseItem> for PracticeItem {
    fn from(item: PhraseItem) -> Self {
        PracticeItem::Phrase(item)
    }
}
