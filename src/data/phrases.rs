use serde::{Deserialize, Serialize};

use super::{DataError, load_json};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseItem {
    pub text: String,
    pub reading: String,
    pub translation: String,
    pub category: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
struct PhraseFile {
    phrases: Vec<PhraseItem>,
}

#[derive(Clone, Debug)]
pub struct PhraseTable {
    items: Vec<PhraseItem>,
}

impl PhraseTable {
    pub fn load() -> Result<Self, DataError> {
        let file: PhraseFile = load_json("phrases.json")?;
        Ok(Self {
            items: file.phrases,
        })
    }

    pub fn items(&self) -> &[PhraseItem] {
        &self.items
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a PhraseItem> {
        self.items.iter().filter(move |p| p.category == category)
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &PhraseItem> {
        self.items.iter().filter(move |p| p.difficulty == difficulty)
    }
}
