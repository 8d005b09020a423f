use serde::{Deserialize, Serialize};

use super::{DataError, load_json};

/// Vowel columns per grid row.
pub const ROW_WIDTH: usize = 5;

/// One kana glyph (or yōon digraph) with its romaji reading.
///
/// `group` is the phonetic row (あ行, か行, ...) used for bulk selection and
/// `position` is the vowel column inside that row, so gaps such as や/ゆ/よ
/// keep their place in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanaItem {
    pub text: String,
    pub reading: String,
    pub group: usize,
    pub position: usize,
}

#[derive(Debug, Deserialize)]
struct KanaFile {
    rows: Vec<String>,
    items: Vec<KanaItem>,
}

#[derive(Clone, Debug)]
pub struct KanaTable {
    rows: Vec<String>,
    items: Vec<KanaItem>,
}

impl KanaTable {
    pub fn load() -> Result<Self, DataError> {
        let file: KanaFile = load_json("kana.json")?;
        if let Some(bad) = file
            .items
            .iter()
            .find(|item| item.group >= file.rows.len() || item.position >= ROW_WIDTH)
        {
            return Err(DataError::Inconsistent {
                name: "kana.json",
                reason: format!("{} sits outside the grid", bad.text),
            });
        }
        Ok(Self {
            rows: file.rows,
            items: file.items,
        })
    }

    pub fn items(&self) -> &[KanaItem] {
        &self.items
    }

    /// Row labels, indexed by group.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
