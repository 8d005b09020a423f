//! Read-only reference tables compiled into the binary.

pub mod kana;
pub mod phrases;

use rust_embed::Embed;
use thiserror::Error;

pub use kana::{KanaItem, KanaTable};
pub use phrases::{Difficulty, PhraseItem, PhraseTable};

#[derive(Embed)]
#[folder = "assets/data/"]
struct DataAssets;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("bundled data file `{0}` is missing")]
    Missing(&'static str),
    #[error("bundled data file `{name}` is malformed: {source}")]
    Malformed {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("bundled data file `{name}` is inconsistent: {reason}")]
    Inconsistent { name: &'static str, reason: String },
}

fn load_json<T: serde::de::DeserializeOwned>(name: &'static str) -> Result<T, DataError> {
    let file = DataAssets::get(name).ok_or(DataError::Missing(name))?;
    serde_json::from_slice(file.data.as_ref()).map_err(|source| DataError::Malformed { name, source })
}
