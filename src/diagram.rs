//! Stroke-order diagrams stored as `<codepoint>.svg` files.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Kana that ship with stroke data: the 46 basic hiragana.
const STROKE_DATA_KANA: &str = "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん";

pub fn has_stroke_data(character: &str) -> bool {
    let mut chars = character.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => STROKE_DATA_KANA.contains(ch),
        _ => false,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokeDiagram {
    pub character: String,
    pub markup: String,
}

impl StrokeDiagram {
    /// Animated stroke paths if the file marks them, otherwise every path.
    pub fn stroke_count(&self) -> usize {
        let paths: Vec<&str> = self.markup.split("<path").skip(1).collect();
        let animated = paths
            .iter()
            .filter(|p| {
                let tag_end = p.find('>').unwrap_or(p.len());
                p[..tag_end].contains("--d:")
            })
            .count();
        if animated > 0 { animated } else { paths.len() }
    }
}

pub trait StrokeDiagramSource {
    /// `None` when no diagram exists for `character` or it could not be read.
    fn fetch_stroke_diagram(&self, character: &str) -> Option<StrokeDiagram>;
}

/// Looks up `<dir>/<decimal codepoint>.svg`.
#[derive(Clone, Debug)]
pub struct DirDiagramSource {
    dir: PathBuf,
}

impl DirDiagramSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, character: &str) -> Option<PathBuf> {
        let cp = character.chars().next()? as u32;
        Some(self.dir.join(format!("{cp}.svg")))
    }
}

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("failed to read stroke diagram {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DirDiagramSource {
    /// `Ok(None)` when the file simply does not exist.
    pub fn read(&self, character: &str) -> Result<Option<StrokeDiagram>, DiagramError> {
        let Some(path) = self.path_for(character) else {
            return Ok(None);
        };
        match fs::read_to_string(&path) {
            Ok(markup) => Ok(Some(StrokeDiagram {
                character: character.to_string(),
                markup,
            })),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stroke diagram");
                Ok(None)
            }
            Err(source) => Err(DiagramError::Read { path, source }),
        }
    }
}

impl StrokeDiagramSource for DirDiagramSource {
    fn fetch_stroke_diagram(&self, character: &str) -> Option<StrokeDiagram> {
        self.read(character).unwrap_or_else(|err| {
            tracing::warn!(error = ?err, "stroke diagram unavailable");
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_stroke_data() {
        assert!(has_stroke_data("あ"));
        assert!(has_stroke_data("ん"));
        assert!(!has_stroke_data("が"));
        assert!(!has_stroke_data("きゃ"));
        assert!(!has_stroke_data(""));
    }

    #[test]
    fn test_path_uses_decimal_codepoint() {
        let source = DirDiagramSource::new("/kana");
        assert_eq!(source.path_for("あ"), Some(PathBuf::from("/kana/12354.svg")));
        assert_eq!(source.path_for(""), None);
    }

    #[test]
    fn test_fetch_found_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("12356.svg"),
            "<svg><path d=\"M0\"/><path d=\"M1\"/></svg>",
        )
        .unwrap();
        let source = DirDiagramSource::new(dir.path());

        let diagram = source.fetch_stroke_diagram("い").unwrap();
        assert_eq!(diagram.character, "い");
        assert_eq!(diagram.stroke_count(), 2);

        assert!(source.fetch_stroke_diagram("う").is_none());
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text.
        fs::create_dir(dir.path().join("12354.svg")).unwrap();
        let source = DirDiagramSource::new(dir.path());

        assert!(matches!(source.read("あ"), Err(DiagramError::Read { .. })));
        assert!(source.fetch_stroke_diagram("あ").is_none());
    }

    #[test]
    fn test_stroke_count_prefers_animated_paths() {
        let diagram = StrokeDiagram {
            character: "あ".to_string(),
            markup: concat!(
                "<svg class=\"acjk\">",
                "<path id=\"z1\" d=\"M0\"/>",
                "<path style=\"--d:1s\" d=\"M1\"/>",
                "<path style=\"--d:2s\" d=\"M2\"/>",
                "<path style=\"--d:3s\" d=\"M3\"/>",
                "</svg>"
            )
            .to_string(),
        };
        assert_eq!(diagram.stroke_count(), 3);
    }
}
