pub mod item;
pub mod selection;

pub use item::PracticeItem;
pub use selection::{
    KANA_RANDOM_SAMPLE, KanaCriteria, PHRASE_RANDOM_SAMPLE, PhraseCriteria, PracticeOrder,
    PracticeSet,
};
