pub mod annotate;
pub mod formatter;
pub mod hanzi;
pub mod pinyin;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod testing;

pub use formatter::{RenderedBodies, TextFormatter};
pub use hanzi::{HanziMode, HanziRenderer};
pub use pinyin::PinyinRenderer;
pub use vocabulary::VocabularySection;
