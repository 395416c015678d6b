pub mod paragraph;
pub mod romanize;
pub mod segment;
pub mod tokenize;

pub use paragraph::split_paragraphs;
pub use romanize::{PinyinRomanizer, Romanizer};
pub use segment::{DictionarySegmenter, JiebaSegmenter, Segmenter};
pub use tokenize::Tokenizer;
