pub mod config;
pub mod error;
pub mod hash;
pub mod markup;
pub mod token;
pub mod tone;
pub mod vocabulary;

pub use config::*;
pub use error::*;
pub use token::*;
pub use tone::{classify, ToneClass};
pub use vocabulary::{BuildReport, HskLevel, IndexBuilder, VocabularyEntry, VocabularyIndex, VocabularyRow};
