pub mod chain;
pub mod deepl;
pub mod error;
pub mod libre;
pub mod openai;
pub mod traits;

pub use chain::TranslatorChain;
pub use deepl::DeepL;
pub use error::{Result, TranslateError};
pub use libre::LibreTranslate;
pub use openai::OpenAiTranslator;
pub use traits::{Backend, Translator};
