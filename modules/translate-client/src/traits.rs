use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{Result, TranslateError};

/// Translation backends, in the order they are tried when none is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    DeepL,
    Libre,
    OpenAi,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeepL => write!(f, "deepl"),
            Self::Libre => write!(f, "libre"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for Backend {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "libre" | "libretranslate" => Ok(Self::Libre),
            "openai" => Ok(Self::OpenAi),
            other => Err(TranslateError::Config(format!(
                "unknown translation backend '{other}'"
            ))),
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    fn backend(&self) -> Backend;

    /// Translate `text` into the language identified by `target` (e.g. "ko").
    async fn translate(&self, text: &str, target: &str) -> Result<String>;
}
