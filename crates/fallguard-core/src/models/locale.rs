use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Languages the product is published in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    /// Traditional Chinese (Taiwan).
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    /// Accepts BCP 47-ish tags as sent by browsers (`en-US`, `zh-Hant`, `zh_tw`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().replace('_', "-").to_ascii_lowercase();
        match tag.as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "zh-tw" | "zh-hant" | "zh-hant-tw" | "zh" => Ok(Locale::ZhTw),
            _ => Err(CoreError::UnknownLocale(s.to_string())),
        }
    }
}

/// A user-facing string in every supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocalizedText {
    pub en: String,
    pub zh_tw: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, zh_tw: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh_tw: zh_tw.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::ZhTw => &self.zh_tw,
        }
    }
}
