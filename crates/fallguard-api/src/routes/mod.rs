pub mod assessments;
pub mod events;
pub mod health;
pub mod leads;
pub mod questionnaire;

use fallguard_core::models::locale::Locale;
use serde::Deserialize;

use crate::error::ApiError;

/// `?lang=` query parameter shared by the localized routes.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn resolve(&self, default: Locale) -> Result<Locale, ApiError> {
        match &self.lang {
            Some(tag) => Ok(tag.parse()?),
            None => Ok(default),
        }
    }
}
