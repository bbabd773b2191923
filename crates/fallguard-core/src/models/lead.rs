use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answers::QuestionnaireAnswers;
use super::locale::Locale;
use super::risk::{FallProbabilityResult, RiskResult};
use crate::error::CoreError;

/// Which form on the site produced the lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LeadSource {
    /// Contact details left at the end of the assessment.
    Assessment,
    #[default]
    Contact,
    /// Product demo request.
    Demo,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Assessment => "assessment",
            LeadSource::Contact => "contact",
            LeadSource::Demo => "demo",
        }
    }
}

/// A lead as posted by the web client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeadRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub consent: bool,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub answers: Option<QuestionnaireAnswers>,
}

impl LeadRequest {
    /// Check the request and return a copy with surrounding whitespace
    /// removed and blank optional fields dropped.
    pub fn validate(&self) -> Result<LeadRequest, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingName);
        }

        let email = non_blank(self.email.as_deref());
        let phone = non_blank(self.phone.as_deref());
        if email.is_none() && phone.is_none() {
            return Err(CoreError::MissingContact);
        }
        if let Some(email) = &email
            && !is_plausible_email(email)
        {
            return Err(CoreError::InvalidEmail(email.clone()));
        }

        if !self.consent {
            return Err(CoreError::ConsentRequired);
        }

        Ok(LeadRequest {
            name: name.to_string(),
            email,
            phone,
            consent: self.consent,
            locale: self.locale,
            source: self.source,
            message: non_blank(self.message.as_deref()),
            answers: self.answers.clone(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// A persisted lead. Risk and probability are computed server-side from
/// `answers` and cached here for display only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeadSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub consent: bool,
    pub locale: Locale,
    pub source: LeadSource,
    pub message: Option<String>,
    pub answers: Option<QuestionnaireAnswers>,
    pub risk: Option<RiskResult>,
    pub probability: Option<FallProbabilityResult>,
    pub created_at: jiff::Timestamp,
}

impl LeadSubmission {
    pub fn new(
        request: LeadRequest,
        risk: Option<RiskResult>,
        probability: Option<FallProbabilityResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            consent: request.consent,
            locale: request.locale,
            source: request.source,
            message: request.message,
            answers: request.answers,
            risk,
            probability,
            created_at: jiff::Timestamp::now(),
        }
    }
}
