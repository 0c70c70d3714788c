//! Confidence assessment of certification records
//!
//! The deterministic rules: an expired validity date caps the tier at Low;
//! a missing issuing body or verification reference lowers the tier one
//! step; a complete, unexpired certification is High.

use super::{ConfidenceTier, ValidationError, ValidationResult};
use crate::graph::Record;
use crate::nlq::{LlmClient, NlqError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of assessing one certification
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub tier: ConfidenceTier,
    pub rationale: String,
}

/// External collaborator that rates a certification's trustworthiness
#[async_trait]
pub trait ConfidenceAssessor: Send + Sync {
    async fn assess(&self, record: &Record) -> ValidationResult<Assessment>;
}

/// Deterministic assessor driven entirely by record properties
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAssessor {
    /// Fixed "today" for reproducible assessment; defaults to the wall clock
    reference_date: Option<NaiveDate>,
}

impl RuleBasedAssessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the expiry comparison date (used by tests and replays)
    pub fn with_reference_date(date: NaiveDate) -> Self {
        RuleBasedAssessor {
            reference_date: Some(date),
        }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Is the record's `valid_until` date in the past?
    ///
    /// A missing or unparseable date is not "expired"; it is handled as a
    /// completeness problem instead.
    pub fn is_expired(&self, record: &Record) -> bool {
        record
            .property_str("valid_until")
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
            .map(|date| date < self.today())
            .unwrap_or(false)
    }

    fn evaluate(&self, record: &Record) -> Assessment {
        let mut tier = ConfidenceTier::High;
        let mut concerns: Vec<String> = Vec::new();

        let blank = |key: &str| {
            record
                .property_str(key)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true)
        };

        if blank("issuing_body") {
            tier = tier.lowered();
            concerns.push("issuing body is missing".to_string());
        }
        if blank("verification_url") {
            tier = tier.lowered();
            concerns.push("verification reference is missing".to_string());
        }

        match record
            .property_str("valid_until")
            .map(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT))
        {
            Some(Ok(date)) => {
                if date < self.today() {
                    tier = ConfidenceTier::Low;
                    concerns.push(format!("certification expired on {}", date));
                }
            }
            Some(Err(_)) => {
                tier = tier.lowered();
                concerns.push("validity date is unreadable".to_string());
            }
            None => {
                tier = tier.lowered();
                concerns.push("validity date is missing".to_string());
            }
        }

        let rationale = if concerns.is_empty() {
            format!(
                "All fields present and the certification is current (valid until {}).",
                record.property_str("valid_until").unwrap_or("unknown")
            )
        } else {
            format!("Concerns: {}.", concerns.join("; "))
        };

        Assessment { tier, rationale }
    }
}

#[async_trait]
impl ConfidenceAssessor for RuleBasedAssessor {
    async fn assess(&self, record: &Record) -> ValidationResult<Assessment> {
        Ok(self.evaluate(record))
    }
}

/// LLM-backed assessor; the deterministic expiry cap still applies on top
/// of whatever tier the model reports
pub struct LlmAssessor {
    client: LlmClient,
    rules: RuleBasedAssessor,
}

#[derive(Deserialize)]
struct LlmAssessmentReply {
    confidence_level: String,
    assessment: String,
    #[serde(default)]
    concerns: Vec<String>,
}

impl LlmAssessor {
    pub fn new(client: LlmClient) -> Self {
        LlmAssessor {
            client,
            rules: RuleBasedAssessor::new(),
        }
    }

    fn assessment_prompt(record: &Record) -> String {
        let cert_info =
            serde_json::to_string_pretty(&record.properties).unwrap_or_else(|_| "{}".to_string());
        format!(
            "You are a certification expert for luxury fashion supply chains. Assess the \
following certification data.\n\nCertification Information:\n{}\n\n\
Analyze this certification considering validity dates, issuing body reputation, \
verification reference availability, and data completeness.\n\n\
Respond in JSON format:\n{{\n    \"confidence_level\": \"High|Medium|Low\",\n    \
\"assessment\": \"your assessment here\",\n    \"concerns\": [\"concern 1\"] or []\n}}",
            cert_info
        )
    }

    fn parse_reply(reply: &str) -> Assessment {
        let cleaned = crate::nlq::prompt::extract_json(reply);
        match serde_json::from_str::<LlmAssessmentReply>(cleaned) {
            Ok(parsed) => {
                let tier = match parsed.confidence_level.to_lowercase().as_str() {
                    "high" => ConfidenceTier::High,
                    "medium" => ConfidenceTier::Medium,
                    _ => ConfidenceTier::Low,
                };
                let rationale = if parsed.concerns.is_empty() {
                    parsed.assessment
                } else {
                    format!(
                        "{}\n\nConcerns: {}",
                        parsed.assessment,
                        parsed.concerns.join(", ")
                    )
                };
                Assessment { tier, rationale }
            }
            Err(e) => {
                warn!(error = %e, "assessment reply was not parseable, defaulting to Low");
                Assessment {
                    tier: ConfidenceTier::Low,
                    rationale: "Unable to parse assessment response.".to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl ConfidenceAssessor for LlmAssessor {
    async fn assess(&self, record: &Record) -> ValidationResult<Assessment> {
        let reply = self
            .client
            .complete(
                "You assess supply chain certifications.",
                &Self::assessment_prompt(record),
            )
            .await
            .map_err(|e| match e {
                NlqError::Unavailable(reason) | NlqError::Api(reason) | NlqError::Config(reason) => {
                    ValidationError::AssessorUnavailable {
                        certification_id: record.id.clone(),
                        reason,
                    }
                }
                other => ValidationError::AssessorUnavailable {
                    certification_id: record.id.clone(),
                    reason: other.to_string(),
                },
            })?;

        let mut assessment = Self::parse_reply(&reply);
        if self.rules.is_expired(record) {
            assessment.tier = ConfidenceTier::Low;
            assessment.rationale.push_str("\n\nThe certification has expired.");
        }
        Ok(assessment)
    }
}
