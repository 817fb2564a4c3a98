#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A full row of the `jobs` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub application_url: String,
    pub job_type: String,
    pub experience: String,
    pub work_mode: String,
    pub salary: String,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub about_company: String,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub we_offer: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a posting used by every listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobSummary {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub work_mode: String,
    pub experience: String,
    pub description: Option<String>,
    pub skills: Option<String>,
}

impl From<JobRow> for JobSummary {
    fn from(row: JobRow) -> Self {
        JobSummary {
            id: row.id,
            job_title: row.job_title,
            company: row.company,
            location: row.location,
            salary: row.salary,
            job_type: row.job_type,
            work_mode: row.work_mode,
            experience: row.experience,
            description: row.description,
            skills: row.skills,
        }
    }
}

/// A posting as seen by the matcher: the public summary plus the text that is
/// scored but never returned.
#[derive(Debug, Clone, FromRow)]
pub struct Posting {
    #[sqlx(flatten)]
    pub summary: JobSummary,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
}

impl Posting {
    /// Concatenation of every field that contributes to scoring.
    pub fn scoring_text(&self) -> String {
        [
            self.summary.skills.as_deref(),
            self.summary.description.as_deref(),
            self.responsibilities.as_deref(),
            self.requirements.as_deref(),
        ]
        .map(|field| field.unwrap_or_default())
        .join(" ")
    }
}

impl From<JobRow> for Posting {
    fn from(mut row: JobRow) -> Self {
        let responsibilities = row.responsibilities.take();
        let requirements = row.requirements.take();
        Posting {
            summary: row.into(),
            responsibilities,
            requirements,
        }
    }
}

/// Equality filters applied to the posting fetch, before any scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingFilter {
    pub experience: Option<String>,
    pub work_mode: Option<String>,
}

impl PostingFilter {
    pub fn matches(&self, summary: &JobSummary) -> bool {
        self.experience
            .as_deref()
            .map_or(true, |e| e == summary.experience)
            && self
                .work_mode
                .as_deref()
                .map_or(true, |w| w == summary.work_mode)
    }
}

/// One entry of a match result.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPosting {
    #[serde(flatten)]
    pub job: JobSummary,
    pub similarity: f64,
}

/// Request body for publishing or editing a posting. Missing fields
/// deserialize as empty and are rejected by [`JobInput::missing_fields`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobInput {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub application_url: String,
    pub job_type: String,
    pub experience: String,
    pub work_mode: String,
    pub salary: String,
    pub skills: String,
    pub description: String,
    pub about_company: String,
    pub responsibilities: String,
    pub requirements: String,
    pub we_offer: String,
}

impl JobInput {
    /// Names (as sent on the wire) of the fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("jobTitle", &self.job_title),
            ("company", &self.company),
            ("location", &self.location),
            ("applicationUrl", &self.application_url),
            ("jobType", &self.job_type),
            ("experience", &self.experience),
            ("workMode", &self.work_mode),
            ("salary", &self.salary),
            ("skills", &self.skills),
            ("description", &self.description),
            ("aboutCompany", &self.about_company),
            ("responsibilities", &self.responsibilities),
            ("requirements", &self.requirements),
            ("weOffer", &self.we_offer),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Full posting plus whether the requesting user has saved it.
#[derive(Debug, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: JobRow,
    pub is_saved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(experience: &str, work_mode: &str) -> JobSummary {
        JobSummary {
            id: Uuid::new_v4(),
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: "100k".to_string(),
            job_type: "full-time".to_string(),
            work_mode: work_mode.to_string(),
            experience: experience.to_string(),
            description: None,
            skills: Some("rust".to_string()),
        }
    }

    #[test]
    fn test_missing_fields_lists_blank_values() {
        let input = JobInput {
            job_title: "Engineer".to_string(),
            company: "  ".to_string(),
            ..Default::default()
        };
        let missing = input.missing_fields();
        assert!(missing.contains(&"company"));
        assert!(missing.contains(&"weOffer"));
        assert!(!missing.contains(&"jobTitle"));
        assert_eq!(missing.len(), 13);
    }

    #[test]
    fn test_job_input_reads_camel_case() {
        let input: JobInput = serde_json::from_value(serde_json::json!({
            "jobTitle": "Engineer",
            "workMode": "remote",
            "weOffer": "snacks"
        }))
        .unwrap();
        assert_eq!(input.job_title, "Engineer");
        assert_eq!(input.work_mode, "remote");
        assert_eq!(input.we_offer, "snacks");
        assert!(input.company.is_empty());
    }

    #[test]
    fn test_scoring_text_skips_null_fields() {
        let posting = Posting {
            summary: summary("senior", "remote"),
            responsibilities: None,
            requirements: Some("docker".to_string()),
        };
        assert_eq!(posting.scoring_text(), "rust   docker");
    }

    #[test]
    fn test_filter_requires_every_set_field() {
        let job = summary("senior", "remote");
        assert!(PostingFilter::default().matches(&job));
        let filter = PostingFilter {
            experience: Some("senior".to_string()),
            work_mode: Some("onsite".to_string()),
        };
        assert!(!filter.matches(&job));
        let filter = PostingFilter {
            experience: Some("senior".to_string()),
            work_mode: None,
        };
        assert!(filter.matches(&job));
    }

    #[test]
    fn test_ranked_posting_serializes_flat() {
        let ranked = RankedPosting {
            job: summary("junior", "hybrid"),
            similarity: 0.5,
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["experience"], "junior");
        assert_eq!(value["similarity"], 0.5);
        assert!(value.get("responsibilities").is_none());
    }
}
