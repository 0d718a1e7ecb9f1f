use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain value that matches every job when used as a filter.
pub const ALL_DOMAINS: &str = "All Domains";

/// Domain facets offered to clients, wildcard first.
pub const DOMAINS: [&str; 8] = [
    ALL_DOMAINS,
    "Engineering",
    "Design",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Legal",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub logo: String,
    pub industry: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub company: Company,
    pub required_skills: Vec<String>,
    pub experience: String,
    pub salary_range: String,
    pub total_vacancies: u32,
    /// Only an out-of-band hiring action moves this; no portal path does.
    pub filled_vacancies: u32,
    pub posted_at: DateTime<Utc>,
    pub joining_details: String,
}

/// Everything needed to publish a posting. The catalog assigns id, post time
/// and the filled-vacancy counter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub domain: String,
    pub description: String,
    pub company: Company,
    pub required_skills: Vec<String>,
    pub experience: String,
    pub salary_range: String,
    pub total_vacancies: u32,
    pub joining_details: String,
}

impl NewJob {
    pub fn into_job(self, id: Uuid, posted_at: DateTime<Utc>) -> Job {
        Job {
            id,
            title: self.title,
            domain: self.domain,
            description: self.description,
            company: self.company,
            required_skills: self.required_skills,
            experience: self.experience,
            salary_range: self.salary_range,
            total_vacancies: self.total_vacancies,
            filled_vacancies: 0,
            posted_at,
            joining_details: self.joining_details,
        }
    }
}
