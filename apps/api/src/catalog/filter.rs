use serde::{Deserialize, Serialize};

use crate::models::{Job, ALL_DOMAINS};

/// Job-list filter. Criteria combine with AND; an absent or empty criterion
/// matches every job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    /// Exact domain, or `All Domains` for any.
    #[serde(default)]
    pub domain: Option<String>,
    /// Case-insensitive substring of the title or the company name.
    #[serde(default)]
    pub search: Option<String>,
    /// Case-insensitive substring of the company location.
    #[serde(default)]
    pub location: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        self.domain_matches(job) && self.search_matches(job) && self.location_matches(job)
    }

    fn domain_matches(&self, job: &Job) -> bool {
        match active(&self.domain) {
            None | Some(ALL_DOMAINS) => true,
            Some(domain) => job.domain == domain,
        }
    }

    fn search_matches(&self, job: &Job) -> bool {
        active(&self.search).map_or(true, |needle| {
            let needle = needle.to_lowercase();
            contains_ci(&job.title, &needle) || contains_ci(&job.company.name, &needle)
        })
    }

    fn location_matches(&self, job: &Job) -> bool {
        active(&self.location)
            .map_or(true, |needle| contains_ci(&job.company.location, &needle.to_lowercase()))
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|c| !c.is_empty())
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
