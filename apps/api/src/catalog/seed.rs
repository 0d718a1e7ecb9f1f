// Demo data: the first-run job posting and the canonical login identities.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Company, Job, User, UserRole};

pub const SEED_JOB_ID: Uuid = Uuid::from_u128(0x6a1d_0b3e_5c2f_4e0a_9d11_0000_0000_0001);

pub const HR_DEMO_EMAIL: &str = "admin@nexus.ai";
pub const CANDIDATE_DEMO_EMAIL: &str = "arjun.dev@gmail.com";

/// Fixed login identity per role until real authentication exists.
pub fn demo_email(role: UserRole) -> &'static str {
    match role {
        UserRole::Hr => HR_DEMO_EMAIL,
        UserRole::Candidate => CANDIDATE_DEMO_EMAIL,
    }
}

/// Profile created the first time `email` logs in as `role`.
pub fn demo_profile(email: &str, role: UserRole) -> User {
    match role {
        UserRole::Hr => User {
            id: Uuid::new_v4(),
            name: "Nexus HR Admin".to_string(),
            email: email.to_string(),
            role,
            avatar: None,
            location: Some("Bangalore, India".to_string()),
            designation: Some("Lead Recruiter".to_string()),
            experience: None,
            skills: Vec::new(),
            resume_text: None,
        },
        UserRole::Candidate => User {
            id: Uuid::new_v4(),
            name: "Arjun Sharma".to_string(),
            email: email.to_string(),
            role,
            avatar: None,
            location: Some("Bangalore, India".to_string()),
            designation: Some("Senior Full Stack Developer".to_string()),
            experience: Some("6 Years".to_string()),
            skills: ["React", "Node.js", "PostgreSQL", "System Design"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            resume_text: Some(
                "Highly skilled developer with expertise in scalable React apps and cloud architecture."
                    .to_string(),
            ),
        },
    }
}

/// The posting written into an empty jobs collection.
pub fn seed_job() -> Job {
    Job {
        id: SEED_JOB_ID,
        title: "Senior Frontend Architect".to_string(),
        domain: "Engineering".to_string(),
        description: "Build high-performance UIs using React and generative AI APIs.".to_string(),
        company: Company {
            name: "NexusAI Global".to_string(),
            logo: "🔷".to_string(),
            industry: "AI".to_string(),
            location: "Bangalore, KA".to_string(),
        },
        required_skills: vec!["React".to_string(), "TS".to_string()],
        experience: "8-10 Years".to_string(),
        salary_range: "45-60 LPA".to_string(),
        total_vacancies: 2,
        filled_vacancies: 0,
        posted_at: Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .unwrap_or_default(),
        joining_details: "Immediate".to_string(),
    }
}
