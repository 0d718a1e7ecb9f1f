// Prompt templates for the portal's AI features.
// Placeholders in `{braces}` are filled by the builders below.

use crate::models::User;

use super::EmailKind;

/// Resume scoring. Replace `{resume_text}`, `{job_title}`, `{job_description}`.
pub const RESUME_SCORE_PROMPT_TEMPLATE: &str = r#"Candidate resume:
"{resume_text}"

Target job: "{job_title}"
Job description: "{job_description}"

Analyze how well the resume matches the job as an applicant tracking system would.
Return a JSON object with this EXACT schema:
{
  "score": 72,
  "feedback": "Two or three sentences explaining the score.",
  "missingSkills": ["keyword or skill absent from the resume"]
}

Rules:
- score is a number from 0 to 100
- missingSkills lists at most 6 items and may be empty"#;

/// Profile improvement tips. Replace `{name}`, `{designation}`, `{experience}`, `{skills}`.
pub const PROFILE_TIPS_PROMPT_TEMPLATE: &str = "\
User name: {name}. Designation: {designation}. Experience: {experience}.
Skills: {skills}.
Suggest 5 specific, actionable improvements to this job-portal profile that would \
get the user noticeably more recruiter calls. Use a short numbered list.";

/// Reply drafting. Replace `{message}`, `{role_context}`.
pub const REPLY_PROMPT_TEMPLATE: &str = "\
A recruiter sent this message: \"{message}\"
The role under discussion is \"{role_context}\".
Draft a professional, polite and enthusiastic reply that moves the conversation forward.";

/// Offer letter. Replace `{candidate_name}`, `{job_title}`.
pub const OFFER_EMAIL_PROMPT_TEMPLATE: &str =
    "Draft a polished corporate offer letter for {candidate_name} for the {job_title} position.";

/// Interview invite. Replace `{candidate_name}`, `{job_title}`.
pub const INTERVIEW_EMAIL_PROMPT_TEMPLATE: &str =
    "Draft an interview invitation for {candidate_name} for the {job_title} position, \
offering 3 time slots to choose from.";

/// Office lookup. Replace `{company}`, `{location}`.
pub const OFFICE_LINK_PROMPT_TEMPLATE: &str =
    "Give a Google Maps URL that points at the office of {company} in {location}.";

pub fn resume_score_prompt(resume_text: &str, job_title: &str, job_description: &str) -> String {
    RESUME_SCORE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
}

pub fn profile_tips_prompt(user: &User) -> String {
    PROFILE_TIPS_PROMPT_TEMPLATE
        .replace("{name}", &user.name)
        .replace("{designation}", user.designation.as_deref().unwrap_or("not set"))
        .replace("{experience}", user.experience.as_deref().unwrap_or("not set"))
        .replace("{skills}", &user.skills.join(", "))
}

pub fn reply_prompt(message: &str, role_context: &str) -> String {
    REPLY_PROMPT_TEMPLATE
        .replace("{message}", message)
        .replace("{role_context}", role_context)
}

pub fn email_prompt(kind: EmailKind, candidate_name: &str, job_title: &str) -> String {
    let template = match kind {
        EmailKind::Offer => OFFER_EMAIL_PROMPT_TEMPLATE,
        EmailKind::Interview => INTERVIEW_EMAIL_PROMPT_TEMPLATE,
    };
    template
        .replace("{candidate_name}", candidate_name)
        .replace("{job_title}", job_title)
}

pub fn office_link_prompt(company: &str, location: &str) -> String {
    OFFICE_LINK_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{location}", location)
}
