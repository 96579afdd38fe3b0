use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `resume_analysis` table written by the dummy-data seeder.
///
/// `resume_skills`, `match_score` and `profile_summary` are placeholders and
/// stay empty for seeded rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: i64,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub company_address: String,
    pub salary: String,
    pub experience: String,
    pub skills_required: String,
    pub resume_skills: String,
    pub match_score: String,
    pub profile_summary: String,
}

/// Insert payload for `resume_analysis`; the id is assigned by SQLite.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub company_address: String,
    pub salary: String,
    pub experience: String,
    pub skills_required: String,
}
