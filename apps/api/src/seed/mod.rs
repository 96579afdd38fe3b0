//! Dummy-data seeder for the `resume_analysis` table.
//!
//! Standalone utility: nothing in the analysis service reads these rows.

use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::job_posting::NewJobPosting;

const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Data Analyst",
    "Web Developer",
    "AI Engineer",
    "Backend Developer",
];

const COMPANIES: &[&str] = &["TechNova", "InnoWave", "DataSense", "CodeCraft", "NextGenSoft"];

const LOCATIONS: &[&str] = &["Mumbai", "Pune", "Bangalore", "Delhi", "Hyderabad"];

const SKILLS_POOL: &[&str] = &[
    "Python",
    "SQL",
    "Java",
    "Machine Learning",
    "HTML",
    "CSS",
    "React",
    "Flask",
];

const SKILLS_PER_POSTING: usize = 4;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS resume_analysis (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        job_title VARCHAR(100) NOT NULL,
        company_name VARCHAR(100) NOT NULL,
        location VARCHAR(100) NOT NULL,
        company_address VARCHAR(200) NOT NULL,
        salary VARCHAR(50) NOT NULL,
        experience VARCHAR(50) NOT NULL,
        skills_required TEXT NOT NULL,
        resume_skills TEXT NOT NULL DEFAULT '',
        match_score VARCHAR(10) NOT NULL DEFAULT '',
        profile_summary TEXT NOT NULL DEFAULT ''
    )
"#;

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Generates the `index`-th random posting. The index is appended to the company name.
pub fn generate_posting<R: Rng + ?Sized>(index: usize, rng: &mut R) -> NewJobPosting {
    let skills: Vec<&str> = SKILLS_POOL
        .choose_multiple(rng, SKILLS_PER_POSTING)
        .copied()
        .collect();

    NewJobPosting {
        job_title: pick(rng, JOB_TITLES).to_string(),
        company_name: format!("{} {index}", pick(rng, COMPANIES)),
        location: pick(rng, LOCATIONS).to_string(),
        company_address: format!(
            "{} Main Street, {}",
            rng.random_range(101..=999),
            pick(rng, LOCATIONS)
        ),
        salary: format!("{} LPA", rng.random_range(5..=20)),
        experience: format!("{}+ years", rng.random_range(1..=5)),
        skills_required: skills.join(", "),
    }
}

pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_TABLE_SQL).execute(pool).await?;
    Ok(())
}

/// Inserts all postings inside a single transaction. Returns the row count.
pub async fn insert_postings(pool: &SqlitePool, postings: &[NewJobPosting]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for posting in postings {
        let result = sqlx::query(
            r#"
            INSERT INTO resume_analysis
                (job_title, company_name, location, company_address,
                 salary, experience, skills_required,
                 resume_skills, match_score, profile_summary)
            VALUES (?, ?, ?, ?, ?, ?, ?, '', '', '')
            "#,
        )
        .bind(&posting.job_title)
        .bind(&posting.company_name)
        .bind(&posting.location)
        .bind(&posting.company_address)
        .bind(&posting.salary)
        .bind(&posting.experience)
        .bind(&posting.skills_required)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Creates the table if needed and bulk-inserts `count` random postings.
pub async fn seed_dummy_data<R: Rng + ?Sized>(
    pool: &SqlitePool,
    count: usize,
    rng: &mut R,
) -> Result<u64> {
    create_schema(pool).await?;

    let postings: Vec<NewJobPosting> = (0..count).map(|i| generate_posting(i, rng)).collect();
    let inserted = insert_postings(pool, &postings).await?;

    info!("Inserted {inserted} dummy job entries into resume_analysis");
    Ok(inserted)
}
