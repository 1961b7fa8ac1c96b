//! Postgres access for company postings and student profiles.

use sqlx::PgPool;

use crate::models::company::CompanyRow;
use crate::models::student::StudentProfileRow;
use crate::placement::validation::{NewCompany, ProfileUpdate};

pub async fn insert_company(pool: &PgPool, company: &NewCompany) -> Result<CompanyRow, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies (name, base, cgpa, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(company.name.trim())
    .bind(company.base.trim())
    .bind(company.cgpa)
    .bind(company.role.trim())
    .fetch_one(pool)
    .await
}

pub async fn list_companies(pool: &PgPool) -> Result<Vec<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Returns the student's profile, creating an empty one on first access.
pub async fn get_or_create_profile(
    pool: &PgPool,
    username: &str,
) -> Result<StudentProfileRow, sqlx::Error> {
    sqlx::query("INSERT INTO student_profiles (username) VALUES ($1) ON CONFLICT (username) DO NOTHING")
        .bind(username)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, StudentProfileRow>("SELECT * FROM student_profiles WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
}

/// Replaces the editable profile fields, creating the profile if needed.
pub async fn upsert_profile(
    pool: &PgPool,
    username: &str,
    update: &ProfileUpdate,
) -> Result<StudentProfileRow, sqlx::Error> {
    sqlx::query_as::<_, StudentProfileRow>(
        r#"
        INSERT INTO student_profiles (username, name, course, year, cgpa, backlog, resume)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (username) DO UPDATE SET
            name = EXCLUDED.name,
            course = EXCLUDED.course,
            year = EXCLUDED.year,
            cgpa = EXCLUDED.cgpa,
            backlog = EXCLUDED.backlog,
            resume = EXCLUDED.resume,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.course.as_deref())
    .bind(update.year)
    .bind(update.cgpa)
    .bind(update.backlog)
    .bind(update.resume.as_deref())
    .fetch_one(pool)
    .await
}
