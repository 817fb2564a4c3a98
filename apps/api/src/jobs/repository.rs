use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::is_foreign_key_violation;
use crate::matching::PostingSource;
use crate::models::job::{JobInput, JobRow, JobSummary, Posting, PostingFilter};

const SUMMARY_COLUMNS: &str =
    "id, job_title, company, location, salary, job_type, work_mode, experience, description, skills";

/// Job posting and saved-job storage. Carried in `AppState` as
/// `Arc<dyn JobRepository>`; doubles as the matcher's posting source.
#[async_trait]
pub trait JobRepository: PostingSource {
    async fn insert(&self, owner: Uuid, job: &JobInput) -> Result<Uuid, sqlx::Error>;

    async fn list(&self) -> Result<Vec<JobSummary>, sqlx::Error>;

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<JobSummary>, sqlx::Error>;

    async fn find(&self, id: Uuid) -> Result<Option<JobRow>, sqlx::Error>;

    /// Returns false when no posting with `id` is owned by `owner`.
    async fn update(&self, owner: Uuid, id: Uuid, job: &JobInput) -> Result<bool, sqlx::Error>;

    /// Returns false when no posting with `id` is owned by `owner`.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error>;

    async fn is_saved(&self, user: Uuid, job: Uuid) -> Result<bool, sqlx::Error>;

    /// Flips the saved state and returns the new one, or `None` if the
    /// posting does not exist.
    async fn toggle_saved(&self, user: Uuid, job: Uuid) -> Result<Option<bool>, sqlx::Error>;

    async fn list_saved(&self, user: Uuid) -> Result<Vec<JobSummary>, sqlx::Error>;
}

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostingSource for PgJobRepository {
    async fn fetch_postings(&self, filter: &PostingFilter) -> Result<Vec<Posting>, sqlx::Error> {
        sqlx::query_as::<_, Posting>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}, responsibilities, requirements
            FROM jobs
            WHERE ($1::text IS NULL OR experience = $1)
              AND ($2::text IS NULL OR work_mode = $2)
            ORDER BY created_at, id
            "#
        ))
        .bind(filter.experience.as_deref())
        .bind(filter.work_mode.as_deref())
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn insert(&self, owner: Uuid, job: &JobInput) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, user_id, job_title, company, location, application_url, job_type,
                 experience, work_mode, salary, skills, description, about_company,
                 responsibilities, requirements, we_offer)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&job.job_title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.application_url)
        .bind(&job.job_type)
        .bind(&job.experience)
        .bind(&job.work_mode)
        .bind(&job.salary)
        .bind(&job.skills)
        .bind(&job.description)
        .bind(&job.about_company)
        .bind(&job.responsibilities)
        .bind(&job.requirements)
        .bind(&job.we_offer)
        .execute(&self.pool)
        .await?;

        info!("Inserted job {id} for user {owner}");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<JobSummary>, sqlx::Error> {
        sqlx::query_as::<_, JobSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<JobSummary>, sqlx::Error> {
        sqlx::query_as::<_, JobSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM jobs WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await
    }

    async fn find(&self, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(&self, owner: Uuid, id: Uuid, job: &JobInput) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET job_title = $1, company = $2, location = $3, application_url = $4,
                job_type = $5, experience = $6, work_mode = $7, salary = $8,
                skills = $9, description = $10, about_company = $11,
                responsibilities = $12, requirements = $13, we_offer = $14
            WHERE id = $15 AND user_id = $16
            "#,
        )
        .bind(&job.job_title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.application_url)
        .bind(&job.job_type)
        .bind(&job.experience)
        .bind(&job.work_mode)
        .bind(&job.salary)
        .bind(&job.skills)
        .bind(&job.description)
        .bind(&job.about_company)
        .bind(&job.responsibilities)
        .bind(&job.requirements)
        .bind(&job.we_offer)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_saved(&self, user: Uuid, job: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM saved_jobs WHERE user_id = $1 AND job_id = $2)",
        )
        .bind(user)
        .bind(job)
        .fetch_one(&self.pool)
        .await
    }

    async fn toggle_saved(&self, user: Uuid, job: Uuid) -> Result<Option<bool>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
            .bind(user)
            .bind(job)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            let inserted = sqlx::query(
                r#"
                INSERT INTO saved_jobs (id, user_id, job_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, job_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user)
            .bind(job)
            .execute(&mut *tx)
            .await;

            // The posting is gone; dropping `tx` rolls back.
            match inserted {
                Err(err) if is_foreign_key_violation(&err) => return Ok(None),
                Err(err) => return Err(err),
                Ok(_) => {}
            }
        }

        tx.commit().await?;
        Ok(Some(removed == 0))
    }

    async fn list_saved(&self, user: Uuid) -> Result<Vec<JobSummary>, sqlx::Error> {
        sqlx::query_as::<_, JobSummary>(
            r#"
            SELECT j.id, j.job_title, j.company, j.location, j.salary, j.job_type,
                   j.work_mode, j.experience, j.description, j.skills
            FROM saved_jobs s
            JOIN jobs j ON j.id = s.job_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
    }
}


#[cfg(test)]
mod tests {
    use super::memory::InMemoryJobs;
    use super::*;

    #[tokio::test]
    async fn test_toggle_saved_on_missing_posting_is_none() {
        let repo = InMemoryJobs::default();
        let user = Uuid::new_v4();
        assert_eq!(repo.toggle_saved(user, Uuid::new_v4()).await.unwrap(), None);

        let id = repo.insert(user, &JobInput::default()).await.unwrap();
        assert_eq!(repo.toggle_saved(user, id).await.unwrap(), Some(true));

        assert!(repo.delete(user, id).await.unwrap());
        assert_eq!(repo.toggle_saved(user, id).await.unwrap(), None);
        assert!(!repo.is_saved(user, id).await.unwrap());
    }
}
