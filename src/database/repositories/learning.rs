//! Learning content and progress repository

use sqlx::PgPool;
use chrono::Utc;
use crate::models::learning::{LessonRow, Module, ProgressRow};
use crate::utils::errors::StarCastError;

const LESSON_COLUMNS: &str = "id, module_id, title, link, question, answers, correct_answer";

#[derive(Clone, Debug)]
pub struct LearningRepository {
    pool: PgPool,
}

impl LearningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_modules(&self) -> Result<Vec<Module>, StarCastError> {
        let modules = sqlx::query_as::<_, Module>(
            "SELECT id, title, description FROM modules ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modules)
    }

    /// Every lesson, ordered by module and lesson id
    pub async fn list_lessons(&self) -> Result<Vec<LessonRow>, StarCastError> {
        let lessons = sqlx::query_as::<_, LessonRow>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons ORDER BY module_id, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons)
    }

    pub async fn find_lesson(&self, lesson_id: &str) -> Result<Option<LessonRow>, StarCastError> {
        let lesson = sqlx::query_as::<_, LessonRow>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lesson)
    }

    pub async fn upsert_module(&self, module: &Module) -> Result<(), StarCastError> {
        sqlx::query(
            r#"
            INSERT INTO modules (id, title, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title, description = EXCLUDED.description
            "#
        )
        .bind(module.id)
        .bind(&module.title)
        .bind(&module.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_lesson(&self, lesson: &LessonRow) -> Result<(), StarCastError> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, module_id, title, link, question, answers, correct_answer)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET module_id = EXCLUDED.module_id,
                title = EXCLUDED.title,
                link = EXCLUDED.link,
                question = EXCLUDED.question,
                answers = EXCLUDED.answers,
                correct_answer = EXCLUDED.correct_answer
            "#
        )
        .bind(&lesson.id)
        .bind(lesson.module_id)
        .bind(&lesson.title)
        .bind(&lesson.link)
        .bind(&lesson.question)
        .bind(&lesson.answers)
        .bind(&lesson.correct_answer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Completed lessons of a user, oldest completion first
    pub async fn progress_for_user(&self, user_id: i64) -> Result<Vec<ProgressRow>, StarCastError> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            r#"
            SELECT p.lesson_id, l.module_id, p.completed_at
            FROM user_progress p
            JOIN lessons l ON l.id = p.lesson_id
            WHERE p.user_id = $1
            ORDER BY p.completed_at ASC, p.id ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Record a completion; completing the same lesson again keeps the first record
    pub async fn mark_completed(&self, user_id: i64, lesson_id: &str) -> Result<bool, StarCastError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_progress (user_id, lesson_id, completed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, lesson_id) DO NOTHING
            "#
        )
        .bind(user_id)
        .bind(lesson_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
