//! Learning content and progress models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i32,
    pub title: String,
    pub description: String,
}

/// Lesson as stored, including the correct answer
#[derive(Debug, Clone, FromRow)]
pub struct LessonRow {
    pub id: String,
    pub module_id: i32,
    pub title: String,
    pub link: String,
    pub question: String,
    pub answers: Json<Vec<String>>,
    pub correct_answer: String,
}

/// Lesson as listed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub link: String,
    pub question: String,
    pub answers: Vec<String>,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            link: row.link,
            question: row.question,
            answers: row.answers.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleWithLessons {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

/// One completed lesson for one user
#[derive(Debug, Clone, FromRow)]
pub struct ProgressRow {
    pub lesson_id: String,
    pub module_id: i32,
    pub completed_at: DateTime<Utc>,
}

/// Progress summary returned by `/api/user-progress`
///
/// `last_module` is 0 and `last_lesson` empty until the first lesson is
/// completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub completed_lessons: Vec<String>,
    pub completed_modules: Vec<i32>,
    pub last_module: i32,
    pub last_lesson: String,
    pub total_progress: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLessonRequest {
    pub lesson_id: String,
    pub module_id: i32,
    pub answer: Option<String>,
}
