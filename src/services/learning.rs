//! Learning modules and lesson progress

use std::collections::{BTreeMap, HashSet};

use tracing::info;
use crate::database::repositories::LearningRepository;
use crate::models::learning::{CompleteLessonRequest, Lesson, LessonRow, ModuleWithLessons, ProgressRow, UserProgress};
use crate::models::user::User;
use crate::utils::errors::{Result, StarCastError, ValidationError};
use crate::utils::logging::log_user_action;

#[derive(Clone, Debug)]
pub struct LearningService {
    repository: LearningRepository,
}

impl LearningService {
    pub fn new(repository: LearningRepository) -> Self {
        Self { repository }
    }

    /// Modules with their lessons, answers withheld
    pub async fn catalogue(&self) -> Result<Vec<ModuleWithLessons>> {
        let modules = self.repository.list_modules().await?;
        let mut lessons_by_module: BTreeMap<i32, Vec<Lesson>> = BTreeMap::new();
        for row in self.repository.list_lessons().await? {
            lessons_by_module
                .entry(row.module_id)
                .or_default()
                .push(Lesson::from(row));
        }

        Ok(modules
            .into_iter()
            .map(|module| ModuleWithLessons {
                lessons: lessons_by_module.remove(&module.id).unwrap_or_default(),
                id: module.id,
                title: module.title,
                description: module.description,
            })
            .collect())
    }

    pub async fn progress(&self, user: &User) -> Result<UserProgress> {
        let lessons = self.repository.list_lessons().await?;
        let completed = self.repository.progress_for_user(user.id).await?;
        Ok(compute_progress(&lessons, &completed))
    }

    /// Mark a lesson complete after checking module membership and the answer
    pub async fn complete_lesson(&self, user: &User, request: CompleteLessonRequest) -> Result<UserProgress> {
        let lesson = self
            .repository
            .find_lesson(&request.lesson_id)
            .await?
            .ok_or_else(|| StarCastError::LessonNotFound {
                lesson_id: request.lesson_id.clone(),
            })?;

        if lesson.module_id != request.module_id {
            return Err(ValidationError::LessonModuleMismatch {
                lesson_id: lesson.id,
                module_id: request.module_id,
            }
            .into());
        }

        if let Some(answer) = request.answer.as_deref() {
            if answer.trim() != lesson.correct_answer {
                return Err(ValidationError::IncorrectAnswer.into());
            }
        }

        if self.repository.mark_completed(user.id, &lesson.id).await? {
            log_user_action(user.id, "complete_lesson", Some(&lesson.id));
        } else {
            info!(user_id = user.id, lesson_id = %lesson.id, "Lesson already completed");
        }

        self.progress(user).await
    }
}

/// Summarise completions against the full lesson list
///
/// `completed` must be ordered oldest first; the last row is the most recent
/// lesson. A module counts as complete once every one of its lessons is.
pub fn compute_progress(lessons: &[LessonRow], completed: &[ProgressRow]) -> UserProgress {
    let done: HashSet<&str> = completed.iter().map(|p| p.lesson_id.as_str()).collect();

    let mut modules: BTreeMap<i32, bool> = BTreeMap::new();
    for lesson in lessons {
        let all_done = modules.entry(lesson.module_id).or_insert(true);
        *all_done &= done.contains(lesson.id.as_str());
    }

    let total_progress = if lessons.is_empty() {
        0
    } else {
        let known = lessons.iter().filter(|l| done.contains(l.id.as_str())).count();
        ((known as f64 / lessons.len() as f64) * 100.0).round() as u32
    };

    let (last_module, last_lesson) = completed
        .last()
        .map(|p| (p.module_id, p.lesson_id.clone()))
        .unwrap_or_default();

    UserProgress {
        completed_lessons: completed.iter().map(|p| p.lesson_id.clone()).collect(),
        completed_modules: modules
            .into_iter()
            .filter_map(|(id, all_done)| all_done.then_some(id))
            .collect(),
        last_module,
        last_lesson,
        total_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed::CATALOGUE;
    use chrono::{Duration, TimeZone, Utc};

    fn lessons() -> Vec<LessonRow> {
        CATALOGUE
            .iter()
            .flat_map(|m| m.lessons.iter().map(move |l| l.to_row(m.id)))
            .collect()
    }

    fn completed(ids: &[(&str, i32)]) -> Vec<ProgressRow> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        ids.iter()
            .enumerate()
            .map(|(i, (lesson_id, module_id))| ProgressRow {
                lesson_id: lesson_id.to_string(),
                module_id: *module_id,
                completed_at: start + Duration::minutes(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_no_progress() {
        assert_eq!(compute_progress(&lessons(), &[]), UserProgress::default());
    }

    #[test]
    fn test_partial_progress() {
        let progress = compute_progress(&lessons(), &completed(&[("1.1", 1), ("2.3", 2), ("1.2", 1)]));

        assert_eq!(progress.completed_lessons, vec!["1.1", "2.3", "1.2"]);
        assert!(progress.completed_modules.is_empty());
        assert_eq!(progress.last_module, 1);
        assert_eq!(progress.last_lesson, "1.2");
        // 3 of 25
        assert_eq!(progress.total_progress, 12);
    }

    #[test]
    fn test_module_completion() {
        let progress = compute_progress(
            &lessons(),
            &completed(&[("1.1", 1), ("1.2", 1), ("1.3", 1), ("1.4", 1), ("1.5", 1), ("3.1", 3)]),
        );

        assert_eq!(progress.completed_modules, vec![1]);
        assert_eq!(progress.last_module, 3);
        assert_eq!(progress.total_progress, 24);
    }

    #[test]
    fn test_everything_complete() {
        let all: Vec<(String, i32)> = lessons().into_iter().map(|l| (l.id, l.module_id)).collect();
        let refs: Vec<(&str, i32)> = all.iter().map(|(id, m)| (id.as_str(), *m)).collect();
        let progress = compute_progress(&lessons(), &completed(&refs));

        assert_eq!(progress.completed_modules, vec![1, 2, 3, 4, 5]);
        assert_eq!(progress.total_progress, 100);
        assert_eq!(progress.last_lesson, "5.5");
    }

    #[test]
    fn test_empty_catalogue() {
        let progress = compute_progress(&[], &[]);
        assert_eq!(progress.total_progress, 0);
    }
}
