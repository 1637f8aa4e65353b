//! Pagination policy for the response flow.

use crate::{Question, Survey};

/// How a survey's questions are split into navigation steps.
///
/// With `one_question_per_page` set, each step carries exactly one
/// question; otherwise the whole survey is a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    total_steps: usize,
    one_question_per_page: bool,
}

impl StepPlan {
    /// Derive the plan from a survey's settings and question count.
    pub fn for_survey(survey: &Survey) -> Self {
        let one_question_per_page = survey.settings.one_question_per_page;
        Self {
            total_steps: if one_question_per_page {
                survey.questions.len()
            } else {
                1
            },
            one_question_per_page,
        }
    }

    /// Total number of steps. At least 1, even for an empty survey.
    pub fn total_steps(&self) -> usize {
        self.total_steps.max(1)
    }

    /// Whether the given step is the last one.
    pub fn is_last_step(&self, step: usize) -> bool {
        step + 1 >= self.total_steps()
    }

    /// Completion fraction in 0.0..=1.0 for the given step.
    pub fn progress(&self, step: usize) -> f64 {
        (step + 1) as f64 / self.total_steps() as f64
    }

    /// The questions rendered on the given step. Empty if the step is out
    /// of range.
    pub fn questions_for_step<'a>(&self, survey: &'a Survey, step: usize) -> &'a [Question] {
        if self.one_question_per_page {
            match survey.questions.get(step) {
                Some(_) => &survey.questions[step..=step],
                None => &[],
            }
        } else {
            &survey.questions
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Question, QuestionType};

    fn survey(question_count: usize, one_per_page: bool) -> Survey {
        let mut survey = Survey::new("s1", "Survey", "");
        survey.settings.one_question_per_page = one_per_page;
        for i in 0..question_count {
            survey.questions.push(Question::new(
                format!("q{i}"),
                QuestionType::Text,
                format!("Question {i}"),
                i,
            ));
        }
        survey
    }

    #[test]
    fn one_question_per_page_steps_per_question() {
        let survey = survey(3, true);
        let plan = StepPlan::for_survey(&survey);
        assert_eq!(plan.total_steps(), 3);
        assert_eq!(plan.questions_for_step(&survey, 1).len(), 1);
        assert_eq!(plan.questions_for_step(&survey, 1)[0].id, "q1");
        assert!(plan.questions_for_step(&survey, 5).is_empty());
        assert!(!plan.is_last_step(1));
        assert!(plan.is_last_step(2));
    }

    #[test]
    fn single_page_renders_all_questions() {
        let survey = survey(3, false);
        let plan = StepPlan::for_survey(&survey);
        assert_eq!(plan.total_steps(), 1);
        assert_eq!(plan.questions_for_step(&survey, 0).len(), 3);
        assert!(plan.is_last_step(0));
        assert_eq!(plan.progress(0), 1.0);
    }

    #[test]
    fn progress_fraction() {
        let survey = survey(4, true);
        let plan = StepPlan::for_survey(&survey);
        assert_eq!(plan.progress(0), 0.25);
        assert_eq!(plan.progress(3), 1.0);
    }

    #[test]
    fn empty_survey_still_has_one_step() {
        let survey = survey(0, true);
        let plan = StepPlan::for_survey(&survey);
        assert_eq!(plan.total_steps(), 1);
        assert!(plan.is_last_step(0));
    }
}
