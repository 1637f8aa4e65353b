//! The analytics aggregator: read-only response summaries, recomputed on
//! demand from the catalogues.

use std::collections::BTreeMap;

use crate::{
    AnswerCount, AnswerValue, QuestionAnalytics, Survey, SurveyAnalytics, SurveyResponse,
};

/// Derive per-survey and per-question statistics for one survey.
///
/// Responses belonging to other surveys are ignored. The numbers are
/// simple ratios: completion rate over all of the survey's responses,
/// response rate and value distribution per question.
pub fn survey_analytics(survey: &Survey, responses: &[SurveyResponse]) -> SurveyAnalytics {
    let survey_responses: Vec<&SurveyResponse> = responses
        .iter()
        .filter(|r| r.survey_id == survey.id)
        .collect();
    let total_responses = survey_responses.len();
    let completed = survey_responses.iter().filter(|r| r.is_complete).count();

    let question_analytics = survey
        .questions
        .iter()
        .map(|question| {
            let answered: Vec<&AnswerValue> = survey_responses
                .iter()
                .filter_map(|r| r.answer(&question.id))
                .collect();
            let answered_count = answered.len();

            let mut answers = Vec::new();
            let mut text_answers = Vec::new();
            if question.question_type.has_options() || question.question_type.is_numeric() {
                answers = distribution(&answered, answered_count);
            } else {
                text_answers = answered
                    .iter()
                    .filter_map(|value| value.as_text())
                    .map(str::to_string)
                    .collect();
            }

            QuestionAnalytics {
                question_id: question.id.clone(),
                question_title: question.title.clone(),
                question_type: question.question_type,
                total_responses: answered_count,
                response_rate: percentage(answered_count, total_responses),
                answers,
                text_answers,
            }
        })
        .collect();

    SurveyAnalytics {
        survey_id: survey.id.clone(),
        total_responses,
        completion_rate: percentage(completed, total_responses),
        question_analytics,
    }
}

/// Per-value occurrence counts, highest first (ties by value).
fn distribution(answered: &[&AnswerValue], answered_count: usize) -> Vec<AnswerCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in answered {
        match value {
            AnswerValue::Text(s) => *counts.entry(s.clone()).or_default() += 1,
            AnswerValue::Number(n) => *counts.entry(display_number(*n)).or_default() += 1,
            AnswerValue::Choices(values) => {
                for v in values {
                    *counts.entry(v.clone()).or_default() += 1;
                }
            }
        }
    }

    let mut answers: Vec<AnswerCount> = counts
        .into_iter()
        .map(|(value, count)| AnswerCount {
            value,
            count,
            percentage: percentage(count, answered_count),
        })
        .collect();
    answers.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    answers
}

fn display_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
