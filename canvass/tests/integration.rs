use std::time::{Duration, Instant};

use canvass::{
    Advance, AnswerValue, App, FileStore, MemoryStore, Phase, QuestionPatch, QuestionType,
    SurveyPatch, SurveySeed, SurveySettings, ValidationRule,
};

fn question_ids(app: &App<FileStore>, survey_id: &str) -> Vec<String> {
    app.builder()
        .survey(survey_id)
        .unwrap()
        .questions
        .iter()
        .map(|q| q.id.clone())
        .collect()
}

#[test]
fn author_publish_respond_reload() {
    let dir = tempfile::tempdir().unwrap();

    let survey_id = {
        let mut app = App::load(FileStore::new(dir.path()));
        app.register("author@example.com", "pw", "Alex", "Author")
            .unwrap();

        let survey_id = app.create_survey(SurveySeed {
            title: Some("Customer Feedback".to_string()),
            description: Some("Tell us how we did".to_string()),
        });
        app.add_question(QuestionPatch {
            title: Some("Your email".to_string()),
            question_type: Some(QuestionType::Email),
            required: Some(true),
            ..Default::default()
        });
        app.add_question(QuestionPatch {
            title: Some("Rate us".to_string()),
            question_type: Some(QuestionType::Rating),
            validation: Some(ValidationRule {
                min: Some(1.0),
                max: Some(5.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        app.update_survey(SurveyPatch {
            settings: Some(SurveySettings {
                one_question_per_page: true,
                ..Default::default()
            }),
            ..Default::default()
        });
        app.publish_survey();
        survey_id
    };

    // A fresh process over the same directory sees the published survey.
    let mut app = App::load(FileStore::new(dir.path()));
    let survey = app.builder().survey(&survey_id).unwrap();
    assert!(survey.is_published);
    assert_eq!(survey.questions.len(), 2);
    assert_eq!(app.auth().users().len(), 1);
    assert_eq!(
        app.auth().current_user().map(|u| u.email.as_str()),
        Some("author@example.com")
    );

    app.logout();
    let ids = question_ids(&app, &survey_id);
    app.start_response(&survey_id);

    // The required email question gates the first step.
    assert_eq!(app.advance(), Advance::Blocked);
    assert_eq!(
        app.session().validation_errors()[&ids[0]],
        "This field is required"
    );
    app.update_answer(&ids[0], AnswerValue::from("not-an-email"));
    assert_eq!(app.advance(), Advance::Blocked);
    assert_eq!(
        app.session().validation_errors()[&ids[0]],
        "Please enter a valid email address"
    );
    app.update_answer(&ids[0], AnswerValue::from("r@example.com"));
    assert_eq!(app.advance(), Advance::Moved(1));

    app.update_answer(&ids[1], AnswerValue::Number(4.0));
    assert_eq!(app.advance(), Advance::Submitted);
    assert!(matches!(app.session().phase(), Phase::Submitting { .. }));
    app.tick(Instant::now() + Duration::from_secs(3));
    assert!(matches!(app.session().phase(), Phase::Completed));

    // The submitted response survives another reload.
    let app = App::load(FileStore::new(dir.path()));
    let responses = app.session().responses();
    assert_eq!(responses.len(), 1);
    assert!(responses[0].is_complete);
    assert_eq!(responses[0].respondent_id, "anonymous");
    assert_eq!(
        responses[0].answer(&ids[1]),
        Some(&AnswerValue::Number(4.0))
    );

    let analytics = app.analytics_for(&survey_id).unwrap();
    assert_eq!(analytics.total_responses, 1);
    assert_eq!(analytics.completion_rate, 100.0);
    assert_eq!(analytics.question_analytics[1].answers[0].value, "4");
}

#[test]
fn corrupt_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("canvass-surveys.json"), b"{oops").unwrap();
    std::fs::write(dir.path().join("canvass-current-user.json"), b"42").unwrap();

    let app = App::load(FileStore::new(dir.path()));
    assert!(app.builder().surveys().is_empty());
    assert!(app.auth().current_user().is_none());
}

#[test]
fn preview_never_touches_the_catalogue() {
    let mut app = App::load(MemoryStore::new());
    let survey_id = app.create_survey(SurveySeed::default());
    app.add_question(QuestionPatch {
        required: Some(true),
        ..Default::default()
    });

    app.start_preview();
    assert_eq!(app.advance(), Advance::Finished);
    assert!(app.session().responses().is_empty());
    assert_eq!(app.analytics_for(&survey_id).unwrap().total_responses, 0);
}

#[test]
fn duplicated_survey_collects_its_own_responses() {
    let mut app = App::load(MemoryStore::new());
    let original_id = app.create_survey(SurveySeed {
        title: Some("Original".to_string()),
        ..Default::default()
    });
    app.add_question(QuestionPatch::default());
    app.publish_survey();

    let copy_id = app.duplicate_survey(&original_id).unwrap();
    assert_ne!(copy_id, original_id);
    assert_eq!(
        app.builder().survey(&copy_id).unwrap().title,
        "Original (Copy)"
    );

    app.start_response(&original_id);
    assert_eq!(app.submit(), Advance::Submitted);

    assert_eq!(app.analytics_for(&original_id).unwrap().total_responses, 1);
    assert_eq!(app.analytics_for(&copy_id).unwrap().total_responses, 0);
}
