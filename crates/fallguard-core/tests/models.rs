use fallguard_core::error::CoreError;
use fallguard_core::models::answers::{AgeGroup, AnswerField, QuestionnaireAnswers};
use fallguard_core::models::lead::{LeadRequest, LeadSource};
use fallguard_core::models::locale::{Locale, LocalizedText};
use fallguard_core::storage_keys;
use serde_json::json;
use uuid::Uuid;

fn lead() -> LeadRequest {
    LeadRequest {
        name: "  Chen Mei-Ling ".to_string(),
        email: Some("mei@example.com".to_string()),
        phone: None,
        consent: true,
        locale: Locale::ZhTw,
        source: LeadSource::Assessment,
        message: Some("   ".to_string()),
        answers: None,
    }
}

#[test]
fn answers_use_client_field_names() {
    let answers = QuestionnaireAnswers {
        age_group: Some(AgeGroup::From70To79),
        difficulty_with_adl: Some(true),
        tandem_stance_22: Some(false),
        sit_to_stand_30: Some(true),
        ..Default::default()
    };

    let value = serde_json::to_value(&answers).unwrap();
    assert_eq!(value["ageGroup"], "70to79");
    assert_eq!(value["difficultyWithADL"], true);
    assert_eq!(value["tandemStance22"], false);
    assert_eq!(value["sitToStand30"], true);
    assert!(value["fallenLastYear"].is_null());
}

#[test]
fn missing_fields_deserialize_as_unanswered() {
    let answers: QuestionnaireAnswers =
        serde_json::from_value(json!({ "ageGroup": "80plus", "hasFrailty": true })).unwrap();

    assert_eq!(answers.age_group, Some(AgeGroup::Over80));
    assert_eq!(answers.has_frailty, Some(true));
    assert_eq!(answers.fallen_last_year, None);
}

#[test]
fn get_and_set_agree_for_every_field() {
    let all = AnswerField::INITIAL_SCREENING
        .iter()
        .chain(AnswerField::SEVERITY.iter())
        .chain(AnswerField::PHYSICAL_TESTS.iter())
        .chain(std::iter::once(&AnswerField::HasFrailty));

    for field in all {
        let mut answers = QuestionnaireAnswers::default();
        answers.set(*field, Some(true));
        assert_eq!(answers.get(*field), Some(true), "{field}");

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json[field.as_str()], true, "{field}");

        let as_json = serde_json::to_value(field).unwrap();
        assert_eq!(as_json, field.as_str());
    }
}

#[test]
fn missing_lists_unanswered_fields_in_order() {
    let answers = QuestionnaireAnswers::default()
        .with(AnswerField::FallenLastYear, false)
        .with(AnswerField::FearfulOfFalling, true);

    assert_eq!(
        answers.missing(&AnswerField::INITIAL_SCREENING),
        vec![
            AnswerField::TakingPsychoactiveMeds,
            AnswerField::DifficultyWithAdl,
            AnswerField::UseAssistiveDevice,
        ]
    );
    assert!(answers.any_true(&AnswerField::INITIAL_SCREENING));
    assert!(!answers.all_false(&AnswerField::INITIAL_SCREENING));
}

#[test]
fn age_group_priors() {
    assert_eq!(AgeGroup::Under60.pre_test_probability(), 0.20);
    assert_eq!(AgeGroup::From60To69.pre_test_probability(), 0.30);
    assert_eq!(AgeGroup::From70To79.pre_test_probability(), 0.40);
    assert_eq!(AgeGroup::Over80.pre_test_probability(), 0.50);
    assert_eq!("60to69".parse::<AgeGroup>().unwrap(), AgeGroup::From60To69);
    assert!(matches!(
        "90plus".parse::<AgeGroup>(),
        Err(CoreError::UnknownAgeGroup(_))
    ));
}

#[test]
fn locale_parsing_accepts_browser_tags() {
    assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
    assert_eq!("zh-Hant".parse::<Locale>().unwrap(), Locale::ZhTw);
    assert_eq!("zh_tw".parse::<Locale>().unwrap(), Locale::ZhTw);
    assert!("fr".parse::<Locale>().is_err());
    assert_eq!(serde_json::to_value(Locale::ZhTw).unwrap(), "zh-TW");

    let text = LocalizedText::new("Hello", "您好");
    assert_eq!(text.get(Locale::En), "Hello");
    assert_eq!(text.get(Locale::ZhTw), "您好");
}

#[test]
fn lead_validation_normalizes_fields() {
    let valid = lead().validate().unwrap();
    assert_eq!(valid.name, "Chen Mei-Ling");
    assert_eq!(valid.message, None);
    assert_eq!(valid.email.as_deref(), Some("mei@example.com"));
}

#[test]
fn lead_validation_rejects_bad_input() {
    let mut no_name = lead();
    no_name.name = "   ".to_string();
    assert!(matches!(no_name.validate(), Err(CoreError::MissingName)));

    let mut no_contact = lead();
    no_contact.email = Some(String::new());
    assert!(matches!(no_contact.validate(), Err(CoreError::MissingContact)));

    let mut phone_only = lead();
    phone_only.email = None;
    phone_only.phone = Some("0912-345-678".to_string());
    assert!(phone_only.validate().is_ok());

    let mut bad_email = lead();
    bad_email.email = Some("mei@@example.com".to_string());
    assert!(matches!(bad_email.validate(), Err(CoreError::InvalidEmail(_))));

    let mut no_consent = lead();
    no_consent.consent = false;
    assert!(matches!(no_consent.validate(), Err(CoreError::ConsentRequired)));
}

#[test]
fn submission_keys_round_trip() {
    let id = Uuid::new_v4();
    let key = storage_keys::submission(id);
    assert_eq!(key, format!("submissions/{id}.json"));
    assert_eq!(storage_keys::submission_id(&key), Some(id));
    assert_eq!(storage_keys::submission_id("submissions/readme.txt"), None);
}
