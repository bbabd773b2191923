use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use fallguard_analytics::{AnalyticsSink, MemorySink, PropertyValue};
use fallguard_api::router;
use fallguard_api::state::AppState;
use fallguard_core::models::locale::Locale;
use fallguard_storage::local::LocalStore;
use fallguard_storage::store::Store;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct Harness {
    app: Router,
    analytics: Arc<MemorySink>,
    dir: TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let analytics = Arc::new(MemorySink::new());
    let sink: Arc<dyn AnalyticsSink> = analytics.clone();
    let state = AppState::new(
        Store::Local(LocalStore::new(dir.path())),
        sink,
        Locale::En,
    );
    Harness {
        app: router(state),
        analytics,
        dir,
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn low_risk_answers() -> Value {
    json!({
        "ageGroup": "under60",
        "fallenLastYear": false,
        "takingPsychoactiveMeds": false,
        "difficultyWithADL": false,
        "fearfulOfFalling": false,
        "useAssistiveDevice": false,
        "tandemStance22": false,
        "tandemStance30": false,
        "tandemWalk": false,
        "sitToStand12": false,
        "sitToStand30": false,
        "singleLimbStance": false
    })
}

fn high_risk_answers() -> Value {
    json!({
        "ageGroup": "80plus",
        "fallenLastYear": true,
        "takingPsychoactiveMeds": true,
        "difficultyWithADL": true,
        "fearfulOfFalling": true,
        "useAssistiveDevice": true,
        "gotInjuryFromFall": true,
        "multipleLastYear": true,
        "unableToGetUp": false,
        "lostConsciousness": false,
        "hasFrailty": false,
        "tandemStance22": false,
        "tandemStance30": false,
        "tandemWalk": false,
        "sitToStand12": false,
        "sitToStand30": false,
        "singleLimbStance": false
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn questionnaire_is_localized() {
    let h = harness();

    let (status, en) = send(&h.app, Method::GET, "/questionnaire", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(en["locale"], "en");
    assert_eq!(en["steps"].as_array().unwrap().len(), 5);
    assert_eq!(en["age_groups"].as_array().unwrap().len(), 4);
    assert_eq!(en["steps"][1]["step"], "initial_screening");
    assert_eq!(en["steps"][1]["questions"].as_array().unwrap().len(), 5);
    assert_eq!(en["steps"][1]["questions"][0]["field"], "fallenLastYear");
    let prompt = en["steps"][1]["questions"][0]["prompt"].as_str().unwrap();
    assert!(prompt.ends_with('?'));

    let (status, zh) = send(&h.app, Method::GET, "/questionnaire?lang=zh-TW", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(zh["locale"], "zh-TW");
    let prompt = zh["steps"][1]["questions"][0]["prompt"].as_str().unwrap();
    assert!(prompt.ends_with('？'));
    assert_ne!(en["safety_notice"], zh["safety_notice"]);
}

#[tokio::test]
async fn unknown_language_is_rejected() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/questionnaire?lang=fr", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("fr"));
}

#[tokio::test]
async fn scores_a_low_risk_assessment() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/assessments/score",
        Some(low_risk_answers()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "LOW");
    assert_eq!(body["recommendation"], "maintain_regimen");
    let text = body["recommendation_text"].as_str().unwrap();
    assert!(text.contains("low"));
    assert!(body["safety_notice"].is_null());
    let percent = body["probability"]["post_test_probability_percent"]
        .as_f64()
        .unwrap();
    assert!((0.0..=100.0).contains(&percent));
    assert_eq!(body["probability"]["pre_test_probability"], 0.2);

    let events = h.analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "assessment_completed");
    assert_eq!(
        events[0].properties.get("risk_level"),
        Some(&PropertyValue::Text("LOW".to_string()))
    );
    assert_eq!(
        events[0].properties.get("age_group"),
        Some(&PropertyValue::Text("under60".to_string()))
    );
}

#[tokio::test]
async fn high_risk_assessment_carries_the_safety_notice() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/assessments/score?lang=zh-TW",
        Some(high_risk_answers()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locale"], "zh-TW");
    assert_eq!(body["level"], "HIGH");
    assert!(body["safety_notice"].is_string());
    // Every screening answer yes and every physical test failed.
    assert_eq!(body["probability"]["post_test_probability_percent"], 99.7);
}

#[tokio::test]
async fn incomplete_assessment_is_a_bad_request() {
    let h = harness();
    let mut answers = low_risk_answers();
    answers.as_object_mut().unwrap().remove("tandemWalk");

    let (status, body) = send(&h.app, Method::POST, "/assessments/score", Some(answers)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("tandemWalk"));
    assert!(h.analytics.events().is_empty());
}

#[tokio::test]
async fn missing_age_group_is_a_bad_request() {
    let h = harness();
    let mut answers = low_risk_answers();
    answers.as_object_mut().unwrap().remove("ageGroup");

    let (status, _) = send(&h.app, Method::POST, "/assessments/score", Some(answers)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transition_walks_the_flow() {
    let h = harness();

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "action": { "type": "select_age_group", "age_group": "70to79" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "age_group");
    assert_eq!(body["can_advance"], true);

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "state": body["state"], "action": { "type": "next" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "initial_screening");
    assert_eq!(body["can_advance"], false);
}

#[tokio::test]
async fn transition_blocks_next_while_notice_is_pending() {
    let h = harness();
    let state = json!({
        "step": "severity",
        "answers": {
            "ageGroup": "70to79",
            "fallenLastYear": true,
            "takingPsychoactiveMeds": false,
            "difficultyWithADL": false,
            "fearfulOfFalling": false,
            "useAssistiveDevice": false,
            "gotInjuryFromFall": true,
            "multipleLastYear": false,
            "unableToGetUp": false,
            "lostConsciousness": false,
            "hasFrailty": false
        }
    });

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition?lang=en",
        Some(json!({ "state": state, "action": { "type": "next" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "severity");
    assert_eq!(body["state"]["safety_notice"], "pending");
    assert_eq!(body["can_advance"], false);
    assert!(body["safety_notice"].is_string());

    let (status, _) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "state": body["state"], "action": { "type": "next" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "state": body["state"], "action": { "type": "acknowledge_safety_notice" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "physical_tests");
    assert!(body["safety_notice"].is_null());
}

#[tokio::test]
async fn transition_does_not_let_a_client_skip_the_notice() {
    let h = harness();
    let state = json!({
        "step": "physical_tests",
        "safety_notice": "hidden",
        "answers": {
            "ageGroup": "70to79",
            "fallenLastYear": true,
            "takingPsychoactiveMeds": false,
            "difficultyWithADL": false,
            "fearfulOfFalling": false,
            "useAssistiveDevice": false,
            "gotInjuryFromFall": false,
            "multipleLastYear": false,
            "unableToGetUp": true,
            "lostConsciousness": false,
            "hasFrailty": false
        }
    });

    let (status, _) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "state": state, "action": { "type": "next" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "state": state, "action": { "type": "acknowledge_safety_notice" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "physical_tests");
    assert_eq!(body["state"]["safety_notice"], "acknowledged");
}

#[tokio::test]
async fn transition_rejects_an_incomplete_step() {
    let h = harness();
    let state = json!({
        "step": "initial_screening",
        "answers": { "ageGroup": "under60", "fallenLastYear": true }
    });

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/questionnaire/transition",
        Some(json!({ "state": state, "action": { "type": "next" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("takingPsychoactiveMeds"));
}

#[tokio::test]
async fn lead_is_persisted_with_server_side_scoring() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/leads",
        Some(json!({
            "name": "  Lin Mei ",
            "email": "mei@example.com",
            "consent": true,
            "locale": "zh-TW",
            "source": "assessment",
            "answers": high_risk_answers()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap();

    let path = h.dir.path().join("submissions").join(format!("{id}.json"));
    let saved: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    assert_eq!(saved["name"], "Lin Mei");
    assert_eq!(saved["phone"], Value::Null);
    assert_eq!(saved["risk"]["level"], "HIGH");
    assert!(saved["probability"]["post_test_probability_percent"].is_number());

    let events = h.analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "lead_submitted");
    assert_eq!(
        events[0].properties.get("source"),
        Some(&PropertyValue::Text("assessment".to_string()))
    );
    assert_eq!(
        events[0].properties.get("has_assessment"),
        Some(&PropertyValue::Bool(true))
    );
}

#[tokio::test]
async fn contact_lead_without_answers_is_accepted() {
    let h = harness();
    let (status, _) = send(
        &h.app,
        Method::POST,
        "/leads",
        Some(json!({ "name": "Sam", "phone": "+886 2 1234 5678", "consent": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let events = h.analytics.events();
    assert_eq!(
        events[0].properties.get("has_assessment"),
        Some(&PropertyValue::Bool(false))
    );
    assert!(!events[0].properties.contains_key("risk_level"));
}

#[tokio::test]
async fn invalid_leads_are_rejected_and_not_stored() {
    let h = harness();
    let cases = [
        json!({ "name": "Sam", "email": "sam@example.com", "consent": false }),
        json!({ "name": "   ", "email": "sam@example.com", "consent": true }),
        json!({ "name": "Sam", "consent": true }),
        json!({ "name": "Sam", "email": "not-an-email", "consent": true }),
    ];

    for case in cases {
        let (status, body) = send(&h.app, Method::POST, "/leads", Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    assert!(!h.dir.path().join("submissions").exists());
    assert!(h.analytics.events().is_empty());
}

#[tokio::test]
async fn events_are_validated_and_forwarded() {
    let h = harness();

    let (status, _) = send(
        &h.app,
        Method::POST,
        "/events",
        Some(json!({ "name": "cta_clicked", "properties": { "placement": "hero", "step": 2 } })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = send(
        &h.app,
        Method::POST,
        "/events",
        Some(json!({ "name": "CTA Clicked" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/events",
        Some(json!({ "name": "lead_submitted", "properties": { "source": "demo" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("reserved"));

    let events = h.analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "cta_clicked");
    assert_eq!(
        events[0].properties.get("step"),
        Some(&PropertyValue::Number(2.0))
    );
}
