//! Integration tests for `HttpJudge` using wiremock HTTP mocks.

use bh_core::{RawProfile, WebUrl};
use bh_scoring::{classify_borderline, HttpJudge, Judge, JudgeError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_judge(server: &MockServer, api_key: Option<&str>) -> HttpJudge {
    HttpJudge::new(
        &format!("{}/judge", server.uri()),
        api_key,
        5,
        "bh-test/0.1",
    )
    .expect("judge construction should not fail")
}

fn profile(login: &str, bio: &str) -> RawProfile {
    let mut p = RawProfile::new(
        "github",
        login,
        login,
        WebUrl::parse(&format!("https://github.com/{login}")).unwrap(),
    );
    p.bio = Some(bio.to_owned());
    p
}

#[tokio::test]
async fn judge_posts_profiles_and_parses_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/judge"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "profiles": [
                { "source_id": "jane", "bio": "Open to advising teams" },
                { "source_id": "raj", "bio": "Mentor at a robotics club" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "operator_score": 0.7,
                    "angel_score": 0.6,
                    "evidence": ["advises hardware startups"]
                },
                { "operator_score": 0.4, "angel_score": 0.2, "evidence": [] }
            ]
        })))
        .mount(&server)
        .await;

    let judge = test_judge(&server, Some("sk-test"));
    let batch = vec![
        profile("jane", "Open to advising teams"),
        profile("raj", "Mentor at a robotics club"),
    ];
    let results = judge.judge(&batch).await.expect("should parse judgments");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].angel_score, 0.6);
    assert_eq!(results[0].evidence, vec!["advises hardware startups"]);
    assert!(results[1].evidence.is_empty());
}

#[tokio::test]
async fn judge_rejects_short_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/judge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "operator_score": 0.7, "angel_score": 0.6, "evidence": [] }
            ]
        })))
        .mount(&server)
        .await;

    let judge = test_judge(&server, None);
    let batch = vec![profile("jane", "advising"), profile("raj", "mentor")];
    let err = judge.judge(&batch).await.unwrap_err();

    assert!(
        matches!(err, JudgeError::Misaligned { expected: 2, got: 1 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn judge_surfaces_unparsable_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/judge"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let judge = test_judge(&server, None);
    let err = judge.judge(&[profile("jane", "advising")]).await.unwrap_err();

    assert!(matches!(err, JudgeError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn judge_surfaces_server_error_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/judge"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let judge = test_judge(&server, None);
    let err = judge.judge(&[profile("jane", "advising")]).await.unwrap_err();

    assert!(
        matches!(err, JudgeError::UnexpectedStatus { status: 503 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn judge_retries_transient_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/judge"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/judge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "operator_score": 0.3, "angel_score": 0.8, "evidence": ["angel"] }]
        })))
        .mount(&server)
        .await;

    let judge = test_judge(&server, None).with_retries(2, 0);
    let results = judge.judge(&[profile("jane", "advising")]).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].angel_score, 0.8);
}

#[tokio::test]
async fn classify_borderline_batches_through_http_judge() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/judge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "operator_score": 0.5, "angel_score": 0.5, "evidence": ["a"] },
                { "operator_score": 0.5, "angel_score": 0.5, "evidence": ["b"] }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let judge = test_judge(&server, None);
    let profiles = (0..4)
        .map(|i| profile(&format!("user{i}"), "advising founders"))
        .collect();
    let judged = classify_borderline(&judge, profiles, 2).await.unwrap();

    assert_eq!(judged.len(), 4);
    assert_eq!(judged[3].0.source_id, "user3");
    assert_eq!(judged[3].1.evidence, vec!["b"]);
}
