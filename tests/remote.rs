mod common;

use std::time::Duration;

use common::{dead_endpoint, StubServer};
use fineprint::remote::{ChatCompletionStrategy, LengthParameter, TextGenerationStrategy};
use fineprint::{
    AnalysisOrchestrator, AnalysisRequest, AnalysisStrategy, Category, Config, DocumentKind,
    Grade, Unavailable,
};

const TIMEOUT: Duration = Duration::from_secs(5);
const TEXT: &str = "We may share your information with partners without prior notice.";

#[test]
fn text_generation_round_trip() {
    let server = StubServer::respond(
        "200 OK",
        r#"[{"generated_text": "Grade: B. The service may share data with advertisers."}]"#,
    );
    let strategy = TextGenerationStrategy::new(server.url.as_str(), TIMEOUT);

    let request = AnalysisRequest::new(TEXT).with_title("Acme Terms");
    let result = strategy.analyze(&request).unwrap();

    assert_eq!(result.transparency_grade, Grade::B);
    assert_eq!(result.score, None);
    assert_eq!(result.red_flags.len(), 1);
    assert_eq!(result.red_flags[0].category, Some(Category::DataSharing));
    assert_eq!(result.summary[0], "Document type: Terms of Service");
    assert_eq!(
        result.summary[1],
        "AI-generated transparency assessment: Grade B"
    );

    let body = server.request_body();
    let inputs = body["inputs"].as_str().unwrap();
    assert!(inputs.starts_with("Analyze this terms of service and rate its transparency"));
    assert!(inputs.contains(TEXT));
    assert_eq!(body["parameters"]["max_length"], 500);
    assert_eq!(body["parameters"]["temperature"], 0.3);
}

#[test]
fn text_generation_length_parameter_is_configurable() {
    let server = StubServer::respond("200 OK", r#"{"generated_text": "Overall grade A."}"#);
    let strategy = TextGenerationStrategy::new(server.url.as_str(), TIMEOUT)
        .with_length_parameter(LengthParameter::MaxNewTokens);

    let result = strategy.analyze(&AnalysisRequest::new(TEXT)).unwrap();
    assert_eq!(result.transparency_grade, Grade::A);

    let body = server.request_body();
    assert_eq!(body["parameters"]["max_new_tokens"], 500);
    assert!(body["parameters"].get("max_length").is_none());
}

#[test]
fn text_generation_http_error_is_unavailable() {
    let server = StubServer::respond("503 Service Unavailable", r#"{"error": "loading"}"#);
    let strategy = TextGenerationStrategy::new(server.url.as_str(), TIMEOUT);

    let err = strategy.analyze(&AnalysisRequest::new(TEXT)).unwrap_err();
    assert!(matches!(err, Unavailable::Status(503)), "got {err:?}");
}

#[test]
fn text_generation_without_text_is_unavailable() {
    let server = StubServer::respond("200 OK", r#"{"error": "model is warming up"}"#);
    let strategy = TextGenerationStrategy::new(server.url.as_str(), TIMEOUT);

    let err = strategy.analyze(&AnalysisRequest::new(TEXT)).unwrap_err();
    assert!(matches!(err, Unavailable::MissingField("generated_text")), "got {err:?}");
}

#[test]
fn unreachable_endpoint_is_unavailable() {
    let strategy = TextGenerationStrategy::new(dead_endpoint(), TIMEOUT);
    let err = strategy.analyze(&AnalysisRequest::new(TEXT)).unwrap_err();
    assert!(matches!(err, Unavailable::Transport(_)), "got {err:?}");
}

#[test]
fn chat_completion_round_trip() {
    let content = serde_json::json!({
        "transparencyGrade": "D",
        "summary": ["Broad sharing", "Arbitration clause"],
        "redFlags": [
            { "severity": "High", "description": "Binding arbitration" },
            { "severity": "medium", "description": "Shares data with partners" }
        ],
        "userInsight": "Read carefully before agreeing."
    })
    .to_string();
    let payload = serde_json::json!({
        "choices": [ { "message": { "role": "assistant", "content": content } } ]
    })
    .to_string();
    let server = StubServer::respond("200 OK", &payload);
    let strategy = ChatCompletionStrategy::new(server.url.as_str(), "gpt-4o", TIMEOUT);
    assert!(strategy.requires_credentials());

    let request = AnalysisRequest::new(TEXT)
        .with_title("Acme Privacy Policy")
        .with_url("https://acme.test/privacy")
        .with_credentials(Some("sk-test"));
    let result = strategy.analyze(&request).unwrap();

    assert_eq!(result.transparency_grade, Grade::D);
    assert_eq!(result.summary, ["Broad sharing", "Arbitration clause"]);
    assert_eq!(result.red_flags.len(), 2);
    assert_eq!(result.user_insight, "Read carefully before agreeing.");

    let body = server.request_body();
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["max_tokens"], 1500);
    assert_eq!(body["messages"][0]["role"], "system");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("Title: Acme Privacy Policy"));
    assert!(user.contains("URL: https://acme.test/privacy"));
    assert!(user.contains(TEXT));
}

#[test]
fn chat_completion_without_credentials_never_calls_out() {
    let strategy = ChatCompletionStrategy::new(dead_endpoint(), "gpt-4o", TIMEOUT);
    let err = strategy.analyze(&AnalysisRequest::new(TEXT)).unwrap_err();
    assert!(matches!(err, Unavailable::MissingCredentials), "got {err:?}");
}

#[test]
fn orchestrator_falls_back_when_remote_fails() {
    let server = StubServer::respond("500 Internal Server Error", "{}");
    let orchestrator = AnalysisOrchestrator::new()
        .with_strategy(TextGenerationStrategy::new(server.url.as_str(), TIMEOUT))
        .with_strategy(TextGenerationStrategy::new(dead_endpoint(), TIMEOUT));

    let request = AnalysisRequest::new(TEXT).with_title("Privacy Policy");
    let result = orchestrator.analyze_text(&request);

    assert_eq!(result, fineprint::analyze(TEXT, "Privacy Policy"));
    assert_eq!(result.score, Some(61));
}

#[test]
fn text_generation_prompt_keeps_2000_characters() {
    let document = "a".repeat(2500);
    let prompt = TextGenerationStrategy::prompt(DocumentKind::Terms, &document);
    let kept = format!("\n\n{}...\n\n", "a".repeat(2000));
    assert!(prompt.contains(&kept));
    assert!(!prompt.contains(&"a".repeat(2001)));

    let short = "a".repeat(2000);
    let prompt = TextGenerationStrategy::prompt(DocumentKind::Terms, &short);
    assert!(prompt.contains(&format!("\n\n{short}\n\n")));
    assert!(!prompt.contains("..."));
}

#[test]
fn text_generation_prompt_counts_characters() {
    let document = "ü".repeat(2500);
    let prompt = TextGenerationStrategy::prompt(DocumentKind::Privacy, &document);
    assert!(prompt.starts_with("Analyze this privacy policy"));
    assert!(prompt.contains(&format!("\n\n{}...\n\n", "ü".repeat(2000))));
    assert!(!prompt.contains(&"ü".repeat(2001)));
}

#[test]
fn chat_completion_sends_at_most_12000_characters() {
    let content = serde_json::json!({
        "transparencyGrade": "B",
        "summary": ["ok"],
        "userInsight": "ok"
    })
    .to_string();
    let payload = serde_json::json!({ "choices": [ { "message": { "content": content } } ] })
        .to_string();
    let server = StubServer::respond("200 OK", &payload);
    let strategy = ChatCompletionStrategy::new(server.url.as_str(), "gpt-4o", TIMEOUT);

    let document = format!("{}ß", "ß".repeat(12000));
    let request = AnalysisRequest::new(&document).with_credentials(Some("sk-test"));
    strategy.analyze(&request).unwrap();

    let body = server.request_body();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.ends_with(&format!("\n{}...", "ß".repeat(12000))));
    assert!(!user.contains(&"ß".repeat(12001)));
}

#[test]
fn configured_length_parameter_reaches_the_wire() {
    let server = StubServer::respond("200 OK", r#"{"response": "Grade: B"}"#);
    let config = Config {
        text_generation_endpoints: vec![server.url.clone()],
        text_generation_length_parameter: LengthParameter::MaxNewTokens,
        timeout: TIMEOUT,
        ..Config::default()
    };
    let orchestrator = AnalysisOrchestrator::from_config(&config);

    let result = orchestrator.analyze_text(&AnalysisRequest::new(TEXT));
    assert_eq!(result.transparency_grade, Grade::B);
    assert_eq!(result.score, None);

    let body = server.request_body();
    assert_eq!(body["parameters"]["max_new_tokens"], 500);
    assert!(body["parameters"].get("max_length").is_none());
}
