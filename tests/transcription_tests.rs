//! Whisper API transcriber tests against a mock HTTP server

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use keyscribe::application::ports::{Transcriber, TranscriptionError};
use keyscribe::domain::audio::AudioBuffer;
use keyscribe::infrastructure::{WhisperApiOptions, WhisperApiTranscriber};

fn one_second_of_silence() -> AudioBuffer {
    AudioBuffer::new(vec![0i16; 16_000])
}

fn transcriber_for(server: &MockServer) -> WhisperApiTranscriber {
    WhisperApiTranscriber::new("test-key", WhisperApiOptions::default())
        .with_base_url(format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn transcribes_successful_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "hello world"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let text = transcriber
        .transcribe(&one_second_of_silence())
        .await
        .expect("transcription should succeed");

    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn maps_401_to_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber
        .transcribe(&one_second_of_silence())
        .await
        .expect_err("401 should be an error");

    assert!(matches!(err, TranscriptionError::InvalidApiKey));
}

#[tokio::test]
async fn maps_429_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber
        .transcribe(&one_second_of_silence())
        .await
        .expect_err("429 should be an error");

    assert!(matches!(err, TranscriptionError::RateLimited));
}

#[tokio::test]
async fn surfaces_api_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"message": "Audio file is too short"}
        })))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber
        .transcribe(&one_second_of_silence())
        .await
        .expect_err("400 should be an error");

    match err {
        TranscriptionError::ApiError(message) => {
            assert!(message.contains("Audio file is too short"), "got: {}", message);
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber
        .transcribe(&one_second_of_silence())
        .await
        .expect_err("unparseable body should be an error");

    assert!(matches!(err, TranscriptionError::ParseError(_)));
}
