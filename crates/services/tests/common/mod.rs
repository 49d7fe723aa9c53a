#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use exam_core::model::{
    ExamKey, ExamSittingId, ExamType, ExamYear, Grade, OptionKey, Question, QuestionId,
    QuestionOption, Subject,
};

/// In-process stand-in for the feedback service. Answers 200 while up, 500 while down.
#[derive(Clone)]
pub struct FakeFeedbackService {
    up: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeFeedbackService {
    pub async fn spawn() -> (Self, String) {
        let service = Self {
            up: Arc::new(AtomicBool::new(true)),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let router = Router::new()
            .route("/feedback", post(feedback))
            .with_state(service.clone());
        let base_url = serve(router).await;
        (service, base_url)
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn feedback(
    State(service): State<FakeFeedbackService>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    service.requests.lock().unwrap().push(body.clone());
    if !service.up.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let is_correct = body["is_correct"].as_bool().unwrap_or(false);
    Ok(Json(json!({
        "result": if is_correct { "정답" } else { "오답" },
        "explanation": format!("정답은 {}입니다.", body["correct_answer"].as_str().unwrap_or("?")),
        "tip": "관련 규칙을 다시 읽어보세요.",
        "relatedConcepts": ["COLREG", "SOLAS"],
    })))
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn exam_key() -> ExamKey {
    ExamKey {
        exam_type: ExamType::Navigator,
        grade: Grade::Sixth,
        year: ExamYear::new(2023),
        sitting: ExamSittingId::new(1),
    }
}

fn question(id: u32, subject: Subject, text: &str, options: [&str; 4], correct: OptionKey) -> Question {
    let options = OptionKey::ALL
        .into_iter()
        .zip(options)
        .map(|(key, text)| QuestionOption::new(key, text))
        .collect();
    Question::new(QuestionId::new(id), subject, text, options, correct, "").unwrap()
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        question(
            1,
            Subject::Navigation,
            "해도 위에 편차가 기재되어 있는 부분은?",
            ["해류도", "방위환", "나침도", "지방자기"],
            OptionKey::C,
        ),
        question(
            2,
            Subject::Navigation,
            "선박의 안전항행을 위한 국제규칙은?",
            ["COLREG", "SOLAS", "MARPOL", "STCW"],
            OptionKey::A,
        ),
        question(
            3,
            Subject::Operation,
            "선박의 복원성을 나타내는 요소는?",
            ["GM", "DWT", "LOA", "GRT"],
            OptionKey::A,
        ),
    ]
}
