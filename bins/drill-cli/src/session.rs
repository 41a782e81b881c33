//! Practice Session - Submission Orchestrator
//!
//! **Core Responsibility:**
//! Own the current question, language, code and stdin; turn a run into a
//! submission; turn the judge's answer into displayed output and a verdict.
//!
//! **State Machine:**
//! - Idle → Running: `begin_run`
//! - Running → Completed: `on_result` / `on_error`
//! - Completed → Running: another `begin_run`
//! - any → Idle: `set_language` / `pick_random` / `select_question`
//!
//! **Stale Responses:**
//! Every run gets a generation number, and every reset or new run bumps it.
//! A completion carrying an older generation is dropped, so a slow answer
//! can never overwrite the state of a newer question, language or run.

use drill_common::evaluator::{self, OutputSource};
use drill_common::questions;
use drill_common::starter;
use drill_common::types::{Language, Question, SubmissionRequest, SubmissionResult, Verdict};
use rand::Rng;
use tracing::debug;

use crate::client::ProxyClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// A submission handed out by `begin_run`, to be answered with the same generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRun {
    pub generation: u64,
    pub request: SubmissionRequest,
}

#[derive(Debug)]
pub struct Session {
    question_index: usize,
    question: &'static Question,
    language: Language,
    code: String,
    stdin: String,
    output: String,
    output_source: Option<OutputSource>,
    judge_status: Option<String>,
    verdict: Verdict,
    phase: Phase,
    generation: u64,
}

impl Session {
    /// Start on a random question
    pub fn new(language: Language) -> Self {
        let (index, question) = questions::pick_random();
        Self::starting_at(index, question, language)
    }

    /// Start on a given question; `None` when the index is out of range
    pub fn with_question(index: usize, language: Language) -> Option<Self> {
        questions::get(index).map(|q| Self::starting_at(index, q, language))
    }

    fn starting_at(index: usize, question: &'static Question, language: Language) -> Self {
        let mut session = Self {
            question_index: index,
            question,
            language,
            code: String::new(),
            stdin: String::new(),
            output: String::new(),
            output_source: None,
            judge_status: None,
            verdict: Verdict::Unset,
            phase: Phase::Idle,
            generation: 0,
        };
        session.reset();
        session
    }

    /// Throw away edits and results; code and stdin come from the current
    /// question and language again.
    fn reset(&mut self) {
        self.generation += 1;
        self.code = starter::render(self.language, self.question);
        self.stdin = self.question.input.to_string();
        self.output.clear();
        self.output_source = None;
        self.judge_status = None;
        self.verdict = Verdict::Unset;
        self.phase = Phase::Idle;
    }

    pub fn pick_random(&mut self) {
        self.pick_random_with(&mut rand::thread_rng());
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (index, question) = questions::pick_random_with(rng);
        self.question_index = index;
        self.question = question;
        self.reset();
    }

    /// Jump to a question by index. Returns false, leaving state untouched,
    /// when the index is out of range.
    pub fn select_question(&mut self, index: usize) -> bool {
        match questions::get(index) {
            Some(question) => {
                self.question_index = index;
                self.question = question;
                self.reset();
                true
            }
            None => false,
        }
    }

    /// Switch language. Regenerates the starter code, discarding edits.
    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.language = language;
        self.reset();
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }

    pub fn begin_run(&mut self) -> PendingRun {
        self.generation += 1;
        self.phase = Phase::Running;
        PendingRun {
            generation: self.generation,
            request: SubmissionRequest::new(self.language, self.code.clone(), self.stdin.clone()),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Discarding response for an outdated run"
            );
            return false;
        }
        true
    }

    /// Apply a judge response. Returns false if the run was outdated.
    pub fn on_result(&mut self, generation: u64, result: &SubmissionResult) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        let (shown, verdict) = evaluator::evaluate(result, self.question.output);
        debug!(
            source = ?shown.source,
            verdict = ?verdict,
            "Run completed"
        );

        self.output = shown.text;
        self.output_source = Some(shown.source);
        self.judge_status = result.status.as_ref().map(|s| s.description.clone());
        self.verdict = verdict;
        self.phase = Phase::Completed;
        true
    }

    /// Record a failed call. The verdict is cleared, not marked incorrect.
    pub fn on_error(&mut self, generation: u64, message: &str) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        self.output = format!("Error: {}", message);
        self.output_source = None;
        self.judge_status = None;
        self.verdict = Verdict::Unset;
        self.phase = Phase::Completed;
        true
    }

    /// Submit the current code and wait for the verdict
    pub async fn run(&mut self, client: &ProxyClient) -> Verdict {
        let pending = self.begin_run();
        match client.execute(&pending.request).await {
            Ok(result) => {
                self.on_result(pending.generation, &result);
            }
            Err(e) => {
                self.on_error(pending.generation, &format!("{:#}", e));
            }
        }
        self.verdict
    }

    pub fn question(&self) -> &'static Question {
        self.question
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn output_source(&self) -> Option<OutputSource> {
        self.output_source
    }

    pub fn judge_status(&self) -> Option<&str> {
        self.judge_status.as_deref()
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use drill_common::questions::QUESTIONS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone)]
    struct MockProxyState {
        reply: Arc<(StatusCode, Value)>,
        requests: Arc<Mutex<Vec<Value>>>,
    }

    async fn run_handler(
        State(state): State<MockProxyState>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        state.requests.lock().unwrap().push(body);
        let (status, body) = &*state.reply;
        (*status, Json(body.clone()))
    }

    /// Execution proxy stand-in listening on an ephemeral port
    pub(crate) struct MockProxy {
        pub url: String,
        pub requests: Arc<Mutex<Vec<Value>>>,
    }

    impl MockProxy {
        pub(crate) async fn start(status: StatusCode, reply: Value) -> Self {
            let state = MockProxyState {
                reply: Arc::new((status, reply)),
                requests: Arc::new(Mutex::new(Vec::new())),
            };
            let requests = state.requests.clone();

            let app = Router::new()
                .route("/api/run", post(run_handler))
                .with_state(state);

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                url: format!("http://{}", addr),
                requests,
            }
        }
    }

    fn question_expecting(expected: &str) -> usize {
        QUESTIONS
            .iter()
            .position(|q| q.output == expected)
            .expect("bank has a question with this expected output")
    }

    fn stdout(text: &str) -> SubmissionResult {
        SubmissionResult {
            stdout: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_is_initialized_from_question() {
        let session = Session::with_question(0, Language::Python).unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.question(), &QUESTIONS[0]);
        assert_eq!(session.stdin(), QUESTIONS[0].input);
        assert_eq!(session.code(), starter::render(Language::Python, &QUESTIONS[0]));
        assert_eq!(session.verdict(), Verdict::Unset);
        assert_eq!(session.output(), "");

        assert!(Session::with_question(QUESTIONS.len(), Language::Python).is_none());
    }

    #[test]
    fn test_begin_run_builds_request_from_current_state() {
        let mut session = Session::with_question(1, Language::Java).unwrap();
        session.set_code("class Main {}");
        session.set_stdin("3\n1 1 1");

        let pending = session.begin_run();
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(
            pending.request,
            SubmissionRequest {
                source_code: "class Main {}".to_string(),
                language_id: 62,
                stdin: "3\n1 1 1".to_string(),
            }
        );
    }

    #[test]
    fn test_verdicts() {
        let index = question_expecting("120");
        let mut session = Session::with_question(index, Language::Python).unwrap();

        let run = session.begin_run();
        assert!(session.on_result(run.generation, &stdout("120\n")));
        assert_eq!(session.phase(), Phase::Completed);
        assert_eq!(session.output(), "120");
        assert_eq!(session.verdict(), Verdict::Correct);

        let run = session.begin_run();
        session.on_result(run.generation, &stdout("121\n"));
        assert_eq!(session.verdict(), Verdict::Incorrect);

        let run = session.begin_run();
        let compile_error = SubmissionResult {
            stdout: Some(String::new()),
            compile_output: Some("error: expected expression\n".to_string()),
            stderr: Some(String::new()),
            ..Default::default()
        };
        session.on_result(run.generation, &compile_error);
        assert_eq!(session.output(), "error: expected expression");
        assert_eq!(session.output_source(), Some(OutputSource::CompileOutput));
        assert_eq!(session.verdict(), Verdict::Incorrect);
    }

    #[test]
    fn test_on_result_with_debug_logging_enabled() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut session = Session::with_question(0, Language::Python).unwrap();
            let stale = session.begin_run();
            let run = session.begin_run();

            assert!(!session.on_result(stale.generation, &stdout("false")));
            assert!(session.on_result(run.generation, &stdout("true\n")));
            assert_eq!(session.output(), "true");
            assert_eq!(session.output_source(), Some(OutputSource::Stdout));
            assert_eq!(session.verdict(), Verdict::Correct);
        });
    }

    #[test]
    fn test_error_clears_verdict() {
        let mut session = Session::with_question(0, Language::Python).unwrap();
        let run = session.begin_run();
        session.on_result(run.generation, &stdout("true"));
        assert_eq!(session.verdict(), Verdict::Correct);

        let run = session.begin_run();
        assert!(session.on_error(run.generation, "connection refused"));
        assert_eq!(session.output(), "Error: connection refused");
        assert_eq!(session.verdict(), Verdict::Unset);
        assert_eq!(session.phase(), Phase::Completed);
    }

    #[test]
    fn test_language_change_resets_everything() {
        let mut session = Session::with_question(0, Language::Python).unwrap();
        session.set_code("print('true')");
        session.set_stdin("level");
        let run = session.begin_run();
        session.on_result(run.generation, &stdout("true"));

        session.set_language(Language::Cpp);
        assert_eq!(session.language(), Language::Cpp);
        assert_eq!(session.code(), starter::render(Language::Cpp, &QUESTIONS[0]));
        assert_eq!(session.stdin(), QUESTIONS[0].input);
        assert_eq!(session.output(), "");
        assert_eq!(session.verdict(), Verdict::Unset);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_same_language_keeps_edits() {
        let mut session = Session::with_question(0, Language::Js).unwrap();
        session.set_code("console.log('true')");
        session.set_language(Language::Js);
        assert_eq!(session.code(), "console.log('true')");
    }

    #[test]
    fn test_pick_random_resets_code_and_stdin() {
        let mut session = Session::with_question(0, Language::C).unwrap();
        session.set_code("int main(){}");
        session.set_stdin("custom");

        let mut rng = StdRng::seed_from_u64(42);
        session.pick_random_with(&mut rng);

        let q = session.question();
        assert_eq!(q, &QUESTIONS[session.question_index()]);
        assert_eq!(session.stdin(), q.input);
        assert_eq!(session.code(), starter::render(Language::C, q));
        assert_eq!(session.verdict(), Verdict::Unset);
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let mut session = Session::with_question(0, Language::Python).unwrap();
        let run = session.begin_run();

        // User moves on before the answer arrives
        assert!(session.select_question(1));
        assert!(!session.on_result(run.generation, &stdout("true")));
        assert_eq!(session.output(), "");
        assert_eq!(session.verdict(), Verdict::Unset);
        assert_eq!(session.phase(), Phase::Idle);

        assert!(!session.on_error(run.generation, "late failure"));
        assert_eq!(session.output(), "");
    }

    #[test]
    fn test_older_run_cannot_overwrite_newer_one() {
        let mut session = Session::with_question(question_expecting("120"), Language::Python).unwrap();
        let first = session.begin_run();
        let second = session.begin_run();

        assert!(session.on_result(second.generation, &stdout("120")));
        assert!(!session.on_result(first.generation, &stdout("wrong")));
        assert_eq!(session.output(), "120");
        assert_eq!(session.verdict(), Verdict::Correct);
    }

    #[test]
    fn test_select_question_out_of_range_is_noop() {
        let mut session = Session::with_question(0, Language::Python).unwrap();
        session.set_code("edited");
        assert!(!session.select_question(QUESTIONS.len()));
        assert_eq!(session.code(), "edited");
        assert_eq!(session.question_index(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_correct_answer() {
        let index = question_expecting("true");
        let proxy = MockProxy::start(
            StatusCode::OK,
            serde_json::json!({
                "stdout": "true\n",
                "compile_output": null,
                "stderr": null,
                "status": { "id": 3, "description": "Accepted" }
            }),
        )
        .await;
        let client = ProxyClient::new(&proxy.url);

        let mut session = Session::with_question(index, Language::Python).unwrap();
        session.set_code("print('true')");

        let verdict = session.run(&client).await;

        assert_eq!(verdict, Verdict::Correct);
        assert_eq!(session.output(), "true");
        assert_eq!(session.output_source(), Some(OutputSource::Stdout));
        assert_eq!(session.judge_status(), Some("Accepted"));

        let requests = proxy.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["source_code"], "print('true')");
        assert_eq!(requests[0]["language_id"], 71);
        assert_eq!(requests[0]["stdin"], QUESTIONS[index].input);
    }

    #[tokio::test]
    async fn test_end_to_end_proxy_failure() {
        let proxy = MockProxy::start(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "error": "Execution failed", "details": "connection reset" }),
        )
        .await;
        let client = ProxyClient::new(&proxy.url);

        let mut session = Session::with_question(0, Language::Python).unwrap();
        let verdict = session.run(&client).await;

        assert_eq!(verdict, Verdict::Unset);
        assert!(session.output().starts_with("Error: Execution failed"));
        assert!(session.output().contains("connection reset"));
        assert_eq!(session.phase(), Phase::Completed);
    }

    #[tokio::test]
    async fn test_end_to_end_unreachable_proxy() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let mut session = Session::with_question(0, Language::Python).unwrap();
        let verdict = session.run(&ProxyClient::new(&url)).await;

        assert_eq!(verdict, Verdict::Unset);
        assert!(session.output().starts_with("Error: could not reach"));
    }
}
