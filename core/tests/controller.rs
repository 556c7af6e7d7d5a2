//! Request/response cycles through `ChatController` with in-memory collaborators.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_lite::future;
use pagechat_core::{
    ChatController, ChatRequest, ExtractionError, FALLBACK_REPLY, Phase, Role, SendError,
    Speaker, TRANSPORT_FALLBACK, TextExtractor, Transport, Upload,
};
use serde_json::{Value, json};
use tokio::sync::Notify;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct Offline;

#[derive(Default)]
struct Scripted {
    replies: Mutex<Vec<Result<Value, Offline>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl Scripted {
    fn new(replies: Vec<Result<Value, Offline>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Scripted {
    type Error = Offline;

    async fn send(&self, request: &ChatRequest) -> Result<Value, Offline> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop().unwrap_or(Err(Offline))
    }
}

/// Holds every request until released.
#[derive(Default)]
struct Gate {
    started: Notify,
    release: Notify,
}

impl Transport for Gate {
    type Error = Offline;

    async fn send(&self, _request: &ChatRequest) -> Result<Value, Offline> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(reply("done"))
    }
}

#[derive(Default)]
struct FixedText {
    result: Option<String>,
    calls: AtomicUsize,
}

impl FixedText {
    fn ok(text: &str) -> Self {
        Self {
            result: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self::default()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for FixedText {
    async fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .ok_or_else(|| ExtractionError::Parse("corrupt xref table".into()))
    }
}

fn reply(text: &str) -> Value {
    json!({ "candidates": [ { "content": { "role": "model", "parts": [ { "text": text } ] } } ] })
}

#[tokio::test]
async fn one_send_appends_user_then_assistant() {
    let chat = ChatController::new(Scripted::new(vec![Ok(reply("Hi there"))]), FixedText::failing());

    let turn = chat.send("  Hello  ").await.unwrap();
    assert_eq!(turn.display_text(), "Hi there");

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role(), Role::User);
    assert_eq!(transcript[0].display_text(), "Hello");
    assert_eq!(transcript[1].role(), Role::Assistant);
    assert_eq!(chat.phase(), Phase::Idle);

    let requests = chat.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].contents[0].role, Speaker::User);
    assert_eq!(
        requests[0].contents[0].parts[0].text,
        "Hello\n\n[Document Content]:\n"
    );
}

#[tokio::test]
async fn blank_input_sends_nothing() {
    let chat = ChatController::new(Scripted::default(), FixedText::failing());
    for input in ["", " ", "\n\t"] {
        assert_eq!(chat.send(input).await, Err(SendError::Empty));
    }
    assert!(chat.transcript().is_empty());
    assert!(chat.transport().requests().is_empty());
    assert!(!chat.snapshot().pending_reply());
}

#[tokio::test]
async fn transport_failure_appends_fallback_and_clears_pending() {
    let chat = ChatController::new(Scripted::new(vec![Err(Offline)]), FixedText::failing());

    let turn = chat.send("Hello").await.unwrap();
    assert_eq!(turn.display_text(), "Failed to get a response from the AI.");
    assert_eq!(turn.display_text(), TRANSPORT_FALLBACK);
    assert!(!chat.snapshot().pending_reply());
    assert_eq!(chat.transcript().len(), 2);
}

#[tokio::test]
async fn malformed_envelope_uses_reply_fallback() {
    let chat = ChatController::new(Scripted::new(vec![Ok(json!({}))]), FixedText::failing());
    let turn = chat.send("Hello").await.unwrap();
    assert_eq!(turn.display_text(), FALLBACK_REPLY);
}

#[tokio::test]
async fn history_is_resent_in_order() {
    let chat = ChatController::new(
        Scripted::new(vec![Ok(reply("first")), Ok(reply("second"))]),
        FixedText::failing(),
    );
    chat.send("one").await.unwrap();
    chat.send("two").await.unwrap();

    let requests = chat.transport().requests();
    let last = &requests[1];
    let roles: Vec<_> = last.contents.iter().map(|c| c.role).collect();
    assert_eq!(roles, [Speaker::User, Speaker::Model, Speaker::User]);
    assert_eq!(last.contents[1].parts[0].text, "first");
    assert!(last.contents[2].parts[0].text.starts_with("two\n\n"));
    assert_eq!(chat.transcript().len(), 4);
}

#[tokio::test]
async fn uploaded_text_is_attached_to_later_turns() {
    let chat = ChatController::new(
        Scripted::new(vec![Ok(reply("ok"))]),
        FixedText::ok("Alpha\nBeta\n"),
    );
    chat.upload(&Upload::pdf("notes.pdf", b"%PDF-1.4".to_vec()))
        .await
        .unwrap();

    let state = chat.snapshot();
    assert_eq!(state.last_document_label(), Some("notes.pdf"));
    assert_eq!(state.last_extracted_text(), "Alpha\nBeta\n");

    chat.send("Summarize").await.unwrap();
    let transcript = chat.transcript();
    assert_eq!(transcript[0].display_text(), "Summarize");
    assert_eq!(
        transcript[0].api_text(),
        "Summarize\n\n[Document Content]:\nAlpha\nBeta\n"
    );
}

#[tokio::test]
async fn failed_extraction_keeps_previous_text() {
    let broken = ChatController::new(Scripted::default(), FixedText::failing());
    broken.upload(&Upload::pdf("b.pdf", Vec::new())).await.unwrap_err();
    assert_eq!(broken.snapshot().last_extracted_text(), "");
    assert_eq!(broken.snapshot().last_document_label(), Some("b.pdf"));

    let chat = ChatController::new(Scripted::default(), Flaky::default());
    chat.upload(&Upload::pdf("good.pdf", Vec::new())).await.unwrap();
    let err = chat
        .upload(&Upload::pdf("bad.pdf", Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::Parse(_)));
    assert_eq!(chat.snapshot().last_extracted_text(), "good\n");
}

/// Succeeds once, then fails.
#[derive(Default)]
struct Flaky {
    calls: AtomicUsize,
}

impl TextExtractor for Flaky {
    async fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok("good\n".into())
        } else {
            Err(ExtractionError::Parse("truncated".into()))
        }
    }
}

#[tokio::test]
async fn non_pdf_upload_is_rejected_before_extraction() {
    let chat = ChatController::new(Scripted::default(), FixedText::ok("never"));
    let err = chat
        .upload(&Upload::new("notes.txt", "text/plain", b"%PDF-1.4".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::UnsupportedType(ref t) if t == "text/plain"));
    assert_eq!(chat.extractor().calls(), 0);
    assert_eq!(chat.snapshot().last_document_label(), None);
    assert_eq!(chat.snapshot().last_extracted_text(), "");
}

#[tokio::test]
async fn second_send_is_rejected_while_awaiting_reply() {
    let chat = ChatController::new(Gate::default(), FixedText::ok("late doc\n"));

    let first = chat.send("one");
    let meanwhile = async {
        chat.transport().started.notified().await;
        assert_eq!(chat.phase(), Phase::AwaitingReply);
        assert_eq!(chat.send("two").await, Err(SendError::Busy));
        // Uploads are independent of the pending reply.
        chat.upload(&Upload::pdf("late.pdf", Vec::new())).await.unwrap();
        chat.transport().release.notify_one();
    };
    let (reply, ()) = tokio::join!(first, meanwhile);

    assert_eq!(reply.unwrap().display_text(), "done");
    assert_eq!(chat.transcript().len(), 2);
    assert_eq!(chat.phase(), Phase::Idle);
    assert_eq!(chat.snapshot().last_extracted_text(), "late doc\n");
}

#[tokio::test]
async fn dropping_a_send_clears_pending() {
    let chat = ChatController::new(Gate::default(), FixedText::failing());

    let mut send = Box::pin(chat.send("one"));
    assert!(future::poll_once(&mut send).await.is_none());
    assert_eq!(chat.phase(), Phase::AwaitingReply);
    drop(send);

    assert_eq!(chat.phase(), Phase::Idle);
    assert_eq!(chat.transcript().len(), 1);
}
