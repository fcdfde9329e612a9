//! Rendering the open task list for chat and pushing it to the owner.

use std::sync::Arc;

use ferry_core::entities::Task;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::SyncError;
use crate::list::ScopedList;
use crate::ports::MessageSink;

/// Body shown before the first render.
pub const INITIAL_BODY: &str = "Tasks:";

/// Characters that must be backslash-escaped in MarkdownV2 text.
const RESERVED: &[char] = &[
    '-', '[', ']', '{', '}', '(', ')', '*', '+', '?', '.', ',', '\\', '^', '$', '|', '#', '_',
    '~', '`', '>', '=', '!',
];

/// Escape `text` for Telegram MarkdownV2.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render the open tasks as a MarkdownV2 message.
///
/// ```text
/// *2 /tasks*
///
/// Write report
/// /tabc
///
/// ENG\-9 Fix crash
/// /tdef
/// ```
///
/// Tapping a `/t<id>` line in the chat sends the command that completes the
/// task.
#[must_use]
pub fn render(tasks: &[Task]) -> String {
    let open: Vec<&Task> = tasks.iter().filter(|task| task.is_open()).collect();
    let mut blocks = Vec::with_capacity(open.len() + 1);
    blocks.push(format!("*{} /tasks*", open.len()));
    blocks.extend(open.iter().map(|task| {
        format!(
            "{}\n/t{}",
            escape_markdown(&task.title),
            escape_markdown(&task.id)
        )
    }));
    blocks.join("\n\n")
}

#[derive(Debug)]
struct BoardState {
    current: String,
    last_sent: Option<String>,
}

/// The task-list message as the owner sees it.
///
/// Keeps the latest rendered body and the last body actually delivered, so
/// repeated renders of an unchanged list don't spam the chat.
pub struct TaskBoard {
    sink: Arc<dyn MessageSink>,
    state: Mutex<BoardState>,
}

impl TaskBoard {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self {
            sink,
            state: Mutex::new(BoardState {
                current: INITIAL_BODY.to_string(),
                last_sent: None,
            }),
        }
    }

    pub async fn current(&self) -> String {
        self.state.lock().await.current.clone()
    }

    /// Store `body` and deliver it unless it matches the last delivered body.
    ///
    /// Returns whether a message was sent. A failed delivery leaves the last
    /// delivered body untouched, so the next update retries.
    ///
    /// # Errors
    ///
    /// Propagates the sink error.
    pub async fn update(&self, body: String) -> Result<bool, SyncError> {
        let mut state = self.state.lock().await;
        state.current.clone_from(&body);
        if state.last_sent.as_deref() == Some(body.as_str()) {
            debug!("task board unchanged, not sending");
            return Ok(false);
        }
        self.sink.send_markdown(&body).await?;
        state.last_sent = Some(body);
        info!("task board sent");
        Ok(true)
    }

    /// Deliver the current body again, whether or not it changed.
    ///
    /// # Errors
    ///
    /// Propagates the sink error.
    pub async fn resend(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock().await;
        let body = state.current.clone();
        self.sink.send_markdown(&body).await?;
        state.last_sent = Some(body);
        Ok(())
    }

    /// Re-read the list, render it, and [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// Returns list errors and sink errors.
    pub async fn refresh_from(&self, list: &ScopedList) -> Result<bool, SyncError> {
        let tasks = list.tasks().await?;
        self.update(render(&tasks)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingSink;
    use ferry_core::enums::TaskStatus;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            status,
            ..Task::default()
        }
    }

    #[rstest]
    #[case("Fix bug (urgent) #1", r"Fix bug \(urgent\) \#1")]
    #[case("plain words", "plain words")]
    #[case("v1.2-rc", r"v1\.2\-rc")]
    #[case("a_b*c!", r"a\_b\*c\!")]
    #[case(r"back\slash", r"back\\slash")]
    fn escapes_reserved_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_markdown(input), expected);
    }

    #[test]
    fn render_lists_only_open_tasks() {
        let tasks = vec![
            task("abc", "Write report", TaskStatus::NeedsAction),
            task("old", "Shipped", TaskStatus::Completed),
            task("def", "ENG-9 Fix crash", TaskStatus::NeedsAction),
        ];
        assert_eq!(
            render(&tasks),
            "*2 /tasks*\n\nWrite report\n/tabc\n\nENG\\-9 Fix crash\n/tdef"
        );
    }

    #[test]
    fn render_of_empty_list_is_header_only() {
        assert_eq!(render(&[]), "*0 /tasks*");
    }

    #[test]
    fn render_escapes_ids() {
        let tasks = vec![task("a-b_c", "x", TaskStatus::NeedsAction)];
        assert!(render(&tasks).ends_with(r"/ta\-b\_c"));
    }

    #[tokio::test]
    async fn board_starts_with_placeholder() {
        let board = TaskBoard::new(Arc::new(RecordingSink::default()));
        assert_eq!(board.current().await, INITIAL_BODY);
    }

    #[tokio::test]
    async fn same_body_is_sent_once() {
        let sink = Arc::new(RecordingSink::default());
        let board = TaskBoard::new(sink.clone());

        assert!(board.update("*0 /tasks*".into()).await.unwrap());
        assert!(!board.update("*0 /tasks*".into()).await.unwrap());
        assert_eq!(sink.sent(), ["*0 /tasks*"]);
    }

    #[tokio::test]
    async fn changed_body_is_sent_again() {
        let sink = Arc::new(RecordingSink::default());
        let board = TaskBoard::new(sink.clone());

        board.update("one".into()).await.unwrap();
        board.update("two".into()).await.unwrap();
        assert_eq!(sink.sent(), ["one", "two"]);
        assert_eq!(board.current().await, "two");
    }

    #[tokio::test]
    async fn resend_ignores_duplicate_suppression() {
        let sink = Arc::new(RecordingSink::default());
        let board = TaskBoard::new(sink.clone());

        board.update("body".into()).await.unwrap();
        board.resend().await.unwrap();
        board.resend().await.unwrap();
        assert_eq!(sink.sent(), ["body", "body", "body"]);
    }

    #[tokio::test]
    async fn failed_send_is_retried_on_next_update() {
        let sink = Arc::new(RecordingSink::default());
        let board = TaskBoard::new(sink.clone());

        sink.fail_next();
        assert!(board.update("body".into()).await.is_err());
        assert!(board.update("body".into()).await.unwrap());
        assert_eq!(sink.sent(), ["body"]);
    }
}
