//! What a chat message asks for.

/// A routed chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the task list again.
    Show,
    /// Complete the task with this id.
    Done(String),
    /// Add a task from this text.
    Add(String),
    /// Unknown command.
    Ignore,
}

impl Command {
    /// Route a message:
    ///
    /// | text | command |
    /// |---|---|
    /// | `/tasklist`, `/t`, `/tasks`, `/start` | `Show` |
    /// | `/t<id>`, except `/ta...` | `Done(id)`, `id` untrimmed |
    /// | any other `/...` | `Ignore` |
    /// | anything else | `Add(text)` |
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if !text.starts_with('/') {
            return Self::Add(text.to_string());
        }
        match text {
            "/tasklist" | "/t" | "/tasks" | "/start" => Self::Show,
            _ => match text.strip_prefix("/t") {
                Some(id) if !id.starts_with('a') => Self::Done(id.to_string()),
                _ => Self::Ignore,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/tasklist")]
    #[case("/t")]
    #[case("/tasks")]
    #[case("/start")]
    fn show_commands(#[case] text: &str) {
        assert_eq!(Command::parse(text), Command::Show);
    }

    #[rstest]
    #[case("/t42", "42")]
    #[case("/tMTIzNDU2Nzg5", "MTIzNDU2Nzg5")]
    #[case("/t   ", "   ")]
    fn done_commands(#[case] text: &str, #[case] id: &str) {
        assert_eq!(Command::parse(text), Command::Done(id.into()));
    }

    #[rstest]
    #[case("/tags")]
    #[case("/tasks2")]
    #[case("/help")]
    fn ignored_commands(#[case] text: &str) {
        assert_eq!(Command::parse(text), Command::Ignore);
    }

    #[test]
    fn plain_text_adds() {
        assert_eq!(
            Command::parse("Buy milk\n2 litres"),
            Command::Add("Buy milk\n2 litres".into())
        );
    }
}
