use crate::client::ClientError;
use crate::models::chat::{ HealthResponse, HistoryResponse };
use crate::models::message::{ Message, Sender };
use crate::widget::input::Key;
use crate::widget::transcript::{ TranscriptView, TypingHandle };
use crate::widget::ChatWidget;
use log::{ info, warn };
use std::error::Error;
use std::io::{ self, Write };
use std::sync::{ Arc, Mutex };
use tokio::io::{ AsyncBufRead, AsyncBufReadExt };
use tokio::task::JoinSet;

const CLEAR_LINE: &str = "\r\x1b[2K";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const PROMPT: &str = "> ";
const TYPING: &str = "bot is typing...";

/// Renders the transcript to stdout.
pub struct TerminalView {
    time_format: String,
    live_typing: Mutex<usize>,
}

impl TerminalView {
    pub fn new(time_format: impl Into<String>) -> Self {
        Self {
            time_format: time_format.into(),
            live_typing: Mutex::new(0),
        }
    }

    fn typing(&self) -> usize {
        *self.live_typing.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
    }

    /// What sits below the last message: the indicator or the prompt.
    fn footer(&self) -> &'static str {
        if self.typing() > 0 { TYPING } else { PROMPT }
    }
}

pub fn format_message(message: &Message, time_format: &str) -> String {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    let text = message.text.replace('\n', "\n        ");
    format!("[{}] {}: {}", message.display_time(time_format), who, text)
}

impl TranscriptView for TerminalView {
    fn message_appended(&self, message: &Message) {
        let line = format_message(message, &self.time_format);
        self.write(&format!("{}{}\n{}", CLEAR_LINE, line, self.footer()));
    }

    fn typing_shown(&self, _handle: TypingHandle) {
        *self.live_typing.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.write(&format!("{}{}", CLEAR_LINE, TYPING));
    }

    fn typing_removed(&self, _handle: TypingHandle) {
        {
            let mut live = self.live_typing.lock().unwrap_or_else(|e| e.into_inner());
            *live = live.saturating_sub(1);
        }
        self.write(&format!("{}{}", CLEAR_LINE, self.footer()));
    }

    fn cleared(&self) {
        *self.live_typing.lock().unwrap_or_else(|e| e.into_inner()) = 0;
        self.write(CLEAR_SCREEN);
    }

    fn scroll_to_bottom(&self) {
        let _ = io::stdout().flush();
    }

    fn focus_input(&self) {
        self.write(PROMPT);
        let _ = io::stdout().flush();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    History,
    Health,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/reset" => Some(Command::Reset),
            "/history" => Some(Command::History),
            "/health" => Some(Command::Health),
            "/quit" | "/exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub fn format_history(result: &Result<HistoryResponse, ClientError>) -> String {
    match result {
        Ok(resp) if resp.history.is_empty() =>
            resp.message.clone().unwrap_or_else(|| "No messages yet.".to_string()),
        Ok(resp) => {
            let mut out = format!(
                "History for {} ({} messages, {} turns):",
                resp.conversation_id.as_deref().unwrap_or("this conversation"),
                resp.total_messages.unwrap_or(resp.history.len()),
                resp.turns.unwrap_or(0)
            );
            for entry in &resp.history {
                out.push_str(&format!("\n  {}: {}", entry.role, entry.content));
            }
            out
        }
        Err(e) => format!("Could not fetch history: {}", e),
    }
}

pub fn format_health(result: &Result<HealthResponse, ClientError>) -> String {
    match result {
        Ok(resp) =>
            match &resp.sass_level {
                Some(level) => format!("Backend {} (sass level: {})", resp.status, level),
                None => format!("Backend {}", resp.status),
            }
        Err(e) => format!("Backend unreachable: {}", e),
    }
}

fn print_block(text: &str) {
    let mut out = io::stdout().lock();
    let _ = write!(out, "{}{}\n{}", CLEAR_LINE, text, PROMPT);
    let _ = out.flush();
}

/// Reads input line by line and drives the widget. A trailing backslash
/// continues the message on the next line. Bytes that are not valid UTF-8 are
/// replaced rather than ending the session. Returns on `/quit` or EOF; on EOF
/// in-flight requests are awaited first.
pub async fn run_interactive<R>(
    widget: Arc<ChatWidget>,
    mut input: R
) -> Result<(), Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin
{
    let mut tasks = JoinSet::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if std::str::from_utf8(&buf).is_err() {
            warn!("Input line is not valid UTF-8, replacing invalid bytes");
        }
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim_end_matches(&['\n', '\r'][..]);

        while tasks.try_join_next().is_some() {}

        if widget.input_value().await.is_empty() {
            if let Some(command) = Command::parse(line) {
                match command {
                    Command::Quit => {
                        info!("Quit requested, abandoning {} in-flight request(s)", tasks.len());
                        tasks.abort_all();
                        return Ok(());
                    }
                    Command::Reset => {
                        let w = widget.clone();
                        tasks.spawn(async move { w.reset().await });
                    }
                    Command::History => {
                        let w = widget.clone();
                        tasks.spawn(async move { print_block(&format_history(&w.history().await)) });
                    }
                    Command::Health => {
                        let w = widget.clone();
                        tasks.spawn(async move { print_block(&format_health(&w.health().await)) });
                    }
                }
                continue;
            }
        }

        if let Some(partial) = line.strip_suffix('\\') {
            widget.type_text(partial).await;
            widget.press_key(Key::Enter { shift: true }).await;
            continue;
        }

        widget.type_text(line).await;
        match widget.press_key(Key::Enter { shift: false }).await {
            Some(pending) => {
                let w = widget.clone();
                tasks.spawn(async move { w.complete_send(pending).await });
            }
            None => print_block(""),
        }
    }

    if !tasks.is_empty() {
        info!("Input closed, waiting for {} in-flight request(s)", tasks.len());
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!("Background task failed: {}", e);
        }
    }
    Ok(())
}
