pub mod input;
pub mod transcript;

use log::{ debug, error, warn };
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::client::{ ChatBackend, ClientError };
use crate::models::chat::{ present, ChatRequest, HealthResponse, HistoryResponse, ResetRequest };
use crate::models::message::{ ConversationId, Message };
use self::input::{ InputField, Key, KeyAction };
use self::transcript::{ Entry, Transcript, TranscriptView, TypingHandle };

pub const INTRO_FALLBACK: &str = "Oh great, another human. What do you want?";
pub const EMPTY_REPLY_FALLBACK: &str = "I'm speechless. Literally. There was an error.";
pub const CHAT_ERROR_FALLBACK: &str = "Oops, I broke. How ironic. Check if the server is running.";

/// A send whose user message and typing indicator are already on screen and
/// whose chat request has not been issued yet.
#[derive(Debug)]
pub struct PendingSend {
    request: ChatRequest,
    typing: TypingHandle,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.request.message
    }

    pub fn conversation_id(&self) -> &str {
        &self.request.conversation_id
    }
}

pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn TranscriptView>,
    transcript: Mutex<Transcript>,
    input: Mutex<InputField>,
    conversation_id: Mutex<ConversationId>,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>, view: Arc<dyn TranscriptView>) -> Self {
        Self {
            backend,
            transcript: Mutex::new(Transcript::new(view.clone())),
            view,
            input: Mutex::new(InputField::new()),
            conversation_id: Mutex::new(ConversationId::generate()),
        }
    }

    /// Focuses the input, then shows the intro (or its fallback).
    pub async fn load(&self) {
        self.view.focus_input();
        self.load_intro().await;
    }

    async fn load_intro(&self) {
        let text = match self.backend.intro().await {
            Ok(resp) =>
                match present(resp.intro) {
                    Some(intro) => intro,
                    None => {
                        warn!("Intro response carried no intro text, using fallback");
                        INTRO_FALLBACK.to_string()
                    }
                }
            Err(e) => {
                error!("Error loading intro: {}", e);
                INTRO_FALLBACK.to_string()
            }
        };
        self.transcript.lock().await.append(Message::bot(text));
    }

    pub async fn set_input(&self, text: &str) {
        self.input.lock().await.set(text);
    }

    pub async fn type_text(&self, text: &str) {
        self.input.lock().await.push_str(text);
    }

    pub async fn input_value(&self) -> String {
        self.input.lock().await.value().to_string()
    }

    /// Button click.
    pub async fn send(&self) {
        if let Some(pending) = self.begin_send().await {
            self.complete_send(pending).await;
        }
    }

    /// Enter without Shift sends; any other key edits the input.
    pub async fn handle_key(&self, key: Key) {
        if let Some(pending) = self.press_key(key).await {
            self.complete_send(pending).await;
        }
    }

    /// Like `handle_key`, but hands a submitted send back to the caller so the
    /// chat request can run on another task.
    pub async fn press_key(&self, key: Key) -> Option<PendingSend> {
        let action = self.input.lock().await.handle_key(key);
        match action {
            KeyAction::Submit => self.begin_send().await,
            KeyAction::Edited => None,
        }
    }

    /// Appends the user message, clears the input and shows a typing
    /// indicator. Returns `None` without touching anything when the trimmed
    /// input is empty.
    pub async fn begin_send(&self) -> Option<PendingSend> {
        let message = self.input.lock().await.take_trimmed()?;
        // Lock order: transcript, then conversation id.
        let (typing, conversation_id) = {
            let mut transcript = self.transcript.lock().await;
            let conversation_id = self.conversation_id.lock().await.to_string();
            transcript.append(Message::user(message.as_str()));
            (transcript.show_typing(), conversation_id)
        };
        Some(PendingSend {
            request: ChatRequest { message, conversation_id },
            typing,
        })
    }

    /// Issues the chat request, removes the indicator and appends exactly one
    /// bot message: the reply or a fallback.
    pub async fn complete_send(&self, pending: PendingSend) {
        let PendingSend { request, typing } = pending;
        debug!("Sending message in conversation {}", request.conversation_id);

        let reply = match self.backend.chat(&request).await {
            Ok(resp) =>
                match present(resp.response) {
                    Some(text) => text,
                    None => {
                        warn!("Chat response carried no response text");
                        EMPTY_REPLY_FALLBACK.to_string()
                    }
                }
            Err(e) => {
                error!("Error: {}", e);
                CHAT_ERROR_FALLBACK.to_string()
            }
        };

        let mut transcript = self.transcript.lock().await;
        transcript.remove_typing(typing);
        transcript.append(Message::bot(reply));
    }

    /// Clears the transcript and starts a new conversation. The backend is
    /// told about the old conversation while the new intro loads; a failed
    /// notification is only logged.
    pub async fn reset(&self) {
        let previous = {
            let mut transcript = self.transcript.lock().await;
            let mut id = self.conversation_id.lock().await;
            transcript.clear();
            std::mem::replace(&mut *id, ConversationId::generate())
        };

        let notify = async {
            let request = ResetRequest { conversation_id: previous.to_string() };
            match self.backend.reset(&request).await {
                Ok(_) => debug!("Backend reset conversation {}", previous),
                Err(e) => warn!("Error resetting conversation {}: {}", previous, e),
            }
        };
        futures::join!(notify, self.load_intro());
    }

    pub async fn history(&self) -> Result<HistoryResponse, ClientError> {
        let conversation_id = self.conversation_id().await;
        self.backend.history(conversation_id.as_str()).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.backend.health().await
    }

    pub async fn conversation_id(&self) -> ConversationId {
        self.conversation_id.lock().await.clone()
    }

    pub async fn entries(&self) -> Vec<Entry> {
        self.transcript.lock().await.entries().to_vec()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.transcript.lock().await.messages().cloned().collect()
    }

    pub async fn typing_count(&self) -> usize {
        self.transcript.lock().await.typing_count()
    }
}
