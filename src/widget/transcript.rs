//! The visible conversation and the view hooks it drives.
//!
//! `Transcript` owns the ordered entries. Every mutation notifies the
//! `TranscriptView` and then calls its `scroll_to_bottom` hook, so a host never
//! has to watch the transcript for changes itself.

use std::sync::{ Arc, Mutex };

use crate::models::message::{ Message, Sender };

/// Identifies one live typing indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypingHandle(u64);

#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Message(Message),
    Typing(TypingHandle),
}

/// Rendering surface for a transcript (a terminal, a test recorder, ...).
pub trait TranscriptView: Send + Sync {
    fn message_appended(&self, message: &Message);

    fn typing_shown(&self, handle: TypingHandle);

    fn typing_removed(&self, handle: TypingHandle);

    fn cleared(&self);

    /// Called after every transcript mutation.
    fn scroll_to_bottom(&self);

    fn focus_input(&self) {}
}

pub struct Transcript {
    entries: Vec<Entry>,
    next_typing: u64,
    view: Arc<dyn TranscriptView>,
}

impl Transcript {
    pub fn new(view: Arc<dyn TranscriptView>) -> Self {
        Self {
            entries: Vec::new(),
            next_typing: 0,
            view,
        }
    }

    pub fn append(&mut self, message: Message) {
        self.view.message_appended(&message);
        self.entries.push(Entry::Message(message));
        self.view.scroll_to_bottom();
    }

    pub fn show_typing(&mut self) -> TypingHandle {
        let handle = TypingHandle(self.next_typing);
        self.next_typing += 1;
        self.entries.push(Entry::Typing(handle));
        self.view.typing_shown(handle);
        self.view.scroll_to_bottom();
        handle
    }

    /// Removes the indicator if it is still present. A transcript cleared in
    /// the meantime no longer holds it, in which case nothing changes.
    pub fn remove_typing(&mut self, handle: TypingHandle) -> bool {
        let Some(pos) = self.entries.iter().position(|e| *e == Entry::Typing(handle)) else {
            return false;
        };
        self.entries.remove(pos);
        self.view.typing_removed(handle);
        self.view.scroll_to_bottom();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.view.cleared();
        self.view.scroll_to_bottom();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Message(m) => Some(m),
            Entry::Typing(_) => None,
        })
    }

    pub fn typing_count(&self) -> usize {
        self.entries.iter().filter(|e| matches!(e, Entry::Typing(_))).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    Appended(Sender, String),
    TypingShown(TypingHandle),
    TypingRemoved(TypingHandle),
    Cleared,
    Scrolled,
    Focused,
}

/// Headless view that records every hook call in order.
#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded events with the scroll hooks filtered out.
    pub fn changes(&self) -> Vec<ViewEvent> {
        self.events().into_iter().filter(|e| *e != ViewEvent::Scrolled).collect()
    }

    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event);
    }
}

impl TranscriptView for RecordingView {
    fn message_appended(&self, message: &Message) {
        self.record(ViewEvent::Appended(message.sender, message.text.clone()));
    }

    fn typing_shown(&self, handle: TypingHandle) {
        self.record(ViewEvent::TypingShown(handle));
    }

    fn typing_removed(&self, handle: TypingHandle) {
        self.record(ViewEvent::TypingRemoved(handle));
    }

    fn cleared(&self) {
        self.record(ViewEvent::Cleared);
    }

    fn scroll_to_bottom(&self) {
        self.record(ViewEvent::Scrolled);
    }

    fn focus_input(&self) {
        self.record(ViewEvent::Focused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> (Transcript, Arc<RecordingView>) {
        let view = Arc::new(RecordingView::new());
        (Transcript::new(view.clone()), view)
    }

    #[test]
    fn every_mutation_scrolls() {
        let (mut t, view) = transcript();
        t.append(Message::user("hello"));
        let handle = t.show_typing();
        t.remove_typing(handle);
        t.clear();

        let events = view.events();
        assert_eq!(events.iter().filter(|e| **e == ViewEvent::Scrolled).count(), 4);
        assert_eq!(events.last(), Some(&ViewEvent::Scrolled));
        assert_eq!(
            view.changes(),
            vec![
                ViewEvent::Appended(Sender::User, "hello".into()),
                ViewEvent::TypingShown(handle),
                ViewEvent::TypingRemoved(handle),
                ViewEvent::Cleared,
            ]
        );
    }

    #[test]
    fn removes_only_the_matching_indicator() {
        let (mut t, _) = transcript();
        let first = t.show_typing();
        let second = t.show_typing();
        assert_ne!(first, second);
        assert_eq!(t.typing_count(), 2);

        assert!(t.remove_typing(first));
        assert_eq!(t.entries(), &[Entry::Typing(second)]);
    }

    #[test]
    fn removing_a_cleared_indicator_is_a_no_op() {
        let (mut t, view) = transcript();
        let handle = t.show_typing();
        t.clear();
        let before = view.events().len();

        assert!(!t.remove_typing(handle));
        assert_eq!(view.events().len(), before);
        assert!(t.is_empty());
    }

    #[test]
    fn messages_skip_indicators() {
        let (mut t, _) = transcript();
        t.append(Message::user("a"));
        t.show_typing();
        t.append(Message::bot("b"));
        let texts: Vec<_> = t.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
