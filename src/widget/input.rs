/// Keys the input field reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter {
        shift: bool,
    },
    Backspace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter without Shift: the caller should send.
    Submit,
    Edited,
}

#[derive(Clone, Debug, Default)]
pub struct InputField {
    text: String,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn handle_key(&mut self, key: Key) -> KeyAction {
        match key {
            Key::Enter { shift: false } => KeyAction::Submit,
            Key::Enter { shift: true } => {
                self.text.push('\n');
                KeyAction::Edited
            }
            Key::Char(c) => {
                self.text.push(c);
                KeyAction::Edited
            }
            Key::Backspace => {
                self.text.pop();
                KeyAction::Edited
            }
        }
    }

    /// Takes the trimmed text and clears the field. Whitespace-only input is
    /// left in place and yields `None`.
    pub fn take_trimmed(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let message = trimmed.to_string();
        self.text.clear();
        Some(message)
    }
}
