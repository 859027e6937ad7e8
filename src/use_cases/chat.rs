use crate::domain::ChatEvent;

/// Chat lines accumulated between report cycles.
#[derive(Debug, Default)]
pub struct ChatBuffer {
    events: Vec<ChatEvent>,
}

impl ChatBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: ChatEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes every buffered event in insertion order, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<ChatEvent> {
        std::mem::take(&mut self.events)
    }
}
