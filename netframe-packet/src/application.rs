//! Application-layer payload

use std::borrow::Cow;

/// Raw application bytes with a text view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationData {
    pub payload: Vec<u8>,
}

impl ApplicationData {
    pub fn new(payload: Vec<u8>) -> Self {
        ApplicationData { payload }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// The payload interpreted as UTF-8; invalid sequences become U+FFFD
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl From<&str> for ApplicationData {
    fn from(text: &str) -> Self {
        ApplicationData::new(text.as_bytes().to_vec())
    }
}

impl From<String> for ApplicationData {
    fn from(text: String) -> Self {
        ApplicationData::new(text.into_bytes())
    }
}

impl From<Vec<u8>> for ApplicationData {
    fn from(payload: Vec<u8>) -> Self {
        ApplicationData::new(payload)
    }
}

impl From<&[u8]> for ApplicationData {
    fn from(payload: &[u8]) -> Self {
        ApplicationData::new(payload.to_vec())
    }
}
