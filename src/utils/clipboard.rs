//! Clipboard access for the pairing code copy button.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for copied text
pub trait Clipboard: Send {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to copy to clipboard")?;
        Ok(())
    }
}

/// In-process clipboard; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shares_contents() {
        let clipboard = MemoryClipboard::new();
        let mut handle = clipboard.clone();
        assert_eq!(clipboard.contents(), None);
        handle.copy("482913").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("482913"));
    }
}
