//! Speech collaborators - utterances in, spoken messages out
//!
//! The engine consumes plain lowercase text and produces plain text; what
//! sits behind these traits (microphone + transcription, a TTS voice, or a
//! console) is outside the engine's contract. An empty utterance means
//! "nothing understood" and must not be dispatched.

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Lazy, infinite, non-restartable sequence of lowercase utterances.
/// `None` is end of input.
pub trait VoiceInput {
    fn next_utterance(&mut self) -> Option<String>;
}

/// Renders a message to the user. Failures are logged by the caller and
/// never surface into the conversation flow.
pub trait VoiceOutput {
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Line-oriented input from stdin; lowercased and trimmed.
pub struct ConsoleInput {
    stdin: io::Stdin,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceInput for ConsoleInput {
    fn next_utterance(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
            Err(_) => None,
        }
    }
}

/// Prints messages to stdout, flushed per message.
pub struct ConsoleOutput {
    stdout: io::Stdout,
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceOutput for ConsoleOutput {
    fn say(&mut self, message: &str) -> Result<()> {
        let mut handle = self.stdout.lock();
        writeln!(handle, "{}", message)?;
        handle.flush()?;
        Ok(())
    }
}
