use std::mem;

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::metrics::Metrics;
use crate::normalize;
use crate::text::tokenize;

/// Lifecycle of a session. Running and Paused may alternate; Finished is terminal
/// until the session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Configurable session lengths
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum SessionLength {
    #[default]
    #[value(name = "60")]
    #[strum(to_string = "60s")]
    OneMinute,
    #[value(name = "120")]
    #[strum(to_string = "120s")]
    TwoMinutes,
    #[value(name = "180")]
    #[strum(to_string = "180s")]
    ThreeMinutes,
}

impl SessionLength {
    pub const ALL: [SessionLength; 3] = [
        SessionLength::OneMinute,
        SessionLength::TwoMinutes,
        SessionLength::ThreeMinutes,
    ];

    pub fn secs(self) -> u32 {
        match self {
            SessionLength::OneMinute => 60,
            SessionLength::TwoMinutes => 120,
            SessionLength::ThreeMinutes => 180,
        }
    }

    /// The next length in the cycle, wrapping around
    pub fn next(self) -> Self {
        match self {
            SessionLength::OneMinute => SessionLength::TwoMinutes,
            SessionLength::TwoMinutes => SessionLength::ThreeMinutes,
            SessionLength::ThreeMinutes => SessionLength::OneMinute,
        }
    }
}

impl TryFrom<u32> for SessionLength {
    type Error = String;

    fn try_from(secs: u32) -> std::result::Result<Self, Self::Error> {
        SessionLength::ALL
            .into_iter()
            .find(|l| l.secs() == secs)
            .ok_or_else(|| format!("unsupported session length: {secs}s"))
    }
}

impl From<SessionLength> for u32 {
    fn from(l: SessionLength) -> Self {
        l.secs()
    }
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    #[serde(skip_serializing)]
    pub words: &'a [String],
    pub cursor: usize,
    /// Word the user is currently typing, `None` once the text is exhausted
    pub active_word: Option<usize>,
    pub input: &'a str,
    /// Whether the trimmed input is still a normalized prefix of the active word
    pub on_track: bool,
    pub phase: Phase,
    pub duration_secs: u32,
    pub remaining_secs: u32,
    pub correct_words: usize,
    pub correct_letters: usize,
    pub metrics: Metrics,
}

/// The typing session engine.
///
/// Every command is applied synchronously. A command issued in a phase that
/// forbids it returns [`SessionError::InvalidPhaseTransition`] and changes nothing.
#[derive(Debug, Clone)]
pub struct Session {
    text: String,
    words: Vec<String>,
    cursor: usize,
    input: String,
    phase: Phase,
    length: SessionLength,
    remaining_secs: u32,
    correct_words: usize,
    correct_letters: usize,
    metrics: Metrics,
}

impl Session {
    pub fn new(text: impl Into<String>, length: SessionLength) -> Result<Self> {
        let text = text.into();
        let words = tokenize(&text);
        if words.is_empty() {
            return Err(SessionError::EmptyReferenceText);
        }
        Ok(Self::fresh(text, words, length))
    }

    fn fresh(text: String, words: Vec<String>, length: SessionLength) -> Self {
        Self {
            text,
            words,
            cursor: 0,
            input: String::new(),
            phase: Phase::Idle,
            length,
            remaining_secs: length.secs(),
            correct_words: 0,
            correct_letters: 0,
            metrics: Metrics::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn length(&self) -> SessionLength {
        self.length
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let active_word = (self.cursor < self.words.len()).then_some(self.cursor);
        let on_track = active_word
            .map(|i| normalize::is_on_track(&self.input, &self.words[i]))
            .unwrap_or(true);

        Snapshot {
            words: &self.words,
            cursor: self.cursor,
            active_word,
            input: &self.input,
            on_track,
            phase: self.phase,
            duration_secs: self.length.secs(),
            remaining_secs: self.remaining_secs,
            correct_words: self.correct_words,
            correct_letters: self.correct_letters,
            metrics: self.metrics,
        }
    }

    fn require(&self, allowed: &[Phase], command: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            debug!("ignoring '{}' while {}", command, self.phase);
            Err(SessionError::InvalidPhaseTransition {
                command,
                phase: self.phase,
            })
        }
    }

    pub fn configure_duration(&mut self, length: SessionLength) -> Result<()> {
        self.require(&[Phase::Idle], "change the duration")?;
        debug!("session length set to {}", length);
        self.length = length;
        self.remaining_secs = length.secs();
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.require(&[Phase::Idle], "start")?;
        self.cursor = 0;
        self.input.clear();
        self.correct_words = 0;
        self.correct_letters = 0;
        self.remaining_secs = self.length.secs();
        self.metrics = Metrics::default();
        self.phase = Phase::Running;
        info!(
            "session started: {} words, {}",
            self.words.len(),
            self.length
        );
        Ok(())
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Result<()> {
        self.require(&[Phase::Running], "tick")?;
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            // the full configured length, not the clamped countdown
            self.recompute(self.length.secs());
            self.finish();
        } else {
            self.recompute(self.elapsed_secs());
        }
        Ok(())
    }

    /// Replace the in-progress entry for the current word. Counters are untouched.
    pub fn update_input(&mut self, raw: impl Into<String>) -> Result<()> {
        self.require(&[Phase::Running], "edit the input")?;
        self.input = raw.into();
        Ok(())
    }

    /// Close the current word, scoring it against the reference word.
    /// A blank or wrong entry still advances the cursor.
    pub fn submit_word(&mut self) -> Result<()> {
        self.require(&[Phase::Running], "submit a word")?;

        let Some(expected) = self.words.get(self.cursor) else {
            self.finish();
            return Ok(());
        };

        let trimmed = self.input.trim();
        let scored = normalize::matches(trimmed, expected).then(|| trimmed.chars().count() + 1);
        debug!(
            "word {} {:?} against {:?}: {}",
            self.cursor,
            trimmed,
            expected,
            if scored.is_some() { "correct" } else { "wrong" }
        );

        if let Some(letters) = scored {
            self.correct_words += 1;
            self.correct_letters += letters;
        }
        self.cursor += 1;
        self.input.clear();
        self.recompute(self.elapsed_secs());

        if self.cursor >= self.words.len() {
            self.finish();
        }
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<()> {
        self.require(&[Phase::Running, Phase::Paused], "toggle pause")?;
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            _ => Phase::Running,
        };
        debug!("session {}", self.phase);
        Ok(())
    }

    /// Rebuild the session from its reference text and return to Idle.
    /// Only the configured length survives.
    pub fn reset(&mut self) {
        let words = tokenize(&self.text);
        let text = mem::take(&mut self.text);
        *self = Self::fresh(text, words, self.length);
    }

    /// Rebuild with a different reference text and return to Idle.
    /// On error the current session is kept as is.
    pub fn reset_with_text(&mut self, text: impl Into<String>) -> Result<()> {
        *self = Self::new(text, self.length)?;
        Ok(())
    }

    /// Reset and start again, from any phase.
    pub fn restart(&mut self) {
        self.reset();
        self.phase = Phase::Running;
        info!("session restarted");
    }

    fn elapsed_secs(&self) -> u32 {
        self.length.secs() - self.remaining_secs
    }

    fn recompute(&mut self, elapsed_secs: u32) {
        self.metrics = Metrics::compute(
            self.correct_words,
            self.correct_letters,
            self.cursor,
            elapsed_secs,
        );
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        info!(
            "session finished: {} wpm, {} lpm, {}% accuracy ({}/{} words)",
            self.metrics.wpm,
            self.metrics.lpm,
            self.metrics.accuracy,
            self.correct_words,
            self.cursor
        );
    }
}
