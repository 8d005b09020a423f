//! Best-effort pronunciation playback through an external TTS program.

use std::cell::RefCell;
use std::io;
use std::process::{Child, Command, Stdio};
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no speech command configured")]
    NoCommand,
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub trait Speaker {
    /// Start speaking `text`, replacing anything still playing.
    fn speak(&mut self, text: &str) -> Result<(), SpeechError>;
}

/// Used when speech is turned off.
#[derive(Debug, Default)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// One speaker shared by the selection screens and the running drill, so a
/// new utterance from either side cuts off whatever the other started.
#[derive(Clone)]
pub struct SharedSpeaker(Rc<RefCell<Box<dyn Speaker>>>);

impl SharedSpeaker {
    pub fn new(speaker: Box<dyn Speaker>) -> Self {
        Self(Rc::new(RefCell::new(speaker)))
    }
}

impl Speaker for SharedSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        self.0.borrow_mut().speak(text)
    }
}

/// Runs `program args.. text` in the background. One utterance at a time:
/// a new request kills the previous child first.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(command: &[String]) -> Result<Self, SpeechError> {
        let (program, args) = command.split_first().ok_or(SpeechError::NoCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            current: None,
        })
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        if text.is_empty() {
            return Ok(());
        }
        self.cancel();
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        self.current = Some(child);
        Ok(())
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn default_command() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["say", "-v", "Kyoko"]
    } else {
        &["espeak-ng", "-v", "ja"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

/// Build the speaker described by the config, falling back to silence.
pub fn from_config(enabled: bool, command: &[String]) -> Box<dyn Speaker> {
    if !enabled {
        return Box::new(NullSpeaker);
    }
    match CommandSpeaker::new(command) {
        Ok(speaker) => Box::new(speaker),
        Err(err) => {
            tracing::warn!(%err, "speech disabled");
            Box::new(NullSpeaker)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(matches!(CommandSpeaker::new(&[]), Err(SpeechError::NoCommand)));
    }

    #[test]
    fn test_missing_program_reports_spawn_error() {
        let mut speaker =
            CommandSpeaker::new(&["kanadrill-no-such-tts-binary".to_string()]).unwrap();
        let err = speaker.speak("あ").unwrap_err();
        assert!(matches!(err, SpeechError::Spawn { .. }));
        assert!(err.to_string().contains("kanadrill-no-such-tts-binary"));
    }

    #[test]
    fn test_empty_text_is_a_noop() {
        let mut speaker =
            CommandSpeaker::new(&["kanadrill-no-such-tts-binary".to_string()]).unwrap();
        assert!(speaker.speak("").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_utterance_replaces_previous() {
        let mut speaker = CommandSpeaker::new(&["sleep".to_string()]).unwrap();
        speaker.speak("5").unwrap();
        let first = speaker.current.as_ref().map(|c| c.id());
        speaker.speak("5").unwrap();
        let second = speaker.current.as_ref().map(|c| c.id());
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[derive(Default)]
    struct LastOnly(Rc<RefCell<Option<String>>>);

    impl Speaker for LastOnly {
        fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_shared_speaker_clones_drive_one_voice() {
        let playing = Rc::new(RefCell::new(None));
        let mut selection = SharedSpeaker::new(Box::new(LastOnly(playing.clone())));
        let mut drill = selection.clone();
        selection.speak("い").unwrap();
        drill.speak("あ").unwrap();
        assert_eq!(playing.borrow().as_deref(), Some("あ"));
    }

    #[test]
    fn test_disabled_config_gives_silent_speaker() {
        let mut speaker = from_config(false, &default_command());
        assert!(speaker.speak("こんにちは").is_ok());
    }
}
