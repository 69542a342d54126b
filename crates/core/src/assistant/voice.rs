//! Speech input and output for the assistant.
//!
//! Platforms supply a [`SpeechCapability`]; a [`VoiceSession`] drives one
//! listen, respond, speak cycle at a time on top of it.

use core::future::Future;

use thiserror::Error;

use super::{Assistant, Reply};

/// Errors reported by a speech platform.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The platform has no speech support.
    #[error("speech is not available: {0}")]
    Unavailable(String),

    /// The platform failed while listening or speaking.
    #[error("speech platform error: {0}")]
    Platform(String),
}

/// Host-provided speech recognition and synthesis.
pub trait SpeechCapability {
    /// Listen for one utterance. `Ok(None)` means nothing was heard or the
    /// capture was cancelled.
    fn capture_utterance(&mut self)
    -> impl Future<Output = Result<Option<String>, SpeechError>> + Send;

    /// Read text aloud.
    fn speak_text(&mut self, text: &str) -> impl Future<Output = Result<(), SpeechError>> + Send;

    /// Stop any capture or playback in progress.
    fn cancel(&mut self);
}

/// An assistant wired to a speech capability.
#[derive(Debug)]
pub struct VoiceSession<S> {
    speech: S,
    assistant: Assistant,
}

impl<S: SpeechCapability> VoiceSession<S> {
    pub const fn new(speech: S, assistant: Assistant) -> Self {
        Self { speech, assistant }
    }

    #[must_use]
    pub const fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    #[must_use]
    pub const fn speech(&self) -> &S {
        &self.speech
    }

    /// Split back into the capability and the conversation.
    pub fn into_parts(self) -> (S, Assistant) {
        (self.speech, self.assistant)
    }

    /// Run one turn: capture an utterance, answer it and speak the answer.
    ///
    /// Returns `Ok(None)` when nothing usable was heard.
    ///
    /// # Errors
    ///
    /// Returns the platform's error if capture or playback fails. A failure
    /// while speaking happens after the reply was recorded in the transcript.
    pub async fn turn(&mut self) -> Result<Option<Reply>, SpeechError> {
        let Some(utterance) = self.speech.capture_utterance().await? else {
            return Ok(None);
        };
        let Some(reply) = self.assistant.send(&utterance) else {
            return Ok(None);
        };
        self.speech.speak_text(&reply.message.text).await?;
        Ok(Some(reply))
    }

    /// Stop whatever the platform is doing.
    pub fn cancel(&mut self) {
        self.speech.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::assistant::AssistantAction;

    #[derive(Default)]
    struct Scripted {
        heard: VecDeque<Option<String>>,
        spoken: Vec<String>,
        cancelled: bool,
        mute: bool,
    }

    impl SpeechCapability for Scripted {
        async fn capture_utterance(&mut self) -> Result<Option<String>, SpeechError> {
            self.heard
                .pop_front()
                .ok_or_else(|| SpeechError::Unavailable("no microphone".to_owned()))
        }

        async fn speak_text(&mut self, text: &str) -> Result<(), SpeechError> {
            if self.mute {
                return Err(SpeechError::Platform("speaker busy".to_owned()));
            }
            self.spoken.push(text.to_owned());
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancelled = true;
        }
    }

    fn scripted(lines: &[Option<&str>]) -> Scripted {
        Scripted {
            heard: lines.iter().map(|l| l.map(str::to_owned)).collect(),
            ..Scripted::default()
        }
    }

    #[tokio::test]
    async fn test_turn_speaks_reply() {
        let mut session = VoiceSession::new(
            scripted(&[Some("one masala dosa")]),
            Assistant::new(),
        );
        let reply = session.turn().await.unwrap().unwrap();
        assert!(matches!(reply.action, AssistantAction::ItemAdded { quantity: 1, .. }));

        let (speech, assistant) = session.into_parts();
        assert_eq!(speech.spoken, [reply.message.text]);
        assert_eq!(assistant.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_silence_is_not_a_turn() {
        let mut session =
            VoiceSession::new(scripted(&[None, Some("  ")]), Assistant::new());
        assert!(session.turn().await.unwrap().is_none());
        assert!(session.turn().await.unwrap().is_none());
        assert_eq!(session.assistant().transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_platform_errors_surface() {
        let mut session = VoiceSession::new(scripted(&[]), Assistant::new());
        assert!(matches!(
            session.turn().await,
            Err(SpeechError::Unavailable(_))
        ));

        let mut speech = scripted(&[Some("checkout")]);
        speech.mute = true;
        let mut session = VoiceSession::new(speech, Assistant::new());
        assert!(matches!(session.turn().await, Err(SpeechError::Platform(_))));
        assert_eq!(session.assistant().transcript().len(), 3);
    }

    #[test]
    fn test_cancel_reaches_platform() {
        let mut session = VoiceSession::new(scripted(&[]), Assistant::new());
        session.cancel();
        assert!(session.into_parts().0.cancelled);
    }
}
