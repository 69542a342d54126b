//! Terminal conversation with the ordering assistant.
//!
//! Typed lines stand in for speech: each line is one utterance and replies
//! are written back to the terminal.

use echoeats_core::assistant::voice::{SpeechCapability, SpeechError, VoiceSession};
use echoeats_core::{Assistant, AssistantAction, Cart, menu};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const PROMPT: &str = "you> ";
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Line-based speech over an async reader and writer.
pub struct TerminalSpeech<R, W> {
    lines: Lines<R>,
    out: W,
    closed: bool,
}

impl<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> TerminalSpeech<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
            closed: false,
        }
    }

    /// True once input ended or the user asked to leave.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    async fn write(&mut self, text: &str) -> Result<(), SpeechError> {
        self.out
            .write_all(text.as_bytes())
            .await
            .map_err(platform)?;
        self.out.flush().await.map_err(platform)
    }

    fn into_writer(self) -> W {
        self.out
    }
}

fn platform(e: std::io::Error) -> SpeechError {
    SpeechError::Platform(e.to_string())
}

impl<R, W> SpeechCapability for TerminalSpeech<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn capture_utterance(&mut self) -> Result<Option<String>, SpeechError> {
        if self.closed {
            return Ok(None);
        }
        self.write(PROMPT).await?;
        let line = self.lines.next_line().await.map_err(platform)?;
        match line {
            Some(line) if !QUIT_WORDS.contains(&line.trim().to_ascii_lowercase().as_str()) => {
                Ok(Some(line))
            }
            _ => {
                self.closed = true;
                Ok(None)
            }
        }
    }

    async fn speak_text(&mut self, text: &str) -> Result<(), SpeechError> {
        self.write(&format!("echoeats> {text}\n")).await
    }

    fn cancel(&mut self) {
        self.closed = true;
    }
}

/// Run the conversation until input ends, returning the primary cart.
///
/// Items the assistant adds are mirrored into the returned cart the same way
/// the storefront mirrors them into the visitor's cart.
async fn converse<R, W>(speech: TerminalSpeech<R, W>) -> Result<(Cart, W), SpeechError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut session = VoiceSession::new(speech, Assistant::new());
    let mut cart = Cart::new();

    while !session.speech().is_closed() {
        let Some(reply) = session.turn().await? else {
            continue;
        };
        if let AssistantAction::ItemAdded {
            item_id, quantity, ..
        } = reply.action
            && let Some(item) = menu::find(item_id)
        {
            let notice = cart.add_quantity(item, quantity);
            tracing::debug!(notice = %notice.message(), "Mirrored into cart");
        }
    }

    let (speech, _assistant) = session.into_parts();
    Ok((cart, speech.into_writer()))
}

/// Chat on stdin and stdout.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub async fn run() -> Result<(), SpeechError> {
    let mut speech = TerminalSpeech::new(
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    speech
        .speak_text(&format!(
            "{} (type 'quit' to leave)",
            echoeats_core::assistant::GREETING
        ))
        .await?;

    let (cart, mut out) = converse(speech).await?;
    let summary = if cart.is_empty() {
        "Goodbye!\n".to_owned()
    } else {
        format!(
            "Goodbye! {} item(s) left in your cart, total {}\n",
            cart.item_count(),
            cart.total()
        )
    };
    out.write_all(summary.as_bytes()).await.map_err(platform)?;
    out.flush().await.map_err(platform)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use echoeats_core::{MenuItemId, Price};

    use super::*;

    async fn chat(script: &str) -> (Cart, String) {
        let speech = TerminalSpeech::new(script.as_bytes(), Vec::new());
        let (cart, out) = converse(speech).await.unwrap();
        (cart, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_added_items_reach_cart() {
        let (cart, out) = chat("I want 2 chicken biryani\n").await;
        assert_eq!(cart.quantity_of(MenuItemId::new(14)), 2);
        assert_eq!(cart.subtotal(), Price::from_cents(2798));
        assert!(out.contains("echoeats> Added 2 x Chicken Biryani"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let (cart, out) = chat("quit\none masala dosa\n").await;
        assert!(cart.is_empty());
        assert_eq!(out, PROMPT);
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let (cart, out) = chat("\n   \nshow my cart\n").await;
        assert!(cart.is_empty());
        assert_eq!(out.matches("echoeats> ").count(), 1);
    }

    #[tokio::test]
    async fn test_checkout_does_not_empty_primary_cart() {
        let (cart, _) = chat("one masala dosa\ncheckout\n").await;
        assert_eq!(cart.item_count(), 1);
    }
}
