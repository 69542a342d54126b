//! Conversational ordering assistant.
//!
//! The assistant turns short utterances ("I want 2 chicken biryani",
//! "anything spicy?", "checkout") into actions on a private shadow cart and
//! keeps an append-only transcript of the conversation. It never touches the
//! primary cart; hosts mirror [`AssistantAction::ItemAdded`] themselves.

mod intent;
pub mod voice;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, OrderReceipt};
use crate::menu;
use crate::types::{ChatMessageId, MenuItemId, Price};

pub use intent::{Intent, Theme, classify, extract_quantity};

/// First message of every conversation.
pub const GREETING: &str =
    "Hi! I'm your EchoEats assistant. Ask me about our menu or say what you're craving!";

/// Reply when the shadow cart has nothing in it.
pub const EMPTY_CART_REPLY: &str =
    "Your cart is empty. Tell me a dish you'd like, for example \"2 masala dosa\".";

/// Reply when nothing in the input was recognized.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't catch that. You can order a dish by name, \
     ask me for recommendations, or say \"checkout\" when you're ready.";

/// Delivery estimate quoted when an order is placed.
pub const DELIVERY_ESTIMATE: &str = "30-35 minutes";

/// Who wrote a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Structured outcome of one assistant turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantAction {
    ItemAdded {
        item_id: MenuItemId,
        name: String,
        quantity: u32,
        line_total: Price,
    },
    Recommended {
        theme: Theme,
        item_ids: Vec<MenuItemId>,
    },
    CartSummary {
        item_count: u32,
        total: Price,
    },
    OrderPlaced {
        receipt: OrderReceipt,
    },
    CartEmpty,
    Fallback,
}

/// Reply text plus the action behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    pub action: AssistantAction,
}

/// Apply an intent to a shadow cart.
///
/// This is the whole decision engine: it performs no I/O and depends only on
/// the intent, the cart and the static menu.
pub fn respond(cart: &mut Cart, intent: Intent) -> Response {
    match intent {
        Intent::AddItem { item_id, quantity } => {
            let Some(item) = menu::find(item_id) else {
                return fallback();
            };
            cart.add_quantity(item, quantity);
            let line_total = item.price * quantity;
            Response {
                text: format!(
                    "Added {quantity} x {} to your order ({line_total}). Anything else?",
                    item.name
                ),
                action: AssistantAction::ItemAdded {
                    item_id,
                    name: item.name.clone(),
                    quantity,
                    line_total,
                },
            }
        }
        Intent::Recommend { theme } => {
            let items: Vec<_> = theme.picks().into_iter().filter_map(menu::find).collect();
            let list = items
                .iter()
                .map(|item| format!("{} ({})", item.name, item.price))
                .collect::<Vec<_>>()
                .join(", ");
            Response {
                text: format!(
                    "Here are some {} picks: {list}. Just say the name to add one.",
                    theme.label()
                ),
                action: AssistantAction::Recommended {
                    theme,
                    item_ids: items.iter().map(|item| item.id).collect(),
                },
            }
        }
        Intent::ShowCart => {
            if cart.is_empty() {
                return cart_empty();
            }
            let lines = cart
                .lines()
                .iter()
                .map(|line| {
                    format!("{} x {} ({})", line.quantity, line.item.name, line.line_total())
                })
                .collect::<Vec<_>>()
                .join(", ");
            Response {
                text: format!(
                    "In your order: {lines}. Total with delivery: {}.",
                    cart.total()
                ),
                action: AssistantAction::CartSummary {
                    item_count: cart.item_count(),
                    total: cart.total(),
                },
            }
        }
        Intent::Checkout => match cart.checkout() {
            Some(receipt) => Response {
                text: format!(
                    "Your order has been placed! Total: {}. Estimated delivery in {DELIVERY_ESTIMATE}.",
                    receipt.total
                ),
                action: AssistantAction::OrderPlaced { receipt },
            },
            None => cart_empty(),
        },
        Intent::Unknown => fallback(),
    }
}

fn cart_empty() -> Response {
    Response {
        text: EMPTY_CART_REPLY.to_owned(),
        action: AssistantAction::CartEmpty,
    }
}

fn fallback() -> Response {
    Response {
        text: FALLBACK_REPLY.to_owned(),
        action: AssistantAction::Fallback,
    }
}

/// A completed turn: the assistant's transcript message and its action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub message: ChatMessage,
    pub action: AssistantAction,
}

/// Assistant conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    cart: Cart,
    transcript: Vec<ChatMessage>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant {
    /// Start a conversation with the greeting.
    #[must_use]
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    /// Start a conversation whose greeting carries the given timestamp.
    #[must_use]
    pub fn started_at(at: DateTime<Utc>) -> Self {
        let mut assistant = Self {
            cart: Cart::new(),
            transcript: Vec::new(),
        };
        assistant.push(GREETING.to_owned(), Sender::Assistant, at);
        assistant
    }

    /// Messages so far, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// The assistant's private cart.
    #[must_use]
    pub const fn shadow_cart(&self) -> &Cart {
        &self.cart
    }

    /// Handle one user utterance.
    ///
    /// Blank input is ignored and returns `None` without touching the
    /// transcript.
    pub fn send(&mut self, text: &str) -> Option<Reply> {
        self.send_at(text, Utc::now())
    }

    /// Like [`send`](Self::send) with an explicit timestamp.
    pub fn send_at(&mut self, text: &str, at: DateTime<Utc>) -> Option<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(text.to_owned(), Sender::User, at);

        let response = respond(&mut self.cart, classify(text));
        let message = self.push(response.text, Sender::Assistant, at);
        Some(Reply {
            message,
            action: response.action,
        })
    }

    fn push(&mut self, text: String, sender: Sender, at: DateTime<Utc>) -> ChatMessage {
        let next = self
            .transcript
            .last()
            .map_or(1, |message| message.id.as_i32() + 1);
        let message = ChatMessage {
            id: ChatMessageId::new(next),
            text,
            sender,
            timestamp: at,
        };
        self.transcript.push(message.clone());
        message
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_starts_with_greeting() {
        let assistant = Assistant::new();
        assert_eq!(assistant.transcript().len(), 1);
        assert_eq!(assistant.transcript()[0].text, GREETING);
        assert_eq!(assistant.transcript()[0].sender, Sender::Assistant);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut assistant = Assistant::new();
        assert!(assistant.send("   ").is_none());
        assert_eq!(assistant.transcript().len(), 1);
    }

    #[test]
    fn test_order_two_biryani() {
        let mut assistant = Assistant::new();
        let reply = assistant.send("I want 2 chicken biryani").unwrap();

        assert!(reply.message.text.contains("$27.98"), "{}", reply.message.text);
        assert_eq!(
            reply.action,
            AssistantAction::ItemAdded {
                item_id: MenuItemId::new(14),
                name: "Chicken Biryani".to_owned(),
                quantity: 2,
                line_total: Price::from_cents(2798),
            }
        );
        assert_eq!(assistant.shadow_cart().quantity_of(MenuItemId::new(14)), 2);

        let ids: Vec<_> = assistant.transcript().iter().map(|m| m.id.as_i32()).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(assistant.transcript()[1].sender, Sender::User);
    }

    #[test]
    fn test_checkout_with_empty_cart_changes_nothing() {
        let mut assistant = Assistant::new();
        let before = assistant.shadow_cart().clone();

        let reply = assistant.send("checkout").unwrap();
        assert_eq!(reply.action, AssistantAction::CartEmpty);
        assert_eq!(reply.message.text, EMPTY_CART_REPLY);
        assert_eq!(assistant.shadow_cart(), &before);
    }

    #[test]
    fn test_summary_then_checkout_clears_shadow_cart() {
        let mut assistant = Assistant::new();
        assistant.send("two samosa").unwrap();

        let summary = assistant.send("show my cart").unwrap();
        // "show" is a recommendation trigger, so ask without it.
        assert!(matches!(summary.action, AssistantAction::Recommended { .. }));

        let summary = assistant.send("read my cart").unwrap();
        let AssistantAction::CartSummary { item_count, total } = summary.action else {
            panic!("expected summary, got {:?}", summary.action);
        };
        assert_eq!(item_count, 2);
        assert_eq!(total, assistant.shadow_cart().total());

        let placed = assistant.send("checkout").unwrap();
        assert!(placed.message.text.contains(DELIVERY_ESTIMATE));
        assert!(matches!(placed.action, AssistantAction::OrderPlaced { .. }));
        assert!(assistant.shadow_cart().is_empty());
    }

    #[test]
    fn test_summary_with_huge_quantities() {
        let mut assistant = Assistant::new();
        assistant.send("4294967295 samosa").unwrap();
        assistant.send("one naan").unwrap();

        let summary = assistant.send("read my cart").unwrap();
        let AssistantAction::CartSummary { item_count, .. } = summary.action else {
            panic!("expected summary, got {:?}", summary.action);
        };
        assert_eq!(item_count, u32::MAX);
    }

    #[test]
    fn test_recommendation_lists_picks() {
        let mut cart = Cart::new();
        let response = respond(
            &mut cart,
            Intent::Recommend {
                theme: Theme::Dessert,
            },
        );
        assert!(response.text.contains("Gulab Jamun"));
        assert!(response.text.contains("Kulfi"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_fallback() {
        let mut assistant = Assistant::new();
        let reply = assistant.send("hello there").unwrap();
        assert_eq!(reply.action, AssistantAction::Fallback);
        assert_eq!(reply.message.text, FALLBACK_REPLY);
    }

    #[test]
    fn test_action_serializes_with_type_tag() {
        let json = serde_json::to_value(AssistantAction::CartEmpty).unwrap();
        assert_eq!(json["type"], "cart_empty");
    }
}
