//! Ordering assistant handlers.
//!
//! The conversation, including the assistant's shadow cart, is stored in the
//! visitor's session. Items the assistant adds are mirrored into the primary
//! cart so the cart drawer shows them too.

use axum::Json;
use echoeats_core::assistant::Reply;
use echoeats_core::{Assistant, AssistantAction, Cart, ChatMessage, menu};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{session as visitor, session_keys};
use crate::routes::cart::{CartView, NoticeView};

/// The conversation so far.
#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub messages: Vec<ChatMessage>,
    pub shadow_cart: CartView,
}

/// A user utterance.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Result of sending a message. `reply` is null when the input was blank.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: Option<Reply>,
    /// Notice from mirroring an added item into the primary cart.
    pub cart_notice: Option<NoticeView>,
}

/// Show the conversation.
#[instrument(skip(session, _user))]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<Json<ConversationView>> {
    let assistant: Assistant = visitor::load(&session, session_keys::ASSISTANT).await?;
    Ok(Json(ConversationView {
        messages: assistant.transcript().to_vec(),
        shadow_cart: CartView::from(assistant.shadow_cart()),
    }))
}

/// Send one message to the assistant.
#[instrument(skip(session, _user, form), fields(len = form.text.len()))]
pub async fn send(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(form): Json<MessageRequest>,
) -> Result<Json<MessageResponse>> {
    let mut assistant: Assistant = visitor::load(&session, session_keys::ASSISTANT).await?;
    let Some(reply) = assistant.send(&form.text) else {
        return Ok(Json(MessageResponse {
            reply: None,
            cart_notice: None,
        }));
    };
    visitor::save(&session, session_keys::ASSISTANT, &assistant).await?;

    let mut cart_notice = None;
    if let AssistantAction::ItemAdded {
        item_id, quantity, ..
    } = &reply.action
        && let Some(item) = menu::find(*item_id)
    {
        let mut cart: Cart = visitor::load(&session, session_keys::CART).await?;
        cart_notice = Some(cart.add_quantity(item, *quantity).into());
        visitor::save(&session, session_keys::CART, &cart).await?;
    }

    tracing::debug!(action = ?reply.action, "Assistant replied");
    Ok(Json(MessageResponse {
        reply: Some(reply),
        cart_notice,
    }))
}
