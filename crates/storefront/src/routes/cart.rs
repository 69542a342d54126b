//! Cart route handlers.
//!
//! The primary cart is stored in the visitor's session. Each mutation
//! returns the updated cart plus the notice to show, if any.

use axum::Json;
use echoeats_core::{Cart, CartLine, CartNotice, MenuItemId, OrderReceipt, Price, menu};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{session as visitor, session_keys};

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

/// One cart line with its computed total.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: Price,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    line: line.clone(),
                    line_total: line.line_total(),
                })
                .collect(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            delivery_fee: cart.delivery_fee(),
            total: cart.total(),
        }
    }
}

/// A cart notice with its display text.
#[derive(Debug, Serialize)]
pub struct NoticeView {
    #[serde(flatten)]
    pub notice: CartNotice,
    pub message: String,
}

impl From<CartNotice> for NoticeView {
    fn from(notice: CartNotice) -> Self {
        Self {
            message: notice.message(),
            notice,
        }
    }
}

/// Response to a cart mutation.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    pub notice: Option<NoticeView>,
}

/// Response to a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub receipt: OrderReceipt,
    pub notice: NoticeView,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: MenuItemId,
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub item_id: MenuItemId,
    pub quantity: u32,
}

/// Remove line request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub item_id: MenuItemId,
}

async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(visitor::load(session, session_keys::CART).await?)
}

async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    Ok(visitor::save(session, session_keys::CART, cart).await?)
}

/// Show the cart.
#[instrument(skip(session, _user))]
pub async fn show(RequireAuth(_user): RequireAuth, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add one unit of a menu item.
#[instrument(skip(session, _user))]
pub async fn add(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(form): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let item = menu::find(form.item_id)
        .ok_or_else(|| AppError::NotFound(format!("Menu item {}", form.item_id)))?;

    let mut cart = load_cart(&session).await?;
    let notice = cart.add(item);
    save_cart(&session, &cart).await?;

    tracing::info!(item_id = %item.id, "Added to cart");
    Ok(Json(CartResponse {
        cart: CartView::from(&cart),
        notice: Some(notice.into()),
    }))
}

/// Overwrite a line's quantity; zero removes the line.
#[instrument(skip(session, _user))]
pub async fn update(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(form): Json<UpdateCartRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    let notice = cart.set_quantity(form.item_id, form.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse {
        cart: CartView::from(&cart),
        notice: notice.map(NoticeView::from),
    }))
}

/// Remove a line.
#[instrument(skip(session, _user))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(form): Json<RemoveFromCartRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    let notice = cart.remove(form.item_id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse {
        cart: CartView::from(&cart),
        notice: notice.map(NoticeView::from),
    }))
}

/// Place the order and empty the cart.
#[instrument(skip(session, _user))]
pub async fn checkout(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<Json<CheckoutResponse>> {
    let mut cart = load_cart(&session).await?;
    let receipt = cart
        .checkout()
        .ok_or_else(|| AppError::BadRequest("Your cart is empty".to_string()))?;
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Order placed");
    tracing::info!(total = %receipt.total, items = receipt.lines.len(), "Order placed");

    Ok(Json(CheckoutResponse {
        receipt,
        notice: CartNotice::OrderPlaced.into(),
    }))
}
