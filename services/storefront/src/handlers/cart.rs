use axum::{
    Form,
    extract::{Path, State},
    http::{
        HeaderMap,
        header::{HOST, REFERER},
    },
    response::Response,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookstore_domain::flash::Flash;
use bookstore_domain::id::{BookId, CartItemId};
use bookstore_session::{CurrentUser, Session};

use crate::domain::types::{Cart, CartLine};
use crate::error::StorefrontError;
use crate::handlers::redirect;
use crate::state::AppState;
use crate::usecase::cart::{
    AddToCartUseCase, RemoveCartItemUseCase, UpdateCartItemUseCase, ViewCartUseCase,
};

const INVALID_QUANTITY_MESSAGE: &str = "Invalid quantity.";
const ITEM_NOT_FOUND_MESSAGE: &str = "Cart item not found.";

#[derive(Serialize)]
pub struct CartItemView {
    pub cart_item_id: CartItemId,
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub stock: i32,
}

impl From<CartLine> for CartItemView {
    fn from(line: CartLine) -> Self {
        Self {
            cart_item_id: line.cart_item_id,
            book_id: line.book_id,
            title: line.title,
            author: line.author,
            price: line.price,
            quantity: line.quantity,
            subtotal: line.subtotal,
            stock: line.stock,
        }
    }
}

#[derive(Serialize)]
pub struct CartPage {
    pub cart_items: Vec<CartItemView>,
    pub total: Decimal,
}

impl From<Cart> for CartPage {
    fn from(cart: Cart) -> Self {
        Self {
            cart_items: cart.lines.into_iter().map(CartItemView::from).collect(),
            total: cart.total,
        }
    }
}

// ── GET /cart ────────────────────────────────────────────────────────────────

pub async fn view_cart(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, StorefrontError> {
    let usecase = ViewCartUseCase {
        repo: state.cart_repo(),
    };
    let cart = usecase.execute(user.user_id).await?;
    Ok(session.render("cart.html", CartPage::from(cart)))
}

// ── POST /cart/add/{book_id} ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddToCartForm {
    pub quantity: Option<String>,
}

pub async fn add_to_cart(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    mut session: Session,
    Path(book_id): Path<BookId>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let usecase = AddToCartUseCase {
        repo: state.cart_repo(),
    };
    let flash = match usecase
        .execute(user.user_id, book_id, form.quantity.as_deref())
        .await
    {
        Ok(()) => Flash::success("Book added to your cart!"),
        Err(StorefrontError::InvalidQuantity) => Flash::danger(INVALID_QUANTITY_MESSAGE),
        Err(e) => {
            tracing::warn!(error = ?e, user_id = %user.user_id, book_id = %book_id, "add to cart failed");
            Flash::danger("Error adding to cart: Could not add item.")
        }
    };
    session.flash(flash);
    let back = same_site_referer(&headers).unwrap_or("/books");
    redirect(session, back)
}

/// Path of the `Referer` when it points back into this site: either a bare
/// path or an absolute URL on the request's own host.
fn same_site_referer(headers: &HeaderMap) -> Option<&str> {
    let referer = headers.get(REFERER)?.to_str().ok()?;
    if referer.starts_with('/') && !referer.starts_with("//") {
        return Some(referer);
    }
    let rest = referer
        .strip_prefix("https://")
        .or_else(|| referer.strip_prefix("http://"))?;
    let (authority, path) = match rest.find('/') {
        Some(at) => rest.split_at(at),
        None => (rest, "/"),
    };
    let host = headers.get(HOST)?.to_str().ok()?;
    authority.eq_ignore_ascii_case(host).then_some(path)
}

// ── POST /cart/update/{cart_item_id} ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCartForm {
    #[serde(default)]
    pub quantity: String,
}

pub async fn update_cart_item(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    mut session: Session,
    Path(item_id): Path<CartItemId>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response, StorefrontError> {
    let usecase = UpdateCartItemUseCase {
        repo: state.cart_repo(),
    };
    match usecase.execute(user.user_id, item_id, &form.quantity).await {
        Ok(check) => {
            if let Some(stock) = check.clamped_to {
                session.flash(Flash::warning(format!(
                    "Only {stock} copies available. Quantity set to maximum."
                )));
            }
            session.flash(Flash::info("Cart updated successfully."));
        }
        Err(StorefrontError::InvalidQuantity) => {
            session.flash(Flash::danger(INVALID_QUANTITY_MESSAGE))
        }
        Err(StorefrontError::QuantityBelowOne) => {
            session.flash(Flash::danger("Quantity must be at least 1."))
        }
        Err(StorefrontError::CartItemNotFound) => {
            session.flash(Flash::danger(ITEM_NOT_FOUND_MESSAGE))
        }
        Err(e) => return Err(e),
    }
    Ok(redirect(session, "/cart"))
}

// ── POST /cart/remove/{cart_item_id} ─────────────────────────────────────────

pub async fn remove_cart_item(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    mut session: Session,
    Path(item_id): Path<CartItemId>,
) -> Result<Response, StorefrontError> {
    let usecase = RemoveCartItemUseCase {
        repo: state.cart_repo(),
    };
    match usecase.execute(user.user_id, item_id).await {
        Ok(()) => session.flash(Flash::success("Book removed from cart.")),
        Err(StorefrontError::CartItemNotFound) => {
            session.flash(Flash::danger(ITEM_NOT_FOUND_MESSAGE))
        }
        Err(e) => return Err(e),
    }
    Ok(redirect(session, "/cart"))
}
