//! Precompiled line matchers.
//!
//! Every matcher returns either the extracted fields or `None`/`Unrelated`; a
//! miss is never an error here. Callers decide whether a miss is fatal (only
//! the client-id classifier does).

use crate::parse::types::Timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

pub const CART_MARKER: &str = "cart";
pub const PAYMENT_SUCCESS_MARKER: &str = "success";
/// Contained in payment-initiation URLs, which share the cart/success URL family.
pub const PAYMENT_INIT_MARKER: &str = "pay?";
pub const GOODS_MARKER: &str = "goods";
pub const CART_ID_MARKER: &str = "cart_id=";
pub const PAYMENT_SUCCESS_PATH: &str = "success_pay_";

static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\| (?P<ts>[^\[|]+?) \[").expect("timestamp regex is valid"));

static CART_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"cart_id=(?P<cart>\d+)").expect("cart id regex is valid"));

static PAID_CART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"success_pay_(?P<cart>[^/\s]+)/").expect("paid cart regex is valid")
});

static GOODS_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"goods_id=(?P<goods>\d+)").expect("goods id regex is valid"));

static CATEGORY_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"://[^/\s]+/(?P<category>[^/\s]+)/(?P<item>[^/\s]+)/")
        .expect("category/item regex is valid")
});

static PAGE_VIEW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"://[^/\s]+/(?P<category>[^/\s]+)/(?P<item>[^/\s]*)")
        .expect("page view regex is valid")
});

static ADD_WITH_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"goods_id=(?P<goods>\d+)&amount=(?P<amount>\d+)&cart_id=(?P<cart>\d+)")
        .expect("add-to-cart regex is valid")
});

//-----------------------------------------------------------------------------
// Match results
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPath<'a> {
    pub category: &'a str,
    pub item: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a> {
    pub timestamp: Timestamp,
    pub category: &'a str,
    pub item: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddToCart<'a> {
    pub timestamp: Timestamp,
    pub goods_id: &'a str,
    pub amount: u32,
    pub cart_id: &'a str,
}

/// How a cart-subset line drives the cart session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLine<'a> {
    AddToCart { cart_id: &'a str },
    PaymentSuccess { cart_id: &'a str, paid_at: Timestamp },
    Unrelated,
}

//-----------------------------------------------------------------------------
// Matchers
//-----------------------------------------------------------------------------

/// Cart actions and payment completions, but never payment initiation.
pub fn is_cart_related(line: &str) -> bool {
    (line.contains(CART_MARKER) || line.contains(PAYMENT_SUCCESS_MARKER))
        && !line.contains(PAYMENT_INIT_MARKER)
}

pub fn timestamp(line: &str) -> Option<Timestamp> {
    let caps = TIMESTAMP.captures(line)?;
    Timestamp::parse(caps.name("ts")?.as_str())
}

pub fn goods_id(line: &str) -> Option<&str> {
    GOODS_ID
        .captures(line)
        .and_then(|caps| caps.name("goods"))
        .map(|m| m.as_str())
}

pub fn category_path(line: &str) -> Option<CategoryPath<'_>> {
    let caps = CATEGORY_ITEM.captures(line)?;
    Some(CategoryPath {
        category: caps.name("category")?.as_str(),
        item: caps.name("item")?.as_str(),
    })
}

pub fn page_view(line: &str) -> Option<PageView<'_>> {
    let caps = PAGE_VIEW.captures(line)?;
    let category = caps.name("category")?.as_str();
    if category.starts_with(PAYMENT_SUCCESS_PATH) {
        return None;
    }

    let item = caps
        .name("item")
        .map(|m| m.as_str())
        .filter(|item| !item.is_empty());

    Some(PageView {
        timestamp: timestamp(line)?,
        category,
        item,
    })
}

pub fn add_to_cart(line: &str) -> Option<AddToCart<'_>> {
    let caps = ADD_WITH_AMOUNT.captures(line)?;
    Some(AddToCart {
        timestamp: timestamp(line)?,
        goods_id: caps.name("goods")?.as_str(),
        amount: caps.name("amount")?.as_str().parse().ok()?,
        cart_id: caps.name("cart")?.as_str(),
    })
}

pub fn cart_line(line: &str) -> CartLine<'_> {
    let has_cart_id = line.contains(CART_ID_MARKER);
    let has_success = line.contains(PAYMENT_SUCCESS_MARKER);

    match (has_cart_id, has_success) {
        (true, false) => CART_ID
            .captures(line)
            .and_then(|caps| caps.name("cart"))
            .map(|m| CartLine::AddToCart {
                cart_id: m.as_str(),
            })
            .unwrap_or(CartLine::Unrelated),
        (false, true) => paid_cart(line).unwrap_or(CartLine::Unrelated),
        _ => CartLine::Unrelated,
    }
}

fn paid_cart(line: &str) -> Option<CartLine<'_>> {
    let caps = PAID_CART.captures(line)?;
    Some(CartLine::PaymentSuccess {
        cart_id: caps.name("cart")?.as_str(),
        paid_at: timestamp(line)?,
    })
}
