//! Cart session reconstruction.
//!
//! Each client's cart-related lines drive a two-state machine:
//!
//! | cursor              | input                 | next cursor        | emits                  |
//! |---------------------|-----------------------|--------------------|------------------------|
//! | `NoPendingCart`     | `AddToCart(c)`        | `PendingCart(c)`   | nothing                |
//! | `PendingCart(c)`    | `AddToCart(c)`        | `PendingCart(c)`   | nothing                |
//! | `PendingCart(p)`    | `AddToCart(c)`, c ≠ p | `PendingCart(c)`   | `p` abandoned          |
//! | any                 | `PaymentSuccess(c)`   | `NoPendingCart`    | `c` paid               |
//! | `PendingCart(p)`    | `EndOfStream`         | `NoPendingCart`    | `p` abandoned          |
//! | `NoPendingCart`     | `EndOfStream`         | `NoPendingCart`    | nothing                |
//!
//! A payment closes whatever cart is pending, even when it names another cart.
//!
//! Each cart is closed at most once per client. [`CartSession`] remembers the
//! carts it has emitted and ignores later adds or payments naming them, so a
//! closed cart never becomes pending again.

use crate::parse::group::ClientGroup;
use crate::parse::patterns::{CartLine, cart_line};
use crate::parse::types::{CartId, CartRecord, ClientId, Timestamp};
use ahash::AHashSet;
use std::iter;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CartCursor {
    #[default]
    NoPendingCart,
    PendingCart(CartId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartInput {
    AddToCart(CartId),
    PaymentSuccess { cart_id: CartId, paid_at: Timestamp },
    EndOfStream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    Paid { cart_id: CartId, paid_at: Timestamp },
    Abandoned(CartId),
}

impl CartCursor {
    pub fn step(self, input: CartInput) -> (CartCursor, Option<CartOutcome>) {
        use CartCursor::*;

        match (self, input) {
            (NoPendingCart, CartInput::AddToCart(cart_id)) => (PendingCart(cart_id), None),
            (PendingCart(pending), CartInput::AddToCart(cart_id)) if pending == cart_id => {
                (PendingCart(pending), None)
            }
            (PendingCart(pending), CartInput::AddToCart(cart_id)) => (
                PendingCart(cart_id),
                Some(CartOutcome::Abandoned(pending)),
            ),
            (_, CartInput::PaymentSuccess { cart_id, paid_at }) => (
                NoPendingCart,
                Some(CartOutcome::Paid { cart_id, paid_at }),
            ),
            (PendingCart(pending), CartInput::EndOfStream) => {
                (NoPendingCart, Some(CartOutcome::Abandoned(pending)))
            }
            (NoPendingCart, CartInput::EndOfStream) => (NoPendingCart, None),
        }
    }

    pub fn pending(&self) -> Option<&CartId> {
        match self {
            CartCursor::PendingCart(cart_id) => Some(cart_id),
            CartCursor::NoPendingCart => None,
        }
    }
}

impl CartInput {
    pub fn cart_id(&self) -> Option<&CartId> {
        match self {
            CartInput::AddToCart(cart_id) | CartInput::PaymentSuccess { cart_id, .. } => {
                Some(cart_id)
            }
            CartInput::EndOfStream => None,
        }
    }
}

impl CartOutcome {
    pub fn cart_id(&self) -> &CartId {
        match self {
            CartOutcome::Paid { cart_id, .. } | CartOutcome::Abandoned(cart_id) => cart_id,
        }
    }

    pub fn into_record(self, client_id: ClientId) -> CartRecord {
        match self {
            CartOutcome::Paid { cart_id, paid_at } => CartRecord::paid(client_id, cart_id, paid_at),
            CartOutcome::Abandoned(cart_id) => CartRecord::abandoned(client_id, cart_id),
        }
    }
}

/// One client's cursor plus the carts already closed for that client.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    cursor: CartCursor,
    closed: AHashSet<CartId>,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> &CartCursor {
        &self.cursor
    }

    /// Applies one input; inputs naming an already closed cart are ignored.
    pub fn feed(&mut self, input: CartInput) -> Option<CartOutcome> {
        if let Some(cart_id) = input.cart_id().filter(|id| self.closed.contains(*id)) {
            trace!(
                cart = %cart_id,
                pending = ?self.cursor.pending(),
                component = "carts",
                "cart already closed"
            );
            return None;
        }

        let (next, outcome) = std::mem::take(&mut self.cursor).step(input);
        self.cursor = next;

        if let Some(outcome) = &outcome {
            self.closed.insert(outcome.cart_id().clone());
        }
        outcome
    }
}

fn cart_input(line: CartLine<'_>) -> Option<CartInput> {
    match line {
        CartLine::AddToCart { cart_id } => Some(CartInput::AddToCart(CartId::from(cart_id))),
        CartLine::PaymentSuccess { cart_id, paid_at } => Some(CartInput::PaymentSuccess {
            cart_id: CartId::from(cart_id),
            paid_at,
        }),
        CartLine::Unrelated => None,
    }
}

/// Runs one client's cart lines through the state machine.
///
/// Record order follows the state machine, not payment time.
pub fn reconstruct_carts(group: &ClientGroup) -> Vec<CartRecord> {
    let inputs = group
        .cart_lines()
        .filter_map(|line| {
            let input = cart_input(cart_line(&line.raw));
            if input.is_none() {
                trace!(line_no = line.line_no, component = "carts", "not a cart transition");
            }
            input
        })
        .chain(iter::once(CartInput::EndOfStream));

    let mut session = CartSession::new();
    inputs
        .filter_map(|input| session.feed(input))
        .map(|outcome| outcome.into_record(group.client_id().clone()))
        .collect()
}
