//! Shop access-log reconstruction
//!
//! Turns the flat, chronological access log of the shop front-end into typed
//! business events. The log is one line per request; nothing in it says "this
//! cart was abandoned" or "this item belongs to that category", so both facts
//! have to be recovered from the order of a client's requests.
//!
//! The pipeline is:
//!
//! raw lines
//! classify        (client id per line, hard failure if missing)
//! group           (per-client line lists + cart-related subset)
//! catalog / carts / extract   (independent per client)
//! ParsedLog
//!
//! Everything after grouping is per client and may run on several threads;
//! see [`ParserOptions::workers`].

mod cart;
mod catalog;
mod classify;
mod error;
mod extract;
mod group;
pub mod patterns;
mod run;
mod types;


pub use cart::*;
pub use catalog::*;
pub use classify::*;
pub use error::*;
pub use extract::*;
pub use group::*;
pub use run::*;
pub use types::*;
