use ahash::{AHashMap, AHashSet};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

//-----------------------------------------------------------------------------
// Identifiers
//-----------------------------------------------------------------------------

/// Opaque requester key taken from a log line (usually an IP address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CartId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GoodsId(pub String);

macro_rules! impl_id {
    ($($ty:ident),*) => {$(
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    )*};
}

impl_id!(ClientId, CartId, GoodsId);

/// Wall-clock time as written by the shop server (no zone information).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub NaiveDateTime);

impl Timestamp {
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
            .ok()
            .map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

//-----------------------------------------------------------------------------
// Lines
//-----------------------------------------------------------------------------

/// One classified input line. `line_no` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub line_no: usize,
    pub client_id: ClientId,
    pub raw: String,
}

impl LogLine {
    pub fn contains(&self, marker: &str) -> bool {
        self.raw.contains(marker)
    }
}

//-----------------------------------------------------------------------------
// Category catalog
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogItem {
    pub name: String,
    pub id: GoodsId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// Categories in first-seen order, each holding its items in first-seen order.
///
/// A category never holds two items with the same `(name, id)` pair.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
    index: AHashMap<String, usize>,
    seen: Vec<AHashSet<CatalogItem>>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the item was not yet listed under `category`.
    pub fn insert(&mut self, category: &str, item: CatalogItem) -> bool {
        let slot = match self.index.get(category) {
            Some(slot) => *slot,
            None => {
                let slot = self.categories.len();
                self.categories.push(Category {
                    name: category.to_string(),
                    items: Vec::new(),
                });
                self.seen.push(AHashSet::new());
                self.index.insert(category.to_string(), slot);
                slot
            }
        };

        if !self.seen[slot].insert(item.clone()) {
            return false;
        }
        self.categories[slot].items.push(item);
        true
    }

    /// Appends `other` as if its insertions had happened after ours.
    pub fn merge(&mut self, other: CategoryCatalog) {
        for category in other.categories {
            for item in category.items {
                self.insert(&category.name, item);
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&Category> {
        self.index.get(category).map(|slot| &self.categories[*slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

impl PartialEq for CategoryCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories
    }
}

impl Eq for CategoryCatalog {}

impl Serialize for CategoryCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.categories.serialize(serializer)
    }
}

//-----------------------------------------------------------------------------
// Events
//-----------------------------------------------------------------------------

/// One add-to-cart request, recorded whatever later happens to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEvent {
    pub timestamp: Timestamp,
    pub goods_id: GoodsId,
    pub amount: u32,
    pub cart_id: CartId,
}

/// Final disposition of one cart session.
///
/// Fields are private so that `paid_time` is present exactly when `paid` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRecord {
    client_id: ClientId,
    cart_id: CartId,
    paid: bool,
    paid_time: Option<Timestamp>,
}

impl CartRecord {
    pub fn paid(client_id: ClientId, cart_id: CartId, at: Timestamp) -> Self {
        Self {
            client_id,
            cart_id,
            paid: true,
            paid_time: Some(at),
        }
    }

    pub fn abandoned(client_id: ClientId, cart_id: CartId) -> Self {
        Self {
            client_id,
            cart_id,
            paid: false,
            paid_time: None,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn cart_id(&self) -> &CartId {
        &self.cart_id
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn paid_time(&self) -> Option<Timestamp> {
        self.paid_time
    }
}

/// A product or category page view. `item` is `None` for category pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoodsViewEvent {
    pub client_id: ClientId,
    pub timestamp: Timestamp,
    pub category: String,
    pub item: Option<String>,
}

//-----------------------------------------------------------------------------
// Result
//-----------------------------------------------------------------------------

/// Everything reconstructed by one parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedLog {
    pub categories: CategoryCatalog,
    pub cart_requests: Vec<CartEvent>,
    pub carts: Vec<CartRecord>,
    pub clients: Vec<ClientId>,
    pub goods_views: Vec<GoodsViewEvent>,
}

impl ParsedLog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.cart_requests.is_empty()
            && self.carts.is_empty()
            && self.clients.is_empty()
            && self.goods_views.is_empty()
    }

    pub fn paid_carts(&self) -> impl Iterator<Item = &CartRecord> {
        self.carts.iter().filter(|c| c.is_paid())
    }
}
