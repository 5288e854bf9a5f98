use crate::parse::group::ClientGroup;
use crate::parse::patterns::{add_to_cart, page_view};
use crate::parse::types::{CartEvent, CartId, GoodsId, GoodsViewEvent};
use tracing::trace;

/// Category and product page views over the client's full stream.
/// Payment confirmation pages are never views.
pub fn extract_goods_views(group: &ClientGroup) -> Vec<GoodsViewEvent> {
    group
        .lines()
        .iter()
        .filter_map(|line| {
            let view = page_view(&line.raw)?;
            Some(GoodsViewEvent {
                client_id: group.client_id().clone(),
                timestamp: view.timestamp,
                category: view.category.to_string(),
                item: view.item.map(str::to_string),
            })
        })
        .collect()
}

/// Add-to-cart requests carrying goods id, amount and cart id.
pub fn extract_cart_requests(group: &ClientGroup) -> Vec<CartEvent> {
    group
        .cart_lines()
        .filter_map(|line| {
            let Some(add) = add_to_cart(&line.raw) else {
                trace!(line_no = line.line_no, component = "cart_requests", "no add-to-cart fields");
                return None;
            };

            Some(CartEvent {
                timestamp: add.timestamp,
                goods_id: GoodsId::from(add.goods_id),
                amount: add.amount,
                cart_id: CartId::from(add.cart_id),
            })
        })
        .collect()
}
