use crate::parse::group::ClientGroup;
use crate::parse::patterns::{GOODS_MARKER, category_path, goods_id};
use crate::parse::types::{CatalogItem, CategoryCatalog, GoodsId};
use tracing::trace;

/// Resolves the category and item name of every goods-id line from the line
/// immediately before it in the same client's stream.
///
/// The first line of a client never resolves (it has no predecessor). Lines
/// whose goods id or predecessor path cannot be extracted are skipped.
pub fn resolve_categories(group: &ClientGroup, catalog: &mut CategoryCatalog) {
    for window in group.lines().windows(2) {
        let [previous, current] = window else {
            continue;
        };

        if !current.contains(GOODS_MARKER) {
            continue;
        }

        let Some(goods_id) = goods_id(&current.raw) else {
            trace!(line_no = current.line_no, component = "catalog", "no goods id");
            continue;
        };

        let Some(path) = category_path(&previous.raw) else {
            trace!(
                line_no = current.line_no,
                component = "catalog",
                "previous line carries no category path"
            );
            continue;
        };

        catalog.insert(
            path.category,
            CatalogItem {
                name: path.item.to_string(),
                id: GoodsId(goods_id.to_string()),
            },
        );
    }
}
