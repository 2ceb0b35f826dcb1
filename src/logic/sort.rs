use crate::state::{ListItem, PackageInfo};

/// What: Order search results by descending popularity.
///
/// Inputs:
/// - `items`: Results in the order the index returned them
///
/// Output:
/// - Sorts `items` in place, most popular first.
///
/// Details:
/// - `sort_by` is stable, so equal popularity keeps the response order.
/// - `total_cmp` gives NaN a fixed position instead of poisoning the order.
pub fn sort_by_popularity(items: &mut [PackageInfo]) {
    items.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
}

/// What: Convert sorted results into display rows.
///
/// Inputs:
/// - `items`: Results, already ordered
///
/// Output:
/// - One `ListItem` per result: package name as title, description (or a
///   placeholder) as subtitle.
pub fn results_to_items(items: Vec<PackageInfo>) -> Vec<ListItem> {
    items
        .into_iter()
        .map(|p| {
            let subtitle = if p.description.trim().is_empty() {
                "No description".to_string()
            } else {
                p.description
            };
            ListItem::new(p.name, subtitle)
        })
        .collect()
}
