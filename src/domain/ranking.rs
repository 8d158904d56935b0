//! Ranking of discounted products for the "amazing products" shelf.

use std::collections::HashSet;

use crate::domain::entities::DiscountedProduct;

/// Ranks candidates by discount percentage, highest first.
///
/// - Candidates without a positive discount (discount `<= 0` or `>= price`) are dropped.
/// - Ties are broken by product id, descending.
/// - A product appears once, with its best-ranked offer.
/// - At most `take` products are returned.
pub fn rank_discounted_products(
    mut candidates: Vec<DiscountedProduct>,
    take: usize,
) -> Vec<DiscountedProduct> {
    candidates.retain(DiscountedProduct::has_positive_discount);
    candidates.sort_by(|a, b| {
        b.discount_ratio()
            .cmp(&a.discount_ratio())
            .then(b.product_id.cmp(&a.product_id))
    });

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|p| seen.insert(p.product_id))
        .take(take)
        .collect()
}
