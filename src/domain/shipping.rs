//! Shipping zone matching and rate selection.
//!
//! Resolution runs on data already loaded into memory:
//!
//! 1. Candidate zones are scanned in `(sort_order, id)` order; the first zone whose
//!    populated constraints (country code, province, city) all equal the address wins.
//!    Specific zones are configured with a lower sort order than broad ones.
//! 2. The zone's rates drop out when the rate or its method is soft-deleted, or when
//!    the order total is below the rate's minimum order amount.
//! 3. Remaining rates are priced: a met free-shipping threshold turns the price to zero.
//! 4. Options are sorted ascending by final price.
//!
//! No matching zone is not an error; it yields an empty option list.

use rust_decimal::Decimal;

use crate::domain::entities::{Address, ShippingOption, ShippingRate, ShippingZone};

/// Compares one zone constraint with the address value.
///
/// A blank or absent constraint accepts anything. Comparison trims surrounding
/// whitespace and ignores ASCII case.
fn constraint_matches(constraint: Option<&str>, value: Option<&str>) -> bool {
    let Some(expected) = constraint.map(str::trim).filter(|c| !c.is_empty()) else {
        return true;
    };

    value.is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}

/// Returns true when every populated constraint of `zone` equals the address.
pub fn zone_matches(zone: &ShippingZone, address: &Address) -> bool {
    constraint_matches(zone.country_code.as_deref(), Some(&address.country_code))
        && constraint_matches(zone.province.as_deref(), address.province.as_deref())
        && constraint_matches(zone.city.as_deref(), address.city.as_deref())
}

/// Picks the first matching zone in `(sort_order, id)` order, whatever the slice order.
pub fn select_zone<'a>(zones: &'a [ShippingZone], address: &Address) -> Option<&'a ShippingZone> {
    let mut ordered: Vec<&ShippingZone> = zones.iter().collect();
    ordered.sort_by_key(|z| (z.sort_order, z.id));

    ordered.into_iter().find(|zone| zone_matches(zone, address))
}

/// Filters and prices a zone's rates for the given order total.
pub fn price_rates(rates: &[ShippingRate], order_amount: Decimal) -> Vec<ShippingOption> {
    let mut options: Vec<ShippingOption> = rates
        .iter()
        .filter(|rate| !rate.is_deleted && !rate.method_is_deleted)
        .filter(|rate| rate.min_order_amount.is_none_or(|min| order_amount >= min))
        .map(|rate| {
            let is_free = rate
                .free_shipping_min_order_amount
                .is_some_and(|threshold| order_amount >= threshold);

            ShippingOption {
                rate_id: rate.id,
                method_id: rate.method_id,
                method_name: rate.method_name.clone(),
                method_code: rate.method_code.clone(),
                base_price: rate.price,
                price: if is_free { Decimal::ZERO } else { rate.price },
                is_free,
                eta_days_min: rate.eta_days_min,
                eta_days_max: rate.eta_days_max,
            }
        })
        .collect();

    options.sort_by(|a, b| a.price.cmp(&b.price).then(a.rate_id.cmp(&b.rate_id)));
    options
}
