//! Order total arithmetic

use crate::entities::order::OrderItem;
use bson::{Bson, Document};

/// Round to two decimals, halves away from zero
///
/// Operates on the binary `f64`, so a value printed as `x.xx5` rounds
/// according to its nearest representable neighbour. Values too large to
/// scale by 100 have no fractional part and are returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Sum of `unit_price * quantity` over all items, rounded to two decimals.
///
/// Items whose unit price is still unresolved count as zero.
pub fn order_total(items: &[OrderItem]) -> f64 {
    let sum: f64 = items
        .iter()
        .map(|item| item.unit_price.unwrap_or(0.0) * item.quantity)
        .sum();
    round2(sum)
}

/// The `price` field of a material document, treating missing or
/// non-numeric values as zero
pub fn material_price(material: &Document) -> f64 {
    match material.get("price") {
        Some(Bson::Double(price)) => *price,
        Some(Bson::Int32(price)) => f64::from(*price),
        Some(Bson::Int64(price)) => *price as f64,
        _ => 0.0,
    }
}
