//! Display formatting for prices and ratings.
//!
//! One locale convention only: Indian digit grouping (`12,34,567`) with a `₹`
//! prefix.

use crate::product::{Price, Rating};

pub const CURRENCY_SYMBOL: &str = "₹";
pub const RATING_SUFFIX: &str = "★";

/// Group digits the `en-IN` way: the last three digits, then pairs.
pub fn group_en_in(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);

    // Leading group is one or two digits, the rest are pairs.
    let first = head.len() % 2;
    if first == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[first..].chunks(2).enumerate() {
        if i > 0 || first == 1 {
            out.push(',');
        }
        out.extend(pair.iter().map(|&b| b as char));
    }
    out.push(',');
    out.push_str(tail);
    out
}

pub fn price_label(price: Price) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_en_in(price.amount()))
}

pub fn rating_label(rating: Rating) -> String {
    format!("{} {RATING_SUFFIX}", rating.value())
}
