use crate::domain::model::Service;

/// Group separator used by ru-RU number formatting.
pub const GROUP_SEPARATOR: char = '\u{a0}';
pub const CURRENCY_SUFFIX: &str = " ₽";

/// Formats a price the way ru-RU locale formatting does: `2 500 ₽`, `99,5 ₽`.
pub fn format_price(price: f64) -> String {
    let price = if price.is_finite() { price } else { 0.0 };
    let rendered = format!("{:.3}", price.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let negative = price < 0.0 && (grouped != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}{}", sign, grouped, CURRENCY_SUFFIX)
    } else {
        format!("{}{},{}{}", sign, grouped, fraction, CURRENCY_SUFFIX)
    }
}

/// Cheapest positive tariff in the node's own tariffs or anywhere below it.
pub fn find_min_tariff_price(service: &Service) -> Option<f64> {
    let own = service.tariffs.iter().map(|tariff| tariff.price);
    let nested = service.children.iter().filter_map(find_min_tariff_price);

    own.chain(nested)
        .filter(|price| price.is_finite() && *price > 0.0)
        .reduce(f64::min)
}
