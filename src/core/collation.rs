//! Title ordering for Russian catalogues.
//!
//! Comparison runs in levels, the way collation tables do: letters first
//! (case-insensitive, `ё` as `е`), then the `е`/`ё` distinction, then case
//! with lowercase first. Whatever is still equal falls back to code points
//! so that the order is total.

use std::cmp::Ordering;

fn primary(c: char) -> char {
    match c {
        'ё' | 'Ё' => 'е',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

fn secondary(c: char) -> u8 {
    match c {
        'ё' | 'Ё' => 1,
        _ => 0,
    }
}

fn tertiary(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}

fn compare_level<K: Ord>(a: &str, b: &str, key: impl Fn(char) -> K) -> Ordering {
    a.chars().map(&key).cmp(b.chars().map(&key))
}

pub fn compare_titles(a: &str, b: &str) -> Ordering {
    compare_level(a, b, primary)
        .then_with(|| compare_level(a, b, secondary))
        .then_with(|| compare_level(a, b, tertiary))
        .then_with(|| a.cmp(b))
}
