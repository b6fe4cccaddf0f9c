//! Text helpers for rendering tool reports.

use chrono::{DateTime, TimeZone};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z%z";

/// Title-case a city name: a cased character is title-cased when the character
/// before it is uncased (or it starts the string), and lowercased otherwise.
///
/// `"new york"` becomes `"New York"`, `"o'neil"` becomes `"O'Neil"`.
/// Title case differs from upper case for `ß` (`"ßtadt"` becomes `"Sstadt"`) and
/// for the Latin digraphs (`"ǆ"` becomes `"ǅ"`).
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_cased = false;

    for c in input.chars() {
        let cased = is_cased(c);
        if cased && !prev_cased {
            push_titlecase(c, &mut out);
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase() || matches!(c, 'ǅ' | 'ǈ' | 'ǋ' | 'ǲ')
}

fn push_titlecase(c: char, out: &mut String) {
    match c {
        'ß' => out.push_str("Ss"),
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        _ => out.extend(c.to_uppercase()),
    }
}

/// Render a measurement the way a float literal reads: shortest exact
/// representation, with whole values keeping a single decimal (`10.0`).
pub fn format_measurement(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// `2024-07-01 14:00:00 CEST+0200`
pub fn format_local_time<Tz>(when: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    when.format(TIME_FORMAT).to_string()
}
