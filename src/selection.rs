//! Mapping free-text replies onto a displayed ride option
//!
//! Resolution order:
//! 1. A leading integer that is a valid 1-based position picks that entry.
//! 2. Otherwise a case-insensitive substring match against the service name,
//!    in either direction ("book uber" contains "uber", "ub" is inside "uber").
//!    The first match in fare order wins.

use crate::fares::{RideOption, RideOptionSet};

/// Parse the integer at the start of `input`
///
/// Accepts an optional sign followed by ASCII digits and ignores whatever
/// follows, so `"2 people"` and `"2.5"` both give 2. Returns `None` when no
/// digits lead the input or the value does not fit in an `i64`.
pub fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Pick the option the user meant, or `None` if nothing matches
pub fn resolve_selection<'a>(input: &str, options: &'a RideOptionSet) -> Option<&'a RideOption> {
    if let Some(position) = leading_integer(input)
        .and_then(|n| usize::try_from(n).ok())
        .and_then(|n| options.position(n))
    {
        return Some(position);
    }

    let wanted = input.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    options.iter().find(|option| {
        let service = option.service().to_lowercase();
        service.contains(&wanted) || wanted.contains(&service)
    })
}
