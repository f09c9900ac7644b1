//! Sorting comparison logic
//!
//! Pure functions for ordering directory entries the way a file browser
//! should: folders before files, names compared case- and accent-insensitively
//! with embedded numbers compared by value ("file2" < "file10").

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use crate::host::Entry;
use crate::logic::search::fold;

/// Compare two names using natural (numeric-aware) ordering
///
/// # Sort Rules
/// - Digit runs compare by numeric value, leading zeros ignored
/// - Other characters compare case- and diacritic-insensitively
/// - Names equal under those rules fall back to a plain comparison so the
///   ordering is total
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use quick_explorer::logic::sorting::compare_names;
///
/// assert_eq!(compare_names("file2", "file10"), Ordering::Less);
/// assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
/// assert_eq!(compare_names("École", "ecole2"), Ordering::Less);
/// assert_eq!(compare_names("007", "7"), Ordering::Less); // tie broken by raw text
/// ```
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let fa = fold(a);
    let fb = fold(b);
    let mut ca = fa.chars().peekable();
    let mut cb = fb.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_digits(&mut ca);
                let nb = take_digits(&mut cb);
                let ord = compare_digit_runs(&na, &nb);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                ca.next();
                cb.next();
            }
        }
    }

    a.cmp(b)
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two entries: folders first, then by natural name order
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(a.name(), b.name()),
    }
}
