//! Korean personal-name extraction
//!
//! Finds names of the form `surname + two given-name syllables` in free text,
//! e.g. `김민수`, `남궁민호`, `이.영희 과장`. Extraction runs in two steps:
//!
//! 1. [`scan`] walks the text and returns raw candidates, tolerating one
//!    separator after the surname and one between the given-name syllables,
//!    and skipping a trailing title such as `님` or `팀장`.
//! 2. [`split_name`] re-derives the surname/given-name split of each candidate
//!    and rejects anything whose given name is not exactly two syllables.
//!
//! Given names of one or three syllables are deliberately not supported.

mod tables;

use tables::{
    is_double_surname, is_separator, is_single_surname, is_syllable, ORG_KEYWORDS, TITLES,
};

/// Extract person names from `text`, deduplicated in first-seen order.
///
/// Separators are removed from the returned names, so `김.민수` yields
/// `김민수`. Never fails; text without names yields an empty list.
pub fn extract_person_names(text: &str) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut names: Vec<String> = Vec::new();
    for raw in scan(&normalized) {
        let candidate: String = raw.chars().filter(|c| !is_separator(*c)).collect();

        if ORG_KEYWORDS.iter().any(|k| candidate.contains(k)) {
            continue;
        }
        if split_name(&candidate).is_none() {
            continue;
        }
        if !names.contains(&candidate) {
            names.push(candidate);
        }
    }
    names
}

/// Split a separator-free name into `(surname, given_name)`.
///
/// When the name opens with a two-syllable surname, that split is the only
/// one considered. Returns `None` unless the given name is exactly two
/// syllables.
pub fn split_name(name: &str) -> Option<(&str, &str)> {
    let double = name
        .char_indices()
        .nth(2)
        .map(|(i, _)| i)
        .filter(|&i| is_double_surname(&name[..i]));

    let at = match double {
        Some(at) => at,
        None => name
            .chars()
            .next()
            .filter(|c| is_single_surname(*c))
            .map(char::len_utf8)?,
    };

    let (surname, given) = name.split_at(at);
    let two_syllables = given.chars().count() == 2 && given.chars().all(is_syllable);
    two_syllables.then_some((surname, given))
}

/// Raw candidate spans, separators still included.
///
/// Matching is leftmost and non-overlapping. A candidate must not touch a
/// Hangul syllable on either side, except through a recognised title.
pub fn scan(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let left_clear = i == 0 || !is_syllable(chars[i - 1]);
        if left_clear {
            if let Some((name_end, end)) = match_at(&chars, i) {
                found.push(chars[i..name_end].iter().collect());
                i = end;
                continue;
            }
        }
        i += 1;
    }
    found
}

/// Try to match a name starting at `start`.
///
/// Returns the end of the name itself and the end of the whole match
/// (including any title).
fn match_at(chars: &[char], start: usize) -> Option<(usize, usize)> {
    let double = chars
        .get(start..start + 2)
        .map(|s| s.iter().collect::<String>())
        .filter(|s| is_double_surname(s))
        .map(|_| 2);
    let single = chars
        .get(start)
        .filter(|c| is_single_surname(**c))
        .map(|_| 1);

    [double, single]
        .into_iter()
        .flatten()
        .find_map(|surname_len| match_given(chars, start + surname_len))
}

/// Match `sep? syllable sep? syllable title?` followed by a right boundary.
fn match_given(chars: &[char], mut pos: usize) -> Option<(usize, usize)> {
    for _ in 0..2 {
        if chars.get(pos).copied().map_or(false, is_separator) {
            pos += 1;
        }
        if !chars.get(pos).copied().map_or(false, is_syllable) {
            return None;
        }
        pos += 1;
    }
    let name_end = pos;

    let right_clear = |at: usize| !chars.get(at).copied().map_or(false, is_syllable);

    let with_title = TITLES.iter().find_map(|title| {
        let len = title.chars().count();
        let matches = chars
            .get(name_end..name_end + len)
            .map_or(false, |s| s.iter().copied().eq(title.chars()));
        (matches && right_clear(name_end + len)).then_some(name_end + len)
    });

    match with_title {
        Some(end) => Some((name_end, end)),
        None if right_clear(name_end) => Some((name_end, name_end)),
        None => None,
    }
}
