use std::collections::BTreeSet;

use super::ApiImage;

pub const MAX_QUERY_TOKENS: usize = 10;

const INFO_MARKER: &str = ":info";
const NO_INFO_MARKER: &str = ":noinfo";

const FOLDED_CHARS: [(char, &str); 4] = [('ä', "ae"), ('ö', "oe"), ('ü', "ue"), ('ß', "ss")];

/// Canonical, order independent word signature of `input`.
///
/// The value is lower-cased, umlauts and `ß` are folded to their ASCII
/// digraphs, whitespace is collapsed and the distinct words are sorted and
/// joined by single spaces.
pub fn to_search_value(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    for ch in input.to_lowercase().chars() {
        match ch {
            '\n' => folded.push(' '),
            '\r' => {}
            '\t' => folded.push_str("  "),
            other => match FOLDED_CHARS.iter().find(|(from, _)| *from == other) {
                Some((_, to)) => folded.push_str(to),
                None => folded.push(other),
            },
        }
    }

    folded
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

pub fn to_search_value_opt(input: Option<&str>) -> String {
    to_search_value(input.unwrap_or_default())
}

/// Search context of an image: name, title, description, tags and the
/// metadata marker, normalized as one value.
pub fn search_context(image: &ApiImage) -> String {
    let info = image.info();
    let tags = info.map(|info| info.tags.join(" "));
    let marker = if image.metadata.is_present() {
        INFO_MARKER
    } else {
        NO_INFO_MARKER
    };

    let values = [
        to_search_value(&image.name),
        to_search_value_opt(info.map(|info| info.title.as_str())),
        to_search_value_opt(info.map(|info| info.description.as_str())),
        to_search_value_opt(tags.as_deref()),
        marker.to_string(),
    ];

    let joined = values
        .iter()
        .filter(|value| !value.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    to_search_value(&joined)
}

/// Distinct normalized words of a raw query, capped at [`MAX_QUERY_TOKENS`].
pub fn query_tokens(query: &str) -> Vec<String> {
    to_search_value(query)
        .split(' ')
        .filter(|token| !token.trim().is_empty())
        .take(MAX_QUERY_TOKENS)
        .map(str::to_string)
        .collect()
}
