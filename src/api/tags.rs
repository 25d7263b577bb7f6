use regex::Regex;
use std::sync::LazyLock;

/// Characters the game uses in player and club tags
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0289PYLQGRJCUV]{3,}$").expect("tag pattern is valid"));

/// Canonical form of a tag: no whitespace, upper-case, leading `#`.
pub fn normalize_tag(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if compact.starts_with('#') {
        compact
    } else {
        format!("#{}", compact)
    }
}

/// Percent-encode a tag for use as a path segment (`#` becomes `%23`)
pub fn encode_tag(raw: &str) -> String {
    urlencoding::encode(&normalize_tag(raw)).into_owned()
}

pub fn is_valid_tag(raw: &str) -> bool {
    TAG_PATTERN.is_match(&normalize_tag(raw))
}
