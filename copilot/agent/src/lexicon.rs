//! Word lists and tokenizing shared by the scoring and keyword engines.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9]+(?:-[a-z0-9]+)*").expect("token pattern is valid"));

/// Concrete product features buyers search for.
pub const FEATURE_KEYWORDS: &[&str] = &[
    "4k",
    "accessories",
    "aux",
    "bass",
    "battery",
    "bill",
    "bluetooth",
    "box",
    "branded",
    "cable",
    "capacity",
    "charger",
    "complete",
    "dimensions",
    "hdmi",
    "insurance",
    "inverter",
    "invoice",
    "ipx7",
    "lights",
    "manual",
    "mileage",
    "noise-cancelling",
    "packaging",
    "papers",
    "portable",
    "ram",
    "sealed",
    "serviced",
    "ssd",
    "storage",
    "touchscreen",
    "unused",
    "warranty",
    "waterproof",
    "wireless",
];

/// Words in a title that promise a benefit.
pub const BENEFIT_WORDS: &[&str] = &[
    "comfortable",
    "compact",
    "deep",
    "durable",
    "efficient",
    "fast",
    "genuine",
    "heavy-duty",
    "lightweight",
    "limited",
    "mint",
    "original",
    "powerful",
    "premium",
    "rare",
    "spacious",
    "sturdy",
    "vintage",
];

/// Materials worth surfacing as supporting tags.
pub const MATERIAL_WORDS: &[&str] = &[
    "aluminium",
    "bamboo",
    "brass",
    "ceramic",
    "cotton",
    "denim",
    "glass",
    "leather",
    "linen",
    "marble",
    "plastic",
    "rubber",
    "silk",
    "steel",
    "teak",
    "wood",
    "wooden",
    "wool",
];

/// Lowercase word tokens, hyphenated words kept whole.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|found| found.as_str().to_string())
        .collect()
}

/// Distinct words of `text` that appear in `list`, in order of first appearance.
#[must_use]
pub fn matches_in(text: &str, list: &[&str]) -> IndexSet<String> {
    tokens(text)
        .into_iter()
        .filter(|token| list.contains(&token.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_hyphenated_words() {
        assert_eq!(
            tokens("24-hour battery, IPX7!"),
            vec!["24-hour", "battery", "ipx7"]
        );
    }

    #[test]
    fn matches_are_distinct_and_ordered() {
        let found = matches_in("Battery and bass, more BASS, long battery", FEATURE_KEYWORDS);
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["battery", "bass"]);
    }

    #[test]
    fn lists_are_lowercase() {
        for word in FEATURE_KEYWORDS
            .iter()
            .chain(BENEFIT_WORDS)
            .chain(MATERIAL_WORDS)
        {
            assert_eq!(*word, word.to_lowercase());
        }
    }
}
