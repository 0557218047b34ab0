//! Heuristic parsing of Japanese addresses into prefecture and city labels.
//!
//! This is not geocoding. A prefecture is a short leading run of characters
//! closed by one of the prefecture suffixes, a city is whatever follows the
//! prefecture up to the first municipality marker.

use serde::{Deserialize, Serialize};

/// Bucket label for addresses that do not start with a recognisable prefecture.
pub const UNKNOWN_PREFECTURE: &str = "その他";

/// Characters closing a prefecture name (都, 道, 府, 県).
pub const PREFECTURE_SUFFIXES: [char; 4] = ['都', '道', '府', '県'];

/// Characters closing a municipality name (市, 区, 郡, 町, 村).
pub const CITY_MARKERS: [char; 5] = ['市', '区', '郡', '町', '村'];

/// Shortest and longest run of characters allowed before the prefecture suffix.
const PREFIX_RUN: [usize; 2] = [2, 3];

/// Prefectures in their conventional north to south order.
pub const PREFECTURE_ORDER: [&str; 47] = [
    "北海道",
    "青森県",
    "岩手県",
    "宮城県",
    "秋田県",
    "山形県",
    "福島県",
    "茨城県",
    "栃木県",
    "群馬県",
    "埼玉県",
    "千葉県",
    "東京都",
    "神奈川県",
    "新潟県",
    "富山県",
    "石川県",
    "福井県",
    "山梨県",
    "長野県",
    "岐阜県",
    "静岡県",
    "愛知県",
    "三重県",
    "滋賀県",
    "京都府",
    "大阪府",
    "兵庫県",
    "奈良県",
    "和歌山県",
    "鳥取県",
    "島根県",
    "岡山県",
    "広島県",
    "山口県",
    "徳島県",
    "香川県",
    "愛媛県",
    "高知県",
    "福岡県",
    "佐賀県",
    "長崎県",
    "熊本県",
    "大分県",
    "宮崎県",
    "鹿児島県",
    "沖縄県",
];

/// Which candidate run length is tried first when both a 2 and a 3 character
/// run are followed by a suffix.
///
/// The two only disagree when the fourth character is itself a suffix, e.g.
/// `東京都府中市` is `東京都` under `Shortest` and `東京都府` under `Longest`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMatch {
    #[default]
    Shortest,
    Longest,
}

impl PrefixMatch {
    fn candidates(&self) -> [usize; 2] {
        match self {
            PrefixMatch::Shortest => PREFIX_RUN,
            PrefixMatch::Longest => [PREFIX_RUN[1], PREFIX_RUN[0]],
        }
    }
}

/// Returns the leading prefecture of `address`, suffix included.
pub fn parse_prefecture(address: &str, policy: PrefixMatch) -> Option<&str> {
    policy.candidates().into_iter().find_map(|run| {
        let mut chars = address.char_indices().skip(run);
        let (offset, suffix) = chars.next()?;
        if PREFECTURE_SUFFIXES.contains(&suffix) {
            Some(&address[..offset + suffix.len_utf8()])
        } else {
            None
        }
    })
}

/// Same as [`parse_prefecture`] but falls back to [`UNKNOWN_PREFECTURE`].
pub fn prefecture_label(address: &str, policy: PrefixMatch) -> &str {
    parse_prefecture(address, policy).unwrap_or(UNKNOWN_PREFECTURE)
}

/// Returns the municipality following `prefecture`, marker included.
/// None if the address is not in `prefecture` or no marker follows it.
pub fn parse_city<'a>(address: &'a str, prefecture: &str) -> Option<&'a str> {
    let rest = address.strip_prefix(prefecture)?;
    let (offset, marker) = rest
        .char_indices()
        .find(|(_, c)| CITY_MARKERS.contains(c))?;
    Some(&rest[..offset + marker.len_utf8()])
}

/// Position of the prefecture in [`PREFECTURE_ORDER`].
pub fn prefecture_rank(prefecture: &str) -> Option<usize> {
    PREFECTURE_ORDER.iter().position(|p| *p == prefecture)
}

#[test]
fn prefecture_needs_two_leading_chars() {
    assert_eq!(parse_prefecture("都内1-1", PrefixMatch::Shortest), None);
    assert_eq!(parse_prefecture("", PrefixMatch::Longest), None);
}

#[test]
fn every_canonical_prefecture_parses_to_itself() {
    for prefecture in PREFECTURE_ORDER {
        let address = format!("{prefecture}中央1-1");
        assert_eq!(
            parse_prefecture(&address, PrefixMatch::Shortest),
            Some(prefecture)
        );
    }
}
