//! Closing-reference and tier-marker extraction.
//!
//! Recognizes the remote tracker's closing-keyword vocabulary
//! (close/closes/closed, fix/fixes/fixed, resolve/resolves/resolved)
//! followed by either a bare `#N` reference or a fully-qualified issue
//! URL, and the `Tier-N-Winner` competition placement marker.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

fn closer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?)\b\s*:?\s*(?:#(\d+)|https?://github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/issues/(\d+))",
        )
        .expect("closer regex must compile")
    })
}

fn tier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\btier[\s-]*(\d+)[\s-]*winner\b").expect("tier regex must compile")
    })
}

/// Issue numbers the text closes, attributed to `owner`/`repo`.
///
/// Bare `#N` references implicitly target the candidate's own base
/// repository; fully-qualified URLs target the repository named in the
/// URL and count only when it matches the supplied pair. Matching
/// tolerates stray whitespace and newlines between keyword and
/// reference.
pub fn closer_issue_numbers(text: &str, owner: &str, repo: &str) -> BTreeSet<u64> {
    let mut numbers = BTreeSet::new();
    for caps in closer_re().captures_iter(text) {
        if let Some(bare) = caps.get(1) {
            if let Ok(number) = bare.as_str().parse::<u64>() {
                numbers.insert(number);
            }
            continue;
        }
        let (Some(url_owner), Some(url_repo), Some(url_number)) =
            (caps.get(2), caps.get(3), caps.get(4))
        else {
            continue;
        };
        if url_owner.as_str().eq_ignore_ascii_case(owner)
            && url_repo.as_str().eq_ignore_ascii_case(repo)
            && let Ok(number) = url_number.as_str().parse::<u64>()
        {
            numbers.insert(number);
        }
    }
    numbers
}

/// First declared competition placement, 1-indexed as written.
///
/// Callers decrement exactly once before touching contract state.
pub fn tier_placement(text: &str) -> Option<u64> {
    tier_re()
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<u64>()
        .ok()
        .filter(|place| *place > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(text: &str) -> BTreeSet<u64> {
        closer_issue_numbers(text, "acme", "widgets")
    }

    #[test]
    fn bare_reference_targets_base_repository() {
        assert!(numbers("Closes #42").contains(&42));
    }

    #[test]
    fn keyword_vocabulary_is_case_insensitive() {
        for text in [
            "closes #1",
            "CLOSED #1",
            "Fixes #1",
            "fix #1",
            "FIXED #1",
            "resolves #1",
            "Resolve #1",
            "resolved: #1",
        ] {
            assert!(numbers(text).contains(&1), "no match for {text:?}");
        }
    }

    #[test]
    fn non_closer_keywords_do_not_match() {
        assert!(numbers("related to #5").is_empty());
        assert!(numbers("addresses #5").is_empty());
        assert!(numbers("this fixture #5").is_empty());
    }

    #[test]
    fn stray_whitespace_and_newlines_are_tolerated() {
        assert!(numbers("Closes\n#517").contains(&517));
        assert!(numbers("fixes   \n\n  #9").contains(&9));
    }

    #[test]
    fn full_url_is_attributed_to_its_own_repository() {
        let same = numbers("Closes https://github.com/acme/widgets/issues/519");
        assert!(same.contains(&519));

        let other = numbers("Closes https://github.com/other/widgets/issues/519");
        assert!(other.is_empty());
    }

    #[test]
    fn one_text_may_close_multiple_issues() {
        let set = numbers("Fixes #1, fixes #2\ncloses https://github.com/acme/widgets/issues/3");
        assert_eq!(set, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn tier_marker_is_one_indexed_and_first_match_wins() {
        assert_eq!(tier_placement("Tier-1-Winner"), Some(1));
        assert_eq!(tier_placement("tier 3 winner"), Some(3));
        assert_eq!(tier_placement("Tier-2-Winner then Tier-5-Winner"), Some(2));
        assert_eq!(tier_placement("no placement here"), None);
        assert_eq!(tier_placement("Tier-0-Winner"), None);
    }
}
