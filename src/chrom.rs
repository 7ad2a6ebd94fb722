//! Natural ordering of chromosome names.
//!
//! Numeric chromosomes come first, in numeric order (`2` before `10`),
//! followed by `X`, `Y` and `MT`, followed by any other name in
//! lexicographic order. Numeric names are normalised to their minimal
//! decimal form, so `"07"` and `"7"` are the same chromosome.
use indexmap::IndexSet;
use std::cmp::Ordering;
use tracing::debug;

/// The special chromosomes with a fixed position after the numeric ones.
const SPECIAL_ORDER: [&str; 3] = ["X", "Y", "MT"];

/// Chromosomes always given an output entry, with a placeholder row if they
/// have no markers.
pub const PLACEHOLDER_CHROMS: [&str; 2] = ["Y", "MT"];

/// Returns true if `name` is a non-empty run of ASCII digits.
fn is_numeric(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// The canonical spelling of a chromosome name: numeric names lose their
/// leading zeros (`"000"` becomes `"0"`), anything else is returned as is.
pub fn canonical_label(name: &str) -> String {
    if is_numeric(name) {
        let stripped = name.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        name.to_string()
    }
}

/// The sort key of a chromosome name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromKey {
    /// Canonical decimal digits, compared by value.
    Numeric(String),
    /// Rank in [`SPECIAL_ORDER`] (or past its end) and the name.
    Special(usize, String),
}

impl ChromKey {
    pub fn new(name: &str) -> Self {
        if is_numeric(name) {
            ChromKey::Numeric(canonical_label(name))
        } else {
            let rank = SPECIAL_ORDER
                .iter()
                .position(|s| *s == name)
                .unwrap_or(SPECIAL_ORDER.len());
            ChromKey::Special(rank, name.to_string())
        }
    }

    /// The canonical label this key sorts.
    pub fn label(&self) -> &str {
        match self {
            ChromKey::Numeric(digits) => digits,
            ChromKey::Special(_, name) => name,
        }
    }
}

impl Ord for ChromKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // canonical digits have no leading zeros, so a shorter string is
            // a smaller number; this avoids overflow on absurdly long names
            (ChromKey::Numeric(a), ChromKey::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (ChromKey::Numeric(_), ChromKey::Special(..)) => Ordering::Less,
            (ChromKey::Special(..), ChromKey::Numeric(_)) => Ordering::Greater,
            (ChromKey::Special(ra, a), ChromKey::Special(rb, b)) => {
                ra.cmp(rb).then_with(|| a.cmp(b))
            }
        }
    }
}

impl PartialOrd for ChromKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An ordered, duplicate-free sequence of canonical chromosome labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChromosomeOrder {
    labels: Vec<String>,
}

impl ChromosomeOrder {
    /// Sort a collection of chromosome names into natural order.
    ///
    /// The result does not depend on the order of `names`. Duplicates (after
    /// canonicalisation) are collapsed; no name is dropped, including the
    /// empty string, which sorts as a special chromosome.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys: Vec<ChromKey> = names.into_iter().map(ChromKey::new).collect();
        keys.sort();
        keys.dedup();
        let labels: Vec<String> = keys.iter().map(|k| k.label().to_string()).collect();
        debug!("chromosome order: {:?}", labels);
        Self { labels }
    }

    /// Add chromosomes that are not already present, keeping natural order.
    pub fn with_extra<'a>(&'a self, extra: impl IntoIterator<Item = &'a str>) -> Self {
        ChromosomeOrder::new(
            self.labels
                .iter()
                .map(String::as_str)
                .chain(extra),
        )
    }

    /// Add the [`PLACEHOLDER_CHROMS`].
    pub fn with_placeholders(&self) -> Self {
        self.with_extra(PLACEHOLDER_CHROMS)
    }

    pub fn contains(&self, name: &str) -> bool {
        let label = canonical_label(name);
        self.labels.iter().any(|l| *l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

/// The distinct canonical chromosome labels of `names`, in order of first
/// appearance.
pub fn distinct_labels<'a>(names: impl IntoIterator<Item = &'a str>) -> IndexSet<String> {
    names.into_iter().map(canonical_label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(names: &[&str]) -> Vec<String> {
        ChromosomeOrder::new(names.iter().copied()).as_slice().to_vec()
    }

    #[test]
    fn test_natural_order() {
        assert_eq!(
            order(&["10", "2", "X", "MT", "Y", "1"]),
            vec!["1", "2", "10", "X", "Y", "MT"]
        );
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let a = order(&["X", "3", "20", "Y", "1"]);
        let b = order(&["1", "Y", "20", "3", "X"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_other_specials_lexicographic() {
        assert_eq!(
            order(&["Un", "MT", "chrZ", "1", "", "X", "Random"]),
            vec!["1", "X", "MT", "", "Random", "Un", "chrZ"]
        );
    }

    #[test]
    fn test_leading_zeros_normalised() {
        assert_eq!(order(&["007", "10", "0", "000", "7"]), vec!["0", "7", "10"]);
        assert_eq!(canonical_label("00"), "0");
        assert_eq!(canonical_label("012"), "12");
        assert_eq!(canonical_label("X"), "X");
    }

    #[test]
    fn test_signed_and_decimal_are_special() {
        assert!(matches!(ChromKey::new("-1"), ChromKey::Special(3, _)));
        assert!(matches!(ChromKey::new("1.0"), ChromKey::Special(3, _)));
        assert_eq!(order(&["2", "-1", "1.0"]), vec!["2", "-1", "1.0"]);
    }

    #[test]
    fn test_long_numeric_names() {
        assert_eq!(
            order(&["123456789012345678901234567890", "99"]),
            vec!["99", "123456789012345678901234567890"]
        );
    }

    #[test]
    fn test_with_placeholders() {
        let base = ChromosomeOrder::new(["2", "1", "X"]);
        let full = base.with_placeholders();
        assert_eq!(full.as_slice(), &["1", "2", "X", "Y", "MT"]);
        assert!(full.contains("MT"));
        assert!(!base.contains("Y"));

        // already present chromosomes are not duplicated
        let with_y = ChromosomeOrder::new(["Y", "1"]).with_placeholders();
        assert_eq!(with_y.as_slice(), &["1", "Y", "MT"]);
    }

    #[test]
    fn test_with_extra_borrowed_names() {
        let base = ChromosomeOrder::new(["X", "3"]);
        let extra = vec!["Un".to_string(), "03".to_string(), "11".to_string()];
        let full = base.with_extra(extra.iter().map(String::as_str));
        assert_eq!(full.as_slice(), &["3", "11", "X", "Un"]);
        // the base order is left untouched
        assert_eq!(base.as_slice(), &["3", "X"]);
    }

    #[test]
    fn test_distinct_labels() {
        let labels = distinct_labels(["2", "2", "02", "X", "1"]);
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["2", "X", "1"]);
    }
}
