//! Parsing of list-endpoint query strings.
//!
//! Parsing is permissive: unusable numbers fall back to their defaults and
//! malformed field lists are trimmed, so a query string never fails a request.

use mongodb::bson::Document;

use crate::constants::{
    DEFAULT_PAGE_NUMBER, DEFAULT_RESULTS_PER_PAGE, DEFAULT_SORT_FIELD, PARAM_LIMIT, PARAM_PAGE,
    PARAM_SELECT, PARAM_SORT, RESERVED_PARAMS,
};

use super::filter::{build_filter, parse_predicates, FilterPredicate};

/// A list request broken into filters and the four reserved directives.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub predicates: Vec<FilterPredicate>,
    pub select: Vec<String>,
    pub sort: Vec<String>,
    pub results_per_page: u64,
    pub page: u64,
}

impl ListQuery {
    /// Split raw `(key, value)` pairs into filters and directives.
    ///
    /// A repeated directive keeps its last value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let last = |name: &str| {
            pairs
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        Self {
            predicates: parse_predicates(
                pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                &RESERVED_PARAMS,
            ),
            select: last(PARAM_SELECT).map(split_fields).unwrap_or_default(),
            sort: last(PARAM_SORT).map(split_fields).unwrap_or_default(),
            results_per_page: parse_positive_int(last(PARAM_LIMIT))
                .unwrap_or(DEFAULT_RESULTS_PER_PAGE),
            page: parse_positive_int(last(PARAM_PAGE)).unwrap_or(DEFAULT_PAGE_NUMBER),
        }
    }

    /// MongoDB filter document for the predicates.
    pub fn filter(&self) -> Document {
        build_filter(&self.predicates)
    }

    /// Projection for `select`, or `None` to return whole documents.
    ///
    /// A `-field` entry excludes that field instead of including it.
    pub fn projection(&self) -> Option<Document> {
        if self.select.is_empty() {
            return None;
        }

        let mut projection = Document::new();
        for field in &self.select {
            match field.strip_prefix('-') {
                Some(excluded) => projection.insert(excluded, 0),
                None => projection.insert(field.as_str(), 1),
            };
        }
        Some(projection)
    }

    /// Sort document for `sort`, defaulting to newest first.
    pub fn sort_document(&self) -> Document {
        let mut sort = Document::new();
        for field in &self.sort {
            match field.strip_prefix('-') {
                Some(descending) => sort.insert(descending, -1),
                None => sort.insert(field.as_str(), 1),
            };
        }

        if sort.is_empty() {
            sort.insert(DEFAULT_SORT_FIELD, -1);
        }
        sort
    }

    /// Number of documents preceding the requested page.
    ///
    /// Capped at `i64::MAX`, the largest skip the server accepts.
    pub fn start_index(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.results_per_page)
            .min(i64::MAX as u64)
    }

    /// Drop filters and sort keys that touch any of `hidden`.
    pub fn hide_fields(&mut self, hidden: &[&str]) {
        if hidden.is_empty() {
            return;
        }
        self.predicates
            .retain(|predicate| !touches_hidden(&predicate.field, hidden));
        self.sort
            .retain(|field| !touches_hidden(field.trim_start_matches('-'), hidden));
    }
}

fn touches_hidden(path: &str, hidden: &[&str]) -> bool {
    let root = path.split('.').next().unwrap_or(path);
    hidden.contains(&root)
}

/// Split a comma-separated field list, dropping blanks and `$` operators.
fn split_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|field| {
            let name = field.trim_start_matches('-');
            !name.is_empty() && !name.starts_with('$')
        })
        .map(str::to_string)
        .collect()
}

/// Read the leading integer of a parameter, accepting only values of at least 1.
///
/// Mirrors the usual `parseInt` behaviour: `"3abc"` reads as 3 while `"foo"`,
/// `"0"` and `"-2"` yield `None` so the caller falls back to its default.
pub fn parse_positive_int(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<u64>().ok().filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn query(raw: &[(&str, &str)]) -> ListQuery {
        let pairs: Vec<(String, String)> = raw
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ListQuery::from_pairs(&pairs)
    }

    #[test]
    fn test_defaults() {
        let q = query(&[]);
        assert_eq!(q.page, 1);
        assert_eq!(q.results_per_page, 1);
        assert!(q.predicates.is_empty());
        assert_eq!(q.projection(), None);
        assert_eq!(q.sort_document(), doc! { "createdAt": -1 });
        assert_eq!(q.start_index(), 0);
    }

    #[test]
    fn test_non_numeric_page_defaults_to_first() {
        let q = query(&[("page", "foo"), ("limit", "bar")]);
        assert_eq!(q.page, 1);
        assert_eq!(q.results_per_page, 1);
    }

    #[test]
    fn test_zero_and_negative_numbers_fall_back() {
        let q = query(&[("page", "0"), ("limit", "-5")]);
        assert_eq!(q.page, 1);
        assert_eq!(q.results_per_page, 1);
    }

    #[test]
    fn test_leading_digits_are_used() {
        assert_eq!(parse_positive_int(Some("3abc")), Some(3));
        assert_eq!(parse_positive_int(Some(" 25")), Some(25));
        assert_eq!(parse_positive_int(Some("+7")), Some(7));
        assert_eq!(parse_positive_int(Some("2.9")), Some(2));
        assert_eq!(parse_positive_int(Some("")), None);
        assert_eq!(parse_positive_int(None), None);
    }

    #[test]
    fn test_directives_are_not_filters() {
        let q = query(&[
            ("select", "name,description"),
            ("sort", "-averageCost,name"),
            ("limit", "5"),
            ("page", "2"),
            ("housing", "true"),
        ]);

        assert_eq!(q.filter(), doc! { "housing": { "$in": [true, "true"] } });
        assert_eq!(q.projection(), Some(doc! { "name": 1, "description": 1 }));
        assert_eq!(q.sort_document(), doc! { "averageCost": -1, "name": 1 });
        assert_eq!(q.start_index(), 5);
    }

    #[test]
    fn test_select_exclusions_and_blank_entries() {
        let q = query(&[("select", "-description,, ,$where")]);
        assert_eq!(q.projection(), Some(doc! { "description": 0 }));
    }

    #[test]
    fn test_blank_sort_uses_default() {
        let q = query(&[("sort", ",")]);
        assert_eq!(q.sort_document(), doc! { "createdAt": -1 });
    }

    #[test]
    fn test_last_directive_wins() {
        let q = query(&[("limit", "10"), ("limit", "3")]);
        assert_eq!(q.results_per_page, 3);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let q = query(&[("page", "18446744073709551615"), ("limit", "1000")]);
        assert_eq!(q.start_index(), i64::MAX as u64);

        let q = query(&[("page", "9223372036854775809")]);
        assert_eq!(q.start_index(), i64::MAX as u64);
    }

    #[test]
    fn test_hidden_fields_cannot_be_filtered_or_sorted() {
        let mut q = query(&[
            ("password[gte]", "$2b$10$a"),
            ("password.length", "60"),
            ("role", "admin"),
            ("sort", "-password,name"),
        ]);
        q.hide_fields(&["password"]);

        assert_eq!(q.filter(), doc! { "role": "admin" });
        assert_eq!(q.sort_document(), doc! { "name": 1 });
    }
}
