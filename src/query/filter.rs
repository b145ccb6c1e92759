//! Typed filter predicates parsed from query-string parameters.
//!
//! A key such as `averageCost[lte]` becomes a [`FilterPredicate`] with field
//! `averageCost` and operator [`FilterOperator::Lte`]. Predicates are turned
//! into a MongoDB filter document by [`build_filter`]; nothing is ever spliced
//! into a query as raw text.

use log::warn;
use mongodb::bson::{Bson, Document};

/// Comparison applied by a single predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl FilterOperator {
    /// Parse the bracketed suffix of a query key (`gt`, `gte`, `lt`, `lte`, `in`, `eq`).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "eq" => Some(FilterOperator::Eq),
            "gt" => Some(FilterOperator::Gt),
            "gte" => Some(FilterOperator::Gte),
            "lt" => Some(FilterOperator::Lt),
            "lte" => Some(FilterOperator::Lte),
            "in" => Some(FilterOperator::In),
            _ => None,
        }
    }

    /// The MongoDB comparison operator for this predicate.
    pub fn mongo_operator(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "$eq",
            FilterOperator::Gt => "$gt",
            FilterOperator::Gte => "$gte",
            FilterOperator::Lt => "$lt",
            FilterOperator::Lte => "$lte",
            FilterOperator::In => "$in",
        }
    }
}

/// One field comparison derived from a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Bson,
}

impl FilterPredicate {
    /// Parse a single `key=value` pair.
    ///
    /// Returns `None` for keys that cannot name a document field (empty names,
    /// `$`-prefixed segments). Those are dropped rather than rejected.
    pub fn parse(key: &str, raw_value: &str) -> Option<Self> {
        let (field, operator) = parse_key(key)?;
        let value = match operator {
            FilterOperator::In => Bson::Array(
                raw_value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .flat_map(candidate_values)
                    .collect(),
            ),
            FilterOperator::Eq => {
                let mut candidates = candidate_values(raw_value);
                if candidates.len() == 1 {
                    candidates.remove(0)
                } else {
                    Bson::Array(candidates)
                }
            }
            _ => coerce_value(raw_value),
        };

        Some(Self {
            field,
            operator,
            value,
        })
    }

    /// The MongoDB operator and operand for this predicate.
    ///
    /// Equality with several candidate values becomes `$in`.
    pub fn condition(&self) -> (&'static str, Bson) {
        match (&self.operator, &self.value) {
            (FilterOperator::Eq, Bson::Array(_)) => ("$in", self.value.clone()),
            (operator, value) => (operator.mongo_operator(), value.clone()),
        }
    }
}

/// Split `field[sub][op]` into a dotted field path and an operator.
///
/// A trailing bracket segment that names an operator selects it; any other
/// bracket segments are treated as nested field names (`location[state]`
/// is `location.state`). Keys with unbalanced brackets are taken literally.
fn parse_key(key: &str) -> Option<(String, FilterOperator)> {
    let key = key.trim();
    let (base, mut segments) = match key.find('[') {
        Some(open) if key.ends_with(']') => {
            let segments: Vec<&str> = key[open + 1..key.len() - 1].split("][").collect();
            (&key[..open], segments)
        }
        _ => (key, Vec::new()),
    };

    let operator = match segments.last().and_then(|s| FilterOperator::from_suffix(s)) {
        Some(op) => {
            segments.pop();
            op
        }
        None => FilterOperator::Eq,
    };

    let mut path = vec![base];
    path.extend(segments);

    let invalid = path.iter().any(|segment| {
        segment.is_empty()
            || segment.starts_with('$')
            || segment.contains('[')
            || segment.contains(']')
    });
    if invalid {
        warn!("Ignoring unusable filter parameter: {}", key);
        return None;
    }

    Some((path.join("."), operator))
}

/// Interpret a raw query-string value as the most specific BSON scalar.
///
/// Query strings carry no type information, so numeric and boolean looking
/// values are converted so they compare correctly with stored numbers and flags.
pub fn coerce_value(raw: &str) -> Bson {
    let raw = raw.trim();
    match raw {
        "true" => return Bson::Boolean(true),
        "false" => return Bson::Boolean(false),
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Bson::Int64(int);
    }

    let looks_numeric = raw
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.');
    if looks_numeric {
        if let Ok(float) = raw.parse::<f64>() {
            if float.is_finite() {
                return Bson::Double(float);
            }
        }
    }

    Bson::String(raw.to_string())
}

/// Values an equality or `in` match accepts for one raw value.
///
/// Query strings carry no schema, so a value that reads as a number or boolean
/// is matched both typed and as the literal string: `title=2021` finds a
/// title "2021" as well as a numeric 2021.
fn candidate_values(raw: &str) -> Vec<Bson> {
    match coerce_value(raw) {
        Bson::String(text) => vec![Bson::String(text)],
        typed => vec![typed, Bson::String(raw.trim().to_string())],
    }
}

/// Parse all filter parameters, skipping the reserved directives.
///
/// A repeated `(field, operator)` pair keeps only its last value.
pub fn parse_predicates<'a, I>(pairs: I, reserved: &[&str]) -> Vec<FilterPredicate>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut predicates: Vec<FilterPredicate> = Vec::new();

    for (key, value) in pairs {
        if reserved.contains(&key) {
            continue;
        }
        let Some(predicate) = FilterPredicate::parse(key, value) else {
            continue;
        };

        match predicates
            .iter_mut()
            .find(|p| p.field == predicate.field && p.operator == predicate.operator)
        {
            Some(existing) => existing.value = predicate.value,
            None => predicates.push(predicate),
        }
    }

    predicates
}

/// Translate predicates into a MongoDB filter document.
///
/// A field with a single plain equality is emitted as `{field: value}`;
/// anything else becomes an operator document such as
/// `{field: {"$gte": a, "$lte": b}}`.
pub fn build_filter(predicates: &[FilterPredicate]) -> Document {
    let mut filter = Document::new();

    for predicate in predicates {
        let (operator, value) = predicate.condition();
        let shares_field = predicates
            .iter()
            .filter(|p| p.field == predicate.field)
            .count()
            > 1;

        if operator == "$eq" && !shares_field {
            filter.insert(predicate.field.clone(), value);
            continue;
        }

        if !matches!(filter.get(&predicate.field), Some(Bson::Document(_))) {
            filter.insert(predicate.field.clone(), Document::new());
        }
        if let Ok(operators) = filter.get_document_mut(&predicate.field) {
            operators.insert(operator, value);
        }
    }

    filter
}
