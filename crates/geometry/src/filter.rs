// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Attribute predicates used to select features, e.g. which road segments take
//! part in a subdivision.

use crate::feature::{AttributeValue, Record};
use serde::{Deserialize, Serialize};

/// Anything that can accept or reject an attribute record.
pub trait FeatureFilter {
    fn accepts(&self, record: &Record) -> bool;
}

impl<F: Fn(&Record) -> bool> FeatureFilter for F {
    fn accepts(&self, record: &Record) -> bool {
        self(record)
    }
}

/// A small attribute query language that can live in a configuration file.
///
/// ```
/// use zonation_geometry::filter::{FeatureFilter, Predicate};
/// use zonation_geometry::feature::{AttributeValue, Record};
///
/// // Route names of at most five characters that are not the negative
/// // direction of a divided highway.
/// let roads = Predicate::And {
///     predicates: vec![
///         Predicate::MaxLength { field: "route".into(), max: 5 },
///         Predicate::Not {
///             predicate: Box::new(Predicate::EndsWith { field: "route".into(), suffix: "N".into() }),
///         },
///     ],
/// };
///
/// let mut record = Record::new();
/// record.insert("route".into(), AttributeValue::from("0015P"));
/// assert!(roads.accepts(&record));
/// record.insert("route".into(), AttributeValue::from("0015N"));
/// assert!(!roads.accepts(&record));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    #[default]
    All,
    Equals {
        field: String,
        value: AttributeValue,
    },
    In {
        field: String,
        values: Vec<AttributeValue>,
    },
    /// Text attribute no longer than `max` characters.
    MaxLength {
        field: String,
        max: usize,
    },
    EndsWith {
        field: String,
        suffix: String,
    },
    Not {
        predicate: Box<Predicate>,
    },
    And {
        predicates: Vec<Predicate>,
    },
    Or {
        predicates: Vec<Predicate>,
    },
}

impl FeatureFilter for Predicate {
    fn accepts(&self, record: &Record) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Equals { field, value } => {
                record.get(field).is_some_and(|v| v.matches(value))
            },
            Predicate::In { field, values } => record
                .get(field)
                .is_some_and(|v| values.iter().any(|candidate| v.matches(candidate))),
            Predicate::MaxLength { field, max } => record
                .get(field)
                .and_then(AttributeValue::as_str)
                .is_some_and(|s| s.chars().count() <= *max),
            Predicate::EndsWith { field, suffix } => record
                .get(field)
                .and_then(AttributeValue::as_str)
                .is_some_and(|s| s.ends_with(suffix.as_str())),
            Predicate::Not { predicate } => !predicate.accepts(record),
            Predicate::And { predicates } => predicates.iter().all(|p| p.accepts(record)),
            Predicate::Or { predicates } => predicates.iter().any(|p| p.accepts(record)),
        }
    }
}


// End of File
