//! Parameter values.
//!
//! A build parameter is either a scalar (flag or string), an ordered list of
//! strings (sources, libraries, compiler flags), or a nested sub-map
//! (`dependent_target_settings`). Lists carry the interesting merge
//! behavior: combining two declarations of the same key concatenates their
//! values in declaration order.

use crate::params::ParamMap;

/// The value of a single build parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A boolean flag (`signed`, `also64bit`, ...).
    Bool(bool),
    /// A single string setting.
    Str(String),
    /// An ordered list of strings.
    List(Vec<String>),
    /// A nested parameter map, used for `dependent_target_settings`.
    Map(ParamMap),
}

impl ParamValue {
    /// Build a list value from anything yielding string-likes.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }

    /// The contained boolean, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The contained string, if this is a scalar string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The contained list, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// The contained sub-map, if this is a map.
    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Coerce to a list of strings: lists pass through, scalar strings
    /// become one-element lists. Flags and maps have no list form.
    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            ParamValue::List(items) => Some(items),
            ParamValue::Str(s) => Some(vec![s]),
            ParamValue::Bool(_) | ParamValue::Map(_) => None,
        }
    }

    /// Combine two values declared under the same key.
    ///
    /// Lists concatenate with `self` first; scalar strings promote to
    /// one-element lists when the other side is a string or list; nested
    /// maps combine recursively. For flags and mismatched kinds the
    /// later declaration (`other`) wins.
    pub fn concat(self, other: ParamValue) -> ParamValue {
        use ParamValue::*;
        match (self, other) {
            (List(mut a), List(b)) => {
                a.extend(b);
                List(a)
            }
            (List(mut a), Str(b)) => {
                a.push(b);
                List(a)
            }
            (Str(a), List(b)) => {
                let mut items = vec![a];
                items.extend(b);
                List(items)
            }
            (Str(a), Str(b)) => List(vec![a, b]),
            (Map(a), Map(b)) => Map(a.combine(&b)),
            (_, other) => other,
        }
    }

    /// Combine with `other`'s values placed first.
    pub fn concat_front(self, other: ParamValue) -> ParamValue {
        use ParamValue::*;
        match (self, other) {
            (a @ (List(_) | Str(_)), b @ (List(_) | Str(_))) => b.concat(a),
            (a, b) => a.concat(b),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::list(items)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Map(map)
    }
}
