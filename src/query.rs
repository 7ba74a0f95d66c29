//! Query filters for list/search endpoints
//!
//! The query shape is a tagged union resolved through one exhaustive match,
//! so the accepted forms are visible in the type instead of being probed at
//! runtime.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Filter to apply when listing or searching repository records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Query {
    /// No filter; the collection endpoint is queried as-is.
    #[default]
    None,
    /// Key/value pairs, percent-encoded into `k=v&k2=v2`.
    Params(BTreeMap<String, String>),
    /// A pre-formatted query string, appended unchanged (the caller is
    /// responsible for encoding).
    Raw(String),
    /// Pre-formatted `key=value` fragments, joined with `&`.
    List(Vec<String>),
}

impl Query {
    /// Build a [`Query::Params`] from any iterator of key/value pairs.
    pub fn params<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Query::Params(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Resolve this filter into a URL query string, or `None` when it
    /// contributes no parameters.
    pub fn to_query_string(&self) -> Option<String> {
        match self {
            Query::None => None,
            Query::Params(map) if map.is_empty() => None,
            Query::Params(map) => Some(
                form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(map)
                    .finish(),
            ),
            Query::Raw(s) if s.is_empty() => None,
            Query::Raw(s) => Some(s.clone()),
            Query::List(items) if items.is_empty() => None,
            Query::List(items) => Some(items.join("&")),
        }
    }
}
