//! Query string construction.
//!
//! [`Query`] is an ordered list of key/value parameters rendered into a
//! URL-encoded query string. [`SearchQuery`] builds the Zendesk search
//! syntax (`type:ticket status<solved`) and renders it into a [`Query`].
//!
//! Both builders consume `self` and hand back a new value on every step, so
//! a partially built query can be cloned and extended in different ways.

use std::fmt;

/// An ordered set of URL query parameters.
///
/// Parameters render in the order they were added; Zendesk is sensitive to
/// the order of sort terms.
///
/// # Example
///
/// ```
/// use zendesk_api::query::Query;
///
/// let query = Query::new().with("status", "open").with("sort", "-created_at");
/// assert_eq!(query.build(), "status=open&sort=-created_at");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
    // Keys whose values are comma-separated lists; their commas stay literal.
    list_keys: Vec<String>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Appends a comma-separated list parameter, e.g. `ids=1,2,3`.
    ///
    /// Each element is percent-encoded; the separating commas are not.
    #[must_use]
    pub fn with_list(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        self.list_keys.push(key.clone());
        self.with(key, value)
    }

    /// Appends a parameter only when a value is present.
    #[must_use]
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Appends every parameter of `other`, keeping its order.
    #[must_use]
    pub fn merge(mut self, other: Query) -> Self {
        self.params.extend(other.params);
        self.list_keys.extend(other.list_keys);
        self
    }

    /// Returns true if no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Renders `key=value` pairs joined by `&`, percent-encoding both sides.
    pub fn build(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                let value = if self.list_keys.contains(key) {
                    value
                        .split(',')
                        .map(|item| urlencoding::encode(item).into_owned())
                        .collect::<Vec<_>>()
                        .join(",")
                } else {
                    urlencoding::encode(value).into_owned()
                };
                format!("{}={}", urlencoding::encode(key), value)
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Comparison used by a search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `field:value`
    Equals,
    /// `field<value`
    LessThan,
    /// `field>value`
    GreaterThan,
    /// `field<=value`
    LessOrEqual,
    /// `field>=value`
    GreaterOrEqual,
    /// `-field:value`
    Excludes,
}

impl Operator {
    fn symbol(self) -> &'static str {
        match self {
            Operator::Equals | Operator::Excludes => ":",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
        }
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchTerm {
    Filter {
        field: String,
        operator: Operator,
        value: String,
    },
    Text(String),
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchTerm::Filter {
                field,
                operator,
                value,
            } => {
                if *operator == Operator::Excludes {
                    f.write_str("-")?;
                }
                write!(f, "{}{}{}", field, operator.symbol(), quote(value))
            }
            SearchTerm::Text(text) => f.write_str(&quote(text)),
        }
    }
}

/// Wraps values containing whitespace in double quotes.
fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', ""))
    } else {
        value.to_string()
    }
}

/// A Zendesk search expression plus its sort options.
///
/// # Example
///
/// ```
/// use zendesk_api::query::{Operator, SearchQuery, SortOrder};
///
/// let search = SearchQuery::new()
///     .of_type("ticket")
///     .with("status", Operator::LessThan, "solved")
///     .excluding("tags", "spam")
///     .sort_by("created_at", SortOrder::Desc);
///
/// assert_eq!(search.expression(), "type:ticket status<solved -tags:spam");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<SearchTerm>,
    sort_by: Option<String>,
    sort_order: Option<SortOrder>,
}

impl SearchQuery {
    /// Creates an empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one object type (`ticket`, `user`, `organization`, `group`).
    #[must_use]
    pub fn of_type(self, result_type: impl Into<String>) -> Self {
        self.with("type", Operator::Equals, result_type)
    }

    /// Adds a `field:value` filter.
    #[must_use]
    pub fn matching(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(field, Operator::Equals, value)
    }

    /// Adds a filter with an explicit operator.
    #[must_use]
    pub fn with(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        self.terms.push(SearchTerm::Filter {
            field: field.into(),
            operator,
            value: value.into(),
        });
        self
    }

    /// Adds a `-field:value` exclusion.
    #[must_use]
    pub fn excluding(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(field, Operator::Excludes, value)
    }

    /// Adds a free-text term.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.terms.push(SearchTerm::Text(text.into()));
        self
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Returns true if no terms were added.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Renders the search expression (the value of the `query` parameter).
    pub fn expression(&self) -> String {
        self.terms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders `query`, `sort_by` and `sort_order` parameters.
    pub fn to_query(&self) -> Query {
        Query::new()
            .with("query", self.expression())
            .with_opt("sort_by", self.sort_by.as_deref())
            .with_opt("sort_order", self.sort_order)
    }
}
