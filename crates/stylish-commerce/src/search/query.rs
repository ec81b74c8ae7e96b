//! Query context for catalog browsing.

use serde::{Deserialize, Serialize};

/// Category shown when none is selected.
pub const DEFAULT_CATEGORY: &str = "all";

/// What the product list is currently showing.
///
/// A non-empty keyword takes precedence over the category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryContext {
    /// Search keyword, if any.
    pub keyword: Option<String>,
    /// Category filter.
    pub category: String,
}

impl QueryContext {
    /// Browse a category.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            keyword: None,
            category: category.into(),
        }
    }

    /// Search by keyword, keeping the default category.
    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Build from optional URL-style parameters.
    ///
    /// A missing or blank category falls back to [`DEFAULT_CATEGORY`];
    /// a blank keyword is treated as absent.
    pub fn from_params(keyword: Option<&str>, category: Option<&str>) -> Self {
        let keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from);
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        Self { keyword, category }
    }

    /// The active search keyword, if it should drive the query.
    pub fn active_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::category(DEFAULT_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all() {
        let ctx = QueryContext::default();
        assert_eq!(ctx.category, "all");
        assert_eq!(ctx.active_keyword(), None);
    }

    #[test]
    fn test_from_params() {
        let ctx = QueryContext::from_params(Some("  "), None);
        assert_eq!(ctx, QueryContext::default());

        let ctx = QueryContext::from_params(Some("dress"), Some("women"));
        assert_eq!(ctx.active_keyword(), Some("dress"));
        assert_eq!(ctx.category, "women");
    }

    #[test]
    fn test_empty_keyword_is_inactive() {
        let ctx = QueryContext {
            keyword: Some(String::new()),
            category: "men".to_string(),
        };
        assert_eq!(ctx.active_keyword(), None);
    }
}
