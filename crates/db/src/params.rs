//! List parameters of the authors collection.

use serde::{Deserialize, Deserializer, Serialize};

use libris_query::QueryError;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 20;
pub const DEFAULT_ORDER_BY: &str = "Name";

/// Query-string parameters of `GET /api/authors`.
///
/// Serializes back into the same query-string keys, which is how page links
/// are rebuilt. `pageSize` is clamped to [`MAX_PAGE_SIZE`] on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorsResourceParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    pub order_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub page_number: u32,
    #[serde(deserialize_with = "clamped_page_size")]
    pub page_size: u32,
}

impl Default for AuthorsResourceParameters {
    fn default() -> Self {
        Self {
            fields: None,
            order_by: DEFAULT_ORDER_BY.to_string(),
            search_query: None,
            genre: None,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AuthorsResourceParameters {
    /// Reject paging values the pipeline cannot serve.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page_number == 0 {
            return Err(QueryError::InvalidPageNumber);
        }
        if self.page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }
        Ok(())
    }

    /// Requested field list, empty when absent.
    pub fn fields(&self) -> &str {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Same parameters pointing at another page.
    #[must_use]
    pub fn with_page_number(&self, page_number: u32) -> Self {
        Self {
            page_number,
            ..self.clone()
        }
    }

    pub(crate) fn genre_filter(&self) -> Option<String> {
        non_blank(self.genre.as_deref()).map(str::to_lowercase)
    }

    pub(crate) fn search_filter(&self) -> Option<String> {
        non_blank(self.search_query.as_deref()).map(str::to_lowercase)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn clamped_page_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let requested = u32::deserialize(deserializer)?;
    Ok(requested.min(MAX_PAGE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> AuthorsResourceParameters {
        serde_urlencoded::from_str(query).unwrap()
    }

    #[test]
    fn empty_query_uses_defaults() {
        let params = parse("");
        assert_eq!(params, AuthorsResourceParameters::default());
        assert_eq!(params.order_by, "Name");
        assert_eq!(params.fields(), "");
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(parse("pageSize=50").page_size, MAX_PAGE_SIZE);
        assert_eq!(parse("pageSize=5").page_size, 5);
    }

    #[test]
    fn zero_paging_values_fail_validation() {
        assert!(matches!(
            parse("pageNumber=0").validate(),
            Err(QueryError::InvalidPageNumber)
        ));
        assert!(matches!(
            parse("pageSize=0").validate(),
            Err(QueryError::InvalidPageSize)
        ));
        assert!(parse("pageNumber=3&pageSize=20").validate().is_ok());
    }

    #[test]
    fn serializes_back_to_query_string() {
        let params = parse("genre=Fantasy&pageSize=2&orderBy=-Age");
        let query = serde_urlencoded::to_string(params.with_page_number(2)).unwrap();
        assert_eq!(query, "orderBy=-Age&genre=Fantasy&pageNumber=2&pageSize=2");
    }

    #[test]
    fn blank_filters_are_ignored() {
        let params = parse("genre=%20%20&searchQuery=");
        assert_eq!(params.genre_filter(), None);
        assert_eq!(params.search_filter(), None);
        assert_eq!(parse("genre=%20Horror").genre_filter().as_deref(), Some("horror"));
    }
}
