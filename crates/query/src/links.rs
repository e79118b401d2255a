//! Hypermedia link primitives.

use serde::{Deserialize, Serialize};

/// A navigable link attached to a resource representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// A collection body wrapped together with its own links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedCollection<T> {
    pub value: Vec<T>,
    pub links: Vec<Link>,
}

impl<T> LinkedCollection<T> {
    pub fn new(value: Vec<T>, links: Vec<Link>) -> Self {
        Self { value, links }
    }
}

/// Which page of a collection a generated URI points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUriType {
    Current,
    PreviousPage,
    NextPage,
}

impl ResourceUriType {
    /// Page number the URI should carry, given the page being served.
    pub fn page_number(self, current: u32) -> u32 {
        match self {
            Self::Current => current,
            Self::PreviousPage => current.saturating_sub(1),
            Self::NextPage => current.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn link_serializes_with_lowercase_keys() {
        let link = Link::new("http://host/api/authors", "self", "GET");
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({"href": "http://host/api/authors", "rel": "self", "method": "GET"})
        );
    }

    #[test]
    fn uri_type_shifts_page_number() {
        assert_eq!(ResourceUriType::Current.page_number(2), 2);
        assert_eq!(ResourceUriType::PreviousPage.page_number(2), 1);
        assert_eq!(ResourceUriType::NextPage.page_number(2), 3);
        assert_eq!(ResourceUriType::PreviousPage.page_number(0), 0);
    }

    #[test]
    fn linked_collection_has_value_and_links() {
        let body = LinkedCollection::new(vec![1, 2], vec![Link::new("/x", "self", "GET")]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"value": [1, 2], "links": [{"href": "/x", "rel": "self", "method": "GET"}]})
        );
    }
}
