use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use libris_db::{Book, NewBook};
use libris_http::{AppError, AppResult};
use libris_query::Link;

const TITLE_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Public read model of a book, always carrying its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl BookDto {
    pub fn new(book: Book, links: Vec<Link>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            description: book.description,
            author_id: book.author_id,
            links,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForCreationDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookForCreationDto {
    pub fn validate(&self) -> AppResult<()> {
        let details = book_violations(
            "BookForCreationDto",
            self.title.as_deref(),
            self.description.as_deref(),
            false,
        );
        into_result(details)
    }
}

impl From<BookForCreationDto> for NewBook {
    fn from(dto: BookForCreationDto) -> Self {
        NewBook::new(dto.title.unwrap_or_default(), dto.description)
    }
}

/// Full replacement of a book; also the document JSON Patch operates on.
///
/// Absent values serialize as `null` so patch paths always resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForUpdateDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookForUpdateDto {
    pub fn validate(&self) -> AppResult<()> {
        let details = book_violations(
            "BookForUpdateDto",
            self.title.as_deref(),
            self.description.as_deref(),
            true,
        );
        into_result(details)
    }

    /// Book stored under `id` for `author_id` with these values.
    pub fn into_book(self, id: Uuid, author_id: Uuid) -> Book {
        Book {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description,
            author_id,
        }
    }

    pub fn into_new_book(self, id: Uuid) -> NewBook {
        NewBook::new(self.title.unwrap_or_default(), self.description).with_id(id)
    }
}

impl From<&Book> for BookForUpdateDto {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            description: book.description.clone(),
        }
    }
}

fn violation(field: &str, error: &str) -> Value {
    json!({ "field": field, "error": error })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

/// Rule violations of a book body, as `{field, error}` entries.
pub fn book_violations(
    type_name: &str,
    title: Option<&str>,
    description: Option<&str>,
    description_required: bool,
) -> Vec<Value> {
    let mut details = Vec::new();

    if title == description {
        details.push(violation(
            type_name,
            "The provided description should be different from the title.",
        ));
    }

    if is_blank(title) {
        details.push(violation("title", "You should fill out a title."));
    } else if title.is_some_and(|title| title.chars().count() > TITLE_MAX_CHARS) {
        details.push(violation(
            "title",
            "The title shouldn't have more than 100 characters.",
        ));
    }

    if description_required && is_blank(description) {
        details.push(violation("description", "You should fill out a description."));
    } else if description.is_some_and(|description| description.chars().count() > DESCRIPTION_MAX_CHARS)
    {
        details.push(violation(
            "description",
            "The description shouldn't have more than 500 characters.",
        ));
    }

    details
}

fn into_result(details: Vec<Value>) -> AppResult<()> {
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(details, "the book failed validation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_of(result: AppResult<()>) -> Vec<String> {
        match result {
            Err(AppError::Validation { details, .. }) => details
                .iter()
                .map(|detail| detail["field"].as_str().unwrap_or_default().to_string())
                .collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn creation(title: Option<&str>, description: Option<&str>) -> BookForCreationDto {
        BookForCreationDto {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn valid_creation_passes() {
        assert!(creation(Some("It"), Some("A clown")).validate().is_ok());
        assert!(creation(Some("It"), None).validate().is_ok());
    }

    #[test]
    fn equal_title_and_description_is_keyed_by_type() {
        assert_eq!(
            fields_of(creation(Some("X"), Some("X")).validate()),
            ["BookForCreationDto"]
        );
    }

    #[test]
    fn title_is_required_and_bounded() {
        assert_eq!(fields_of(creation(None, Some("d")).validate()), ["title"]);
        let long = "t".repeat(101);
        assert_eq!(fields_of(creation(Some(&long), None).validate()), ["title"]);
        assert!(creation(Some(&"t".repeat(100)), None).validate().is_ok());
    }

    #[test]
    fn description_is_bounded() {
        let long = "d".repeat(501);
        assert_eq!(
            fields_of(creation(Some("It"), Some(&long)).validate()),
            ["description"]
        );
    }

    #[test]
    fn update_requires_description() {
        let update = BookForUpdateDto {
            title: Some("It".to_string()),
            description: None,
        };
        assert_eq!(fields_of(update.validate()), ["description"]);
    }

    #[test]
    fn empty_update_reports_every_rule() {
        assert_eq!(
            fields_of(BookForUpdateDto::default().validate()),
            ["BookForUpdateDto", "title", "description"]
        );
    }

    #[test]
    fn update_document_serializes_nulls() {
        assert_eq!(
            serde_json::to_value(BookForUpdateDto::default()).unwrap(),
            json!({"title": null, "description": null})
        );
    }
}
