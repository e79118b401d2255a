//! Stored catalog records.

use time::OffsetDateTime;
use uuid::Uuid;

use libris_query::{SortValue, Sortable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub genre: String,
    pub date_of_birth: OffsetDateTime,
    pub date_of_death: Option<OffsetDateTime>,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Sortable for Author {
    const SORTABLE_PROPERTIES: &'static [&'static str] =
        &["Id", "FirstName", "LastName", "Genre", "DateOfBirth"];

    fn sort_value(&self, property: &str) -> SortValue {
        match property {
            "Id" => SortValue::Text(self.id.to_string()),
            "FirstName" => self.first_name.as_str().into(),
            "LastName" => self.last_name.as_str().into(),
            "Genre" => self.genre.as_str().into(),
            "DateOfBirth" => SortValue::Integer(self.date_of_birth.unix_timestamp()),
            _ => SortValue::Null,
        }
    }
}

/// A book, owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Author to insert, together with the books created alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub genre: String,
    pub date_of_birth: OffsetDateTime,
    pub date_of_death: Option<OffsetDateTime>,
    pub books: Vec<NewBook>,
}

/// Book to insert. A missing id is generated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBook {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}
