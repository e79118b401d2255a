use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use libris_db::{Author, NewAuthor};
use libris_query::{PropertyMapping, PropertyMappingValue, Shapeable};

use crate::modules::books::models::BookForCreationDto;

/// Public read model of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub genre: String,
}

impl AuthorDto {
    /// Project an author as seen at `now`.
    pub fn from_author(author: &Author, now: OffsetDateTime) -> Self {
        Self {
            id: author.id,
            name: author.full_name(),
            age: age_at(author.date_of_birth, author.date_of_death.unwrap_or(now)),
            genre: author.genre.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, OffsetDateTime::now_utc())
    }
}

impl Shapeable for AuthorDto {
    const PROPERTIES: &'static [&'static str] = &["Id", "Name", "Age", "Genre"];

    fn property_value(&self, property: &str) -> Option<Value> {
        match property {
            "Id" => Some(json!(self.id)),
            "Name" => Some(json!(self.name)),
            "Age" => Some(json!(self.age)),
            "Genre" => Some(json!(self.genre)),
            _ => None,
        }
    }
}

/// Whole years between `date_of_birth` and `end`, counted in UTC.
///
/// A 29 February birthday falls on 28 February in common years.
pub fn age_at(date_of_birth: OffsetDateTime, end: OffsetDateTime) -> i32 {
    let born = date_of_birth.to_offset(UtcOffset::UTC);
    let end = end.to_offset(UtcOffset::UTC);

    let mut age = end.year() - born.year();
    let anniversary = born
        .replace_year(end.year())
        .or_else(|_| born.replace_day(28).and_then(|day| day.replace_year(end.year())));
    if anniversary.is_ok_and(|anniversary| end < anniversary) {
        age -= 1;
    }
    age
}

/// Sort fields of [`AuthorDto`] and the [`Author`] properties behind them.
pub fn author_property_mapping() -> PropertyMapping {
    PropertyMapping::new()
        .with("Id", PropertyMappingValue::new(["Id"]))
        .with("Genre", PropertyMappingValue::new(["Genre"]))
        .with("Age", PropertyMappingValue::new(["DateOfBirth"]).reverted())
        .with("Name", PropertyMappingValue::new(["FirstName", "LastName"]))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationDto {
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_birth: OffsetDateTime,
    pub genre: String,
    #[serde(default)]
    pub books: Vec<BookForCreationDto>,
}

/// Creation body accepted under the date-of-death vendor media type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationWithDateOfDeathDto {
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_birth: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_of_death: Option<OffsetDateTime>,
    pub genre: String,
    #[serde(default)]
    pub books: Vec<BookForCreationDto>,
}

impl From<AuthorForCreationDto> for NewAuthor {
    fn from(dto: AuthorForCreationDto) -> Self {
        NewAuthor {
            first_name: dto.first_name,
            last_name: dto.last_name,
            genre: dto.genre,
            date_of_birth: dto.date_of_birth,
            date_of_death: None,
            books: dto.books.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<AuthorForCreationWithDateOfDeathDto> for NewAuthor {
    fn from(dto: AuthorForCreationWithDateOfDeathDto) -> Self {
        NewAuthor {
            first_name: dto.first_name,
            last_name: dto.last_name,
            genre: dto.genre,
            date_of_birth: dto.date_of_birth,
            date_of_death: dto.date_of_death,
            books: dto.books.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_query::ShapeData;
    use time::macros::datetime;

    fn author() -> Author {
        Author {
            id: Uuid::nil(),
            first_name: "Stephen".to_string(),
            last_name: "King".to_string(),
            genre: "Horror".to_string(),
            date_of_birth: datetime!(1947-09-21 00:00 UTC),
            date_of_death: None,
        }
    }

    #[test]
    fn age_counts_completed_years() {
        let born = datetime!(1947-09-21 00:00 UTC);
        assert_eq!(age_at(born, datetime!(2024-09-20 23:59 UTC)), 76);
        assert_eq!(age_at(born, datetime!(2024-09-21 00:00 UTC)), 77);
        assert_eq!(age_at(born, datetime!(2024-12-01 00:00 UTC)), 77);
    }

    #[test]
    fn leap_day_birthday_counts_on_february_28_in_common_years() {
        let born = datetime!(2000-02-29 00:00 UTC);
        assert_eq!(age_at(born, datetime!(2023-02-27 23:59 UTC)), 22);
        assert_eq!(age_at(born, datetime!(2023-02-28 00:00 UTC)), 23);
        assert_eq!(age_at(born, datetime!(2024-02-28 12:00 UTC)), 23);
        assert_eq!(age_at(born, datetime!(2024-02-29 00:00 UTC)), 24);
    }

    #[test]
    fn age_is_computed_in_utc() {
        let born = datetime!(1960-03-01 01:00 +02:00);
        assert_eq!(age_at(born, datetime!(2020-02-29 23:30 UTC)), 60);
    }

    #[test]
    fn age_stops_at_date_of_death() {
        let mut author = author();
        author.date_of_death = Some(datetime!(2000-01-01 00:00 UTC));
        let dto = AuthorDto::from_author(&author, datetime!(2030-01-01 00:00 UTC));
        assert_eq!(dto.age, 52);
    }

    #[test]
    fn dto_combines_names() {
        let dto = AuthorDto::from_author(&author(), datetime!(2020-01-01 00:00 UTC));
        assert_eq!(dto.name, "Stephen King");
        assert_eq!(dto.age, 72);
    }

    #[test]
    fn shaped_dto_uses_property_names() {
        let dto = AuthorDto::from_author(&author(), datetime!(2020-01-01 00:00 UTC));
        let shaped = dto.shape_data("genre,ID").unwrap();
        assert_eq!(
            serde_json::to_value(&shaped).unwrap(),
            json!({"Genre": "Horror", "Id": Uuid::nil()})
        );
        assert_eq!(
            serde_json::to_value(dto.shape_data("").unwrap()).unwrap(),
            serde_json::to_value(&dto).unwrap()
        );
    }

    #[test]
    fn creation_body_reads_rfc3339_dates_and_nested_books() {
        let dto: AuthorForCreationWithDateOfDeathDto = serde_json::from_value(json!({
            "firstName": "Douglas",
            "lastName": "Adams",
            "dateOfBirth": "1952-03-11T00:00:00+00:00",
            "dateOfDeath": "2001-05-11T00:00:00Z",
            "genre": "Science fiction",
            "books": [{"title": "Mostly Harmless", "description": "The fifth book."}]
        }))
        .unwrap();

        let author = NewAuthor::from(dto);
        assert_eq!(author.date_of_death, Some(datetime!(2001-05-11 00:00 UTC)));
        assert_eq!(author.books.len(), 1);
        assert_eq!(author.books[0].title, "Mostly Harmless");
    }

    #[test]
    fn books_default_to_empty() {
        let dto: AuthorForCreationDto = serde_json::from_value(json!({
            "firstName": "Tom",
            "lastName": "Lanoye",
            "dateOfBirth": "1958-08-27T00:00:00+02:00",
            "genre": "Various"
        }))
        .unwrap();
        assert!(dto.books.is_empty());
    }
}
