//! Sample catalog loaded on startup.

use time::macros::datetime;
use time::OffsetDateTime;

use crate::entities::{NewAuthor, NewBook};
use crate::repository::{LibraryRepository, RepositoryResult};

fn author(
    first_name: &str,
    last_name: &str,
    genre: &str,
    date_of_birth: OffsetDateTime,
    books: &[(&str, &str)],
) -> NewAuthor {
    NewAuthor {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        genre: genre.to_string(),
        date_of_birth,
        date_of_death: None,
        books: books
            .iter()
            .map(|(title, description)| NewBook::new(*title, Some(description.to_string())))
            .collect(),
    }
}

pub fn sample_authors() -> Vec<NewAuthor> {
    vec![
        author(
            "Stephen",
            "King",
            "Horror",
            datetime!(1947-09-21 00:00 UTC),
            &[
                ("The Shining", "A family heads to an isolated hotel for the winter."),
                ("Misery", "A novelist is held captive by his self-proclaimed number one fan."),
                ("It", "Seven children face an ancient evil in the town of Derry."),
                ("The Stand", "Survivors of a pandemic gather for a final confrontation."),
            ],
        ),
        author(
            "George",
            "RR Martin",
            "Fantasy",
            datetime!(1948-09-20 00:00 UTC),
            &[("A Game of Thrones", "Noble families fight for control of the Iron Throne.")],
        ),
        author(
            "Neil",
            "Gaiman",
            "Fantasy",
            datetime!(1960-11-10 00:00 UTC),
            &[("American Gods", "An ex-convict is drawn into a war between old and new gods.")],
        ),
        author(
            "Tom",
            "Lanoye",
            "Various",
            datetime!(1958-08-27 00:00 UTC),
            &[("Speechless", "A son writes about his mother's loss of speech.")],
        ),
        author(
            "Douglas",
            "Adams",
            "Science fiction",
            datetime!(1952-03-11 00:00 UTC),
            &[(
                "The Hitchhiker's Guide to the Galaxy",
                "An ordinary man escapes the demolition of Earth.",
            )],
        ),
        author(
            "James",
            "Ellroy",
            "Thriller",
            datetime!(1948-03-04 00:00 UTC),
            &[("American Tabloid", "Three men are caught in the plots of the early sixties.")],
        ),
    ]
}

/// Insert the sample authors and their books.
pub async fn seed_sample_catalog(repository: &dyn LibraryRepository) -> RepositoryResult<usize> {
    let authors = repository.add_authors(sample_authors()).await?;
    tracing::info!(authors = authors.len(), "sample catalog loaded");
    Ok(authors.len())
}
