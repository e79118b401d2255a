//! Catalog persistence contract and its in-memory implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use libris_query::{apply_sort, PagedList, PropertyMapping, QueryError};

use crate::entities::{Author, Book, NewAuthor, NewBook};
use crate::params::AuthorsResourceParameters;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("author {0} does not exist")]
    AuthorNotFound(Uuid),

    #[error("book {0} does not exist")]
    BookNotFound(Uuid),

    #[error("write rejected: {0}")]
    WriteRejected(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage operations over authors and their books.
///
/// Every mutating call is applied atomically: it either fully succeeds or
/// leaves the catalog untouched.
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Filter, sort and page the authors.
    ///
    /// `genre` matches exactly and `searchQuery` matches a substring of genre,
    /// first name or last name, both ignoring case and surrounding spaces.
    async fn get_authors(
        &self,
        params: &AuthorsResourceParameters,
        mapping: &PropertyMapping,
    ) -> RepositoryResult<PagedList<Author>>;

    async fn get_author(&self, author_id: Uuid) -> RepositoryResult<Option<Author>>;

    /// Authors with the given ids that exist, ordered by first then last name.
    async fn get_authors_by_ids(&self, author_ids: &[Uuid]) -> RepositoryResult<Vec<Author>>;

    /// Insert an author and its books, returning the stored author.
    async fn add_author(&self, author: NewAuthor) -> RepositoryResult<(Author, Vec<Book>)>;

    /// Insert several authors at once.
    async fn add_authors(&self, authors: Vec<NewAuthor>) -> RepositoryResult<Vec<Author>>;

    /// Remove an author and all its books. Returns whether the author existed.
    async fn delete_author(&self, author_id: Uuid) -> RepositoryResult<bool>;

    async fn author_exists(&self, author_id: Uuid) -> RepositoryResult<bool>;

    /// Books of an author ordered by title.
    async fn get_books_for_author(&self, author_id: Uuid) -> RepositoryResult<Vec<Book>>;

    async fn get_book_for_author(
        &self,
        author_id: Uuid,
        book_id: Uuid,
    ) -> RepositoryResult<Option<Book>>;

    /// Insert a book for an existing author, keeping a caller-supplied id.
    async fn add_book_for_author(&self, author_id: Uuid, book: NewBook) -> RepositoryResult<Book>;

    /// Replace the title and description of a stored book.
    async fn update_book_for_author(&self, book: Book) -> RepositoryResult<Book>;

    /// Returns whether the author owned a book with that id.
    async fn delete_book(&self, author_id: Uuid, book_id: Uuid) -> RepositoryResult<bool>;
}

#[derive(Debug, Clone, Default)]
struct Catalog {
    authors: IndexMap<Uuid, Author>,
    books: IndexMap<Uuid, Book>,
}

impl Catalog {
    fn insert_author(&mut self, new_author: NewAuthor) -> RepositoryResult<(Author, Vec<Book>)> {
        let NewAuthor {
            first_name,
            last_name,
            genre,
            date_of_birth,
            date_of_death,
            books,
        } = new_author;

        let author = Author {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            genre,
            date_of_birth,
            date_of_death,
        };
        self.authors.insert(author.id, author.clone());

        let books = books
            .into_iter()
            .map(|book| self.insert_book(author.id, book))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((author, books))
    }

    /// Reject supplied book ids that are taken or repeated.
    fn check_book_ids(&self, books: &[NewBook]) -> RepositoryResult<()> {
        let mut seen = HashSet::new();
        for id in books.iter().filter_map(|book| book.id) {
            if self.books.contains_key(&id) || !seen.insert(id) {
                return Err(RepositoryError::WriteRejected(format!(
                    "book id {} is already in use",
                    id
                )));
            }
        }
        Ok(())
    }

    fn insert_book(&mut self, author_id: Uuid, new_book: NewBook) -> RepositoryResult<Book> {
        let id = new_book.id.unwrap_or_else(Uuid::new_v4);
        if self.books.contains_key(&id) {
            return Err(RepositoryError::WriteRejected(format!(
                "book id {} is already in use",
                id
            )));
        }

        let book = Book {
            id,
            title: new_book.title,
            description: new_book.description,
            author_id,
        };
        self.books.insert(id, book.clone());
        Ok(book)
    }

    fn books_of(&self, author_id: Uuid) -> Vec<Book> {
        let mut books: Vec<Book> = self
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect();
        books.sort_by_key(|book| book.title.to_lowercase());
        books
    }
}

/// Catalog held in process memory behind an async read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryLibraryRepository {
    catalog: RwLock<Catalog>,
}

impl InMemoryLibraryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LibraryRepository for InMemoryLibraryRepository {
    async fn get_authors(
        &self,
        params: &AuthorsResourceParameters,
        mapping: &PropertyMapping,
    ) -> RepositoryResult<PagedList<Author>> {
        params.validate()?;
        let genre = params.genre_filter();
        let search = params.search_filter();

        let mut authors: Vec<Author> = {
            let catalog = self.catalog.read().await;
            catalog
                .authors
                .values()
                .filter(|author| {
                    genre
                        .as_deref()
                        .map_or(true, |genre| author.genre.to_lowercase() == genre)
                })
                .filter(|author| {
                    search.as_deref().map_or(true, |search| {
                        [&author.genre, &author.first_name, &author.last_name]
                            .iter()
                            .any(|value| value.to_lowercase().contains(search))
                    })
                })
                .cloned()
                .collect()
        };

        apply_sort(&mut authors, &params.order_by, mapping)?;

        Ok(PagedList::create(
            authors,
            params.page_number,
            params.page_size,
        )?)
    }

    async fn get_author(&self, author_id: Uuid) -> RepositoryResult<Option<Author>> {
        Ok(self.catalog.read().await.authors.get(&author_id).cloned())
    }

    async fn get_authors_by_ids(&self, author_ids: &[Uuid]) -> RepositoryResult<Vec<Author>> {
        let catalog = self.catalog.read().await;
        let mut authors: Vec<Author> = catalog
            .authors
            .values()
            .filter(|author| author_ids.contains(&author.id))
            .cloned()
            .collect();
        authors.sort_by_key(|author| {
            (
                author.first_name.to_lowercase(),
                author.last_name.to_lowercase(),
            )
        });
        Ok(authors)
    }

    async fn add_author(&self, author: NewAuthor) -> RepositoryResult<(Author, Vec<Book>)> {
        let mut catalog = self.catalog.write().await;
        catalog.check_book_ids(&author.books)?;
        let (author, books) = catalog.insert_author(author)?;

        tracing::info!(author_id = %author.id, books = books.len(), "author added");
        Ok((author, books))
    }

    async fn add_authors(&self, authors: Vec<NewAuthor>) -> RepositoryResult<Vec<Author>> {
        let mut catalog = self.catalog.write().await;
        let mut staged = StagedCatalog::begin(&catalog);
        let created = authors
            .into_iter()
            .map(|author| staged.insert_author(author).map(|(author, _)| author))
            .collect::<RepositoryResult<Vec<_>>>()?;
        staged.commit(&mut catalog);

        tracing::info!(count = created.len(), "author collection added");
        Ok(created)
    }

    async fn delete_author(&self, author_id: Uuid) -> RepositoryResult<bool> {
        let mut catalog = self.catalog.write().await;
        if catalog.authors.shift_remove(&author_id).is_none() {
            return Ok(false);
        }

        let before = catalog.books.len();
        catalog.books.retain(|_, book| book.author_id != author_id);

        tracing::info!(
            author_id = %author_id,
            books_removed = before - catalog.books.len(),
            "author deleted"
        );
        Ok(true)
    }

    async fn author_exists(&self, author_id: Uuid) -> RepositoryResult<bool> {
        Ok(self.catalog.read().await.authors.contains_key(&author_id))
    }

    async fn get_books_for_author(&self, author_id: Uuid) -> RepositoryResult<Vec<Book>> {
        Ok(self.catalog.read().await.books_of(author_id))
    }

    async fn get_book_for_author(
        &self,
        author_id: Uuid,
        book_id: Uuid,
    ) -> RepositoryResult<Option<Book>> {
        Ok(self
            .catalog
            .read()
            .await
            .books
            .get(&book_id)
            .filter(|book| book.author_id == author_id)
            .cloned())
    }

    async fn add_book_for_author(&self, author_id: Uuid, book: NewBook) -> RepositoryResult<Book> {
        let mut catalog = self.catalog.write().await;
        if !catalog.authors.contains_key(&author_id) {
            return Err(RepositoryError::AuthorNotFound(author_id));
        }

        let book = catalog.insert_book(author_id, book)?;
        tracing::info!(author_id = %author_id, book_id = %book.id, "book added");
        Ok(book)
    }

    async fn update_book_for_author(&self, book: Book) -> RepositoryResult<Book> {
        let mut catalog = self.catalog.write().await;
        let stored = catalog
            .books
            .get_mut(&book.id)
            .filter(|stored| stored.author_id == book.author_id)
            .ok_or(RepositoryError::BookNotFound(book.id))?;

        stored.title = book.title;
        stored.description = book.description;

        tracing::info!(author_id = %stored.author_id, book_id = %stored.id, "book updated");
        Ok(stored.clone())
    }

    async fn delete_book(&self, author_id: Uuid, book_id: Uuid) -> RepositoryResult<bool> {
        let mut catalog = self.catalog.write().await;
        let owned = catalog
            .books
            .get(&book_id)
            .is_some_and(|book| book.author_id == author_id);
        if owned {
            catalog.books.shift_remove(&book_id);
            tracing::info!(author_id = %author_id, book_id = %book_id, "book deleted");
        }
        Ok(owned)
    }
}

/// Copy of the catalog that absorbs a multi-record write before it replaces
/// the live one.
struct StagedCatalog {
    catalog: Catalog,
}

impl StagedCatalog {
    fn begin(live: &Catalog) -> Self {
        Self {
            catalog: live.clone(),
        }
    }

    fn insert_author(&mut self, author: NewAuthor) -> RepositoryResult<(Author, Vec<Book>)> {
        self.catalog.insert_author(author)
    }

    fn commit(self, live: &mut Catalog) {
        *live = self.catalog;
    }
}
