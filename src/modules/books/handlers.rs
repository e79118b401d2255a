use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use json_patch::Patch;
use uuid::Uuid;

use libris_db::Book;
use libris_http::{AppError, AppResult};
use libris_query::{Link, LinkedCollection};

use super::models::{BookDto, BookForCreationDto, BookForUpdateDto};
use crate::extract::JsonBody;
use crate::hypermedia::UrlHelper;
use crate::modules::authors::handlers::parse_author_id;
use crate::modules::authors::links::books_path;
use crate::state::AppState;

fn book_path(author_id: Uuid, book_id: Uuid) -> String {
    format!("{}/{}", books_path(author_id), book_id)
}

fn parse_ids(author_id: &str, book_id: &str) -> AppResult<(Uuid, Uuid)> {
    let author_id = parse_author_id(author_id)?;
    let book_id = Uuid::parse_str(book_id.trim())
        .map_err(|_| AppError::bad_request(format!("'{}' is not a valid book id", book_id)))?;
    Ok((author_id, book_id))
}

fn links_for_book(urls: &UrlHelper, book: &Book) -> Vec<Link> {
    let href = urls.link(&book_path(book.author_id, book.id));
    vec![
        Link::new(href.clone(), "self", "GET"),
        Link::new(href.clone(), "delete_book", "DELETE"),
        Link::new(href.clone(), "update_book", "PUT"),
        Link::new(href, "partially_update_book", "PATCH"),
    ]
}

fn book_dto(urls: &UrlHelper, book: Book) -> BookDto {
    let links = links_for_book(urls, &book);
    BookDto::new(book, links)
}

fn created(urls: &UrlHelper, book: Book) -> Response {
    let location = urls.link(&book_path(book.author_id, book.id));
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(book_dto(urls, book)),
    )
        .into_response()
}

fn author_not_found(author_id: Uuid) -> AppError {
    AppError::not_found(format!("author {} does not exist", author_id))
}

fn book_not_found(book_id: Uuid) -> AppError {
    AppError::not_found(format!("book {} does not exist", book_id))
}

async fn ensure_author(state: &AppState, author_id: Uuid) -> AppResult<()> {
    if state.repository.author_exists(author_id).await? {
        Ok(())
    } else {
        Err(author_not_found(author_id))
    }
}

/// Writes against an unknown author are rejected as a bad request.
async fn ensure_author_for_write(state: &AppState, author_id: Uuid) -> AppResult<()> {
    if state.repository.author_exists(author_id).await? {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "author {} does not exist",
            author_id
        )))
    }
}

pub async fn get_books_for_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    Path(author_id): Path<String>,
) -> AppResult<Json<LinkedCollection<BookDto>>> {
    let author_id = parse_author_id(&author_id)?;
    ensure_author(&state, author_id).await?;

    let books = state
        .repository
        .get_books_for_author(author_id)
        .await?
        .into_iter()
        .map(|book| book_dto(&urls, book))
        .collect();
    let links = vec![Link::new(urls.link(&books_path(author_id)), "self", "GET")];

    Ok(Json(LinkedCollection::new(books, links)))
}

pub async fn get_book_for_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    Path((author_id, book_id)): Path<(String, String)>,
) -> AppResult<Json<BookDto>> {
    let (author_id, book_id) = parse_ids(&author_id, &book_id)?;
    ensure_author(&state, author_id).await?;

    let book = state
        .repository
        .get_book_for_author(author_id, book_id)
        .await?
        .ok_or_else(|| book_not_found(book_id))?;

    Ok(Json(book_dto(&urls, book)))
}

pub async fn create_book_for_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    Path(author_id): Path<String>,
    JsonBody(book): JsonBody<BookForCreationDto>,
) -> AppResult<Response> {
    let author_id = parse_author_id(&author_id)?;
    book.validate()?;
    ensure_author_for_write(&state, author_id).await?;

    let book = state
        .repository
        .add_book_for_author(author_id, book.into())
        .await?;
    Ok(created(&urls, book))
}

pub async fn delete_book_for_author(
    State(state): State<AppState>,
    Path((author_id, book_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let (author_id, book_id) = parse_ids(&author_id, &book_id)?;
    ensure_author(&state, author_id).await?;

    if !state.repository.delete_book(author_id, book_id).await? {
        return Err(book_not_found(book_id));
    }

    tracing::info!(%author_id, %book_id, "book deleted for author");
    Ok(StatusCode::NO_CONTENT)
}

/// Store `update` under `book_id`: replace when the book exists, create it
/// with that id otherwise.
async fn upsert_book(
    state: &AppState,
    urls: &UrlHelper,
    author_id: Uuid,
    book_id: Uuid,
    existing: Option<Book>,
    update: BookForUpdateDto,
) -> AppResult<Response> {
    if existing.is_some() {
        state
            .repository
            .update_book_for_author(update.into_book(book_id, author_id))
            .await?;
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let book = state
        .repository
        .add_book_for_author(author_id, update.into_new_book(book_id))
        .await?;
    tracing::info!(%author_id, %book_id, "book upserted for author");
    Ok(created(urls, book))
}

pub async fn update_book_for_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    Path((author_id, book_id)): Path<(String, String)>,
    JsonBody(update): JsonBody<BookForUpdateDto>,
) -> AppResult<Response> {
    let (author_id, book_id) = parse_ids(&author_id, &book_id)?;
    update.validate()?;
    ensure_author_for_write(&state, author_id).await?;

    let existing = state
        .repository
        .get_book_for_author(author_id, book_id)
        .await?;
    upsert_book(&state, &urls, author_id, book_id, existing, update).await
}

/// Apply an RFC 6902 patch to the update representation of a book.
pub fn apply_patch(document: &BookForUpdateDto, patch: &Patch) -> AppResult<BookForUpdateDto> {
    let mut value =
        serde_json::to_value(document).map_err(|error| AppError::Internal(error.into()))?;
    json_patch::patch(&mut value, &patch.0)
        .map_err(|error| AppError::bad_request(format!("the patch could not be applied: {}", error)))?;
    serde_json::from_value(value)
        .map_err(|error| AppError::bad_request(format!("the patched book is malformed: {}", error)))
}

pub async fn partially_update_book_for_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    Path((author_id, book_id)): Path<(String, String)>,
    JsonBody(patch): JsonBody<Patch>,
) -> AppResult<Response> {
    let (author_id, book_id) = parse_ids(&author_id, &book_id)?;
    ensure_author(&state, author_id).await?;

    let existing = state
        .repository
        .get_book_for_author(author_id, book_id)
        .await?;
    let document = existing
        .as_ref()
        .map(BookForUpdateDto::from)
        .unwrap_or_default();

    let update = apply_patch(&document, &patch)?;
    update.validate()?;

    upsert_book(&state, &urls, author_id, book_id, existing, update).await
}
