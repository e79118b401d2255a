use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use libris_db::{Author, AuthorsResourceParameters, NewAuthor};
use libris_http::{router::X_PAGINATION, AppError, AppResult};
use libris_query::{
    shape_collection, type_has_properties, LinkedCollection, ResourceUriType, ShapeData,
    ShapedRecord,
};

use super::links::{author_path, authors_resource_uri, links_for_author, links_for_authors};
use super::models::{AuthorDto, AuthorForCreationDto, AuthorForCreationWithDateOfDeathDto};
use crate::extract::{parse_json_body, ListQuery};
use crate::hypermedia::{
    essence, AcceptsHypermedia, UrlHelper, AUTHOR_FULL_MEDIA_TYPE,
    AUTHOR_WITH_DATE_OF_DEATH_MEDIA_TYPE,
};
use crate::modules::author_collections::{find_author_collection, is_id_list};
use crate::modules::books::models::BookForCreationDto;
use crate::state::AppState;

/// `X-Pagination` header content. Page links are only present outside the
/// hypermedia representation, where the body carries them instead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaginationMetadata {
    total_count: u64,
    page_size: u32,
    current_page: u32,
    total_pages: u64,
    #[serde(flatten)]
    page_links: Option<PageLinks>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageLinks {
    previous_page_link: Option<String>,
    next_page_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthorQuery {
    #[serde(default)]
    pub fields: Option<String>,
}

pub(crate) fn parse_author_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request(format!("'{}' is not a valid author id", raw)))
}

fn shaped_author(dto: &AuthorDto, fields: &str, urls: &UrlHelper) -> AppResult<ShapedRecord> {
    let mut record = dto.shape_data(fields)?;
    record.insert_serialized("links", &links_for_author(urls, dto.id, fields)?)?;
    Ok(record)
}

fn pagination_header(metadata: &PaginationMetadata) -> AppResult<HeaderValue> {
    let json = serde_json::to_string(metadata).map_err(|error| AppError::Internal(error.into()))?;
    HeaderValue::from_str(&json).map_err(|error| AppError::Internal(error.into()))
}

pub async fn get_authors(
    State(state): State<AppState>,
    AcceptsHypermedia(hypermedia): AcceptsHypermedia,
    urls: UrlHelper,
    ListQuery(params): ListQuery<AuthorsResourceParameters>,
) -> AppResult<Response> {
    params.validate()?;

    let mapping = state
        .property_mappings
        .property_mapping::<AuthorDto, Author>()?;
    if !mapping.valid_mapping_exists_for(&params.order_by) {
        return Err(AppError::bad_request(format!(
            "cannot order authors by '{}'",
            params.order_by
        )));
    }

    if !type_has_properties::<AuthorDto>(params.fields()) {
        return Err(AppError::bad_request(format!(
            "unknown author fields in '{}'",
            params.fields()
        )));
    }

    let page = state.repository.get_authors(&params, mapping).await?;
    let (has_next, has_previous) = (page.has_next(), page.has_previous());
    let mut metadata = PaginationMetadata {
        total_count: page.total_count(),
        page_size: page.page_size(),
        current_page: page.current_page(),
        total_pages: page.total_pages(),
        page_links: None,
    };
    let authors = page.map(|author| AuthorDto::from(&author));

    if hypermedia {
        let value = authors
            .iter()
            .map(|dto| shaped_author(dto, params.fields(), &urls))
            .collect::<AppResult<Vec<_>>>()?;
        let links = links_for_authors(&urls, &params, has_next, has_previous)?;

        let headers = [(X_PAGINATION, pagination_header(&metadata)?)];
        return Ok((headers, Json(LinkedCollection::new(value, links))).into_response());
    }

    metadata.page_links = Some(PageLinks {
        previous_page_link: has_previous
            .then(|| authors_resource_uri(&urls, &params, ResourceUriType::PreviousPage))
            .transpose()?,
        next_page_link: has_next
            .then(|| authors_resource_uri(&urls, &params, ResourceUriType::NextPage))
            .transpose()?,
    });

    let shaped = shape_collection(&authors, params.fields())?;
    let headers = [(X_PAGINATION, pagination_header(&metadata)?)];
    Ok((headers, Json(shaped)).into_response())
}

pub async fn get_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    Path(author_id): Path<String>,
    ListQuery(query): ListQuery<AuthorQuery>,
) -> AppResult<Response> {
    if is_id_list(&author_id) {
        let authors = find_author_collection(&state, &author_id).await?;
        return Ok(Json(authors).into_response());
    }

    let author_id = parse_author_id(&author_id)?;
    let fields = query.fields.as_deref().unwrap_or_default();
    if !type_has_properties::<AuthorDto>(fields) {
        return Err(AppError::bad_request(format!(
            "unknown author fields in '{}'",
            fields
        )));
    }

    let author = state
        .repository
        .get_author(author_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("author {} does not exist", author_id)))?;

    let record = shaped_author(&AuthorDto::from(&author), fields, &urls)?;
    Ok(Json(record).into_response())
}

fn validate_books(books: &[BookForCreationDto]) -> AppResult<()> {
    books.iter().try_for_each(BookForCreationDto::validate)
}

/// Decode an author creation body according to its content type.
fn author_from_body(headers: &HeaderMap, body: &Bytes) -> AppResult<NewAuthor> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(essence)
        .unwrap_or_default();

    match content_type.as_str() {
        "application/json" | AUTHOR_FULL_MEDIA_TYPE => {
            let dto: AuthorForCreationDto = parse_json_body(body)?;
            validate_books(&dto.books)?;
            Ok(dto.into())
        }
        AUTHOR_WITH_DATE_OF_DEATH_MEDIA_TYPE => {
            let dto: AuthorForCreationWithDateOfDeathDto = parse_json_body(body)?;
            validate_books(&dto.books)?;
            Ok(dto.into())
        }
        other => Err(AppError::unsupported_media_type(format!(
            "cannot create an author from '{}'",
            other
        ))),
    }
}

pub async fn create_author(
    State(state): State<AppState>,
    urls: UrlHelper,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let new_author = author_from_body(&headers, &body)?;
    let (author, _books) = state.repository.add_author(new_author).await?;

    let record = shaped_author(&AuthorDto::from(&author), "", &urls)?;
    let location = urls.link(&author_path(author.id));

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    )
        .into_response())
}

/// Creating an author under an explicit id is never allowed.
pub async fn block_author_creation(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> AppResult<StatusCode> {
    let author_id = parse_author_id(&author_id)?;
    if state.repository.author_exists(author_id).await? {
        return Err(AppError::conflict(
            Vec::new(),
            format!("author {} already exists", author_id),
        ));
    }
    Err(AppError::not_found(format!(
        "author {} does not exist",
        author_id
    )))
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> AppResult<StatusCode> {
    let author_id = parse_author_id(&author_id)?;
    if !state.repository.delete_author(author_id).await? {
        return Err(AppError::not_found(format!(
            "author {} does not exist",
            author_id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
