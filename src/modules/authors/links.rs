use uuid::Uuid;

use libris_db::AuthorsResourceParameters;
use libris_http::AppResult;
use libris_query::{Link, ResourceUriType};

use crate::hypermedia::UrlHelper;

pub const AUTHORS_PATH: &str = "/api/authors";

pub fn author_path(author_id: Uuid) -> String {
    format!("{}/{}", AUTHORS_PATH, author_id)
}

pub fn books_path(author_id: Uuid) -> String {
    format!("{}/books", author_path(author_id))
}

/// Links of a single author. `self` keeps a non-empty field list.
pub fn links_for_author(urls: &UrlHelper, author_id: Uuid, fields: &str) -> AppResult<Vec<Link>> {
    let path = author_path(author_id);
    let self_href = if fields.trim().is_empty() {
        urls.link(&path)
    } else {
        urls.link_with_query(&path, &[("fields", fields)])?
    };

    Ok(vec![
        Link::new(self_href, "self", "GET"),
        Link::new(urls.link(&path), "delete_author", "DELETE"),
        Link::new(
            urls.link(&books_path(author_id)),
            "create_book_for_author",
            "POST",
        ),
        Link::new(urls.link(&books_path(author_id)), "books", "GET"),
    ])
}

/// URI of the authors collection page `kind` points at.
pub fn authors_resource_uri(
    urls: &UrlHelper,
    params: &AuthorsResourceParameters,
    kind: ResourceUriType,
) -> AppResult<String> {
    let page = params.with_page_number(kind.page_number(params.page_number));
    urls.link_with_query(AUTHORS_PATH, &page)
}

/// Links of an authors collection page.
pub fn links_for_authors(
    urls: &UrlHelper,
    params: &AuthorsResourceParameters,
    has_next: bool,
    has_previous: bool,
) -> AppResult<Vec<Link>> {
    let mut links = vec![Link::new(
        authors_resource_uri(urls, params, ResourceUriType::Current)?,
        "self",
        "GET",
    )];

    if has_next {
        links.push(Link::new(
            authors_resource_uri(urls, params, ResourceUriType::NextPage)?,
            "next_Page",
            "GET",
        ));
    }

    if has_previous {
        links.push(Link::new(
            authors_resource_uri(urls, params, ResourceUriType::PreviousPage)?,
            "previous_Page",
            "GET",
        ));
    }

    Ok(links)
}
