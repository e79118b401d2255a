#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;

use libris_app::{register_all, AppState};
use libris_db::{Author, Book, InMemoryLibraryRepository, LibraryRepository, NewAuthor, NewBook, StoreModule};
use libris_kernel::{ModuleRegistry, Settings};

pub const HOST: &str = "library.test";
pub const BASE: &str = "http://library.test";
pub const HATEOAS: &str = "application/vnd.marvin.hateoas+json";

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<dyn LibraryRepository>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn pagination(&self) -> Value {
        serde_json::from_str(self.header("x-pagination").expect("X-Pagination header"))
            .expect("X-Pagination is JSON")
    }

    /// Path of the `Location` header, without scheme and host.
    pub fn location_path(&self) -> String {
        let location = self.header("location").expect("Location header");
        location
            .strip_prefix(BASE)
            .expect("absolute location")
            .to_string()
    }
}

pub fn app() -> TestApp {
    let repository: Arc<dyn LibraryRepository> = Arc::new(InMemoryLibraryRepository::new());
    let settings = Settings::default();
    let state = AppState::new(Arc::clone(&repository), settings.clone());

    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(StoreModule::new(Arc::clone(&repository))));
    register_all(&mut registry, &state);

    TestApp {
        router: libris_http::build_router(&registry, &settings),
        repository,
    }
}

pub fn new_author(first: &str, last: &str, genre: &str, born: OffsetDateTime) -> NewAuthor {
    NewAuthor {
        first_name: first.to_string(),
        last_name: last.to_string(),
        genre: genre.to_string(),
        date_of_birth: born,
        date_of_death: None,
        books: Vec::new(),
    }
}

impl TestApp {
    pub async fn add_author(&self, author: NewAuthor) -> Author {
        self.repository.add_author(author).await.unwrap().0
    }

    pub async fn add_book(&self, author: &Author, title: &str, description: Option<&str>) -> Book {
        self.repository
            .add_book_for_author(
                author.id,
                NewBook::new(title, description.map(str::to_string)),
            )
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_hypermedia(&self, uri: &str) -> TestResponse {
        self.send(
            request(Method::GET, uri)
                .header(header::ACCEPT, HATEOAS)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> TestResponse {
        self.send_with_type(method, uri, "application/json", body.to_string())
            .await
    }

    pub async fn send_with_type(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: String,
    ) -> TestResponse {
        self.send(
            request(method, uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri).body(Body::empty()).unwrap())
            .await
    }
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST)
}

/// Keys of a JSON object in serialization order.
pub fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .expect("JSON object")
        .keys()
        .cloned()
        .collect()
}

pub fn rels(links: &Value) -> Vec<String> {
    links
        .as_array()
        .expect("link array")
        .iter()
        .map(|link| link["rel"].as_str().unwrap_or_default().to_string())
        .collect()
}
