//! Book CRUD handlers. All of them sit behind `jwt_auth_middleware`.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
};
use uuid::Uuid;

use super::models::{Book, BookCreate, BookUpdate, Pagination};
use crate::gateway::extract::{QueryParams, ValidatedJson};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, ok, ok_with_msg};
use crate::store::StoreError;
use crate::user_auth::AuthenticatedUser;

fn store_error(e: StoreError) -> ApiError {
    tracing::error!("Book store failure: {}", e);
    ApiError::internal("Internal server error")
}

/// Ids are opaque to clients: anything that is not a UUID simply names no book.
fn parse_book_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Book not found"))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    request_body = BookCreate,
    responses(
        (status = 200, description = "Book created", body = ApiResponse<Book>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Invalid book data")
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(data): ValidatedJson<BookCreate>,
) -> ApiResult<Book> {
    let book = state.books.create(data).await.map_err(store_error)?;
    tracing::info!(book_id = %book.id, by = %user.username, "Book created");
    ok_with_msg(book, "Book created successfully!")
}

/// List books in creation order
#[utoipa::path(
    get,
    path = "/books",
    params(Pagination),
    responses(
        (status = 200, description = "Page of books", body = ApiResponse<Vec<Book>>),
        (status = 400, description = "Invalid skip or limit"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<AuthenticatedUser>,
    QueryParams(page): QueryParams<Pagination>,
) -> ApiResult<Vec<Book>> {
    let books = state
        .books
        .list(page.skip, page.clamped_limit())
        .await
        .map_err(store_error)?;
    ok(books)
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    params(("book_id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = ApiResponse<Book>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<AuthenticatedUser>,
    Path(book_id): Path<String>,
) -> ApiResult<Book> {
    let id = parse_book_id(&book_id)?;
    match state.books.get(id).await.map_err(store_error)? {
        Some(book) => ok(book),
        None => ApiError::not_found("Book not found").into_err(),
    }
}

/// Update a book (partial)
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    params(("book_id" = String, Path, description = "Book id")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse<Book>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(book_id): Path<String>,
    ValidatedJson(data): ValidatedJson<BookUpdate>,
) -> ApiResult<Book> {
    let id = parse_book_id(&book_id)?;
    match state.books.update(id, data).await.map_err(store_error)? {
        Some(book) => {
            tracing::info!(book_id = %book.id, by = %user.username, "Book updated");
            ok_with_msg(book, "Book updated successfully!")
        }
        None => ApiError::not_found("Book not found").into_err(),
    }
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    params(("book_id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(book_id): Path<String>,
) -> ApiResult<()> {
    let id = parse_book_id(&book_id)?;
    if !state.books.delete(id).await.map_err(store_error)? {
        return ApiError::not_found("Book not found").into_err();
    }
    tracing::info!(book_id = %id, by = %user.username, "Book deleted");
    ok_with_msg((), "Book deleted successfully!")
}
