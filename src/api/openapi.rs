//! OpenAPI documentation

use utoipa::OpenApi;

use crate::{
    api::books,
    error::ErrorResponse,
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Catalog API",
        version = "1.0.0",
        description = "In-memory book record REST API"
    ),
    paths(
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(Book, CreateBook, UpdateBook, ErrorResponse)
    ),
    tags(
        (name = "books", description = "Book records")
    )
)]
pub struct ApiDoc;
