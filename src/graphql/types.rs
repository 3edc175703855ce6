use async_graphql::{Interface, Union, ID};

use crate::models::{Company, Movie, TvShow};

#[derive(Interface)]
#[graphql(
    rename_fields = "snake_case",
    field(name = "id", ty = "ID"),
    field(name = "title", ty = "String"),
    field(name = "media_type", ty = "String")
)]
pub enum Media {
    Movie(Movie),
    TvShow(TvShow),
}

#[derive(Union)]
pub enum SearchResult {
    Movie(Movie),
    TvShow(TvShow),
    Company(Company),
}
