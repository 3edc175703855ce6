use async_graphql::{ComplexObject, Enum, SimpleObject, ID};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

pub const MOVIE_MEDIA_TYPE: &str = "movie";
pub const TV_MEDIA_TYPE: &str = "tv";

/// Currencies accepted by `Movie.budget`. No conversion is applied.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Eur,
    Gbp,
    Usd,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct Movie {
    #[serde(deserialize_with = "de_id")]
    #[graphql(skip)]
    pub id: ID,
    #[graphql(skip)]
    pub title: String,
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub belongs_to_collection: Option<Collection>,
    #[graphql(skip)]
    pub budget: Option<i64>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    #[serde(default)]
    pub production_companies: Vec<Company>,
    pub release_date: Option<String>,
    pub revenue: Option<i64>,
}

#[ComplexObject(rename_fields = "snake_case")]
impl Movie {
    pub async fn id(&self) -> ID {
        self.id.clone()
    }

    pub async fn title(&self) -> String {
        self.title.clone()
    }

    pub async fn media_type(&self) -> String {
        MOVIE_MEDIA_TYPE.to_string()
    }

    /// Budget as reported upstream. The currency is accepted but not converted.
    async fn budget(
        &self,
        #[graphql(default_with = "Currency::Eur")] currency: Currency,
    ) -> Option<i64> {
        debug!(movie_id = %self.id.as_str(), ?currency, "Returning unconverted budget");
        self.budget
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "TVShow", complex, rename_fields = "snake_case")]
pub struct TvShow {
    #[serde(deserialize_with = "de_id")]
    #[graphql(skip)]
    pub id: ID,
    #[serde(alias = "name")]
    #[graphql(skip)]
    pub title: String,
    pub running: Option<bool>,
}

#[ComplexObject(rename_fields = "snake_case")]
impl TvShow {
    pub async fn id(&self) -> ID {
        self.id.clone()
    }

    pub async fn title(&self) -> String {
        self.title.clone()
    }

    pub async fn media_type(&self) -> String {
        TV_MEDIA_TYPE.to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Collection {
    #[serde(deserialize_with = "de_id")]
    pub id: ID,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct Company {
    #[serde(deserialize_with = "de_id")]
    pub id: ID,
    pub name: String,
}

// TMDB sends numeric ids; GraphQL exposes them as ID strings.
fn de_id<'de, D>(deserializer: D) -> Result<ID, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => ID(n.to_string()),
        RawId::Text(s) => ID(s),
    })
}
