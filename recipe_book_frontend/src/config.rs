use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid API base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Where the recipe service lives. Fixed when the app is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|source| Error::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(ApiConfig { base_url })
    }

    /// Reads `RECIPE_API_URL` as it was at compile time.
    pub fn from_build_env() -> Result<Self, Error> {
        Self::new(option_env!("RECIPE_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `path` must start with `/`. Any path prefix of the base url is kept.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}
