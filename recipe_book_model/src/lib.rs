use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

mod validation;

pub use serde_json;
pub use validation::{
    CredentialField, FieldError, FieldErrors, RecipeField, ValidCredentials, ValidRecipe,
};

/// Server assigned identifier of a recipe.
///
/// The service has handed out both numeric and string ids, so the id is kept
/// as the string it renders to in request paths.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        RecipeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecipeId {
    fn from(id: i64) -> Self {
        RecipeId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => RecipeId::from(id),
            RawId::Text(id) => RecipeId(id),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Recipe {
    #[serde(alias = "_id")]
    pub id: RecipeId,
    #[serde(alias = "imgUrl")]
    pub img: String,
    pub name: String,
    #[serde(alias = "description")]
    pub desc: String,
}

impl Recipe {
    /// The editable part of the recipe, used to prefill the edit form.
    pub fn input(&self) -> RecipeInput {
        RecipeInput {
            name: self.name.clone(),
            img: self.img.clone(),
            desc: self.desc.clone(),
        }
    }

    pub fn apply(&mut self, input: &RecipeInput) {
        self.name = input.name.clone();
        self.img = input.img.clone();
        self.desc = input.desc.clone();
    }
}

/// Body of the create and update requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeInput {
    pub name: String,
    pub desc: String,
    pub img: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of debug logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: AccessToken,
}

/// Body returned by the login and register endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: TokenPair,
}
