use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use crate::{Credentials, RecipeInput};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter name!")]
    MissingName,
    #[error("Please enter website")]
    MissingImage,
    #[error("Please enter valid url!")]
    InvalidImageUrl,
    #[error("Please enter desc!")]
    MissingDescription,
    #[error("Please enter username!")]
    MissingEmail,
    #[error("email must be a valid email")]
    InvalidEmail,
    #[error("Please enter password!")]
    MissingPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecipeField {
    Name,
    Img,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialField {
    Email,
    Password,
}

/// Validation errors of a form, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord>(BTreeMap<F, FieldError>);

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        FieldErrors(BTreeMap::new())
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: F) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// The message shown under `field`, empty when the field is valid.
    pub fn message(&self, field: F) -> String {
        self.get(field).map(|err| err.to_string()).unwrap_or_default()
    }

    pub fn clear(&mut self, field: F) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, FieldError)> + '_ {
        self.0.iter().map(|(field, err)| (*field, *err))
    }

    fn insert(&mut self, field: F, err: FieldError) {
        self.0.insert(field, err);
    }
}

/// A recipe form that passed validation. Only obtainable through
/// [`RecipeInput::validate`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidRecipe(RecipeInput);

impl ValidRecipe {
    pub fn input(&self) -> &RecipeInput {
        &self.0
    }

    pub fn into_input(self) -> RecipeInput {
        self.0
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidCredentials(Credentials);

impl ValidCredentials {
    pub fn credentials(&self) -> &Credentials {
        &self.0
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_image_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels = domain.split('.').collect::<Vec<_>>();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

impl RecipeInput {
    pub fn errors(&self) -> FieldErrors<RecipeField> {
        let mut errors = FieldErrors::default();
        if is_blank(&self.name) {
            errors.insert(RecipeField::Name, FieldError::MissingName);
        }
        if is_blank(&self.img) {
            errors.insert(RecipeField::Img, FieldError::MissingImage);
        } else if !is_image_url(&self.img) {
            errors.insert(RecipeField::Img, FieldError::InvalidImageUrl);
        }
        if is_blank(&self.desc) {
            errors.insert(RecipeField::Desc, FieldError::MissingDescription);
        }
        errors
    }

    pub fn validate(self) -> Result<ValidRecipe, FieldErrors<RecipeField>> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(ValidRecipe(self))
        } else {
            Err(errors)
        }
    }

    pub fn field(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::Name => &self.name,
            RecipeField::Img => &self.img,
            RecipeField::Desc => &self.desc,
        }
    }

    pub fn set_field(&mut self, field: RecipeField, value: String) {
        match field {
            RecipeField::Name => self.name = value,
            RecipeField::Img => self.img = value,
            RecipeField::Desc => self.desc = value,
        }
    }
}

impl Credentials {
    pub fn errors(&self) -> FieldErrors<CredentialField> {
        let mut errors = FieldErrors::default();
        if is_blank(&self.email) {
            errors.insert(CredentialField::Email, FieldError::MissingEmail);
        } else if !is_email(&self.email) {
            errors.insert(CredentialField::Email, FieldError::InvalidEmail);
        }
        if self.password.is_empty() {
            errors.insert(CredentialField::Password, FieldError::MissingPassword);
        }
        errors
    }

    pub fn validate(self) -> Result<ValidCredentials, FieldErrors<CredentialField>> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(ValidCredentials(self))
        } else {
            Err(errors)
        }
    }

    pub fn field(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Email => &self.email,
            CredentialField::Password => &self.password,
        }
    }

    pub fn set_field(&mut self, field: CredentialField, value: String) {
        match field {
            CredentialField::Email => self.email = value,
            CredentialField::Password => self.password = value,
        }
    }
}
