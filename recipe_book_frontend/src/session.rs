use recipe_book_model::AccessToken;

/// Local storage key of the session token. The value is the JSON encoding of
/// an `Option<String>` (`"T"` with quotes, or `null`), as written by
/// `leptos_use::storage::use_local_storage`. A bare unquoted token does not
/// decode and reads as signed out.
pub const TOKEN_KEY: &str = "token";

/// Credential context handed to every API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<AccessToken>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { token: None }
    }

    pub fn signed_in(token: AccessToken) -> Self {
        Session { token: Some(token) }
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Built from the value kept in local storage. An empty string counts as
/// signed out.
impl From<Option<String>> for Session {
    fn from(stored: Option<String>) -> Self {
        match stored {
            Some(token) if !token.is_empty() => Session::signed_in(AccessToken::new(token)),
            _ => Session::anonymous(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Recipes,
}

impl Screen {
    pub fn for_session(session: &Session) -> Self {
        if session.is_signed_in() {
            Screen::Recipes
        } else {
            Screen::Auth
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_token_selects_recipe_screen() {
        let session = Session::from(Some("T".to_string()));
        assert_eq!(session.token().map(AccessToken::as_str), Some("T"));
        assert_eq!(Screen::for_session(&session), Screen::Recipes);
    }

    #[test]
    fn missing_or_empty_token_selects_auth_screen() {
        for stored in [None, Some(String::new())] {
            let session = Session::from(stored);
            assert!(!session.is_signed_in());
            assert_eq!(Screen::for_session(&session), Screen::Auth);
        }
    }

    #[test]
    fn stored_token_is_json_encoded() {
        let stored = serde_json::to_string(&Some("T".to_string())).unwrap();
        assert_eq!(stored, r#""T""#);
        let read: Option<String> = serde_json::from_str(&stored).unwrap();
        assert_eq!(Session::from(read), Session::signed_in(AccessToken::new("T")));

        assert!(serde_json::from_str::<Option<String>>("T").is_err());
        assert_eq!(serde_json::to_string(&None::<String>).unwrap(), "null");
    }
}
