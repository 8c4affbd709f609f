use recipe_book_model::{CredentialField, Credentials, FieldErrors, ValidCredentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn path(self) -> &'static str {
        match self {
            AuthMode::Login => "/v1/auth/login",
            AuthMode::Register => "/v1/auth/register",
        }
    }

    pub fn success_status(self) -> u16 {
        match self {
            AuthMode::Login => 200,
            AuthMode::Register => 201,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            AuthMode::Login => "Please log in",
            AuthMode::Register => "Please sign in",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Log In",
            AuthMode::Register => "Sign in",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Create Account? Sign In",
            AuthMode::Register => "Already having an account? LogIn",
        }
    }
}

/// Combined login and registration form. The mode is display state only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    credentials: Credentials,
    errors: FieldErrors<CredentialField>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        AuthForm {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Keeps typed values, drops error messages.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.errors = FieldErrors::default();
    }

    pub fn value(&self, field: CredentialField) -> String {
        self.credentials.field(field).to_string()
    }

    pub fn error(&self, field: CredentialField) -> String {
        self.errors.message(field)
    }

    pub fn errors(&self) -> &FieldErrors<CredentialField> {
        &self.errors
    }

    pub fn set_field(&mut self, field: CredentialField, value: String) {
        self.credentials.set_field(field, value);
        self.errors.clear(field);
    }

    pub fn submit(&mut self) -> Option<(AuthMode, ValidCredentials)> {
        match self.credentials.clone().validate() {
            Ok(credentials) => {
                self.errors = FieldErrors::default();
                Some((self.mode, credentials))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}
