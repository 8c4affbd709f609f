use leptos::{create_memo, Memo, RwSignal, SignalWith};
use recipe_book_model::{FieldErrors, Recipe, RecipeField, RecipeId, RecipeInput, ValidRecipe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecipeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub mode: FormMode,
    pub input: RecipeInput,
    pub errors: FieldErrors<RecipeField>,
}

impl RecipeDraft {
    fn new(mode: FormMode, input: RecipeInput) -> Self {
        RecipeDraft {
            mode,
            input,
            errors: FieldErrors::default(),
        }
    }
}

/// What a valid submit asks the recipe book to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(ValidRecipe),
    Update(RecipeId, ValidRecipe),
}

/// Add/edit dialog. `None` is the closed state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeModal {
    draft: Option<RecipeDraft>,
}

impl RecipeModal {
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&RecipeDraft> {
        self.draft.as_ref()
    }

    pub fn title(&self) -> &'static str {
        match self.draft.as_ref().map(|draft| &draft.mode) {
            Some(FormMode::Edit(_)) => "Edit Recipe",
            _ => "Add Recipe",
        }
    }

    pub fn open_create(&mut self) {
        self.draft = Some(RecipeDraft::new(FormMode::Create, RecipeInput::default()));
    }

    pub fn open_edit(&mut self, recipe: &Recipe) {
        self.draft = Some(RecipeDraft::new(
            FormMode::Edit(recipe.id.clone()),
            recipe.input(),
        ));
    }

    pub fn value(&self, field: RecipeField) -> String {
        self.draft
            .as_ref()
            .map(|draft| draft.input.field(field).to_string())
            .unwrap_or_default()
    }

    pub fn error(&self, field: RecipeField) -> String {
        self.draft
            .as_ref()
            .map(|draft| draft.errors.message(field))
            .unwrap_or_default()
    }

    /// Ignored while closed.
    pub fn set_field(&mut self, field: RecipeField, value: String) {
        if let Some(draft) = self.draft.as_mut() {
            draft.input.set_field(field, value);
            draft.errors.clear(field);
        }
    }

    /// Valid input closes the modal right away and returns the request to
    /// run. Invalid input keeps it open with the errors filled in.
    pub fn submit(&mut self) -> Option<Submission> {
        let draft = self.draft.as_mut()?;
        match draft.input.clone().validate() {
            Ok(recipe) => {
                let submission = match &draft.mode {
                    FormMode::Create => Submission::Create(recipe),
                    FormMode::Edit(id) => Submission::Update(id.clone(), recipe),
                };
                self.draft = None;
                Some(submission)
            }
            Err(errors) => {
                draft.errors = errors;
                None
            }
        }
    }

    pub fn close(&mut self) {
        self.draft = None;
    }
}

/// Whether the modal is shown, as its own signal. Views gated on it are not
/// rebuilt while the draft is being typed into.
pub fn open_state(modal: RwSignal<RecipeModal>) -> Memo<bool> {
    create_memo(move |_| modal.with(RecipeModal::is_open))
}
