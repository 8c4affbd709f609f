use std::cell::RefCell;

use log::{debug, warn};
use recipe_book_model::{Recipe, RecipeId, RecipeInput, ValidRecipe};

use crate::api::{ApiClient, Error, Transport};
use crate::modal::Submission;
use crate::session::Session;

/// Orders list fetches. Higher tickets were issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Undo record for an optimistic edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    previous: Recipe,
    patched: RecipeInput,
    applied_at: u64,
}

/// The client side copy of the recipe list.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    issued: u64,
    applied: u64,
}

impl RecipeStore {
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replaces the list unless a list from a later ticket is already shown.
    pub fn finish_refresh(&mut self, ticket: RefreshTicket, recipes: Vec<Recipe>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        self.recipes = recipes;
        true
    }

    pub fn patch(&mut self, id: &RecipeId, input: &RecipeInput) -> Option<Patch> {
        let recipe = self.recipes.iter_mut().find(|recipe| &recipe.id == id)?;
        let previous = recipe.clone();
        recipe.apply(input);
        Some(Patch {
            previous,
            patched: input.clone(),
            applied_at: self.applied,
        })
    }

    /// Puts the pre-edit entry back. Does nothing if a fresh list arrived
    /// after the patch, or if a later edit has since overwritten the entry.
    pub fn revert(&mut self, patch: Patch) -> bool {
        if patch.applied_at != self.applied {
            return false;
        }
        match self
            .recipes
            .iter_mut()
            .find(|recipe| recipe.id == patch.previous.id)
        {
            Some(recipe) if recipe.input() == patch.patched => {
                *recipe = patch.previous;
                true
            }
            _ => false,
        }
    }
}

/// Recipe list plus the mutations that resynchronise it with the server.
///
/// Every change to the visible list is pushed to `on_change`.
pub struct RecipeBook<T> {
    api: ApiClient<T>,
    store: RefCell<RecipeStore>,
    on_change: Box<dyn Fn(Vec<Recipe>)>,
}

impl<T: Transport> RecipeBook<T> {
    pub fn new(api: ApiClient<T>, on_change: impl Fn(Vec<Recipe>) + 'static) -> Self {
        RecipeBook {
            api,
            store: RefCell::new(RecipeStore::default()),
            on_change: Box::new(on_change),
        }
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.store.borrow().recipes().to_vec()
    }

    fn notify(&self) {
        let recipes = self.recipes();
        (self.on_change)(recipes);
    }

    /// Fetches the full list. On failure the current list stays as it is.
    pub async fn refresh(&self, session: &Session) -> Result<(), Error> {
        let ticket = self.store.borrow_mut().begin_refresh();
        let recipes = self.api.list(session).await?;
        let applied = self.store.borrow_mut().finish_refresh(ticket, recipes);
        if applied {
            self.notify();
        } else {
            debug!("Dropping stale recipe list {ticket:?}");
        }
        Ok(())
    }

    pub async fn create(&self, session: &Session, recipe: &ValidRecipe) -> Result<(), Error> {
        self.api.create(session, recipe).await?;
        self.refresh(session).await
    }

    /// The local entry shows the new values before the server answers. It is
    /// rolled back if the update fails.
    pub async fn update(
        &self,
        session: &Session,
        id: &RecipeId,
        recipe: &ValidRecipe,
    ) -> Result<(), Error> {
        let patch = self.store.borrow_mut().patch(id, recipe.input());
        if patch.is_some() {
            self.notify();
        }
        if let Err(err) = self.api.update(session, id, recipe).await {
            warn!("Update of recipe {id} failed, rolling back");
            if let Some(patch) = patch {
                let reverted = self.store.borrow_mut().revert(patch);
                if reverted {
                    self.notify();
                }
            }
            return Err(err);
        }
        self.refresh(session).await
    }

    pub async fn delete(&self, session: &Session, id: &RecipeId) -> Result<(), Error> {
        self.api.delete(session, id).await?;
        self.refresh(session).await
    }

    pub async fn submit(&self, session: &Session, submission: Submission) -> Result<(), Error> {
        match submission {
            Submission::Create(recipe) => self.create(session, &recipe).await,
            Submission::Update(id, recipe) => self.update(session, &id, &recipe).await,
        }
    }
}
