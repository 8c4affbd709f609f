use std::rc::Rc;

use leptos::*;
use recipe_book_frontend::api::{ApiClient, GlooTransport};
use recipe_book_frontend::form_component::{TextAreaField, TextField};
use recipe_book_frontend::modal::{open_state, RecipeModal};
use recipe_book_frontend::recipe_book::RecipeBook;
use recipe_book_frontend::session::Session;
use recipe_book_frontend::util::recover_default_and_log_err;
use recipe_book_model::{Recipe, RecipeField};

type Book = RecipeBook<Rc<GlooTransport>>;

#[component]
pub fn RecipesScreen(
    transport: Rc<GlooTransport>,
    session: Signal<Session>,
    set_token: WriteSignal<Option<String>>,
) -> impl IntoView {
    let (recipes, set_recipes) = create_signal(Vec::<Recipe>::new());
    // The screen can be gone by the time a background refresh lands.
    let book: Rc<Book> = Rc::new(RecipeBook::new(ApiClient::new(transport), move |list| {
        _ = set_recipes.try_set(list);
    }));
    let modal = create_rw_signal(RecipeModal::default());
    let is_open = open_state(modal);

    {
        let book = book.clone();
        let session = session.get_untracked();
        spawn_local(async move {
            recover_default_and_log_err("Loading recipes", book.refresh(&session).await);
        });
    }

    // The modal closes before the request goes out; the list catches up when
    // the refetch completes.
    let save = {
        let book = book.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let Some(submission) = modal.try_update(RecipeModal::submit).flatten() else {
                return;
            };
            let book = book.clone();
            let session = session.get_untracked();
            spawn_local(async move {
                recover_default_and_log_err("Saving recipe", book.submit(&session, submission).await);
            });
        }
    };

    view! {
        <TopBar modal set_token />
        {move || is_open.get().then({
            let save = save.clone();
            move || view! { <RecipeModalView modal on_save = save /> }
        })}
        <div class = "ml-5 mr-5 mt-3">
            {move || recipes.with(Vec::is_empty).then(|| view! {
                <p class = "text-center opacity-60">"No recipes yet"</p>
            })}
            <div class = "grid md:grid-cols-2 gap-4 lg:grid-cols-3 sm:grid-cols-1">
                <For
                    each = move || recipes.get()
                    key = |recipe| recipe.clone()
                    children = move |recipe| {
                        let book = book.clone();
                        view! { <RecipeCard recipe modal book session /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn TopBar(modal: RwSignal<RecipeModal>, set_token: WriteSignal<Option<String>>) -> impl IntoView {
    view! {
        <div class = "navbar h-24 border border-b-1 border-base-content shadow-md shadow-base-300">
            <div class = "flex-1 pl-5">
                <span class = "prose"><h1>"Recipe Book"</h1></span>
            </div>
            <div class = "flex-none gap-2 pr-5">
                <button class = "btn btn-primary btn-sm" on:click = move |_| modal.update(RecipeModal::open_create)>
                    "Add Recipe"
                </button>
                <button class = "btn btn-ghost btn-sm" on:click = move |_| set_token.set(None)>
                    "Log out"
                </button>
            </div>
        </div>
    }
}

#[component]
fn RecipeCard(
    recipe: Recipe,
    modal: RwSignal<RecipeModal>,
    book: Rc<Book>,
    session: Signal<Session>,
) -> impl IntoView {
    let edit = {
        let recipe = recipe.clone();
        move |_: ev::MouseEvent| modal.update(|modal| modal.open_edit(&recipe))
    };
    let id = recipe.id.clone();
    let delete = move |_: ev::MouseEvent| {
        let book = book.clone();
        let id = id.clone();
        let session = session.get_untracked();
        spawn_local(async move {
            recover_default_and_log_err("Deleting recipe", book.delete(&session, &id).await);
        });
    };
    let Recipe { img, name, desc, .. } = recipe;

    view! {
        <div class = "card bg-base-100 border border-base-content shadow-md shadow-base-300">
            <figure>
                <img class = "w-full h-48 object-cover" src = img alt = name.clone() />
            </figure>
            <div class = "card-body">
                <h2 class = "card-title">{name}</h2>
                <p>{desc}</p>
                <div class = "card-actions justify-end">
                    <button class = "btn btn-primary btn-xs" on:click = edit>"Edit"</button>
                    <button class = "btn btn-error btn-xs" on:click = delete>"Delete"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn RecipeModalView<F: Fn(ev::SubmitEvent) + 'static>(
    modal: RwSignal<RecipeModal>,
    on_save: F,
) -> impl IntoView {
    let value = move |field: RecipeField| {
        Signal::derive(move || modal.with(|modal| modal.value(field)))
    };
    let error = move |field: RecipeField| {
        Signal::derive(move || modal.with(|modal| modal.error(field)))
    };
    let set = move |field: RecipeField| {
        move |value: String| modal.update(|modal| modal.set_field(field, value))
    };

    view! {
        <div class = "fixed z-[999] h-screen w-full grid grid-cols-1 place-items-center">
            <div class = "absolute inset-0 bg-base-300 opacity-60" on:click = move |_| modal.update(RecipeModal::close) />
            <form class = "modal-box relative max-w-lg w-full p-4" on:submit = move |ev| on_save(ev)>
                <h3 class = "font-bold text-lg mb-2">{move || modal.with(RecipeModal::title)}</h3>
                <TextField
                    label = "Recipe Name"
                    id = "recipe-name"
                    placeholder = "pizza"
                    value = value(RecipeField::Name)
                    error = error(RecipeField::Name)
                    on_input = set(RecipeField::Name)
                />
                <TextField
                    label = "Image"
                    id = "recipe-img"
                    placeholder = "img url"
                    value = value(RecipeField::Img)
                    error = error(RecipeField::Img)
                    on_input = set(RecipeField::Img)
                />
                <TextAreaField
                    label = "Description"
                    id = "recipe-desc"
                    placeholder = "Recipe Description."
                    value = value(RecipeField::Desc)
                    error = error(RecipeField::Desc)
                    on_input = set(RecipeField::Desc)
                />
                <div class = "modal-action">
                    <button type = "button" class = "btn btn-error" on:click = move |_| modal.update(RecipeModal::close)>
                        "Close"
                    </button>
                    <button type = "submit" class = "btn btn-success">"Save"</button>
                </div>
            </form>
        </div>
    }
}
