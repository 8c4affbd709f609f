use std::rc::Rc;

use leptos::logging::error;
use leptos::*;
use leptos_use::storage::use_local_storage;
use recipe_book_frontend::api::GlooTransport;
use recipe_book_frontend::config::ApiConfig;
use recipe_book_frontend::session::{Screen, Session, TOKEN_KEY};

use crate::auth_screen::AuthScreen;
use crate::recipes_screen::RecipesScreen;

#[component]
pub fn App() -> impl IntoView {
    let (token, set_token, _) = use_local_storage::<Option<String>, _>(TOKEN_KEY, None);
    let session = Signal::derive(move || Session::from(token.get()));
    let screen = create_memo(move |_| Screen::for_session(&session.get()));

    let transport = match ApiConfig::from_build_env() {
        Ok(config) => Rc::new(GlooTransport::new(config)),
        Err(err) => {
            error!("Cannot start: {err}");
            return view! { <ConfigError message = err.to_string() /> }.into_view();
        }
    };

    view! {
        <div class = "bg-base-100 w-full min-h-screen">
            {move || {
                let transport = transport.clone();
                match screen.get() {
                    Screen::Auth => view! {
                        <AuthScreen transport set_token />
                    }
                    .into_view(),
                    Screen::Recipes => view! {
                        <RecipesScreen transport session set_token />
                    }
                    .into_view(),
                }
            }}
        </div>
    }
    .into_view()
}

#[component]
fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class = "alert alert-error m-5">
            {message}
        </div>
    }
}
