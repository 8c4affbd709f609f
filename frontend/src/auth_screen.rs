use std::rc::Rc;

use leptos::logging::{log, warn};
use leptos::*;
use recipe_book_frontend::api::{ApiClient, GlooTransport};
use recipe_book_frontend::auth::AuthForm;
use recipe_book_frontend::form_component::TextField;
use recipe_book_model::CredentialField;

/// Login and registration. Storing the token is what moves the app on to the
/// recipe screen.
#[component]
pub fn AuthScreen(
    transport: Rc<GlooTransport>,
    set_token: WriteSignal<Option<String>>,
) -> impl IntoView {
    let form = create_rw_signal(AuthForm::default());
    let api = ApiClient::new(transport);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some((mode, credentials)) = form.try_update(AuthForm::submit).flatten() else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            match api.sign_in(mode, &credentials).await {
                Ok(token) => {
                    log!("Signed in");
                    set_token.set(Some(token.as_str().to_string()));
                }
                Err(err) => warn!("Sign in rejected: {err}"),
            }
        });
    };

    let value = move |field: CredentialField| {
        Signal::derive(move || form.with(|form| form.value(field)))
    };
    let error = move |field: CredentialField| {
        Signal::derive(move || form.with(|form| form.error(field)))
    };

    view! {
        <div class = "hero min-h-screen">
            <main class = "card w-full max-w-sm border border-base-content shadow-md shadow-base-300">
                <form class = "card-body" on:submit = on_submit>
                    <h1 class = "card-title mb-3">{move || form.with(|form| form.mode().heading())}</h1>
                    <TextField
                        label = "Email address"
                        id = "email"
                        input_type = "email"
                        placeholder = "name@example.com"
                        value = value(CredentialField::Email)
                        error = error(CredentialField::Email)
                        on_input = move |email| form.update(|form| form.set_field(CredentialField::Email, email))
                    />
                    <TextField
                        label = "Password"
                        id = "password"
                        input_type = "password"
                        placeholder = "Password"
                        value = value(CredentialField::Password)
                        error = error(CredentialField::Password)
                        on_input = move |password| form.update(|form| form.set_field(CredentialField::Password, password))
                    />
                    <button class = "btn btn-primary w-full" type = "submit">
                        {move || form.with(|form| form.mode().submit_label())}
                    </button>
                </form>
                <p class = "text-success text-center mb-4 cursor-pointer" role = "button" on:click = move |_| form.update(AuthForm::toggle_mode)>
                    {move || form.with(|form| form.mode().toggle_label())}
                </p>
            </main>
        </div>
    }
}
