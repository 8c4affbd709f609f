use leptos::*;

/// Labelled input with its validation message underneath.
#[component]
pub fn TextField<F: Fn(String) + 'static>(
    #[prop()] label: &'static str,
    #[prop()] id: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: &'static str,
    value: Signal<String>,
    error: Signal<String>,
    on_input: F,
) -> impl IntoView {
    let input_type = input_type.unwrap_or("text");
    view! {
        <div class = "form-control w-full mb-3">
            <label class = "label" for = id>
                <span class = "label-text">{label}</span>
            </label>
            <input
                id = id
                type = input_type
                class = "input input-bordered input-primary bg-base-300 w-full"
                placeholder = placeholder
                prop:value = move || value.get()
                on:input = move |ev| on_input(event_target_value(&ev))
            />
            <FieldMessage error />
        </div>
    }
}

#[component]
pub fn TextAreaField<F: Fn(String) + 'static>(
    #[prop()] label: &'static str,
    #[prop()] id: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: Signal<String>,
    error: Signal<String>,
    on_input: F,
) -> impl IntoView {
    view! {
        <div class = "form-control w-full mb-3">
            <label class = "label" for = id>
                <span class = "label-text">{label}</span>
            </label>
            <textarea
                id = id
                rows = "3"
                class = "textarea textarea-bordered textarea-primary bg-base-300 w-full"
                placeholder = placeholder
                prop:value = move || value.get()
                on:input = move |ev| on_input(event_target_value(&ev))
            />
            <FieldMessage error />
        </div>
    }
}

#[component]
fn FieldMessage(error: Signal<String>) -> impl IntoView {
    view! {
        <p class = "text-error text-sm min-h-5">{move || error.get()}</p>
    }
}
