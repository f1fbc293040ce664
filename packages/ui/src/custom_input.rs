//! One labelled input bound to a form field.

use dioxus::prelude::*;
use forms::{FieldBinding, FormState};

/// Renders a [`FieldBinding`] and writes every edit back into the form.
#[component]
pub fn CustomInput(binding: FieldBinding, mut form: Signal<FormState>) -> Element {
    let name = binding.name;
    let id = format!("field-{name}");
    let label = binding.label;
    let placeholder = binding.placeholder;
    let input_type = binding.input_type();
    let value = binding.value.clone();
    let invalid = !binding.is_valid();

    rsx! {
        div {
            class: "form-item",
            label {
                class: "form-label",
                r#for: "{id}",
                "{label}"
            }
            div {
                class: "flex w-full flex-col",
                input {
                    id: "{id}",
                    name: "{name}",
                    class: "input-class",
                    r#type: "{input_type}",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    aria_invalid: invalid,
                    oninput: move |evt: FormEvent| form.write().set_field(name, evt.value()),
                }
                if let Some(error) = binding.error.clone() {
                    p {
                        class: "form-message mt-2",
                        "{error}"
                    }
                }
            }
        }
    }
}
