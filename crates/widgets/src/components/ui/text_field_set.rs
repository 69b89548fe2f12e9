use crate::shared::dom::{scope_id, scoped};
use leptos::prelude::*;
use widget_contracts::ordered::OrderedMap;
use widget_contracts::text_fields::{input_id, InputDescriptor, TextFieldSetState};
use widget_contracts::WidgetResult;

/// Imperative access to a [`TextFieldSet`].
#[derive(Clone, Copy)]
pub struct TextFieldSetHandle {
    state: RwSignal<TextFieldSetState>,
}

impl TextFieldSetHandle {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(TextFieldSetState::new(OrderedMap::new())),
        }
    }

    /// True when no field is empty.
    pub fn is_all_fields_set(&self) -> bool {
        self.state.with(|s| s.is_all_fields_set())
    }

    /// Current values in field order.
    pub fn field_values(&self) -> Vec<(String, String)> {
        self.state.with(|s| s.field_values())
    }

    /// Sets several fields at once. Nothing changes if any key is unknown.
    pub fn set_field_values(&self, values: &[(String, String)]) -> WidgetResult<()> {
        let mut result = Ok(());
        self.state.update(|s| result = s.set_field_values(values));
        result
    }

    fn value(&self, key: &str) -> String {
        self.state
            .with(|s| s.value(key).unwrap_or_default().to_string())
    }
}

impl Default for TextFieldSetHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A fieldset of labelled inputs keyed by string. `on_edit` fires with the
/// field key on every keystroke, `on_commit` when the input loses focus or
/// Enter is pressed after a change.
#[component]
pub fn TextFieldSet(
    #[prop(optional)] handle: Option<TextFieldSetHandle>,
    inputs: OrderedMap<InputDescriptor>,
    #[prop(optional, into)] legend: Option<ViewFn>,
    /// Content placed before the inputs
    #[prop(optional, into)]
    before: Option<ViewFn>,
    /// Content placed after the inputs
    #[prop(optional, into)]
    after: Option<ViewFn>,
    #[prop(optional)] on_edit: Option<Callback<String>>,
    #[prop(optional)] on_commit: Option<Callback<String>>,
    #[prop(optional)] on_first_update: Option<Callback<()>>,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    let descriptors: Vec<(String, InputDescriptor)> = inputs
        .iter()
        .map(|(key, desc)| (key.to_string(), desc.clone()))
        .collect();
    handle.state.set(TextFieldSetState::new(inputs));

    Effect::new(move |_| {
        if let Some(cb) = on_first_update {
            cb.run(());
        }
    });

    let scope = scope_id("fields");
    let fields = descriptors
        .into_iter()
        .map(|(key, desc)| {
            let id = scoped(&scope, &input_id(&key));
            let for_value = key.clone();
            let for_input = key.clone();
            let on_input = move |ev: leptos::ev::Event| {
                let value = event_target_value(&ev);
                let mut result = Ok(());
                handle.state.update(|s| result = s.edit(&for_input, value));
                match result {
                    Ok(()) => {
                        if let Some(cb) = on_edit {
                            cb.run(for_input.clone());
                        }
                    }
                    Err(err) => log::warn!("text field set: {err}"),
                }
            };
            let on_change = move |_| {
                if let Some(cb) = on_commit {
                    cb.run(key.clone());
                }
            };
            view! {
                <label for=id.clone()>
                    {desc.label}
                    <input
                        id=id.clone()
                        type=desc.kind.as_str()
                        placeholder=desc.placeholder
                        size=desc.size.map(|size| size.to_string())
                        min=desc.min.map(|min| min.to_string())
                        max=desc.max.map(|max| max.to_string())
                        prop:value=move || handle.value(&for_value)
                        on:input=on_input
                        on:change=on_change
                    />
                </label>
            }
        })
        .collect_view();

    view! {
        <fieldset class="text-field-set">
            <legend>{legend.map(|l| l.run())}</legend>
            {before.map(|b| b.run())}
            {fields}
            {after.map(|a| a.run())}
        </fieldset>
    }
}
