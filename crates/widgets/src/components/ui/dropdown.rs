use crate::shared::error_view::config_error;
use leptos::prelude::*;
use widget_contracts::dropdown::DropdownState;
use widget_contracts::{WidgetError, WidgetResult};

/// Imperative access to a [`Dropdown`].
#[derive(Clone, Copy)]
pub struct DropdownHandle {
    state: RwSignal<DropdownState>,
    on_select: StoredValue<Option<Callback<i32>>>,
}

impl DropdownHandle {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(DropdownState::new(Vec::new(), None, None)),
            on_select: StoredValue::new(None),
        }
    }

    /// Selected option index, `-1` for the placeholder.
    pub fn selected_index(&self) -> i32 {
        self.state.with(|s| s.selected_index())
    }

    /// Selects an option and notifies `on_select`. With a placeholder, `-1`
    /// selects it.
    pub fn select(&self, index: i32) -> WidgetResult<i32> {
        let mut result = Err(WidgetError::InvalidSelection { index });
        self.state.update(|s| result = s.select(index));
        let index = result?;
        if let Some(cb) = self.on_select.get_value() {
            cb.run(index);
        }
        Ok(index)
    }
}

impl Default for DropdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A labelled `<select>`.
#[component]
pub fn Dropdown(
    #[prop(optional)] handle: Option<DropdownHandle>,
    #[prop(optional, into)] label: MaybeProp<String>,
    /// Entry shown before any option is chosen
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(into)] options: Vec<String>,
    /// Initially selected index (placeholder if there is one, else 0)
    #[prop(optional)]
    selected: Option<i32>,
    #[prop(optional)] on_select: Option<Callback<i32>>,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    let mut state = DropdownState::new(options, placeholder, None);
    if let Some(selected) = selected {
        if let Err(err) = state.select(selected) {
            return config_error("dropdown", err);
        }
    }
    handle.state.set(state);
    handle.on_select.set_value(on_select);

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        match DropdownState::index_for_value(&value) {
            Some(index) => {
                if let Err(err) = handle.select(index) {
                    log::warn!("dropdown: {err}");
                }
            }
            None => log::warn!("dropdown: unexpected option value '{value}'"),
        }
    };

    let placeholder = handle.state.with_untracked(|s| s.placeholder().map(str::to_string));
    let options = handle.state.with_untracked(|s| s.options().to_vec());

    view! {
        <label class="dropdown">
            {move || label.get().unwrap_or_else(|| "LABEL".to_string())}
            <select autocomplete="off" on:change=on_change>
                {placeholder.map(|text| view! {
                    <option value="" prop:selected=move || handle.selected_index() == -1>
                        {text}
                    </option>
                })}
                {options
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| view! {
                        <option
                            value=DropdownState::option_value(i)
                            prop:selected=move || handle.state.with(|s| s.is_selected(i))
                        >
                            {text}
                        </option>
                    })
                    .collect_view()}
            </select>
        </label>
    }
    .into_any()
}
