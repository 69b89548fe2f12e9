use crate::shared::dom::{scope_id, scoped};
use crate::shared::error_view::config_error;
use leptos::prelude::*;
use widget_contracts::radio::{
    ButtonDescriptor, RadioButtons, RadioGroupState, RadioLayout, RadioVariant,
};
use widget_contracts::{WidgetError, WidgetResult};

/// Imperative access to a [`RadioGroup`].
#[derive(Clone, Copy)]
pub struct RadioGroupHandle {
    state: RwSignal<Option<RadioGroupState>>,
}

impl RadioGroupHandle {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(None),
        }
    }

    /// Key of the checked button.
    pub fn selected(&self) -> Option<String> {
        self.state
            .with(|s| s.as_ref().and_then(|s| s.selected().map(str::to_string)))
    }

    /// Checks the button with `key`. Does not fire `on_select`.
    pub fn select(&self, key: &str) -> WidgetResult<()> {
        let mut result = Err(WidgetError::UnknownButton {
            tag: key.to_string(),
        });
        self.state.update(|s| {
            if let Some(s) = s {
                result = s.select(key);
            }
        });
        result
    }

    fn is_checked(&self, key: &str) -> bool {
        self.state
            .with(|s| s.as_ref().is_some_and(|s| s.is_checked(key)))
    }
}

impl Default for RadioGroupHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A fieldset of radio buttons. Plain buttons show a label and optional
/// sub-label; if the first descriptor has an icon, every button renders as
/// an icon tile.
#[component]
pub fn RadioGroup(
    #[prop(optional)] handle: Option<RadioGroupHandle>,
    buttons: RadioButtons,
    /// Key of the initially checked button (defaults to the first)
    #[prop(optional, into)]
    selected: Option<String>,
    #[prop(optional)] layout: RadioLayout,
    #[prop(optional)] wrap: bool,
    #[prop(optional)] on_select: Option<Callback<String>>,
    /// Legend content
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    let state = match RadioGroupState::new(buttons, selected) {
        Ok(state) => state,
        Err(err) => return config_error("radio group", err),
    };
    let variant = state.variant();
    let buttons: Vec<(String, ButtonDescriptor)> = state
        .buttons()
        .iter()
        .map(|(key, desc)| (key.to_string(), desc.clone()))
        .collect();
    handle.state.set(Some(state));

    let name = scope_id("radio");
    let label_class = variant.label_class(layout);

    let radios = buttons
        .into_iter()
        .map(|(key, desc)| {
            let id = scoped(&name, &key);
            let for_checked = key.clone();
            let on_change = move |_| {
                if let Err(err) = handle.select(&key) {
                    log::warn!("radio group: {err}");
                    return;
                }
                if let Some(cb) = on_select {
                    cb.run(key.clone());
                }
            };
            view! {
                <label class=label_class.clone() title=desc.title.clone() for=id.clone()>
                    <input
                        id=id.clone()
                        type="radio"
                        name=name.clone()
                        prop:checked=move || handle.is_checked(&for_checked)
                        on:change=on_change
                    />
                    {radio_content(variant, desc.clone())}
                </label>
            }
        })
        .collect_view();

    view! {
        <fieldset class="radio-group">
            <legend>{children.map(|c| c())}</legend>
            <div class=layout.wrapper_class(wrap)>{radios}</div>
        </fieldset>
    }
    .into_any()
}

fn radio_content(variant: RadioVariant, desc: ButtonDescriptor) -> AnyView {
    match variant {
        RadioVariant::Plain => view! {
            <span class="main">{desc.label}</span>
            {desc.sub_label.map(|sub| view! { <span class="sub">{sub}</span> })}
        }
        .into_any(),
        RadioVariant::Icon => view! {
            <div class="tile">
                {desc.icon.map(|src| view! { <img src=src alt="" /> })}
                <span>
                    {desc.label}
                    {desc.sub_label.map(|sub| view! { <br />{sub} })}
                </span>
            </div>
        }
        .into_any(),
    }
}
