//! Tabbed panels: the plain tab view and the tab-details hybrid share the
//! `Tab` button defined here.

pub mod tab_details;
pub mod tab_view;

use leptos::html;
use leptos::prelude::*;
use widget_contracts::tabs::{NavKey, TabLabelMode};

#[component]
pub fn Tab(
    index: usize,
    #[prop(into)] label: String,
    icon: Option<String>,
    #[prop(into)] mode: Signal<TabLabelMode>,
    #[prop(into)] selected: Signal<bool>,
    on_activate: Callback<usize>,
    on_keynav: Callback<(usize, NavKey)>,
    /// Element id of the button
    #[prop(optional)]
    id: Option<String>,
    /// Id of the panel this tab controls
    #[prop(optional)]
    controls: Option<String>,
    #[prop(optional)] button_ref: Option<NodeRef<html::Button>>,
) -> impl IntoView {
    let button_ref = button_ref.unwrap_or_default();
    let presentation = move || mode.get().presentation(selected.get());

    view! {
        <li role="presentation">
            <button
                node_ref=button_ref
                type="button"
                role="tab"
                class="tab"
                id=id
                aria-controls=controls
                aria-selected=move || if selected.get() { "true" } else { "false" }
                tabindex=move || (!selected.get()).then_some("-1")
                on:click=move |ev| {
                    // Tabs may sit inside a <summary>; keep the click from
                    // toggling it.
                    ev.prevent_default();
                    ev.stop_propagation();
                    on_activate.run(index);
                }
                on:keydown=move |ev| {
                    if let Some(key) = NavKey::from_key(&ev.key()) {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_keynav.run((index, key));
                    }
                }
            >
                {icon.map(|src| {
                    let style = icon_mask_style(&src);
                    view! {
                        <span
                            class=move || if presentation().icon_styled { "icon" } else { "" }
                            style=style
                        ></span>
                    }
                })}
                <span class=move || if presentation().label_hidden { "hidden" } else { "" }>
                    {label}
                </span>
            </button>
        </li>
    }
}

/// Icons are drawn as a CSS mask so they pick up the tab's text color.
pub(crate) fn icon_mask_style(src: &str) -> String {
    format!("mask: url(\"{src}\") no-repeat 50% 50%; mask-size: cover;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mask_style() {
        assert_eq!(
            icon_mask_style("a.svg"),
            "mask: url(\"a.svg\") no-repeat 50% 50%; mask-size: cover;"
        );
    }
}
