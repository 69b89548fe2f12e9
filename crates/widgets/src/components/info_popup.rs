use crate::components::overlay::{Overlay, OverlayHandle};
use crate::shared::icons::icon;
use leptos::html;
use leptos::prelude::*;

/// Position of the popup relative to the icon's top left corner.
fn popup_offset(px: f64) -> String {
    format!("calc({px}px + 0.5rem)")
}

/// An info icon that shows its children in a non-modal popup next to it.
#[component]
pub fn InfoPopup(
    #[prop(optional)] on_first_update: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let overlay = OverlayHandle::default();
    let icon_ref = NodeRef::<html::Button>::new();

    Effect::new(move |_| {
        if let Some(cb) = on_first_update {
            cb.run(());
        }
    });

    let on_icon_click = move |_| {
        let Some(button) = icon_ref.get_untracked() else {
            return;
        };
        let bounds = button.get_bounding_client_rect();
        overlay.set_position(popup_offset(bounds.x()), popup_offset(bounds.y()));
        let _ = overlay.show();
    };

    view! {
        <button
            type="button"
            class="icon info-popup__icon"
            node_ref=icon_ref
            aria-label="Get info about this item"
            on:click=on_icon_click
        >
            {icon("info")}
        </button>
        <Overlay handle=overlay>
            {children()}
        </Overlay>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_offset() {
        assert_eq!(popup_offset(12.5), "calc(12.5px + 0.5rem)");
        assert_eq!(popup_offset(0.0), "calc(0px + 0.5rem)");
    }
}
