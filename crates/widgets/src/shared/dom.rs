//! Element ids and small DOM helpers.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Per-instance prefix so local ids like `tab0` stay unique in the document.
pub fn scope_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &uuid[..8])
}

pub fn scoped(scope: &str, local: &str) -> String {
    format!("{scope}-{local}")
}

pub fn html_element_by_id(id: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Focuses the element and scrolls it into view (smooth, nearest).
pub fn focus_and_reveal(element: &HtmlElement) {
    if let Err(err) = element.focus() {
        log::warn!("focus failed: {err:?}");
    }
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    options.set_inline(ScrollLogicalPosition::Nearest);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_id_is_unique_per_call() {
        let a = scope_id("tabs");
        let b = scope_id("tabs");
        assert!(a.starts_with("tabs-"));
        assert_eq!(a.len(), "tabs-".len() + 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_scoped() {
        assert_eq!(scoped("tabs-1a2b3c4d", "panel0"), "tabs-1a2b3c4d-panel0");
    }
}
