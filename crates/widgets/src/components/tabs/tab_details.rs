//! Disclosure whose summary is a tab strip.
//!
//! Panels are declared as [`TabDetailsPanel`] children. On the first render
//! the control reads their labels, waits until every panel has rendered once,
//! then takes over their content and renders it under its own element ids.
//! The panel wrappers are dropped afterwards.

use super::Tab;
use crate::shared::dom::{focus_and_reveal, html_element_by_id, scope_id, scoped};
use crate::shared::error_view::config_error;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use widget_contracts::barrier::{ready_channel, ReadinessBarrier, ReadySignal, ReadyWaiter};
use widget_contracts::tab_details::{SlotChange, TabDetailsState};
use widget_contracts::tabs::{panel_id, tab_id, NavKey, TabDescriptor, TabLabelMode};
use widget_contracts::WidgetResult;

/// Imperative access to a [`TabDetails`].
#[derive(Clone, Copy)]
pub struct TabDetailsHandle {
    state: RwSignal<TabDetailsState>,
    scope: StoredValue<String>,
}

impl TabDetailsHandle {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(TabDetailsState::default()),
            scope: StoredValue::new(scope_id("tab-details")),
        }
    }

    /// Removes the tab from the strip and hides its panel.
    pub fn hide(&self, label: &str) -> WidgetResult<()> {
        let mut result = Ok(());
        self.state.update(|s| result = s.hide(label));
        result
    }

    pub fn show(&self, label: &str) -> WidgetResult<()> {
        let mut result = Ok(());
        self.state.update(|s| result = s.show(label));
        result
    }

    /// Selects the tab at `index`, focuses it and scrolls it into view.
    /// Returns false for an out of range index.
    pub fn select(&self, index: usize) -> bool {
        let mut selected = false;
        self.state.update(|s| selected = s.select(index));
        if selected {
            self.reveal_tab(index);
        }
        selected
    }

    pub fn selected(&self) -> usize {
        self.state.with(|s| s.selected())
    }

    pub fn tab_labels(&self) -> Vec<String> {
        self.state.with(|s| s.tab_labels().to_vec())
    }

    pub fn hidden_tabs(&self) -> Vec<String> {
        self.state.with(|s| s.hidden_tabs().to_vec())
    }

    pub fn is_open(&self) -> bool {
        self.state.with(|s| s.is_open())
    }

    /// Opens or closes the control; returns the new open state.
    pub fn toggle(&self) -> bool {
        let mut open = false;
        self.state.update(|s| open = s.toggle());
        open
    }

    pub fn set_mode(&self, mode: TabLabelMode) {
        self.state.update(|s| s.set_mode(mode));
    }

    fn navigate(&self, from: usize, key: NavKey) {
        let mut next = None;
        self.state.update(|s| next = s.navigate_from(from, key));
        if let Some(next) = next {
            self.reveal_tab(next);
        }
    }

    fn reveal_tab(&self, index: usize) {
        // A hidden tab has no button.
        if let Some(tab) = html_element_by_id(&self.tab_dom_id(index)) {
            focus_and_reveal(&tab);
        }
    }

    fn tab_dom_id(&self, index: usize) -> String {
        self.scope.with_value(|scope| scoped(scope, &tab_id(index)))
    }

    fn panel_dom_id(&self, index: usize) -> String {
        self.scope.with_value(|scope| scoped(scope, &panel_id(index)))
    }
}

impl Default for TabDetailsHandle {
    fn default() -> Self {
        Self::new()
    }
}

struct SlottedPanel {
    descriptor: TabDescriptor,
    content: ChildrenFn,
    ready: Option<ReadyWaiter>,
}

/// Panels registered by [`TabDetailsPanel`] children, in declaration order.
#[derive(Clone, Copy)]
struct PanelSlot(StoredValue<Vec<SlottedPanel>, LocalStorage>);

impl PanelSlot {
    fn new() -> Self {
        Self(StoredValue::new_local(Vec::new()))
    }

    /// Adds a panel; the returned signal is fired after its first render.
    fn register(&self, descriptor: TabDescriptor, content: ChildrenFn) -> ReadySignal {
        let (signal, waiter) = ready_channel();
        self.0.update_value(|panels| {
            panels.push(SlottedPanel {
                descriptor,
                content,
                ready: Some(waiter),
            })
        });
        signal
    }

    fn descriptors(&self) -> Vec<TabDescriptor> {
        self.0
            .with_value(|panels| panels.iter().map(|p| p.descriptor.clone()).collect())
    }

    fn take_waiters(&self) -> Vec<ReadyWaiter> {
        self.0
            .try_update_value(|panels| {
                panels
                    .iter_mut()
                    .filter_map(|p| p.ready.take())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    }

    fn take_contents(&self) -> Vec<ChildrenFn> {
        self.0
            .try_update_value(|panels| panels.drain(..).map(|p| p.content).collect::<Vec<_>>())
            .unwrap_or_default()
    }
}

/// One tab of a [`TabDetails`]. Renders nothing visible itself; its content
/// is rendered by the enclosing control.
#[component]
pub fn TabDetailsPanel(
    #[prop(into)] label: String,
    /// Icon URL; if any panel has one, every panel needs one
    #[prop(optional, into)]
    icon: Option<String>,
    /// Start out hidden
    #[prop(optional)]
    hidden: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let Some(slot) = use_context::<PanelSlot>() else {
        log::warn!("tab details panel '{label}' outside of a tab details control");
        return ().into_any();
    };

    let descriptor = TabDescriptor {
        label: label.clone(),
        icon,
        hidden,
    };
    let signal = StoredValue::new_local(slot.register(descriptor, children));
    Effect::new(move |_| {
        signal.update_value(|s| {
            s.fire();
        });
    });

    view! { <div class="tab-details-panel" data-label=label hidden></div> }.into_any()
}

#[component]
pub fn TabDetails(
    #[prop(optional)] handle: Option<TabDetailsHandle>,
    /// Initially open
    #[prop(optional)]
    open: bool,
    /// Index of the initially selected tab
    #[prop(optional)]
    default_tab: usize,
    #[prop(optional)] mode: TabLabelMode,
    #[prop(into, default = "Open or close tabbed interface".to_string())]
    open_button_aria_label: String,
    #[prop(into, default = "Tabs".to_string())] tab_list_aria_label: String,
    #[prop(optional)] on_ready: Option<Callback<()>>,
    #[prop(optional)] on_first_update: Option<Callback<()>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    let state = handle.state;
    state.set(TabDetailsState::new(default_tab, open, mode));

    let slot = PanelSlot::new();
    provide_context(slot);
    let slotted = StoredValue::new_local(Some(children()));
    let slot_open = RwSignal::new(true);

    let descriptors = slot.descriptors();
    let mut change = Ok(SlotChange::Ignored);
    state.update(|s| change = s.receive_panels(&descriptors));
    match change {
        Ok(SlotChange::Captured) => {
            log::debug!("tab details: captured {} panel(s)", descriptors.len())
        }
        Ok(SlotChange::Ignored) => log::debug!("tab details: panels already captured"),
        Err(err) => return config_error("tab details", err),
    }

    let absorbed = RwSignal::new(Vec::<ChildrenFn>::new());

    let absorb = move || {
        let contents = slot.take_contents();
        log::debug!("tab details: absorbed {} panel(s)", contents.len());
        state.update(|s| s.mark_absorbed());
        absorbed.set(contents);
        slot_open.set(false);
    };

    Effect::new(move |_| {
        let mut barrier = ReadinessBarrier::new(slot.take_waiters());
        if barrier.all_ready() {
            absorb();
        } else {
            log::debug!("tab details: waiting for {} panel(s)", barrier.pending());
            spawn_local(async move {
                barrier.wait().await;
                absorb();
            });
        }
    });

    Effect::new(move |_| {
        let mut first = false;
        state.update_untracked(|s| first = s.take_first_update());
        if first {
            if let Some(cb) = on_first_update {
                cb.run(());
            }
        }
    });

    Effect::new(move |_| {
        absorbed.track();
        let mut ready = false;
        state.update_untracked(|s| ready = s.take_ready());
        if ready {
            if let Some(cb) = on_ready {
                cb.run(());
            }
        }
    });

    let details_ref = NodeRef::<html::Details>::new();

    let on_toggle = move |_| {
        let Some(details) = details_ref.get_untracked() else {
            return;
        };
        let now_open = details.open();
        if state.with_untracked(|s| s.is_open()) != now_open {
            state.update(|s| s.set_open(now_open));
        }
        let cb = if now_open { on_open } else { on_close };
        if let Some(cb) = cb {
            cb.run(());
        }
    };

    let on_summary_click = move |ev: leptos::ev::MouseEvent| {
        // Take over the toggle so hidden parts hide immediately.
        ev.prevent_default();
        handle.toggle();
    };

    let visible_tabs = Memo::new(move |_| {
        state.with(|s| {
            s.visible_tabs()
                .into_iter()
                .map(|(i, label)| (i, label.to_string(), s.icon(i).map(str::to_string)))
                .collect::<Vec<_>>()
        })
    });
    let tab_mode = Signal::derive(move || state.with(|s| s.mode()));
    let on_activate = Callback::new(move |index: usize| {
        handle.select(index);
    });
    let on_keynav = Callback::new(move |(from, key): (usize, NavKey)| handle.navigate(from, key));

    view! {
        <details
            class="tab-details"
            node_ref=details_ref
            prop:open=move || state.with(|s| s.is_open())
            on:toggle=on_toggle
        >
            <summary tabindex="0" aria-label=open_button_aria_label on:click=on_summary_click>
                <menu
                    role="tablist"
                    class=move || if state.with(|s| s.is_open()) { "tablist" } else { "tablist hidden" }
                    aria-label=tab_list_aria_label
                >
                    {move || {
                        visible_tabs
                            .get()
                            .into_iter()
                            .map(|(i, label, icon)| view! {
                                <Tab
                                    index=i
                                    label=label
                                    icon=icon
                                    mode=tab_mode
                                    selected=Signal::derive(move || state.with(|s| s.is_selected(i)))
                                    on_activate=on_activate
                                    on_keynav=on_keynav
                                    id=handle.tab_dom_id(i)
                                    controls=handle.panel_dom_id(i)
                                />
                            })
                            .collect_view()
                    }}
                </menu>
            </summary>
            <div class="panels">
                {move || {
                    absorbed
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(i, content)| view! {
                            <section
                                id=handle.panel_dom_id(i)
                                hidden=move || state.with(|s| s.is_tab_hidden(i))
                                tabindex="0"
                                role="tabpanel"
                                aria-labelledby=handle.tab_dom_id(i)
                                class=move || if state.with(|s| s.is_selected(i)) { "panel" } else { "panel hidden" }
                            >
                                {content()}
                            </section>
                        })
                        .collect_view()
                }}
                {move || slot_open.get().then(|| slotted.try_update_value(Option::take)).flatten().flatten()}
            </div>
        </details>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::Arc;
    use widget_contracts::WidgetError;

    fn content() -> ChildrenFn {
        Arc::new(|| ().into_any())
    }

    fn captured_handle(panels: &[TabDescriptor]) -> TabDetailsHandle {
        let handle = TabDetailsHandle::new();
        handle
            .state
            .update(|s| assert_eq!(s.receive_panels(panels), Ok(SlotChange::Captured)));
        handle
    }

    #[test]
    fn test_hide_and_show_through_handle() {
        let owner = Owner::new();
        owner.set();

        let handle = captured_handle(&[
            TabDescriptor::new("Tab A"),
            TabDescriptor::new("Tab B"),
            TabDescriptor::new("Tab C").hidden(),
        ]);
        assert_eq!(handle.hidden_tabs(), vec!["Tab C"]);

        handle.hide("Tab A").unwrap();
        handle.hide("Tab A").unwrap();
        assert_eq!(handle.hidden_tabs(), vec!["Tab C", "Tab A"]);
        assert!(handle.state.with(|s| s.is_tab_hidden(0)));

        handle.show("Tab C").unwrap();
        assert_eq!(handle.hidden_tabs(), vec!["Tab A"]);
        assert_eq!(
            handle.show("Tab Z"),
            Err(WidgetError::UnknownTab {
                label: "Tab Z".to_string()
            })
        );
        assert_eq!(handle.tab_labels(), vec!["Tab A", "Tab B", "Tab C"]);
    }

    #[test]
    fn test_toggle_and_mode_through_handle() {
        let owner = Owner::new();
        owner.set();

        let handle = TabDetailsHandle::new();
        assert!(!handle.is_open());
        assert!(handle.toggle());
        assert!(handle.is_open());
        handle.set_mode(TabLabelMode::Icons);
        assert_eq!(handle.state.with(|s| s.mode()), TabLabelMode::Icons);
    }

    #[test]
    fn test_absorption_waits_for_every_panel() {
        let owner = Owner::new();
        owner.set();

        let slot = PanelSlot::new();
        let mut first = slot.register(TabDescriptor::new("Tab A"), content());
        let mut second = slot.register(TabDescriptor::new("Tab B").hidden(), content());

        let handle = captured_handle(&slot.descriptors());
        assert_eq!(handle.hidden_tabs(), vec!["Tab B"]);

        let mut barrier = ReadinessBarrier::new(slot.take_waiters());
        assert_eq!(barrier.pending(), 2);
        assert!(slot.take_waiters().is_empty());

        first.fire();
        assert!(!barrier.all_ready());
        second.fire();
        assert!(barrier.all_ready());
        block_on(barrier.wait());

        assert_eq!(slot.take_contents().len(), 2);
        assert!(slot.descriptors().is_empty());

        handle.state.update(|s| {
            assert!(!s.take_ready());
            s.mark_absorbed();
        });
        handle.state.update(|s| {
            assert!(s.take_ready());
            assert!(!s.take_ready());
        });
        assert!(handle.state.with(|s| s.is_absorbed()));
    }

    #[test]
    fn test_dropped_panel_does_not_block_absorption() {
        let owner = Owner::new();
        owner.set();

        let slot = PanelSlot::new();
        let mut shown = slot.register(TabDescriptor::new("Tab A"), content());
        drop(slot.register(TabDescriptor::new("Tab B"), content()));

        let mut barrier = ReadinessBarrier::new(slot.take_waiters());
        assert_eq!(barrier.pending(), 1);
        shown.fire();
        block_on(barrier.wait());
    }
}
