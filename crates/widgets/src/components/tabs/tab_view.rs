//! Tab list plus panel group, tied together by a [`TabView`].
//!
//! ```rust,ignore
//! <TabView>
//!     <TabList mode=TabLabelMode::IconsLabels />
//!     <TabPanelGroup>
//!         <TabPanel label="General" icon="general.svg">...</TabPanel>
//!         <TabPanel label="Advanced" icon="advanced.svg">...</TabPanel>
//!     </TabPanelGroup>
//! </TabView>
//! ```

use super::Tab;
use crate::shared::dom::{html_element_by_id, scope_id, scoped};
use crate::shared::error_view::config_error;
use leptos::prelude::*;
use widget_contracts::tab_view::TabListState;
use widget_contracts::tabs::{panel_id, tab_id, NavKey, TabDescriptor, TabLabelMode};
use widget_contracts::WidgetError;

#[derive(Clone, Copy)]
struct TabViewContext {
    state: RwSignal<TabListState>,
    scope: StoredValue<String>,
}

impl TabViewContext {
    fn tab_dom_id(&self, index: usize) -> String {
        self.scope.with_value(|scope| scoped(scope, &tab_id(index)))
    }

    fn panel_dom_id(&self, index: usize) -> String {
        self.scope.with_value(|scope| scoped(scope, &panel_id(index)))
    }
}

/// Panels declared inside a [`TabPanelGroup`], in order.
#[derive(Clone, Copy)]
struct PanelRegistry(StoredValue<Vec<TabDescriptor>>);

/// Scope shared by one [`TabList`] and the [`TabPanelGroup`] it governs.
#[component]
pub fn TabView(children: Children) -> impl IntoView {
    provide_context(TabViewContext {
        state: RwSignal::new(TabListState::new()),
        scope: StoredValue::new(scope_id("tabs")),
    });

    view! { <div class="tab-view">{children()}</div> }
}

#[component]
pub fn TabList(
    #[prop(optional)] mode: TabLabelMode,
    /// Render inline, without padding or background
    #[prop(optional)]
    inline: bool,
) -> impl IntoView {
    let Some(ctx) = use_context::<TabViewContext>() else {
        return config_error("tab list", WidgetError::TabListNotFound);
    };
    ctx.state.update_untracked(|s| s.attach_tab_list());

    // Only a change of labels or icons rebuilds the buttons; selection
    // changes must keep the focused element alive.
    let tabs = Memo::new(move |_| {
        ctx.state.with(|s| {
            s.tabs()
                .iter()
                .enumerate()
                .map(|(i, label)| (i, label.clone(), s.icon(i).map(str::to_string)))
                .collect::<Vec<_>>()
        })
    });

    let on_activate = Callback::new(move |index: usize| {
        ctx.state.update(|s| {
            s.activate(index);
        });
    });
    let on_keynav = Callback::new(move |(from, key): (usize, NavKey)| {
        let mut next = None;
        ctx.state.update(|s| next = s.navigate_from(from, key));
        if let Some(tab) = next.and_then(|i| html_element_by_id(&ctx.tab_dom_id(i))) {
            let _ = tab.focus();
        }
    });

    view! {
        <ul
            role="tablist"
            class="tablist"
            style=inline.then_some("display: inline-flex; background: none; padding: 0; flex-grow: 1;")
        >
            {move || {
                tabs.get()
                    .into_iter()
                    .map(|(i, label, icon)| view! {
                        <Tab
                            index=i
                            label=label
                            icon=icon
                            mode=mode
                            selected=Signal::derive(move || ctx.state.with(|s| s.is_selected(i)))
                            on_activate=on_activate
                            on_keynav=on_keynav
                            id=ctx.tab_dom_id(i)
                            controls=ctx.panel_dom_id(i)
                        />
                    })
                    .collect_view()
            }}
        </ul>
    }
    .into_any()
}

/// Holds the [`TabPanel`]s. Must sit inside a [`TabView`], after its
/// [`TabList`].
#[component]
pub fn TabPanelGroup(children: Children) -> impl IntoView {
    let Some(ctx) = use_context::<TabViewContext>() else {
        return config_error("tab panel group", WidgetError::TabListNotFound);
    };
    let mut attached = Ok(());
    ctx.state.update_untracked(|s| attached = s.attach_panel_group());
    if let Err(err) = attached {
        return config_error("tab panel group", err);
    }

    let registry = PanelRegistry(StoredValue::new(Vec::new()));
    provide_context(registry);
    let panels = children();

    let descriptors = registry.0.get_value();
    let mut result = Ok(());
    ctx.state.update(|s| result = s.set_panels(&descriptors));
    if let Err(err) = result {
        return config_error("tab panel group", err);
    }
    log::debug!("tab panel group: {} panel(s)", descriptors.len());

    view! { <div class="panels">{panels}</div> }.into_any()
}

#[component]
pub fn TabPanel(
    #[prop(into)] label: String,
    /// Icon URL; if any panel has one, every panel needs one
    #[prop(optional, into)]
    icon: Option<String>,
    children: Children,
) -> impl IntoView {
    let Some(ctx) = use_context::<TabViewContext>() else {
        return config_error("tab panel", WidgetError::TabListNotFound);
    };
    let Some(registry) = use_context::<PanelRegistry>() else {
        return config_error("tab panel", WidgetError::TabListNotFound);
    };

    let mut index = 0;
    registry.0.update_value(|panels| {
        index = panels.len();
        panels.push(TabDescriptor { label, icon, hidden: false });
    });

    view! {
        <div
            role="tabpanel"
            tabindex="0"
            class="panel"
            id=ctx.panel_dom_id(index)
            aria-labelledby=ctx.tab_dom_id(index)
            hidden=move || !ctx.state.with(|s| s.is_selected(index))
        >
            {children()}
        </div>
    }
    .into_any()
}
