use leptos::html;
use leptos::prelude::*;
use widget_contracts::details::{Disclosure, Toggled};

/// Imperative access to a [`Details`] instance.
///
/// The open flag and the contents notify separately, so opening or closing
/// never rebuilds the content nodes.
#[derive(Clone, Copy)]
pub struct DetailsHandle {
    disclosure: StoredValue<Disclosure<ViewFn>>,
    open: RwSignal<bool>,
    contents: Trigger,
}

impl DetailsHandle {
    pub fn new(open: bool) -> Self {
        Self {
            disclosure: StoredValue::new(Disclosure::new(open)),
            open: RwSignal::new(open),
            contents: Trigger::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn set_open(&self, open: bool) {
        let changed = self
            .disclosure
            .try_update_value(|d| d.set_open(open))
            .flatten();
        if changed.is_some() {
            self.open.set(open);
        }
    }

    /// Flips the disclosure. The `on_open`/`on_close` callback fires from the
    /// element's toggle event.
    pub fn toggle(&self) -> Toggled {
        let toggled = self
            .disclosure
            .try_update_value(|d| d.toggle())
            .unwrap_or(Toggled::Close);
        self.open.set(toggled == Toggled::Open);
        toggled
    }

    /// Replaces the whole content area.
    pub fn set_contents(&self, items: impl IntoIterator<Item = ViewFn>) {
        let detached = self
            .disclosure
            .try_update_value(|d| d.set_contents(items).len())
            .unwrap_or_default();
        log::debug!("details: replaced {detached} content item(s)");
        self.contents.notify();
    }

    fn render_contents(&self) -> impl IntoView {
        self.contents.track();
        self.disclosure
            .with_value(|d| d.contents().iter().map(|c| c.run()).collect_view())
    }
}

impl Default for DetailsHandle {
    fn default() -> Self {
        Self::new(false)
    }
}

/// A `<details>`/`<summary>` disclosure.
#[component]
pub fn Details(
    /// Handle for imperative control
    #[prop(optional)]
    handle: Option<DetailsHandle>,
    /// Initially open
    #[prop(optional)]
    open: bool,
    /// Summary content (defaults to "Label")
    #[prop(optional, into)]
    summary: Option<ViewFn>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close: Option<Callback<()>>,
    #[prop(optional)] on_first_update: Option<Callback<()>>,
    /// Initial contents
    #[prop(optional)]
    children: Option<ChildrenFn>,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    if open {
        handle.set_open(true);
    }
    if let Some(children) = children {
        handle.set_contents([ViewFn::from(move || children())]);
    }

    let details_ref = NodeRef::<html::Details>::new();

    Effect::new(move |_| {
        if let Some(cb) = on_first_update {
            cb.run(());
        }
    });

    let on_toggle = move |_| {
        let Some(el) = details_ref.get_untracked() else {
            return;
        };
        // The element is the source of truth: the toggle may come from the
        // user or from `prop:open`.
        let now_open = el.open();
        handle.set_open(now_open);
        let cb = match Toggled::from_open(now_open) {
            Toggled::Open => on_open,
            Toggled::Close => on_close,
        };
        if let Some(cb) = cb {
            cb.run(());
        }
    };

    view! {
        <details
            class="details"
            node_ref=details_ref
            prop:open=move || handle.is_open()
            on:toggle=on_toggle
        >
            <summary>
                {match summary {
                    Some(summary) => summary.run(),
                    None => "Label".into_any(),
                }}
            </summary>
            <div class="content">
                {move || handle.render_contents()}
            </div>
        </details>
    }
}
