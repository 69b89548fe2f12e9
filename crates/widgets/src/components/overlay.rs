use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use widget_contracts::overlay::{
    CancelConfig, CancelHook, CancelSource, CloseFuture, Overlay as OverlayModel, OverlayEvent,
    OverlayGeometry, Rect,
};

type AfterShown = Option<Box<dyn FnOnce()>>;

/// Imperative access to an [`Overlay`].
///
/// - `show` returns the close future; a second `show` while open returns
///   the same one
/// - `close` resolves it with the given value
#[derive(Clone, Copy)]
pub struct OverlayHandle {
    model: StoredValue<OverlayModel, LocalStorage>,
    open: RwSignal<bool>,
    geometry: RwSignal<OverlayGeometry>,
    after_shown: StoredValue<AfterShown, LocalStorage>,
}

impl OverlayHandle {
    pub fn new(cancel: CancelConfig) -> Self {
        Self::from_model(OverlayModel::new(cancel))
    }

    /// Wraps an existing lifecycle model, e.g. the one owned by a dialog.
    pub fn from_model(model: OverlayModel) -> Self {
        let open = RwSignal::new(model.is_open());
        model.subscribe(move |event| open.set(matches!(event, OverlayEvent::Opened)));
        Self {
            model: StoredValue::new_local(model),
            open,
            geometry: RwSignal::new(OverlayGeometry::default()),
            after_shown: StoredValue::new_local(None),
        }
    }

    fn model(&self) -> OverlayModel {
        self.model.get_value()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn show(&self) -> CloseFuture {
        self.model().show().future
    }

    /// Like [`show`](Self::show); `after_shown` runs once the surface is
    /// visible, and only if this call actually opened the overlay.
    pub fn show_then(&self, after_shown: impl FnOnce() + 'static) -> CloseFuture {
        let model = self.model();
        if !model.is_open() {
            self.set_after_shown(after_shown);
        }
        model.show().future
    }

    pub(crate) fn set_after_shown(&self, after_shown: impl FnOnce() + 'static) {
        self.after_shown.set_value(Some(Box::new(after_shown)));
    }

    pub fn close(&self, value: Option<&str>) -> bool {
        self.model().close(value)
    }

    pub async fn cancel(&self, source: CancelSource) -> bool {
        let model = self.model();
        model.cancel(source).await
    }

    pub fn cancel_config(&self) -> CancelConfig {
        self.model().cancel_config()
    }

    pub fn set_cancel_config(&self, cancel: CancelConfig) {
        self.model().set_cancel_config(cancel);
    }

    pub fn set_cancel_hook(&self, hook: Option<CancelHook>) {
        self.model().set_cancel_hook(hook);
    }

    pub fn set_modal(&self, modal: bool) {
        self.geometry.update(|g| g.modal = modal);
    }

    /// Top left corner in viewport coordinates (non-modal only). Any CSS
    /// length is accepted.
    pub fn set_position(&self, x: impl Into<String>, y: impl Into<String>) {
        let (x, y) = (x.into(), y.into());
        self.geometry.update(|g| {
            g.x = x;
            g.y = y;
        });
    }

    /// Offset from the centered position (modal only).
    pub fn set_translation(&self, tx: f64, ty: f64) {
        self.geometry.update(|g| {
            g.tx = tx;
            g.ty = ty;
        });
    }

    pub fn set_size(&self, width: Option<String>, height: Option<String>) {
        self.geometry.update(|g| {
            g.width = width;
            g.height = height;
        });
    }

    fn take_after_shown(&self) -> AfterShown {
        self.after_shown.try_update_value(|f| f.take()).flatten()
    }
}

impl Default for OverlayHandle {
    fn default() -> Self {
        Self::new(CancelConfig::default())
    }
}

fn cancel_in_background(handle: OverlayHandle, source: CancelSource) {
    spawn_local(async move {
        handle.cancel(source).await;
    });
}

/// A floating surface on top of a native `<dialog>`, with an optional X
/// close button.
#[component]
pub fn Overlay(
    #[prop(optional)] handle: Option<OverlayHandle>,
    /// Show as a modal dialog (centered, backdrop, Escape)
    #[prop(optional)]
    modal: bool,
    /// Gestures that cancel the overlay (all by default)
    #[prop(optional)]
    cancel: Option<CancelConfig>,
    #[prop(optional, into)] x: Option<String>,
    #[prop(optional, into)] y: Option<String>,
    #[prop(optional, into)] width: Option<String>,
    #[prop(optional, into)] height: Option<String>,
    /// Show immediately after mounting
    #[prop(optional)]
    open: bool,
    #[prop(optional)] on_first_update: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    if let Some(cancel) = cancel {
        handle.set_cancel_config(cancel);
    }
    handle.geometry.update(|g| {
        g.modal = modal;
        if let Some(x) = x {
            g.x = x;
        }
        if let Some(y) = y {
            g.y = y;
        }
        if width.is_some() {
            g.width = width;
        }
        if height.is_some() {
            g.height = height;
        }
    });

    let dialog_ref = NodeRef::<html::Dialog>::new();

    let on_document_click = Closure::wrap(Box::new(move |ev: MouseEvent| {
        let Some(dialog) = dialog_ref.get_untracked() else {
            return;
        };
        let bounds = dialog.get_bounding_client_rect();
        let rect = Rect {
            left: bounds.left(),
            top: bounds.top(),
            right: bounds.right(),
            bottom: bounds.bottom(),
        };
        if !rect.contains(f64::from(ev.client_x()), f64::from(ev.client_y())) {
            cancel_in_background(handle, CancelSource::Click);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    let on_document_click = StoredValue::new_local(on_document_click);
    let listening = StoredValue::new(false);

    let remove_listener = move || {
        if !listening.try_get_value().unwrap_or(false) {
            return;
        }
        listening.set_value(false);
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            on_document_click.with_value(|cb| {
                let _ = document
                    .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
            });
        }
    };

    let add_listener_next_tick = move || {
        spawn_local(async move {
            // Defer to the next tick so the click that opened the overlay
            // does not immediately count as an outside click.
            TimeoutFuture::new(0).await;
            let still_open = handle.open.try_get_untracked().unwrap_or(false);
            if !still_open || listening.try_get_value().unwrap_or(true) {
                return;
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                on_document_click.with_value(|cb| {
                    let _ = document
                        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
                });
                listening.set_value(true);
            }
        });
    };

    Effect::new(move |_| {
        let open = handle.open.get();
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        if open {
            if !dialog.open() {
                if handle.geometry.with_untracked(|g| g.modal) {
                    if let Err(err) = dialog.show_modal() {
                        log::error!("overlay: show_modal failed: {err:?}");
                    }
                } else {
                    dialog.set_open(true);
                }
            }
            if handle.cancel_config().click {
                add_listener_next_tick();
            }
            if let Some(after_shown) = handle.take_after_shown() {
                after_shown();
            }
        } else {
            dialog.close();
            remove_listener();
        }
    });

    Effect::new(move |_| {
        if open {
            let _ = handle.show();
        }
        if let Some(cb) = on_first_update {
            cb.run(());
        }
    });

    on_cleanup(move || {
        remove_listener();
        // Unmounting resolves any pending show with the default tag.
        if let Some(model) = handle.model.try_get_value() {
            model.close(None);
        }
    });

    let show_close_button = move || handle.open.get() && handle.cancel_config().button;

    view! {
        <dialog
            class="overlay"
            node_ref=dialog_ref
            style=move || handle.geometry.with(|g| g.surface_style())
            on:cancel=move |ev: web_sys::Event| {
                ev.prevent_default();
                cancel_in_background(handle, CancelSource::Key);
            }
        >
            <div class="content">
                <Show when=show_close_button>
                    <button
                        type="button"
                        class="close-x"
                        aria-label="Close"
                        on:click=move |_| cancel_in_background(handle, CancelSource::Button)
                    >
                        {icon("x")}
                    </button>
                </Show>
                {children()}
            </div>
        </dialog>
    }
}
