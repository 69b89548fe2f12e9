use crate::components::overlay::{Overlay, OverlayHandle};
use crate::shared::dom::{html_element_by_id, scope_id, scoped};
use crate::shared::error_view::config_error;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::PointerEvent;
use widget_contracts::dialog::{
    ButtonView, Dialog as DialogModel, DialogButton, DialogView, CANCEL_TAG, OKAY_TAG,
};
use widget_contracts::overlay::CloseFuture;
use widget_contracts::WidgetResult;

/// Imperative access to a [`Dialog`].
#[derive(Clone, Copy)]
pub struct DialogHandle {
    model: StoredValue<DialogModel, LocalStorage>,
    overlay: OverlayHandle,
    view: RwSignal<DialogView>,
    scope: StoredValue<String>,
}

impl DialogHandle {
    /// Fails if two buttons share a tag.
    pub fn new(buttons: Vec<DialogButton>) -> WidgetResult<Self> {
        Ok(Self::from_model(DialogModel::new(buttons)?))
    }

    fn from_model(model: DialogModel) -> Self {
        let overlay = OverlayHandle::from_model(model.overlay().clone());
        overlay.set_modal(true);
        let view = RwSignal::new(model.view());
        model.subscribe(move |snapshot| {
            overlay.set_translation(snapshot.translation.0, snapshot.translation.1);
            view.set(snapshot.clone());
        });
        Self {
            model: StoredValue::new_local(model),
            overlay,
            view,
            scope: StoredValue::new(scope_id("dialog")),
        }
    }

    fn model(&self) -> DialogModel {
        self.model.get_value()
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Shows the dialog with every button back in its initial disabled state.
    /// The future resolves with the tag of the button that closed it.
    pub fn show(&self) -> CloseFuture {
        self.model().show().future
    }

    pub fn show_then(&self, after_shown: impl FnOnce() + 'static) -> CloseFuture {
        let model = self.model();
        if !model.is_open() {
            self.overlay.set_after_shown(after_shown);
        }
        model.show().future
    }

    pub fn close(&self, value: Option<&str>) -> bool {
        self.model().close(value)
    }

    pub fn button(&self, tag: &str) -> Option<ButtonView> {
        self.view
            .with(|v| v.buttons.iter().find(|b| b.tag == tag).cloned())
    }

    pub fn get_buttons_disabled(&self) -> Vec<(String, bool)> {
        self.model().get_buttons_disabled()
    }

    pub fn set_buttons_disabled(
        &self,
        states: Option<&[(String, bool)]>,
    ) -> WidgetResult<Option<Vec<(String, bool)>>> {
        self.model().set_buttons_disabled(states)
    }

    pub fn set_button_text(&self, tag: &str, text: impl Into<String>) -> WidgetResult<()> {
        self.model().set_button_text(tag, text)
    }

    /// Same as the user clicking the button.
    pub async fn click(&self, tag: &str) -> WidgetResult<bool> {
        let model = self.model();
        model.click(tag).await
    }

    pub fn focus_button(&self, tag: &str) {
        match html_element_by_id(&self.button_id(tag)) {
            Some(button) => {
                let _ = button.focus();
            }
            None => log::warn!("dialog: no button '{tag}' to focus"),
        }
    }

    fn button_id(&self, tag: &str) -> String {
        self.scope.with_value(|scope| scoped(scope, tag))
    }

    fn click_in_background(&self, tag: String) {
        let handle = *self;
        spawn_local(async move {
            if let Err(err) = handle.click(&tag).await {
                log::error!("dialog: {err}");
            }
        });
    }
}

impl Default for DialogHandle {
    fn default() -> Self {
        Self::from_model(DialogModel::default())
    }
}

fn title_text(title: Option<String>) -> String {
    title.unwrap_or_else(|| "TITLE".to_string())
}

/// Modal dialog with a draggable title bar and a row of buttons.
#[component]
pub fn Dialog(
    #[prop(optional)] handle: Option<DialogHandle>,
    /// Buttons, when no handle is given (`cancel`/`okay` by default)
    #[prop(optional)]
    buttons: Option<Vec<DialogButton>>,
    #[prop(optional, into)] title: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let handle = match (handle, buttons) {
        (Some(handle), _) => handle,
        (None, Some(buttons)) => match DialogHandle::new(buttons) {
            Ok(handle) => handle,
            Err(err) => return config_error("dialog", err),
        },
        (None, None) => DialogHandle::default(),
    };

    let title_ref = NodeRef::<html::Div>::new();

    let on_pointer_down = move |ev: PointerEvent| {
        handle
            .model()
            .pointer_down(f64::from(ev.client_x()), f64::from(ev.client_y()));
        if let Some(title) = title_ref.get_untracked() {
            let _ = title.set_pointer_capture(ev.pointer_id());
        }
    };
    let on_pointer_move = move |ev: PointerEvent| {
        handle
            .model()
            .pointer_move(f64::from(ev.client_x()), f64::from(ev.client_y()));
    };
    let on_pointer_up = move |ev: PointerEvent| {
        handle.model().pointer_up();
        if let Some(title) = title_ref.get_untracked() {
            let _ = title.release_pointer_capture(ev.pointer_id());
        }
    };

    let button_tags = move || {
        handle
            .view
            .with(|v| v.buttons.iter().map(|b| b.tag.clone()).collect::<Vec<_>>())
    };

    view! {
        <Overlay handle=handle.overlay modal=true cancel=DialogModel::CANCEL>
            <div
                class="title"
                node_ref=title_ref
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
            >
                {move || title_text(title.get())}
            </div>
            {children()}
            <div class="buttons">
                <For
                    each=button_tags
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let id = handle.button_id(&tag);
                        let for_disabled = tag.clone();
                        let for_text = tag.clone();
                        view! {
                            <button
                                type="button"
                                id=id
                                disabled=move || handle.button(&for_disabled).is_some_and(|b| b.disabled)
                                on:click=move |_| handle.click_in_background(tag.clone())
                            >
                                {move || handle.button(&for_text).map(|b| b.text).unwrap_or_default()}
                            </button>
                        }
                    }
                />
            </div>
        </Overlay>
    }
    .into_any()
}

/// Imperative access to a [`MessageDialog`].
#[derive(Clone, Copy)]
pub struct MessageDialogHandle {
    dialog: DialogHandle,
    text: RwSignal<String>,
}

impl MessageDialogHandle {
    pub fn new(button_text: impl Into<String>) -> Self {
        let button = DialogButton::new(CANCEL_TAG, button_text);
        Self {
            dialog: DialogHandle::from_model(DialogModel::new(vec![button]).unwrap_or_default()),
            text: RwSignal::new("Your message here".to_string()),
        }
    }

    /// Shows the message (replacing the text if given) and completes when
    /// the dialog closes.
    pub async fn show(&self, text: Option<String>) {
        if let Some(text) = text {
            self.text.set(text);
        }
        let dialog = self.dialog;
        dialog
            .show_then(move || dialog.focus_button(CANCEL_TAG))
            .await;
    }
}

impl Default for MessageDialogHandle {
    fn default() -> Self {
        Self::new("Okay")
    }
}

/// Dialog with a message and a single close button.
#[component]
pub fn MessageDialog(
    #[prop(optional)] handle: Option<MessageDialogHandle>,
    #[prop(optional, into)] text: Option<String>,
    #[prop(optional, into)] button_text: Option<String>,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    if let Some(text) = text {
        handle.text.set(text);
    }
    if let Some(button_text) = button_text {
        if let Err(err) = handle.dialog.set_button_text(CANCEL_TAG, button_text) {
            log::error!("message dialog: {err}");
        }
    }

    view! {
        <Dialog handle=handle.dialog title="Message">
            <div class="text">{move || handle.text.get()}</div>
        </Dialog>
    }
}

/// Imperative access to a [`ConfirmDialog`].
#[derive(Clone, Copy)]
pub struct ConfirmDialogHandle {
    dialog: DialogHandle,
    text: RwSignal<String>,
}

impl ConfirmDialogHandle {
    pub fn new() -> Self {
        Self {
            dialog: DialogHandle::default(),
            text: RwSignal::new("Text".to_string()),
        }
    }

    /// Shows the request, optionally replacing the text and button labels.
    /// Resolves to whether the user confirmed.
    pub async fn show(
        &self,
        text: Option<String>,
        cancel_text: Option<String>,
        okay_text: Option<String>,
    ) -> bool {
        if let Some(text) = text {
            self.text.set(text);
        }
        self.relabel(cancel_text, okay_text);
        let dialog = self.dialog;
        let tag = dialog.show_then(move || dialog.focus_button(OKAY_TAG)).await;
        tag == OKAY_TAG
    }

    fn relabel(&self, cancel_text: Option<String>, okay_text: Option<String>) {
        for (tag, text) in [(CANCEL_TAG, cancel_text), (OKAY_TAG, okay_text)] {
            if let Some(text) = text {
                if let Err(err) = self.dialog.set_button_text(tag, text) {
                    log::error!("confirm dialog: {err}");
                }
            }
        }
    }
}

impl Default for ConfirmDialogHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialog asking for confirmation, with `cancel` and `okay` buttons.
#[component]
pub fn ConfirmDialog(
    #[prop(optional)] handle: Option<ConfirmDialogHandle>,
    #[prop(optional, into)] text: Option<String>,
    #[prop(optional, into)] cancel_text: Option<String>,
    #[prop(optional, into)] okay_text: Option<String>,
) -> impl IntoView {
    let handle = handle.unwrap_or_default();
    if let Some(text) = text {
        handle.text.set(text);
    }
    handle.relabel(cancel_text, okay_text);

    view! {
        <Dialog handle=handle.dialog title="Confirm">
            <div class="text">{move || handle.text.get()}</div>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_text_defaults() {
        assert_eq!(title_text(None), "TITLE");
        assert_eq!(title_text(Some("Settings".to_string())), "Settings");
    }
}
