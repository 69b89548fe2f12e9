//! Dialog on top of an [`Overlay`]: draggable title bar and a row of
//! action buttons, each with an optional async close hook.

use crate::error::{WidgetError, WidgetResult};
use crate::overlay::{CancelConfig, CancelDecision, CancelHook, Overlay, Showing};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Tag of the button consulted when the dialog is cancelled.
pub const CANCEL_TAG: &str = "cancel";
pub const OKAY_TAG: &str = "okay";

/// Decides whether a click on the button with the given tag closes the
/// dialog.
pub type ButtonCloseHook = Rc<dyn Fn(&str) -> LocalBoxFuture<'static, bool>>;

pub type DialogListener = Rc<dyn Fn(&DialogView)>;

/// Describes one dialog button.
#[derive(Clone, Serialize, Deserialize)]
pub struct DialogButton {
    pub tag: String,
    pub text: String,
    #[serde(skip)]
    pub close_hook: Option<ButtonCloseHook>,
    /// Initial disabled state, restored on every show.
    #[serde(default)]
    pub disabled: bool,
}

impl DialogButton {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            close_hook: None,
            disabled: false,
        }
    }

    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> LocalBoxFuture<'static, bool> + 'static,
    {
        self.close_hook = Some(Rc::new(hook));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn list_from_json(json: &str) -> WidgetResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            DialogButton::new(CANCEL_TAG, "Cancel"),
            DialogButton::new(OKAY_TAG, "Okay"),
        ]
    }
}

impl fmt::Debug for DialogButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogButton")
            .field("tag", &self.tag)
            .field("text", &self.text)
            .field("close_hook", &self.close_hook.is_some())
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// Rendered state of one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub tag: String,
    pub text: String,
    pub disabled: bool,
}

/// Snapshot handed to listeners after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogView {
    pub buttons: Vec<ButtonView>,
    pub translation: (f64, f64),
}

/// Title bar drag tracking. Pointer moves accumulate into a translation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    prev_x: f64,
    prev_y: f64,
    tx: f64,
    ty: f64,
    active: bool,
}

impl DragState {
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.prev_x = x;
        self.prev_y = y;
        self.active = true;
    }

    /// Returns the new translation while a drag is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.active {
            return None;
        }
        self.tx += x - self.prev_x;
        self.ty += y - self.prev_y;
        self.prev_x = x;
        self.prev_y = y;
        Some((self.tx, self.ty))
    }

    pub fn pointer_up(&mut self) {
        self.active = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.active
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }

    pub fn reset(&mut self) {
        *self = DragState::default();
    }
}

struct DialogState {
    buttons: Vec<(DialogButton, bool)>,
    drag: DragState,
    listeners: Vec<DialogListener>,
}

impl DialogState {
    fn position(&self, tag: &str) -> WidgetResult<usize> {
        self.buttons
            .iter()
            .position(|(b, _)| b.tag == tag)
            .ok_or_else(|| WidgetError::UnknownButton {
                tag: tag.to_string(),
            })
    }

    fn disabled_map(&self) -> Vec<(String, bool)> {
        self.buttons
            .iter()
            .map(|(b, disabled)| (b.tag.clone(), *disabled))
            .collect()
    }
}

#[derive(Clone)]
pub struct Dialog {
    overlay: Overlay,
    state: Rc<RefCell<DialogState>>,
}

impl Dialog {
    /// Dialogs are modal: Escape and the close button cancel, outside clicks
    /// do not.
    pub const CANCEL: CancelConfig = CancelConfig {
        key: true,
        button: true,
        click: false,
    };

    pub fn new(buttons: Vec<DialogButton>) -> WidgetResult<Self> {
        for (i, button) in buttons.iter().enumerate() {
            if buttons[..i].iter().any(|b| b.tag == button.tag) {
                return Err(WidgetError::DuplicateKey {
                    key: button.tag.clone(),
                });
            }
        }
        Ok(Self::build(buttons))
    }

    fn build(buttons: Vec<DialogButton>) -> Self {
        let state = Rc::new(RefCell::new(DialogState {
            buttons: buttons
                .into_iter()
                .map(|b| {
                    let disabled = b.disabled;
                    (b, disabled)
                })
                .collect(),
            drag: DragState::default(),
            listeners: Vec::new(),
        }));
        let overlay = Overlay::new(Self::CANCEL);
        overlay.set_cancel_hook(Some(cancel_hook(Rc::downgrade(&state))));
        Self { overlay, state }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Called after any change to button states, button text or the drag
    /// translation.
    pub fn subscribe(&self, listener: impl Fn(&DialogView) + 'static) {
        self.state.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn view(&self) -> DialogView {
        DialogView {
            buttons: self.buttons(),
            translation: self.translation(),
        }
    }

    pub fn set_button_text(&self, tag: &str, text: impl Into<String>) -> WidgetResult<()> {
        {
            let mut state = self.state.borrow_mut();
            let i = state.position(tag)?;
            state.buttons[i].0.text = text.into();
        }
        self.notify();
        Ok(())
    }

    pub fn buttons(&self) -> Vec<ButtonView> {
        self.state
            .borrow()
            .buttons
            .iter()
            .map(|(b, disabled)| ButtonView {
                tag: b.tag.clone(),
                text: b.text.clone(),
                disabled: *disabled,
            })
            .collect()
    }

    pub fn button(&self, tag: &str) -> Option<ButtonView> {
        self.buttons().into_iter().find(|b| b.tag == tag)
    }

    /// Disabled state of every button, in button order.
    pub fn get_buttons_disabled(&self) -> Vec<(String, bool)> {
        self.state.borrow().disabled_map()
    }

    /// With a map, applies it. Without one, disables every button and
    /// returns the states from before.
    pub fn set_buttons_disabled(
        &self,
        states: Option<&[(String, bool)]>,
    ) -> WidgetResult<Option<Vec<(String, bool)>>> {
        let previous = {
            let mut state = self.state.borrow_mut();
            match states {
                Some(states) => {
                    let positions = states
                        .iter()
                        .map(|(tag, disabled)| Ok((state.position(tag)?, *disabled)))
                        .collect::<WidgetResult<Vec<_>>>()?;
                    for (i, disabled) in positions {
                        state.buttons[i].1 = disabled;
                    }
                    None
                }
                None => {
                    let previous = state.disabled_map();
                    state.buttons.iter_mut().for_each(|(_, d)| *d = true);
                    Some(previous)
                }
            }
        };
        self.notify();
        Ok(previous)
    }

    /// Runs the button's close hook with every button disabled. Closes the
    /// dialog with the button's tag if the hook approves, otherwise restores
    /// the previous disabled states. Returns whether the dialog closed.
    pub async fn click(&self, tag: &str) -> WidgetResult<bool> {
        let hook = {
            let state = self.state.borrow();
            let i = state.position(tag)?;
            state.buttons[i].0.close_hook.clone()
        };
        let previous = self.set_buttons_disabled(None)?.unwrap_or_default();
        let should_close = match hook {
            Some(hook) => hook(tag).await,
            None => true,
        };
        if should_close && self.overlay.close(Some(tag)) {
            return Ok(true);
        }
        self.set_buttons_disabled(Some(&previous))?;
        Ok(false)
    }

    /// Shows the dialog. A fresh show restores every button's initial
    /// disabled state and resets the drag translation.
    pub fn show(&self) -> Showing {
        if !self.overlay.is_open() {
            {
                let mut state = self.state.borrow_mut();
                state
                    .buttons
                    .iter_mut()
                    .for_each(|(b, disabled)| *disabled = b.disabled);
                state.drag.reset();
            }
            self.notify();
        }
        self.overlay.show()
    }

    pub fn close(&self, value: Option<&str>) -> bool {
        self.overlay.close(value)
    }

    pub fn translation(&self) -> (f64, f64) {
        self.state.borrow().drag.translation()
    }

    pub fn pointer_down(&self, x: f64, y: f64) {
        self.state.borrow_mut().drag.pointer_down(x, y);
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let moved = self.state.borrow_mut().drag.pointer_move(x, y);
        if moved.is_some() {
            self.notify();
        }
        moved
    }

    pub fn pointer_up(&self) {
        self.state.borrow_mut().drag.pointer_up();
    }

    fn notify(&self) {
        let listeners = self.state.borrow().listeners.clone();
        let view = self.view();
        for listener in listeners {
            listener(&view);
        }
    }
}

impl Default for Dialog {
    /// `cancel` and `okay` buttons.
    fn default() -> Self {
        Self::build(DialogButton::defaults())
    }
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("overlay", &self.overlay)
            .field("buttons", &self.buttons())
            .finish()
    }
}

/// Cancelling consults the `cancel` button's hook and resolves with
/// `"cancel"`; a dialog without a cancel button just closes.
fn cancel_hook(state: Weak<RefCell<DialogState>>) -> CancelHook {
    Rc::new(move || {
        let cancel_button = state.upgrade().and_then(|state| {
            let state = state.borrow();
            let hook = state
                .buttons
                .iter()
                .find(|(b, _)| b.tag == CANCEL_TAG)
                .map(|(b, _)| b.close_hook.clone());
            hook
        });
        async move {
            match cancel_button {
                Some(Some(hook)) => CancelDecision {
                    close: hook(CANCEL_TAG).await,
                    value: Some(CANCEL_TAG.to_string()),
                },
                Some(None) => CancelDecision::close_with(CANCEL_TAG),
                None => CancelDecision::close(),
            }
        }
        .boxed_local()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{CancelSource, DEFAULT_CLOSE_TAG};
    use futures::executor::block_on;
    use std::cell::Cell;

    fn refusing(tag: &str) -> DialogButton {
        DialogButton::new(tag, tag).with_hook(|_| async { false }.boxed_local())
    }

    #[test]
    fn test_button_click_closes_with_tag() {
        let dialog = Dialog::new(DialogButton::defaults()).unwrap();
        let showing = dialog.show();
        assert_eq!(block_on(dialog.click(OKAY_TAG)), Ok(true));
        assert_eq!(block_on(showing.future), OKAY_TAG);
    }

    #[test]
    fn test_vetoed_click_restores_disabled_states() {
        let dialog = Dialog::new(vec![
            DialogButton::new("apply", "Apply").disabled(true),
            refusing("save"),
        ])
        .unwrap();
        dialog.show();

        let before = dialog.get_buttons_disabled();
        assert_eq!(block_on(dialog.click("save")), Ok(false));
        assert!(dialog.is_open());
        assert_eq!(dialog.get_buttons_disabled(), before);
    }

    #[test]
    fn test_buttons_disabled_while_hook_runs() {
        let observed = Rc::new(RefCell::new(Vec::new()));
        let dialog_cell: Rc<RefCell<Option<Dialog>>> = Rc::new(RefCell::new(None));

        let seen = observed.clone();
        let cell = dialog_cell.clone();
        let dialog = Dialog::new(vec![DialogButton::new("go", "Go").with_hook(move |_| {
            if let Some(dialog) = cell.borrow().as_ref() {
                *seen.borrow_mut() = dialog.get_buttons_disabled();
            }
            async { true }.boxed_local()
        })])
        .unwrap();
        *dialog_cell.borrow_mut() = Some(dialog.clone());

        dialog.show();
        assert_eq!(block_on(dialog.click("go")), Ok(true));
        assert_eq!(*observed.borrow(), vec![("go".to_string(), true)]);
        dialog_cell.borrow_mut().take();
    }

    #[test]
    fn test_set_buttons_disabled() {
        let dialog = Dialog::new(DialogButton::defaults()).unwrap();
        let previous = dialog.set_buttons_disabled(None).unwrap();
        assert_eq!(
            previous,
            Some(vec![
                ("cancel".to_string(), false),
                ("okay".to_string(), false)
            ])
        );
        assert!(dialog.buttons().iter().all(|b| b.disabled));

        dialog
            .set_buttons_disabled(Some(&[("okay".to_string(), false)]))
            .unwrap();
        assert_eq!(dialog.button("okay").map(|b| b.disabled), Some(false));
        assert_eq!(dialog.button("cancel").map(|b| b.disabled), Some(true));

        assert_eq!(
            dialog.set_buttons_disabled(Some(&[("nope".to_string(), true)])),
            Err(WidgetError::UnknownButton {
                tag: "nope".to_string()
            })
        );
        assert!(dialog.button("nope").is_none());
    }

    #[test]
    fn test_show_restores_initial_state() {
        let dialog = Dialog::new(vec![
            DialogButton::new("cancel", "Cancel"),
            DialogButton::new("okay", "Okay").disabled(true),
        ])
        .unwrap();
        dialog.set_buttons_disabled(None).unwrap();
        dialog.pointer_down(0.0, 0.0);
        dialog.pointer_move(5.0, 7.0);
        assert_eq!(dialog.translation(), (5.0, 7.0));

        dialog.show();
        assert_eq!(
            dialog.get_buttons_disabled(),
            vec![("cancel".to_string(), false), ("okay".to_string(), true)]
        );
        assert_eq!(dialog.translation(), (0.0, 0.0));
    }

    #[test]
    fn test_cancel_resolves_with_cancel_tag() {
        let dialog = Dialog::new(DialogButton::defaults()).unwrap();
        let showing = dialog.show();
        assert!(!block_on(dialog.overlay().cancel(CancelSource::Click)));
        assert!(block_on(dialog.overlay().cancel(CancelSource::Key)));
        assert_eq!(block_on(showing.future), CANCEL_TAG);
    }

    #[test]
    fn test_cancel_hook_veto() {
        let dialog = Dialog::new(vec![refusing(CANCEL_TAG)]).unwrap();
        dialog.show();
        assert!(!block_on(dialog.overlay().cancel(CancelSource::Button)));
        assert!(dialog.is_open());
    }

    #[test]
    fn test_cancel_without_cancel_button_uses_default_tag() {
        let dialog = Dialog::new(vec![DialogButton::new(OKAY_TAG, "Okay")]).unwrap();
        let showing = dialog.show();
        assert!(block_on(dialog.overlay().cancel(CancelSource::Key)));
        assert_eq!(block_on(showing.future), DEFAULT_CLOSE_TAG);
    }

    #[test]
    fn test_duplicate_tags_rejected() {
        let err = Dialog::new(vec![
            DialogButton::new("okay", "A"),
            DialogButton::new("okay", "B"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            WidgetError::DuplicateKey {
                key: "okay".to_string()
            }
        );
    }

    #[test]
    fn test_drag_accumulates_only_while_active() {
        let mut drag = DragState::default();
        assert_eq!(drag.pointer_move(3.0, 3.0), None);
        drag.pointer_down(10.0, 10.0);
        assert_eq!(drag.pointer_move(15.0, 8.0), Some((5.0, -2.0)));
        assert_eq!(drag.pointer_move(20.0, 8.0), Some((10.0, -2.0)));
        drag.pointer_up();
        assert!(!drag.is_dragging());
        drag.pointer_down(0.0, 0.0);
        assert_eq!(drag.pointer_move(1.0, 1.0), Some((11.0, -1.0)));
    }

    #[test]
    fn test_listener_notified_on_changes() {
        let dialog = Dialog::new(DialogButton::defaults()).unwrap();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        dialog.subscribe(move |_| counter.set(counter.get() + 1));
        dialog.set_buttons_disabled(None).unwrap();
        dialog.show();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_set_button_text() {
        let dialog = Dialog::new(DialogButton::defaults()).unwrap();
        let texts = Rc::new(RefCell::new(Vec::new()));
        let sink = texts.clone();
        dialog.subscribe(move |view| {
            sink.borrow_mut()
                .extend(view.buttons.iter().map(|b| b.text.clone()))
        });
        dialog.set_button_text(OKAY_TAG, "Delete").unwrap();
        assert_eq!(*texts.borrow(), vec!["Cancel", "Delete"]);
        assert!(dialog.set_button_text("other", "x").is_err());
    }

    #[test]
    fn test_default_dialog_has_cancel_and_okay() {
        let dialog = Dialog::default();
        let tags: Vec<_> = dialog.buttons().into_iter().map(|b| b.tag).collect();
        assert_eq!(tags, vec![CANCEL_TAG, OKAY_TAG]);
        assert_eq!(dialog.overlay().cancel_config(), Dialog::CANCEL);
    }

    #[test]
    fn test_buttons_from_json() {
        let buttons =
            DialogButton::list_from_json(r#"[{"tag":"cancel","text":"Nope","disabled":true}]"#)
                .unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].text, "Nope");
        assert!(buttons[0].disabled);
        assert!(buttons[0].close_hook.is_none());
    }
}
