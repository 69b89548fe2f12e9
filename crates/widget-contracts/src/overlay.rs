//! Overlay lifecycle: Closed → Open → Closed, one outstanding show at a
//! time, and cancellation that can be vetoed by an async hook.

use crate::error::WidgetResult;
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Value an overlay resolves with when closed without an explicit value.
pub const DEFAULT_CLOSE_TAG: &str = "ui_default_close";

/// Completion of a `show()`. Cloning it does not create a second show.
pub type CloseFuture = Shared<LocalBoxFuture<'static, String>>;

/// Async veto consulted before a cancel commits.
pub type CancelHook = Rc<dyn Fn() -> LocalBoxFuture<'static, CancelDecision>>;

pub type OverlayListener = Rc<dyn Fn(&OverlayEvent)>;

/// Which user gestures may cancel (hide) the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelConfig {
    /// Escape key.
    pub key: bool,
    /// The X close button.
    pub button: bool,
    /// A click outside the surface.
    pub click: bool,
}

impl CancelConfig {
    pub const fn all() -> Self {
        Self {
            key: true,
            button: true,
            click: true,
        }
    }

    pub fn from_json(json: &str) -> WidgetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn allows(&self, source: CancelSource) -> bool {
        match source {
            CancelSource::Key => self.key,
            CancelSource::Button => self.button,
            CancelSource::Click => self.click,
        }
    }
}

impl Default for CancelConfig {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelSource {
    Key,
    Button,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelDecision {
    pub close: bool,
    pub value: Option<String>,
}

impl CancelDecision {
    pub fn close() -> Self {
        Self {
            close: true,
            value: None,
        }
    }

    pub fn close_with(value: impl Into<String>) -> Self {
        Self {
            close: true,
            value: Some(value.into()),
        }
    }

    pub fn keep_open() -> Self {
        Self {
            close: false,
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    Opened,
    Closed(String),
}

/// Result of a `show()` call.
pub struct Showing {
    pub future: CloseFuture,
    /// False when the overlay was already open and the existing completion
    /// was handed back.
    pub opened: bool,
}

struct Pending {
    resolve: oneshot::Sender<String>,
    future: CloseFuture,
}

struct Inner {
    cancel: CancelConfig,
    pending: Option<Pending>,
    on_cancel: Option<CancelHook>,
    listeners: Vec<OverlayListener>,
}

/// Shared handle to one overlay's lifecycle state.
#[derive(Clone)]
pub struct Overlay {
    inner: Rc<RefCell<Inner>>,
}

impl Overlay {
    pub fn new(cancel: CancelConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                cancel,
                pending: None,
                on_cancel: None,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn cancel_config(&self) -> CancelConfig {
        self.inner.borrow().cancel
    }

    pub fn set_cancel_config(&self, cancel: CancelConfig) {
        self.inner.borrow_mut().cancel = cancel;
    }

    pub fn set_cancel_hook(&self, hook: Option<CancelHook>) {
        self.inner.borrow_mut().on_cancel = hook;
    }

    pub fn subscribe(&self, listener: impl Fn(&OverlayEvent) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    pub fn show(&self) -> Showing {
        if let Some(pending) = self.inner.borrow().pending.as_ref() {
            return Showing {
                future: pending.future.clone(),
                opened: false,
            };
        }

        let (resolve, receiver) = oneshot::channel::<String>();
        let future = receiver
            .map(|value| value.unwrap_or_else(|_| DEFAULT_CLOSE_TAG.to_string()))
            .boxed_local()
            .shared();
        self.inner.borrow_mut().pending = Some(Pending {
            resolve,
            future: future.clone(),
        });
        log::debug!("overlay opened");
        self.notify(&OverlayEvent::Opened);

        Showing {
            future,
            opened: true,
        }
    }

    /// Closes the overlay and resolves the outstanding show with `value`
    /// (or [`DEFAULT_CLOSE_TAG`]). Returns false if it was not open.
    pub fn close(&self, value: Option<&str>) -> bool {
        let Some(pending) = self.inner.borrow_mut().pending.take() else {
            return false;
        };
        let value = value.unwrap_or(DEFAULT_CLOSE_TAG).to_string();
        log::debug!("overlay closed with '{value}'");
        // Nobody awaiting the completion is not an error.
        let _ = pending.resolve.send(value.clone());
        self.notify(&OverlayEvent::Closed(value));
        true
    }

    /// Handles a cancel gesture. Returns whether the overlay closed.
    pub async fn cancel(&self, source: CancelSource) -> bool {
        let hook = {
            let inner = self.inner.borrow();
            if inner.pending.is_none() || !inner.cancel.allows(source) {
                return false;
            }
            inner.on_cancel.clone()
        };
        let decision = match hook {
            Some(hook) => hook().await,
            None => CancelDecision::close(),
        };
        if !decision.close {
            log::debug!("overlay cancel ({source:?}) vetoed");
            return false;
        }
        self.close(decision.value.as_deref())
    }

    fn notify(&self, event: &OverlayEvent) {
        let listeners = self.inner.borrow().listeners.clone();
        for listener in listeners {
            listener(event);
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(CancelConfig::default())
    }
}

impl fmt::Debug for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Overlay")
            .field("cancel", &inner.cancel)
            .field("open", &inner.pending.is_some())
            .field("has_cancel_hook", &inner.on_cancel.is_some())
            .finish()
    }
}

/// Viewport rectangle of the overlay surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Placement of the overlay surface.
///
/// Modal overlays are centered by the browser and moved by a translation;
/// non-modal ones are pinned at `x`/`y` in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGeometry {
    pub modal: bool,
    pub x: String,
    pub y: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub tx: f64,
    pub ty: f64,
}

impl OverlayGeometry {
    pub fn surface_style(&self) -> String {
        let mut style = if self.modal {
            format!("translate: {}px {}px;", self.tx, self.ty)
        } else {
            format!("left: {}; top: {}; margin: 0;", self.x, self.y)
        };
        if let Some(width) = &self.width {
            style.push_str(&format!(" width: {width};"));
        }
        if let Some(height) = &self.height {
            style.push_str(&format!(" height: {height};"));
        }
        style
    }
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            modal: false,
            x: "0".to_string(),
            y: "0".to_string(),
            width: None,
            height: None,
            tx: 0.0,
            ty: 0.0,
        }
    }
}
