use leptos::prelude::*;
use widget_contracts::WidgetError;

/// Logs a configuration error and renders it for the nearest
/// `ErrorBoundary`.
pub fn config_error(widget: &str, err: WidgetError) -> AnyView {
    log::error!("{widget}: {err}");
    Err::<(), WidgetError>(err).into_any()
}
