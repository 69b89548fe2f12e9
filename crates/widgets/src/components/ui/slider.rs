use leptos::html;
use leptos::prelude::*;
use widget_contracts::slider::SliderState;

/// Range input. Values outside `[low_bound, high_bound]` snap back to the
/// last accepted value without notifying.
#[component]
pub fn Slider(
    #[prop(optional, into)] label: MaybeProp<String>,
    /// Input id, also used by the label and value output
    #[prop(into, default = "slider".to_string())]
    key: String,
    #[prop(default = 0.0)] min: f64,
    #[prop(default = 100.0)] max: f64,
    #[prop(default = 1.0)] step: f64,
    /// Lowest value that can be committed (defaults to `min`)
    #[prop(optional)]
    low_bound: Option<f64>,
    /// Highest value that can be committed (defaults to `max`)
    #[prop(optional)]
    high_bound: Option<f64>,
    #[prop(default = 50.0)] value: f64,
    /// Display the value as a rounded percentage of 1
    #[prop(optional)]
    percent: bool,
    #[prop(optional)] show_value: bool,
    /// Stack the value output under the label
    #[prop(optional)]
    compact: bool,
    #[prop(optional)] on_update: Option<Callback<f64>>,
) -> impl IntoView {
    let state = RwSignal::new(SliderState::new(
        min, max, step, low_bound, high_bound, value,
    ));
    let input_ref = NodeRef::<html::Input>::new();

    let on_input = move |_| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let candidate = input.value_as_number();
        let mut accepted = None;
        state.update(|s| accepted = s.commit(candidate));
        match accepted {
            Some(value) => {
                if let Some(cb) = on_update {
                    cb.run(value);
                }
            }
            None => input.set_value(&state.with_untracked(|s| s.value()).to_string()),
        }
    };

    let output = {
        let key = key.clone();
        move || {
            view! {
                <output for=key.clone()>
                    {move || state.with(|s| s.format_label(percent))}
                </output>
            }
        }
    };
    let output_in_label = output.clone();

    view! {
        <div class=if compact { "slider compact" } else { "slider" }>
            <span>
                <label for=key.clone()>
                    {move || label.get().unwrap_or_else(|| "LABEL".to_string())}
                    ":"
                </label>
                {(show_value && compact).then(output_in_label)}
            </span>
            <input
                node_ref=input_ref
                id=key
                type="range"
                min=min.to_string()
                max=max.to_string()
                step=step.to_string()
                prop:value=move || state.with(|s| s.value()).to_string()
                on:input=on_input
            />
            {(show_value && !compact).then(output)}
        </div>
    }
}
