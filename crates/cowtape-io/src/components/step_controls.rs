//! Current step prompt with register and reset buttons.

use cowtape_measure::MeasurementStep;
use dioxus::prelude::*;

/// Props for the [`StepControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StepControlsProps {
    /// Step the next registration applies to.
    step: MeasurementStep,
    /// Drawing instruction for the step, `None` once done.
    instruction: Option<&'static str>,
    /// Objects currently on the drawing surface.
    object_count: usize,
    /// Register the latest drawing.
    on_register: EventHandler<()>,
    /// Clear every measurement.
    on_reset: EventHandler<()>,
}

/// Step banner and the two session actions.
///
/// Register stays enabled when nothing is drawn so the user gets the
/// session's explanation instead of a dead button.
#[component]
pub fn StepControls(props: StepControlsProps) -> Element {
    let done = props.step == MeasurementStep::Done;
    let step = props.step;
    let objects = objects_label(props.object_count);

    rsx! {
        div { class: "step-controls",
            h2 { class: if done { "step step-done" } else { "step" }, "{step}" }
            if let Some(instruction) = props.instruction {
                p { "{instruction}" }
            }
            p { class: "muted", "{objects}" }
            div { class: "button-row",
                button {
                    class: "btn btn-primary",
                    disabled: done,
                    onclick: move |_| props.on_register.call(()),
                    "Register measurement"
                }
                button {
                    class: "btn",
                    onclick: move |_| props.on_reset.call(()),
                    "Reset all measurements"
                }
            }
        }
    }
}

fn objects_label(count: usize) -> String {
    format!("Detected objects on canvas: {count}")
}
