//! Pixels-per-centimeter input.

use dioxus::prelude::*;

/// Props for the [`CalibrationInput`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CalibrationInputProps {
    /// Current calibration.
    value: f64,
    /// Called with each parsed value, valid or not; the session decides.
    on_change: EventHandler<f64>,
}

/// Numeric field for the calibration scale.
#[component]
pub fn CalibrationInput(props: CalibrationInputProps) -> Element {
    let value = props.value;
    rsx! {
        div { class: "field",
            label { r#for: "pixels-per-cm", "Calibration (pixels per cm)" }
            input {
                id: "pixels-per-cm",
                r#type: "number",
                min: "0",
                step: "0.1",
                value: "{value}",
                oninput: move |e| match e.value().parse::<f64>() {
                    Ok(v) => props.on_change.call(v),
                    Err(err) => {
                        web_sys::console::warn_1(
                            &format!("calibration parse failure: {err:?} from {:?}", e.value())
                                .into(),
                        );
                    }
                },
            }
            p { class: "muted",
                "Measure a reference object of known length in the photo to find this value."
            }
        }
    }
}
