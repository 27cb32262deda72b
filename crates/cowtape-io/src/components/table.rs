//! Table of recorded measurements.

use cowtape_measure::MeasurementRow;
use dioxus::prelude::*;

/// Props for the [`MeasurementTable`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MeasurementTableProps {
    /// Rows in collection order.
    rows: Vec<MeasurementRow>,
}

/// Measurement name against value in centimeters, `-` when unset.
#[component]
pub fn MeasurementTable(props: MeasurementTableProps) -> Element {
    rsx! {
        table { class: "measurements",
            thead {
                tr {
                    th { "Measurement" }
                    th { "cm" }
                }
            }
            tbody {
                for row in props.rows.iter() {
                    tr { key: "{row.kind}",
                        td { "{row.kind}" }
                        td { class: "value", {row.display_value()} }
                    }
                }
            }
        }
    }
}
