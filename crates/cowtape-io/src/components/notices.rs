//! Feedback messages from the last action.

use cowtape_measure::{Level, Notice};
use dioxus::prelude::*;

const fn level_class(level: Level) -> &'static str {
    match level {
        Level::Success => "notice notice-success",
        Level::Info => "notice notice-info",
        Level::Warning => "notice notice-warning",
        Level::Error => "notice notice-error",
    }
}

/// Props for the [`NoticeList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct NoticeListProps {
    /// Notices to show, oldest first.
    notices: Vec<Notice>,
}

/// Stack of notices styled by level.
#[component]
pub fn NoticeList(props: NoticeListProps) -> Element {
    rsx! {
        div { class: "notices", role: "status",
            for (i, notice) in props.notices.iter().enumerate() {
                p { key: "{i}", class: level_class(notice.level), "{notice}" }
            }
        }
    }
}
