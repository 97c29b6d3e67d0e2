//! Shared DOM vocabulary for the console
//!
//! The console exposes stable attribute-based hooks: `aria-label` on
//! controls and list containers, element ids on form fields and per-row
//! checkboxes, `data-cy` on detail fields. Everything scenario suites
//! address lives here so a markup change lands in one place.

use gantry_harness::{Action, Condition, Record, Selector};

pub fn add_link() -> Selector {
    Selector::tag("a").and_attr("aria-label", "Add")
}

pub fn add_button() -> Selector {
    Selector::tag("button").and_attr("aria-label", "Add")
}

pub fn save_button() -> Selector {
    Selector::tag("button").and_attr("aria-label", "Save")
}

/// Name field on a record's detail view
pub fn detail_name() -> Selector {
    Selector::tag("dd").and_attr_contains("data-cy", "name")
}

pub fn not_found_title() -> Selector {
    Selector::tag("h1").and_attr_contains("class", "pf-c-title")
}

pub fn dashboard_link() -> Selector {
    Selector::tag("a").and_attr("href", "#/home")
}

pub fn error_detail_toggle() -> Selector {
    Selector::tag("button").and_attr("class", "pf-c-expandable__toggle")
}

pub fn error_detail_code() -> Selector {
    Selector::class("pf-c-expandable__content").descendant(Selector::tag("strong"))
}

pub fn empty_state_body() -> Selector {
    Selector::class("pf-c-empty-state").descendant(Selector::class("pf-c-empty-state__body"))
}

/// Search input on a list view
pub fn search_input() -> Selector {
    Selector::tag("input").and_attr_contains("aria-label", "Search")
}

/// Search input inside a related-record picker modal
pub fn picker_search_input() -> Selector {
    Selector::tag("input").and_attr_contains("aria-label", "Search text input")
}

/// Rows of a labelled list container
pub fn list_rows(list_label: &str) -> Selector {
    Selector::attr("aria-label", list_label).descendant(Selector::tag("li"))
}

/// A row's selection checkbox, keyed by record kind and id
pub fn row_checkbox(record: &Record) -> Selector {
    Selector::tag("input")
        .and_attr("id", format!("select-{}-{}", record.kind.checkbox_slug(), record.id))
        .and_attr("type", "checkbox")
        .enabled()
}

pub fn delete_button() -> Selector {
    Selector::tag("button").and_attr("aria-label", "Delete").enabled()
}

pub fn confirm_delete_button() -> Selector {
    Selector::tag("button").and_attr("aria-label", "confirm delete").enabled()
}

fn picker_row(record: &Record) -> Selector {
    Selector::id(format!("selected-{}", record.id))
}

fn picker_confirm(modal_label: &str) -> Selector {
    Selector::attr("aria-label", modal_label)
        .descendant(Selector::tag("button").and_attr_contains("class", "pf-m-primary"))
}

/// Related-record picker sub-protocol: open, search, assert exactly one
/// result, select it, confirm the selection.
pub fn pick_related(
    toggle: Selector,
    list_label: &str,
    modal_label: &str,
    record: &Record,
) -> Vec<Action> {
    vec![
        Action::click(toggle),
        Action::type_into(picker_search_input(), record.name.clone()),
        Action::press("Enter"),
        Action::expect(list_rows(list_label), Condition::CountEquals(1)),
        Action::click(picker_row(record)),
        Action::click(picker_confirm(modal_label)),
    ]
}

/// Delete-through-search: filter the list down to exactly the record,
/// select it, delete, confirm, and assert the filter's empty state.
pub fn delete_via_list(list_label: &str, record: &Record) -> Vec<Action> {
    vec![
        Action::type_into(search_input(), record.name.clone()),
        Action::press("Enter"),
        Action::expect(list_rows(list_label), Condition::CountEquals(1)),
        Action::click(row_checkbox(record)),
        Action::click(delete_button()),
        Action::click(confirm_delete_button()),
        Action::expect(
            empty_state_body(),
            Condition::HasClass("pf-c-empty-state__body".to_string()),
        ),
    ]
}

/// Shared steps asserting the Not Found view with its dashboard link
pub fn not_found_steps() -> Vec<Action> {
    vec![
        Action::expect(not_found_title(), Condition::TextEquals("Not Found".to_string())),
        Action::expect(
            dashboard_link(),
            Condition::TextEquals("Back to Dashboard.".to_string()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_harness::RecordKind;

    fn record(kind: RecordKind, id: u64) -> Record {
        Record {
            kind,
            id,
            name: format!("{}-{}", kind.checkbox_slug(), id),
            description: None,
        }
    }

    #[test]
    fn checkbox_selector_embeds_kind_and_id() {
        let sel = row_checkbox(&record(RecordKind::JobTemplate, 7));
        assert_eq!(
            sel.css(),
            "input[id=\"select-jobTemplate-7\"][type=\"checkbox\"]:enabled"
        );
    }

    #[test]
    fn picker_protocol_has_fixed_shape() {
        let org = record(RecordKind::Organization, 3);
        let steps = pick_related(Selector::id("organization"), "Organization List", "Select Organization", &org);

        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].describe(), "click:#organization");
        assert!(matches!(&steps[3], Action::Expect { condition: Condition::CountEquals(1), .. }));
        assert_eq!(steps[4].describe(), "click:#selected-3");
        assert_eq!(
            steps[5].describe(),
            "click:[aria-label=\"Select Organization\"] button[class*=\"pf-m-primary\"]"
        );
    }

    #[test]
    fn delete_flow_ends_in_empty_state() {
        let team = record(RecordKind::Team, 11);
        let steps = delete_via_list("Teams List", &team);

        assert_eq!(steps[2].describe(), "expect:[aria-label=\"Teams List\"] li count == 1");
        assert!(matches!(
            steps.last().unwrap(),
            Action::Expect { condition: Condition::HasClass(class), .. } if class == "pf-c-empty-state__body"
        ));
    }

    #[test]
    fn every_shared_selector_is_valid() {
        for sel in [
            add_link(),
            add_button(),
            save_button(),
            detail_name(),
            not_found_title(),
            dashboard_link(),
            error_detail_toggle(),
            error_detail_code(),
            empty_state_body(),
            search_input(),
            picker_search_input(),
            list_rows("Organizations List"),
            delete_button(),
            confirm_delete_button(),
        ] {
            sel.validate().unwrap();
        }
    }
}
