//! Organization CRUD scenarios

use gantry_harness::{Action, Condition, RecordKind, ScenarioGroup, Selector};

use super::ui;

pub fn scenarios() -> Vec<ScenarioGroup> {
    vec![
        list_not_found(),
        ScenarioGroup::not_yet_specified("organization advanced search"),
        create(),
        edit(),
        delete(),
    ]
}

/// The organizations list renders Not Found when the backend answers 404
fn list_not_found() -> ScenarioGroup {
    ScenarioGroup::new("organizations list 404", |_, _| {
        let mut steps = vec![
            Action::stub_route("**/api/v2/organizations/*", 404),
            Action::navigate("/#/organizations"),
        ];
        steps.extend(ui::not_found_steps());
        steps.push(Action::click(ui::error_detail_toggle()));
        steps.push(Action::expect(
            ui::error_detail_code(),
            Condition::TextEquals("404".to_string()),
        ));
        Ok(steps)
    })
    .for_kind(RecordKind::Organization)
}

fn create() -> ScenarioGroup {
    ScenarioGroup::new("create organization", |_, run| {
        let name = format!("create-org-{run}");
        Ok(vec![
            Action::navigate("/#/organizations"),
            Action::click(ui::add_link()),
            Action::type_into(Selector::id("org-name"), name.clone()),
            Action::type_into(
                Selector::id("org-description"),
                format!("Creation test for organizations. Run {run}"),
            ),
            Action::click(ui::save_button()),
            Action::expect(ui::detail_name(), Condition::TextEquals(name)),
        ])
    })
    .for_kind(RecordKind::Organization)
}

fn edit() -> ScenarioGroup {
    ScenarioGroup::new("edit organization", |fixtures, run| {
        let org = fixtures.get("org")?;
        let name = format!("edited-org-{run}");
        Ok(vec![
            Action::navigate(format!("/#/organizations/{}", org.id)),
            Action::click(Selector::tag("a").and_attr(
                "href",
                format!("#/organizations/{}/edit", org.id),
            )),
            Action::retype(Selector::id("org-name"), name.clone()),
            Action::retype(
                Selector::id("org-description"),
                format!("Edited test for organizations. Run {run}"),
            ),
            Action::click(ui::save_button()),
            Action::expect(ui::detail_name(), Condition::TextEquals(name)),
        ])
    })
    .for_kind(RecordKind::Organization)
    .with_fixture(RecordKind::Organization, "organization-to-edit", "org")
}

fn delete() -> ScenarioGroup {
    ScenarioGroup::new("delete organization", |fixtures, _| {
        let org = fixtures.get("org")?;
        let mut steps = vec![Action::navigate("/#/organizations")];
        steps.extend(ui::delete_via_list("Organizations List", org));
        Ok(steps)
    })
    .for_kind(RecordKind::Organization)
    .with_fixture(RecordKind::Organization, "organization-to-delete", "org")
}
