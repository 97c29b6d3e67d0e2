//! Team CRUD scenarios
//!
//! Team creation exercises the related-record picker: the form requires an
//! owning organization chosen through the searchable modal.

use gantry_harness::{Action, Condition, RecordKind, ScenarioGroup, Selector};

use super::ui;

pub fn scenarios() -> Vec<ScenarioGroup> {
    vec![
        list_not_found(),
        ScenarioGroup::not_yet_specified("team advanced search"),
        create(),
        edit(),
        delete(),
    ]
}

fn list_not_found() -> ScenarioGroup {
    ScenarioGroup::new("teams list 404", |_, _| {
        let mut steps = vec![
            Action::stub_route("**/api/v2/teams/*", 404),
            Action::navigate("/#/teams"),
        ];
        steps.extend(ui::not_found_steps());
        steps.push(Action::click(ui::error_detail_toggle()));
        steps.push(Action::expect(
            ui::error_detail_code(),
            Condition::TextEquals("404".to_string()),
        ));
        Ok(steps)
    })
    .for_kind(RecordKind::Team)
}

fn create() -> ScenarioGroup {
    ScenarioGroup::new("create team", |fixtures, run| {
        let org = fixtures.get("org")?;
        let name = format!("create-team-{run}");
        let mut steps = vec![
            Action::navigate("/#/teams"),
            Action::click(ui::add_link()),
            Action::type_into(Selector::id("team-name"), name.clone()),
            Action::type_into(
                Selector::id("team-description"),
                format!("Creation test for teams. Run {run}"),
            ),
        ];
        steps.extend(ui::pick_related(
            Selector::id("organization"),
            "Organization List",
            "Select Organization",
            org,
        ));
        steps.push(Action::click(ui::save_button()));
        steps.push(Action::expect(ui::detail_name(), Condition::TextEquals(name)));
        Ok(steps)
    })
    .for_kind(RecordKind::Team)
    .with_fixture(RecordKind::Organization, "organization-for-team", "org")
}

fn edit() -> ScenarioGroup {
    ScenarioGroup::new("edit team", |fixtures, run| {
        let team = fixtures.get("team")?;
        let name = format!("edited-team-{run}");
        Ok(vec![
            Action::navigate(format!("/#/teams/{}", team.id)),
            Action::click(Selector::tag("a").and_attr_contains("href", "edit")),
            Action::retype(Selector::id("team-name"), name.clone()),
            Action::retype(
                Selector::id("team-description"),
                format!("Edited test for teams. Run {run}"),
            ),
            Action::click(ui::save_button()),
            Action::expect(ui::detail_name(), Condition::TextEquals(name)),
        ])
    })
    .for_kind(RecordKind::Team)
    .with_fixture(RecordKind::Team, "team-to-edit", "team")
}

fn delete() -> ScenarioGroup {
    ScenarioGroup::new("delete team", |fixtures, _| {
        let team = fixtures.get("del")?;
        let mut steps = vec![Action::navigate("/#/teams")];
        steps.extend(ui::delete_via_list("Teams List", team));
        Ok(steps)
    })
    .for_kind(RecordKind::Team)
    .with_fixture(RecordKind::Team, "team-to-delete", "del")
}
