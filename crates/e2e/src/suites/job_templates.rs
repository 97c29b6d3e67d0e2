//! Job template CRUD scenarios
//!
//! The create form is the richest journey: two related-record pickers
//! (inventory and project) plus a playbook dropdown before save.

use gantry_harness::{Action, Condition, RecordKind, ScenarioGroup, Selector};

use super::ui;

pub fn scenarios() -> Vec<ScenarioGroup> {
    vec![
        detail_not_found(),
        ScenarioGroup::not_yet_specified("job template empty-list add button"),
        create(),
        edit(),
        delete(),
        ScenarioGroup::not_yet_specified("job template advanced search"),
        templates_snapshot(),
    ]
}

/// A nonexistent job template id renders Not Found with a dashboard link
fn detail_not_found() -> ScenarioGroup {
    ScenarioGroup::new("job template detail 404", |_, _| {
        let mut steps = vec![Action::navigate("/#/job_templates/999")];
        steps.extend(ui::not_found_steps());
        Ok(steps)
    })
    .for_kind(RecordKind::JobTemplate)
}

fn create() -> ScenarioGroup {
    ScenarioGroup::new("create job template", |fixtures, run| {
        let inv = fixtures.get("inv")?;
        let project = fixtures.get("project")?;
        let name = format!("create-jt-{run}");

        let mut steps = vec![
            Action::navigate("/#/templates"),
            Action::click(ui::add_button()),
            Action::click(Selector::tag("a").and_attr_contains("href", "/job_template/add/")),
            Action::type_into(Selector::id("template-name"), name.clone()),
            Action::type_into(
                Selector::id("template-description"),
                format!("Creation test for job templates. Run {run}"),
            ),
        ];
        steps.extend(ui::pick_related(
            Selector::id("inventory-lookup"),
            "Inventory List",
            "Select Inventory",
            inv,
        ));
        steps.extend(ui::pick_related(
            Selector::id("project"),
            "Project List",
            "Select Project",
            project,
        ));
        steps.push(Action::select_option(
            Selector::id("template-playbook"),
            "ping.yml",
        ));
        steps.push(Action::click(ui::save_button()));
        steps.push(Action::expect(ui::detail_name(), Condition::TextEquals(name)));
        Ok(steps)
    })
    .for_kind(RecordKind::JobTemplate)
    .with_fixture(RecordKind::Inventory, "create-jt-inv", "inv")
    .with_fixture(RecordKind::Project, "create-jt-pro", "project")
}

fn edit() -> ScenarioGroup {
    ScenarioGroup::new("edit job template", |fixtures, run| {
        let jt = fixtures.get("edit")?;
        let name = format!("edited-jt-{run}");
        Ok(vec![
            Action::navigate(format!("/#/templates/job_template/{}", jt.id)),
            Action::click(Selector::tag("a").and_attr("aria-label", "Edit")),
            Action::retype(Selector::id("template-name"), name.clone()),
            Action::retype(
                Selector::id("template-description"),
                format!("Edited test for job templates. Run {run}"),
            ),
            Action::click(ui::save_button()),
            Action::expect(ui::detail_name(), Condition::TextEquals(name)),
        ])
    })
    .for_kind(RecordKind::JobTemplate)
    .with_fixture(RecordKind::JobTemplate, "jt-to-edit", "edit")
}

fn delete() -> ScenarioGroup {
    ScenarioGroup::new("delete job template", |fixtures, _| {
        let jt = fixtures.get("del")?;
        let mut steps = vec![Action::navigate("/#/templates")];
        steps.extend(ui::delete_via_list("Templates List", jt));
        Ok(steps)
    })
    .for_kind(RecordKind::JobTemplate)
    .with_fixture(RecordKind::JobTemplate, "jt-to-delete", "del")
}

/// Capture the rendered templates list page (capture only, no comparison)
fn templates_snapshot() -> ScenarioGroup {
    ScenarioGroup::new("templates page snapshot", |_, _| {
        Ok(vec![
            Action::navigate("/#/templates"),
            Action::expect(ui::add_button(), Condition::CountEquals(1)),
            Action::screenshot("templates-page"),
        ])
    })
    .for_kind(RecordKind::JobTemplate)
}
