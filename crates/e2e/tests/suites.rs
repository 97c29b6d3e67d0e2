//! Shape checks for the CRUD scenario suites
//!
//! These run without a browser or backend: groups are built with fake
//! fixture records and their step sequences inspected.

use gantry_harness::{Action, Condition, FixtureSet, Record, RunId, ScenarioGroup};
use gantry_e2e::suites;

/// Bind a fake record to every alias the group requested
fn fake_fixtures(group: &ScenarioGroup) -> FixtureSet {
    let mut set = FixtureSet::new();
    for (i, request) in group.fixtures().iter().enumerate() {
        set.insert(
            &request.alias,
            Record {
                kind: request.kind,
                id: 100 + i as u64,
                name: format!("{}-run1", request.logical_name),
                description: None,
            },
        );
    }
    set
}

#[test]
fn suite_covers_all_entity_kinds() {
    let groups = suites::all();
    assert_eq!(groups.len(), 17);

    let placeholders: Vec<_> = groups.iter().filter(|g| g.is_placeholder()).collect();
    assert_eq!(placeholders.len(), 4);
}

#[test]
fn every_runnable_group_builds_valid_ordered_steps() {
    let run = RunId::fixed("run1");

    for group in suites::all() {
        if group.is_placeholder() {
            continue;
        }

        let fixtures = fake_fixtures(&group);
        let steps = group
            .build_steps(&fixtures, &run)
            .unwrap_or_else(|e| panic!("{} failed to build: {e}", group.name()));

        assert!(!steps.is_empty(), "{} has no steps", group.name());

        // Navigation happens before any element interaction.
        let first_interactive = steps.iter().position(|s| !s.selectors().is_empty());
        let first_navigate = steps
            .iter()
            .position(|s| matches!(s, Action::Navigate { .. }))
            .unwrap_or_else(|| panic!("{} never navigates", group.name()));
        if let Some(interactive) = first_interactive {
            assert!(
                first_navigate < interactive,
                "{} interacts before navigating",
                group.name()
            );
        }

        // Every journey ends in an observable outcome.
        assert!(
            matches!(
                steps.last().unwrap(),
                Action::Expect { .. } | Action::Screenshot { .. }
            ),
            "{} does not end in an assertion or capture",
            group.name()
        );

        for step in &steps {
            for selector in step.selectors() {
                selector
                    .validate()
                    .unwrap_or_else(|e| panic!("{}: {e}", group.name()));
            }
        }
    }
}

#[test]
fn create_and_edit_names_embed_the_run_id() {
    let run = RunId::fixed("42");

    for (filter, expected) in [
        ("create organization", "create-org-42"),
        ("edit organization", "edited-org-42"),
        ("create team", "create-team-42"),
        ("create job template", "create-jt-42"),
        ("edit job template", "edited-jt-42"),
    ] {
        let groups = suites::matching(filter);
        assert_eq!(groups.len(), 1, "filter {filter:?} is ambiguous");
        let group = &groups[0];

        let steps = group.build_steps(&fake_fixtures(group), &run).unwrap();
        let final_assert = steps.last().unwrap();
        match final_assert {
            Action::Expect {
                condition: Condition::TextEquals(text),
                ..
            } => assert_eq!(text, expected),
            other => panic!("{filter}: unexpected final step {other:?}"),
        }
    }
}

#[test]
fn list_404_groups_stub_before_navigating() {
    for filter in ["organizations list 404", "teams list 404"] {
        let groups = suites::matching(filter);
        let steps = groups[0]
            .build_steps(&FixtureSet::new(), &RunId::fixed("run1"))
            .unwrap();

        assert!(matches!(&steps[0], Action::StubRoute { status: 404, .. }));
        assert!(matches!(&steps[1], Action::Navigate { .. }));
        assert!(steps.iter().any(|s| matches!(
            s,
            Action::Expect { condition: Condition::TextEquals(t), .. } if t == "Not Found"
        )));
    }
}

#[test]
fn delete_groups_filter_to_one_row_before_deleting() {
    for (filter, checkbox) in [
        ("delete organization", "select-organization-100"),
        ("delete team", "select-team-100"),
        ("delete job template", "select-jobTemplate-100"),
    ] {
        let groups = suites::matching(filter);
        let group = &groups[0];
        let steps = group.build_steps(&fake_fixtures(group), &RunId::fixed("run1")).unwrap();

        let count_pos = steps
            .iter()
            .position(|s| matches!(s, Action::Expect { condition: Condition::CountEquals(1), .. }))
            .unwrap_or_else(|| panic!("{filter} never narrows the list"));
        let checkbox_pos = steps
            .iter()
            .position(|s| s.describe().contains(checkbox))
            .unwrap_or_else(|| panic!("{filter} never selects the row"));
        assert!(count_pos < checkbox_pos, "{filter} selects before filtering");

        assert!(matches!(
            steps.last().unwrap(),
            Action::Expect { condition: Condition::HasClass(c), .. } if c == "pf-c-empty-state__body"
        ));
    }
}

#[test]
fn job_template_create_uses_both_pickers_and_a_playbook() {
    let groups = suites::matching("create job template");
    let group = &groups[0];
    let steps = group.build_steps(&fake_fixtures(group), &RunId::fixed("run1")).unwrap();

    let described: Vec<String> = steps.iter().map(|s| s.describe()).collect();
    assert!(described.iter().any(|d| d.contains("#inventory-lookup")));
    assert!(described.iter().any(|d| d.contains("#project")));
    assert!(described.iter().any(|d| d == "select:#template-playbook"));

    // Two pickers mean two single-result assertions before the final name check.
    let singles = steps
        .iter()
        .filter(|s| matches!(s, Action::Expect { condition: Condition::CountEquals(1), .. }))
        .count();
    assert_eq!(singles, 2);
}

#[test]
fn placeholders_build_no_steps_and_stay_pending() {
    for group in suites::all().into_iter().filter(|g| g.is_placeholder()) {
        assert_eq!(group.status(), gantry_harness::ScenarioStatus::Pending);
        assert!(group
            .build_steps(&FixtureSet::new(), &RunId::fixed("run1"))
            .unwrap()
            .is_empty());
    }
}
