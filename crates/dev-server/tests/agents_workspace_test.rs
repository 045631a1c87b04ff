//! Integration tests for the agents workspace stores used together.

use dev_server::learnings::LearningStore;
use dev_server::paths::resolve_within;
use dev_server::tasks::TaskStore;
use dev_server::templates::{Instantiated, TemplateStore};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_workspace_round_trip() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let agents = root.join(".agents");

    let tasks = TaskStore::new(agents.join("tasks"));
    let created = tasks.add("Add snapshot tests", None).unwrap();
    assert!(created.file.starts_with(agents.join("tasks")));

    let learnings = LearningStore::new(agents.join("learnings"));
    learnings
        .add("decisions", "Snapshots are plain text", "Diffs stay readable.")
        .unwrap();

    fs::create_dir_all(agents.join("templates")).unwrap();
    fs::write(
        agents.join("templates/AGENTS.md"),
        "# {{crate}}\n\nSee the root AGENTS.md.\n",
    )
    .unwrap();
    let templates = TemplateStore::new(agents.join("templates"));
    let destination = resolve_within(root, "crates/parser/AGENTS.md").unwrap();
    let outcome = templates
        .instantiate(
            "AGENTS.md",
            &destination,
            &BTreeMap::from([("crate".to_string(), "parser".to_string())]),
        )
        .unwrap();
    assert_eq!(outcome, Instantiated::Created(destination.clone()));

    assert!(tasks.complete(&created.task_id).unwrap());
    let done = tasks.list(Some("completed")).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0]["title"], "Add snapshot tests");
    assert!(tasks.list(Some("pending")).unwrap().is_empty());

    let all = learnings.all().unwrap();
    assert!(all.contains("**Category:** decisions"));
    assert!(fs::read_to_string(destination).unwrap().starts_with("# parser\n"));
}

#[test]
fn test_hand_written_task_files_are_listed() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("tasks");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("refactor.md"),
        "---\ntitle: Refactor loader\nstatus: in_progress\nowner: agent-2\n---\n",
    )
    .unwrap();
    fs::write(dir.join("notes.md"), "# Just notes\n").unwrap();

    let tasks = TaskStore::new(&dir);
    let all = tasks.list(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], "notes");
    assert!(!all[0].contains_key("status"));
    assert_eq!(all[1]["owner"], "agent-2");

    assert!(tasks.complete("refactor").unwrap());
    assert!(tasks.complete("notes").unwrap());
    assert_eq!(tasks.list(Some("completed")).unwrap().len(), 2);
}
