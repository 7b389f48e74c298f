// tests/integration/change_filter.rs

use notify::event::{AccessKind, AccessMode, CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};
use tokio::sync::mpsc;

use vaultsync::engine::SyncEvent;
use vaultsync::watch::{is_change_kind, process_event, ChangeFilter};

#[test]
fn git_internals_never_match() {
    let filter = ChangeFilter::new(&[]).unwrap();
    assert!(!filter.matches(".git/index"));
    assert!(!filter.matches(".git/refs/heads/main"));
    assert!(!filter.matches("sub/.git/HEAD"));
    assert!(filter.matches("notes/.gitkeep"));
    assert!(filter.matches("Daily.md"));
    assert!(!filter.matches(""));
}

#[test]
fn exclude_globs_are_honoured() {
    let filter = ChangeFilter::new(&[
        ".obsidian/workspace*.json".to_string(),
        "**/*.tmp".to_string(),
    ])
    .unwrap();
    assert!(!filter.matches(".obsidian/workspace.json"));
    assert!(!filter.matches("drafts/x.tmp"));
    assert!(filter.matches(".obsidian/app.json"));
}

#[test]
fn change_kinds() {
    assert!(is_change_kind(&EventKind::Create(CreateKind::File)));
    assert!(is_change_kind(&EventKind::Modify(ModifyKind::Any)));
    assert!(is_change_kind(&EventKind::Modify(ModifyKind::Name(RenameMode::Both))));
    assert!(is_change_kind(&EventKind::Remove(RemoveKind::File)));
    assert!(is_change_kind(&EventKind::Access(AccessKind::Close(AccessMode::Write))));
    assert!(!is_change_kind(&EventKind::Access(AccessKind::Open(AccessMode::Any))));
    assert!(!is_change_kind(&EventKind::Access(AccessKind::Close(AccessMode::Read))));
}

#[tokio::test]
async fn events_become_file_changed_with_the_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    std::fs::create_dir_all(root.join("notes")).unwrap();
    std::fs::write(root.join("notes/today.md"), "x").unwrap();

    let filter = ChangeFilter::new(&[]).unwrap();
    let (tx, mut rx) = mpsc::channel(8);

    let event = Event::new(EventKind::Modify(ModifyKind::Any))
        .add_path(root.join("notes/today.md"))
        .add_path(root.join(".git/index"));
    assert!(process_event(&root, event, &filter, &tx).await);
    drop(tx);

    let mut names = Vec::new();
    while let Some(ev) = rx.recv().await {
        match ev {
            SyncEvent::FileChanged { file_name } => names.push(file_name),
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(names, vec!["today.md"]);
}

#[tokio::test]
async fn non_change_events_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let filter = ChangeFilter::new(&[]).unwrap();
    let (tx, mut rx) = mpsc::channel(8);

    let event = Event::new(EventKind::Access(AccessKind::Open(AccessMode::Any)))
        .add_path(root.join("a.md"));
    assert!(process_event(&root, event, &filter, &tx).await);
    drop(tx);

    assert!(rx.recv().await.is_none());
}
