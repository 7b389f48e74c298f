// tests/workflows.rs

mod common;
use crate::common::{at, SyncConfigBuilder};

use chrono::{FixedOffset, TimeZone};

use vaultsync::engine::workflows::{
    backup_branch_name, commit_message, publish_chain, reconcile_chain,
};

fn lines(chain: &vaultsync::chain::ProcessChain) -> Vec<String> {
    chain.commands().iter().map(|c| c.to_string()).collect()
}

#[test]
fn reconcile_chain_has_the_six_steps_in_order() {
    let cfg = SyncConfigBuilder::new().branch("notes").remote("upstream").build();
    let started = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 7, 9, 5, 2)
        .unwrap();

    let chain = reconcile_chain(&cfg, &started);

    assert_eq!(
        lines(&chain),
        vec![
            "git stash",
            "git checkout notes",
            "git branch localbackup/notes@07-03-2026-09-05-02",
            "git fetch upstream notes",
            "git reset --hard upstream/notes",
            "git stash pop",
        ]
    );
    assert!(chain.commands().iter().all(|c| c.program == "git"));
}

#[test]
fn backup_branch_uses_the_given_offset() {
    let started = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 12, 31, 23, 59, 59)
        .unwrap();
    assert_eq!(
        backup_branch_name("main", &started),
        "localbackup/main@31-12-2026-23-59-59"
    );
}

#[test]
fn publish_chain_embeds_file_name_and_utc_time() {
    let cfg = SyncConfigBuilder::new().build();
    let now = at(0);

    let chain = publish_chain(&cfg, "Daily note.md", now);
    let cmds = chain.commands();

    assert_eq!(cmds.len(), 3);
    assert_eq!(cmds[0].args, vec!["add", "."]);
    assert_eq!(cmds[1].args[0], "commit");
    assert_eq!(cmds[1].args[1], "-m");
    assert_eq!(cmds[1].args[2], commit_message("Daily note.md", now));
    assert_eq!(cmds[2].args, vec!["push", "origin", "main"]);
}

#[test]
fn commit_message_format() {
    // 1_760_000_000 = Thu, 09 Oct 2025 08:53:20 UTC
    assert_eq!(
        commit_message("todo.md", at(0)),
        "todo.md@Thu, 09 Oct 2025 08:53:20 UTC"
    );
}

#[test]
fn commit_message_is_a_single_argument() {
    let cfg = SyncConfigBuilder::new().build();
    let chain = publish_chain(&cfg, "with space.md", at(0));
    let commit = &chain.commands()[1];
    assert_eq!(commit.args.len(), 3);
    assert!(commit.to_string().starts_with("git commit -m \"with space.md@"));
}
