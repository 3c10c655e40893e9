// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::parse::CHANGESET_TEMPLATE;
use super::repo::{HGRC, PATCHES_DIR, PATCHES_HG_DIR, PATCHES_HGRC};
use super::testing::FakeHg;
use super::{Changeset, HgExecutor, Repository};
use crate::error::{HgError, SynchgError};

const IDENTITY: &str = "0123456789ab default\n";

fn repo_with_remote() -> (FakeHg, Repository<FakeHg>) {
    let fake = FakeHg::new("local");
    fake.respond("id -i -b", IDENTITY);
    let repo = Repository::new(fake.clone()).with_remote_name("host");
    (fake, repo)
}

fn is_missing_remote(err: &SynchgError) -> bool {
    matches!(err, SynchgError::Hg(e) if matches!(**e, HgError::MissingRemote { .. }))
}

// --- Identity ---

#[test]
fn test_identity_is_queried_once() {
    let (fake, mut repo) = repo_with_remote();

    assert_eq!(repo.current_rev().unwrap(), "0123456789ab");
    assert_eq!(repo.branch().unwrap(), "default");

    assert_eq!(fake.commands(), vec!["hg qapplied", "hg id -i -b"]);
}

#[test]
fn test_identity_is_read_with_patches_popped() {
    let (fake, mut repo) = repo_with_remote();
    fake.respond("qapplied", "first.patch\nsecond.patch\n");

    repo.identity().unwrap();

    assert_eq!(
        fake.commands(),
        vec!["hg qapplied", "hg qpop -a", "hg id -i -b", "hg qpush second.patch"]
    );
}

#[test]
fn test_identity_parse_failure_still_restores_patches() {
    let fake = FakeHg::new("local");
    fake.respond("qapplied", "wip.patch\n");
    fake.respond("id -i -b", "not an identity\n");
    let mut repo = Repository::new(fake.clone());

    let err = repo.identity().unwrap_err();

    assert!(
        matches!(err, SynchgError::Hg(ref e) if matches!(**e, HgError::IdentityParse { .. })),
        "unexpected error: {err}"
    );
    assert_eq!(
        fake.commands(),
        vec!["hg qapplied", "hg qpop -a", "hg id -i -b", "hg qpush wip.patch"]
    );
}

// --- Summary ---

#[test]
fn test_summary_counts() {
    let fake = FakeHg::new("local");
    fake.respond("summary", "parent: 1:0123456789ab\ncommit: 2 modified, 1 unknown\nmq: 1 applied\n");
    let repo = Repository::new(fake);

    let summary = repo.summary().unwrap();
    assert_eq!(summary.commit.modified, 2);
    assert_eq!(summary.commit.unknown, 1);
    assert_eq!(summary.mq.applied, 1);
    assert_eq!(summary.mq.unapplied, 0);
}

// --- Outgoing / incoming ---

#[test]
fn test_outgoings_without_remote_fails_before_running_hg() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    let err = repo.outgoings().unwrap_err();
    assert!(is_missing_remote(&err), "unexpected error: {err}");
    let err = repo.incomings().unwrap_err();
    assert!(is_missing_remote(&err), "unexpected error: {err}");
    let err = repo.push_to_remote().unwrap_err();
    assert!(is_missing_remote(&err), "unexpected error: {err}");

    assert!(fake.commands().is_empty());
}

#[test]
fn test_outgoings_command_line() {
    let (fake, mut repo) = repo_with_remote();
    fake.respond(
        "outgoing",
        "comparing with host\nsearching for changes\n\
         aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa add feature\n",
    );

    let outgoing = repo.outgoings().unwrap();

    assert_eq!(
        outgoing,
        vec![Changeset::new("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "add feature")]
    );
    let expected = format!("hg outgoing -b default -r 0123456789ab --template {CHANGESET_TEMPLATE} host");
    assert_eq!(fake.commands().last(), Some(&expected));
}

#[test]
fn test_incomings_command_line() {
    let (fake, mut repo) = repo_with_remote();

    repo.incomings().unwrap();

    let expected = format!("hg incoming -b default --template {CHANGESET_TEMPLATE} host");
    assert_eq!(fake.commands().last(), Some(&expected));
}

#[test]
fn test_list_exit_one_is_empty() {
    let (fake, mut repo) = repo_with_remote();
    fake.fail("outgoing", 1);
    fake.fail("incoming", 1);

    assert!(repo.outgoings().unwrap().is_empty());
    assert!(repo.incomings().unwrap().is_empty());
}

#[test]
fn test_list_other_exit_codes_propagate() {
    let (fake, mut repo) = repo_with_remote();
    fake.fail("outgoing", 255);

    let err = repo.outgoings().unwrap_err();
    assert_eq!(err.hg_exit_code(), Some(255));
}

#[test]
fn test_list_short_output_is_a_parse_error() {
    let (fake, mut repo) = repo_with_remote();
    fake.respond("incoming", "comparing with host\n");

    let err = repo.incomings().unwrap_err();
    assert!(
        matches!(err, SynchgError::Hg(ref e) if matches!(**e, HgError::ListParse { .. })),
        "unexpected error: {err}"
    );
}

// --- Patch queue ---

#[test]
fn test_last_applied_patch_sentinels() {
    for code in [1, 255] {
        let fake = FakeHg::new("local");
        fake.fail("qapplied", code);
        let repo = Repository::new(fake);
        assert_eq!(repo.last_applied_patch().unwrap(), None, "exit code {code}");
    }

    let fake = FakeHg::new("local");
    fake.fail("qapplied", 2);
    let repo = Repository::new(fake);
    assert_eq!(repo.last_applied_patch().unwrap_err().hg_exit_code(), Some(2));
}

#[test]
fn test_last_applied_patch_is_top_of_stack() {
    let fake = FakeHg::new("local");
    fake.respond("qapplied", "one.patch\ntwo.patch\nthree.patch\n");
    let repo = Repository::new(fake.clone());

    assert_eq!(repo.last_applied_patch().unwrap().as_deref(), Some("three.patch"));
    assert_eq!(fake.commands(), vec!["hg qapplied"]);
}

#[test]
fn test_pop_patch_with_nothing_applied_is_a_no_op() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    repo.pop_patch(None).unwrap();
    repo.pop_patch(Some("x.patch")).unwrap();

    assert_eq!(fake.commands(), vec!["hg qapplied", "hg qapplied"]);
}

#[test]
fn test_pop_and_push_patch() {
    let fake = FakeHg::new("local");
    fake.respond("qapplied", "a.patch\n");
    let mut repo = Repository::new(fake.clone());

    repo.pop_patch(None).unwrap();
    repo.pop_patch(Some("a.patch")).unwrap();
    repo.push_patch(None).unwrap();
    repo.push_patch(Some("a.patch")).unwrap();

    assert_eq!(
        fake.commands(),
        vec![
            "hg qapplied",
            "hg qpop -a",
            "hg qapplied",
            "hg qpop a.patch",
            "hg qpush -a",
            "hg qpush a.patch",
        ]
    );
}

#[test]
fn test_clean_mq_guard_restores_on_drop() {
    let fake = FakeHg::new("local");
    fake.respond("qapplied", "top.patch\n");
    let mut repo = Repository::new(fake.clone());

    {
        let guard = repo.clean_mq().unwrap();
        assert_eq!(guard.restores(), Some("top.patch"));
    }

    assert_eq!(fake.commands(), vec!["hg qapplied", "hg qpop -a", "hg qpush top.patch"]);
}

#[test]
fn test_clean_mq_failed_restore_is_reported_by_finish() {
    let fake = FakeHg::new("local");
    fake.respond("qapplied", "top.patch\n");
    fake.fail("qpush", 2);
    let mut repo = Repository::new(fake.clone());

    let guard = repo.clean_mq().unwrap();
    let err = guard.finish().unwrap_err();

    assert_eq!(err.hg_exit_code(), Some(2));
    assert_eq!(fake.commands(), vec!["hg qapplied", "hg qpop -a", "hg qpush top.patch"]);
}

#[test]
fn test_nested_clean_mq_restores_once() {
    let fake = FakeHg::new("local");
    fake.respond("qapplied", "top.patch\n");
    fake.respond("qapplied", "");
    let mut repo = Repository::new(fake.clone());

    repo.with_clean_mq(|outer| {
        outer.with_clean_mq(|_| Ok(()))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        fake.commands(),
        vec!["hg qapplied", "hg qpop -a", "hg qapplied", "hg qpush top.patch"]
    );
}

#[test]
fn test_commit_mq_tolerates_nothing_changed() {
    let fake = FakeHg::new("local");
    fake.fail("commit", 1);
    let mut repo = Repository::new(fake.clone());

    repo.commit_mq(None).unwrap();
    assert_eq!(fake.commands(), vec!["hg commit --mq -m synchg: patch queue sync"]);

    let fake = FakeHg::new("local");
    fake.fail("commit", 3);
    let mut repo = Repository::new(fake);
    assert_eq!(repo.commit_mq(Some("msg")).unwrap_err().hg_exit_code(), Some(3));
}

#[test]
fn test_push_mq_tolerates_nothing_to_push() {
    let (fake, mut repo) = repo_with_remote();
    fake.fail("push --mq host", 1);

    repo.push_mq_to_remote().unwrap();
    assert_eq!(fake.commands(), vec!["hg push --mq host"]);

    let (fake, mut repo) = repo_with_remote();
    fake.fail("push --mq host", 255);
    let err = repo.push_mq_to_remote().unwrap_err();
    assert_eq!(err.hg_exit_code(), Some(255));
}

#[test]
fn test_simple_patch_queue_commands() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    repo.update_mq().unwrap();
    repo.refresh_mq().unwrap();
    repo.init_mq().unwrap();

    assert_eq!(fake.commands(), vec!["hg update --mq", "hg qrefresh", "hg qinit -c"]);
}

// --- Mutations ---

#[test]
fn test_push_to_remote_command_line() {
    let (fake, mut repo) = repo_with_remote();

    repo.push_to_remote().unwrap();

    assert_eq!(
        fake.commands().last().map(String::as_str),
        Some("hg push -b default -r 0123456789ab host")
    );
}

#[test]
fn test_strip_empty_is_a_no_op() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    repo.strip(&[]).unwrap();
    assert!(fake.commands().is_empty());
}

#[test]
fn test_strip_issues_one_command_in_order() {
    let (fake, mut repo) = repo_with_remote();
    repo.current_rev().unwrap();

    repo.strip(&[Changeset::new("bbbb", "second"), Changeset::new("aaaa", "first")])
        .unwrap();
    repo.current_rev().unwrap();

    assert_eq!(
        fake.commands(),
        vec![
            "hg qapplied",
            "hg id -i -b",
            "hg qapplied",
            "hg strip bbbb aaaa",
            "hg qapplied",
            "hg id -i -b",
        ]
    );
}

#[test]
fn test_update_accepts_revisions_and_invalidates_identity() {
    let (fake, mut repo) = repo_with_remote();
    repo.current_rev().unwrap();

    repo.update("fedcba987654").unwrap();
    repo.update(&Changeset::new("aaaaaaaaaaaa", "x")).unwrap();
    repo.current_rev().unwrap();

    let commands = fake.commands();
    assert!(commands.contains(&"hg update fedcba987654".to_string()));
    assert!(commands.contains(&"hg update aaaaaaaaaaaa".to_string()));
    assert_eq!(commands.iter().filter(|c| *c == "hg id -i -b").count(), 2);
}

#[test]
fn test_clone_with_patch_queue_links_both_configs() {
    let (fake, mut repo) = repo_with_remote();
    fake.with_path(PATCHES_DIR).with_path(PATCHES_HG_DIR);

    repo.clone_to("ssh://host/src/repo", true).unwrap();

    assert_eq!(
        fake.commands(),
        vec![
            "hg qapplied",
            "hg clone . ssh://host/src/repo",
            "hg clone .hg/patches ssh://host/src/repo/.hg/patches",
        ]
    );
    assert_eq!(
        repo.remotes().unwrap().get("host").map(String::as_str),
        Some("ssh://host/src/repo")
    );
    assert_eq!(
        repo.mq_remotes().unwrap().get("host").map(String::as_str),
        Some("ssh://host/src/repo/.hg/patches")
    );
}

#[test]
fn test_clone_without_patch_queue_or_link() {
    let (fake, mut repo) = repo_with_remote();

    repo.clone_to("ssh://host/src/repo", false).unwrap();

    assert_eq!(fake.commands(), vec!["hg qapplied", "hg clone . ssh://host/src/repo"]);
    assert_eq!(fake.file(HGRC), None);
    assert_eq!(fake.file(PATCHES_HGRC), None);
}

#[test]
fn test_clone_mq_only() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    repo.clone_mq_to("ssh://host/src/repo").unwrap();

    assert_eq!(
        fake.commands(),
        vec!["hg clone .hg/patches ssh://host/src/repo/.hg/patches"]
    );
}

#[test]
fn test_repository_layout_checks() {
    let fake = FakeHg::new("remote");
    let repo = Repository::new(fake.clone());
    assert!(!repo.root_exists().unwrap());
    assert!(!repo.is_repository().unwrap());
    assert!(!repo.has_patch_queue().unwrap());

    fake.with_path(".").with_path(".hg").with_path(PATCHES_DIR);
    assert!(repo.root_exists().unwrap());
    assert!(repo.is_repository().unwrap());
    assert!(repo.has_patch_queue().unwrap());
    assert!(!repo.is_mq_versioned().unwrap());
}

// --- hgrc ---

#[test]
fn test_add_remote_creates_file_and_section() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    assert!(repo.remotes().unwrap().is_empty());
    repo.add_remote("host", "ssh://host/src/repo").unwrap();

    insta::assert_snapshot!(fake.file(HGRC).unwrap_or_default().trim_end(), @r"
    [paths]
    host = ssh://host/src/repo
    ");
}

#[test]
fn test_add_remote_preserves_other_sections() {
    let fake = FakeHg::new("local");
    fake.with_file(
        HGRC,
        "[ui]\nusername = Someone <someone@example.com>\n\n[paths]\ndefault = https://example.com/repo\n",
    );
    let mut repo = Repository::new(fake.clone());

    repo.add_remote("host", "ssh://host//srv/repo").unwrap();

    let text = fake.file(HGRC).unwrap_or_default();
    assert!(text.contains("[ui]"), "{text}");
    assert!(text.contains("username = Someone <someone@example.com>"), "{text}");

    let remotes = Repository::new(fake).remotes().unwrap();
    assert_eq!(remotes.get("default").map(String::as_str), Some("https://example.com/repo"));
    assert_eq!(remotes.get("host").map(String::as_str), Some("ssh://host//srv/repo"));
}

#[test]
fn test_add_remote_keeps_continuation_lines() {
    let fake = FakeHg::new("local");
    fake.with_file(
        HGRC,
        "[paths]\ndefault = https://example.com/repo\n\n[hooks]\nchangegroup = echo one\n  echo two\n",
    );
    let mut repo = Repository::new(fake.clone());

    repo.add_remote("host", "ssh://host//srv/repo").unwrap();

    insta::assert_snapshot!(fake.file(HGRC).unwrap_or_default().trim_end(), @r"
    [paths]
    default = https://example.com/repo
    host = ssh://host//srv/repo

    [hooks]
    changegroup = echo one
      echo two
    ");
}

#[test]
fn test_add_remote_keeps_include_directives() {
    let fake = FakeHg::new("local");
    fake.with_file(
        HGRC,
        "%include ~/.hgrc.shared\n[paths]\ndefault = https://example.com/repo\n",
    );
    let mut repo = Repository::new(fake.clone());

    assert_eq!(
        repo.remotes().unwrap().get("default").map(String::as_str),
        Some("https://example.com/repo")
    );
    repo.add_remote("host", "ssh://host//srv/repo").unwrap();

    let text = fake.file(HGRC).unwrap_or_default();
    assert_eq!(
        text,
        "%include ~/.hgrc.shared\n[paths]\ndefault = https://example.com/repo\nhost = ssh://host//srv/repo\n"
    );
    let remotes = Repository::new(fake).remotes().unwrap();
    assert_eq!(remotes.len(), 2);
}

#[test]
fn test_add_remote_replaces_entry_in_place() {
    let fake = FakeHg::new("local");
    fake.with_file(
        HGRC,
        "# managed by hand\n[paths]\nhost = ssh://old/place\n  ssh://continued\ndefault = https://example.com/repo\n\n[ui]\nverbose = true\n",
    );
    let mut repo = Repository::new(fake.clone());

    repo.add_remote("host", "ssh://new/place").unwrap();

    assert_eq!(
        fake.file(HGRC).unwrap_or_default(),
        "# managed by hand\n[paths]\nhost = ssh://new/place\ndefault = https://example.com/repo\n\n[ui]\nverbose = true\n"
    );
}

#[test]
fn test_add_remote_appends_paths_section() {
    let fake = FakeHg::new("local");
    fake.with_file(HGRC, "[ui]\nverbose = true\n");
    let mut repo = Repository::new(fake.clone());

    repo.add_remote("host", "ssh://host/src/repo").unwrap();

    assert_eq!(
        fake.file(HGRC).unwrap_or_default(),
        "[ui]\nverbose = true\n\n[paths]\nhost = ssh://host/src/repo\n"
    );
}

#[test]
fn test_add_remote_overwrites_existing_key() {
    let fake = FakeHg::new("local");
    fake.with_file(HGRC, "[paths]\nhost = ssh://old/place\n");
    let mut repo = Repository::new(fake.clone());

    repo.add_remote("host", "ssh://new/place").unwrap();
    repo.add_remote("host", "ssh://new/place").unwrap();

    let remotes = Repository::new(fake).remotes().unwrap();
    assert_eq!(remotes.len(), 1);
    assert_eq!(remotes.get("host").map(String::as_str), Some("ssh://new/place"));
}

#[test]
fn test_windows_paths_round_trip() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    repo.add_remote("share", r"C:\repos\thing").unwrap();

    let remotes = Repository::new(fake).remotes().unwrap();
    assert_eq!(remotes.get("share").map(String::as_str), Some(r"C:\repos\thing"));
}

#[test]
fn test_hgrc_is_read_once_per_handle() {
    let fake = FakeHg::new("local");
    fake.with_file(HGRC, "[paths]\na = one\n");
    let mut repo = Repository::new(fake.clone());

    assert_eq!(repo.remotes().unwrap().len(), 1);
    fake.with_file(HGRC, "[paths]\na = one\nb = two\n");
    assert_eq!(repo.remotes().unwrap().len(), 1);
}

#[test]
fn test_mq_config_is_separate() {
    let fake = FakeHg::new("local");
    let mut repo = Repository::new(fake.clone());

    repo.add_mq_remote("host", "ssh://host/src/repo/.hg/patches").unwrap();

    assert!(repo.remotes().unwrap().is_empty());
    assert_eq!(repo.mq_remotes().unwrap().len(), 1);
    assert!(fake.file(PATCHES_HGRC).is_some());
}

// --- Executors against real processes ---

#[cfg(unix)]
mod process {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
    use crate::error::SynchgResult;
    use crate::hg::exec::shell_path;
    use crate::hg::{HgExecutor, LocalHg, RemoteHg};
    use crate::remote::RemoteConnection;

    /// Runs "remote" command lines with the local `sh`.
    struct LocalShell;

    impl RemoteConnection for LocalShell {
        fn host(&self) -> &str {
            "localhost"
        }

        fn command(&self, remote_command: &str) -> ProcessBuilder {
            ProcessBuilder::new("sh").arg("-c").arg(remote_command)
        }
    }

    /// Records command lines instead of running them.
    struct Recorder {
        lines: Rc<RefCell<Vec<String>>>,
        code: i32,
    }

    impl RemoteConnection for Recorder {
        fn host(&self) -> &str {
            "example"
        }

        fn command(&self, remote_command: &str) -> ProcessBuilder {
            ProcessBuilder::new("true").arg(remote_command)
        }

        fn run(&self, remote_command: &str, _stdin: Option<&str>) -> SynchgResult<ProcessOutput> {
            self.lines.borrow_mut().push(remote_command.to_string());
            Ok(ProcessOutput::new(self.code, "out\n".to_string(), "err\n".to_string()))
        }
    }

    #[test]
    fn test_local_hg_sets_plain_mode() {
        let dir = tempfile::tempdir().expect("tempdir");
        let hg = LocalHg::new(dir.path(), "printenv");

        assert_eq!(hg.hg(&["HGPLAIN"]).unwrap(), "1\n");
    }

    #[test]
    fn test_local_hg_passes_arguments_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let hg = LocalHg::new(dir.path(), "echo");

        assert_eq!(hg.hg(&["commit", "-m", "two words"]).unwrap(), "commit -m two words\n");
    }

    #[test]
    fn test_local_hg_runs_in_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonicalize");
        let hg = LocalHg::new(&root, "pwd");

        assert_eq!(hg.hg(&[]).unwrap().trim_end(), root.to_string_lossy());
        assert_eq!(hg.root(), root.as_path());
    }

    #[test]
    fn test_local_hg_reports_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let hg = LocalHg::new(dir.path(), "false");

        let err = hg.hg(&["qapplied"]).unwrap_err();
        assert_eq!(err.hg_exit_code(), Some(1));
        assert!(err.to_string().contains("`hg qapplied` exited with code 1"), "{err}");
    }

    #[test]
    fn test_local_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join(".hg")).expect("mkdir");
        let hg = LocalHg::new(dir.path(), "hg");

        assert!(hg.exists(".hg").unwrap());
        assert_eq!(hg.read_file(".hg/hgrc").unwrap(), None);
        hg.write_file(".hg/hgrc", "[paths]\n").unwrap();
        assert_eq!(hg.read_file(".hg/hgrc").unwrap().as_deref(), Some("[paths]\n"));
    }

    #[test]
    fn test_remote_hg_command_line_is_quoted() {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let hg = RemoteHg::new(
            Box::new(Recorder {
                lines: Rc::clone(&lines),
                code: 0,
            }),
            "src/my repo",
        );

        let stdout = hg.hg(&["commit", "--mq", "-m", "two words"]).unwrap();

        assert_eq!(stdout, "out\n");
        insta::assert_snapshot!(lines.borrow().join("\n"), @"cd 'src/my repo' && HGPLAIN=1 hg commit --mq -m 'two words'");
    }

    #[test]
    fn test_remote_hg_nonzero_exit_is_command_failed() {
        let hg = RemoteHg::new(
            Box::new(Recorder {
                lines: Rc::default(),
                code: 1,
            }),
            "repo",
        );

        let err = hg.hg(&["incoming"]).unwrap_err();
        assert_eq!(err.hg_exit_code(), Some(1));
        assert_eq!(hg.location(), "example:repo");
    }

    #[test]
    fn test_remote_files_through_shell() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("with space");
        std::fs::create_dir_all(root.join(".hg")).expect("mkdir");
        let hg = RemoteHg::new(Box::new(LocalShell), root.to_string_lossy());

        assert!(hg.exists(".hg").unwrap());
        assert!(!hg.exists(".hg/patches").unwrap());
        assert_eq!(hg.read_file(".hg/hgrc").unwrap(), None);

        hg.write_file(".hg/hgrc", "[paths]\nhost = ssh://h//x\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(root.join(".hg/hgrc")).expect("read"),
            "[paths]\nhost = ssh://h//x\n"
        );
        assert_eq!(
            hg.read_file(".hg/hgrc").unwrap().as_deref(),
            Some("[paths]\nhost = ssh://h//x\n")
        );
    }

    #[test]
    fn test_remote_exists_when_root_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let hg = RemoteHg::new(Box::new(LocalShell), dir.path().join("absent").to_string_lossy());

        assert!(!hg.exists(".hg").unwrap());
    }

    #[test]
    fn test_shell_path_keeps_home_prefix() {
        assert_eq!(shell_path("~").unwrap(), "~");
        assert_eq!(shell_path("~/src/my repo").unwrap(), "~/'src/my repo'");
        assert_eq!(shell_path("/srv/hg").unwrap(), "/srv/hg");
        assert_eq!(shell_path("a b").unwrap(), "'a b'");
    }
}
