//! Tests for sync utility helpers.

use std::ffi::OsString;

use rstest::rstest;

use super::super::util::{expand_tilde, render_invocation};

#[rstest]
fn expand_tilde_expands_home_prefix() {
    let home = std::env::var("HOME").expect("HOME should be set");

    assert_eq!(expand_tilde("~/.ssh/key"), format!("{home}/.ssh/key"));
}

#[rstest]
#[case("/absolute/path")]
#[case("relative/path")]
#[case("~user/not-expanded")]
fn expand_tilde_leaves_other_paths_unchanged(#[case] path: &str) {
    assert_eq!(expand_tilde(path), path);
}

#[rstest]
fn render_invocation_joins_program_and_args() {
    let args = vec![
        OsString::from("-i"),
        OsString::from("/keys/id_ed25519"),
        OsString::from("alice@host.example.com"),
        OsString::from("mkdir -p /tmp/app"),
    ];

    assert_eq!(
        render_invocation("ssh", &args),
        "ssh -i /keys/id_ed25519 alice@host.example.com mkdir -p /tmp/app"
    );
}
