//! Unit tests for the run pipeline.

use std::fs::{File, create_dir};

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;
use crate::sync::SyncConfig;
use crate::test_support::ScriptedRunner;
use crate::validate::ValidationError;

/// Workspace rooted in a temp directory whose mirrored name is `app`.
struct Workspace {
    _root: TempDir,
    path: Utf8PathBuf,
}

impl Workspace {
    fn touch(&self, name: &str) {
        File::create(self.path.join(name)).expect("create marker file");
    }
}

#[fixture]
fn workspace() -> Workspace {
    let root = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(root.path().join("app")).expect("utf8 path");
    create_dir(&path).expect("create workspace dir");
    Workspace { _root: root, path }
}

#[fixture]
fn config() -> SyncConfig {
    SyncConfig {
        rsync_bin: String::from("rsync"),
        ssh_bin: String::from("ssh"),
        remote_tmp_dir: String::from("/tmp"),
        mirror_delete: true,
        use_sudo: true,
    }
}

#[fixture]
fn target() -> RemoteTarget {
    RemoteTarget {
        user: String::from("alice"),
        host: String::from("host.example.com"),
        identity_file: None,
    }
}

fn orchestrator(config: SyncConfig, runner: ScriptedRunner) -> RunOrchestrator<ScriptedRunner> {
    let syncer = Syncer::new(config, runner).expect("config should validate");
    RunOrchestrator::new(syncer)
}

#[rstest]
fn execute_runs_pipeline_steps_in_order(
    workspace: Workspace,
    config: SyncConfig,
    target: RemoteTarget,
) {
    workspace.touch("Dockerfile");
    let runner = ScriptedRunner::new();
    runner.push_success();
    runner.push_success();
    runner.push_output(Some(0), "built\n", "");

    let output = orchestrator(config, runner.clone())
        .execute(&workspace.path, &target, "docker build .")
        .expect("pipeline should succeed");

    assert_eq!(output.stdout, "built\n");
    let invocations = runner.invocations();
    assert_eq!(invocations.len(), 3, "expected mkdir, rsync, exec");
    let commands: Vec<String> = invocations
        .iter()
        .map(|invocation| invocation.command_string())
        .collect();
    assert_eq!(
        commands.first().map(String::as_str),
        Some("ssh alice@host.example.com mkdir -p /tmp/app")
    );
    assert!(
        commands
            .get(1)
            .is_some_and(|command| command.starts_with("rsync")
                && command.ends_with("alice@host.example.com:/tmp/app")),
        "unexpected rsync command: {commands:?}"
    );
    assert_eq!(
        commands.get(2).map(String::as_str),
        Some("ssh alice@host.example.com cd /tmp/app && sudo docker build .")
    );
    assert!(
        invocations.get(1).is_some_and(|invocation| invocation.streamed),
        "sync step should stream"
    );
}

#[rstest]
fn execute_rejects_docker_command_without_dockerfile(
    workspace: Workspace,
    config: SyncConfig,
    target: RemoteTarget,
) {
    let runner = ScriptedRunner::new();

    let err = orchestrator(config, runner.clone())
        .execute(&workspace.path, &target, "docker ps")
        .expect_err("validation should fail");

    assert!(
        matches!(
            err,
            RunError::Validation(ValidationError::MissingDockerfile { .. })
        ),
        "got {err:?}"
    );
    assert!(
        runner.invocations().is_empty(),
        "nothing should run after a validation failure"
    );
}

#[rstest]
fn execute_stops_after_provision_failure(
    workspace: Workspace,
    config: SyncConfig,
    target: RemoteTarget,
) {
    workspace.touch("Dockerfile");
    let runner = ScriptedRunner::new();
    runner.push_failure(255);

    let err = orchestrator(config, runner.clone())
        .execute(&workspace.path, &target, "docker build .")
        .expect_err("provision should fail");

    assert!(matches!(err, RunError::Provision { .. }), "got {err:?}");
    assert_eq!(runner.invocations().len(), 1, "sync and exec should not run");
}

#[rstest]
fn execute_stops_after_sync_failure(
    workspace: Workspace,
    config: SyncConfig,
    target: RemoteTarget,
) {
    workspace.touch("Dockerfile");
    let runner = ScriptedRunner::new();
    runner.push_success();
    runner.push_failure(12);

    let err = orchestrator(config, runner.clone())
        .execute(&workspace.path, &target, "docker build .")
        .expect_err("sync should fail");

    assert!(matches!(err, RunError::Sync { .. }), "got {err:?}");
    assert_eq!(runner.invocations().len(), 2, "exec should not run");
}

#[rstest]
fn execute_reports_remote_failure_with_captured_output(
    workspace: Workspace,
    config: SyncConfig,
    target: RemoteTarget,
) {
    workspace.touch("Dockerfile");
    let runner = ScriptedRunner::new();
    runner.push_success();
    runner.push_success();
    runner.push_output(Some(2), "partial progress\n", "boom\n");

    let err = orchestrator(config, runner)
        .execute(&workspace.path, &target, "docker build .")
        .expect_err("remote command should fail");

    let RunError::Remote { ref source } = err else {
        panic!("expected Remote, got {err:?}");
    };
    let rendered = source.to_string();
    assert!(rendered.contains("partial progress"), "message: {rendered}");
    assert!(rendered.contains("boom"), "message: {rendered}");
}

#[rstest]
fn execute_allows_non_docker_commands_without_markers(
    workspace: Workspace,
    config: SyncConfig,
    target: RemoteTarget,
) {
    let runner = ScriptedRunner::new();
    runner.push_success();
    runner.push_success();
    runner.push_output(Some(0), "total 0\n", "");

    let output = orchestrator(config, runner)
        .execute(&workspace.path, &target, "ls -la")
        .expect("pipeline should succeed");

    assert_eq!(output.stdout, "total 0\n");
}

#[rstest]
fn execute_rejects_workspace_without_base_name(config: SyncConfig, target: RemoteTarget) {
    let runner = ScriptedRunner::new();

    let err = orchestrator(config, runner.clone())
        .execute(Utf8Path::new("/"), &target, "ls -la")
        .expect_err("root workspace should fail");

    assert!(matches!(err, RunError::ProjectName { .. }), "got {err:?}");
    assert!(runner.invocations().is_empty());
}
