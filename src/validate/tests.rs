//! Unit tests for command validation.

use super::*;
use rstest::rstest;
use std::fs::File;
use tempfile::TempDir;

fn workspace() -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 path");
    (dir, path)
}

fn touch(root: &Utf8Path, name: &str) {
    File::create(root.join(name)).expect("create marker file");
}

#[rstest]
#[case::compose("docker-compose up", CommandKind::Compose)]
#[case::compose_prefix("docker-composexyz", CommandKind::Compose)]
#[case::docker("docker build .", CommandKind::Docker)]
#[case::docker_prefix("dockerxyz", CommandKind::Docker)]
#[case::docker_tool("dockerfile-lint", CommandKind::Docker)]
#[case::other("ls -la", CommandKind::Other)]
#[case::other_podman("podman ps", CommandKind::Other)]
fn classify_uses_literal_prefixes(#[case] command: &str, #[case] expected: CommandKind) {
    assert_eq!(CommandKind::classify(command), expected);
}

#[rstest]
#[case::canonical("docker-compose.yml")]
#[case::modern("compose.yaml")]
fn compose_command_passes_with_either_marker(#[case] marker: &str) {
    let (_root, path) = workspace();
    touch(&path, marker);

    assert!(ensure_markers(&path, "docker-compose up").is_ok());
}

#[rstest]
fn compose_command_fails_without_markers() {
    let (_root, path) = workspace();

    let err = ensure_markers(&path, "docker-compose up").expect_err("should fail");
    assert!(
        matches!(err, ValidationError::MissingComposeFile { .. }),
        "got {err:?}"
    );
}

#[rstest]
fn docker_command_passes_with_dockerfile() {
    let (_root, path) = workspace();
    touch(&path, "Dockerfile");

    assert!(ensure_markers(&path, "docker build .").is_ok());
}

#[rstest]
fn docker_command_fails_without_dockerfile() {
    let (_root, path) = workspace();

    let err = ensure_markers(&path, "docker ps").expect_err("should fail");
    assert!(
        matches!(err, ValidationError::MissingDockerfile { .. }),
        "got {err:?}"
    );
}

/// The classification is a literal prefix match: a command that merely
/// starts with the letters `docker` takes the Dockerfile branch.
#[rstest]
fn docker_prefixed_tool_requires_dockerfile() {
    let (_root, path) = workspace();

    let err = ensure_markers(&path, "dockerfile-lint").expect_err("should fail");
    assert!(
        matches!(err, ValidationError::MissingDockerfile { .. }),
        "got {err:?}"
    );
}

#[rstest]
fn unrelated_command_passes_in_empty_workspace() {
    let (_root, path) = workspace();

    assert!(ensure_markers(&path, "ls -la").is_ok());
}

#[rstest]
fn compose_marker_does_not_satisfy_docker_branch() {
    let (_root, path) = workspace();
    touch(&path, "docker-compose.yml");

    let err = ensure_markers(&path, "docker build .").expect_err("should fail");
    assert!(
        matches!(err, ValidationError::MissingDockerfile { .. }),
        "got {err:?}"
    );
}
