//! Shared fixtures for sync module tests.
//!
//! These fixtures are used across multiple sync test modules. Keeping them
//! in one place avoids duplication and ensures the suite stays consistent.

use rstest::fixture;

use super::super::*;

#[fixture]
pub fn base_config() -> SyncConfig {
    SyncConfig {
        rsync_bin: String::from("rsync"),
        ssh_bin: String::from("ssh"),
        remote_tmp_dir: String::from("/tmp"),
        mirror_delete: true,
        use_sudo: true,
    }
}

#[fixture]
pub fn target() -> RemoteTarget {
    RemoteTarget {
        user: String::from("alice"),
        host: String::from("host.example.com"),
        identity_file: None,
    }
}

#[fixture]
pub fn keyed_target() -> RemoteTarget {
    RemoteTarget {
        user: String::from("alice"),
        host: String::from("host.example.com"),
        identity_file: Some(String::from("/keys/id_ed25519")),
    }
}
