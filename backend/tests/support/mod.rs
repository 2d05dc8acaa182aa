//! Shared helpers for the database integration suites.

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

/// Database every fresh test database is cloned from.
const BASE_TEMPLATE: &str = "template1";

/// Creates an empty, uniquely named database on the shared cluster.
///
/// The database is dropped when the returned handle goes out of scope.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let name = format!("accounts_test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(name.as_str(), BASE_TEMPLATE)
        .map_err(|err| format!("create database {name}: {err:?}"))
}
