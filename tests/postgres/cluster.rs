//! Cluster lifecycle helpers for `PostgreSQL` integration tests.
//!
//! The cluster runs in-process and therefore needs an unprivileged user.
//! When it cannot start, tests print a `SKIP-TEST-CLUSTER` line and return.

use crate::test_helpers::EnvVarGuard;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::{
    ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests, detect_execution_privileges,
};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use std::ffi::OsString;
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Option<ManagedCluster>> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Managed embedded `PostgreSQL` cluster for test lifecycles.
pub struct ManagedCluster {
    settings: Settings,
    runtime: Runtime,
    postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        if matches!(detect_execution_privileges(), ExecutionPrivileges::Root) {
            return Err("the embedded cluster must not run as root".into());
        }
        let bootstrap = bootstrap_with_free_port()?;
        let mut settings = bootstrap.settings.clone();
        sync_password_from_file(&mut settings)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let env_guard = EnvVarGuard::set_strings(&bootstrap.environment.to_env());
        let mut postgres = PostgreSQL::new(settings);
        runtime.block_on(async {
            postgres.setup().await?;
            if !matches!(postgres.status(), Status::Started) {
                postgres.start().await?;
            }
            Ok::<(), postgresql_embedded::Error>(())
        })?;
        drop(env_guard);

        let mut started = postgres.settings().clone();
        sync_port_from_pid(&mut started)?;
        Ok(Self {
            settings: started,
            runtime,
            postgres: Some(postgres),
        })
    }

    /// Returns the connection URL for `database`.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.settings.url(database)
    }

    /// Creates `template` and runs `migrate` against it unless it exists.
    pub fn ensure_template_exists<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let lock = TEMPLATE_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if self.database_exists(template)? {
            return Ok(());
        }

        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        if let Err(err) = migrate(&self.database_url(template)) {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    /// Creates `db_name` as a copy of `template`, dropped again with the guard.
    pub fn temporary_database_from_template(
        &'static self,
        db_name: &str,
        template: &str,
    ) -> Result<TemporaryDatabase, BoxError> {
        self.execute_admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(db_name),
            quote_identifier(template),
        ))?;
        Ok(TemporaryDatabase {
            cluster: self,
            name: db_name.to_owned(),
        })
    }

    fn drop_database(&self, db_name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(db_name)
        ))
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }

    fn database_exists(&self, db_name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(db_name)
        .get_result::<ExistsRow>(&mut conn)?;
        Ok(row.exists)
    }
}

impl Drop for ManagedCluster {
    fn drop(&mut self) {
        if let Some(postgres) = self.postgres.take() {
            drop(self.runtime.block_on(postgres.stop()));
        }
    }
}

/// A database that is dropped when the guard goes out of scope.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
}

impl TemporaryDatabase {
    /// Returns the connection URL of the temporary database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.database_url(&self.name)
    }
}

impl Drop for TemporaryDatabase {
    #[expect(clippy::print_stderr, reason = "drop cannot return the error")]
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(&self.name) {
            eprintln!("failed to drop test database {}: {err}", self.name);
        }
    }
}

/// Returns the shared cluster, or `None` when this runner cannot host one.
#[expect(clippy::print_stderr, reason = "skipped runs must say why")]
pub fn shared_cluster() -> Option<PostgresCluster> {
    SHARED_CLUSTER
        .get_or_init(|| match ManagedCluster::new() {
            Ok(cluster) => Some(cluster),
            Err(err) => {
                eprintln!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {err}");
                None
            }
        })
        .as_ref()
}

fn bootstrap_with_free_port() -> Result<TestBootstrapSettings, BoxError> {
    let port_override = if std::env::var_os("PG_PORT").is_some() {
        Vec::new()
    } else {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        let port = listener.local_addr()?.port();
        drop(listener);
        vec![(OsString::from("PG_PORT"), Some(OsString::from(port.to_string())))]
    };
    let _guard = EnvVarGuard::set_many(&port_override);
    Ok(bootstrap_for_tests()?)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let Some(file_name) = settings.password_file.file_name() else {
        return Ok(());
    };
    let parent = settings
        .password_file
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    match dir.read_to_string(file_name) {
        Ok(contents) => {
            let password = contents.trim_end();
            if !password.is_empty() {
                password.clone_into(&mut settings.password);
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let data_dir = Dir::open_ambient_dir(&settings.data_dir, ambient_authority())?;
    let contents = match data_dir.read_to_string("postmaster.pid") {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    // The fourth line of postmaster.pid holds the listening port.
    if let Some(port) = contents
        .lines()
        .nth(3)
        .and_then(|line| line.trim().parse::<u16>().ok())
    {
        settings.port = port;
    }
    Ok(())
}
