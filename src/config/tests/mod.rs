//! Tests for configuration loading.

use crate::config::{
    BOOTSTRAP_ADMIN_VAR, Config, ConfigError, DATABASE_URL_VAR, DB_POOL_SIZE_VAR,
    LISTEN_ADDR_VAR, LOG_FORMAT_VAR, LOG_VAR, LogFormat,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::{fixture, rstest};
use std::collections::HashMap;

/// A uniquely named directory under the system temp dir.
struct ScratchDir {
    temp: Dir,
    name: String,
    path: Utf8PathBuf,
}

impl ScratchDir {
    fn write(&self, file: &str, contents: &str) -> Utf8PathBuf {
        self.temp
            .open_dir(&self.name)
            .expect("open scratch dir")
            .write(file, contents)
            .expect("write scratch file");
        self.path.join(file)
    }

    fn remove(self) {
        self.temp
            .remove_dir_all(&self.name)
            .expect("remove scratch dir");
    }
}

#[fixture]
fn scratch() -> ScratchDir {
    let temp_path =
        Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("utf-8 temp dir");
    let temp = Dir::open_ambient_dir(&temp_path, ambient_authority()).expect("open temp dir");
    let name = format!("kanban-config-{}", uuid::Uuid::new_v4());
    temp.create_dir(&name).expect("create scratch dir");
    ScratchDir {
        path: temp_path.join(&name),
        temp,
        name,
    }
}

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[rstest]
fn defaults_listen_locally_with_memory_store() {
    let config = Config::default();

    assert_eq!(config.listen_addr.to_string(), "127.0.0.1:5000");
    assert_eq!(config.database_url, None);
    assert_eq!(config.db_pool_size, 8);
    assert_eq!(config.log, "info");
    assert_eq!(config.log_format, LogFormat::Compact);
}

#[rstest]
fn environment_overrides_defaults() {
    let config = Config::default()
        .with_env(env(&[
            (LISTEN_ADDR_VAR, "0.0.0.0:8080"),
            (DATABASE_URL_VAR, "postgres://localhost/kanban"),
            (DB_POOL_SIZE_VAR, "16"),
            (LOG_FORMAT_VAR, "JSON"),
            (BOOTSTRAP_ADMIN_VAR, "root_admin"),
            (LOG_VAR, ""),
        ]))
        .expect("valid overrides");

    assert_eq!(config.listen_addr.port(), 8080);
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgres://localhost/kanban")
    );
    assert_eq!(config.db_pool_size, 16);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.bootstrap_admin.as_deref(), Some("root_admin"));
    assert_eq!(config.log, "info");
}

#[rstest]
#[case(LISTEN_ADDR_VAR, "not-an-address")]
#[case(DB_POOL_SIZE_VAR, "-1")]
#[case(LOG_FORMAT_VAR, "pretty")]
fn malformed_override_is_reported(#[case] var: &'static str, #[case] value: &str) {
    let err = Config::default()
        .with_env(env(&[(var, value)]))
        .expect_err("override should be rejected");

    assert!(matches!(err, ConfigError::InvalidEnv { var: name, .. } if name == var));
}

#[rstest]
fn file_values_fill_in_missing_keys(scratch: ScratchDir) {
    let path = scratch.write("kanban.toml", "log = \"kanban=debug\"\nlog_format = \"json\"\n");

    let config = Config::from_file(&path).expect("parse config");

    assert_eq!(config.log, "kanban=debug");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.db_pool_size, 8);
    scratch.remove();
}

#[rstest]
fn malformed_file_is_a_parse_error(scratch: ScratchDir) {
    let path = scratch.write("kanban.toml", "db_pool_size = \"many\"\n");

    let err = Config::from_file(&path).expect_err("pool size must be a number");

    assert!(matches!(err, ConfigError::Parse { .. }));
    scratch.remove();
}

#[rstest]
fn unknown_keys_are_rejected() {
    let err = toml::from_str::<Config>("listen = \"127.0.0.1:1\"").expect_err("unknown key");

    assert!(err.to_string().contains("listen"));
}

#[rstest]
fn missing_file_is_a_read_error() {
    let err = Config::from_file(Utf8Path::new("definitely-missing-kanban.toml"))
        .expect_err("file does not exist");

    assert!(matches!(err, ConfigError::Read { .. }));
}
