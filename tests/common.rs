#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use tempfile::TempDir;
use timelancer::db::initialize::open_db;
use timelancer::models::{Company, Timer};

pub fn tl() -> Command {
    cargo_bin_cmd!("timelancer")
}

/// Private HOME with a database path inside it. Dropping it removes both.
pub struct TestEnv {
    pub home: TempDir,
    pub db_path: String,
}

impl TestEnv {
    /// `timelancer --db <path>` with HOME pointing at the private directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = tl();
        cmd.env("HOME", self.home.path())
            .env_remove("RUST_LOG")
            .args(["--db", &self.db_path]);
        cmd
    }
}

pub fn setup_test_db(name: &str) -> TestEnv {
    let home = tempfile::Builder::new()
        .prefix(&format!("{name}_"))
        .tempdir()
        .expect("tempdir");
    let db_path = home
        .path()
        .join(format!("{name}_timelancer.sqlite"))
        .to_string_lossy()
        .to_string();
    TestEnv { home, db_path }
}

/// Temporary output path in the test's HOME.
pub fn temp_out(env: &TestEnv, name: &str, ext: &str) -> String {
    env.home
        .path()
        .join(format!("{name}_out.{ext}"))
        .to_string_lossy()
        .to_string()
}

/// Initialize the database with two companies and three timer records:
/// acme 1h + 2h, bee 30m 30s.
pub fn init_db_with_data(env: &TestEnv) {
    env.cmd().args(["--test", "init"]).assert().success();
    env.cmd()
        .args(["company", "add", "acme", "Acme Corp"])
        .assert()
        .success();
    env.cmd()
        .args(["company", "add", "bee", "Beesoft"])
        .assert()
        .success();

    let db = open_db(&env.db_path).expect("open db");
    let acme = Company::lookup(&db, "acme").expect("acme");
    let bee = Company::lookup(&db, "bee").expect("bee");
    let base = 1_704_103_200; // 2024-01-01 10:00 UTC
    let records = [
        (acme.id, base, 3600),
        (bee.id, base + 7200, 1830),
        (acme.id, base + 86_400, 7200),
    ];
    for (company, start, secs) in records {
        Timer::with_data(company, start, start + secs)
            .save(&db)
            .expect("save timer");
    }
}
