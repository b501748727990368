use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, setup_test_db};

#[test]
fn test_init_creates_sqlite_file() {
    let env = setup_test_db("init_creates");

    env.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database ready"));

    let bytes = fs::read(&env.db_path).unwrap();
    assert!(bytes.starts_with(b"SQLite format 3\0"));

    // a second init reuses the file
    env.cmd().args(["--test", "init"]).assert().success();
}

#[test]
fn test_init_writes_config_file() {
    let env = setup_test_db("init_config");

    env.cmd().arg("init").assert().success();

    let conf = env.home.path().join(".timelancer").join("timelancer.conf");
    let text = fs::read_to_string(conf).unwrap();
    assert!(text.contains(&env.db_path));
    assert!(text.contains("min_session_secs: 5"));
}

#[test]
fn test_foreign_file_is_not_opened() {
    let env = setup_test_db("foreign_file");
    fs::write(&env.db_path, "definitely not sqlite").unwrap();

    env.cmd()
        .args(["company", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Not a SQLite database"));

    assert_eq!(
        fs::read_to_string(&env.db_path).unwrap(),
        "definitely not sqlite"
    );
}

#[test]
fn test_company_add_and_list() {
    let env = setup_test_db("company_add_list");
    env.cmd().args(["--test", "init"]).assert().success();

    env.cmd()
        .args(["company", "add", "bee", "Beesoft"])
        .assert()
        .success()
        .stdout(contains("added with id 1"));

    env.cmd()
        .args(["company", "list"])
        .assert()
        .success()
        .stdout(contains("bee").and(contains("Beesoft")).and(contains("yes")));
}

#[test]
fn test_company_empty_values_rejected() {
    let env = setup_test_db("company_empty");

    env.cmd()
        .args(["company", "add", "  ", "Beesoft"])
        .assert()
        .failure()
        .stderr(contains("Shortcut cannot be empty"));

    // rejected before the database is created
    assert!(!std::path::Path::new(&env.db_path).exists());
}

#[test]
fn test_company_duplicate_shortcut_reports_database_failure() {
    let env = setup_test_db("company_duplicate");
    env.cmd()
        .args(["company", "add", "bee", "Beesoft"])
        .assert()
        .success();

    env.cmd()
        .args(["company", "add", "BEE", "Other"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Database operation failed"));
}

#[test]
fn test_company_toggle_and_edit() {
    let env = setup_test_db("company_toggle_edit");
    env.cmd()
        .args(["company", "add", "bee", "Beesoft"])
        .assert()
        .success();

    env.cmd()
        .args(["company", "toggle", "bee"])
        .assert()
        .success()
        .stdout(contains("inactive"));

    env.cmd()
        .args(["company", "list"])
        .assert()
        .success()
        .stdout(contains("Beesoft").not());

    env.cmd()
        .args(["company", "edit", "1", "--name", "Beesoft Ltd"])
        .assert()
        .success();

    env.cmd()
        .args(["company", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Beesoft Ltd").and(contains("no")));
}

#[test]
fn test_company_delete_refused_with_timers() {
    let env = setup_test_db("company_del_refused");
    init_db_with_data(&env);

    env.cmd()
        .args(["company", "del", "acme"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("still has 2 timer record(s)"));
}

#[test]
fn test_company_delete_confirmed() {
    let env = setup_test_db("company_del_ok");
    env.cmd()
        .args(["company", "add", "tmp", "Temporary"])
        .assert()
        .success();

    env.cmd()
        .args(["company", "del", "tmp"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    env.cmd()
        .args(["company", "del", "tmp"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    env.cmd()
        .args(["company", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("No companies yet"));
}

#[test]
fn test_stats_lists_records_and_totals() {
    let env = setup_test_db("stats_all");
    init_db_with_data(&env);

    env.cmd()
        .args(["stats"])
        .assert()
        .success()
        .stdout(
            contains("Acme Corp")
                .and(contains("Beesoft"))
                .and(contains("0h 31min"))
                .and(contains("3h 00min")),
        );
}

#[test]
fn test_stats_company_filter_and_empty_period() {
    let env = setup_test_db("stats_filter");
    init_db_with_data(&env);

    env.cmd()
        .args(["stats", "--company", "bee"])
        .assert()
        .success()
        .stdout(contains("Beesoft").and(contains("Acme Corp").not()));

    env.cmd()
        .args(["stats", "--period", "today"])
        .assert()
        .success()
        .stdout(contains("No timer records"));

    env.cmd()
        .args(["stats", "--company", "nobody"])
        .assert()
        .failure()
        .stderr(contains("Company not found"));
}

#[test]
fn test_timer_delete() {
    let env = setup_test_db("timer_del");
    init_db_with_data(&env);

    env.cmd()
        .args(["timer", "del", "2"])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(contains("Timer #2 has been deleted"));

    env.cmd()
        .args(["timer", "del", "2"])
        .assert()
        .failure()
        .stderr(contains("Timer record not found: 2"));

    env.cmd()
        .args(["stats", "--company", "bee"])
        .assert()
        .success()
        .stdout(contains("No timer records"));
}

#[test]
fn test_db_info_and_check() {
    let env = setup_test_db("db_info");
    init_db_with_data(&env);

    env.cmd()
        .args(["db", "--info", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(
            contains("Companies:")
                .and(contains("Timer records:"))
                .and(contains("Integrity check passed"))
                .and(contains("Vacuum completed")),
        );
}

#[test]
fn test_work_rejects_bad_alarm_before_opening_database() {
    let env = setup_test_db("work_bad_alarm");

    env.cmd()
        .args(["work", "--company", "bee", "--alarm-at", "25:99"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    assert!(!std::path::Path::new(&env.db_path).exists());
}

#[test]
fn test_work_short_session_is_not_saved() {
    let env = setup_test_db("work_short");
    env.cmd()
        .args(["company", "add", "bee", "Beesoft"])
        .assert()
        .success();

    env.cmd()
        .args(["work", "--company", "bee"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("Working for Beesoft").and(contains("nothing saved")));

    env.cmd()
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("No timer records"));
}

#[test]
fn test_work_for_inactive_company_fails() {
    let env = setup_test_db("work_inactive");
    env.cmd()
        .args(["company", "add", "old", "Old Corp"])
        .assert()
        .success();
    env.cmd()
        .args(["company", "toggle", "old"])
        .assert()
        .success();

    env.cmd()
        .args(["work", "--company", "old"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(contains("is not active"));
}

#[test]
fn test_alarm_after_fires() {
    let env = setup_test_db("alarm_after");

    env.cmd()
        .args(["alarm", "after", "1"])
        .write_stdin("")
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(contains("Time is up!"));
}

#[test]
fn test_alarm_rejects_zero_duration() {
    let env = setup_test_db("alarm_zero");

    env.cmd()
        .args(["alarm", "after", "00:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));
}
