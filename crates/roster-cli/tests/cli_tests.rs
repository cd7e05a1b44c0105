//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SEED: &str = r#"
[[students]]
id = "S010"
name = "Amy Lee"
gender = "Female"
age = 14
form = 1

[[students.performance]]
form = 1
math = 60
english = 70
science = 80
social = 90
"#;

fn roster() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env_remove("ROSTER_SEED_FILE")
        .env_remove("ROSTER_SAMPLE_DATA");
    cmd
}

fn write_seed(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("students.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn help_output() {
    roster()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Student enrollment and performance roster",
        ));
}

#[test]
fn version_output() {
    roster()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roster"));
}

#[test]
fn list_sample_roster() {
    let dir = TempDir::new().unwrap();
    roster()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("Jane Smith"))
        .stdout(predicate::str::contains("77.50%"));
}

#[test]
fn list_from_seed_without_sample() {
    let dir = TempDir::new().unwrap();
    let seed = write_seed(&dir, SEED);

    roster()
        .current_dir(dir.path())
        .arg("list")
        .arg("--seed")
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Amy Lee"))
        .stdout(predicate::str::contains("75.00%"))
        .stdout(predicate::str::contains("John Doe").not());
}

#[test]
fn session_from_stdin() {
    let dir = TempDir::new().unwrap();
    roster()
        .current_dir(dir.path())
        .arg("session")
        .arg("--no-sample")
        .write_stdin(
            "register --id S010 --name \"Amy Lee\" --gender Female --age 14 --form 1\n\
             performance --id S010 --form 1 --math 60 --english 70 --science 80 --social 90\n\
             average --id S010\n\
             register --id S010 --name Again --gender Female --age 14 --form 1\n\
             delete --id S010\n\
             view --id S010\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[success] Student registered successfully!",
        ))
        .stdout(predicate::str::contains("S010: 75.00%"))
        .stdout(predicate::str::contains("[error] student ID must be unique"))
        .stdout(predicate::str::contains(
            "[success] Student deleted successfully!",
        ))
        .stdout(predicate::str::contains("[error] student not found: S010"));
}

#[test]
fn session_from_script_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.txt");
    std::fs::write(
        &script,
        "# boundary ages\n\
         register --id A --name A --gender Male --age 10 --form 1\n\
         register --id B --name B --gender Male --age 20 --form 4\n\
         register --id C --name C --gender Male --age 21 --form 1\n\
         list\n",
    )
    .unwrap();

    roster()
        .current_dir(dir.path())
        .arg("session")
        .arg("--no-sample")
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("[error] age must be between 10 and 20, got 21"))
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn render_writes_html() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("roster.html");

    roster()
        .current_dir(dir.path())
        .arg("render")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 students"));

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Jane Smith"));
}

#[test]
fn validate_seed_file() {
    let dir = TempDir::new().unwrap();
    let seed = write_seed(&dir, SEED);

    roster()
        .arg("validate")
        .arg("--seed")
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 students, 1 performance records"))
        .stdout(predicate::str::contains("Seed file valid."));
}

#[test]
fn validate_rejects_bad_seed() {
    let dir = TempDir::new().unwrap();
    let seed = write_seed(
        &dir,
        "[[students]]\nid = \"S1\"\nname = \"X\"\ngender = \"Male\"\nage = 12\nform = 7\n",
    );

    roster()
        .arg("validate")
        .arg("--seed")
        .arg(&seed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("form must be between 1 and 4"));
}

#[test]
fn validate_nonexistent_file() {
    roster()
        .arg("validate")
        .arg("--seed")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    roster()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created roster.toml"))
        .stdout(predicate::str::contains("Created seed/students.toml"));

    assert!(dir.path().join("roster.toml").exists());
    assert!(dir.path().join("seed/students.toml").exists());

    // the generated config points at the generated seed file
    roster()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    roster().current_dir(dir.path()).arg("init").assert().success();

    // Second init should skip
    roster()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
