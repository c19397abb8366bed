#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn selly(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("selly").unwrap();
    cmd.current_dir(dir.path())
        .env("SELLY_ROOT", dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Fresh data root with no reply delay. Without an API key every reply is
/// the offline fallback, so no network is touched.
fn garden_root(extra_config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        format!("reply:\n  delay_ms: 0\n{extra_config}"),
    )
    .unwrap();
    dir
}

fn onboard(dir: &TempDir) {
    selly(dir).args(["onboard", "Mina"]).assert().success();
}

fn write_letter(dir: &TempDir) {
    selly(dir)
        .args([
            "write",
            "Long day at work, my head hurts.",
            "--emotion",
            "tired",
            "--intensity",
            "4",
            "--context",
            "WORK",
            "--status",
            "HEADACHE",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("selly read"));
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.arg("--json").output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// onboard
// ---------------------------------------------------------------------------

#[test]
fn onboard_saves_profile() {
    let dir = garden_root("");
    selly(&dir)
        .args(["onboard", "  Mina "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nice to meet you, Mina"));

    assert!(dir.path().join("user.json").exists());
    let status = json_of(selly(&dir).arg("status"));
    assert_eq!(status["profile"]["name"], "Mina");
    assert_eq!(status["profile"]["onboarded"], true);
}

#[test]
fn onboard_rejects_blank_name() {
    let dir = garden_root("");
    selly(&dir).args(["onboard", "   "]).assert().failure();
    assert!(!dir.path().join("user.json").exists());
}

// ---------------------------------------------------------------------------
// write / read / plant
// ---------------------------------------------------------------------------

#[test]
fn write_before_onboarding_fails() {
    let dir = garden_root("");
    selly(&dir)
        .args(["write", "hello", "--emotion", "JOY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
    assert!(!dir.path().join("letters.json").exists());
}

#[test]
fn write_delivers_fallback_reply_without_api_key() {
    let dir = garden_root("");
    onboard(&dir);
    write_letter(&dir);

    let status = json_of(selly(&dir).arg("status"));
    assert_eq!(status["letters"].as_array().unwrap().len(), 1);
    assert_eq!(status["replies"].as_array().unwrap().len(), 1);
    assert_eq!(status["has_unread_reply"], true);
    assert_eq!(status["pending_reply"], false);
    assert_eq!(status["processing"], false);

    let letter = &status["letters"][0];
    assert_eq!(letter["emotion"], "TIRED");
    assert_eq!(letter["intensity"], 4);
    assert_eq!(letter["contexts"][0], "WORK");

    let reply = &status["replies"][0];
    assert_eq!(reply["letter_id"], letter["id"]);
    assert_eq!(reply["fallback"], true);
    assert_eq!(reply["gift_seed"], "UNKNOWN");
}

#[test]
fn blank_letter_is_not_recorded() {
    let dir = garden_root("");
    onboard(&dir);
    selly(&dir)
        .args(["write", "   ", "--emotion", "calm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("letter not sent"));

    let status = json_of(selly(&dir).arg("status"));
    assert!(status["letters"].as_array().unwrap().is_empty());
}

#[test]
fn out_of_range_intensity_is_rejected() {
    let dir = garden_root("");
    onboard(&dir);
    selly(&dir)
        .args(["write", "hi", "--emotion", "joy", "--intensity", "9"])
        .assert()
        .failure();
}

#[test]
fn unknown_emotion_is_rejected() {
    let dir = garden_root("");
    onboard(&dir);
    selly(&dir)
        .args(["write", "hi", "--emotion", "ELATED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ELATED"));
}

#[test]
fn read_then_plant_then_garden() {
    let dir = garden_root("");
    onboard(&dir);
    write_letter(&dir);

    selly(&dir)
        .arg("read")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mystery Seed"));

    selly(&dir)
        .arg("plant")
        .assert()
        .success()
        .stdout(predicate::str::contains("Planted"));

    let plants = json_of(selly(&dir).arg("garden"));
    let plants = plants.as_array().unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0]["kind"], "UNKNOWN");
    assert_eq!(plants[0]["stage"], "seed");

    let status = json_of(selly(&dir).arg("status"));
    assert_eq!(status["has_unread_reply"], false);
    assert_eq!(plants[0]["id"], status["plants"][0]["id"]);

    selly(&dir)
        .arg("read")
        .assert()
        .success()
        .stdout(predicate::str::contains("No unread replies"));
}

#[test]
fn reply_can_only_be_planted_once() {
    let dir = garden_root("");
    onboard(&dir);
    write_letter(&dir);

    let status = json_of(selly(&dir).arg("status"));
    let reply_id = status["replies"][0]["id"].as_str().unwrap().to_string();

    selly(&dir).args(["plant", "--reply", &reply_id]).assert().success();
    selly(&dir)
        .args(["plant", "--reply", &reply_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already"));
    selly(&dir)
        .arg("plant")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no unread reply"));
}

#[test]
fn plant_grows_on_next_command() {
    // Thresholds of zero make a fresh seed mature on the next check.
    let dir = garden_root("growth:\n  sprout: 0\n  blooming: 0\n  mature: 0\n");
    onboard(&dir);
    write_letter(&dir);
    selly(&dir).arg("plant").assert().success();

    let plants = json_of(selly(&dir).arg("garden"));
    assert_eq!(plants[0]["stage"], "mature");
    assert!(plants[0]["next_stage_in_secs"].is_null());
}

#[test]
fn redb_backend_round_trips() {
    let dir = garden_root("storage:\n  backend: redb\n");
    onboard(&dir);
    write_letter(&dir);

    assert!(dir.path().join("garden.redb").exists());
    assert!(!dir.path().join("letters.json").exists());

    let status = json_of(selly(&dir).arg("status"));
    assert_eq!(status["profile"]["name"], "Mina");
    assert_eq!(status["letters"].as_array().unwrap().len(), 1);
    assert_eq!(status["replies"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_summarize_letters() {
    let dir = garden_root("");
    onboard(&dir);
    for emotion in ["joy", "joy", "sad"] {
        selly(&dir)
            .args(["write", "tonight", "--emotion", emotion])
            .assert()
            .success();
    }

    let stats = json_of(selly(&dir).arg("stats"));
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["trend"].as_array().unwrap().len(), 3);
    assert_eq!(stats["distribution"][0]["emotion"], "JOY");
    assert_eq!(stats["distribution"][0]["percent"], 67);

    selly(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Letters written: 3"));
}

#[test]
fn stats_on_empty_history() {
    let dir = garden_root("");
    selly(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No letters yet"));
}

// ---------------------------------------------------------------------------
// tags
// ---------------------------------------------------------------------------

#[test]
fn tags_are_listed_by_group() {
    let dir = TempDir::new().unwrap();
    let tags = json_of(selly(&dir).arg("tags"));
    assert_eq!(tags["emotions"].as_array().unwrap().len(), 6);
    assert_eq!(tags["contexts"][0]["group"], "work & future");
    assert_eq!(tags["contexts"][0]["tags"][0]["name"], "WORK");
    assert_eq!(tags["statuses"][0]["group"], "physical");

    selly(&dir)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("social"))
        .stdout(predicate::str::contains("INSOMNIA"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_flags_bad_thresholds() {
    let dir = garden_root("growth:\n  sprout: 30\n  blooming: 10\n  mature: 60\n");
    selly(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("must increase"));
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    selly(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("config.yaml").exists());
    selly(&dir).args(["config", "init"]).assert().failure();
    selly(&dir).args(["config", "init", "--force"]).assert().success();

    let cfg = json_of(selly(&dir).args(["config", "show"]));
    assert_eq!(cfg["reply"]["model"], "gemini-2.5-flash");
    assert_eq!(cfg["growth"]["sprout"], 10);
}
