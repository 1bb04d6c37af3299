use std::fs;
use std::path::Path;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_esg-salience");

const TEXT: &str = "We cut Scope 1 emissions 20% in 2023.\n\
    Scope 2 emissions fell 15% since 2020.\n\
    Water use dropped 10% at our largest site.\n";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("report.txt"), TEXT).unwrap();
    fs::write(
        dir.join("scores.json"),
        r#"{
            "We cut Scope 1 emissions 20% in 2023.": 0.92,
            "Scope 2 emissions fell 15% since 2020.": 0.88,
            "Water use dropped 10% at our largest site.": 0.75
        }"#,
    )
    .unwrap();
}

#[test]
fn test_lexical_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let out = Command::new(BIN)
        .args(["lexical", "--text"])
        .arg(dir.path().join("report.txt"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(value["vague_words_score"].as_u64().unwrap() <= 100);
    assert!(value["difficulty_to_read_score"].as_u64().unwrap() <= 100);
}

#[test]
fn test_run_rank_and_session() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let out_dir = dir.path().join("out");

    let status = Command::new(BIN)
        .arg("run")
        .arg("--text")
        .arg(dir.path().join("report.txt"))
        .arg("--scores")
        .arg(dir.path().join("scores.json"))
        .arg("--out")
        .arg(&out_dir)
        .args(["--company", "Acme Corp"])
        .env_remove("ESG_SALIENCE_CONFIG")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out_dir.join("theme_summaries.json").is_file());
    assert!(out_dir.join("claims.json").is_file());

    let session = Command::new(BIN)
        .arg("session")
        .arg("--out")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(session.status.success());
    assert_eq!(String::from_utf8_lossy(&session.stdout).trim(), "Acme Corp");

    let rank_dir = dir.path().join("ranked");
    let status = Command::new(BIN)
        .arg("rank")
        .arg("--claims")
        .arg(out_dir.join("claims.json"))
        .arg("--out")
        .arg(&rank_dir)
        .env_remove("ESG_SALIENCE_CONFIG")
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(rank_dir.join("theme_summaries.json")).unwrap(),
        fs::read_to_string(out_dir.join("theme_summaries.json")).unwrap()
    );
}

#[test]
fn test_malformed_claims_fail_with_status_marker() {
    let dir = tempfile::tempdir().unwrap();
    let claims = dir.path().join("claims.json");
    fs::write(
        &claims,
        r#"[{"sentence": "We cut waste.", "confidence": 2.0,
             "assertiveness_score": 0.5, "claim_type": "qualitative"}]"#,
    )
    .unwrap();
    let out_dir = dir.path().join("out");

    let out = Command::new(BIN)
        .arg("rank")
        .arg("--claims")
        .arg(&claims)
        .arg("--out")
        .arg(&out_dir)
        .env_remove("ESG_SALIENCE_CONFIG")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("score_out_of_range"));

    let status: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("run_status.json")).unwrap())
            .unwrap();
    assert_eq!(status["status"], "failed");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "salience": { "damping": 1.5 } }"#).unwrap();

    let out = Command::new(BIN)
        .arg("run")
        .arg("--text")
        .arg(dir.path().join("report.txt"))
        .arg("--scores")
        .arg(dir.path().join("scores.json"))
        .arg("--out")
        .arg(dir.path().join("out"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("damping"));
}

#[test]
fn test_run_refreshes_company_profile() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let profiles = dir.path().join("profiles.json");
    fs::write(
        &profiles,
        r#"{ "Acme Corp": { "ESG_rating": "AA", "top3_commitments": ["Net zero by 2040"] } }"#,
    )
    .unwrap();
    let out_dir = dir.path().join("out");

    let status = Command::new(BIN)
        .arg("run")
        .arg("--text")
        .arg(dir.path().join("report.txt"))
        .arg("--scores")
        .arg(dir.path().join("scores.json"))
        .arg("--out")
        .arg(&out_dir)
        .args(["--company", "Acme Corp"])
        .arg("--profiles")
        .arg(&profiles)
        .env_remove("ESG_SALIENCE_CONFIG")
        .status()
        .unwrap();
    assert!(status.success());

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("company_data.json")).unwrap())
            .unwrap();
    assert_eq!(stored["Acme Corp"]["ESG_rating"], "AA");
    assert_eq!(stored["Acme Corp"]["CDP_score"], "Not available");
}
