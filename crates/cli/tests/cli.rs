use assert_cmd::Command;

#[test]
fn openapi_prints_every_resource() {
    let output = Command::cargo_bin("cinema-cli")
        .unwrap()
        .arg("openapi")
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["openapi"], "3.1.0");
    for path in [
        "/movies/",
        "/movies/page/{page}",
        "/movies/{pk}",
        "/directors/",
        "/directors/{pk}",
        "/genres/",
        "/genres/{pk}",
    ] {
        assert!(doc["paths"][path].is_object(), "missing path {path}");
    }
    assert!(doc["components"]["schemas"]["Movie"].is_object());
}

#[test]
fn init_db_creates_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cinema.db");

    Command::cargo_bin("cinema-cli")
        .unwrap()
        .arg("init-db")
        .env("CINEMA_CONFIG_DIR", dir.path())
        .env("CINEMA_DATABASE__URL", format!("sqlite://{}", db_path.display()))
        .env_remove("CINEMA_ENV")
        .assert()
        .success();

    assert!(db_path.exists());
}

#[test]
fn unknown_environment_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("cinema-cli")
        .unwrap()
        .arg("init-db")
        .env("CINEMA_CONFIG_DIR", dir.path())
        .env("CINEMA_ENV", "qa")
        .assert()
        .failure();
}
