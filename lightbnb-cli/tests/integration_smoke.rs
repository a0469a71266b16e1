//! Smoke tests for command wiring, run against JSON fixtures

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const USERS: &str = r#"{
    "1": {"id": 1, "name": "Devin Sanders", "email": "tristanjacobs@gmail.com", "password": "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u."},
    "2": {"id": 2, "name": "Sue Luna", "email": "jacksonrose@hotmail.com", "password": "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u."}
}"#;

const PROPERTIES: &str = r#"{
    "1": {"owner_id": 1, "title": "Speed lamp", "description": "description",
          "thumbnail_photo_url": "t", "cover_photo_url": "c", "cost_per_night": 2500,
          "street": "536 Namsub Highway", "city": "Vancouver", "province": "BC",
          "post_code": "28142", "country": "Canada", "parking_spaces": 6,
          "number_of_bathrooms": 4, "number_of_bedrooms": 8},
    "2": {"owner_id": 2, "title": "Blank corner", "description": "description",
          "thumbnail_photo_url": "t", "cover_photo_url": "c", "cost_per_night": 1200,
          "street": "651 Nami Road", "city": "Bohbatev", "province": "Alberta",
          "post_code": "83680", "country": "Canada", "parking_spaces": 0,
          "number_of_bathrooms": 5, "number_of_bedrooms": 6}
}"#;

fn fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("users.json"), USERS).unwrap();
    fs::write(dir.path().join("properties.json"), PROPERTIES).unwrap();
    fs::write(
        dir.path().join("reservations.json"),
        r#"[{"guest_id": 2, "property_id": 1, "start_date": "2018-09-11", "end_date": "2018-09-26"}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("property_reviews.json"),
        r#"[{"property_id": 1, "rating": 5}]"#,
    )
    .unwrap();
    dir
}

fn lightbnb(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.env_remove("DATABASE_URL").arg("--memory").arg(dir.path());
    cmd
}

// === Help Tests ===

#[test]
fn test_properties_search_help() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("properties").arg("search").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Minimum average review score"));
}

#[test]
fn test_user_show_help() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("user").arg("show").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Exact email address"));
}

// === Fixture-backed Commands ===

#[test]
fn test_user_show_by_email() {
    let dir = fixtures();
    lightbnb(&dir)
        .args(["user", "show", "--email", "jacksonrose@hotmail.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Sue Luna\""))
        .stdout(predicate::str::contains("password").not());
}

#[test]
fn test_user_show_missing_fails() {
    let dir = fixtures();
    lightbnb(&dir)
        .args(["user", "show", "--id", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user found"));
}

#[test]
fn test_user_add_duplicate_conflicts() {
    let dir = fixtures();
    lightbnb(&dir)
        .args([
            "user",
            "add",
            "--name",
            "Copycat",
            "--email",
            "tristanjacobs@gmail.com",
            "--password",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflict"));
}

#[test]
fn test_properties_search_filters() {
    let dir = fixtures();
    lightbnb(&dir)
        .args(["properties", "search", "--city", "VAN", "--min-rating", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Speed lamp"))
        .stdout(predicate::str::contains("Blank corner").not());
}

#[test]
fn test_reservations_for_guest() {
    let dir = fixtures();
    lightbnb(&dir)
        .args(["reservations", "--guest-id", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2018-09-11"));
}

#[test]
fn test_properties_add_assigns_next_id() {
    let dir = fixtures();
    let property = dir.path().join("new_property.json");
    fs::write(
        &property,
        r#"{"owner_id": 2, "title": "string", "description": "string",
            "thumbnail_photo_url": "string", "cover_photo_url": "string",
            "cost_per_night": 5000, "street": "string", "city": "string",
            "province": "string", "post_code": "string", "country": "string",
            "parking_spaces": 2, "number_of_bathrooms": 2, "number_of_bedrooms": 2}"#,
    )
    .unwrap();

    lightbnb(&dir)
        .arg("properties")
        .arg("add")
        .arg(&property)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 3"));
}

#[test]
fn test_migrate_requires_postgres() {
    let dir = fixtures();
    lightbnb(&dir)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires PostgreSQL"));
}
