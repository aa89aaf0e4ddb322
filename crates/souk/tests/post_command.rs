use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::json;

fn capture_dir() -> TempDir {
    let dir = TempDir::new().expect("create capture dir");

    let categories = json!([
        {
            "id": 2,
            "name": "Vehicles",
            "name_l1": "مركبات",
            "externalID": "2",
            "slug": "vehicles",
            "level": 0,
            "displayPriority": 1,
            "children": [
                {
                    "id": 1541,
                    "name": "Cars for Sale",
                    "externalID": "1541",
                    "slug": "cars-for-sale",
                    "level": 1,
                    "parentID": 2,
                    "displayPriority": 1,
                    "children": []
                }
            ]
        }
    ]);
    dir.child("categories.json")
        .write_str(&categories.to_string())
        .expect("write categories capture");

    let fields = json!({
        "1541": {
            "flatFields": [
                {
                    "id": 1,
                    "name": "Ad Title",
                    "attribute": "title",
                    "valueType": "string",
                    "filterType": "text",
                    "isMandatory": true,
                    "state": "active",
                    "displayPriority": 1,
                    "maxLength": 70
                },
                {
                    "id": 2,
                    "name": "Brand",
                    "name_l1": "الماركة",
                    "attribute": "make",
                    "valueType": "enum",
                    "filterType": "single_choice",
                    "isMandatory": true,
                    "state": "active",
                    "displayPriority": 2,
                    "choices": [
                        { "id": 21, "value": "toyota", "label": "Toyota", "label_l1": "تويوتا", "displayPriority": 1 },
                        { "id": 22, "value": "honda", "label": "Honda", "displayPriority": 2 }
                    ]
                },
                {
                    "id": 3,
                    "name": "Model",
                    "attribute": "model",
                    "valueType": "enum",
                    "filterType": "single_choice",
                    "state": "active",
                    "displayPriority": 3
                },
                {
                    "id": 4,
                    "name": "Price",
                    "attribute": "price",
                    "valueType": "float",
                    "filterType": "range",
                    "isMandatory": true,
                    "state": "active",
                    "displayPriority": 4,
                    "minValue": 0
                }
            ],
            "childrenFields": {
                "model": {
                    "toyota": [
                        { "id": 31, "value": "corolla", "label": "Corolla", "displayPriority": 1 },
                        { "id": 32, "value": "camry", "label": "Camry", "displayPriority": 2 }
                    ]
                }
            },
            "parentFieldLookup": { "model": "make" }
        }
    });
    dir.child("categoryFields/cars-for-sale.json")
        .write_str(&fields.to_string())
        .expect("write fields capture");

    dir.child("categoryFields/books.json")
        .write_str("{}")
        .expect("write empty fields capture");

    dir
}

fn souk() -> Command {
    let mut command = Command::cargo_bin("souk").expect("souk binary");
    // Keep the host environment out of locale selection.
    command.env_remove("LC_ALL");
    command.env_remove("LC_MESSAGES");
    command.env_remove("LANG");
    command.env_remove("SOUK_ORIGIN");
    command
}

#[test]
fn post_renders_the_form_from_captured_payloads() {
    let dir = capture_dir();
    souk()
        .arg("post")
        .arg("cars-for-sale")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--answer", "make=toyota", "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: cars-for-sale"))
        .stdout(predicate::str::contains("Status: need_input (1/4)"))
        .stdout(predicate::str::contains("* Brand <single_select> = toyota"))
        .stdout(predicate::str::contains("    options: Corolla | Camry"))
        .stdout(predicate::str::contains("! required: title"))
        .stdout(predicate::str::contains(
            "title: Mention the key features of your item",
        ));
}

#[test]
fn a_complete_post_reports_itself_complete() {
    let dir = capture_dir();
    souk()
        .arg("post")
        .arg("cars-for-sale")
        .arg("--from-dir")
        .arg(dir.path())
        .args([
            "--answer",
            "title=Corolla 2015, single owner",
            "--answer",
            "make=toyota",
            "--answer",
            "model=corolla",
            "--answer",
            "price=8500",
            "--locale",
            "en",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: complete (4/4)"));
}

#[test]
fn post_emits_the_listing_schema_on_request() {
    let dir = capture_dir();
    souk()
        .arg("post")
        .arg("cars-for-sale")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--answer", "make=toyota", "--schema", "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://json-schema.org/draft/2020-12/schema",
        ))
        .stdout(predicate::str::contains("\"additionalProperties\": false"))
        .stdout(predicate::str::contains("\"corolla\""));
}

#[test]
fn post_json_output_carries_the_render_payload() {
    let dir = capture_dir();
    souk()
        .arg("post")
        .arg("cars-for-sale")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--json", "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"need_input\""))
        .stdout(predicate::str::contains("\"widget\": \"currency_amount\""))
        .stdout(predicate::str::contains("\"currency\": \"USD\""));
}

#[test]
fn arabic_locale_localizes_labels_and_hints() {
    let dir = capture_dir();
    souk()
        .arg("post")
        .arg("cars-for-sale")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--locale", "ar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("الماركة"))
        .stdout(predicate::str::contains("اذكر الميزات الرئيسية"));
}

#[test]
fn fields_reports_categories_without_posting_fields() {
    let dir = capture_dir();
    souk()
        .arg("fields")
        .arg("books")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "This category has no posting fields",
        ));
}

#[test]
fn fields_fails_cleanly_when_the_capture_is_missing() {
    let dir = capture_dir();
    souk()
        .arg("fields")
        .arg("no-such-category")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--locale", "en"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load form fields"));
}

#[test]
fn categories_lists_the_navigation_strip() {
    let dir = capture_dir();
    souk()
        .arg("categories")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALL CATEGORIES"))
        .stdout(predicate::str::contains("Vehicles"));
}

#[test]
fn categories_under_an_unknown_id_fails_with_a_message() {
    let dir = capture_dir();
    souk()
        .arg("categories")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--under", "999", "--locale", "en"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category 999 was not found"));
}

#[test]
fn categories_under_lists_children() {
    let dir = capture_dir();
    souk()
        .arg("categories")
        .arg("--from-dir")
        .arg(dir.path())
        .args(["--under", "2", "--locale", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cars for Sale"))
        .stdout(predicate::str::contains("cars-for-sale"));
}
