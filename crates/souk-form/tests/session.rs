use serde_json::{Value, json};

use souk_api::{ApiError, MarketSource};
use souk_catalog::{Category, CategoryFieldSchema};
use souk_form::{FormError, FormSession};

fn cars_body() -> Value {
    json!({
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
                    "name": "Trim",
                    "attribute": "trim",
                    "valueType": "enum",
                    "filterType": "single_choice",
                    "state": "active",
                    "displayPriority": 4
                },
                {
                    "id": 5,
                    "name": "Year",
                    "attribute": "year",
                    "valueType": "integer",
                    "filterType": "range",
                    "state": "active",
                    "displayPriority": 5,
                    "minValue": 1950,
                    "maxValue": 2026
                },
                {
                    "id": 6,
                    "name": "Price",
                    "attribute": "price",
                    "valueType": "float",
                    "filterType": "range",
                    "isMandatory": true,
                    "state": "active",
                    "displayPriority": 6,
                    "minValue": 0
                }
            ],
            "childrenFields": {
                "model": {
                    "toyota": [
                        { "id": 31, "value": "corolla", "label": "Corolla", "displayPriority": 1 },
                        { "id": 32, "value": "camry", "label": "Camry", "displayPriority": 2 }
                    ]
                },
                "trim": {
                    "corolla": [
                        { "id": 41, "value": "xli", "label": "XLi", "displayPriority": 1 },
                        { "id": 42, "value": "gli", "label": "GLi", "displayPriority": 2 }
                    ]
                }
            },
            "parentFieldLookup": { "model": "make", "trim": "model" }
        }
    })
}

fn cars_session() -> FormSession {
    let mut session = FormSession::new();
    let request = session.select_category("cars-for-sale");
    let schema = CategoryFieldSchema::from_response(cars_body()).expect("schema decodes");
    assert!(session.install_schema(request, schema));
    session
}

#[test]
fn changing_the_parent_drops_the_dependent_answer() {
    let mut session = cars_session();
    session.set_value("make", json!("toyota"));
    session.set_value("model", json!("corolla"));

    session.set_value("make", json!("honda"));

    assert_eq!(session.state().value("make"), Some(&json!("honda")));
    assert!(!session.state().contains("model"));
    let model = session.schema().field("model").expect("model field").clone();
    assert!(session.resolve_choices(&model).is_empty());
}

#[test]
fn the_cascade_follows_the_dependency_chain() {
    let mut session = cars_session();
    session.set_value("make", json!("toyota"));
    session.set_value("model", json!("corolla"));
    session.set_value("trim", json!("xli"));

    session.set_value("make", json!("honda"));

    assert!(!session.state().contains("model"));
    assert!(!session.state().contains("trim"));
}

#[test]
fn rewriting_the_same_value_still_cascades() {
    let mut session = cars_session();
    session.set_value("make", json!("toyota"));
    session.set_value("model", json!("corolla"));

    session.set_value("make", json!("toyota"));

    assert_eq!(session.state().value("make"), Some(&json!("toyota")));
    assert!(!session.state().contains("model"));
}

#[test]
fn clearing_a_value_invalidates_its_dependents() {
    let mut session = cars_session();
    session.set_value("make", json!("toyota"));
    session.set_value("model", json!("corolla"));

    session.clear_value("make");

    assert!(!session.state().contains("make"));
    assert!(!session.state().contains("model"));
}

#[test]
fn unrelated_answers_survive_a_parent_change() {
    let mut session = cars_session();
    session.set_value("year", json!(2015));
    session.set_value("make", json!("toyota"));

    session.set_value("make", json!("honda"));

    assert_eq!(session.state().value("year"), Some(&json!(2015)));
}

#[test]
fn values_round_trip_for_any_attribute() {
    let mut session = cars_session();
    session.set_value("custom_note", json!("hand delivered"));
    assert_eq!(
        session.state().value("custom_note"),
        Some(&json!("hand delivered"))
    );
}

#[test]
fn dependent_choices_follow_the_parent_value() {
    let mut session = cars_session();
    let model = session.schema().field("model").expect("model field").clone();

    assert!(session.resolve_choices(&model).is_empty());

    session.set_value("make", json!("toyota"));
    let values: Vec<&str> = session
        .resolve_choices(&model)
        .iter()
        .map(|choice| choice.value.as_str())
        .collect();
    assert_eq!(values, ["corolla", "camry"]);

    session.set_value("make", json!("honda"));
    assert!(session.resolve_choices(&model).is_empty());
}

#[test]
fn static_fields_keep_their_own_choices() {
    let mut session = cars_session();
    let make = session.schema().field("make").expect("make field").clone();
    assert_eq!(session.resolve_choices(&make).len(), 2);

    // The parent's list never changes with its own answer.
    session.set_value("make", json!("toyota"));
    assert_eq!(session.resolve_choices(&make).len(), 2);
}

#[test]
fn selecting_a_category_clears_previous_answers() {
    let mut session = cars_session();
    session.set_value("make", json!("toyota"));
    session.set_value("title", json!("Corolla 2015"));

    session.select_category("mobile-phones");

    assert!(session.state().is_empty());
    assert!(session.visible_fields().is_empty());
    assert_eq!(session.category_slug(), "mobile-phones");
}

#[test]
fn stale_schema_responses_are_dropped() {
    let mut session = FormSession::new();
    let first = session.select_category("cars-for-sale");
    let second = session.select_category("mobile-phones");

    let cars = CategoryFieldSchema::from_response(cars_body()).expect("schema decodes");
    assert!(!session.install_schema(first, cars));
    assert!(session.visible_fields().is_empty());

    assert!(session.install_schema(second, CategoryFieldSchema::default()));
    assert_eq!(session.category_slug(), "mobile-phones");
}

struct StubSource {
    body: Value,
}

#[async_trait::async_trait]
impl MarketSource for StubSource {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(Vec::new())
    }

    async fn category_fields(&self, _slug: &str) -> Result<Value, ApiError> {
        Ok(self.body.clone())
    }
}

struct FailingSource;

#[async_trait::async_trait]
impl MarketSource for FailingSource {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(Vec::new())
    }

    async fn category_fields(&self, _slug: &str) -> Result<Value, ApiError> {
        Err(decode_error())
    }
}

fn decode_error() -> ApiError {
    let source = serde_json::from_str::<Value>("not json").expect_err("must fail");
    ApiError::Decode {
        location: "stub".to_string(),
        source,
    }
}

#[tokio::test]
async fn load_category_installs_the_fetched_schema() {
    let source = StubSource { body: cars_body() };
    let mut session = FormSession::new();

    session
        .load_category(&source, "cars-for-sale")
        .await
        .expect("load succeeds");

    assert_eq!(session.category_slug(), "cars-for-sale");
    assert_eq!(session.visible_fields().len(), 6);
}

#[tokio::test]
async fn an_empty_slug_is_a_silent_placeholder() {
    let source = FailingSource;
    let mut session = FormSession::new();

    session
        .load_category(&source, "")
        .await
        .expect("placeholder never fetches");

    assert_eq!(session.category_slug(), "");
    assert!(session.visible_fields().is_empty());
}

#[tokio::test]
async fn load_failures_surface_and_leave_the_form_empty() {
    let source = FailingSource;
    let mut session = FormSession::new();
    session.set_value("title", json!("stale answer"));

    let error = session
        .load_category(&source, "cars-for-sale")
        .await
        .expect_err("fetch fails");

    assert!(matches!(error, FormError::Fetch(_)));
    assert!(session.state().is_empty());
    assert!(session.visible_fields().is_empty());
}
