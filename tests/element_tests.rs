use serde_json::json;
use ui_inspector::{
    element::{element::ElementRecord, elements::ElementList, rect::Rect},
    error::InspectError,
};

// =========================================================================
// Rect equality
// =========================================================================

#[test]
fn rect_equality_skips_fields_missing_on_either_side() {
    let full = Rect::new(0.0, 10.0, 100.0, 50.0, 50.0, 35.0);
    let partial = Rect {
        x: Some(0.0),
        width: Some(100.0),
        ..Rect::default()
    };

    assert_eq!(full, partial);
    assert_eq!(partial, full);
}

#[test]
fn rect_equality_detects_mismatch_on_shared_field() {
    let a = Rect::new(0.0, 10.0, 100.0, 50.0, 50.0, 35.0);
    let b = Rect::new(0.0, 10.0, 101.0, 50.0, 50.0, 35.0);
    assert_ne!(a, b);
}

#[test]
fn rect_from_json_accepts_numbers_and_numeric_strings() {
    let rect = Rect::from_json(&json!({
        "x": 1, "y": "2.5", "width": 3.0, "center_x": "not a number"
    }))
    .unwrap();

    assert_eq!(rect.x, Some(1.0));
    assert_eq!(rect.y, Some(2.5));
    assert_eq!(rect.width, Some(3.0));
    assert_eq!(rect.height, None);
    assert_eq!(rect.center_x, None);
    assert!(Rect::from_json(&json!("0,0,1,1")).is_none());
}

// =========================================================================
// ElementRecord decoding
// =========================================================================

#[test]
fn element_from_raw_maps_all_fields() {
    let raw = json!({
        "class": "android.widget.Button",
        "id": "login",
        "text": "Sign in",
        "description": "android.widget.Button{42}",
        "contentDescription": "login button",
        "enabled": true,
        "rect": {"x": 0, "y": 100, "width": 200, "height": 50, "center_x": 100, "center_y": 125}
    });

    let element = ElementRecord::from_raw(&raw, "button index:0").unwrap();

    assert_eq!(element.element_class(), Some("android.widget.Button"));
    assert_eq!(element.id(), Some("login"));
    assert_eq!(element.text(), Some("Sign in"));
    assert_eq!(element.description(), Some("android.widget.Button{42}"));
    assert_eq!(element.content_description(), Some("login button"));
    assert!(element.is_enabled());
    assert_eq!(element.rect(), Some(&Rect::new(0.0, 100.0, 200.0, 50.0, 100.0, 125.0)));
    assert_eq!(element.query(), "button index:0");
}

#[test]
fn element_from_raw_treats_null_as_absent_and_string_enabled() {
    let raw = json!({"class": "TextView", "id": null, "text": 42, "enabled": "TRUE"});
    let element = ElementRecord::from_raw(&raw, "* index:3").unwrap();

    assert_eq!(element.id(), None);
    assert_eq!(element.text(), Some("42"));
    assert!(element.is_enabled());
    assert!(element.rect().is_none());
}

#[test]
fn element_from_raw_rejects_non_object_payload() {
    let err = ElementRecord::from_raw(&json!("no such element"), "button index:9").unwrap_err();
    match err {
        InspectError::MalformedElement { query, payload } => {
            assert_eq!(query, "button index:9");
            assert!(payload.contains("no such element"));
        }
        other => panic!("Expected MalformedElement, got {:?}", other),
    }
}

// =========================================================================
// ElementRecord equality
// =========================================================================

#[test]
fn elements_with_different_queries_are_the_same_element() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0, 5.0, 5.0);
    let a = ElementRecord::new("* index:4")
        .with_class("Button")
        .with_id("ok")
        .with_text("OK")
        .with_rect(rect);
    let b = ElementRecord::new("* index:4 parent * index:0")
        .with_class("Button")
        .with_id("ok")
        .with_text("OK")
        .with_rect(rect);

    assert_eq!(a, b);
}

#[test]
fn element_equality_skips_missing_fields() {
    let with_id = ElementRecord::new("a").with_class("View").with_id("root");
    let without_id = ElementRecord::new("b").with_class("View");
    assert_eq!(with_id, without_id);

    let other_class = ElementRecord::new("c").with_class("Button").with_id("root");
    assert_ne!(with_id, other_class);
}

#[test]
fn element_equality_ignores_enabled_and_descriptions() {
    let a = ElementRecord::new("a").with_id("x").with_enabled(true).with_description("one");
    let b = ElementRecord::new("b").with_id("x").with_enabled(false).with_description("two");
    assert_eq!(a, b);
}

#[test]
fn element_display_lists_properties() {
    let element = ElementRecord::new("q").with_class("Button").with_id("ok");
    let shown = element.to_string();
    assert!(shown.starts_with("id: ok, class: Button, text: null"));
    assert!(shown.ends_with("enabled: false, rect: null"));
}

// =========================================================================
// ElementList
// =========================================================================

#[test]
fn element_list_indexes_each_result() {
    let results = vec![json!({"class": "Button"}), json!({"class": "Button"})];
    let list = ElementList::from_results(&results, " button ").unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.query(), "button");
    assert_eq!(list.get(0).unwrap().query(), "button index:0");
    assert_eq!(list.get(1).unwrap().query(), "button index:1");
}

#[test]
fn element_list_keeps_already_indexed_query() {
    let results = vec![json!({"class": "Button"})];
    let list = ElementList::from_results(&results, "button index:3").unwrap();
    assert_eq!(list.first().unwrap().query(), "button index:3");
}

#[test]
fn element_list_reports_whole_result_on_malformed_item() {
    let results = vec![json!({"class": "Button"}), json!(7)];
    let err = ElementList::from_results(&results, "button").unwrap_err();
    match err {
        InspectError::MalformedElement { query, payload } => {
            assert_eq!(query, "button");
            assert!(payload.starts_with('['));
        }
        other => panic!("Expected MalformedElement, got {:?}", other),
    }
}

#[test]
fn element_list_first_on_empty_fails() {
    let list = ElementList::from_results(&[], "button").unwrap();
    assert!(list.is_empty());
    assert!(matches!(list.first(), Err(InspectError::EmptyCollection(_))));
}
