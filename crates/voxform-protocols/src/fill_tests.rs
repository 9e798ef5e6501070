use super::*;

#[test]
fn test_deserialize_full_instruction() {
    let json = r#"{"action": "replace", "value": "John Smith", "type": "text", "confidence": 0.95}"#;
    let instruction: FillInstruction = serde_json::from_str(json).unwrap();
    assert_eq!(instruction.action, FillAction::Replace);
    assert_eq!(instruction.value, "John Smith");
    assert_eq!(instruction.value_type, ValueType::Text);
    assert!((instruction.confidence - 0.95).abs() < f64::EPSILON);
}

#[test]
fn test_unknown_action_deserializes() {
    let json = r#"{"action": "shout", "value": "x", "type": "text", "confidence": 0.9}"#;
    let instruction: FillInstruction = serde_json::from_str(json).unwrap();
    assert_eq!(instruction.action, FillAction::Unknown);
}

#[test]
fn test_missing_fields_use_defaults() {
    let instruction: FillInstruction = serde_json::from_str("{}").unwrap();
    assert_eq!(instruction.action, FillAction::Unknown);
    assert_eq!(instruction.value, "");
    assert_eq!(instruction.value_type, ValueType::Text);
    assert_eq!(instruction.confidence, 0.0);
}

#[test]
fn test_extra_fields_are_ignored() {
    let json = r#"{"action": "clear", "value": "", "type": "text", "confidence": 0.5, "error": "boom"}"#;
    let instruction: FillInstruction = serde_json::from_str(json).unwrap();
    assert_eq!(instruction.action, FillAction::Clear);
}

#[test]
fn test_unknown_type_maps_to_other() {
    let json = r#"{"action": "replace", "value": "+1 555", "type": "phone", "confidence": 0.8}"#;
    let instruction: FillInstruction = serde_json::from_str(json).unwrap();
    assert_eq!(instruction.value_type, ValueType::Other);
}

#[test]
fn test_serialize_uses_type_key() {
    let instruction = FillInstruction::replace("12345", 0.9).with_type(ValueType::Number);
    let json = serde_json::to_value(&instruction).unwrap();
    assert_eq!(json["type"], "number");
    assert_eq!(json["action"], "replace");
    assert!(json.get("value_type").is_none());
}

#[test]
fn test_fallback_shape() {
    let instruction = FillInstruction::fallback("hello there");
    assert_eq!(instruction.action, FillAction::Replace);
    assert_eq!(instruction.value, "hello there");
    assert_eq!(instruction.value_type, ValueType::Text);
    assert_eq!(instruction.confidence, 0.5);
}

#[test]
fn test_missing_transcript_shape() {
    let instruction = FillInstruction::missing_transcript();
    assert_eq!(instruction.action, FillAction::Replace);
    assert!(instruction.value.is_empty());
    assert_eq!(instruction.confidence, 0.0);
}

#[test]
fn test_confidence_gate_is_strict() {
    assert!(!FillInstruction::replace("x", 0.5).is_confident(0.5));
    assert!(FillInstruction::replace("x", 0.51).is_confident(0.5));
    assert!(!FillInstruction::replace("x", 0.3).is_confident(0.5));
}

#[test]
fn test_confidence_is_clamped() {
    assert_eq!(FillInstruction::replace("x", 1.7).confidence, 1.0);
    assert_eq!(FillInstruction::replace("x", -0.2).confidence, 0.0);
}

#[test]
fn test_interpret_request_skips_missing_prompt() {
    let json = serde_json::to_value(InterpretRequest::new("John")).unwrap();
    assert_eq!(json["transcript"], "John");
    assert!(json.get("prompt").is_none());

    let json = serde_json::to_value(InterpretRequest::new("John").with_prompt("Be terse")).unwrap();
    assert_eq!(json["prompt"], "Be terse");
}
