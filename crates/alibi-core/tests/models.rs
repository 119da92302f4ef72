use alibi_core::models::context::{BelievabilityLevel, ExcuseContext, UrgencyLevel};
use alibi_core::models::excuse::SavedExcuse;
use alibi_core::models::generation::GenerationRequest;

#[test]
fn context_parses_wire_values() {
    assert_eq!("work".parse::<ExcuseContext>().unwrap(), ExcuseContext::Work);
    assert_eq!("Family".parse::<ExcuseContext>().unwrap(), ExcuseContext::Family);
    assert!("vacation".parse::<ExcuseContext>().is_err());
}

#[test]
fn believability_accepts_cli_spellings() {
    assert_eq!(
        "a-little-stretchy".parse::<BelievabilityLevel>().unwrap(),
        BelievabilityLevel::ALittleStretchy
    );
    assert_eq!(
        "Very Believable".parse::<BelievabilityLevel>().unwrap(),
        BelievabilityLevel::VeryBelievable
    );
    assert!("totally made up".parse::<BelievabilityLevel>().is_err());
}

#[test]
fn blank_modifiers_are_unset() {
    let request = GenerationRequest::new(ExcuseContext::School)
        .with_urgency("  ")
        .with_believability("");
    assert_eq!(request.urgency(), None);
    assert_eq!(request.believability(), None);
}

#[test]
fn unset_modifiers_are_omitted_on_write() {
    let excuse = SavedExcuse::new("Dog ate it.", ExcuseContext::School, None, None);
    let json = serde_json::to_value(&excuse).unwrap();
    let obj = json.as_object().unwrap();

    assert!(!obj.contains_key("urgency"));
    assert!(!obj.contains_key("believability"));
    assert_eq!(obj["context"], "school");
    assert!(obj.contains_key("createdAt"));
}

#[test]
fn set_modifiers_use_display_values() {
    let excuse = SavedExcuse::new(
        "Flat tyre.",
        ExcuseContext::Work,
        Some(UrgencyLevel::High),
        Some(BelievabilityLevel::SomewhatBelievable),
    );
    let json = serde_json::to_value(&excuse).unwrap();

    assert_eq!(json["urgency"], "High");
    assert_eq!(json["believability"], "Somewhat Believable");
}

#[test]
fn empty_string_modifiers_load_as_unset() {
    let raw = r#"{
        "id": "0b6f3c1e-2a7d-4c59-9f4e-1d2c3b4a5f60",
        "text": "Stuck in traffic.",
        "context": "social",
        "urgency": "",
        "believability": "",
        "createdAt": "2024-05-01T12:00:00Z"
    }"#;

    let excuse: SavedExcuse = serde_json::from_str(raw).unwrap();
    assert_eq!(excuse.urgency, None);
    assert_eq!(excuse.believability, None);
    assert_eq!(excuse.context, ExcuseContext::Social);
}

#[test]
fn saved_excuses_get_distinct_ids() {
    let a = SavedExcuse::new("Same text.", ExcuseContext::Work, None, None);
    let b = SavedExcuse::new("Same text.", ExcuseContext::Work, None, None);
    assert_ne!(a.id, b.id);
    let parsed = uuid::Uuid::parse_str(&a.id).unwrap();
    assert_eq!(parsed.get_version_num(), 4);
}
