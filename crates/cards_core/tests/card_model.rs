use cards_core::{Card, CardState, CardValidationError};
use uuid::Uuid;

#[test]
fn card_new_sets_defaults() {
    let card = Card::new("card 1");

    assert_eq!(card.id, None);
    assert_eq!(card.name, "card 1");
    assert_eq!(card.state, CardState::Todo);
    assert!(!card.is_done());
}

#[test]
fn with_state_keeps_requested_state() {
    let card = Card::with_state("card 2", CardState::InProgress);
    assert_eq!(card.state, CardState::InProgress);

    let done = Card::with_state("card 3", CardState::Done);
    assert!(done.is_done());
}

#[test]
fn state_text_forms_are_canonical() {
    assert_eq!(CardState::Todo.to_string(), "todo");
    assert_eq!(CardState::InProgress.to_string(), "in prog");
    assert_eq!(CardState::Done.to_string(), "done");

    assert_eq!("in prog".parse::<CardState>().unwrap(), CardState::InProgress);
    let err = "in_progress".parse::<CardState>().unwrap_err();
    assert!(err.to_string().contains("in_progress"));
}

#[test]
fn card_serialization_uses_expected_wire_fields() {
    let card_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut card = Card::with_state("in_prog_card", CardState::InProgress);
    card.id = Some(card_id);

    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["id"], card_id.to_string());
    assert_eq!(json["name"], "in_prog_card");
    assert_eq!(json["state"], "in prog");

    let decoded: Card = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, card);
}

#[test]
fn unstored_card_serializes_without_id() {
    let json = serde_json::to_value(Card::new("card 1")).unwrap();
    assert!(json.get("id").is_none());
    assert_eq!(json["state"], "todo");
}

#[test]
fn validate_rejects_blank_name() {
    let err = Card::new("").validate().unwrap_err();
    assert_eq!(err, CardValidationError::EmptyName);

    let err = Card::new(" \t ").validate().unwrap_err();
    assert_eq!(err, CardValidationError::EmptyName);
}
