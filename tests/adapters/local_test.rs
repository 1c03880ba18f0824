//! Local sender tests through the public action API.

use loops_action::providers::{LocalSender, LoggerSender};
use loops_action::testing::*;
use loops_action::{
    ActionError, ActionSettings, DeliveryError, Entry, FormAction, LoopsAction, Sender, Trigger,
};

fn entry() -> Entry {
    Entry::new(3, 7)
        .item_key("k3")
        .created_at("2024-01-01 10:00:00")
        .updated_at("2024-01-02 11:00:00")
        .field("name", "Ada")
        .field("email", "ada@example.com")
        .field("topics", vec!["rust", "mail"])
}

fn settings() -> ActionSettings {
    ActionSettings::new("welcome")
        .to_field("email")
        .subject_line("Welcome, {{name}}!")
}

#[tokio::test]
async fn action_records_payload() {
    let action = LoopsAction::new(LocalSender::new());

    action.execute(Trigger::Create, &entry(), &settings()).await.unwrap();

    let sender = action.sender();
    assert_payload_count(sender, 1);
    assert_payload_to(sender, "ada@example.com");
    assert_variable_eq(sender, "entry_id", "3");
    assert_variable_eq(sender, "entry_key", "k3");
    assert_variable_eq(sender, "topics", "rust, mail");
    assert_variable_eq(sender, "updated_date", "2024-01-02 11:00:00");
    assert_subject_matches(sender, r"^Welcome, Ada!$");
}

#[tokio::test]
async fn update_trigger_is_recorded() {
    let action = LoopsAction::new(LocalSender::new());

    action.execute(Trigger::Update, &entry(), &settings()).await.unwrap();

    assert_variable_eq(action.sender(), "trigger_type", "update");
}

#[tokio::test]
async fn fixed_address_used_without_field() {
    let action = LoopsAction::new(LocalSender::new());
    let settings = ActionSettings::new("welcome").to_email("ops@example.com");

    action.execute(Trigger::Create, &entry(), &settings).await.unwrap();

    assert_payload_to(action.sender(), "ops@example.com");
    assert!(action.sender().last_payload().unwrap().payload.subject().is_none());
}

#[tokio::test]
async fn missing_recipient_sends_nothing() {
    let action = LoopsAction::new(LocalSender::new());
    let settings = ActionSettings::new("welcome");

    let err = action.execute(Trigger::Create, &entry(), &settings).await.unwrap_err();

    assert_eq!(err, ActionError::InvalidRecipient(String::new()));
    assert_no_payloads_sent(action.sender());
}

#[tokio::test]
async fn rejection_surfaces_as_delivery_error() {
    let sender = LocalSender::new();
    sender.set_rejection(422, r#"{"message":"bad template"}"#);
    let action = LoopsAction::new(sender);

    let err = action.execute(Trigger::Create, &entry(), &settings()).await.unwrap_err();

    assert_eq!(
        err,
        ActionError::Delivery(DeliveryError::rejected(422, r#"{"message":"bad template"}"#))
    );
    assert_no_payloads_sent(action.sender());
}

#[tokio::test]
async fn shared_storage_across_clones() {
    let sender = LocalSender::new();
    let action = LoopsAction::new(sender.clone());

    action.execute(Trigger::Create, &entry(), &settings()).await.unwrap();
    action.execute(Trigger::Update, &entry(), &settings()).await.unwrap();

    assert_payload_count(&sender, 2);
    assert!(sender.sent_with_subject("Welcome, Ada!"));
}

#[tokio::test]
async fn logger_sender_always_accepts() {
    let action = LoopsAction::new(LoggerSender::full());

    let result = action.execute(Trigger::Create, &entry(), &settings()).await.unwrap();

    assert!(result.message_id.is_some());
    assert_eq!(action.sender().provider_name(), "logger");
}
