//! Integration tests for `VaultService` and the rotation gate.

use securevault::crypto::{CipherEngine, MasterKey};
use securevault::errors::VaultError;
use securevault::record::{CardUpdate, CredentialRecord};
use securevault::storage::MemoryStore;
use securevault::vault::{ReuseGuard, VaultService};

fn engine() -> CipherEngine {
    CipherEngine::new(&MasterKey::new([0x42u8; 32])).expect("build engine")
}

fn service() -> VaultService<MemoryStore> {
    VaultService::new(engine(), MemoryStore::new())
}

// ---------------------------------------------------------------------------
// Credentials: create and list
// ---------------------------------------------------------------------------

#[test]
fn add_credential_and_list_metadata_only() {
    let mut service = service();

    let summary = service
        .add_credential("alice", "email", Some("alice@example.com"), "Sunshine1!")
        .unwrap();
    assert_eq!(summary.name, "email");
    assert_eq!(summary.username, "alice@example.com");

    let list = service.list_credentials("alice").unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "email");
    // The summary type carries no secret material at all; spot-check
    // the only string fields it has.
    assert_eq!(list[0].username, "alice@example.com");
}

#[test]
fn add_credential_requires_name_and_password() {
    let mut service = service();

    assert!(matches!(
        service.add_credential("alice", "", None, "pw"),
        Err(VaultError::MissingField("name"))
    ));
    assert!(matches!(
        service.add_credential("alice", "email", None, ""),
        Err(VaultError::MissingField("password"))
    ));
}

#[test]
fn duplicate_name_under_same_owner_is_rejected() {
    let mut service = service();

    service
        .add_credential("alice", "email", None, "pw-1")
        .unwrap();
    let result = service.add_credential("alice", "email", None, "pw-2");

    assert!(matches!(result, Err(VaultError::DuplicateName(_))));
    assert_eq!(service.list_credentials("alice").unwrap().len(), 1);
}

#[test]
fn same_name_under_different_owners_is_fine() {
    let mut service = service();

    service
        .add_credential("alice", "email", None, "pw-a")
        .unwrap();
    service.add_credential("bob", "email", None, "pw-b").unwrap();

    assert_eq!(service.list_credentials("alice").unwrap().len(), 1);
    assert_eq!(service.list_credentials("bob").unwrap().len(), 1);
}

#[test]
fn list_is_scoped_to_owner() {
    let mut service = service();

    service.add_credential("alice", "email", None, "pw").unwrap();
    service.add_credential("bob", "bank", None, "pw").unwrap();

    let alice = service.list_credentials("alice").unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].name, "email");
}

// ---------------------------------------------------------------------------
// Credentials: details and scoping
// ---------------------------------------------------------------------------

#[test]
fn details_decrypts_the_password() {
    let mut service = service();

    let summary = service
        .add_credential("alice", "email", None, "Sunshine1!")
        .unwrap();

    let details = service.credential_details("alice", &summary.id).unwrap();
    assert_eq!(details.password, "Sunshine1!");
}

#[test]
fn wrong_owner_is_indistinguishable_from_missing() {
    let mut service = service();

    let summary = service
        .add_credential("alice", "email", None, "pw")
        .unwrap();

    // Someone else's record and a made-up id fail identically.
    let foreign = service.credential_details("mallory", &summary.id);
    let missing = service.credential_details("alice", "no-such-id");

    assert!(matches!(foreign, Err(VaultError::RecordNotFound)));
    assert!(matches!(missing, Err(VaultError::RecordNotFound)));
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[test]
fn rotate_with_correct_old_password_succeeds() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "Sunshine1!")
        .unwrap();

    service
        .rotate_credential("alice", &summary.id, "Sunshine1!", "Rainbow2@")
        .unwrap();

    let details = service.credential_details("alice", &summary.id).unwrap();
    assert_eq!(details.password, "Rainbow2@");
}

#[test]
fn rotate_with_wrong_old_password_fails_and_changes_nothing() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "Sunshine1!")
        .unwrap();

    let result = service.rotate_credential("alice", &summary.id, "wrong", "Rainbow2@");
    assert!(matches!(result, Err(VaultError::OldSecretMismatch)));

    // The active password is untouched, and the rejected candidate was
    // never recorded: rotating to it later must still succeed.
    let details = service.credential_details("alice", &summary.id).unwrap();
    assert_eq!(details.password, "Sunshine1!");
    service
        .rotate_credential("alice", &summary.id, "Sunshine1!", "Rainbow2@")
        .unwrap();
}

#[test]
fn rotating_to_a_previously_used_password_fails() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "Sunshine1!")
        .unwrap();

    service
        .rotate_credential("alice", &summary.id, "Sunshine1!", "Rainbow2@")
        .unwrap();

    // Back to the original — refused.
    let result = service.rotate_credential("alice", &summary.id, "Rainbow2@", "Sunshine1!");
    assert!(matches!(result, Err(VaultError::SecretReused)));

    // And the current password is still the second one.
    let details = service.credential_details("alice", &summary.id).unwrap();
    assert_eq!(details.password, "Rainbow2@");
}

#[test]
fn rotating_to_the_current_password_fails() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "Sunshine1!")
        .unwrap();

    let result = service.rotate_credential("alice", &summary.id, "Sunshine1!", "Sunshine1!");
    assert!(matches!(result, Err(VaultError::SecretReused)));
}

#[test]
fn rotate_is_owner_scoped() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "Sunshine1!")
        .unwrap();

    let result = service.rotate_credential("mallory", &summary.id, "Sunshine1!", "Rainbow2@");
    assert!(matches!(result, Err(VaultError::RecordNotFound)));
}

// ---------------------------------------------------------------------------
// Rotation gate, exercised directly on a record
// ---------------------------------------------------------------------------

fn record_with_password(engine: &CipherEngine, password: &str) -> CredentialRecord {
    let ciphertext = engine.encrypt(password.as_bytes()).unwrap();
    let now = chrono::Utc::now();
    CredentialRecord {
        id: "r1".into(),
        owner_id: "alice".into(),
        name: "email".into(),
        username: String::new(),
        secret: ciphertext.clone(),
        secret_history: vec![ciphertext],
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn successful_rotation_appends_to_history() {
    let engine = engine();
    let mut record = record_with_password(&engine, "one");

    ReuseGuard::new(&engine)
        .rotate(&mut record, "one", "two")
        .unwrap();

    assert_eq!(record.history_len(), 2);
    // The history always ends with the current ciphertext.
    assert_eq!(record.secret_history.last().unwrap(), &record.secret);
    assert_eq!(engine.decrypt(&record.secret).unwrap(), b"two");
}

#[test]
fn failed_rotation_leaves_history_untouched() {
    let engine = engine();
    let mut record = record_with_password(&engine, "one");
    let history_before = record.secret_history.clone();

    let result = ReuseGuard::new(&engine).rotate(&mut record, "wrong", "two");
    assert!(matches!(result, Err(VaultError::OldSecretMismatch)));
    assert_eq!(record.secret_history, history_before);
}

#[test]
fn corrupt_history_entry_does_not_block_rotation() {
    let engine = engine();
    let mut record = record_with_password(&engine, "one");

    // A legacy/corrupt entry that fails to decrypt.
    record.secret_history.insert(0, vec![0xDE, 0xAD, 0xBE, 0xEF]);

    ReuseGuard::new(&engine)
        .rotate(&mut record, "one", "two")
        .unwrap();
    assert_eq!(engine.decrypt(&record.secret).unwrap(), b"two");
}

#[test]
fn corrupt_current_ciphertext_surfaces_decryption_error() {
    let engine = engine();
    let mut record = record_with_password(&engine, "one");
    record.secret = vec![0u8; 40];

    let result = ReuseGuard::new(&engine).rotate(&mut record, "one", "two");
    assert!(matches!(result, Err(VaultError::DecryptionFailed)));
}

#[test]
fn reuse_is_detected_anywhere_in_history() {
    let engine = engine();
    let mut record = record_with_password(&engine, "one");
    let guard = ReuseGuard::new(&engine);

    guard.rotate(&mut record, "one", "two").unwrap();
    guard.rotate(&mut record, "two", "three").unwrap();

    // "one" is two rotations back but still refused.
    let result = guard.rotate(&mut record, "three", "one");
    assert!(matches!(result, Err(VaultError::SecretReused)));
    assert_eq!(record.history_len(), 3);
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[test]
fn add_card_and_get_details() {
    let mut service = service();

    let summary = service
        .add_card(
            "alice",
            "visa1",
            "Alice Example",
            "4111111111111111",
            "12/27",
            "123",
            None,
            None,
        )
        .unwrap();

    // Defaults from an omitted type/notes.
    assert_eq!(summary.card_type, "Visa");
    assert_eq!(summary.notes, "");

    let details = service.card_details("alice", &summary.id).unwrap();
    assert_eq!(details.number, "4111111111111111");
    assert_eq!(details.cvv, "123");
    assert_eq!(details.expiry, "12/27");
}

#[test]
fn add_card_validates_required_fields() {
    let mut service = service();

    let result = service.add_card("alice", "visa1", "Alice", "", "12/27", "123", None, None);
    assert!(matches!(result, Err(VaultError::MissingField("card number"))));

    let result = service.add_card("alice", "visa1", "Alice", "4111", "", "123", None, None);
    assert!(matches!(result, Err(VaultError::MissingField("expiry"))));
}

#[test]
fn duplicate_card_label_is_rejected() {
    let mut service = service();

    service
        .add_card("alice", "visa1", "Alice", "4111", "12/27", "123", None, None)
        .unwrap();
    let result = service.add_card("alice", "visa1", "Alice", "4222", "01/28", "456", None, None);

    assert!(matches!(result, Err(VaultError::DuplicateName(_))));
}

#[test]
fn card_list_is_metadata_only_and_scoped() {
    let mut service = service();

    service
        .add_card("alice", "visa1", "Alice", "4111", "12/27", "123", None, Some("daily"))
        .unwrap();
    service
        .add_card("bob", "amex", "Bob", "3400", "05/26", "9999", Some("Amex"), None)
        .unwrap();

    let list = service.list_cards("alice").unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].label, "visa1");
    assert_eq!(list[0].notes, "daily");
}

#[test]
fn partial_card_update_touches_only_present_fields() {
    let mut service = service();
    let summary = service
        .add_card("alice", "visa1", "Alice", "4111", "12/27", "123", None, None)
        .unwrap();

    service
        .update_card(
            "alice",
            &summary.id,
            CardUpdate {
                number: Some("4999".into()),
                notes: Some("new card".into()),
                ..CardUpdate::default()
            },
        )
        .unwrap();

    let details = service.card_details("alice", &summary.id).unwrap();
    assert_eq!(details.number, "4999");
    // Untouched fields survive, including the other ciphertext.
    assert_eq!(details.cvv, "123");
    assert_eq!(details.expiry, "12/27");
    assert_eq!(details.notes, "new card");
}

#[test]
fn empty_card_update_is_a_no_op() {
    let mut service = service();
    let summary = service
        .add_card("alice", "visa1", "Alice", "4111", "12/27", "123", None, None)
        .unwrap();

    service
        .update_card("alice", &summary.id, CardUpdate::default())
        .unwrap();

    let details = service.card_details("alice", &summary.id).unwrap();
    assert_eq!(details.number, "4111");
}

#[test]
fn card_update_is_owner_scoped() {
    let mut service = service();
    let summary = service
        .add_card("alice", "visa1", "Alice", "4111", "12/27", "123", None, None)
        .unwrap();

    let result = service.update_card(
        "mallory",
        &summary.id,
        CardUpdate {
            cvv: Some("000".into()),
            ..CardUpdate::default()
        },
    );
    assert!(matches!(result, Err(VaultError::RecordNotFound)));
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[test]
fn removed_credential_is_gone() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "pw")
        .unwrap();

    service.remove_credential("alice", &summary.id).unwrap();

    assert!(matches!(
        service.credential_details("alice", &summary.id),
        Err(VaultError::RecordNotFound)
    ));
    assert!(service.list_credentials("alice").unwrap().is_empty());
}

#[test]
fn remove_is_owner_scoped() {
    let mut service = service();
    let summary = service
        .add_credential("alice", "email", None, "pw")
        .unwrap();

    let result = service.remove_credential("mallory", &summary.id);
    assert!(matches!(result, Err(VaultError::RecordNotFound)));

    // Alice's record is still there.
    assert_eq!(service.list_credentials("alice").unwrap().len(), 1);
}

#[test]
fn removed_card_is_gone() {
    let mut service = service();
    let summary = service
        .add_card("alice", "visa1", "Alice", "4111", "12/27", "123", None, None)
        .unwrap();

    service.remove_card("alice", &summary.id).unwrap();
    assert!(matches!(
        service.card_details("alice", &summary.id),
        Err(VaultError::RecordNotFound)
    ));
}
