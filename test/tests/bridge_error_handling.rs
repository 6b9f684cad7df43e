use entbridge_server::{shared::CallbackError, BridgeError};

#[test]
fn test_callback_creation_error_carries_source() {
    let error = BridgeError::CallbackCreation {
        name: "OnEntityCheckTransmit".to_string(),
        source: CallbackError::Exhausted {
            name: "OnEntityCheckTransmit".to_string(),
            capacity: 4,
        },
    };

    let message = error.to_string();
    assert!(message.contains("Failed to create callback 'OnEntityCheckTransmit'"));
    assert!(message.contains("registry is full"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_not_started_error_names_operation() {
    let error = BridgeError::NotStarted {
        operation: "registering the entity listener",
    };

    assert_eq!(
        error.to_string(),
        "Bridge must be started before registering the entity listener"
    );
}

#[test]
fn test_duplicate_name_error_type() {
    let error = BridgeError::DuplicateCallbackName {
        name: "OnEntitySpawned".to_string(),
    };

    assert!(error.to_string().contains("more than once"));
}

#[test]
fn test_error_variants_are_sendable() {
    fn assert_send<T: Send>() {}
    assert_send::<BridgeError>();
}
