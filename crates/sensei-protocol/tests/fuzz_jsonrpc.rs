//! Property-based tests for envelope validation.
//!
//! Ensures the validator never panics on arbitrary JSON and that
//! well-formed requests keep their id and method.

use proptest::prelude::*;
use sensei_protocol::{validate_envelope, Envelope, RequestId};
use serde_json::Value;

proptest! {
    /// Arbitrary text that happens to parse never panics the validator.
    #[test]
    fn no_panic_on_arbitrary_json(input in "\\PC{0,256}") {
        if let Ok(value) = serde_json::from_str::<Value>(&input) {
            let _ = validate_envelope(value);
        }
    }

    /// Integer ids are echoed unchanged.
    #[test]
    fn integer_id_preserved(method in "[a-z/]{1,32}", id in any::<i64>()) {
        let value = serde_json::json!({"jsonrpc": "2.0", "id": id, "method": method.clone()});
        match validate_envelope(value) {
            Ok(Envelope::Request(req)) => {
                prop_assert_eq!(req.id, RequestId::from(id));
                prop_assert_eq!(req.method, method);
            }
            other => prop_assert!(false, "unexpected: {:?}", other),
        }
    }

    /// String ids are echoed unchanged.
    #[test]
    fn string_id_preserved(id in "\\PC{0,40}") {
        let value = serde_json::json!({"jsonrpc": "2.0", "id": id.clone(), "method": "ping"});
        match validate_envelope(value) {
            Ok(Envelope::Request(req)) => prop_assert_eq!(req.id, RequestId::String(id)),
            other => prop_assert!(false, "unexpected: {:?}", other),
        }
    }

    /// Non-object params are always rejected.
    #[test]
    fn scalar_params_rejected(n in any::<i64>()) {
        let value = serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "x", "params": n});
        prop_assert!(validate_envelope(value).is_err());
    }

    /// Missing "method" always fails.
    #[test]
    fn missing_method_fails(id in 1i64..1000) {
        let value = serde_json::json!({"jsonrpc": "2.0", "id": id});
        prop_assert!(validate_envelope(value).is_err());
    }
}
