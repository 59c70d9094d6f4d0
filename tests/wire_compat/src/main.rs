fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use linnet_protocol::messages::{ErrorResponse, SlotRequest, SlotResponse};
    use linnet_protocol::types::{ErrorCondition, UploadComponent};

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent comparison).
    ///
    /// These fixtures pin the wire format: a change that breaks one of them
    /// breaks every peer that speaks the old shape.
    fn roundtrip_test<T>(fixture: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture: serde_json::Value =
            serde_json::from_str(fixture).expect("fixture is not valid JSON");
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize fixture: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize fixture: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch:\n  fixture: {fixture}\n  rust:    {reserialized}"
        );
    }

    #[test]
    fn fixture_slot_request() {
        roundtrip_test::<SlotRequest>(
            r#"{
                "filename": "holiday.jpg",
                "size": 2097152,
                "contentType": "image/jpeg"
            }"#,
        );
    }

    #[test]
    fn fixture_slot_response() {
        roundtrip_test::<SlotResponse>(
            r#"{
                "putUrl": "https://upload.example.org/4a77/holiday.jpg",
                "putHeaders": [
                    { "name": "Authorization", "value": "Bearer 4a77" },
                    { "name": "Cookie", "value": "album=summer" }
                ],
                "getUrl": "https://download.example.org/4a77/holiday.jpg"
            }"#,
        );
    }

    #[test]
    fn fixture_slot_response_without_headers() {
        roundtrip_test::<SlotResponse>(
            r#"{
                "putUrl": "https://upload.example.org/9b01/notes.txt",
                "getUrl": "https://download.example.org/9b01/notes.txt"
            }"#,
        );
    }

    #[test]
    fn fixture_error_response() {
        roundtrip_test::<ErrorResponse>(
            r#"{
                "condition": "item-not-found",
                "text": "upload service disabled"
            }"#,
        );
    }

    #[test]
    fn fixture_upload_component() {
        roundtrip_test::<UploadComponent>(
            r#"{
                "address": "upload.example.org",
                "maxSize": 104857600
            }"#,
        );
    }

    #[test]
    fn fixture_upload_component_without_limit() {
        roundtrip_test::<UploadComponent>(r#"{ "address": "upload.example.org" }"#);
    }

    #[test]
    fn every_error_condition_has_a_stable_wire_name() {
        let conditions = [
            (ErrorCondition::ItemNotFound, "item-not-found"),
            (ErrorCondition::FeatureNotImplemented, "feature-not-implemented"),
            (ErrorCondition::Forbidden, "forbidden"),
            (ErrorCondition::NotAcceptable, "not-acceptable"),
            (ErrorCondition::ResourceConstraint, "resource-constraint"),
            (ErrorCondition::ServiceUnavailable, "service-unavailable"),
            (ErrorCondition::InternalServerError, "internal-server-error"),
            (ErrorCondition::RemoteServerTimeout, "remote-server-timeout"),
            (ErrorCondition::UndefinedCondition, "undefined-condition"),
        ];
        for (condition, wire) in conditions {
            let json = serde_json::to_string(&condition).unwrap();
            assert_eq!(json, format!("\"{wire}\""));
            let back: ErrorCondition = serde_json::from_str(&json).unwrap();
            assert_eq!(back, condition);
        }
    }
}
