//! Tests for webhook signature verification.

use std::collections::HashMap;

use super::signature::{
    WebhookEvent, compute_signature, construct_event, verify_header, verify_signature,
};

const SECRET: &str = "webhook_test_secret";

const SIGNED_PAYLOAD: &str = r##"{"data":{"type":"webhook_issues","id":"a3233e48-5e70-4138-95b2-a72d4875016b","attributes":{"reason":"Page limit exceeded","url":"https:\/\/test\/receiver","created_at":"2023-08-03T11:24:39+0200"},"relationships":{"organisation":{"links":{"related":"http:\/\/api-test.v2.pingen.com\/organisations\/2017973a-6403-444d-af05-eb4b2b7f5e2f"},"data":{"type":"organisations","id":"2017973a-6403-444d-af05-eb4b2b7f5e2f"}},"letter":{"links":{"related":"http:\/\/api-test.v2.pingen.com\/organisations\/2017973a-6403-444d-af05-eb4b2b7f5e2f\/letters\/4f31cdb2-bc0d-4db5-a13d-3336958dba02"},"data":{"type":"letters","id":"4f31cdb2-bc0d-4db5-a13d-3336958dba02"}},"event":{"data":{"type":"letters_events","id":"ba08eb5f-413c-4dd1-8ed6-aac2b96124d0"}}}},"included":[{"type":"organisations","id":"2017973a-6403-444d-af05-eb4b2b7f5e2f","attributes":{"name":"Prof. Leopoldo Hahn","status":"active","plan":"free","billing_mode":"postpaid","billing_currency":"CHF","billing_balance":0,"default_country":"CH","edition":"pingen","default_address_position":"left","data_retention_addresses":12,"data_retention_pdf":12,"color":"#0758FF","created_at":"2023-08-03T11:24:39+0200","updated_at":"2023-08-03T11:24:39+0200"},"links":{"self":"http:\/\/api-test.v2.pingen.com\/organisations\/2017973a-6403-444d-af05-eb4b2b7f5e2f"}},{"type":"letters","id":"4f31cdb2-bc0d-4db5-a13d-3336958dba02","attributes":{"status":"validating","file_original_name":"ullam.pdf","file_pages":null,"address":null,"address_position":"left","country":null,"delivery_product":"fast","print_mode":"simplex","print_spectrum":"color","price_currency":null,"price_value":null,"paper_types":null,"fonts":null,"source":"app","tracking_number":null,"submitted_at":null,"created_at":"2023-08-03T11:24:39+0200","updated_at":"2023-08-03T11:24:39+0200"},"links":{"self":"http:\/\/api-test.v2.pingen.com\/organisations\/2017973a-6403-444d-af05-eb4b2b7f5e2f\/letters\/4f31cdb2-bc0d-4db5-a13d-3336958dba02"}},{"type":"letters_events","id":"ba08eb5f-413c-4dd1-8ed6-aac2b96124d0","attributes":{"code":"file_too_many_pages","name":"Page limit exceeded","producer":"Pingen","location":"","has_image":false,"data":[],"emitted_at":"2023-08-03T11:24:39+0200","created_at":"2023-08-03T11:24:39+0200","updated_at":"2023-08-03T11:24:39+0200"}}]}"##;

const SIGNED_PAYLOAD_SIGNATURE: &str =
    "812ac7c9776458ce47f1796faec3eca4b15f47b3b9bcfeca3ad90cc190ba0c27";

const UNSIGNED_PAYLOAD: &str = r##"{"data":{"type":"webhook_issues","id":"309a31e0-1abe-4034-8e7e-1fd473a802fd","attributes":{"reason":"Page limit exceeded","url":"https://5f2e-5-173-206-46.ngrok-free.app/webhook","created_at":"2024-04-26T09:54:38+0200"},"relationships":{"organisation":{"links":{"related":"https://api-integration.pingen.com/organisations/b85c7b52-debb-4b15-b5db-d86b0a4e9bbf"},"data":{"type":"organisations","id":"b85c7b52-debb-4b15-b5db-d86b0a4e9bbf"}},"letter":{"links":{"related":"https://api-integration.pingen.com/organisations/b85c7b52-debb-4b15-b5db-d86b0a4e9bbf/letters/xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"},"data":{"type":"letters","id":"xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"}},"event":{"data":{"type":"letters_events","id":"xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"}}}},"included":[]}"##;

fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

mod signature {
    use super::*;

    #[test]
    fn matches_known_vector() {
        assert_eq!(
            compute_signature(SIGNED_PAYLOAD, SECRET).unwrap(),
            SIGNED_PAYLOAD_SIGNATURE
        );
    }

    #[test]
    fn matches_short_vector() {
        assert_eq!(
            compute_signature("test", "secret").unwrap(),
            "0329a06b62cd16b33eb6792be8c60b158d89a2ee3a876fce9a881ebb488c0914"
        );
    }

    #[test]
    fn is_lowercase_hex() {
        let sig = compute_signature("payload", "key").unwrap();

        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn empty_secret_is_accepted() {
        assert!(compute_signature("payload", "").is_ok());
    }
}

mod verification {
    use super::*;

    #[test]
    fn valid_signature_passes() {
        let sig = compute_signature("test", "secret").unwrap();

        assert!(verify_signature("test", Some(&sig), "secret").is_ok());
    }

    #[test]
    fn missing_signature_is_reported() {
        let err = verify_signature("test", None, "secret").unwrap_err();

        assert_eq!(err.message(), "signature missing");
        assert_eq!(err.to_string(), "WebhookSignatureException: signature missing");
    }

    #[test]
    fn wrong_signature_is_reported() {
        let err = verify_signature("test", Some("wrongsig"), "secret").unwrap_err();

        assert_eq!(err.message(), "webhook signature matching failed");
    }

    #[test]
    fn uppercase_signature_does_not_match() {
        let upper = compute_signature("test", "secret").unwrap().to_uppercase();

        assert!(verify_signature("test", Some(&upper), "secret").is_err());
    }

    #[test]
    fn wrong_secret_does_not_match() {
        let sig = compute_signature("test", "secret").unwrap();

        assert!(verify_signature("test", Some(&sig), "other").is_err());
    }

    #[test]
    fn tampered_payload_does_not_match() {
        let sig = compute_signature("test", "secret").unwrap();

        assert!(verify_signature("test ", Some(&sig), "secret").is_err());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let sig = compute_signature("test", "secret").unwrap();

        assert!(verify_header("test", &headers(&[("signature", sig.as_str())]), "secret").is_ok());
        assert!(verify_header("test", &headers(&[("SIGNATURE", sig.as_str())]), "secret").is_ok());
    }

    #[test]
    fn exact_header_name_wins_over_other_spellings() {
        let sig = compute_signature("test", "secret").unwrap();

        for i in 0..100 {
            let bad = format!("bad{i}");
            let map = headers(&[("signature", bad.as_str()), ("Signature", sig.as_str())]);

            assert!(verify_header("test", &map, "secret").is_ok());
        }
    }

    #[test]
    fn case_insensitive_fallback_is_stable() {
        let sig = compute_signature("test", "secret").unwrap();

        // "SIGNATURE" orders before "signature".
        for _ in 0..100 {
            let map = headers(&[("signature", "bad"), ("SIGNATURE", sig.as_str())]);

            assert!(verify_header("test", &map, "secret").is_ok());
        }
    }
}

mod events {
    use super::*;

    #[test]
    fn known_delivery_is_accepted() {
        let headers = headers(&[
            ("Content-Type", "application/vnd.api+json"),
            ("Signature", SIGNED_PAYLOAD_SIGNATURE),
        ]);

        let event = construct_event(SIGNED_PAYLOAD, &headers, SECRET).unwrap();

        let value: serde_json::Value = event.parse().unwrap();
        assert_eq!(value["data"]["type"], "webhook_issues");
        assert_eq!(event.payload(), SIGNED_PAYLOAD);
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = headers(&[("Content-Type", "application/vnd.api+json")]);

        let err = construct_event(UNSIGNED_PAYLOAD, &headers, SECRET).unwrap_err();

        assert_eq!(err.message(), "signature missing");
    }

    #[test]
    fn invalid_signature_is_rejected() {
        let headers = headers(&[
            ("Content-Type", "application/vnd.api+json"),
            (
                "Signature",
                "wrong99999999999999999999999999999999999999999999999999signature",
            ),
        ]);

        let err = construct_event(UNSIGNED_PAYLOAD, &headers, SECRET).unwrap_err();

        assert_eq!(err.message(), "webhook signature matching failed");
    }

    #[test]
    fn into_payload_returns_raw_text() {
        let event = WebhookEvent {
            payload: "raw".to_string(),
        };

        assert_eq!(event.into_payload(), "raw");
    }
}
