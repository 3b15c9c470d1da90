//! Callback signature computation and verification.
//!
//! Every callback notification POSTed to a merchant `callbackUrl` carries a
//! `signature` next to its `result` payload:
//!
//! ```text
//! signature = base64(sha256("v1:v2:...:vn:" + signature_key))
//! ```
//!
//! where `v1..vn` are the formatted values (values only, never the field
//! names) of the non-null `result` fields, sorted by field name ASCII
//! case-insensitively. The `amount` and `commission` fields are formatted
//! as fixed-point decimals with exactly two fractional digits; everything
//! else contributes its plain text form.
//!
//! Both operations are pure functions of `(payload, key)`: no timestamps,
//! no nonces, no caching. The gateway retries a callback with the same
//! signature, so the computation must be deterministic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::objects::callback::{CallbackEnvelope, CallbackValue, ResultPayload};

/// Errors produced by signature operations.
///
/// Missing or mismatching signatures are not errors; they surface as an
/// `Ok(false)` verification outcome. The signature key is never part of an
/// error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// An `amount`/`commission` field could not be coerced to a number.
    /// No default is substituted; garbage input must not hash.
    #[error("field `{field}` is not a valid amount: `{value}`")]
    MalformedAmount { field: String, value: String },
}

// ---------------------------------------------------------------------------
// Canonical value formatting
// ---------------------------------------------------------------------------

type ValueFormatter = fn(&str, &CallbackValue) -> Result<Option<String>, SignatureError>;

/// Formatting dispatch by field name. `amount` and `commission` (exact,
/// case-sensitive) get the fixed-point treatment; every other field is
/// rendered as plain text.
fn formatter_for(field: &str) -> ValueFormatter {
    match field {
        "amount" | "commission" => format_two_decimals,
        _ => format_plain,
    }
}

/// Render a value as plain text: numbers in their natural decimal form,
/// booleans as `true`/`false`. `None` for null.
fn format_plain(_field: &str, value: &CallbackValue) -> Result<Option<String>, SignatureError> {
    Ok(match value {
        CallbackValue::Null => None,
        CallbackValue::Bool(b) => Some(b.to_string()),
        CallbackValue::Number(n) => Some(n.to_string()),
        CallbackValue::Text(s) => Some(s.clone()),
    })
}

/// Coerce a value to a decimal and render it with exactly two fractional
/// digits, rounding half away from zero (`0.1` → `"0.10"`, `50` →
/// `"50.00"`, `"12.005"` → `"12.01"`).
///
/// Numeric-looking text is accepted and treated identically to a native
/// number; anything else is a [`SignatureError::MalformedAmount`].
fn format_two_decimals(field: &str, value: &CallbackValue) -> Result<Option<String>, SignatureError> {
    let raw = match value {
        CallbackValue::Null => return Ok(None),
        CallbackValue::Number(n) => n.to_string(),
        CallbackValue::Text(s) => s.trim().to_owned(),
        CallbackValue::Bool(b) => b.to_string(),
    };

    let parsed: Decimal = raw.parse().map_err(|_| SignatureError::MalformedAmount {
        field: field.to_owned(),
        value: raw.clone(),
    })?;

    let rounded = parsed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(Some(format!("{rounded:.2}")))
}

// ---------------------------------------------------------------------------
// Signature computation
// ---------------------------------------------------------------------------

/// Compute the canonical signature for a callback `result` payload.
///
/// Null fields and fields whose formatted text trims to empty contribute
/// nothing, not even a separator. A payload with no surviving fields
/// degenerates to hashing `":" + key`, which is still well-defined.
pub fn compute_data_signature(
    payload: &ResultPayload,
    signature_key: &str,
) -> Result<String, SignatureError> {
    let mut entries: Vec<(&str, String)> = Vec::with_capacity(payload.len());
    for (field, value) in payload {
        let Some(formatted) = formatter_for(field)(field, value)? else {
            continue;
        };
        let trimmed = formatted.trim();
        if trimmed.is_empty() {
            continue;
        }
        entries.push((field.as_str(), trimmed.to_owned()));
    }

    // ASCII case-insensitive order by field name; original bytes break ties
    // so equal-folding names still sort deterministically.
    entries.sort_by(|(a, _), (b, _)| {
        let folded = a
            .bytes()
            .map(|c| c.to_ascii_lowercase())
            .cmp(b.bytes().map(|c| c.to_ascii_lowercase()));
        folded.then_with(|| a.as_bytes().cmp(b.as_bytes()))
    });

    let mut input = entries
        .iter()
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(":");
    input.push(':');
    input.push_str(signature_key);

    let digest = ring::digest::digest(&ring::digest::SHA256, input.as_bytes());
    Ok(fast32::base64::RFC4648.encode(digest.as_ref()))
}

/// Verify the signature of a parsed callback notification.
///
/// Returns `Ok(false)` when the envelope has an empty `result` or an empty
/// `signature` (fails closed), or when the recomputed signature does not
/// match. The comparison is constant-time and byte-exact.
pub fn validate_callback_signature(
    envelope: &CallbackEnvelope,
    signature_key: &str,
) -> Result<bool, SignatureError> {
    if envelope.result.is_empty() || envelope.signature.is_empty() {
        return Ok(false);
    }

    let computed = compute_data_signature(&envelope.result, signature_key)?;
    Ok(ring::constant_time::verify_slices_are_equal(
        computed.as_bytes(),
        envelope.signature.as_bytes(),
    )
    .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test-secret";

    fn payload(fields: &[(&str, CallbackValue)]) -> ResultPayload {
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    fn number(raw: &str) -> CallbackValue {
        CallbackValue::Number(raw.parse().unwrap())
    }

    /// Canonical string `50.00:0.10:MDL:c3108…:test-secret`.
    fn reference_payload() -> ResultPayload {
        payload(&[
            ("qrId", "c3108b2f-6c2e-43a2-bdea-123456789012".into()),
            ("amount", number("50.00")),
            ("commission", number("0.1")),
            ("currency", "MDL".into()),
            ("terminalId", CallbackValue::Null),
        ])
    }

    const REFERENCE_SIGNATURE: &str = "v1mPsszk0oDnMdMLifzCWLzGIORDMv0PZfH2ABgK1HE=";

    #[test]
    fn reference_vector() {
        let sig = compute_data_signature(&reference_payload(), KEY).unwrap();
        assert_eq!(sig, REFERENCE_SIGNATURE);
    }

    #[test]
    fn deterministic() {
        let p = reference_payload();
        assert_eq!(
            compute_data_signature(&p, KEY).unwrap(),
            compute_data_signature(&p, KEY).unwrap(),
        );
    }

    #[test]
    fn round_trip_validates() {
        let envelope = CallbackEnvelope {
            result: reference_payload(),
            signature: compute_data_signature(&reference_payload(), KEY).unwrap(),
        };
        assert!(validate_callback_signature(&envelope, KEY).unwrap());
    }

    #[test]
    fn tampered_field_is_rejected() {
        let mut result = reference_payload();
        let signature = compute_data_signature(&result, KEY).unwrap();
        result.insert("amount".to_owned(), number("51.00"));

        let envelope = CallbackEnvelope { result, signature };
        assert!(!validate_callback_signature(&envelope, KEY).unwrap());
    }

    #[test]
    fn wrong_key_is_rejected() {
        let envelope = CallbackEnvelope {
            result: reference_payload(),
            signature: REFERENCE_SIGNATURE.to_owned(),
        };
        assert!(!validate_callback_signature(&envelope, "other-secret").unwrap());
    }

    /// The payment notification from the gateway documentation, parsed the
    /// way a webhook handler would receive it.
    #[test]
    fn documentation_payment_notification() {
        let json = serde_json::json!({
            "result": {
                "qrId": "c3108b2f-6c2e-43a2-bdea-123456789012",
                "extensionId": "3fe7f013-23a6-4d09-a4a4-123456789012",
                "qrStatus": "Paid",
                "payId": "eb361f48-bb39-45e2-950b-123456789012",
                "referenceId": "MIA0001234567",
                "orderId": "123",
                "amount": 50.00,
                "commission": 0.1,
                "currency": "MDL",
                "payerName": "TEST QR PAYMENT",
                "payerIban": "MD88AG000000011621810140",
                "executedAt": "2025-04-18T14:04:11.81145+00:00",
                "terminalId": null
            },
            "signature": "yw2UxYxuYPSb7IqDAMPBjCMVkBWQsCeCn54bx5B16DQ="
        });
        let envelope: CallbackEnvelope = serde_json::from_value(json).unwrap();
        assert!(validate_callback_signature(&envelope, KEY).unwrap());

        // Same notification with a signature minted under a different key.
        let forged = CallbackEnvelope {
            signature: "fHM+l4L1ycFWZDRTh/Vr8oybq1Q1xySdjyvmFQCmZ4s=".to_owned(),
            ..envelope
        };
        assert!(!validate_callback_signature(&forged, KEY).unwrap());
    }

    #[test]
    fn insertion_order_is_irrelevant() {
        let reversed = payload(&[
            ("terminalId", CallbackValue::Null),
            ("currency", "MDL".into()),
            ("commission", number("0.1")),
            ("amount", number("50.00")),
            ("qrId", "c3108b2f-6c2e-43a2-bdea-123456789012".into()),
        ]);
        assert_eq!(
            compute_data_signature(&reversed, KEY).unwrap(),
            REFERENCE_SIGNATURE,
        );
    }

    #[test]
    fn null_field_matches_absent_field() {
        let with_null = payload(&[("orderId", "123".into()), ("terminalId", CallbackValue::Null)]);
        let without = payload(&[("orderId", "123".into())]);
        assert_eq!(
            compute_data_signature(&with_null, KEY).unwrap(),
            compute_data_signature(&without, KEY).unwrap(),
        );
    }

    #[test]
    fn whitespace_only_field_is_dropped() {
        let with_blank = payload(&[("orderId", "123".into()), ("description", "   ".into())]);
        let without = payload(&[("orderId", "123".into())]);
        assert_eq!(
            compute_data_signature(&with_blank, KEY).unwrap(),
            compute_data_signature(&without, KEY).unwrap(),
        );
    }

    #[test]
    fn values_are_trimmed() {
        let padded = payload(&[("orderId", "  123  ".into())]);
        let plain = payload(&[("orderId", "123".into())]);
        assert_eq!(
            compute_data_signature(&padded, KEY).unwrap(),
            compute_data_signature(&plain, KEY).unwrap(),
        );
    }

    #[test]
    fn empty_payload_still_hashes() {
        let sig = compute_data_signature(&ResultPayload::new(), KEY).unwrap();
        // sha256(":test-secret")
        assert_eq!(sig, "ICTNNSeRjuyd1z1igyDVuDCx4oDOBzveFFA6VtnSYLo=");
    }

    #[test]
    fn sort_is_ascii_case_insensitive() {
        // A byte-wise sort would order "B" before "a".
        let mixed = payload(&[("B", "2".into()), ("a", "1".into())]);
        let lower = payload(&[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(
            compute_data_signature(&mixed, KEY).unwrap(),
            compute_data_signature(&lower, KEY).unwrap(),
        );
    }

    #[test]
    fn case_folded_ties_break_on_original_bytes() {
        // "Id" < "id" by raw bytes, so "x" must come before "y".
        let tied = payload(&[("id", "y".into()), ("Id", "x".into())]);
        let ordered = payload(&[("k1", "x".into()), ("k2", "y".into())]);
        let swapped = payload(&[("k1", "y".into()), ("k2", "x".into())]);

        let sig = compute_data_signature(&tied, KEY).unwrap();
        assert_eq!(sig, compute_data_signature(&ordered, KEY).unwrap());
        assert_ne!(sig, compute_data_signature(&swapped, KEY).unwrap());
    }

    #[test]
    fn amount_formatting_pads_and_rounds() {
        let cases = [
            (number("0.1"), "0.10"),
            (number("50"), "50.00"),
            (CallbackValue::from("12.005"), "12.01"),
            (CallbackValue::from("-1.005"), "-1.01"),
        ];
        for (value, expected) in cases {
            let got = compute_data_signature(&payload(&[("amount", value)]), KEY).unwrap();
            let reference =
                compute_data_signature(&payload(&[("ref", expected.into())]), KEY).unwrap();
            assert_eq!(got, reference, "amount should contribute `{expected}`");
        }
    }

    #[test]
    fn amount_as_text_matches_amount_as_number() {
        let as_text = payload(&[("amount", "50".into())]);
        let as_number = payload(&[("amount", number("50"))]);
        assert_eq!(
            compute_data_signature(&as_text, KEY).unwrap(),
            compute_data_signature(&as_number, KEY).unwrap(),
        );
    }

    #[test]
    fn amount_formatting_is_case_sensitive_on_field_name() {
        // "Amount" is not the amount field; its value stays untouched.
        let uppercase = payload(&[("Amount", "50".into())]);
        let reference = payload(&[("x", "50".into())]);
        assert_eq!(
            compute_data_signature(&uppercase, KEY).unwrap(),
            compute_data_signature(&reference, KEY).unwrap(),
        );
    }

    #[test]
    fn malformed_amount_is_an_error() {
        let bad = payload(&[("amount", "not-a-number".into())]);
        let err = compute_data_signature(&bad, KEY).unwrap_err();
        assert_eq!(
            err,
            SignatureError::MalformedAmount {
                field: "amount".to_owned(),
                value: "not-a-number".to_owned(),
            }
        );
    }

    #[test]
    fn booleans_contribute_canonical_text() {
        let as_bool = payload(&[("flag", true.into())]);
        let as_text = payload(&[("flag", "true".into())]);
        assert_eq!(
            compute_data_signature(&as_bool, KEY).unwrap(),
            compute_data_signature(&as_text, KEY).unwrap(),
        );
    }

    #[test]
    fn integers_contribute_natural_form() {
        let as_int = payload(&[("count", 123.into())]);
        let as_text = payload(&[("count", "123".into())]);
        assert_eq!(
            compute_data_signature(&as_int, KEY).unwrap(),
            compute_data_signature(&as_text, KEY).unwrap(),
        );
    }

    #[test]
    fn fails_closed_on_empty_result() {
        let envelope = CallbackEnvelope {
            result: ResultPayload::new(),
            signature: "anything".to_owned(),
        };
        assert!(!validate_callback_signature(&envelope, KEY).unwrap());
    }

    #[test]
    fn fails_closed_on_empty_signature() {
        let envelope = CallbackEnvelope {
            result: reference_payload(),
            signature: String::new(),
        };
        assert!(!validate_callback_signature(&envelope, KEY).unwrap());
    }

    #[test]
    fn missing_envelope_fields_fail_closed() {
        let envelope: CallbackEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!validate_callback_signature(&envelope, KEY).unwrap());
    }
}
