//! Payment signature verification.
//!
//! The provider signs `"<order_id>|<payment_id>"` with HMAC-SHA256 using the
//! merchant's key secret and hands the lowercase hex digest to the client.
//! The client forwards it with the payment receipt; we recompute and compare.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier bound to the merchant's key secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Returns true if `signature` matches. Never errors.
    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_signature(order_id, payment_id, signature, self.secret.expose_secret())
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// HMAC-SHA256 of `"<order_id>|<payment_id>"`, lowercase hex.
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Checks a client-supplied signature against the recomputed one.
///
/// Comparison is constant-time over the digest bytes; a length mismatch is
/// simply `false`.
pub fn verify_signature(order_id: &str, payment_id: &str, signature: &str, secret: &str) -> bool {
    let expected = compute_signature(secret, order_id, payment_id);
    constant_time_compare(expected.as_bytes(), signature.as_bytes())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "rzp_test_secret_abcdef";

    #[test]
    fn digest_is_lowercase_hex() {
        let sig = compute_signature("secret", "order_1", "pay_1");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn accepts_correct_signature() {
        let sig = compute_signature(SECRET, "order_ABC", "pay_XYZ");
        assert!(verify_signature("order_ABC", "pay_XYZ", &sig, SECRET));
    }

    #[test]
    fn rejects_tampered_signature() {
        let mut sig = compute_signature(SECRET, "order_ABC", "pay_XYZ");
        let last = if sig.ends_with('0') { "1" } else { "0" };
        sig.replace_range(63..64, last);
        assert!(!verify_signature("order_ABC", "pay_XYZ", &sig, SECRET));
    }

    #[test]
    fn rejects_signature_for_other_payment() {
        let sig = compute_signature(SECRET, "order_ABC", "pay_XYZ");
        assert!(!verify_signature("order_ABC", "pay_OTHER", &sig, SECRET));
    }

    #[test]
    fn rejects_wrong_length_without_panicking() {
        assert!(!verify_signature("order_ABC", "pay_XYZ", "abc", SECRET));
        assert!(!verify_signature("order_ABC", "pay_XYZ", "", SECRET));
    }

    #[test]
    fn rejects_uppercase_hex() {
        let sig = compute_signature(SECRET, "order_ABC", "pay_XYZ").to_uppercase();
        assert!(!verify_signature("order_ABC", "pay_XYZ", &sig, SECRET));
    }

    #[test]
    fn verifier_uses_its_secret() {
        let verifier = SignatureVerifier::new(SecretString::new(SECRET.to_string()));
        let sig = compute_signature(SECRET, "order_1", "pay_1");
        assert!(verifier.verify("order_1", "pay_1", &sig));
        assert!(!format!("{:?}", verifier).contains(SECRET));
    }

    #[test]
    fn separator_is_part_of_the_message() {
        let a = compute_signature(SECRET, "order_1|", "pay");
        let b = compute_signature(SECRET, "order_1", "|pay");
        // Same concatenated bytes, so same digest.
        assert_eq!(a, b);
        assert_ne!(a, compute_signature(SECRET, "order_1", "pay"));
    }

    proptest! {
        #[test]
        fn signature_is_deterministic(
            order in "[a-zA-Z0-9_]{1,32}",
            payment in "[a-zA-Z0-9_]{1,32}",
            secret in "[a-zA-Z0-9]{8,40}",
        ) {
            let first = compute_signature(&secret, &order, &payment);
            let second = compute_signature(&secret, &order, &payment);
            prop_assert_eq!(&first, &second);
            prop_assert!(verify_signature(&order, &payment, &first, &secret));
        }

        #[test]
        fn other_secret_never_verifies(
            order in "[a-z0-9]{1,16}",
            payment in "[a-z0-9]{1,16}",
            secret in "[a-z]{8,16}",
        ) {
            let sig = compute_signature(&secret, &order, &payment);
            let other = format!("{}x", secret);
            prop_assert!(!verify_signature(&order, &payment, &sig, &other));
        }
    }
}
