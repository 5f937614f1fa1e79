use serde::{Serialize, Serializer};
use std::fmt;

/// A value transfer between two addresses.
///
/// Addresses are opaque strings and the amount is not checked: negative,
/// zero and empty values are all accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "sender_blockchain_address")]
    pub sender: String,
    #[serde(rename = "recipient_blockchain_address")]
    pub recipient: String,
    #[serde(rename = "value", serialize_with = "serialize_amount")]
    pub amount: f64,
}

/// Finite amounts stay JSON numbers. NaN and the infinities, which
/// serde_json would all write as `null`, get distinct string tokens.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.is_finite() {
        serializer.serialize_f64(*amount)
    } else if amount.is_nan() {
        serializer.serialize_str("NaN")
    } else if amount.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "_".repeat(40))?;
        writeln!(f, " sender_blockchain_address: {}", self.sender)?;
        writeln!(f, " recipient_blockchain_address: {}", self.recipient)?;
        write!(f, " value: {:.1}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn new_accepts_any_amount() {
        let tx = Transaction::new("", "bob", -5.0);
        assert_eq!(tx.sender, "");
        assert_eq!(tx.recipient, "bob");
        assert_eq!(tx.amount, -5.0);
    }

    #[test]
    fn serializes_with_address_field_names() {
        let tx = Transaction::new("alice", "bob", 1.0);
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(
            json,
            r#"{"sender_blockchain_address":"alice","recipient_blockchain_address":"bob","value":1.0}"#
        );
    }

    #[test]
    fn non_finite_amounts_serialize_as_tokens() {
        let value = |amount: f64| {
            serde_json::to_value(Transaction::new("a", "b", amount)).unwrap()["value"].clone()
        };
        assert_eq!(value(f64::NAN), "NaN");
        assert_eq!(value(f64::INFINITY), "inf");
        assert_eq!(value(f64::NEG_INFINITY), "-inf");
        assert_eq!(value(-0.5), -0.5);
    }

    #[test]
    fn display_lists_fields() {
        let out = Transaction::new("alice", "bob", 2.0).to_string();
        assert!(out.contains(" sender_blockchain_address: alice"));
        assert!(out.contains(" recipient_blockchain_address: bob"));
        assert!(out.ends_with(" value: 2.0"));
    }
}
