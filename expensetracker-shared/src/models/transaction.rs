use serde::{Deserialize, Deserializer, Serialize};

/// Currency attached to every transaction the client creates.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Backend-assigned transaction identifier.
pub type TransactionId = i64;

/// A single recorded income or expense entry.
///
/// The backend calls these "expenses" and carries direction in the
/// `expense` flag; `amount` is always a positive magnitude.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,

    /// Owning user.
    #[serde(rename = "userId", default)]
    pub user_id: i64,

    /// Short label.
    #[serde(rename = "expenseName")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    pub amount: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// `true` subtracts from the balance, `false` (income) adds to it.
    #[serde(rename = "expense", alias = "isExpense")]
    pub is_expense: bool,
}

impl Transaction {
    /// Amount with its direction applied.
    pub fn signed_amount(&self) -> f64 {
        if self.is_expense {
            -self.amount
        } else {
            self.amount
        }
    }

    /// `'-'` for expenses, `'+'` for income.
    pub const fn sign(&self) -> char {
        if self.is_expense { '-' } else { '+' }
    }

    /// Amount rendered the way the dashboard lists it, e.g. `-$40.00`.
    pub fn display_amount(&self) -> String {
        format!("{}${:.2}", self.sign(), self.amount)
    }
}

/// Validated transaction fields, ready to be sent to the backend.
///
/// Only [`crate::validation::TransactionDraft::validate`] produces these, so
/// `amount` is known to be finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub is_expense: bool,
}

/// Body of `POST /expense/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    #[serde(rename = "expenseName")]
    pub name: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "expense")]
    pub is_expense: bool,
    pub currency: String,
}

impl From<TransactionInput> for NewTransaction {
    fn from(input: TransactionInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            amount: input.amount,
            is_expense: input.is_expense,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Body of `PUT /expense/update/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionUpdate {
    #[serde(rename = "expenseName")]
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    #[serde(rename = "isExpense")]
    pub is_expense: bool,
}

impl From<TransactionInput> for TransactionUpdate {
    fn from(input: TransactionInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            amount: input.amount,
            currency: DEFAULT_CURRENCY.to_string(),
            is_expense: input.is_expense,
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> TransactionInput {
        TransactionInput {
            name: "Groceries".into(),
            description: "Weekly shop".into(),
            amount: 42.5,
            is_expense: true,
        }
    }

    #[test]
    fn test_transaction_deserializes_backend_shape() {
        let body = json!({
            "id": 7,
            "userId": 3,
            "expenseName": "Salary",
            "description": "October",
            "amount": 2500.0,
            "currency": "USD",
            "expense": false
        });
        let transaction: Transaction = serde_json::from_value(body).unwrap();

        assert_eq!(transaction.id, 7);
        assert_eq!(transaction.user_id, 3);
        assert_eq!(transaction.name, "Salary");
        assert!(!transaction.is_expense);
        assert!((transaction.signed_amount() - 2500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transaction_accepts_is_expense_alias_and_null_description() {
        let body = json!({
            "id": 1,
            "expenseName": "Coffee",
            "description": null,
            "amount": 3.5,
            "isExpense": true
        });
        let transaction: Transaction = serde_json::from_value(body).unwrap();

        assert!(transaction.is_expense);
        assert_eq!(transaction.description, "");
        assert_eq!(transaction.currency, DEFAULT_CURRENCY);
        assert_eq!(transaction.display_amount(), "-$3.50");
    }

    #[test]
    fn test_new_transaction_wire_shape() {
        let body = serde_json::to_value(NewTransaction::from(input())).unwrap();
        assert_eq!(
            body,
            json!({
                "expenseName": "Groceries",
                "description": "Weekly shop",
                "amount": 42.5,
                "expense": true,
                "currency": "USD"
            })
        );
    }

    #[test]
    fn test_transaction_update_wire_shape() {
        let body = serde_json::to_value(TransactionUpdate::from(input())).unwrap();
        assert_eq!(
            body,
            json!({
                "expenseName": "Groceries",
                "description": "Weekly shop",
                "amount": 42.5,
                "currency": "USD",
                "isExpense": true
            })
        );
    }

    #[test]
    fn test_income_display_amount() {
        let transaction = Transaction {
            id: 2,
            user_id: 1,
            name: "Refund".into(),
            description: String::new(),
            amount: 12.0,
            currency: DEFAULT_CURRENCY.into(),
            is_expense: false,
        };
        assert_eq!(transaction.sign(), '+');
        assert_eq!(transaction.display_amount(), "+$12.00");
    }
}
