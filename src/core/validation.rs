//! Swap form validation

use std::collections::BTreeMap;
use std::fmt::Display;

pub const MIN_AMOUNT: f64 = 0.000001;
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// User input for a swap, as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
}

impl SwapRequest {
    pub fn new(from_currency: &str, to_currency: &str, amount: f64) -> Self {
        Self {
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Field {
    FromCurrency,
    ToCurrency,
    Amount,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Field::FromCurrency => "from",
                Field::ToCurrency => "to",
                Field::Amount => "amount",
            }
        )
    }
}

/// Field-level validation failures. Holds at most one message per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    // First error for a field wins
    fn add(&mut self, field: Field, message: &str) {
        self.errors
            .entry(field)
            .or_insert_with(|| message.to_string());
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Checks a swap request without consulting any prices. Codes are compared exactly as entered.
pub fn validate(request: &SwapRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let from = request.from_currency.as_str();
    let to = request.to_currency.as_str();

    if from.is_empty() {
        errors.add(Field::FromCurrency, "Please select a currency to swap from");
    }
    if to.is_empty() {
        errors.add(Field::ToCurrency, "Please select a currency to swap to");
    }
    if !from.is_empty() && from == to {
        errors.add(Field::ToCurrency, "Cannot swap to the same currency");
    }

    let amount = request.amount;
    if amount.is_nan() {
        errors.add(Field::Amount, "Amount must be a number");
    } else if amount < MIN_AMOUNT {
        errors.add(Field::Amount, "Amount must be greater than 0");
    } else if amount > MAX_AMOUNT {
        errors.add(Field::Amount, "Amount is too large");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
