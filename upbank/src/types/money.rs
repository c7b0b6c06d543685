use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minor-unit digits assumed for display (the API reports AUD).
const MINOR_UNIT_DIGITS: u32 = 2;

/// An amount of money as reported by the API (`MoneyObject`).
///
/// `value_in_base_units` is authoritative; `value` is the server's own
/// rendering and is kept only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub currency_code: String,
    pub value: String,
    pub value_in_base_units: i64,
}

impl Balance {
    /// Exact decimal amount built from the base units.
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.value_in_base_units, MINOR_UNIT_DIGITS)
    }

    /// Human-readable amount, e.g. `$2,750.50 AUD` or `-$12.00 AUD`.
    pub fn to_display(&self) -> String {
        let units = self.value_in_base_units.unsigned_abs();
        let divisor = 10u64.pow(MINOR_UNIT_DIGITS);
        let whole = group_thousands(units / divisor);
        let cents = units % divisor;
        let sign = if self.value_in_base_units < 0 { "-" } else { "" };
        format!("{sign}${whole}.{cents:02} {}", self.currency_code)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Amount of a held transaction, with its foreign-currency counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldInfo {
    pub amount: Balance,
    pub foreign_amount: Option<Balance>,
}
