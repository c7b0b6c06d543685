use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::money::{Balance, HoldInfo};
use super::page::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Held,
    Settled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Held => "HELD",
            TransactionStatus::Settled => "SETTLED",
        }
    }
}

/// A transaction on one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub attributes: TransactionAttributes,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl Resource for Transaction {
    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Transaction {
    pub fn status(&self) -> TransactionStatus {
        self.attributes.status
    }

    pub fn amount(&self) -> &Balance {
        &self.attributes.amount
    }

    pub fn created_at_utc(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.attributes.created_at).ok()
    }

    pub fn settled_at_utc(&self) -> Option<DateTime<FixedOffset>> {
        self.attributes
            .settled_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAttributes {
    pub status: TransactionStatus,
    pub raw_text: Option<String>,
    pub description: String,
    pub message: Option<String>,
    #[serde(default)]
    pub is_categorizable: bool,
    pub hold_info: Option<HoldInfo>,
    pub round_up: Option<RoundUp>,
    #[serde(alias = "cashBack")]
    pub cashback: Option<Cashback>,
    pub amount: Balance,
    pub foreign_amount: Option<Balance>,
    pub card_purchase_method: Option<CardPurchaseMethod>,
    pub settled_at: Option<String>,
    pub created_at: String,
    pub transaction_type: Option<String>,
    pub note: Option<Note>,
    pub performing_customer: Option<Customer>,
    #[serde(rename = "deepLinkURL")]
    pub deep_link_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundUp {
    pub amount: Balance,
    pub boost_portion: Option<Balance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashback {
    pub description: String,
    pub amount: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPurchaseMethod {
    /// `CARD_PIN`, `CONTACTLESS`, `ECOMMERCE`, ...
    pub method: String,
    pub card_number_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub display_name: String,
}
