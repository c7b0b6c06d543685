use serde::{Deserialize, Serialize};

use super::money::Balance;
use super::page::Resource;
use crate::utils::split_leading_emoji;

/// A bank account.
///
/// Decoded from an `accounts` resource object; the leading emoji and the
/// transactions link are derived once at decode time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AccountResource", into = "AccountResource")]
pub struct Account {
    /// Resource type, always `accounts`.
    pub kind: String,
    pub id: String,
    pub attributes: AccountAttributes,
    /// Leading emoji of the display name, if it starts with one.
    pub emoji: Option<String>,
    /// Display name with the leading emoji removed.
    pub modified_display_name: String,
    /// Link to this account's transactions collection.
    pub transactions_url: String,
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Resource for Account {
    const COLLECTION: &'static str = "accounts";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Account {
    pub fn display_name(&self) -> &str {
        &self.attributes.display_name
    }

    pub fn balance(&self) -> &Balance {
        &self.attributes.balance
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttributes {
    pub display_name: String,
    /// `SAVER`, `TRANSACTIONAL`, `HOME_LOAN`, ...
    pub account_type: String,
    /// `INDIVIDUAL` or `JOINT`.
    pub ownership_type: String,
    pub balance: Balance,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountResource {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    attributes: AccountAttributes,
    relationships: AccountRelationships,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRelationships {
    transactions: Relationship,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Relationship {
    links: Option<RelationshipLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RelationshipLinks {
    related: Option<String>,
}

impl TryFrom<AccountResource> for Account {
    type Error = String;

    fn try_from(res: AccountResource) -> std::result::Result<Self, Self::Error> {
        let transactions_url = res
            .relationships
            .transactions
            .links
            .and_then(|l| l.related)
            .ok_or_else(|| {
                format!(
                    "account {} has no relationships.transactions.links.related",
                    res.id
                )
            })?;

        let (emoji, rest) = split_leading_emoji(&res.attributes.display_name);
        let emoji = emoji.map(str::to_string);
        let modified_display_name = rest.to_string();

        Ok(Account {
            kind: res.kind,
            id: res.id,
            attributes: res.attributes,
            emoji,
            modified_display_name,
            transactions_url,
        })
    }
}

impl From<Account> for AccountResource {
    fn from(acct: Account) -> Self {
        AccountResource {
            kind: acct.kind,
            id: acct.id,
            attributes: acct.attributes,
            relationships: AccountRelationships {
                transactions: Relationship {
                    links: Some(RelationshipLinks {
                        related: Some(acct.transactions_url),
                    }),
                },
            },
        }
    }
}
