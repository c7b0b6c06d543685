use std::io::Write;

use serde::Serialize;
use upbank::{Account, Transaction};

use crate::error::CliError;

/// Column set of the transaction CSV export.
pub const CSV_HEADER: [&str; 18] = [
    "ID",
    "Description",
    "Customer",
    "Amount",
    "Date",
    "Status",
    "RawText",
    "Message",
    "IsCategorizable",
    "HoldInfo",
    "RoundUp",
    "CashBack",
    "ForeignAmount",
    "CardPurchaseMethod",
    "SettledAt",
    "TransactionType",
    "Note",
    "DeepLinkURL",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountLine<'a> {
    id: &'a str,
    emoji: Option<&'a str>,
    name: &'a str,
    account_type: &'a str,
    ownership_type: &'a str,
    balance: String,
    value_in_base_units: i64,
}

impl<'a> From<&'a Account> for AccountLine<'a> {
    fn from(account: &'a Account) -> Self {
        let attrs = &account.attributes;
        Self {
            id: &account.id,
            emoji: account.emoji.as_deref(),
            name: account.modified_display_name.trim(),
            account_type: &attrs.account_type,
            ownership_type: &attrs.ownership_type,
            balance: attrs.balance.to_display(),
            value_in_base_units: attrs.balance.value_in_base_units,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionLine<'a> {
    id: &'a str,
    created_at: &'a str,
    status: &'static str,
    description: &'a str,
    message: Option<&'a str>,
    amount: String,
    value_in_base_units: i64,
}

impl<'a> From<&'a Transaction> for TransactionLine<'a> {
    fn from(tx: &'a Transaction) -> Self {
        let attrs = &tx.attributes;
        Self {
            id: &tx.id,
            created_at: &attrs.created_at,
            status: attrs.status.as_str(),
            description: &attrs.description,
            message: attrs.message.as_deref(),
            amount: attrs.amount.to_display(),
            value_in_base_units: attrs.amount.value_in_base_units,
        }
    }
}

/// Write accounts as an aligned table, or one JSON document.
pub fn write_accounts<W: Write>(
    accounts: &[Account],
    json_mode: bool,
    writer: &mut W,
) -> Result<(), CliError> {
    let lines: Vec<AccountLine<'_>> = accounts.iter().map(AccountLine::from).collect();

    if json_mode {
        serde_json::to_writer_pretty(&mut *writer, &lines)?;
        writeln!(writer)?;
        return Ok(());
    }

    let name_width = lines.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
    for line in &lines {
        writeln!(
            writer,
            "{:<2} {:<name_width$}  {:<14} {:>20}  {}",
            line.emoji.unwrap_or(""),
            line.name,
            line.account_type,
            line.balance,
            line.id,
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write transactions as TSV-like rows, or one JSON document.
pub fn write_transactions<W: Write>(
    transactions: &[Transaction],
    json_mode: bool,
    writer: &mut W,
) -> Result<(), CliError> {
    let lines: Vec<TransactionLine<'_>> = transactions.iter().map(TransactionLine::from).collect();

    if json_mode {
        serde_json::to_writer_pretty(&mut *writer, &lines)?;
        writeln!(writer)?;
        return Ok(());
    }

    for line in &lines {
        let date = line.created_at.get(..10).unwrap_or(line.created_at);
        writeln!(
            writer,
            "{}\t{:<7}\t{:>16}\t{}",
            date, line.status, line.amount, line.description,
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `transactions` as CSV with [`CSV_HEADER`] columns. Absent optional
/// fields become empty cells.
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> Result<(), CliError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for tx in transactions {
        wtr.write_record(csv_row(tx))?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_row(tx: &Transaction) -> [String; 18] {
    let a = &tx.attributes;
    let opt = |v: Option<&str>| v.unwrap_or_default().to_string();

    [
        tx.id.clone(),
        a.description.clone(),
        opt(a.performing_customer.as_ref().map(|c| c.display_name.as_str())),
        a.amount.value.clone(),
        a.created_at.clone(),
        a.status.as_str().to_string(),
        opt(a.raw_text.as_deref()),
        opt(a.message.as_deref()),
        a.is_categorizable.to_string(),
        opt(a.hold_info.as_ref().map(|h| h.amount.value.as_str())),
        opt(a.round_up.as_ref().map(|r| r.amount.value.as_str())),
        opt(a.cashback.as_ref().map(|c| c.description.as_str())),
        opt(a.foreign_amount.as_ref().map(|f| f.value.as_str())),
        opt(a.card_purchase_method.as_ref().map(|c| c.method.as_str())),
        opt(a.settled_at.as_deref()),
        opt(a.transaction_type.as_deref()),
        opt(a.note.as_ref().map(|n| n.text.as_str())),
        opt(a.deep_link_url.as_deref()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(json: serde_json::Value) -> Transaction {
        serde_json::from_value(json).unwrap()
    }

    fn coffee() -> Transaction {
        transaction(serde_json::json!({
            "type": "transactions",
            "id": "tx-1",
            "attributes": {
                "status": "HELD",
                "rawText": "SEVEN SEEDS, CARLTON",
                "description": "Seven Seeds",
                "message": "flat white, \"large\"",
                "isCategorizable": true,
                "holdInfo": {
                    "amount": { "currencyCode": "AUD", "value": "-4.50", "valueInBaseUnits": -450 },
                    "foreignAmount": null
                },
                "roundUp": {
                    "amount": { "currencyCode": "AUD", "value": "-0.50", "valueInBaseUnits": -50 },
                    "boostPortion": null
                },
                "cashback": null,
                "amount": { "currencyCode": "AUD", "value": "-4.50", "valueInBaseUnits": -450 },
                "foreignAmount": null,
                "cardPurchaseMethod": { "method": "CONTACTLESS", "cardNumberSuffix": "0420" },
                "settledAt": null,
                "createdAt": "2024-03-01T08:15:00+11:00",
                "transactionType": "Purchase",
                "note": null,
                "performingCustomer": { "displayName": "Bobby" },
                "deepLinkURL": "up://transaction/tx-1"
            }
        }))
    }

    // ---- csv ----

    #[test]
    fn test_csv_header_and_row() {
        let mut out = Vec::new();
        write_transactions_csv(&[coffee()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "tx-1,Seven Seeds,Bobby,-4.50,2024-03-01T08:15:00+11:00,HELD,\
             \"SEVEN SEEDS, CARLTON\",\"flat white, \"\"large\"\"\",true,-4.50,-0.50,,,\
             CONTACTLESS,,Purchase,,up://transaction/tx-1"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_empty_export_has_header_only() {
        let mut out = Vec::new();
        write_transactions_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    // ---- tables ----

    #[test]
    fn test_transactions_table_row() {
        let mut out = Vec::new();
        write_transactions(&[coffee()], false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2024-03-01\tHELD"));
        assert!(text.contains("-$4.50 AUD"));
        assert!(text.trim_end().ends_with("Seven Seeds"));
    }

    #[test]
    fn test_transactions_json() {
        let mut out = Vec::new();
        write_transactions(&[coffee()], true, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["id"], "tx-1");
        assert_eq!(parsed[0]["status"], "HELD");
        assert_eq!(parsed[0]["valueInBaseUnits"], -450);
    }
}
