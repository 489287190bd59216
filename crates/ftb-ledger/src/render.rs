//! Beancount journal rendering.
//!
//! Output order: operating-currency option, open directives (sorted),
//! commodity declarations (sorted), entries ascending by timestamp, trailing
//! unrealized-gains plugin directive. Rendering the same ledger twice yields
//! byte-identical text.

use std::io;

use crate::model::{Ledger, LedgerEntry, Posting};

/// Date on the `open` directives. A fixed day predating all real entries —
/// the journal processor only requires accounts to open before first use.
pub const ACCOUNT_OPEN_DATE: &str = "2003-01-05";

/// Date on the `commodity` declarations.
pub const COMMODITY_OPEN_DATE: &str = "2000-01-01";

/// Quantities and cost bases print at a fixed 13 decimal places. Wide enough
/// for every market increment the exchange quotes, and fixed-width output
/// keeps scientific notation (which the journal parser rejects) impossible.
const QUANTITY_PLACES: usize = 13;

/// Write the whole journal.
pub fn render<W: io::Write>(ledger: &Ledger, out: &mut W) -> io::Result<()> {
    writeln!(out, "option \"operating_currency\" \"USD\"")?;

    let (accounts, currencies) = ledger.accounts_and_currencies();
    for account in &accounts {
        writeln!(out, "{ACCOUNT_OPEN_DATE} open {account}")?;
    }
    for currency in &currencies {
        writeln!(out)?;
        writeln!(out, "{COMMODITY_OPEN_DATE} commodity {currency}")?;
        writeln!(out, "  price: \"USD:coinbase/{currency}-USD\"")?;
    }
    writeln!(out)?;

    for entry in ledger.entries_sorted() {
        render_entry(entry, out)?;
    }

    writeln!(out, "plugin \"beancount.plugins.unrealized\" \"Unrealized\"")?;
    Ok(())
}

fn render_entry<W: io::Write>(entry: &LedgerEntry, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} * \"{}\"",
        entry.timestamp.format("%Y/%m/%d"),
        escape_description(&entry.description)
    )?;
    for posting in &entry.postings {
        writeln!(out, "{}", posting_line(posting))?;
    }
    writeln!(out)
}

fn posting_line(posting: &Posting) -> String {
    let mut line = format!("  {}", posting.account);
    if let (Some(currency), Some(quantity)) = (&posting.currency, &posting.quantity) {
        line.push_str(&format!("\t{quantity:.QUANTITY_PLACES$} {currency}"));
        if let Some(basis) = &posting.cost_basis {
            line.push_str(&format!(
                " {{{:.QUANTITY_PLACES$} {}}}",
                basis.unit_price, basis.commodity
            ));
        }
    }
    if !posting.comment.is_empty() {
        line.push_str(&format!(" ;; {}", posting.comment));
    }
    line
}

/// Entry descriptions embed raw record dumps; quotes and backslashes must
/// not terminate the quoted header string.
fn escape_description(description: &str) -> String {
    description.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Posting;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let entry = ledger.add_entry(
            Utc.with_ymd_and_hms(2022, 3, 14, 18, 2, 18).unwrap(),
            "fillid-62902857: buy 0.1 BTC @ 38721.0 USD ea.",
        );
        entry.push(
            Posting::amount("Assets:Wallet", "BTC", dec!(0.1))
                .with_cost_basis("USD", dec!(38721.0))
                .with_comment("Purchase"),
        );
        entry.push(
            Posting::amount("Expenses:Fees", "BTC", dec!(0.0001))
                .with_comment("Fee rate of 0.001 as maker"),
        );
        entry.push(Posting::bare("Assets:Wallet", "BTC"));

        let entry = ledger.add_entry(
            Utc.with_ymd_and_hms(2022, 3, 12, 16, 0, 0).unwrap(),
            "Deposit 50 USD",
        );
        entry.push(Posting::amount("Assets:Wallet", "USD", dec!(50)));
        entry.push(Posting::amount("Income:Investments", "USD", dec!(-50)));
        ledger
    }

    fn render_to_string(ledger: &Ledger) -> String {
        let mut buf = Vec::new();
        render(ledger, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_option_preamble_and_plugin() {
        let text = render_to_string(&sample_ledger());
        assert!(text.starts_with("option \"operating_currency\" \"USD\"\n"));
        assert!(text.ends_with("plugin \"beancount.plugins.unrealized\" \"Unrealized\"\n"));
    }

    #[test]
    fn opens_accounts_sorted_at_fixed_date() {
        let text = render_to_string(&sample_ledger());
        let opens: Vec<&str> = text.lines().filter(|l| l.contains(" open ")).collect();
        assert_eq!(
            opens,
            vec![
                "2003-01-05 open Assets:Wallet",
                "2003-01-05 open Expenses:Fees",
                "2003-01-05 open Income:Investments",
            ]
        );
    }

    #[test]
    fn declares_commodities_sorted_with_price_hint() {
        let text = render_to_string(&sample_ledger());
        let btc = text.find("2000-01-01 commodity BTC").unwrap();
        let usd = text.find("2000-01-01 commodity USD").unwrap();
        assert!(btc < usd, "commodities must render sorted");
        assert!(text.contains("  price: \"USD:coinbase/BTC-USD\""));
        assert!(text.contains("  price: \"USD:coinbase/USD-USD\""));
    }

    #[test]
    fn entries_render_in_date_order() {
        let text = render_to_string(&sample_ledger());
        let deposit = text.find("2022/03/12 * \"Deposit 50 USD\"").unwrap();
        let fill = text.find("2022/03/14 * \"fillid-62902857").unwrap();
        assert!(deposit < fill, "earlier entry must render first");
    }

    #[test]
    fn posting_lines_use_fixed_precision_and_cost_basis_braces() {
        let text = render_to_string(&sample_ledger());
        assert!(text.contains(
            "  Assets:Wallet\t0.1000000000000 BTC {38721.0000000000000 USD} ;; Purchase"
        ));
        assert!(text
            .contains("  Expenses:Fees\t0.0001000000000 BTC ;; Fee rate of 0.001 as maker"));
        assert!(text.contains("  Income:Investments\t-50.0000000000000 USD"));
    }

    #[test]
    fn bare_posting_renders_account_only() {
        let ledger = sample_ledger();
        let bare = &ledger.entries()[0].postings[2];
        assert_eq!(posting_line(bare), "  Assets:Wallet");
    }

    #[test]
    fn tiny_quantities_never_use_scientific_notation() {
        let mut ledger = Ledger::new();
        ledger
            .add_entry(
                Utc.with_ymd_and_hms(2022, 3, 31, 5, 0, 0).unwrap(),
                "Lending Interest",
            )
            .push(Posting::amount(
                "Assets:Wallet:Interest",
                "SOL",
                dec!(0.0000000125655),
            ));
        let text = render_to_string(&ledger);
        assert!(text.contains("0.0000000125655 SOL"));
        assert!(!text.to_lowercase().contains("e-"), "no scientific notation");
    }

    #[test]
    fn description_quotes_are_escaped() {
        let mut ledger = Ledger::new();
        ledger.add_entry(
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            r#"dump {"id": 1}"#,
        );
        let text = render_to_string(&ledger);
        assert!(text.contains(r#"* "dump {\"id\": 1}""#));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let ledger = sample_ledger();
        assert_eq!(render_to_string(&ledger), render_to_string(&ledger));
    }
}
