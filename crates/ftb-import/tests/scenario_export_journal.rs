//! Full import-and-render scenario over a mixed account history.
//!
//! GREEN when:
//! - every record kind lands in the journal with its policy postings,
//! - cancelled deposits leave no trace,
//! - the preamble opens every touched account/currency, sorted,
//! - entries come out in timestamp order regardless of append order,
//! - rendering is byte-identical across passes.

use chrono::{DateTime, TimeZone, Utc};

use ftb_exchange::{
    BorrowPayment, Deposit, Fill, LendingPayment, Liquidity, Market, MarketRegistry, Side,
};
use ftb_import::{AccountEvent, EntryBuilder};
use ftb_ledger::{render, Ledger};

fn when(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn registry() -> MarketRegistry {
    MarketRegistry::from_markets(&[
        Market {
            name: "BTC/USD".to_string(),
            price_increment: 1.0,
            size_increment: 0.0001,
        },
        Market {
            name: "SOL/USD".to_string(),
            price_increment: 0.0025,
            size_increment: 0.01,
        },
    ])
}

fn history() -> Vec<AccountEvent> {
    vec![
        // Appended out of date order on purpose; rendering must sort.
        AccountEvent::Trade(Fill {
            id: 63820377,
            market: "SOL/USD".to_string(),
            side: Side::Buy,
            price: 89.7775,
            size: 15.0,
            fee: 0.012,
            fee_rate: 0.0008,
            fee_currency: "SOL".to_string(),
            liquidity: Liquidity::Maker,
            time: when(1_647_870_866), // 2022-03-21
            order_id: Some(4216671021),
            trade_id: Some(27130489),
        }),
        AccountEvent::Trade(Fill {
            id: 62902857,
            market: "BTC/USD".to_string(),
            side: Side::Buy,
            price: 38721.0,
            size: 0.1,
            fee: 0.0001,
            fee_rate: 0.001,
            fee_currency: "BTC".to_string(),
            liquidity: Liquidity::Maker,
            time: when(1_647_280_938), // 2022-03-14
            order_id: Some(4120253149),
            trade_id: Some(27030001),
        }),
        AccountEvent::Deposit(Deposit {
            id: 38252,
            coin: "USD".to_string(),
            size: None, // cancelled
            status: "cancelled".to_string(),
            time: when(1_647_100_770),
        }),
        AccountEvent::Deposit(Deposit {
            id: 39001,
            coin: "USDC".to_string(),
            size: Some(50.0),
            status: "complete".to_string(),
            time: when(1_646_900_000), // 2022-03-10
        }),
        AccountEvent::LendingInterest(LendingPayment {
            coin: "SOL".to_string(),
            time: when(1_648_702_800), // 2022-03-31
            proceeds: 0.01256550088094,
            rate: 1.142e-5,
            size: 1100.306557,
        }),
        AccountEvent::BorrowInterest(BorrowPayment {
            coin: "USD".to_string(),
            time: when(1_648_738_800), // 2022-03-31, later same day
            cost: 0.0011517494572,
            rate: 2e-6,
            size: 575.8747286,
        }),
    ]
}

fn export() -> String {
    let builder = EntryBuilder::new(registry());
    let mut ledger = Ledger::new();
    for event in &history() {
        builder.append(&mut ledger, event).unwrap();
    }
    let mut out = Vec::new();
    render(&ledger, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn cancelled_deposit_leaves_no_entry() {
    let journal = export();
    assert!(!journal.contains("38252"), "cancelled deposit must not render");
    // Five entries survive: 2 trades, 1 deposit, lending, borrow.
    let headers = journal.lines().filter(|l| l.contains(" * \"")).count();
    assert_eq!(headers, 5);
}

#[test]
fn preamble_opens_every_touched_account_sorted() {
    let journal = export();
    let opens: Vec<&str> = journal
        .lines()
        .filter(|l| l.contains(" open "))
        .collect();
    assert_eq!(
        opens,
        vec![
            "2003-01-05 open Assets:Wallet",
            "2003-01-05 open Assets:Wallet:Interest",
            "2003-01-05 open Expenses:Fees",
            "2003-01-05 open Income:Interest",
            "2003-01-05 open Income:Investments",
        ]
    );
}

#[test]
fn commodities_cover_all_currencies_normalized() {
    let journal = export();
    let commodities: Vec<&str> = journal
        .lines()
        .filter(|l| l.contains(" commodity "))
        .collect();
    // USDC collapsed into USD; SOL and BTC kept.
    assert_eq!(
        commodities,
        vec![
            "2000-01-01 commodity BTC",
            "2000-01-01 commodity SOL",
            "2000-01-01 commodity USD",
        ]
    );
}

#[test]
fn entries_render_in_timestamp_order() {
    let journal = export();
    let deposit = journal.find("Deposit 50 USD").unwrap();
    let btc_fill = journal.find("fillid-62902857").unwrap();
    let sol_fill = journal.find("fillid-63820377").unwrap();
    let lending = journal.find("Lending Interest").unwrap();
    let borrow = journal.find("Borrowing Interest").unwrap();
    assert!(deposit < btc_fill);
    assert!(btc_fill < sol_fill);
    assert!(sol_fill < lending);
    assert!(lending < borrow, "same-day entries keep chronological order");
}

#[test]
fn trade_lines_carry_cost_basis_and_fee_policy() {
    let journal = export();
    assert!(journal.contains(
        "  Assets:Wallet\t0.1000000000000 BTC {38721.0000000000000 USD} ;; Purchase"
    ));
    assert!(journal.contains(
        "  Assets:Wallet\t15.0000000000000 SOL {89.7775000000000 USD} ;; Purchase"
    ));
    // Default policy: no cost basis on fee postings.
    assert!(journal.contains("  Expenses:Fees\t0.0120000000000 SOL ;; Fee rate of 0.0008 as maker"));
}

#[test]
fn export_is_deterministic() {
    assert_eq!(export(), export());
}
