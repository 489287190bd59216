//! Record → ledger-entry translation (the accounting policy).
//!
//! How the exchange charges a trade: buy 1 BTC at 1000 USD with a 1% maker
//! fee and the fee is debited as 0.01 BTC — the fee currency follows the
//! maker/taker side, not the quote currency. The postings below mirror
//! that: the acquired base amount carries its quote-priced cost basis, the
//! fee hits an expense account in whatever currency it was charged in, and
//! a bare wallet posting makes sure the fee currency's wallet account is
//! opened in the preamble even when the fee never touched the wallet line.

use ftb_exchange::{
    exact_decimal, BorrowPayment, Deposit, ExchangeError, Fill, LendingPayment, MarketRegistry,
    Symbol,
};
use ftb_ledger::{Ledger, Posting};

/// One economically meaningful event from the exchange's history, tagged by
/// kind. Records missing required fields never construct a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountEvent {
    Trade(Fill),
    Deposit(Deposit),
    LendingInterest(LendingPayment),
    BorrowInterest(BorrowPayment),
}

/// Translates account events into balanced ledger entries.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    markets: MarketRegistry,
    precise_fee_basis: bool,
}

impl EntryBuilder {
    pub fn new(markets: MarketRegistry) -> Self {
        Self {
            markets,
            precise_fee_basis: false,
        }
    }

    /// When enabled, a fee charged in a currency other than the quote
    /// currency carries the fill's quote price as its cost basis. Off by
    /// default; see DESIGN.md for the policy history.
    pub fn with_precise_fee_basis(mut self, enabled: bool) -> Self {
        self.precise_fee_basis = enabled;
        self
    }

    /// Append the entry (or entries) for one event. Events that carry no
    /// economic content (cancelled deposits) append nothing.
    pub fn append(&self, ledger: &mut Ledger, event: &AccountEvent) -> Result<(), ExchangeError> {
        match event {
            AccountEvent::Trade(fill) => self.append_trade(ledger, fill),
            AccountEvent::Deposit(deposit) => append_deposit(ledger, deposit),
            AccountEvent::LendingInterest(payment) => append_lending(ledger, payment),
            AccountEvent::BorrowInterest(payment) => append_borrow(ledger, payment),
        }
    }

    fn append_trade(&self, ledger: &mut Ledger, fill: &Fill) -> Result<(), ExchangeError> {
        let symbol = Symbol::parse(&fill.market)?;
        let size = self.markets.size_to_decimal(&fill.market, fill.size)?;
        let price = self.markets.price_to_decimal(&fill.market, fill.price)?;
        let fee = exact_decimal(fill.fee)?;
        let dump = raw_dump(fill)?;

        let description = format!(
            "fillid-{}: {} {} {} @ {} {} ea. {}",
            fill.id,
            fill.side.as_str(),
            size,
            symbol.base(),
            price,
            symbol.quote(),
            dump
        );
        let entry = ledger.add_entry(fill.time, description);

        entry.push(
            Posting::amount("Assets:Wallet", symbol.base(), size)
                .with_cost_basis(symbol.quote(), price)
                .with_comment("Purchase"),
        );

        let fee_comment = format!(
            "Fee rate of {} as {}",
            fill.fee_rate,
            fill.liquidity.as_str()
        );
        let mut fee_posting =
            Posting::amount("Expenses:Fees", &fill.fee_currency, fee).with_comment(fee_comment);
        if self.precise_fee_basis && fill.fee_currency != symbol.quote() {
            fee_posting = fee_posting.with_cost_basis(symbol.quote(), price);
        }
        entry.push(fee_posting);

        // Opens the fee currency's wallet account even though no wallet
        // quantity moved on this line.
        entry.push(Posting::bare("Assets:Wallet", &fill.fee_currency));
        Ok(())
    }
}

fn append_deposit(ledger: &mut Ledger, deposit: &Deposit) -> Result<(), ExchangeError> {
    // Cancelled / never-completed deposits arrive with a null size and
    // carry no economic event.
    let Some(size) = deposit.size else {
        return Ok(());
    };
    let size = exact_decimal(size)?;

    let entry = ledger.add_entry(
        deposit.time,
        format!("Deposit {} {}", size, deposit.coin),
    );
    entry.push(Posting::amount("Assets:Wallet", &deposit.coin, size));
    entry.push(Posting::amount("Income:Investments", &deposit.coin, -size));
    Ok(())
}

fn append_lending(ledger: &mut Ledger, payment: &LendingPayment) -> Result<(), ExchangeError> {
    let proceeds = exact_decimal(payment.proceeds)?;
    let dump = raw_dump(payment)?;

    let entry = ledger.add_entry(
        payment.time,
        format!("Lending Interest {} {} ; {}", proceeds, payment.coin, dump),
    );
    entry.push(Posting::amount(
        "Assets:Wallet:Interest",
        &payment.coin,
        proceeds,
    ));
    entry.push(Posting::amount("Income:Interest", &payment.coin, -proceeds));
    Ok(())
}

fn append_borrow(ledger: &mut Ledger, payment: &BorrowPayment) -> Result<(), ExchangeError> {
    let cost = exact_decimal(payment.cost)?;

    let entry = ledger.add_entry(
        payment.time,
        format!("Borrowing Interest {} {}", cost, payment.coin),
    );
    entry.push(Posting::amount(
        "Assets:Wallet:Interest",
        &payment.coin,
        -cost,
    ));
    entry.push(Posting::amount("Income:Interest", &payment.coin, cost));
    Ok(())
}

fn raw_dump<T: serde::Serialize>(record: &T) -> Result<String, ExchangeError> {
    serde_json::to_string(record)
        .map_err(|err| ExchangeError::Decode(format!("record dump failed: {err}")))
}
