//! Single-asset all-in portfolio and its fill rules.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Flat,
    Holding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Buy,
    Sell,
    /// Forced sale after the last trading day.
    Liquidation,
}

/// An executed transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub date: NaiveDate,
    pub kind: FillKind,
    pub shares: u64,
    pub price: f64,
    pub cash_after: f64,
}

/// Cash plus a whole number of shares of one instrument.
///
/// The position state is derived from the share count, so
/// `shares > 0 <=> Holding` cannot be broken.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    shares: u64,
}

impl Portfolio {
    pub fn new(starting_cash: f64) -> Self {
        Portfolio {
            cash: starting_cash,
            shares: 0,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    pub fn state(&self) -> PositionState {
        if self.shares > 0 {
            PositionState::Holding
        } else {
            PositionState::Flat
        }
    }

    pub fn is_holding(&self) -> bool {
        self.state() == PositionState::Holding
    }

    /// Spend all cash on whole shares at `price`.
    ///
    /// Returns the number of shares bought, or `None` when already holding or
    /// when cash does not cover a single share.
    pub fn buy_all(&mut self, price: f64) -> Option<u64> {
        if self.is_holding() {
            return None;
        }
        let mut quantity = (self.cash / price).floor() as u64;
        // cash / price can round up to the next integer
        if quantity > 0 && quantity as f64 * price > self.cash {
            quantity -= 1;
        }
        if quantity == 0 {
            return None;
        }
        self.cash = (self.cash - quantity as f64 * price).max(0.0);
        self.shares = quantity;
        Some(quantity)
    }

    /// Sell the whole position at `price`. Returns the number of shares sold,
    /// or `None` when flat.
    pub fn sell_all(&mut self, price: f64) -> Option<u64> {
        if !self.is_holding() {
            return None;
        }
        let quantity = self.shares;
        self.cash += quantity as f64 * price;
        self.shares = 0;
        Some(quantity)
    }
}
