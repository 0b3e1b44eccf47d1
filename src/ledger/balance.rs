use rust_decimal::Decimal;

use super::amount::sum_money;
use super::lines::{LineItem, Side};
use crate::error::{GinumError, Result};

/// Debit/credit sums of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceCheck {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub out_of_balance: Decimal,
    /// Rows with a selected account and a positive amount
    pub postable_lines: usize,
}

impl BalanceCheck {
    /// Sums over the rows as entered. Any non-empty account counts towards
    /// `postable_lines`; whether it exists is only known once accounts are
    /// resolved, see [`BalanceCheck::of_entries`].
    pub fn of(rows: &[LineItem]) -> Self {
        let postable_lines = rows
            .iter()
            .filter(|row| row.has_account() && row.amount() > Decimal::ZERO)
            .count();
        Self::tally(
            sum_money(rows.iter().map(LineItem::debit)),
            sum_money(rows.iter().map(LineItem::credit)),
            postable_lines,
        )
    }

    /// Sums over lines whose account is already resolved.
    pub fn of_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Side, Decimal)>,
    {
        let mut debits = Vec::new();
        let mut credits = Vec::new();
        for (side, amount) in entries {
            match side {
                Side::Debit => debits.push(amount),
                Side::Credit => credits.push(amount),
            }
        }
        let postable_lines = debits
            .iter()
            .chain(&credits)
            .filter(|amount| **amount > Decimal::ZERO)
            .count();
        Self::tally(sum_money(debits), sum_money(credits), postable_lines)
    }

    fn tally(total_debit: Decimal, total_credit: Decimal, postable_lines: usize) -> Self {
        Self {
            total_debit,
            total_credit,
            out_of_balance: total_debit.saturating_sub(total_credit).abs(),
            postable_lines,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.out_of_balance.is_zero()
    }

    /// Gate for submission: balanced, with at least two usable lines.
    pub fn ensure_postable(&self) -> Result<()> {
        if !self.is_balanced() {
            return Err(GinumError::OutOfBalance {
                debit: self.total_debit,
                credit: self.total_credit,
                difference: self.out_of_balance,
            });
        }
        if self.postable_lines < 2 {
            return Err(GinumError::TooFewJournalLines);
        }
        Ok(())
    }
}
