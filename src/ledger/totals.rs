use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::{round_money, sum_money};
use super::lines::{LineItem, LineItems};

/// Document-level figures applied on top of the line subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub freight: Decimal,
    pub tax_percent: Decimal,
    pub amount_paid: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
}

impl Totals {
    /// Totals over rows that carry an amount; non-numeric amounts count as zero.
    /// Each row contributes its amount rounded to cents.
    pub fn compute(lines: &LineItems, adjustments: &Adjustments) -> Self {
        Self::from_amounts(
            lines
                .rows()
                .iter()
                .filter(|row| row.has_amount())
                .map(LineItem::amount),
            adjustments,
        )
    }

    pub fn from_amounts<I>(amounts: I, adjustments: &Adjustments) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let subtotal = sum_money(amounts);
        let tax = round_money(
            subtotal.saturating_mul(adjustments.tax_percent) / Decimal::ONE_HUNDRED,
        );
        let total = sum_money([subtotal, adjustments.freight, tax]);
        let balance_due = total
            .saturating_sub(adjustments.amount_paid)
            .max(Decimal::ZERO);

        Self {
            subtotal,
            tax,
            freight: adjustments.freight,
            total,
            amount_paid: adjustments.amount_paid,
            balance_due,
        }
    }
}
