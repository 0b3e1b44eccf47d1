use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::{line_amount, parse_amount, round_money};
use crate::error::{GinumError, Result};

/// Which input is authoritative for a row's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    /// Amount derived from quantity, unit price and discount
    #[default]
    Item,
    /// Amount entered directly
    Service,
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryMode::Item => write!(f, "item"),
            EntryMode::Service => write!(f, "service"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

/// An editable column of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Account,
    Description,
    Item,
    Project,
    Quantity,
    UnitPrice,
    Discount,
    Amount,
    Debit,
    Credit,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Account => "account",
            Field::Description => "description",
            Field::Item => "item",
            Field::Project => "project",
            Field::Quantity => "quantity",
            Field::UnitPrice => "unit-price",
            Field::Discount => "discount",
            Field::Amount => "amount",
            Field::Debit => "debit",
            Field::Credit => "credit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = GinumError;

    fn from_str(s: &str) -> Result<Self> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "account" => Field::Account,
            "description" | "desc" => Field::Description,
            "item" => Field::Item,
            "project" | "job" => Field::Project,
            "quantity" | "qty" => Field::Quantity,
            "unit-price" | "unit_price" | "price" => Field::UnitPrice,
            "discount" => Field::Discount,
            "amount" => Field::Amount,
            "debit" => Field::Debit,
            "credit" => Field::Credit,
            _ => return Err(GinumError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// One row of a document. Inputs are kept as entered and parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub account: String,
    pub description: String,
    pub item: String,
    pub project: String,
    pub quantity: String,
    pub unit_price: String,
    pub discount: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl LineItem {
    pub fn is_blank(&self) -> bool {
        self.side.is_none()
            && [
                &self.account,
                &self.description,
                &self.item,
                &self.project,
                &self.quantity,
                &self.unit_price,
                &self.discount,
                &self.amount,
            ]
            .iter()
            .all(|value| value.trim().is_empty())
    }

    pub fn has_amount(&self) -> bool {
        !self.amount.trim().is_empty()
    }

    /// The row amount in cents, as totals and requests use it.
    pub fn amount(&self) -> Decimal {
        round_money(parse_amount(&self.amount))
    }

    pub fn has_account(&self) -> bool {
        !self.account.trim().is_empty()
    }

    /// Amount on the debit side, zero for credit or unsided rows
    pub fn debit(&self) -> Decimal {
        match self.side {
            Some(Side::Debit) => self.amount(),
            _ => Decimal::ZERO,
        }
    }

    pub fn credit(&self) -> Decimal {
        match self.side {
            Some(Side::Credit) => self.amount(),
            _ => Decimal::ZERO,
        }
    }

    fn derive_amount(&mut self) {
        if [&self.quantity, &self.unit_price, &self.discount]
            .iter()
            .all(|value| value.trim().is_empty())
        {
            self.amount.clear();
            return;
        }
        let amount = line_amount(
            parse_amount(&self.quantity),
            parse_amount(&self.unit_price),
            parse_amount(&self.discount),
        );
        self.amount = format!("{amount:.2}");
    }

    fn set_side(&mut self, side: Side, value: &str) {
        if value.trim().is_empty() {
            if self.side == Some(side) {
                self.side = None;
                self.amount.clear();
            }
            return;
        }
        self.side = Some(side);
        self.amount = value.to_string();
    }
}

/// Ordered rows of a document, always ending in one blank row awaiting input.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItems {
    mode: EntryMode,
    rows: Vec<LineItem>,
}

impl LineItems {
    pub fn new(mode: EntryMode) -> Self {
        Self {
            mode,
            rows: vec![LineItem::default()],
        }
    }

    /// Rebuild from stored rows, restoring the blank trailing row if missing.
    pub fn from_rows(mode: EntryMode, mut rows: Vec<LineItem>) -> Self {
        if rows.last().map_or(true, |row| !row.is_blank()) {
            rows.push(LineItem::default());
        }
        Self { mode, rows }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(LineItem::is_blank)
    }

    /// Set `field` of the row at `index` (0-based).
    ///
    /// In item mode, editing quantity, unit price or discount re-derives the
    /// amount. Debit and credit only exist in service mode. When the edit
    /// leaves the last row non-blank a new blank row is appended, so the list
    /// never fills up at its tail.
    pub fn update_row(&mut self, index: usize, field: Field, value: &str) -> Result<()> {
        let count = self.rows.len();
        let mode = self.mode;
        let row = self
            .rows
            .get_mut(index)
            .ok_or(GinumError::RowOutOfRange {
                row: index + 1,
                count,
            })?;

        match field {
            Field::Account => row.account = value.to_string(),
            Field::Description => row.description = value.to_string(),
            Field::Item => row.item = value.to_string(),
            Field::Project => row.project = value.to_string(),
            Field::Quantity | Field::UnitPrice | Field::Discount => {
                let slot = match field {
                    Field::Quantity => &mut row.quantity,
                    Field::UnitPrice => &mut row.unit_price,
                    _ => &mut row.discount,
                };
                *slot = value.to_string();
                if mode == EntryMode::Item {
                    row.derive_amount();
                }
            }
            Field::Amount | Field::Debit | Field::Credit if mode == EntryMode::Item => {
                return Err(GinumError::FieldNotApplicable {
                    field: field.to_string(),
                    kind: "item mode".to_string(),
                });
            }
            Field::Amount => row.amount = value.to_string(),
            Field::Debit => row.set_side(Side::Debit, value),
            Field::Credit => row.set_side(Side::Credit, value),
        }

        if index == count - 1 && !self.rows[index].is_blank() {
            self.rows.push(LineItem::default());
        }
        Ok(())
    }

    /// Remove the row at `index` (0-based). The trailing blank row stays.
    pub fn remove_row(&mut self, index: usize) -> Result<LineItem> {
        let count = self.rows.len();
        if index >= count {
            return Err(GinumError::RowOutOfRange {
                row: index + 1,
                count,
            });
        }
        if index == count - 1 {
            return Err(GinumError::TrailingRow(index + 1));
        }
        Ok(self.rows.remove(index))
    }
}
