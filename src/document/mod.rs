mod draft;
mod payload;

pub use draft::{delete_draft, draft_exists, list_drafts, load_draft, save_draft, validate_draft_name};
pub use payload::{
    assemble, AccountDirectory, DocumentPayload, JournalEntryRequest, JournalEntryType,
    JournalLine, LineItemType, PurchaseOrderItem, PurchaseOrderRequest, PurchaseType,
    QuotationLine, QuotationRequest, SalesOrderItem, SalesOrderRequest, SalesType,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{GinumError, Result};
use crate::ledger::{
    parse_decimal, Adjustments, BalanceCheck, EntryMode, Field, LineItems, Totals,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Journal,
    Sale,
    Purchase,
    Quotation,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Journal => write!(f, "journal"),
            DocumentKind::Sale => write!(f, "sale"),
            DocumentKind::Purchase => write!(f, "purchase"),
            DocumentKind::Quotation => write!(f, "quotation"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = GinumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "journal" | "transaction" => Ok(DocumentKind::Journal),
            "sale" | "sales-order" => Ok(DocumentKind::Sale),
            "purchase" | "purchase-order" => Ok(DocumentKind::Purchase),
            "quotation" | "quote" => Ok(DocumentKind::Quotation),
            _ => Err(GinumError::InvalidValue {
                field: "kind".to_string(),
                value: s.to_string(),
                reason: "use journal, sale, purchase or quotation".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl FromStr for QuotationStatus {
    type Err = GinumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(QuotationStatus::Draft),
            "sent" => Ok(QuotationStatus::Sent),
            "accepted" => Ok(QuotationStatus::Accepted),
            "rejected" => Ok(QuotationStatus::Rejected),
            "expired" => Ok(QuotationStatus::Expired),
            _ => Err(GinumError::InvalidValue {
                field: "status".to_string(),
                value: s.to_string(),
                reason: "use draft, sent, accepted, rejected or expired".to_string(),
            }),
        }
    }
}

/// Top-of-form fields. Which ones apply depends on the document kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Due date, or expiry date for quotations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Customer or supplier id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<u64>,
    /// Journal reference, SO number or PO number
    pub reference: String,
    pub title: String,
    pub description: String,
    pub notes: String,
    /// Account id the payment is drawn from or deposited to
    pub payment_account: String,
    pub supplier_invoice: String,
    pub terms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuotationStatus>,
}

/// A document under construction: header, adjustments and line items.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: DocumentKind,
    pub header: DocumentHeader,
    pub adjustments: Adjustments,
    pub lines: LineItems,
}

impl Document {
    /// Journal entries carry amounts directly and quotations always price by
    /// quantity, so `mode` only matters for sales and purchases.
    pub fn new(kind: DocumentKind, mode: EntryMode) -> Self {
        let mode = match kind {
            DocumentKind::Journal => EntryMode::Service,
            DocumentKind::Quotation => EntryMode::Item,
            DocumentKind::Sale | DocumentKind::Purchase => mode,
        };
        Self {
            kind,
            header: DocumentHeader::default(),
            adjustments: Adjustments::default(),
            lines: LineItems::new(mode),
        }
    }

    pub fn mode(&self) -> EntryMode {
        self.lines.mode()
    }

    pub fn field_applies(&self, field: Field) -> bool {
        match self.kind {
            DocumentKind::Journal => matches!(
                field,
                Field::Account
                    | Field::Description
                    | Field::Project
                    | Field::Quantity
                    | Field::Debit
                    | Field::Credit
            ),
            DocumentKind::Sale | DocumentKind::Purchase => {
                !matches!(field, Field::Debit | Field::Credit)
            }
            DocumentKind::Quotation => matches!(
                field,
                Field::Description | Field::Quantity | Field::UnitPrice | Field::Discount
            ),
        }
    }

    pub fn update_row(&mut self, index: usize, field: Field, value: &str) -> Result<()> {
        if !self.field_applies(field) {
            return Err(GinumError::FieldNotApplicable {
                field: field.to_string(),
                kind: self.kind.to_string(),
            });
        }
        self.lines.update_row(index, field, value)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.lines.remove_row(index).map(|_| ())
    }

    /// Set a header or adjustment field by name.
    pub fn set_header(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.trim().to_ascii_lowercase().replace('_', "-");
        let kind = self.kind;
        let applies = match key.as_str() {
            "date" | "reference" | "description" => true,
            "title" => kind == DocumentKind::Journal,
            "due-date" | "expiry" | "expiry-date" | "notes" => kind != DocumentKind::Journal,
            "customer" => matches!(kind, DocumentKind::Sale | DocumentKind::Quotation),
            "supplier" | "supplier-invoice" => kind == DocumentKind::Purchase,
            "freight" | "paid" | "amount-paid" | "payment-account" => {
                matches!(kind, DocumentKind::Sale | DocumentKind::Purchase)
            }
            "tax" | "tax-percent" => {
                matches!(kind, DocumentKind::Purchase | DocumentKind::Quotation)
            }
            "status" | "terms" => kind == DocumentKind::Quotation,
            _ => return Err(GinumError::UnknownField(key)),
        };
        if !applies {
            return Err(GinumError::FieldNotApplicable {
                field: key,
                kind: kind.to_string(),
            });
        }

        let header = &mut self.header;
        match key.as_str() {
            "date" => header.date = parse_date(&key, value)?,
            "due-date" | "expiry" | "expiry-date" => header.due_date = parse_date(&key, value)?,
            "customer" | "supplier" => header.counterparty = parse_id(&key, value)?,
            "reference" => header.reference = value.trim().to_string(),
            "title" => header.title = value.to_string(),
            "description" => header.description = value.to_string(),
            "notes" => header.notes = value.to_string(),
            "payment-account" => header.payment_account = value.trim().to_string(),
            "supplier-invoice" => header.supplier_invoice = value.trim().to_string(),
            "terms" => header.terms = value.to_string(),
            "status" => {
                header.status = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
            "freight" => self.adjustments.freight = lenient_amount(&key, value),
            "tax" | "tax-percent" => self.adjustments.tax_percent = lenient_amount(&key, value),
            "paid" | "amount-paid" => self.adjustments.amount_paid = lenient_amount(&key, value),
            _ => return Err(GinumError::UnknownField(key.clone())),
        }
        Ok(())
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.lines, &self.adjustments)
    }

    pub fn balance(&self) -> BalanceCheck {
        BalanceCheck::of(self.lines.rows())
    }
}

fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| GinumError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        })
}

fn parse_id(field: &str, value: &str) -> Result<Option<u64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| GinumError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "expected a numeric id".to_string(),
        })
}

/// Adjustment inputs follow the same safe-parse rule as row amounts.
fn lenient_amount(field: &str, value: &str) -> rust_decimal::Decimal {
    match parse_decimal(value) {
        Some(amount) => amount,
        None => {
            if !value.trim().is_empty() {
                warn!(field, value, "not a number, using 0");
            }
            rust_decimal::Decimal::ZERO
        }
    }
}
