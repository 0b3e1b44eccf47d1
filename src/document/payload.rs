use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::{Document, DocumentKind, QuotationStatus};
use crate::api::Account;
use crate::config::Session;
use crate::error::{GinumError, Result};
use crate::ledger::{
    line_amount, parse_decimal, BalanceCheck, EntryMode, LineItem, Side, Totals,
};

/// Account id -> account code, built from the fetched chart of accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    codes: HashMap<String, String>,
}

impl AccountDirectory {
    pub fn new(accounts: &[Account]) -> Self {
        let codes = accounts
            .iter()
            .map(|account| (account.id.to_string(), account.account_code.clone()))
            .collect();
        Self { codes }
    }

    pub fn code_for(&self, account_id: &str) -> Option<&str> {
        self.codes.get(account_id.trim()).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JournalEntryType {
    General,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    pub account_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub debit: bool,
    pub description: String,
}

impl JournalLine {
    pub fn entry(&self) -> (Side, Decimal) {
        let side = if self.debit { Side::Debit } else { Side::Credit };
        (side, self.amount)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryRequest {
    pub entry_type: JournalEntryType,
    pub entry_date: NaiveDate,
    pub journal_title: String,
    pub reference_no: String,
    pub author_id: Option<u64>,
    pub description: String,
    pub company_id: u64,
    pub lines: Vec<JournalLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesType {
    Items,
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemType {
    Goods,
    Service,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderItem {
    pub item_id: Option<u64>,
    pub description: String,
    pub account_code: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    pub project_id: Option<u64>,
    pub item_type: LineItemType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderRequest {
    pub company_id: u64,
    pub customer_id: u64,
    pub so_number: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    pub sales_type: SalesType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    pub payment_account_code: Option<String>,
    pub items: Vec<SalesOrderItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseType {
    Goods,
    Services,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    pub item_id: Option<u64>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub account_code: String,
    pub project_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderRequest {
    pub supplier_id: u64,
    pub supplier_invoice_number: String,
    pub po_number: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    pub items: Vec<PurchaseOrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub freight: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    pub purchase_type: PurchaseType,
    pub payment_account_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLine {
    pub description: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub customer_id: u64,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_percent: Decimal,
    pub status: QuotationStatus,
    pub notes: String,
    pub terms_and_conditions: String,
    pub line_items: Vec<QuotationLine>,
}

/// Request body for one of the document endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DocumentPayload {
    Journal(JournalEntryRequest),
    Sale(SalesOrderRequest),
    Purchase(PurchaseOrderRequest),
    Quotation(QuotationRequest),
}

impl DocumentPayload {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentPayload::Journal(_) => DocumentKind::Journal,
            DocumentPayload::Sale(_) => DocumentKind::Sale,
            DocumentPayload::Purchase(_) => DocumentKind::Purchase,
            DocumentPayload::Quotation(_) => DocumentKind::Quotation,
        }
    }

    pub fn endpoint(&self, company_id: u64) -> String {
        match self {
            DocumentPayload::Journal(_) => format!("/api/companies/{company_id}/journal-entries"),
            DocumentPayload::Sale(_) => format!("/api/sales-orders/company/{company_id}"),
            DocumentPayload::Purchase(_) => format!("/api/{company_id}/purchase-orders"),
            DocumentPayload::Quotation(_) => format!("/api/companies/{company_id}/quotations"),
        }
    }

    /// Line amounts as the backend will derive them from this request.
    /// Summed with the document adjustments they give the same totals the
    /// draft shows.
    pub fn line_amounts(&self) -> Vec<Decimal> {
        match self {
            DocumentPayload::Journal(entry) => entry.lines.iter().map(|line| line.amount).collect(),
            DocumentPayload::Sale(order) => order
                .items
                .iter()
                .map(|item| {
                    line_amount(
                        Decimal::from(item.quantity),
                        item.unit_price,
                        item.discount_percent,
                    )
                })
                .collect(),
            DocumentPayload::Purchase(order) => order.items.iter().map(|item| item.amount).collect(),
            DocumentPayload::Quotation(quote) => quote
                .line_items
                .iter()
                .map(|line| {
                    line_amount(
                        Decimal::from(line.quantity),
                        line.unit_price,
                        line.discount_percent,
                    )
                })
                .collect(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn positive(value: &str) -> Option<Decimal> {
    parse_decimal(value).filter(|v| *v > Decimal::ZERO)
}

/// The row amount in cents, when it is above zero.
fn positive_amount(row: &LineItem) -> Option<Decimal> {
    Some(row.amount()).filter(|amount| *amount > Decimal::ZERO)
}

fn whole_quantity(value: &str) -> Option<u32> {
    positive(value)
        .filter(|q| q.fract().is_zero())
        .and_then(|q| q.to_u32())
}

fn parse_id(value: &str) -> Option<u64> {
    non_empty(value).and_then(|v| v.parse().ok())
}

/// Optional id: blank is fine, garbage is not.
fn optional_id(value: &str) -> Option<Option<u64>> {
    match non_empty(value) {
        None => Some(None),
        Some(v) => v.parse().ok().map(Some),
    }
}

fn journal_line(row: &LineItem, accounts: &AccountDirectory) -> Option<JournalLine> {
    let side = row.side?;
    let amount = positive_amount(row)?;
    let account_code = accounts.code_for(&row.account)?;
    Some(JournalLine {
        account_code: account_code.to_string(),
        amount,
        debit: side == Side::Debit,
        description: row.description.trim().to_string(),
    })
}

fn sales_item(row: &LineItem, mode: EntryMode, accounts: &AccountDirectory) -> Option<SalesOrderItem> {
    let description = non_empty(&row.description)?;
    let account_code = accounts.code_for(&row.account)?;
    let project_id = optional_id(&row.project)?;
    let item = match mode {
        EntryMode::Item => SalesOrderItem {
            item_id: Some(parse_id(&row.item)?),
            description: description.to_string(),
            account_code: account_code.to_string(),
            quantity: whole_quantity(&row.quantity)?,
            unit_price: positive(&row.unit_price)?,
            discount_percent: parse_decimal(&row.discount).unwrap_or(Decimal::ZERO),
            project_id,
            item_type: LineItemType::Goods,
        },
        EntryMode::Service => SalesOrderItem {
            item_id: None,
            description: description.to_string(),
            account_code: account_code.to_string(),
            quantity: 1,
            unit_price: positive_amount(row)?,
            discount_percent: Decimal::ZERO,
            project_id,
            item_type: LineItemType::Service,
        },
    };
    Some(item)
}

fn purchase_item(
    row: &LineItem,
    mode: EntryMode,
    accounts: &AccountDirectory,
) -> Option<PurchaseOrderItem> {
    let account_code = accounts.code_for(&row.account)?;
    let project_id = optional_id(&row.project)?;
    let description = non_empty(&row.description).map(String::from);
    let item = match mode {
        EntryMode::Item => PurchaseOrderItem {
            item_id: Some(parse_id(&row.item)?),
            description,
            quantity: Some(whole_quantity(&row.quantity)?),
            unit_price: Some(positive(&row.unit_price)?),
            discount: Some(parse_decimal(&row.discount).unwrap_or(Decimal::ZERO)),
            amount: row.amount(),
            account_code: account_code.to_string(),
            project_id,
        },
        EntryMode::Service => PurchaseOrderItem {
            item_id: optional_id(&row.item)?,
            description,
            quantity: None,
            unit_price: None,
            discount: None,
            amount: positive_amount(row)?,
            account_code: account_code.to_string(),
            project_id,
        },
    };
    Some(item)
}

fn quotation_line(row: &LineItem) -> Option<QuotationLine> {
    Some(QuotationLine {
        description: non_empty(&row.description)?.to_string(),
        quantity: whole_quantity(&row.quantity)?,
        unit_price: positive(&row.unit_price)?,
        discount_percent: parse_decimal(&row.discount).unwrap_or(Decimal::ZERO),
    })
}

/// Keep the rows `build` accepts; the rest are dropped without complaint.
/// Only an empty result is an error here. Dropped rows that carry an amount
/// are caught afterwards by [`ensure_totals_match`].
fn collect_valid<T, F>(doc: &Document, build: F) -> Result<Vec<T>>
where
    F: Fn(&LineItem) -> Option<T>,
{
    let mut valid = Vec::new();
    for (index, row) in doc.lines.rows().iter().enumerate() {
        if row.is_blank() {
            continue;
        }
        match build(row) {
            Some(line) => valid.push(line),
            None => debug!(row = index + 1, kind = %doc.kind, "skipping incomplete row"),
        }
    }
    if valid.is_empty() {
        return Err(GinumError::NoValidRows);
    }
    Ok(valid)
}

/// Refuse a request whose re-derived subtotal differs from the one shown.
fn ensure_totals_match(doc: &Document, payload: &DocumentPayload) -> Result<()> {
    let shown = doc.totals();
    let sent = Totals::from_amounts(payload.line_amounts(), &doc.adjustments);
    if sent.subtotal != shown.subtotal {
        return Err(GinumError::IncompleteRows {
            shown: shown.subtotal,
            sent: sent.subtotal,
        });
    }
    Ok(())
}

fn payment_account_code(doc: &Document, accounts: &AccountDirectory) -> Result<Option<String>> {
    match non_empty(&doc.header.payment_account) {
        None => Ok(None),
        Some(id) => accounts
            .code_for(id)
            .map(|code| Some(code.to_string()))
            .ok_or_else(|| GinumError::InvalidValue {
                field: "payment-account".to_string(),
                value: id.to_string(),
                reason: "no such account".to_string(),
            }),
    }
}

/// Build the backend request for `doc`.
///
/// Header requirements are checked first, then journal balance, then rows
/// are mapped with account ids resolved to account codes. Journals are
/// checked for balance again over the lines that resolved. The result always
/// reproduces the subtotal `doc.totals()` shows.
pub fn assemble(
    doc: &Document,
    accounts: &AccountDirectory,
    session: &Session,
) -> Result<DocumentPayload> {
    let payload = build_payload(doc, accounts, session)?;
    ensure_totals_match(doc, &payload)?;
    Ok(payload)
}

fn build_payload(
    doc: &Document,
    accounts: &AccountDirectory,
    session: &Session,
) -> Result<DocumentPayload> {
    let company_id = session.company_id()?;
    let header = &doc.header;
    let mode = doc.mode();

    match doc.kind {
        DocumentKind::Journal => {
            let entry_date = header.date.ok_or(GinumError::MissingField("Date"))?;
            let reference_no =
                non_empty(&header.reference).ok_or(GinumError::MissingField("Reference number"))?;
            doc.balance().ensure_postable()?;
            let lines = collect_valid(doc, |row| journal_line(row, accounts))?;
            BalanceCheck::of_entries(lines.iter().map(JournalLine::entry)).ensure_postable()?;
            Ok(DocumentPayload::Journal(JournalEntryRequest {
                entry_type: JournalEntryType::General,
                entry_date,
                journal_title: header.title.trim().to_string(),
                reference_no: reference_no.to_string(),
                author_id: session.user_id,
                description: header.description.trim().to_string(),
                company_id,
                lines,
            }))
        }
        DocumentKind::Sale => {
            let customer_id = header.counterparty.ok_or(GinumError::MissingField("Customer"))?;
            let issue_date = header.date.ok_or(GinumError::MissingField("Issue date"))?;
            let so_number = non_empty(&header.reference)
                .ok_or(GinumError::MissingField("Sales order number"))?;
            let items = collect_valid(doc, |row| sales_item(row, mode, accounts))?;
            Ok(DocumentPayload::Sale(SalesOrderRequest {
                company_id,
                customer_id,
                so_number: so_number.to_string(),
                issue_date,
                due_date: header.due_date,
                notes: header.notes.clone(),
                sales_type: match mode {
                    EntryMode::Item => SalesType::Items,
                    EntryMode::Service => SalesType::Service,
                },
                amount_paid: doc.adjustments.amount_paid,
                payment_account_code: payment_account_code(doc, accounts)?,
                items,
            }))
        }
        DocumentKind::Purchase => {
            let supplier_id = header.counterparty.ok_or(GinumError::MissingField("Supplier"))?;
            let issue_date = header.date.ok_or(GinumError::MissingField("Issue date"))?;
            let po_number = non_empty(&header.reference)
                .ok_or(GinumError::MissingField("Purchase order number"))?;
            let supplier_invoice = non_empty(&header.supplier_invoice)
                .ok_or(GinumError::MissingField("Supplier invoice number"))?;
            let totals = doc.totals();
            if totals.balance_due > Decimal::ZERO && header.due_date.is_none() {
                return Err(GinumError::MissingField("Due date for unpaid purchase orders"));
            }
            let items = collect_valid(doc, |row| purchase_item(row, mode, accounts))?;
            Ok(DocumentPayload::Purchase(PurchaseOrderRequest {
                supplier_id,
                supplier_invoice_number: supplier_invoice.to_string(),
                po_number: po_number.to_string(),
                issue_date,
                due_date: header.due_date,
                notes: header.notes.clone(),
                items,
                freight: doc.adjustments.freight,
                tax_amount: totals.tax,
                amount_paid: doc.adjustments.amount_paid,
                purchase_type: match mode {
                    EntryMode::Item => PurchaseType::Goods,
                    EntryMode::Service => PurchaseType::Services,
                },
                payment_account_code: payment_account_code(doc, accounts)?,
            }))
        }
        DocumentKind::Quotation => {
            let customer_id = header.counterparty.ok_or(GinumError::MissingField("Customer"))?;
            let issue_date = header.date.ok_or(GinumError::MissingField("Issue date"))?;
            let expiry_date = header.due_date.ok_or(GinumError::MissingField("Expiry date"))?;
            let line_items = collect_valid(doc, quotation_line)?;
            Ok(DocumentPayload::Quotation(QuotationRequest {
                customer_id,
                issue_date,
                expiry_date,
                tax_percent: doc.adjustments.tax_percent,
                status: header.status.unwrap_or(QuotationStatus::Draft),
                notes: header.notes.clone(),
                terms_and_conditions: header.terms.clone(),
                line_items,
            }))
        }
    }
}
