use chrono::NaiveDate;
use ginum::api::Account;
use ginum::config::Session;
use ginum::document::{
    assemble, AccountDirectory, Document, DocumentKind, DocumentPayload, QuotationStatus,
};
use ginum::ledger::{EntryMode, Field, Totals};
use ginum::GinumError;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn session() -> Session {
    Session {
        token: Some("tok".to_string()),
        role: Some("ROLE_COMPANY".to_string()),
        email: Some("owner@example.com".to_string()),
        company_id: Some(7),
        user_id: Some(3),
    }
}

fn directory() -> AccountDirectory {
    let accounts = vec![
        Account {
            id: 1,
            account_code: "1000".to_string(),
            account_name: "Cash".to_string(),
            sub_account_name: None,
            account_type: None,
            current_balance: None,
        },
        Account {
            id: 2,
            account_code: "4000".to_string(),
            account_name: "Sales".to_string(),
            sub_account_name: None,
            account_type: None,
            current_balance: None,
        },
    ];
    AccountDirectory::new(&accounts)
}

fn set_row(doc: &mut Document, row: usize, values: &[(Field, &str)]) {
    for (field, value) in values {
        doc.update_row(row, *field, value).unwrap();
    }
}

fn journal() -> Document {
    let mut doc = Document::new(DocumentKind::Journal, EntryMode::Item);
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "JV-7").unwrap();
    doc.set_header("title", "Month end").unwrap();
    set_row(&mut doc, 0, &[(Field::Account, "1"), (Field::Debit, "100")]);
    set_row(&mut doc, 1, &[(Field::Account, "2"), (Field::Credit, "60")]);
    set_row(&mut doc, 2, &[(Field::Account, "2"), (Field::Credit, "40")]);
    doc
}

fn sale() -> Document {
    let mut doc = Document::new(DocumentKind::Sale, EntryMode::Item);
    doc.set_header("customer", "5").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "SO-0001").unwrap();
    doc.set_header("freight", "5").unwrap();
    set_row(
        &mut doc,
        0,
        &[
            (Field::Account, "2"),
            (Field::Description, "Widget"),
            (Field::Item, "11"),
            (Field::Quantity, "3"),
            (Field::UnitPrice, "20"),
            (Field::Discount, "10"),
        ],
    );
    set_row(
        &mut doc,
        1,
        &[
            (Field::Account, "2"),
            (Field::Description, "Gadget"),
            (Field::Item, "12"),
            (Field::Quantity, "2"),
            (Field::UnitPrice, "7.25"),
        ],
    );
    doc
}

#[test]
fn test_journal_forces_service_mode() {
    let doc = Document::new(DocumentKind::Journal, EntryMode::Item);
    assert_eq!(doc.mode(), EntryMode::Service);
    let doc = Document::new(DocumentKind::Quotation, EntryMode::Service);
    assert_eq!(doc.mode(), EntryMode::Item);
}

#[test]
fn test_assemble_journal() {
    let payload = assemble(&journal(), &directory(), &session()).unwrap();
    assert_eq!(payload.endpoint(7), "/api/companies/7/journal-entries");

    let DocumentPayload::Journal(entry) = payload else {
        panic!("expected a journal payload");
    };
    assert_eq!(entry.reference_no, "JV-7");
    assert_eq!(entry.journal_title, "Month end");
    assert_eq!(entry.company_id, 7);
    assert_eq!(entry.author_id, Some(3));
    assert_eq!(entry.entry_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(entry.lines.len(), 3);
    assert_eq!(entry.lines[0].account_code, "1000");
    assert!(entry.lines[0].debit);
    assert_eq!(entry.lines[1].account_code, "4000");
    assert!(!entry.lines[1].debit);
}

#[test]
fn test_journal_out_of_balance_is_rejected() {
    let mut doc = journal();
    doc.update_row(2, Field::Credit, "30").unwrap();

    let err = assemble(&doc, &directory(), &session()).unwrap_err();
    match err {
        GinumError::OutOfBalance { difference, .. } => assert_eq!(difference, dec("10")),
        other => panic!("expected OutOfBalance, got {other:?}"),
    }
}

#[test]
fn test_journal_requires_reference() {
    let mut doc = journal();
    doc.set_header("reference", "  ").unwrap();
    assert!(matches!(
        assemble(&doc, &directory(), &session()),
        Err(GinumError::MissingField("Reference number"))
    ));
}

#[test]
fn test_assemble_requires_company() {
    let anonymous = Session::anonymous();
    assert!(matches!(
        assemble(&journal(), &directory(), &anonymous),
        Err(GinumError::NotLoggedIn)
    ));

    let mut no_company = session();
    no_company.company_id = None;
    assert!(matches!(
        assemble(&journal(), &directory(), &no_company),
        Err(GinumError::NoCompany)
    ));
}

#[test]
fn test_assemble_sale_items() {
    let doc = sale();
    let payload = assemble(&doc, &directory(), &session()).unwrap();
    assert_eq!(payload.endpoint(7), "/api/sales-orders/company/7");

    let DocumentPayload::Sale(order) = &payload else {
        panic!("expected a sales order payload");
    };
    assert_eq!(order.customer_id, 5);
    assert_eq!(order.so_number, "SO-0001");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.items[0].item_id, Some(11));
    assert_eq!(order.items[0].discount_percent, dec("10"));
    assert_eq!(order.items[1].unit_price, dec("7.25"));
}

#[test]
fn test_sale_payload_reproduces_shown_totals() {
    let doc = sale();
    let payload = assemble(&doc, &directory(), &session()).unwrap();

    let shown = doc.totals();
    let sent = Totals::from_amounts(payload.line_amounts(), &doc.adjustments);
    assert_eq!(sent, shown);
    assert_eq!(shown.subtotal, dec("68.50"));
    assert_eq!(shown.total, dec("73.50"));
}

#[test]
fn test_rows_without_amount_are_skipped() {
    let mut doc = sale();
    // A note-only row never reaches the request
    set_row(&mut doc, 2, &[(Field::Description, "Thanks for your order")]);

    let payload = assemble(&doc, &directory(), &session()).unwrap();
    assert_eq!(payload.line_amounts().len(), 2);
}

#[test]
fn test_dropped_rows_with_amounts_are_refused() {
    let mut doc = sale();
    // Unknown account
    set_row(
        &mut doc,
        2,
        &[
            (Field::Account, "99"),
            (Field::Description, "Mystery"),
            (Field::Item, "13"),
            (Field::Quantity, "1"),
            (Field::UnitPrice, "5"),
        ],
    );
    // Fractional quantity in item mode
    set_row(
        &mut doc,
        3,
        &[
            (Field::Account, "2"),
            (Field::Description, "Half"),
            (Field::Item, "14"),
            (Field::Quantity, "1.5"),
            (Field::UnitPrice, "5"),
        ],
    );

    match assemble(&doc, &directory(), &session()) {
        Err(GinumError::IncompleteRows { shown, sent }) => {
            assert_eq!(shown, dec("81.00"));
            assert_eq!(sent, dec("68.50"));
        }
        other => panic!("expected IncompleteRows, got {other:?}"),
    }
}

#[test]
fn test_journal_with_unknown_account_is_out_of_balance() {
    let mut doc = journal();
    doc.update_row(1, Field::Account, "999").unwrap();
    // Balanced as entered, but only 100 debit and 40 credit resolve
    assert!(doc.balance().is_balanced());

    match assemble(&doc, &directory(), &session()) {
        Err(GinumError::OutOfBalance {
            debit,
            credit,
            difference,
        }) => {
            assert_eq!(debit, dec("100"));
            assert_eq!(credit, dec("40"));
            assert_eq!(difference, dec("60"));
        }
        other => panic!("expected OutOfBalance, got {other:?}"),
    }
}

#[test]
fn test_journal_with_missing_account_is_out_of_balance() {
    let mut doc = Document::new(DocumentKind::Journal, EntryMode::Service);
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "JV-8").unwrap();
    set_row(&mut doc, 0, &[(Field::Account, "1"), (Field::Debit, "100")]);
    set_row(&mut doc, 1, &[(Field::Account, "2"), (Field::Credit, "150")]);
    set_row(&mut doc, 2, &[(Field::Debit, "50")]);
    assert!(doc.balance().is_balanced());

    match assemble(&doc, &directory(), &session()) {
        Err(GinumError::OutOfBalance { difference, .. }) => assert_eq!(difference, dec("50")),
        other => panic!("expected OutOfBalance, got {other:?}"),
    }
}

#[test]
fn test_journal_with_offsetting_unknown_accounts_is_refused() {
    let mut doc = Document::new(DocumentKind::Journal, EntryMode::Service);
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "JV-9").unwrap();
    set_row(&mut doc, 0, &[(Field::Account, "1"), (Field::Debit, "100")]);
    set_row(&mut doc, 1, &[(Field::Account, "2"), (Field::Credit, "100")]);
    set_row(&mut doc, 2, &[(Field::Account, "998"), (Field::Debit, "30")]);
    set_row(&mut doc, 3, &[(Field::Account, "999"), (Field::Credit, "30")]);

    assert!(matches!(
        assemble(&doc, &directory(), &session()),
        Err(GinumError::IncompleteRows { .. })
    ));
}

#[test]
fn test_service_amounts_are_sent_as_shown() {
    let mut doc = Document::new(DocumentKind::Sale, EntryMode::Service);
    doc.set_header("customer", "5").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "SO-0003").unwrap();
    set_row(
        &mut doc,
        0,
        &[(Field::Account, "2"), (Field::Description, "Setup"), (Field::Amount, "10.005")],
    );

    let payload = assemble(&doc, &directory(), &session()).unwrap();
    let DocumentPayload::Sale(order) = &payload else {
        panic!("expected a sales order payload");
    };
    assert_eq!(order.items[0].unit_price, dec("10.01"));

    let shown = doc.totals();
    assert_eq!(shown.subtotal, dec("10.01"));
    assert_eq!(Totals::from_amounts(payload.line_amounts(), &doc.adjustments), shown);
}

#[test]
fn test_oversized_quantity_does_not_overflow() {
    let mut doc = Document::new(DocumentKind::Quotation, EntryMode::Item);
    doc.set_header("customer", "5").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("expiry", "2026-03-31").unwrap();
    set_row(
        &mut doc,
        0,
        &[
            (Field::Description, "Too many"),
            (Field::Quantity, "79228162514264337593543950335"),
            (Field::UnitPrice, "2"),
        ],
    );
    set_row(
        &mut doc,
        1,
        &[
            (Field::Description, "Consulting day"),
            (Field::Quantity, "1"),
            (Field::UnitPrice, "400"),
        ],
    );

    assert_eq!(doc.lines.rows()[0].amount(), Decimal::ZERO);
    assert_eq!(doc.totals().subtotal, dec("400"));

    let payload = assemble(&doc, &AccountDirectory::default(), &session()).unwrap();
    assert_eq!(payload.line_amounts(), vec![dec("400")]);
}

#[test]
fn test_no_valid_rows() {
    let mut doc = Document::new(DocumentKind::Sale, EntryMode::Service);
    doc.set_header("customer", "5").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "SO-0002").unwrap();
    set_row(&mut doc, 0, &[(Field::Description, "No account"), (Field::Amount, "10")]);

    assert!(matches!(
        assemble(&doc, &directory(), &session()),
        Err(GinumError::NoValidRows)
    ));
}

#[test]
fn test_sale_requires_customer() {
    let mut doc = sale();
    doc.set_header("customer", "").unwrap();
    assert!(matches!(
        assemble(&doc, &directory(), &session()),
        Err(GinumError::MissingField("Customer"))
    ));
}

#[test]
fn test_purchase_with_balance_due_needs_due_date() {
    let mut doc = Document::new(DocumentKind::Purchase, EntryMode::Service);
    doc.set_header("supplier", "8").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "PO-0009").unwrap();
    doc.set_header("supplier-invoice", "INV-555").unwrap();
    doc.set_header("tax", "10").unwrap();
    doc.set_header("freight", "12.5").unwrap();
    set_row(
        &mut doc,
        0,
        &[(Field::Account, "1"), (Field::Description, "Paper"), (Field::Amount, "200")],
    );

    assert!(matches!(
        assemble(&doc, &directory(), &session()),
        Err(GinumError::MissingField(_))
    ));

    doc.set_header("due-date", "2026-04-01").unwrap();
    let payload = assemble(&doc, &directory(), &session()).unwrap();
    assert_eq!(payload.endpoint(7), "/api/7/purchase-orders");

    let shown = doc.totals();
    assert_eq!(shown.tax, dec("20"));
    assert_eq!(shown.total, dec("232.5"));

    let DocumentPayload::Purchase(order) = &payload else {
        panic!("expected a purchase order payload");
    };
    assert_eq!(order.tax_amount, dec("20"));
    assert_eq!(order.freight, dec("12.5"));
    assert_eq!(order.items[0].amount, dec("200"));
    assert_eq!(order.items[0].quantity, None);

    let sent = Totals::from_amounts(payload.line_amounts(), &doc.adjustments);
    assert_eq!(sent, shown);
}

#[test]
fn test_paid_purchase_needs_no_due_date() {
    let mut doc = Document::new(DocumentKind::Purchase, EntryMode::Service);
    doc.set_header("supplier", "8").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("reference", "PO-0010").unwrap();
    doc.set_header("supplier-invoice", "INV-556").unwrap();
    doc.set_header("paid", "50").unwrap();
    doc.set_header("payment-account", "1").unwrap();
    set_row(
        &mut doc,
        0,
        &[(Field::Account, "2"), (Field::Description, "Ink"), (Field::Amount, "50")],
    );

    let payload = assemble(&doc, &directory(), &session()).unwrap();
    let DocumentPayload::Purchase(order) = payload else {
        panic!("expected a purchase order payload");
    };
    assert_eq!(order.payment_account_code.as_deref(), Some("1000"));
    assert_eq!(order.due_date, None);
}

#[test]
fn test_assemble_quotation() {
    let mut doc = Document::new(DocumentKind::Quotation, EntryMode::Item);
    doc.set_header("customer", "5").unwrap();
    doc.set_header("date", "2026-03-01").unwrap();
    doc.set_header("tax", "5").unwrap();
    set_row(
        &mut doc,
        0,
        &[
            (Field::Description, "Consulting day"),
            (Field::Quantity, "2"),
            (Field::UnitPrice, "400"),
        ],
    );

    assert!(matches!(
        assemble(&doc, &directory(), &session()),
        Err(GinumError::MissingField("Expiry date"))
    ));

    doc.set_header("expiry", "2026-03-31").unwrap();
    let payload = assemble(&doc, &AccountDirectory::default(), &session()).unwrap();
    assert_eq!(payload.endpoint(7), "/api/companies/7/quotations");

    let DocumentPayload::Quotation(quote) = &payload else {
        panic!("expected a quotation payload");
    };
    assert_eq!(quote.status, QuotationStatus::Draft);
    assert_eq!(quote.line_items.len(), 1);

    let sent = Totals::from_amounts(payload.line_amounts(), &doc.adjustments);
    assert_eq!(sent, doc.totals());
    assert_eq!(sent.total, dec("840"));
}

#[test]
fn test_header_fields_depend_on_kind() {
    let mut doc = Document::new(DocumentKind::Journal, EntryMode::Service);
    assert!(matches!(
        doc.set_header("customer", "5"),
        Err(GinumError::FieldNotApplicable { .. })
    ));
    assert!(matches!(
        doc.set_header("colour", "red"),
        Err(GinumError::UnknownField(_))
    ));
    assert!(matches!(
        doc.set_header("date", "03/01/2026"),
        Err(GinumError::InvalidValue { .. })
    ));
    assert!(matches!(
        doc.update_row(0, Field::UnitPrice, "3"),
        Err(GinumError::FieldNotApplicable { .. })
    ));
}

#[test]
fn test_payload_serializes_backend_field_names() {
    let payload = assemble(&sale(), &directory(), &session()).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["soNumber"], "SO-0001");
    assert_eq!(json["salesType"], "ITEMS");
    assert_eq!(json["issueDate"], "2026-03-01");
    assert_eq!(json["items"][0]["accountCode"], "4000");
    assert_eq!(json["items"][0]["itemType"], "GOODS");
    assert_eq!(json["items"][1]["unitPrice"], 7.25);
}
