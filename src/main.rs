use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use ginum::api::{
    Account, ApiClient, Customer, MoneyTransactionRequest, PayeeType, PaymentMethod, Supplier,
    TransactionType,
};
use ginum::config::{
    clear_session, config_dir, drafts_dir, ensure_initialized, load_config, load_session,
    save_session, Config, Session, CONFIG_TEMPLATE,
};
use ginum::document::{
    assemble, delete_draft, draft_exists, list_drafts, load_draft, save_draft,
    validate_draft_name, AccountDirectory, Document, DocumentKind,
};
use ginum::error::{GinumError, Result};
use ginum::ledger::{format_money, parse_decimal, EntryMode, Field, LineItem, Side};

#[derive(Parser)]
#[command(name = "ginum")]
#[command(version, about = "Command-line client for the Ginum accounting backend", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.ginum)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log requests and decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show backend, session and draft status
    Status,

    /// List the company's chart of accounts
    Accounts,

    /// List the company's customers
    Customers,

    /// List the company's suppliers
    Suppliers,

    /// Create, edit and submit document drafts
    Draft {
        #[command(subcommand)]
        action: DraftCommand,
    },

    /// Record a spend or receive money transaction
    Money {
        #[command(subcommand)]
        action: MoneyCommand,
    },
}

#[derive(Subcommand)]
enum DraftCommand {
    /// Start a new draft
    New {
        /// Draft name (letters, digits, '-' or '_')
        name: String,

        /// journal, sale, purchase or quotation
        #[arg(short, long, default_value = "journal")]
        kind: String,

        /// Enter amounts directly instead of quantity x unit price
        #[arg(long)]
        service: bool,
    },

    /// List saved drafts
    List,

    /// Show a draft with its rows and totals
    Show { name: String },

    /// Set fields of a row (1-based, as shown by 'draft show')
    Set {
        name: String,

        row: usize,

        /// Assignments such as account=12 qty=3 price=20
        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },

    /// Set header fields such as date, customer, reference or freight
    Header {
        name: String,

        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },

    /// Remove a row (1-based)
    RemoveRow { name: String, row: usize },

    /// Validate and submit a draft to the backend
    Submit {
        name: String,

        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a draft without submitting it
    Discard { name: String },
}

#[derive(Subcommand)]
enum MoneyCommand {
    /// Pay money out of a bank account
    Spend(MoneyArgs),

    /// Receive money into a bank account
    Receive(MoneyArgs),
}

#[derive(Args)]
struct MoneyArgs {
    /// Bank account id
    #[arg(long)]
    bank_account: u64,

    /// Expense or income account id to charge
    #[arg(long)]
    charge_account: u64,

    /// supplier, customer, employee or other
    #[arg(long, default_value = "other")]
    payee_type: String,

    /// Payee id (required unless payee type is other)
    #[arg(long)]
    payee: Option<u64>,

    #[arg(long)]
    amount: String,

    /// bank-transfer, cash, cheque or credit-card
    #[arg(long, default_value = "bank-transfer")]
    method: String,

    /// Transaction date (default: today)
    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    reference: Option<String>,

    #[arg(long)]
    project: Option<u64>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "ginum=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    let result = dispatch(&cfg_dir, cli.command);

    // Drop a rejected token so the next command asks for a fresh login.
    if matches!(result, Err(GinumError::Unauthorized)) {
        match clear_session(&cfg_dir) {
            Ok(true) => debug!("cleared rejected session"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not clear session"),
        }
    }
    result
}

fn dispatch(cfg_dir: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Init => cmd_init(cfg_dir),
        Commands::Login { email, password } => cmd_login(cfg_dir, &email, &password),
        Commands::Logout => cmd_logout(cfg_dir),
        Commands::Status => cmd_status(cfg_dir),
        Commands::Accounts => cmd_accounts(cfg_dir),
        Commands::Customers => cmd_customers(cfg_dir),
        Commands::Suppliers => cmd_suppliers(cfg_dir),
        Commands::Draft { action } => match action {
            DraftCommand::New {
                name,
                kind,
                service,
            } => cmd_draft_new(cfg_dir, &name, &kind, service),
            DraftCommand::List => cmd_draft_list(cfg_dir),
            DraftCommand::Show { name } => cmd_draft_show(cfg_dir, &name),
            DraftCommand::Set {
                name,
                row,
                assignments,
            } => cmd_draft_set(cfg_dir, &name, row, &assignments),
            DraftCommand::Header { name, assignments } => {
                cmd_draft_header(cfg_dir, &name, &assignments)
            }
            DraftCommand::RemoveRow { name, row } => cmd_draft_remove_row(cfg_dir, &name, row),
            DraftCommand::Submit { name, dry_run } => cmd_draft_submit(cfg_dir, &name, dry_run),
            DraftCommand::Discard { name } => cmd_draft_discard(cfg_dir, &name),
        },
        Commands::Money { action } => match action {
            MoneyCommand::Spend(args) => cmd_money(cfg_dir, TransactionType::SpendMoney, args),
            MoneyCommand::Receive(args) => {
                cmd_money(cfg_dir, TransactionType::ReceiveMoney, args)
            }
        },
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(GinumError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(drafts_dir(cfg_dir))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized ginum config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Sign in:                ginum login --email <email> --password <password>");
    println!();
    println!("Then start your first draft:");
    println!("  ginum draft new <name> --kind journal");

    Ok(())
}

/// Load config and session and build a client for the session's company
fn connect(cfg_dir: &Path) -> Result<(Config, ApiClient, u64)> {
    ensure_initialized(cfg_dir)?;
    let config = load_config(cfg_dir)?;
    let session = load_session(cfg_dir)?;
    let company_id = session.company_id()?;
    let client = ApiClient::new(&config.api, session);
    Ok((config, client, company_id))
}

fn cmd_login(cfg_dir: &Path, email: &str, password: &str) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.api, Session::anonymous());

    let response = client.login(email.trim(), password)?;
    let session = Session {
        token: Some(response.token),
        role: Some(response.role.clone()),
        email: Some(email.trim().to_string()),
        company_id: response.company_id,
        user_id: response.user_id,
    };
    save_session(cfg_dir, &session)?;

    println!("Logged in as {} ({})", email.trim(), response.role);
    match session.company_id {
        Some(id) => println!("Company: {id}"),
        None => println!("No company is linked to this account."),
    }
    Ok(())
}

fn cmd_logout(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    if clear_session(cfg_dir)? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

fn cmd_status(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let config = load_config(cfg_dir)?;
    let session = load_session(cfg_dir)?;
    let drafts = list_drafts(cfg_dir)?;

    println!("Config:   {}", cfg_dir.display());
    println!("Backend:  {}", config.api.base_url);
    if session.is_authenticated() {
        println!(
            "User:     {} ({})",
            session.email.as_deref().unwrap_or("unknown"),
            session.role.as_deref().unwrap_or("unknown role")
        );
        match session.company_id {
            Some(id) => println!("Company:  {id}"),
            None => println!("Company:  none"),
        }
    } else {
        println!("User:     not logged in");
    }
    println!("Drafts:   {}", drafts.len());

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    account_type: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "PHONE")]
    phone: String,
}

#[derive(Tabled)]
struct SupplierRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "MOBILE")]
    mobile: String,
}

#[derive(Tabled)]
struct DraftRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "LINES")]
    lines: usize,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct JournalLineRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ACCOUNT")]
    account: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "PROJECT")]
    project: String,
    #[tabled(rename = "DEBIT")]
    debit: String,
    #[tabled(rename = "CREDIT")]
    credit: String,
}

#[derive(Tabled)]
struct ItemLineRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ACCOUNT")]
    account: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "ITEM")]
    item: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "PRICE")]
    unit_price: String,
    #[tabled(rename = "DISC %")]
    discount: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

fn cmd_accounts(cfg_dir: &Path) -> Result<()> {
    let (config, client, company_id) = connect(cfg_dir)?;
    let accounts: Vec<Account> = client.accounts(company_id)?;

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    let symbol = &config.display.currency_symbol;
    let rows: Vec<AccountRow> = accounts
        .iter()
        .map(|account| AccountRow {
            id: account.id,
            code: account.account_code.clone(),
            name: match &account.sub_account_name {
                Some(sub) if !sub.is_empty() => format!("{} / {sub}", account.account_name),
                _ => account.account_name.clone(),
            },
            account_type: or_dash(account.account_type.as_deref()),
            balance: account
                .current_balance
                .map(|b| format_money(b, symbol))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    print_table(rows);
    Ok(())
}

fn cmd_customers(cfg_dir: &Path) -> Result<()> {
    let (_, client, company_id) = connect(cfg_dir)?;
    let customers: Vec<Customer> = client.customers(company_id)?;

    if customers.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    let rows: Vec<CustomerRow> = customers
        .iter()
        .map(|c| CustomerRow {
            id: c.id,
            name: c.name.clone(),
            email: or_dash(c.email.as_deref()),
            phone: or_dash(c.phone_no.as_deref()),
        })
        .collect();

    print_table(rows);
    Ok(())
}

fn cmd_suppliers(cfg_dir: &Path) -> Result<()> {
    let (_, client, company_id) = connect(cfg_dir)?;
    let suppliers: Vec<Supplier> = client.suppliers(company_id)?;

    if suppliers.is_empty() {
        println!("No suppliers found.");
        return Ok(());
    }

    let rows: Vec<SupplierRow> = suppliers
        .iter()
        .map(|s| SupplierRow {
            id: s.id,
            name: s.supplier_name.clone(),
            email: or_dash(s.email.as_deref()),
            mobile: or_dash(s.mobile_no.as_deref()),
        })
        .collect();

    print_table(rows);
    Ok(())
}

fn cmd_draft_new(cfg_dir: &Path, name: &str, kind: &str, service: bool) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    validate_draft_name(name)?;
    if draft_exists(cfg_dir, name)? {
        return Err(GinumError::DraftExists(name.to_string()));
    }

    let kind: DocumentKind = kind.parse()?;
    let mode = if service {
        EntryMode::Service
    } else {
        EntryMode::Item
    };
    let mut doc = Document::new(kind, mode);
    doc.header.date = Some(Local::now().date_naive());
    if matches!(kind, DocumentKind::Purchase | DocumentKind::Quotation) {
        let config = load_config(cfg_dir)?;
        doc.adjustments.tax_percent = config.documents.default_tax_percent;
    }
    save_draft(cfg_dir, name, &doc)?;

    match kind {
        DocumentKind::Sale | DocumentKind::Purchase => {
            println!("Created {kind} draft '{name}' ({} mode)", doc.mode())
        }
        _ => println!("Created {kind} draft '{name}'"),
    }
    Ok(())
}

fn filled_rows(doc: &Document) -> usize {
    doc.lines.rows().iter().filter(|row| !row.is_blank()).count()
}

fn cmd_draft_list(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let config = load_config(cfg_dir)?;
    let drafts = list_drafts(cfg_dir)?;

    if drafts.is_empty() {
        println!("No drafts.");
        println!("Start one with: ginum draft new <name> --kind <kind>");
        return Ok(());
    }

    let symbol = &config.display.currency_symbol;
    let rows: Vec<DraftRow> = drafts
        .iter()
        .map(|(name, doc)| {
            let total = match doc.kind {
                DocumentKind::Journal => doc.balance().total_debit,
                _ => doc.totals().total,
            };
            DraftRow {
                name: name.clone(),
                kind: doc.kind.to_string(),
                date: doc
                    .header
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                lines: filled_rows(doc),
                total: format_money(total, symbol),
            }
        })
        .collect();

    print_table(rows);
    Ok(())
}

fn print_header(name: &str, doc: &Document) {
    let header = &doc.header;
    match doc.kind {
        DocumentKind::Sale | DocumentKind::Purchase => {
            println!("Draft '{name}' ({}, {} mode)", doc.kind, doc.mode())
        }
        _ => println!("Draft '{name}' ({})", doc.kind),
    }

    let mut fields: Vec<(&str, String)> = Vec::new();
    if let Some(date) = header.date {
        fields.push(("Date", date.to_string()));
    }
    if let Some(due) = header.due_date {
        let label = match doc.kind {
            DocumentKind::Quotation => "Expiry",
            _ => "Due",
        };
        fields.push((label, due.to_string()));
    }
    if let Some(id) = header.counterparty {
        let label = match doc.kind {
            DocumentKind::Purchase => "Supplier",
            _ => "Customer",
        };
        fields.push((label, id.to_string()));
    }
    let text_fields = [
        ("Reference", &header.reference),
        ("Title", &header.title),
        ("Description", &header.description),
        ("Supplier inv", &header.supplier_invoice),
        ("Payment acct", &header.payment_account),
        ("Notes", &header.notes),
        ("Terms", &header.terms),
    ];
    for (label, value) in text_fields {
        if !value.trim().is_empty() {
            fields.push((label, value.clone()));
        }
    }
    if let Some(status) = header.status {
        fields.push(("Status", format!("{status:?}").to_uppercase()));
    }

    for (label, value) in fields {
        println!("  {:<13} {value}", format!("{label}:"));
    }
    println!();
}

fn print_rows(doc: &Document) {
    let rows = doc.lines.rows();
    if doc.kind == DocumentKind::Journal {
        let table_rows: Vec<JournalLineRow> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| JournalLineRow {
                index: i + 1,
                account: row.account.clone(),
                description: row.description.clone(),
                project: row.project.clone(),
                debit: side_amount(row, Side::Debit),
                credit: side_amount(row, Side::Credit),
            })
            .collect();
        print_table(table_rows);
    } else {
        let table_rows: Vec<ItemLineRow> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| ItemLineRow {
                index: i + 1,
                account: row.account.clone(),
                description: row.description.clone(),
                item: row.item.clone(),
                quantity: row.quantity.clone(),
                unit_price: row.unit_price.clone(),
                discount: row.discount.clone(),
                amount: row.amount.clone(),
            })
            .collect();
        print_table(table_rows);
    }
}

fn side_amount(row: &LineItem, side: Side) -> String {
    if row.side == Some(side) {
        row.amount.clone()
    } else {
        String::new()
    }
}

fn print_totals(doc: &Document, symbol: &str) {
    let line = |label: &str, value: Decimal| {
        println!("{:>16} {:>14}", format!("{label}:"), format_money(value, symbol));
    };

    if doc.kind == DocumentKind::Journal {
        let balance = doc.balance();
        line("Total debit", balance.total_debit);
        line("Total credit", balance.total_credit);
        if !balance.is_balanced() {
            line("Out of balance", balance.out_of_balance);
            println!();
            println!("Debits and credits must match before this entry can be submitted.");
        }
        return;
    }

    let totals = doc.totals();
    line("Subtotal", totals.subtotal);
    if matches!(doc.kind, DocumentKind::Purchase | DocumentKind::Quotation) {
        let label = format!("Tax ({}%)", doc.adjustments.tax_percent.normalize());
        line(label.as_str(), totals.tax);
    }
    if matches!(doc.kind, DocumentKind::Sale | DocumentKind::Purchase) {
        line("Freight", totals.freight);
    }
    line("Total", totals.total);
    if matches!(doc.kind, DocumentKind::Sale | DocumentKind::Purchase) {
        line("Paid", totals.amount_paid);
        line("Balance due", totals.balance_due);
    }
}

fn cmd_draft_show(cfg_dir: &Path, name: &str) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let config = load_config(cfg_dir)?;
    let doc = load_draft(cfg_dir, name)?;

    print_header(name, &doc);
    print_rows(&doc);
    println!();
    print_totals(&doc, &config.display.currency_symbol);
    Ok(())
}

fn split_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .ok_or_else(|| GinumError::InvalidAssignment(assignment.to_string()))
}

fn is_numeric_field(field: Field) -> bool {
    matches!(
        field,
        Field::Quantity
            | Field::UnitPrice
            | Field::Discount
            | Field::Amount
            | Field::Debit
            | Field::Credit
    )
}

/// Convert a 1-based row number from the command line
fn row_index(doc: &Document, row: usize) -> Result<usize> {
    row.checked_sub(1).ok_or(GinumError::RowOutOfRange {
        row,
        count: doc.lines.len(),
    })
}

fn cmd_draft_set(cfg_dir: &Path, name: &str, row: usize, assignments: &[String]) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let mut doc = load_draft(cfg_dir, name)?;
    let index = row_index(&doc, row)?;

    for assignment in assignments {
        let (key, value) = split_assignment(assignment)?;
        let field: Field = key.parse()?;
        if is_numeric_field(field) && !value.trim().is_empty() && parse_decimal(value).is_none() {
            warn!(%field, value, "not a number, counts as 0");
        }
        doc.update_row(index, field, value)?;
    }
    save_draft(cfg_dir, name, &doc)?;

    println!("Updated row {row} of '{name}'");
    Ok(())
}

fn cmd_draft_header(cfg_dir: &Path, name: &str, assignments: &[String]) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let mut doc = load_draft(cfg_dir, name)?;

    for assignment in assignments {
        let (key, value) = split_assignment(assignment)?;
        doc.set_header(key, value)?;
    }
    save_draft(cfg_dir, name, &doc)?;

    println!("Updated header of '{name}'");
    Ok(())
}

fn cmd_draft_remove_row(cfg_dir: &Path, name: &str, row: usize) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    let mut doc = load_draft(cfg_dir, name)?;
    let index = row_index(&doc, row)?;

    doc.remove_row(index)?;
    save_draft(cfg_dir, name, &doc)?;

    println!("Removed row {row} from '{name}'");
    Ok(())
}

fn cmd_draft_submit(cfg_dir: &Path, name: &str, dry_run: bool) -> Result<()> {
    let (config, client, company_id) = connect(cfg_dir)?;
    let mut doc = load_draft(cfg_dir, name)?;

    if doc.header.reference.trim().is_empty() {
        let next = match doc.kind {
            DocumentKind::Sale => Some(client.next_sales_order_number(company_id)?),
            DocumentKind::Purchase => Some(client.next_purchase_order_number(company_id)?),
            _ => None,
        };
        if let Some(number) = next {
            println!("Using next {} number: {number}", doc.kind);
            doc.header.reference = number;
        }
    }

    let accounts = match doc.kind {
        DocumentKind::Quotation => Vec::new(),
        _ => client.accounts(company_id)?,
    };
    let directory = AccountDirectory::new(&accounts);
    let payload = assemble(&doc, &directory, client.session())?;

    if dry_run {
        println!("POST {}", payload.endpoint(company_id));
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    client.submit_document(company_id, &payload)?;
    delete_draft(cfg_dir, name)?;

    let symbol = &config.display.currency_symbol;
    match doc.kind {
        DocumentKind::Journal => {
            let balance = doc.balance();
            println!(
                "Posted journal entry {} (debit {} = credit {})",
                doc.header.reference,
                format_money(balance.total_debit, symbol),
                format_money(balance.total_credit, symbol)
            );
        }
        kind => println!(
            "Submitted {kind} '{name}': total {}",
            format_money(doc.totals().total, symbol)
        ),
    }
    Ok(())
}

fn cmd_draft_discard(cfg_dir: &Path, name: &str) -> Result<()> {
    ensure_initialized(cfg_dir)?;
    delete_draft(cfg_dir, name)?;
    println!("Discarded draft '{name}'");
    Ok(())
}

fn parse_date_arg(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| GinumError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

fn cmd_money(cfg_dir: &Path, transaction_type: TransactionType, args: MoneyArgs) -> Result<()> {
    let (config, client, company_id) = connect(cfg_dir)?;

    let amount = parse_decimal(&args.amount).ok_or_else(|| GinumError::InvalidValue {
        field: "amount".to_string(),
        value: args.amount.clone(),
        reason: "not a number".to_string(),
    })?;
    let payee_type: PayeeType = args.payee_type.parse()?;
    let payment_method: PaymentMethod = args.method.parse()?;
    let transaction_date = match args.date.as_deref() {
        Some(date) => parse_date_arg("date", date)?,
        None => Local::now().date_naive(),
    };

    let request = MoneyTransactionRequest {
        transaction_type,
        transaction_date,
        bank_account_id: args.bank_account,
        payee_type,
        payee_id: args.payee,
        charge_account_id: args.charge_account,
        amount,
        description: args
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| MoneyTransactionRequest::default_description(transaction_type)),
        payment_method,
        reference_number: args.reference.filter(|r| !r.trim().is_empty()),
        project_id: args.project,
    };

    client.record_money_transaction(company_id, &request)?;
    println!(
        "Recorded {transaction_type}: {} on {transaction_date}",
        format_money(amount, &config.display.currency_symbol)
    );
    Ok(())
}
