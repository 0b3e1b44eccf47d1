use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use super::client::ApiClient;
use crate::document::DocumentPayload;
use crate::error::{GinumError, Result};

/// Chart-of-accounts entry
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: u64,
    pub account_code: String,
    pub account_name: String,
    #[serde(default)]
    pub sub_account_name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub current_balance: Option<Decimal>,
}

impl Account {
    /// "CODE - Name", the label used in account pickers
    pub fn label(&self) -> String {
        format!("{} - {}", self.account_code, self.account_name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub customer_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    pub supplier_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub supplier_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

pub const ROLE_SUPER_ADMIN: &str = "ROLE_SUPER_ADMIN";
pub const ROLE_COMPANY: &str = "ROLE_COMPANY";
pub const ROLE_APP_USER: &str = "ROLE_APP_USER";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextSalesOrderNumber {
    so_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextPurchaseOrderNumber {
    po_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    SpendMoney,
    ReceiveMoney,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayeeType {
    Supplier,
    Customer,
    Employee,
    Other,
}

impl FromStr for PayeeType {
    type Err = GinumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supplier" => Ok(PayeeType::Supplier),
            "customer" => Ok(PayeeType::Customer),
            "employee" => Ok(PayeeType::Employee),
            "other" => Ok(PayeeType::Other),
            _ => Err(GinumError::InvalidValue {
                field: "payee type".to_string(),
                value: s.to_string(),
                reason: "use supplier, customer, employee or other".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    Cheque,
    CreditCard,
}

impl FromStr for PaymentMethod {
    type Err = GinumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bank-transfer" | "transfer" => Ok(PaymentMethod::BankTransfer),
            "cash" => Ok(PaymentMethod::Cash),
            "cheque" | "check" => Ok(PaymentMethod::Cheque),
            "credit-card" | "card" => Ok(PaymentMethod::CreditCard),
            _ => Err(GinumError::InvalidValue {
                field: "payment method".to_string(),
                value: s.to_string(),
                reason: "use bank-transfer, cash, cheque or credit-card".to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::SpendMoney => write!(f, "Spend Money"),
            TransactionType::ReceiveMoney => write!(f, "Receive Money"),
        }
    }
}

/// Spend/receive money request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyTransactionRequest {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub transaction_date: chrono::NaiveDate,
    pub bank_account_id: u64,
    pub payee_type: PayeeType,
    pub payee_id: Option<u64>,
    pub charge_account_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub project_id: Option<u64>,
}

impl MoneyTransactionRequest {
    /// Client-side checks before the request is sent.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(GinumError::InvalidValue {
                field: "amount".to_string(),
                value: self.amount.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.payee_type != PayeeType::Other && self.payee_id.is_none() {
            return Err(GinumError::MissingField("Payee"));
        }
        Ok(())
    }

    pub fn default_description(transaction_type: TransactionType) -> String {
        match transaction_type {
            TransactionType::SpendMoney => "Money spent".to_string(),
            TransactionType::ReceiveMoney => "Money received".to_string(),
        }
    }
}

impl ApiClient {
    /// Exchange credentials for a session token.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .post("/api/auth/login", &LoginRequest { email, password })
            .map_err(|e| match e {
                GinumError::Unauthorized => GinumError::InvalidCredentials,
                other => other,
            })?;
        if response.token.is_empty() || response.role.is_empty() {
            return Err(GinumError::InvalidResponse(
                "missing token or role in login response".to_string(),
            ));
        }
        match response.role.as_str() {
            ROLE_SUPER_ADMIN | ROLE_COMPANY | ROLE_APP_USER => Ok(response),
            other => Err(GinumError::UnknownRole(other.to_string())),
        }
    }

    pub fn accounts(&self, company_id: u64) -> Result<Vec<Account>> {
        self.get_list(&format!("/api/companies/{company_id}/accounts"))
    }

    pub fn customers(&self, company_id: u64) -> Result<Vec<Customer>> {
        self.get_list(&format!("/api/customers/companies/{company_id}"))
    }

    pub fn suppliers(&self, company_id: u64) -> Result<Vec<Supplier>> {
        self.get_list(&format!("/api/suppliers/companies/{company_id}"))
    }

    pub fn next_sales_order_number(&self, company_id: u64) -> Result<String> {
        let next: NextSalesOrderNumber =
            self.get_object(&format!("/api/sales-orders/company/{company_id}/next-so-number"))?;
        Ok(next.so_number)
    }

    pub fn next_purchase_order_number(&self, company_id: u64) -> Result<String> {
        let next: NextPurchaseOrderNumber =
            self.get_object(&format!("/api/{company_id}/purchase-orders/next-po-number"))?;
        Ok(next.po_number)
    }

    /// Post an assembled document to its endpoint.
    pub fn submit_document(
        &self,
        company_id: u64,
        payload: &DocumentPayload,
    ) -> Result<serde_json::Value> {
        let path = payload.endpoint(company_id);
        info!(%path, lines = payload.line_amounts().len(), "submitting document");
        self.post_unit(&path, payload)
    }

    pub fn record_money_transaction(
        &self,
        company_id: u64,
        request: &MoneyTransactionRequest,
    ) -> Result<serde_json::Value> {
        request.validate()?;
        self.post_unit(
            &format!("/api/companies/{company_id}/money-transactions"),
            request,
        )
    }
}
