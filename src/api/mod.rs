mod client;
mod resources;

pub use client::{normalize_list, normalize_object, server_message, ApiClient};
pub use resources::{
    Account, Customer, LoginResponse, MoneyTransactionRequest, PayeeType, PaymentMethod, Supplier,
    TransactionType, ROLE_APP_USER, ROLE_COMPANY, ROLE_SUPER_ADMIN,
};
