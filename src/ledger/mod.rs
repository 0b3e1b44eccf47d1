mod amount;
mod balance;
mod lines;
mod totals;

pub use amount::{
    format_money, line_amount, parse_amount, parse_decimal, round_money, sum_money,
};
pub use balance::BalanceCheck;
pub use lines::{EntryMode, Field, LineItem, LineItems, Side};
pub use totals::{Adjustments, Totals};
