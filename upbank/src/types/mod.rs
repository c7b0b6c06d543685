pub mod account;
pub mod money;
pub mod page;
pub mod transaction;

pub use account::{Account, AccountAttributes};
pub use money::{Balance, HoldInfo};
pub use page::{Page, PageLinks, Resource};
pub use transaction::{
    CardPurchaseMethod, Cashback, Customer, Note, RoundUp, Transaction, TransactionAttributes,
    TransactionStatus,
};
