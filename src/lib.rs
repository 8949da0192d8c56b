pub mod attributes;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mass_assign;
pub mod pay;
pub mod transaction;
pub mod validation;

pub use attributes::{Attribute, AttributeStore};
pub use config::Config;
pub use error::{GatewayError, PaymentError, Result};
pub use gateway::{GatewayRequest, GatewayResponse, HttpExecutor, ReqwestExecutor, TransportError};
pub use pay::Pay;
pub use transaction::{channels, MobileMoneyReceive, ReceiveMoney, Transaction, TransactionKind, TransactionSchema};

/// Product name sent in the `User-Agent` header.
pub const CLIENT: &str = "hubtel-payment";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `<product> v<version>`
pub fn user_agent() -> String {
    format!("{} v{}", CLIENT, VERSION)
}
