use super::{Transaction, TransactionKind, TransactionSchema};
use crate::attributes::Attribute;

/// Mobile-money network codes accepted by the gateway.
pub mod channels {
    pub const MTN: &str = "mtn-gh";
    pub const VODAFONE: &str = "vodafone-gh";
    pub const TIGO: &str = "tigo-gh";
    pub const AIRTEL: &str = "airtel-gh";

    pub const ALL: &[&str] = &[MTN, VODAFONE, TIGO, AIRTEL];
}

/// Debit a customer's mobile-money wallet into the merchant account.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileMoneyReceive;

impl TransactionKind for MobileMoneyReceive {
    const SCHEMA: TransactionSchema = TransactionSchema {
        name: "ReceiveMoney",
        route: "receive/mobilemoney",
        required: &[
            Attribute::CustomerName,
            Attribute::CustomerMsisdn,
            Attribute::Channel,
            Attribute::Amount,
            Attribute::PrimaryCallbackUrl,
            Attribute::Description,
        ],
        // Vodafone Cash debits need the customer's one-time voucher.
        channel_requirements: &[(channels::VODAFONE, Attribute::Token)],
    };
}

pub type ReceiveMoney = Transaction<MobileMoneyReceive>;
