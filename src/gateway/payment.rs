//! Payment capability consumed at checkout.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome reported by a payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum SettlementOutcome {
    /// Amount collected.
    Approved,
    /// Amount not collected, with the collaborator's reason.
    Declined(String),
}

impl SettlementOutcome {
    /// Whether the payment went through.
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// External payment gateway.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use lotkeeper::gateway::{PaymentGateway, SettlementOutcome};
/// use rust_decimal::Decimal;
///
/// struct CardTerminal;
///
/// #[async_trait]
/// impl PaymentGateway for CardTerminal {
///     async fn settle(&self, amount: Decimal) -> SettlementOutcome {
///         // talk to the acquirer...
///         SettlementOutcome::Approved
///     }
/// }
/// ```
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Collect `amount`.
    async fn settle(&self, amount: Decimal) -> SettlementOutcome;
}

/// Payment gateway that approves every amount.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproveAll;

#[async_trait]
impl PaymentGateway for ApproveAll {
    async fn settle(&self, _amount: Decimal) -> SettlementOutcome {
        SettlementOutcome::Approved
    }
}
