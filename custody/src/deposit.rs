//! Deposit-amount form: what the user typed, what that is in native units,
//! and whether the deposit may be submitted.

use async_trait::async_trait;
use tracing::info;

use crate::amount::{self, AmountError};
use crate::error::{CustodyError, Result};

pub const CONNECT_WALLET_TO_DEPOSIT: &str = "Connect your wallet to deposit";
pub const NO_TOKENS_TO_DEPOSIT: &str =
    "You don't have any governance tokens in your wallet to deposit.";

/// Why the deposit button is disabled, if it is.
pub fn deposit_unavailable_reason(connected: bool, balance: u64) -> Option<&'static str> {
    if !connected {
        Some(CONNECT_WALLET_TO_DEPOSIT)
    } else if balance == 0 {
        Some(NO_TOKENS_TO_DEPOSIT)
    } else {
        None
    }
}

/// Submits the governance-token deposit instruction.
#[async_trait]
pub trait DepositSubmitter: Send + Sync {
    /// Deposit `native_amount` smallest units; returns the transaction signature.
    async fn deposit(&self, native_amount: u64) -> Result<String>;
}

/// A reconciled deposit amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositQuantity {
    pub display_amount: String,
    pub native_amount: u64,
    pub decimals: u8,
    pub max_native: u64,
}

impl DepositQuantity {
    pub fn is_valid(&self) -> bool {
        amount::validate(self.native_amount, self.max_native)
    }
}

/// State of an open deposit dialog. Dropped on close or after submission.
#[derive(Debug, Clone)]
pub struct DepositForm {
    amount: String,
    decimals: u8,
    max_native: u64,
    max_display: Option<String>,
}

impl DepositForm {
    /// Open the form prefilled with the full wallet balance.
    pub fn open(max_native: u64, decimals: u8) -> Self {
        let max_display = amount::to_display(max_native, decimals).ok();
        let amount = match &max_display {
            Some(max) if max_native > 0 => max.clone(),
            _ => String::new(),
        };
        Self {
            amount,
            decimals,
            max_native,
            max_display,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn set_amount(&mut self, input: impl Into<String>) {
        self.amount = input.into();
    }

    /// The "Max" link.
    pub fn set_max(&mut self) {
        self.amount = self.max_display.clone().unwrap_or_default();
    }

    /// Shown when the input is empty; an empty input deposits everything.
    pub fn placeholder(&self) -> String {
        match &self.max_display {
            Some(max) => format!("{max} (max)"),
            None => "(max)".into(),
        }
    }

    pub fn quantity(&self) -> std::result::Result<DepositQuantity, AmountError> {
        let native_amount = amount::to_native(&self.amount, self.decimals, self.max_native)?;
        Ok(DepositQuantity {
            display_amount: self.amount.clone(),
            native_amount,
            decimals: self.decimals,
            max_native: self.max_native,
        })
    }

    /// Whether the confirm button is enabled.
    pub fn can_submit(&self) -> bool {
        self.quantity().map(|q| q.is_valid()).unwrap_or(false)
    }

    /// Submit the deposit once through `submitter`, consuming the form.
    pub async fn submit<S: DepositSubmitter + ?Sized>(self, submitter: &S) -> Result<String> {
        let quantity = self.quantity()?;
        if !quantity.is_valid() {
            return Err(CustodyError::Validation(format!(
                "deposit amount must be above zero and at most {}",
                self.max_display.as_deref().unwrap_or("the wallet balance")
            )));
        }
        info!(
            native_amount = quantity.native_amount,
            decimals = quantity.decimals,
            "submitting deposit"
        );
        submitter.deposit(quantity.native_amount).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl DepositSubmitter for RecordingSubmitter {
        async fn deposit(&self, native_amount: u64) -> Result<String> {
            self.calls.lock().unwrap().push(native_amount);
            Ok(format!("sig-{native_amount}"))
        }
    }

    #[test]
    fn test_unavailable_reason() {
        assert_eq!(
            deposit_unavailable_reason(false, 10),
            Some(CONNECT_WALLET_TO_DEPOSIT)
        );
        assert_eq!(
            deposit_unavailable_reason(true, 0),
            Some(NO_TOKENS_TO_DEPOSIT)
        );
        assert_eq!(deposit_unavailable_reason(true, 1), None);
    }

    #[test]
    fn test_open_prefills_max() {
        let form = DepositForm::open(1_500_000, 6);
        assert_eq!(form.amount(), "1.5");
        assert_eq!(form.placeholder(), "1.5 (max)");
        assert!(form.can_submit());
    }

    #[test]
    fn test_open_with_empty_balance() {
        let form = DepositForm::open(0, 6);
        assert_eq!(form.amount(), "");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_blank_input_deposits_everything() {
        let mut form = DepositForm::open(1_500_000, 6);
        form.set_amount("");
        let q = form.quantity().unwrap();
        assert_eq!(q.native_amount, 1_500_000);
        assert!(form.can_submit());
    }

    #[test]
    fn test_keystrokes_update_quantity() {
        let mut form = DepositForm::open(1_500_000, 6);
        form.set_amount("0.25");
        assert_eq!(form.quantity().unwrap().native_amount, 250_000);
        assert!(form.can_submit());

        form.set_amount("2");
        assert!(!form.can_submit(), "above balance");

        form.set_amount("0");
        assert!(!form.can_submit(), "zero");

        form.set_amount("abc");
        assert!(form.quantity().is_err());
        assert!(!form.can_submit());

        form.set_max();
        assert_eq!(form.amount(), "1.5");
    }

    #[tokio::test]
    async fn test_submit_sends_native_amount_once() {
        let submitter = RecordingSubmitter::default();
        let mut form = DepositForm::open(1_500_000, 6);
        form.set_amount("1.2");

        let sig = form.submit(&submitter).await.unwrap();
        assert_eq!(sig, "sig-1200000");
        assert_eq!(*submitter.calls.lock().unwrap(), vec![1_200_000]);
    }

    #[tokio::test]
    async fn test_submit_refuses_invalid_amount() {
        let submitter = RecordingSubmitter::default();
        let mut form = DepositForm::open(1_000, 2);
        form.set_amount("11");

        assert!(form.submit(&submitter).await.is_err());
        assert!(submitter.calls.lock().unwrap().is_empty());
    }
}
