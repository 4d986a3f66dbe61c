//! Splitting an annual liability into periodic payments.
//!
//! No rounding happens here; a monthly amount may carry many decimal places.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Money;

pub fn monthly_installment(annual_tax: Money) -> Money {
    annual_tax / 12
}

pub fn quarterly_installment(annual_tax: Money) -> Money {
    annual_tax / 4
}

/// How an annual liability is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPlan {
    #[default]
    Monthly,
    Quarterly,
    /// A single one-time payment.
    #[serde(alias = "one-time")]
    Annual,
}

impl PaymentPlan {
    pub fn all() -> &'static [PaymentPlan] {
        &[PaymentPlan::Monthly, PaymentPlan::Quarterly, PaymentPlan::Annual]
    }

    pub fn payments_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }

    pub fn installment(
        &self,
        annual_tax: Money,
    ) -> Money {
        match self {
            Self::Monthly => monthly_installment(annual_tax),
            Self::Quarterly => quarterly_installment(annual_tax),
            Self::Annual => annual_tax,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    /// Case-insensitive; `"one-time"` is accepted for `Annual`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "annual" | "one-time" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
