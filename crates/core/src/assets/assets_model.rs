//! Asset domain models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

/// Broad class of a holding, as picked in the asset form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    #[default]
    Stocks,
    Bonds,
    Etf,
    RealEstate,
    Commodities,
    Crypto,
    Cash,
    Other,
}

impl AssetType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stocks => "stocks",
            AssetType::Bonds => "bonds",
            AssetType::Etf => "etf",
            AssetType::RealEstate => "real_estate",
            AssetType::Commodities => "commodities",
            AssetType::Crypto => "crypto",
            AssetType::Cash => "cash",
            AssetType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    /// Position of the level on the 1-5 strategy risk scale.
    pub fn score(&self) -> Decimal {
        match self {
            RiskLevel::Low => dec!(1),
            RiskLevel::Medium => dec!(3),
            RiskLevel::High => dec!(5),
        }
    }
}

/// How often a recurring contribution (PAC) is paid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PacFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PacFrequency {
    /// Number of months covered by one payment.
    pub fn months_per_period(&self) -> Decimal {
        match self {
            PacFrequency::Monthly => Decimal::ONE,
            PacFrequency::Quarterly => dec!(3),
            PacFrequency::Yearly => dec!(12),
        }
    }

    /// Converts one periodic payment into its monthly equivalent.
    pub fn to_monthly(&self, amount: Decimal) -> Decimal {
        amount / self.months_per_period()
    }
}

/// Domain model representing one holding.
///
/// Assets are read-only to the planner core: every calculation derives new
/// values from them and never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub current_value: Decimal,
    /// Annual return in percent
    pub expected_return: Decimal,
    pub risk_level: RiskLevel,
    #[serde(rename = "isPAC", default)]
    pub is_pac: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pac_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pac_frequency: Option<PacFrequency>,
}

impl Asset {
    /// Monthly equivalent of the asset's recurring contribution.
    ///
    /// Zero unless the PAC flag is set. A missing frequency is read as monthly.
    pub fn monthly_contribution(&self) -> Decimal {
        if !self.is_pac {
            return Decimal::ZERO;
        }
        let amount = self.pac_amount.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
        self.pac_frequency.unwrap_or_default().to_monthly(amount)
    }
}

/// Input model for creating a new asset from the asset form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub asset_type: AssetType,
    pub current_value: Decimal,
    #[serde(default)]
    pub expected_return: Decimal,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(rename = "isPAC", default)]
    pub is_pac: bool,
    pub pac_amount: Option<Decimal>,
    pub pac_frequency: Option<PacFrequency>,
}

impl NewAsset {
    /// Validates the new asset data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.current_value < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "currentValue".to_string(),
                value: self.current_value.to_string(),
            }
            .into());
        }
        if self.is_pac {
            match self.pac_amount {
                None => {
                    return Err(ValidationError::MissingField("pacAmount".to_string()).into());
                }
                Some(amount) if amount < Decimal::ZERO => {
                    return Err(ValidationError::NegativeAmount {
                        field: "pacAmount".to_string(),
                        value: amount.to_string(),
                    }
                    .into());
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Validates the input and builds the asset, generating an id if needed.
    ///
    /// Contribution fields are dropped when the PAC flag is off.
    pub fn into_asset(self) -> Result<Asset> {
        self.validate()?;

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let (pac_amount, pac_frequency) = if self.is_pac {
            (
                self.pac_amount,
                Some(self.pac_frequency.unwrap_or_default()),
            )
        } else {
            (None, None)
        };

        Ok(Asset {
            id,
            name: self.name.trim().to_string(),
            asset_type: self.asset_type,
            current_value: self.current_value,
            expected_return: self.expected_return,
            risk_level: self.risk_level,
            is_pac: self.is_pac,
            pac_amount,
            pac_frequency,
        })
    }
}
