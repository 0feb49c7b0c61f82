//! Service Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a service is performed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// At the shop
    #[default]
    Onsite,
    /// At the customer's address
    Offsite,
    /// Either
    Both,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onsite => "onsite",
            Self::Offsite => "offsite",
            Self::Both => "both",
        }
    }

    /// Whether a service of this type can take a booking that asks for `requested`.
    ///
    /// Only the two fixed types reject, and only each other.
    pub fn accepts(&self, requested: ServiceType) -> bool {
        !matches!(
            (self, requested),
            (Self::Onsite, Self::Offsite) | (Self::Offsite, Self::Onsite)
        )
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onsite" => Ok(Self::Onsite),
            "offsite" => Ok(Self::Offsite),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown service type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Unavailable,
}

/// Opening hours for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub day: String,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default)]
    pub is_closed: bool,
}

/// Sellable offering published by a shop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub shop_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in VND
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Duration in minutes
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub working_hours: Vec<WorkingHours>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl Service {
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}
