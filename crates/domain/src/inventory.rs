//! Inventory value types and stock rules.

use std::str::FromStr;

use clinova_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryItemId(Uuid);

impl InventoryItemId {
    /// Creates a new random item identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an item identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InventoryItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InventoryItemId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Measurement units an inventory quantity can be counted in.
///
/// Closed set; item rows store the value returned by
/// [`MeasurementUnit::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    /// Individual pieces.
    Piece,
    /// Boxes of a packaged product.
    Box,
    /// Bottles of a liquid product.
    Bottle,
    /// Multi-item packs.
    Pack,
    /// Injection vials.
    Vial,
    /// Single-dose ampoules.
    Ampoule,
    /// Individual tablets.
    Tablet,
    /// Milliliters of a bulk liquid.
    Milliliter,
    /// Milligrams of a bulk substance.
    Milligram,
}

impl MeasurementUnit {
    /// Returns the stable storage value for this unit.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Piece => "piece",
            Self::Box => "box",
            Self::Bottle => "bottle",
            Self::Pack => "pack",
            Self::Vial => "vial",
            Self::Ampoule => "ampoule",
            Self::Tablet => "tablet",
            Self::Milliliter => "milliliter",
            Self::Milligram => "milligram",
        }
    }

    /// Returns all known units.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[MeasurementUnit] = &[
            MeasurementUnit::Piece,
            MeasurementUnit::Box,
            MeasurementUnit::Bottle,
            MeasurementUnit::Pack,
            MeasurementUnit::Vial,
            MeasurementUnit::Ampoule,
            MeasurementUnit::Tablet,
            MeasurementUnit::Milliliter,
            MeasurementUnit::Milligram,
        ];

        ALL
    }
}

impl FromStr for MeasurementUnit {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "piece" => Ok(Self::Piece),
            "box" => Ok(Self::Box),
            "bottle" => Ok(Self::Bottle),
            "pack" => Ok(Self::Pack),
            "vial" => Ok(Self::Vial),
            "ampoule" => Ok(Self::Ampoule),
            "tablet" => Ok(Self::Tablet),
            "milliliter" => Ok(Self::Milliliter),
            "milligram" => Ok(Self::Milligram),
            _ => Err(AppError::Validation(format!(
                "unknown measurement unit '{value}'"
            ))),
        }
    }
}

/// Returns whether a stock level should raise the low-stock alert.
///
/// An item is low exactly when the on-hand quantity has reached its
/// configured minimum.
#[must_use]
pub fn is_low_stock(quantity: i32, minimum_quantity: i32) -> bool {
    quantity <= minimum_quantity
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{MeasurementUnit, is_low_stock};

    #[test]
    fn unit_roundtrip_storage_value() {
        for unit in MeasurementUnit::all() {
            let restored = MeasurementUnit::from_str(unit.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(MeasurementUnit::Piece), *unit);
        }
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(MeasurementUnit::from_str("dozen").is_err());
    }

    #[test]
    fn stock_at_minimum_is_low() {
        assert!(is_low_stock(5, 5));
    }

    #[test]
    fn stock_below_minimum_is_low() {
        assert!(is_low_stock(0, 5));
    }

    #[test]
    fn stock_above_minimum_is_not_low() {
        assert!(!is_low_stock(6, 5));
    }
}
