use serde::{Deserialize, Serialize};

use shopforge_core::ValueObject;

/// Mass units accepted on variant input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    G,
    Kg,
    Lb,
    Oz,
    Tonne,
}

impl WeightUnit {
    /// Grams per one unit.
    pub fn grams_per_unit(self) -> f64 {
        match self {
            WeightUnit::G => 1.0,
            WeightUnit::Kg => 1_000.0,
            WeightUnit::Lb => 453.592_37,
            WeightUnit::Oz => 28.349_523_125,
            WeightUnit::Tonne => 1_000_000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::G => "g",
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
            WeightUnit::Oz => "oz",
            WeightUnit::Tonne => "tonne",
        }
    }
}

impl core::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical weight, keeping the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(value: f64, unit: WeightUnit) -> Self {
        Self { value, unit }
    }

    /// Magnitude in grams, for unit-independent comparisons.
    pub fn grams(&self) -> f64 {
        self.value * self.unit.grams_per_unit()
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0.0
    }
}

impl ValueObject for Weight {}

impl core::fmt::Display for Weight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_grams_per_unit() {
        assert_eq!(Weight::new(2.0, WeightUnit::G).grams(), 2.0);
        assert_eq!(Weight::new(1.5, WeightUnit::Kg).grams(), 1_500.0);
        assert_eq!(Weight::new(1.0, WeightUnit::Lb).grams(), 453.592_37);
        assert_eq!(Weight::new(2.0, WeightUnit::Oz).grams(), 56.699_046_25);
        assert_eq!(Weight::new(0.5, WeightUnit::Tonne).grams(), 500_000.0);
    }

    #[test]
    fn negative_detection_only_looks_at_value() {
        assert!(Weight::new(-0.1, WeightUnit::G).is_negative());
        assert!(Weight::new(-1.0, WeightUnit::Tonne).is_negative());
        assert!(!Weight::new(0.0, WeightUnit::Kg).is_negative());
        assert!(!Weight::new(10.0, WeightUnit::Oz).is_negative());
    }

    #[test]
    fn unit_serializes_lowercase() {
        let weight = Weight::new(1.2, WeightUnit::Kg);
        let json = serde_json::to_string(&weight).unwrap();
        assert_eq!(json, r#"{"value":1.2,"unit":"kg"}"#);
        let back: Weight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weight);
    }
}
