use serde::{Deserialize, Serialize};

/// A catalog entry: one serving unit of a dish and its calories.
///
/// Names are display labels and need not be unique; identity is the full
/// (name, calories, unit) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,

    #[serde(rename = "caloriesPerUnit", alias = "calories")]
    pub calories_per_unit: f64,

    pub unit: String,
}

impl Dish {
    pub fn new(name: impl Into<String>, calories_per_unit: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calories_per_unit,
            unit: unit.into(),
        }
    }

    /// Calories for `quantity` units.
    #[inline]
    pub fn calories_for(&self, quantity: u32) -> f64 {
        self.calories_per_unit * quantity as f64
    }

    /// Basic validation: a name, a unit, and positive finite calories.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.unit.trim().is_empty()
            && self.calories_per_unit.is_finite()
            && self.calories_per_unit > 0.0
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!("{}: {} cal per {}", self.name, self.calories_per_unit, self.unit)
    }

    pub(crate) fn identity(&self) -> (String, u64, String) {
        (self.name.clone(), self.calories_per_unit.to_bits(), self.unit.clone())
    }
}

impl PartialEq for Dish {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.unit == other.unit
            && self.calories_per_unit.to_bits() == other.calories_per_unit.to_bits()
    }
}

impl Eq for Dish {}

impl std::hash::Hash for Dish {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.calories_per_unit.to_bits().hash(state);
        self.unit.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calories_for() {
        let idli = Dish::new("Idli", 120.0, "piece");
        assert!((idli.calories_for(2) - 240.0).abs() < 0.001);
    }

    #[test]
    fn test_is_valid() {
        assert!(Dish::new("Idli", 120.0, "piece").is_valid());
        assert!(!Dish::new("", 120.0, "piece").is_valid());
        assert!(!Dish::new("Idli", 0.0, "piece").is_valid());
        assert!(!Dish::new("Idli", f64::NAN, "piece").is_valid());
        assert!(!Dish::new("Idli", 120.0, " ").is_valid());
    }

    #[test]
    fn test_identity_covers_all_fields() {
        let a = Dish::new("Dosa", 150.0, "piece");
        assert_eq!(a, Dish::new("Dosa", 150.0, "piece"));
        assert_ne!(a, Dish::new("Dosa", 150.0, "plate"));
        assert_ne!(a, Dish::new("Dosa", 160.0, "piece"));
    }

    #[test]
    fn test_deserialize_accepts_both_calorie_names() {
        let short: Dish = serde_json::from_str(r#"{"name":"Poha","calories":250,"unit":"plate"}"#).unwrap();
        let long: Dish =
            serde_json::from_str(r#"{"name":"Poha","caloriesPerUnit":250,"unit":"plate"}"#).unwrap();
        assert_eq!(short, long);

        let json = serde_json::to_value(&short).unwrap();
        assert_eq!(json["caloriesPerUnit"], 250.0);
    }
}
