use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};
use crate::models::Dish;

/// One dish at an integer quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portion {
    #[serde(flatten)]
    pub dish: Dish,

    pub quantity: u32,
}

impl Portion {
    pub fn new(dish: Dish, quantity: u32) -> Self {
        Self { dish, quantity }
    }

    #[inline]
    pub fn calories(&self) -> f64 {
        self.dish.calories_for(self.quantity)
    }
}

/// Order-insensitive structural identity of a [`Combination`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombinationKey(Vec<((String, u64, String), u32)>);

/// An ordered list of one or two portions of distinct dishes.
///
/// Two combinations are equal when they hold the same dishes at the same
/// quantities, regardless of order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Portion>", into = "Vec<Portion>")]
pub struct Combination {
    portions: Vec<Portion>,
}

impl Combination {
    /// Maximum number of distinct dishes in one combination.
    pub const MAX_DISHES: usize = 2;

    /// Build a combination, checking the size, quantity and identity rules.
    pub fn new(portions: Vec<Portion>) -> Result<Self> {
        if portions.is_empty() || portions.len() > Self::MAX_DISHES {
            return Err(MealError::InvalidInput(format!(
                "a combination holds 1 to {} dishes, got {}",
                Self::MAX_DISHES,
                portions.len()
            )));
        }
        if let Some(p) = portions.iter().find(|p| p.quantity == 0) {
            return Err(MealError::InvalidQuantity(p.quantity));
        }
        if portions.len() == 2 && portions[0].dish == portions[1].dish {
            return Err(MealError::InvalidInput(format!(
                "{} appears twice in one combination",
                portions[0].dish.name
            )));
        }
        Ok(Self { portions })
    }

    pub(crate) fn single(dish: &Dish, quantity: u32) -> Self {
        debug_assert!(quantity >= 1);
        Self {
            portions: vec![Portion::new(dish.clone(), quantity)],
        }
    }

    pub(crate) fn pair(first: &Dish, first_qty: u32, second: &Dish, second_qty: u32) -> Self {
        debug_assert!(first_qty >= 1 && second_qty >= 1);
        debug_assert!(first != second);
        Self {
            portions: vec![
                Portion::new(first.clone(), first_qty),
                Portion::new(second.clone(), second_qty),
            ],
        }
    }

    pub fn portions(&self) -> &[Portion] {
        &self.portions
    }

    /// Sum of calories over all portions.
    pub fn total_calories(&self) -> f64 {
        self.portions.iter().map(Portion::calories).sum()
    }

    pub fn len(&self) -> usize {
        self.portions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portions.is_empty()
    }

    pub fn key(&self) -> CombinationKey {
        let mut entries: Vec<_> = self
            .portions
            .iter()
            .map(|p| (p.dish.identity(), p.quantity))
            .collect();
        entries.sort();
        CombinationKey(entries)
    }
}

impl TryFrom<Vec<Portion>> for Combination {
    type Error = MealError;

    fn try_from(portions: Vec<Portion>) -> Result<Self> {
        Self::new(portions)
    }
}

impl From<Combination> for Vec<Portion> {
    fn from(combo: Combination) -> Self {
        combo.portions
    }
}

impl PartialEq for Combination {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Combination {}

impl std::hash::Hash for Combination {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
