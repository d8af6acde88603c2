use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Unit {
    #[default]
    Gram,
    Millilitre,
    Piece,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Millilitre => "ml",
            Unit::Piece => "pc",
        }
    }

    /// Nutrition values are given per 100 g/ml, or per piece.
    pub fn nutrition_factor(&self, quantity: f64) -> f64 {
        match self {
            Unit::Gram | Unit::Millilitre => quantity / 100.0,
            Unit::Piece => quantity,
        }
    }

    pub fn format(&self, quantity: f64) -> String {
        let quantity = round_decimals(quantity);

        match self {
            Unit::Gram if quantity >= 1000.0 => format!("{} kg", trim_decimals(quantity / 1000.0)),
            Unit::Gram => format!("{} g", trim_decimals(quantity)),
            Unit::Millilitre if quantity >= 1000.0 => {
                format!("{} L", trim_decimals(quantity / 1000.0))
            }
            Unit::Millilitre => format!("{} ml", trim_decimals(quantity)),
            Unit::Piece => trim_decimals(quantity),
        }
    }
}

fn round_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn trim_decimals(value: f64) -> String {
    let rounded = round_decimals(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_owned()
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum IngredientCategory {
    /// Fresh fruits, vegetables and herbs
    FruitsAndVegetables,
    /// Red meat, poultry, ground meat
    Butcher,
    /// Fresh fish and seafood
    Seafood,
    /// Milk, butter, cream, yogurt, eggs
    DairyAndEggs,
    /// Bread and pastries
    Bakery,
    /// Canned goods, pasta, rice, sauces, oils, spices
    #[default]
    Grocery,
    Frozen,
    Beverages,
    Other,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl Nutrition {
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbohydrates: self.carbohydrates * factor,
            fat: self.fat * factor,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbohydrates, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbohydrates: self.carbohydrates + rhs.carbohydrates,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::default(), |acc, n| acc + n)
    }
}
