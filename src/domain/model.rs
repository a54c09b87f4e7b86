use crate::utils::error::{NutriError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 單次查詢: 食物名稱 + 克數
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientQuery {
    pub food: String,
    pub quantity: f64,
}

impl NutrientQuery {
    pub fn new(food: impl Into<String>, quantity: f64) -> Result<Self> {
        let food = food.into();
        validate_non_empty_string("food", &food)?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(NutriError::validation(
                "quantity",
                "Quantity must be a positive number.",
            ));
        }
        Ok(Self {
            food: food.trim().to_string(),
            quantity,
        })
    }
}

/// First matching item returned by the food database, values per 100 g.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodRecord {
    pub description: Option<String>,
    pub nutrients: HashMap<u32, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub calories: f64,
    pub fiber: f64,
    pub quantity: f64,
    pub food_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateProfile {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub calories: f64,
    pub fiber: f64,
    pub quantity: f64,
    pub items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(NutriError::validation(
                "gender",
                format!("'{}' is not one of male/female", other),
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// 無法辨識的活動量一律視為 sedentary，不回傳錯誤
    pub fn parse_lenient(s: &str) -> Self {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "sedentary" | "low" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very active" | "high" => ActivityLevel::VeryActive,
            other => {
                tracing::debug!("Unknown activity level '{}', using sedentary", other);
                ActivityLevel::Sedentary
            }
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very active",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricInput {
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub gender: Gender,
    pub activity: ActivityLevel,
}

impl BiometricInput {
    pub fn new(
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        gender: Gender,
        activity: ActivityLevel,
    ) -> Result<Self> {
        if age == 0 {
            return Err(NutriError::validation("age", "Age must be a positive number."));
        }
        for (field, value) in [("weight", weight_kg), ("height", height_cm)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(NutriError::validation(
                    field,
                    format!("{} must be a positive number.", field),
                ));
            }
        }
        Ok(Self {
            age,
            weight_kg,
            height_cm,
            gender,
            activity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRange {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecommendation {
    pub bmr: f64,
    pub calories: f64,
    pub carbs: MacroRange,
    pub protein: MacroRange,
    pub fat: MacroRange,
}
