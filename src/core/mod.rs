pub mod aggregator;
pub mod extractor;
pub mod intake;
pub mod persistence;
pub mod session;

pub use crate::domain::model::{
    ActivityLevel, AggregateProfile, BiometricInput, Gender, IntakeRecommendation, MacroRange,
    NutrientProfile, NutrientQuery,
};
pub use crate::domain::ports::{ConfigProvider, FoodSource, Storage};
pub use crate::utils::error::Result;
