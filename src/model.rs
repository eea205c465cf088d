//! Wire types shared with the prediction backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownOption;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParentalEducation {
    None,
    Primary,
    HighSchool,
    #[default]
    College,
    Bachelor,
    Master,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Extracurricular {
    #[default]
    Yes,
    No,
}

impl Gender {
    pub const VALUES: &'static [&'static str] = &["male", "female"];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl ParentalEducation {
    pub const VALUES: &'static [&'static str] =
        &["none", "primary", "high_school", "college", "bachelor", "master"];

    pub fn as_str(self) -> &'static str {
        match self {
            ParentalEducation::None => "none",
            ParentalEducation::Primary => "primary",
            ParentalEducation::HighSchool => "high_school",
            ParentalEducation::College => "college",
            ParentalEducation::Bachelor => "bachelor",
            ParentalEducation::Master => "master",
        }
    }
}

impl Extracurricular {
    pub const VALUES: &'static [&'static str] = &["yes", "no"];

    pub fn as_str(self) -> &'static str {
        match self {
            Extracurricular::Yes => "yes",
            Extracurricular::No => "no",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParentalEducation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Extracurricular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

impl FromStr for ParentalEducation {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "high school" is what older form builds sent
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "none" => Ok(ParentalEducation::None),
            "primary" => Ok(ParentalEducation::Primary),
            "high_school" => Ok(ParentalEducation::HighSchool),
            "college" => Ok(ParentalEducation::College),
            "bachelor" => Ok(ParentalEducation::Bachelor),
            "master" => Ok(ParentalEducation::Master),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

impl FromStr for Extracurricular {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Extracurricular::Yes),
            "no" => Ok(Extracurricular::No),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Request body for `POST /predict`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StudentProfile {
    pub age: u32,
    pub gender: Gender,
    pub study_time_hours: f64,
    pub absences: u32,
    pub parental_education: ParentalEducation,
    pub previous_grade: f64,
    pub extracurricular: Extracurricular,
    pub sleep_hours: f64,
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            age: 18,
            gender: Gender::Male,
            study_time_hours: 3.0,
            absences: 5,
            parental_education: ParentalEducation::College,
            previous_grade: 75.0,
            extracurricular: Extracurricular::Yes,
            sleep_hours: 7.0,
        }
    }
}

/// The `metrics` object of `GET /model-info`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ModelMetrics {
    pub model_name: String,
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    pub training_samples: u64,
    pub test_samples: u64,
}

impl ModelMetrics {
    pub fn total_samples(&self) -> u64 {
        self.training_samples.saturating_add(self.test_samples)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelInfoResponse {
    pub metrics: ModelMetrics,
}

/// Response body of a successful `POST /predict`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_grade: f64,
    pub performance_level: String,
    pub confidence_score: f64,
    pub model_used: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
