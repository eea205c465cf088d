//! Form input collector.
//!
//! Holds the eight raw predictor fields, enforces the input-level
//! constraints (min/max/step/choice) at the boundary where values are typed
//! in, and coerces the raw strings into a [`StudentProfile`] on submit.

use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::controller::{Controller, SubmitOutcome};
use crate::gateway::PredictionGateway;
use crate::model::{Extracurricular, Gender, ParentalEducation, StudentProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Age,
    Gender,
    StudyTimeHours,
    Absences,
    ParentalEducation,
    PreviousGrade,
    Extracurricular,
    SleepHours,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Age,
        FormField::Gender,
        FormField::StudyTimeHours,
        FormField::Absences,
        FormField::ParentalEducation,
        FormField::PreviousGrade,
        FormField::Extracurricular,
        FormField::SleepHours,
    ];

    /// Field name as sent to the backend.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Age => "age",
            FormField::Gender => "gender",
            FormField::StudyTimeHours => "study_time_hours",
            FormField::Absences => "absences",
            FormField::ParentalEducation => "parental_education",
            FormField::PreviousGrade => "previous_grade",
            FormField::Extracurricular => "extracurricular",
            FormField::SleepHours => "sleep_hours",
        }
    }

    pub fn constraint(self) -> InputConstraint {
        match self {
            FormField::Age => InputConstraint::Integer { min: 15, max: 25 },
            FormField::Gender => InputConstraint::Choice(Gender::VALUES),
            FormField::StudyTimeHours => InputConstraint::Real {
                min: 0.0,
                max: 12.0,
                step: 0.5,
            },
            FormField::Absences => InputConstraint::Integer { min: 0, max: 50 },
            FormField::ParentalEducation => InputConstraint::Choice(ParentalEducation::VALUES),
            FormField::PreviousGrade => InputConstraint::Real {
                min: 0.0,
                max: 100.0,
                step: 0.1,
            },
            FormField::Extracurricular => InputConstraint::Choice(Extracurricular::VALUES),
            FormField::SleepHours => InputConstraint::Real {
                min: 3.0,
                max: 12.0,
                step: 0.5,
            },
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Native input constraints of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputConstraint {
    Integer { min: i64, max: i64 },
    /// Accepted values are `min + k * step` within `[min, max]`
    Real { min: f64, max: f64, step: f64 },
    Choice(&'static [&'static str]),
}

impl InputConstraint {
    /// Checks a raw value the way a number input or select would before
    /// letting it through. Required: empty input is rejected.
    pub fn check(&self, raw: &str) -> Result<(), String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("a value is required".to_string());
        }

        match *self {
            InputConstraint::Integer { min, max } => {
                let value =
                    parse_whole(raw).ok_or_else(|| format!("`{raw}` is not a whole number"))?;
                if value < min || value > max {
                    return Err(format!("must be between {min} and {max}"));
                }
            }
            InputConstraint::Real { min, max, step } => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| format!("`{raw}` is not a number"))?;
                if !value.is_finite() || value < min || value > max {
                    return Err(format!("must be between {min} and {max}"));
                }
                let steps = (value - min) / step;
                if (steps - steps.round()).abs() > 1e-6 {
                    return Err(format!("must be a multiple of {step}"));
                }
            }
            InputConstraint::Choice(options) => {
                if !options.iter().any(|option| option.eq_ignore_ascii_case(raw)) {
                    return Err(format!("must be one of: {}", options.join(", ")));
                }
            }
        }
        Ok(())
    }
}

/// Whole-number parse shared by the input check and coercion, so both
/// agree on spellings like `-0` or `+7`.
fn parse_whole(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Raw, editable form state. Always fully populated: an unedited form holds
/// the defaults of [`StudentProfile::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    values: [String; 8],
}

impl Default for FormFields {
    fn default() -> Self {
        Self::from_profile(&StudentProfile::default())
    }
}

impl FormFields {
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            values: [
                profile.age.to_string(),
                profile.gender.as_str().to_string(),
                profile.study_time_hours.to_string(),
                profile.absences.to_string(),
                profile.parental_education.as_str().to_string(),
                profile.previous_grade.to_string(),
                profile.extracurricular.as_str().to_string(),
                profile.sleep_hours.to_string(),
            ],
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Coerces every raw value to its semantic type. Values the input
    /// boundary should have rejected fall back to the field default.
    pub fn to_profile(&self) -> StudentProfile {
        let defaults = StudentProfile::default();
        StudentProfile {
            age: self.coerce_whole(FormField::Age, defaults.age),
            gender: self.coerce(FormField::Gender, defaults.gender),
            study_time_hours: self.coerce(FormField::StudyTimeHours, defaults.study_time_hours),
            absences: self.coerce_whole(FormField::Absences, defaults.absences),
            parental_education: self
                .coerce(FormField::ParentalEducation, defaults.parental_education),
            previous_grade: self.coerce(FormField::PreviousGrade, defaults.previous_grade),
            extracurricular: self.coerce(FormField::Extracurricular, defaults.extracurricular),
            sleep_hours: self.coerce(FormField::SleepHours, defaults.sleep_hours),
        }
    }

    fn coerce_whole(&self, field: FormField, fallback: u32) -> u32 {
        let raw = self.get(field).trim();
        match parse_whole(raw).and_then(|value| u32::try_from(value).ok()) {
            Some(value) => value,
            None => {
                warn!(field = field.name(), raw, %fallback, "could not coerce form value, using default");
                fallback
            }
        }
    }

    fn coerce<T>(&self, field: FormField, fallback: T) -> T
    where
        T: FromStr + Display,
    {
        let raw = self.get(field).trim();
        match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(field = field.name(), raw, %fallback, "could not coerce form value, using default");
                fallback
            }
        }
    }
}

/// Collects form state and forwards it to the controller on submit.
#[derive(Debug, Clone, Default)]
pub struct FormCollector {
    fields: FormFields,
}

impl FormCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Edits stay possible while submission is disabled.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Builds a profile and hands it to the controller. Suppressed entirely,
    /// with no payload built, while the controller is disabled or loading.
    pub async fn submit<G: PredictionGateway>(&self, controller: &Controller<G>) -> SubmitOutcome {
        if controller.is_disabled() {
            debug!("submit suppressed, backend not online");
            return SubmitOutcome::Disabled;
        }
        if controller.is_loading() {
            debug!("submit suppressed, prediction in flight");
            return SubmitOutcome::AlreadyLoading;
        }

        let profile = self.fields.to_profile();
        controller.submit(profile).await
    }
}
