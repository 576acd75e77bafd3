//! Runner profile - the complete record a prediction is made from

use crate::row::{Cell, PredictionRow, AGE_COLUMN, PACE_COLUMN, SEX_COLUMN};
use std::fmt;

/// Sex of the runner
///
/// The regression artifact and the extraction prompt both use the Polish
/// single-letter codes: `M` (mężczyzna) and `K` (kobieta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male, coded `M`
    Male,

    /// Female, coded `K`
    Female,
}

impl Sex {
    /// Get the single-letter wire code
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "K",
        }
    }

    /// Parse a wire code
    ///
    /// Only the exact codes are accepted. Lowercase letters, full words and the
    /// English `F` are rejected rather than guessed at.
    ///
    /// # Examples
    ///
    /// ```
    /// use pacer_domain::Sex;
    ///
    /// assert_eq!(Sex::from_code("M"), Some(Sex::Male));
    /// assert_eq!(Sex::from_code("K"), Some(Sex::Female));
    /// assert_eq!(Sex::from_code("F"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Sex::Male),
            "K" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// A complete runner description
///
/// Every field is present and truthy: age and pace are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerProfile {
    /// Sex of the runner
    pub sex: Sex,

    /// Age in years
    pub age: u32,

    /// Average 5 km pace in minutes per kilometre
    pub pace_per_km: f64,
}

impl RunnerProfile {
    /// Build a profile from optional parts, all or nothing
    ///
    /// Returns `None` when any part is missing or falsy. An age of `0` and a
    /// pace of `0.0` count as missing, the same way an empty answer does.
    ///
    /// # Examples
    ///
    /// ```
    /// use pacer_domain::{RunnerProfile, Sex};
    ///
    /// let profile = RunnerProfile::from_parts(Some(Sex::Male), Some(37), Some(5.23));
    /// assert!(profile.is_some());
    ///
    /// assert!(RunnerProfile::from_parts(Some(Sex::Male), Some(0), Some(5.23)).is_none());
    /// assert!(RunnerProfile::from_parts(None, Some(37), Some(5.23)).is_none());
    /// ```
    pub fn from_parts(sex: Option<Sex>, age: Option<u32>, pace_per_km: Option<f64>) -> Option<Self> {
        let sex = sex?;
        let age = age.filter(|a| *a > 0)?;
        let pace_per_km = pace_per_km.filter(|p| p.is_finite() && *p > 0.0)?;

        Some(Self {
            sex,
            age,
            pace_per_km,
        })
    }

    /// Convert into the single-row record the regression artifact expects
    pub fn to_row(&self) -> PredictionRow {
        let mut row = PredictionRow::new();
        row.push(SEX_COLUMN, Cell::Text(self.sex.code().to_string()));
        row.push(AGE_COLUMN, Cell::Integer(i64::from(self.age)));
        row.push(PACE_COLUMN, Cell::Number(self.pace_per_km));
        row
    }
}
