//! Industries, experience levels and the keys that identify a model.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::{ForecastError, Result};

/// Industries with a trained model per experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Manufacturing,
    Retail,
    Energy,
    Entertainment,
    Telecommunications,
    Transportation,
}

impl Industry {
    pub const ALL: [Industry; 10] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Manufacturing,
        Industry::Retail,
        Industry::Energy,
        Industry::Entertainment,
        Industry::Telecommunications,
        Industry::Transportation,
    ];

    /// Canonical name used in model artifact names.
    pub fn model_name(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Manufacturing => "Manufacturing",
            Industry::Retail => "Retail",
            Industry::Energy => "Energy",
            Industry::Entertainment => "Entertainment",
            Industry::Telecommunications => "Telecommunications",
            Industry::Transportation => "Transportation",
        }
    }

    /// Parse a front-end key (`"technology"`) or a canonical name.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|industry| industry.model_name().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

/// Experience levels with a trained model per industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Expert,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Expert,
    ];

    /// Front-end request key.
    pub fn request_key(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Expert => "expert",
        }
    }

    /// Canonical name used in model artifact names.
    pub fn model_name(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry-level",
            ExperienceLevel::Mid => "Mid-level",
            ExperienceLevel::Senior => "Senior-level",
            ExperienceLevel::Expert => "Executive",
        }
    }

    /// Parse a front-end key (`"entry"`) or a canonical name (`"Entry-level"`).
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|level| {
            level.request_key().eq_ignore_ascii_case(key)
                || level.model_name().eq_ignore_ascii_case(key)
        })
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

/// Identifies the model for one (industry, experience) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModelKey {
    pub industry: String,
    pub experience: String,
}

impl ModelKey {
    /// Use the names exactly as given.
    pub fn new(industry: impl Into<String>, experience: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            experience: experience.into(),
        }
    }

    /// Map front-end request keys to canonical names.
    ///
    /// Unknown industries fall back to Technology and unknown experience
    /// levels to Mid-level.
    pub fn from_request(industry: &str, experience: &str) -> Self {
        let mapped_industry = Industry::parse(industry).unwrap_or_else(|| {
            warn!(industry, "unknown industry, falling back to Technology");
            Industry::Technology
        });
        let mapped_experience = ExperienceLevel::parse(experience).unwrap_or_else(|| {
            warn!(experience, "unknown experience level, falling back to Mid-level");
            ExperienceLevel::Mid
        });
        Self::new(mapped_industry.model_name(), mapped_experience.model_name())
    }

    /// Check that both names can be embedded in an artifact file name.
    ///
    /// Empty names and names containing path separators are rejected.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.industry, &self.experience] {
            if name.is_empty() || name.contains(['/', '\\', '\0']) {
                return Err(ForecastError::InvalidParameter(format!(
                    "invalid model key component {name:?}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.industry, self.experience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_keys_map_to_model_names() {
        let key = ModelKey::from_request("healthcare", "entry");
        assert_eq!(key, ModelKey::new("Healthcare", "Entry-level"));

        let key = ModelKey::from_request("telecommunications", "expert");
        assert_eq!(key, ModelKey::new("Telecommunications", "Executive"));
    }

    #[test]
    fn canonical_names_are_accepted() {
        let key = ModelKey::from_request("Finance", "Senior-level");
        assert_eq!(key, ModelKey::new("Finance", "Senior-level"));
    }

    #[test]
    fn unknown_keys_fall_back() {
        let key = ModelKey::from_request("agriculture", "intern");
        assert_eq!(key, ModelKey::new("Technology", "Mid-level"));
    }

    #[test]
    fn every_industry_parses_from_its_lowercase_key() {
        for industry in Industry::ALL {
            let key = industry.model_name().to_ascii_lowercase();
            assert_eq!(Industry::parse(&key), Some(industry));
        }
    }

    #[test]
    fn keys_with_path_separators_are_invalid() {
        assert!(ModelKey::new("Retail", "Mid-level").validate().is_ok());
        assert!(ModelKey::from_request("../../etc", "entry").validate().is_ok());

        for key in [
            ModelKey::new("../secrets", "Mid-level"),
            ModelKey::new("Retail", "x/../../y"),
            ModelKey::new("Retail", "..\\evil"),
            ModelKey::new("", "Mid-level"),
        ] {
            assert!(
                matches!(key.validate(), Err(ForecastError::InvalidParameter(_))),
                "{key:?}"
            );
        }
    }

    #[test]
    fn key_display() {
        assert_eq!(
            ModelKey::new("Retail", "Mid-level").to_string(),
            "Retail/Mid-level"
        );
    }
}
