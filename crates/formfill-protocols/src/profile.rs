//! Profile data model.
//!
//! A profile is read-only for the duration of a fill pass. Field names on the
//! wire are camelCase so records written by the profile editor load unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Personal and professional profile used as the fill source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,

    /// User-defined fields, addressed by learned mappings as `custom.<name>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,

    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,

    #[serde(default)]
    pub education: Vec<Education>,

    /// Any other top-level entries carried by the stored record.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One work-experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Named scalar profile fields, in keyword-fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FirstName,
    LastName,
    Email,
    Phone,
    Linkedin,
    Github,
    Portfolio,
    CoverLetter,
}

impl ScalarField {
    pub const ALL: [ScalarField; 8] = [
        ScalarField::FirstName,
        ScalarField::LastName,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Linkedin,
        ScalarField::Github,
        ScalarField::Portfolio,
        ScalarField::CoverLetter,
    ];

    /// The wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::FirstName => "firstName",
            ScalarField::LastName => "lastName",
            ScalarField::Email => "email",
            ScalarField::Phone => "phone",
            ScalarField::Linkedin => "linkedin",
            ScalarField::Github => "github",
            ScalarField::Portfolio => "portfolio",
            ScalarField::CoverLetter => "coverLetter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl std::fmt::Display for ScalarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Profile {
    /// Value of a named scalar field, if set.
    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        let value = match field {
            ScalarField::FirstName => &self.first_name,
            ScalarField::LastName => &self.last_name,
            ScalarField::Email => &self.email,
            ScalarField::Phone => &self.phone,
            ScalarField::Linkedin => &self.linkedin,
            ScalarField::Github => &self.github,
            ScalarField::Portfolio => &self.portfolio,
            ScalarField::CoverLetter => &self.cover_letter,
        };
        value.as_deref()
    }

    /// Value of a custom field, if set.
    pub fn custom(&self, name: &str) -> Option<&str> {
        self.custom_fields.get(name).map(String::as_str)
    }

    /// Look up any top-level entry by its wire name.
    ///
    /// Named scalar fields win; other entries are only usable when they are
    /// strings, numbers or booleans.
    pub fn lookup(&self, name: &str) -> Option<String> {
        if let Some(field) = ScalarField::from_name(name) {
            return self.scalar(field).map(str::to_string);
        }
        match self.extra.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl WorkExperience {
    /// Sub-field values in fill order: title, company, responsibilities, start, end.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("title", self.title.as_deref()),
            ("company", self.company.as_deref()),
            ("responsibilities", self.responsibilities.as_deref()),
            ("startDate", self.start_date.as_deref()),
            ("endDate", self.end_date.as_deref()),
        ]
    }
}

impl Education {
    /// Sub-field values in fill order: school, degree, field of study, start, end.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("school", self.school.as_deref()),
            ("degree", self.degree.as_deref()),
            ("fieldOfStudy", self.field_of_study.as_deref()),
            ("startDate", self.start_date.as_deref()),
            ("endDate", self.end_date.as_deref()),
        ]
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
