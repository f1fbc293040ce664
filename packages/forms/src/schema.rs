//! # Field schemas: which fields a form has and what makes them valid
//!
//! [`schema_for`] is the single entry point: given an [`OperatingMode`] it returns the
//! ordered [`FieldSchema`] for that mode. The order is the rendering order and also the
//! order in which validation errors are reported, so it never changes between calls.
//!
//! | Mode | Fields |
//! |------|--------|
//! | `sign-in` | `email`, `password` |
//! | `sign-up` | `firstName`, `lastName`, `address`, `city`, `state`, `code`, `dateofbirth`, `ssn`, `email`, `password` |
//!
//! ## Validation order
//!
//! Each field is checked against its [`FieldConstraint`] in a fixed order and stops at
//! the first failure:
//!
//! 1. **required**: the trimmed value must not be empty. An empty optional field is
//!    valid and skips the remaining checks.
//! 2. **kind format**: [`FieldKind::Date`] must be a `yyyy-mm-dd` calendar date,
//!    [`FieldKind::Identifier`] must be ASCII digits.
//! 3. **length**, then **pattern**.
//!
//! Values are trimmed before checking, except for [`FieldKind::Password`] which is
//! checked verbatim.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::mode::OperatingMode;

/// Every field any auth form can carry.
///
/// Variants are declared in sign-up rendering order; the derived `Ord` is what keeps
/// value and error maps in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "lastName")]
    LastName,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "code")]
    PostalCode,
    #[serde(rename = "dateofbirth")]
    DateOfBirth,
    #[serde(rename = "ssn")]
    Ssn,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Address,
        FieldName::City,
        FieldName::State,
        FieldName::PostalCode,
        FieldName::DateOfBirth,
        FieldName::Ssn,
        FieldName::Email,
        FieldName::Password,
    ];

    /// Wire and DOM name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Address => "address",
            FieldName::City => "city",
            FieldName::State => "state",
            FieldName::PostalCode => "code",
            FieldName::DateOfBirth => "dateofbirth",
            FieldName::Ssn => "ssn",
            FieldName::Email => "email",
            FieldName::Password => "password",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Input kind of a field. Decides the kind-specific format check and the HTML input type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    Date,
    Identifier,
}

impl FieldKind {
    /// HTML `type` attribute for the rendered input.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Password => "password",
            FieldKind::Text | FieldKind::Date | FieldKind::Identifier => "text",
        }
    }
}

/// Named patterns a field value can be matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Email,
    StateCode,
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static STATE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2}$").expect("state code pattern is a valid regex")
});

impl Pattern {
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Pattern::Email => EMAIL_RE.is_match(value),
            Pattern::StateCode => STATE_CODE_RE.is_match(value),
        }
    }

    fn error(&self) -> FieldError {
        match self {
            Pattern::Email => FieldError::InvalidEmail,
            Pattern::StateCode => FieldError::InvalidStateCode,
        }
    }
}

/// Constraints on a single field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConstraint {
    pub required: bool,
    pub kind: FieldKind,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

impl FieldConstraint {
    fn required(kind: FieldKind) -> Self {
        Self {
            required: true,
            kind,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    fn min(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    fn max(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Check a raw value, returning the first failing constraint.
    pub fn check(&self, raw: &str) -> Result<(), FieldError> {
        let value = match self.kind {
            FieldKind::Password => raw,
            _ => raw.trim(),
        };

        if value.trim().is_empty() {
            return if self.required {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }

        match self.kind {
            FieldKind::Date => {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|_| FieldError::InvalidDate)?;
            }
            FieldKind::Identifier => {
                if !value.chars().all(|c| c.is_ascii_digit()) {
                    return Err(FieldError::NotDigits);
                }
            }
            FieldKind::Text | FieldKind::Password => {}
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(FieldError::TooShort(min));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(FieldError::TooLong(max));
            }
        }

        match self.pattern {
            Some(pattern) if !pattern.is_match(value) => Err(pattern.error()),
            _ => Ok(()),
        }
    }
}

/// Why a field value was rejected. The `Display` text is what the form shows inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Enter a date as yyyy-mm-dd")]
    InvalidDate,
    #[error("Use digits only")]
    NotDigits,
    #[error("Must contain at least {0} character(s)")]
    TooShort(usize),
    #[error("Must contain at most {0} character(s)")]
    TooLong(usize),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Use a two-letter state code")]
    InvalidStateCode,
}

/// One declared field: identity, presentation hints and constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub constraint: FieldConstraint,
}

impl FieldSpec {
    fn new(
        name: FieldName,
        label: &'static str,
        placeholder: &'static str,
        constraint: FieldConstraint,
    ) -> Self {
        Self {
            name,
            label,
            placeholder,
            constraint,
        }
    }
}

/// Outcome of validating a full value set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: BTreeMap<FieldName, FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First invalid field in schema order.
    pub fn first_error(&self) -> Option<(FieldName, &FieldError)> {
        self.errors.iter().next().map(|(name, error)| (*name, error))
    }
}

/// The ordered fields of one operating mode.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    mode: OperatingMode,
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.field(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.iter().map(|spec| spec.name)
    }

    /// Validate every field of the schema against `values`.
    ///
    /// A schema field missing from `values` is checked as an empty string.
    pub fn validate(&self, values: &BTreeMap<FieldName, String>) -> ValidationResult {
        let errors = self
            .fields
            .iter()
            .filter_map(|spec| {
                let raw = values.get(&spec.name).map(String::as_str).unwrap_or("");
                spec.constraint.check(raw).err().map(|e| (spec.name, e))
            })
            .collect();
        ValidationResult { errors }
    }
}

fn credential_fields() -> [FieldSpec; 2] {
    [
        FieldSpec::new(
            FieldName::Email,
            "Email",
            "Enter your email",
            FieldConstraint::required(FieldKind::Text).pattern(Pattern::Email),
        ),
        FieldSpec::new(
            FieldName::Password,
            "Password",
            "Enter your password",
            FieldConstraint::required(FieldKind::Password).min(6),
        ),
    ]
}

/// Schema for a form in `mode`.
pub fn schema_for(mode: OperatingMode) -> FieldSchema {
    let mut fields = Vec::new();

    if mode == OperatingMode::SignUp {
        fields.extend([
            FieldSpec::new(
                FieldName::FirstName,
                "First Name",
                "John",
                FieldConstraint::required(FieldKind::Text).min(3),
            ),
            FieldSpec::new(
                FieldName::LastName,
                "Last Name",
                "Doe",
                FieldConstraint::required(FieldKind::Text).min(3),
            ),
            FieldSpec::new(
                FieldName::Address,
                "Address",
                "Enter your specific address",
                FieldConstraint::required(FieldKind::Text).max(50),
            ),
            FieldSpec::new(
                FieldName::City,
                "City",
                "Enter your city",
                FieldConstraint::required(FieldKind::Text).max(50),
            ),
            FieldSpec::new(
                FieldName::State,
                "State",
                "ex: NY",
                FieldConstraint::required(FieldKind::Text)
                    .min(2)
                    .max(2)
                    .pattern(Pattern::StateCode),
            ),
            FieldSpec::new(
                FieldName::PostalCode,
                "Postal Code",
                "ex: 11101",
                FieldConstraint::required(FieldKind::Identifier).min(3).max(6),
            ),
            FieldSpec::new(
                FieldName::DateOfBirth,
                "Date of Birth",
                "yyyy-mm-dd",
                FieldConstraint::required(FieldKind::Date),
            ),
            FieldSpec::new(
                FieldName::Ssn,
                "SSN",
                "ex: 1234",
                FieldConstraint::required(FieldKind::Identifier).min(4).max(9),
            ),
        ]);
    }

    fields.extend(credential_fields());
    FieldSchema { mode, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn values(pairs: &[(FieldName, &str)]) -> BTreeMap<FieldName, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_sign_in_fields_are_strict_subset_of_sign_up() {
        let sign_in: BTreeSet<_> = schema_for(OperatingMode::SignIn).names().collect();
        let sign_up: BTreeSet<_> = schema_for(OperatingMode::SignUp).names().collect();

        assert_eq!(
            sign_in,
            BTreeSet::from([FieldName::Email, FieldName::Password])
        );
        assert!(sign_in.is_subset(&sign_up));
        assert!(sign_in.len() < sign_up.len());
        assert_eq!(sign_up.len(), FieldName::ALL.len());
    }

    #[test]
    fn test_field_order_is_stable() {
        let first: Vec<_> = schema_for(OperatingMode::SignUp).names().collect();
        let second: Vec<_> = schema_for(OperatingMode::SignUp).names().collect();
        assert_eq!(first, second);
        assert_eq!(first, FieldName::ALL.to_vec());
        assert_eq!(schema_for(OperatingMode::SignIn).mode(), OperatingMode::SignIn);
    }

    #[test]
    fn test_field_name_parse() {
        assert_eq!("code".parse::<FieldName>(), Ok(FieldName::PostalCode));
        assert_eq!("dateofbirth".parse::<FieldName>(), Ok(FieldName::DateOfBirth));
        assert!("postalCode".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_required_is_checked_before_format() {
        let schema = schema_for(OperatingMode::SignUp);
        let dob = &schema.field(FieldName::DateOfBirth).unwrap().constraint;

        assert_eq!(dob.check("   "), Err(FieldError::Required));
        assert_eq!(dob.check("1990-02-30"), Err(FieldError::InvalidDate));
        assert_eq!(dob.check("01/02/1990"), Err(FieldError::InvalidDate));
        assert_eq!(dob.check(" 1990-02-28 "), Ok(()));
    }

    #[test]
    fn test_format_is_checked_before_length() {
        let schema = schema_for(OperatingMode::SignUp);
        let code = &schema.field(FieldName::PostalCode).unwrap().constraint;

        // Too short and not digits: only the format error is reported.
        assert_eq!(code.check("a"), Err(FieldError::NotDigits));
        assert_eq!(code.check("12"), Err(FieldError::TooShort(3)));
        assert_eq!(code.check("1234567"), Err(FieldError::TooLong(6)));
        assert_eq!(code.check("11101"), Ok(()));
    }

    #[test]
    fn test_length_is_checked_before_pattern() {
        let schema = schema_for(OperatingMode::SignUp);
        let state = &schema.field(FieldName::State).unwrap().constraint;

        assert_eq!(state.check("NYC"), Err(FieldError::TooLong(2)));
        assert_eq!(state.check("N1"), Err(FieldError::InvalidStateCode));
        assert_eq!(state.check("ny"), Ok(()));
    }

    #[test]
    fn test_optional_empty_value_is_valid() {
        let constraint = FieldConstraint {
            required: false,
            kind: FieldKind::Date,
            min_length: None,
            max_length: None,
            pattern: None,
        };
        assert_eq!(constraint.check(""), Ok(()));
        assert_eq!(constraint.check("tomorrow"), Err(FieldError::InvalidDate));
    }

    #[test]
    fn test_password_is_not_trimmed() {
        let schema = schema_for(OperatingMode::SignIn);
        let password = &schema.field(FieldName::Password).unwrap().constraint;

        assert_eq!(password.check("abc   "), Ok(()));
        assert_eq!(password.check("abcde"), Err(FieldError::TooShort(6)));
        assert_eq!(password.check("      "), Err(FieldError::Required));
    }

    #[test]
    fn test_validate_reports_exactly_the_invalid_fields() {
        let schema = schema_for(OperatingMode::SignIn);

        let result = schema.validate(&values(&[
            (FieldName::Email, "not-an-email"),
            (FieldName::Password, "secret1"),
        ]));
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors.get(&FieldName::Email),
            Some(&FieldError::InvalidEmail)
        );

        let result = schema.validate(&values(&[
            (FieldName::Email, "a@b.com"),
            (FieldName::Password, "secret1"),
        ]));
        assert!(result.is_valid());
        assert_eq!(result.first_error(), None);
    }

    #[test]
    fn test_validate_treats_missing_values_as_empty() {
        let schema = schema_for(OperatingMode::SignUp);
        let result = schema.validate(&BTreeMap::new());

        assert_eq!(result.errors.len(), FieldName::ALL.len());
        assert!(result.errors.values().all(|e| *e == FieldError::Required));
        assert_eq!(
            result.first_error(),
            Some((FieldName::FirstName, &FieldError::Required))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::TooShort(3).to_string(),
            "Must contain at least 3 character(s)"
        );
    }
}
