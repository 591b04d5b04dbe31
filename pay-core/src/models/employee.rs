use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{NameError, ValidationError};

static NAME_CHARACTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-'a-zA-ZÀ-ÿ\s]*$").expect("name pattern is a valid regex")
});

/// The person a breakdown is calculated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub number: u32,
    pub yearly_gross_salary: Decimal,
}

impl Employee {
    /// Builds an employee after checking the name and salary.
    pub fn new(
        name: impl Into<String>,
        number: u32,
        yearly_gross_salary: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        Self::validate_name(&name)?;
        if yearly_gross_salary < Decimal::ZERO {
            return Err(ValidationError::NegativeIncome(yearly_gross_salary));
        }
        Ok(Self {
            name,
            number,
            yearly_gross_salary,
        })
    }

    /// Checks a full name: letters (including Latin-1 accented ones),
    /// hyphens, apostrophes and whitespace only, with at least one space that
    /// is neither leading nor trailing.
    ///
    /// ```
    /// use pay_core::{Employee, NameError};
    ///
    /// assert_eq!(Employee::validate_name("Zoë O'Neill-Brown"), Ok(()));
    /// assert_eq!(Employee::validate_name("R2 D2"), Err(NameError::InvalidCharacters));
    /// assert_eq!(Employee::validate_name("Cher"), Err(NameError::BadSpacing));
    /// ```
    pub fn validate_name(name: &str) -> Result<(), NameError> {
        if !NAME_CHARACTERS.is_match(name) {
            return Err(NameError::InvalidCharacters);
        }
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if !name.contains(' ') || name.starts_with(' ') || name.ends_with(' ') {
            return Err(NameError::BadSpacing);
        }
        Ok(())
    }

    /// Parses an employee number made of ASCII digits only.
    pub fn parse_number(input: &str) -> Result<u32, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidEmployeeNumber(input.to_string()));
        }
        trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidEmployeeNumber(input.to_string()))
    }

    /// Parses a yearly gross salary, rejecting non-numeric and negative values.
    pub fn parse_salary(input: &str) -> Result<Decimal, ValidationError> {
        let salary = Decimal::from_str(input.trim())
            .map_err(|_| ValidationError::NonNumericSalary(input.to_string()))?;
        if salary < Decimal::ZERO {
            return Err(ValidationError::NegativeIncome(salary));
        }
        Ok(salary)
    }
}
