//! Registration form validation.
//!
//! Raw text collected from the registration prompts is checked against an
//! ordered rule table. Every rule runs; failures are collected in field
//! declaration order (name, email, age, username) instead of stopping at the
//! first one.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Minimum allowed length for a name.
pub const NAME_MIN: usize = 4;
/// Maximum allowed length for a name.
pub const NAME_MAX: usize = 20;
/// Oldest accepted age, in whole years.
pub const AGE_MAX: u8 = 120;
/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;

/// Registration form fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Full name.
    Name,
    /// Contact email address.
    Email,
    /// Age in whole years, typed as text.
    Age,
    /// Login handle.
    Username,
}

impl Field {
    /// Stable lowercase label for the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
            Self::Username => "username",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed registration rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Name has fewer characters than allowed.
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Name has more characters than allowed.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Email is not a syntactically valid address.
    InvalidEmail,
    /// Age text does not start with an integer.
    AgeNotNumeric,
    /// Age is zero or negative.
    AgeNotPositive,
    /// Age exceeds the accepted maximum.
    AgeTooHigh {
        /// Maximum accepted age.
        max: u8,
    },
    /// Username has fewer characters than allowed.
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Username contains characters outside `[A-Za-z0-9_]`.
    UsernameInvalidCharacters,
}

impl Violation {
    /// Field the violated rule belongs to.
    pub const fn field(&self) -> Field {
        match self {
            Self::NameTooShort { .. } | Self::NameTooLong { .. } => Field::Name,
            Self::InvalidEmail => Field::Email,
            Self::AgeNotNumeric | Self::AgeNotPositive | Self::AgeTooHigh { .. } => Field::Age,
            Self::UsernameTooShort { .. } | Self::UsernameInvalidCharacters => Field::Username,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::AgeNotNumeric => write!(f, "age must be a number"),
            Self::AgeNotPositive => write!(f, "age must be a positive number"),
            Self::AgeTooHigh { max } => write!(f, "age must be at most {max}"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, and underscores"
            ),
        }
    }
}

/// Every violation found in one validation attempt, in rule order.
///
/// ## Invariants
/// - Never empty when returned from [`UserInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// Violations in field declaration order.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Number of violated rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Violations belonging to one field.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.0
            .iter()
            .filter(move |violation| violation.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Raw registration input exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Age text; converted to an integer during validation.
    pub age: String,
    /// Login handle.
    pub username: String,
}

impl UserInput {
    /// Build input from the four raw field values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        age: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: age.into(),
            username: username.into(),
        }
    }

    /// Check every rule and return the typed record or all violations.
    ///
    /// # Examples
    /// ```
    /// use coursework::domain::registration::UserInput;
    ///
    /// let errors = UserInput::new("Jo", "not-an-email", "200", "a")
    ///     .validate()
    ///     .expect_err("every field is invalid");
    /// assert_eq!(errors.len(), 4);
    /// ```
    pub fn validate(&self) -> Result<ValidatedUser, ValidationErrors> {
        let candidate = Candidate {
            input: self,
            age: parse_leading_integer(&self.age),
        };

        let mut violations = Vec::new();
        for rule in &RULES {
            if let Some(violation) = (rule.check)(&candidate) {
                debug_assert_eq!(violation.field(), rule.field);
                violations.push(violation);
            }
        }

        if !violations.is_empty() {
            return Err(ValidationErrors(violations));
        }

        let age = candidate
            .age
            .and_then(|value| u8::try_from(value).ok())
            .ok_or_else(|| ValidationErrors(vec![Violation::AgeNotNumeric]))?;
        Ok(ValidatedUser {
            name: self.name.clone(),
            email: self.email.clone(),
            age,
            username: self.username.clone(),
        })
    }
}

/// Registration record that satisfied every rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedUser {
    name: String,
    email: String,
    age: u8,
    username: String,
}

impl ValidatedUser {
    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Age in whole years, within `1..=AGE_MAX`.
    pub const fn age(&self) -> u8 {
        self.age
    }

    /// Login handle.
    pub fn username(&self) -> &str {
        &self.username
    }
}

struct Candidate<'a> {
    input: &'a UserInput,
    age: Option<i64>,
}

type Check = fn(&Candidate<'_>) -> Option<Violation>;

struct Rule {
    field: Field,
    check: Check,
}

const RULES: [Rule; 8] = [
    Rule {
        field: Field::Name,
        check: name_not_too_short,
    },
    Rule {
        field: Field::Name,
        check: name_not_too_long,
    },
    Rule {
        field: Field::Email,
        check: email_well_formed,
    },
    Rule {
        field: Field::Age,
        check: age_numeric,
    },
    Rule {
        field: Field::Age,
        check: age_positive,
    },
    Rule {
        field: Field::Age,
        check: age_within_max,
    },
    Rule {
        field: Field::Username,
        check: username_not_too_short,
    },
    Rule {
        field: Field::Username,
        check: username_characters,
    },
];

fn name_not_too_short(candidate: &Candidate<'_>) -> Option<Violation> {
    (candidate.input.name.chars().count() < NAME_MIN)
        .then_some(Violation::NameTooShort { min: NAME_MIN })
}

fn name_not_too_long(candidate: &Candidate<'_>) -> Option<Violation> {
    (candidate.input.name.chars().count() > NAME_MAX)
        .then_some(Violation::NameTooLong { max: NAME_MAX })
}

fn email_well_formed(candidate: &Candidate<'_>) -> Option<Violation> {
    (!is_valid_email(&candidate.input.email)).then_some(Violation::InvalidEmail)
}

fn age_numeric(candidate: &Candidate<'_>) -> Option<Violation> {
    candidate.age.is_none().then_some(Violation::AgeNotNumeric)
}

// Range rules only see ages that converted.
fn age_positive(candidate: &Candidate<'_>) -> Option<Violation> {
    candidate
        .age
        .filter(|age| *age < 1)
        .map(|_| Violation::AgeNotPositive)
}

fn age_within_max(candidate: &Candidate<'_>) -> Option<Violation> {
    candidate
        .age
        .filter(|age| *age > i64::from(AGE_MAX))
        .map(|_| Violation::AgeTooHigh { max: AGE_MAX })
}

fn username_not_too_short(candidate: &Candidate<'_>) -> Option<Violation> {
    (candidate.input.username.chars().count() < USERNAME_MIN)
        .then_some(Violation::UsernameTooShort { min: USERNAME_MIN })
}

fn username_characters(candidate: &Candidate<'_>) -> Option<Violation> {
    (!username_regex().is_match(&candidate.input.username))
        .then_some(Violation::UsernameInvalidCharacters)
}

/// Lenient integer conversion: skips leading whitespace, accepts one sign,
/// then reads the longest run of ASCII digits and ignores whatever follows.
///
/// Returns `None` when no digit follows the optional sign. Values beyond
/// the `i64` range saturate.
pub(crate) fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut seen_digit = false;
    let mut magnitude: i64 = 0;
    for digit in unsigned.chars().map_while(|c| c.to_digit(10)) {
        seen_digit = true;
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i64::from(digit));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Leading dots and consecutive dots are rejected separately; the
        // regex engine has no look-around. Case folding stays ASCII-only so
        // `ſ` and the Kelvin sign do not match `s` and `k`.
        let pattern = r"(?i-u)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@(?:[a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        let pattern = "^[A-Za-z0-9_]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn is_valid_email(raw: &str) -> bool {
    !raw.starts_with('.') && !raw.contains("..") && email_regex().is_match(raw)
}
