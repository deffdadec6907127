//! Forms
//!
//! Every form validates each field on its own and only produces the payload
//! it submits once all fields pass.

use std::{
    collections::BTreeMap,
    error::Error,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
};

use thiserror::Error;

mod account;
mod catalog;
mod validators;

pub use account::{
    LoginField, LoginForm, ProfileField, ProfileForm, RegistrationField, RegistrationForm,
};
pub use catalog::{
    CategoryField, CategoryForm, EventField, EventForm, TicketTypeField, TicketTypeForm,
};
pub use validators::{format_cpf, is_valid_date, is_valid_email, normalize_cpf};

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is empty.
    #[error("is required")]
    Required,

    /// The field has fewer characters than allowed.
    #[error("must have at least {0} characters")]
    TooShort(usize),

    /// The field is not an email address.
    #[error("must be a valid email address")]
    InvalidEmail,

    /// The field is not a CPF.
    #[error("must have exactly 11 digits")]
    InvalidCpf,

    /// The field is not a `YYYY-MM-DD` date.
    #[error("must be a date formatted as YYYY-MM-DD")]
    InvalidDate,

    /// The field is below its minimum.
    #[error("must be at least {0}")]
    BelowMinimum(i64),

    /// The field is above its maximum.
    #[error("must be at most {0}")]
    AboveMaximum(i64),
}

/// Ordered set of fields a form is made of.
pub trait FormField: Copy + Ord + Debug + Display + 'static {
    /// Every field, in display order.
    const ALL: &'static [Self];
}

/// Field errors keyed by field, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: FormField>(BTreeMap<F, FieldError>);

impl<F: FormField> FieldErrors<F> {
    /// Error recorded for `field`, if any.
    pub fn get(&self, field: F) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Whether no field was rejected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Rejected fields with their errors, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

impl<F: FormField> Default for FieldErrors<F> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<F: FormField> FromIterator<(F, FieldError)> for FieldErrors<F> {
    fn from_iter<I: IntoIterator<Item = (F, FieldError)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<F: FormField> Display for FieldErrors<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (idx, (field, error)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{field} {error}")?;
        }

        Ok(())
    }
}

impl<F: FormField> Error for FieldErrors<F> {}

/// A form that turns user input into a request payload.
pub trait Form {
    /// Fields of the form.
    type Field: FormField;

    /// Payload produced by a valid form.
    type Output;

    /// Checks a single field.
    ///
    /// # Errors
    ///
    /// Returns the reason the field is rejected.
    fn check(&self, field: Self::Field) -> Result<(), FieldError>;

    /// Builds the payload without validating.
    fn build(&self) -> Self::Output;

    /// Checks every field.
    fn validate(&self) -> FieldErrors<Self::Field> {
        Self::Field::ALL
            .iter()
            .filter_map(|&field| self.check(field).err().map(|error| (field, error)))
            .collect()
    }

    /// Produces the payload when every field is valid.
    ///
    /// # Errors
    ///
    /// Returns every rejected field otherwise.
    fn submit(&self) -> Result<Self::Output, FieldErrors<Self::Field>> {
        let errors = self.validate();

        if errors.is_empty() {
            Ok(self.build())
        } else {
            Err(errors)
        }
    }
}
