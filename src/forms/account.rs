//! Account Forms

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::users::{Credentials, NewUser, Role, User, UserUpdate};

use super::{
    FieldError, Form, FormField,
    validators::{cpf, email, min_chars, normalize_cpf, required},
};

const MIN_NAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 6;

/// Registration Field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    Name,
    Username,
    Email,
    Password,
    Cpf,
}

impl FormField for RegistrationField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Username,
        Self::Email,
        Self::Password,
        Self::Cpf,
    ];
}

impl Display for RegistrationField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::Cpf => "cpf",
        })
    }
}

/// Sign up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
    pub role: Role,
}

impl Form for RegistrationForm {
    type Field = RegistrationField;
    type Output = NewUser;

    fn check(&self, field: Self::Field) -> Result<(), FieldError> {
        match field {
            RegistrationField::Name => min_chars(&self.name, MIN_NAME_CHARS),
            RegistrationField::Username => required(&self.username),
            RegistrationField::Email => email(&self.email),
            RegistrationField::Password => min_chars(&self.password, MIN_PASSWORD_CHARS),
            RegistrationField::Cpf => cpf(&self.cpf),
        }
    }

    fn build(&self) -> Self::Output {
        NewUser {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            cpf: normalize_cpf(&self.cpf).unwrap_or_default(),
            role: self.role,
        }
    }
}

/// Login Field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Username,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[Self::Username, Self::Password];
}

impl Display for LoginField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Username => "username",
            Self::Password => "password",
        })
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Form for LoginForm {
    type Field = LoginField;
    type Output = Credentials;

    fn check(&self, field: Self::Field) -> Result<(), FieldError> {
        match field {
            LoginField::Username => required(&self.username),
            LoginField::Password => min_chars(&self.password, MIN_PASSWORD_CHARS),
        }
    }

    fn build(&self) -> Self::Output {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Profile Field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    Name,
    Username,
    Email,
    Cpf,
}

impl FormField for ProfileField {
    const ALL: &'static [Self] = &[Self::Name, Self::Username, Self::Email, Self::Cpf];
}

impl Display for ProfileField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Cpf => "cpf",
        })
    }
}

/// Profile edit form, pre-filled from the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub cpf: String,
    pub role: Role,
}

impl Form for ProfileForm {
    type Field = ProfileField;
    type Output = UserUpdate;

    fn check(&self, field: Self::Field) -> Result<(), FieldError> {
        match field {
            ProfileField::Name => min_chars(&self.name, MIN_NAME_CHARS),
            ProfileField::Username => required(&self.username),
            ProfileField::Email => email(&self.email),
            ProfileField::Cpf => cpf(&self.cpf),
        }
    }

    fn build(&self) -> Self::Output {
        UserUpdate {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            cpf: normalize_cpf(&self.cpf).unwrap_or_default(),
            role: self.role,
        }
    }
}

impl From<&User> for ProfileForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            cpf: user.cpf.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::users::UserId;

    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            name: "Ana Lima".to_string(),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            cpf: "123.456.789-01".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn valid_registration_submits_normalized_cpf() -> TestResult {
        let user = registration().submit()?;

        assert_eq!(user.cpf, "12345678901");
        assert_eq!(user.role, Role::User);

        Ok(())
    }

    #[test]
    fn registration_reports_every_invalid_field_in_order() {
        let form = RegistrationForm {
            name: "Al".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            cpf: "1234".to_string(),
            ..RegistrationForm::default()
        };

        let errors = form.validate();
        let fields: Vec<RegistrationField> = errors.iter().map(|(field, _)| field).collect();

        assert_eq!(fields, RegistrationField::ALL);
        assert_eq!(
            errors.get(RegistrationField::Name),
            Some(&FieldError::TooShort(3))
        );
        assert_eq!(
            errors.get(RegistrationField::Username),
            Some(&FieldError::Required)
        );
        assert_eq!(
            errors.get(RegistrationField::Cpf),
            Some(&FieldError::InvalidCpf)
        );
    }

    #[test]
    fn registration_errors_render_as_one_line() {
        let form = RegistrationForm {
            password: "123".to_string(),
            ..registration()
        };

        let message = form.submit().err().map(|errors| errors.to_string());

        assert_eq!(
            message.as_deref(),
            Some("password must have at least 6 characters")
        );
    }

    #[test]
    fn login_requires_username_and_password_length() {
        let form = LoginForm {
            username: " ".to_string(),
            password: "12345".to_string(),
        };

        let errors = form.validate();

        assert_eq!(errors.get(LoginField::Username), Some(&FieldError::Required));
        assert_eq!(errors.get(LoginField::Password), Some(&FieldError::TooShort(6)));
    }

    #[test]
    fn profile_form_is_prefilled_from_user() -> TestResult {
        let user = User {
            id: UserId::new(1),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            cpf: "12345678901".to_string(),
            name: "Ana Lima".to_string(),
            role: Role::Organizer,
            avatar: None,
        };

        let update = ProfileForm::from(&user).submit()?;

        assert_eq!(update.role, Role::Organizer);
        assert_eq!(update.email, "ana@example.com");

        Ok(())
    }
}
