//! Sign-in and sign-up forms.

use crate::AuthError;
use std::fmt;
use stylish_commerce::validate::{is_filled, is_valid_email};
use stylish_data::Credentials;

/// A field of the member forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
        })
    }
}

/// Sign in with email and password.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the fields and produce native credentials.
    pub fn validate(&self) -> Result<Credentials, AuthError> {
        check_email(&self.email)?;
        check_filled(&self.password, FormField::Password)?;
        Ok(Credentials::native(self.email.trim(), self.password.clone()))
    }
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Register a new member.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the fields in form order.
    pub fn validate(&self) -> Result<(), AuthError> {
        check_filled(&self.name, FormField::Name)?;
        check_email(&self.email)?;
        check_filled(&self.password, FormField::Password)
    }
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn check_filled(value: &str, field: FormField) -> Result<(), AuthError> {
    if is_filled(value) {
        Ok(())
    } else {
        Err(AuthError::MissingField(field))
    }
}

fn check_email(email: &str) -> Result<(), AuthError> {
    check_filled(email, FormField::Email)?;
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AuthError::InvalidField(FormField::Email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_form_valid() {
        let creds = SignInForm::new(" ada@test.com ", "secret").validate().unwrap();
        assert_eq!(creds, Credentials::native("ada@test.com", "secret"));
    }

    #[test]
    fn test_sign_in_form_errors() {
        assert_eq!(
            SignInForm::new("", "secret").validate().unwrap_err(),
            AuthError::MissingField(FormField::Email)
        );
        assert_eq!(
            SignInForm::new("ada", "secret").validate().unwrap_err(),
            AuthError::InvalidField(FormField::Email)
        );
        assert_eq!(
            SignInForm::new("ada@test.com", "").validate().unwrap_err(),
            AuthError::MissingField(FormField::Password)
        );
    }

    #[test]
    fn test_sign_up_form_checks_name_first() {
        let form = SignUpForm::new("", "bad", "");
        assert_eq!(
            form.validate().unwrap_err(),
            AuthError::MissingField(FormField::Name)
        );
        assert!(SignUpForm::new("Ada", "ada@test.com", "pw").validate().is_ok());
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", SignInForm::new("ada@test.com", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
