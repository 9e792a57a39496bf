//! Personal Identifiable Information protection.

use std::{fmt, str::FromStr};

use crate::{
    errors::ValidationError,
    masking::{Secret, Strategy},
};

/// Strategy for masking Email
#[derive(Debug, Copy, Clone)]
pub enum EmailStrategy {}

impl<T> Strategy<T> for EmailStrategy
where
    T: AsRef<str> + fmt::Debug,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();
        match val_str.split_once('@') {
            Some((a, b)) => write!(f, "{}@{}", "*".repeat(a.len()), b),
            None => write!(f, "{}", "*".repeat(val_str.len())),
        }
    }
}

/// Strategy for masking phone numbers, keeping the last four digits
#[derive(Debug, Copy, Clone)]
pub enum PhoneNumberStrategy {}

impl<T> Strategy<T> for PhoneNumberStrategy
where
    T: AsRef<str> + fmt::Debug,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();
        let visible = val_str.len().saturating_sub(4);
        match val_str.get(visible..) {
            Some(tail) if val_str.len() > 4 => write!(f, "{}{}", "*".repeat(visible), tail),
            _ => write!(f, "{}", "*".repeat(val_str.len())),
        }
    }
}

/// Strategy for masking UPI virtual payment addresses (`name@handle`).
///
/// The handle identifies the payment provider and stays readable, the
/// account name keeps only its first character.
#[derive(Debug, Copy, Clone)]
pub enum UpiVpaStrategy {}

impl<T> Strategy<T> for UpiVpaStrategy
where
    T: AsRef<str> + fmt::Debug,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();
        match val_str.split_once('@') {
            Some((name, handle)) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => {
                        write!(f, "{first}{}@{handle}", "*".repeat(chars.count()))
                    }
                    None => write!(f, "@{handle}"),
                }
            }
            None => write!(f, "{}", "*".repeat(val_str.len())),
        }
    }
}

/// Email address
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Email(Secret<String, EmailStrategy>);

impl FromStr for Email {
    type Err = error_stack::Report<ValidationError>;

    fn from_str(email: &str) -> Result<Self, Self::Err> {
        if email.contains('@') {
            Ok(Self(Secret::new(email.to_string())))
        } else {
            Err(ValidationError::InvalidValue {
                message: "Invalid email address format".into(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_masking() {
        let secret: Secret<String, EmailStrategy> = Secret::new("owner@cafe.in".to_string());
        assert_eq!("*****@cafe.in", format!("{secret:?}"));
    }

    #[test]
    fn test_phone_number_masking() {
        let secret: Secret<String, PhoneNumberStrategy> = Secret::new("9876543210".to_string());
        assert_eq!("******3210", format!("{secret:?}"));

        let short: Secret<String, PhoneNumberStrategy> = Secret::new("123".to_string());
        assert_eq!("***", format!("{short:?}"));
    }

    #[test]
    fn test_upi_vpa_masking() {
        let secret: Secret<String, UpiVpaStrategy> = Secret::new("cafe@upi".to_string());
        assert_eq!("c***@upi", format!("{secret:?}"));

        let no_handle: Secret<String, UpiVpaStrategy> = Secret::new("cafe".to_string());
        assert_eq!("****", format!("{no_handle:?}"));
    }

    #[test]
    fn test_email_parsing() {
        assert!(Email::from_str("owner@cafe.in").is_ok());
        assert!(Email::from_str("owner.cafe.in").is_err());
    }
}
