//! Checkout

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters in a phone number.
pub const MIN_PHONE_LENGTH: usize = 10;

/// Accepted payment methods. No gateway is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,

    /// Card
    #[serde(rename = "card")]
    Card,

    /// UPI
    #[serde(rename = "upi")]
    Upi,
}

impl PaymentMethod {
    /// Wire name of the payment method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::Card => "card",
            Self::Upi => "upi",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unknown payment method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::CashOnDelivery),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Shipping and contact details stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// State
    pub state: String,

    /// Postal code
    pub postal_code: String,

    /// Delivery instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl ShippingAddress {
    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let required = [
            ("fullName", &self.full_name, "full name is required"),
            ("address", &self.address, "address is required"),
            ("city", &self.city, "city is required"),
            ("state", &self.state, "state is required"),
            ("postalCode", &self.postal_code, "postal code is required"),
        ];

        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(FieldError { field, message });
            }
        }

        if !is_valid_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "enter a valid email address",
            });
        }

        if self.phone.trim().chars().count() < MIN_PHONE_LENGTH {
            errors.push(FieldError {
                field: "phone",
                message: "phone number must be at least 10 characters",
            });
        }

        errors.sort_by_key(|error| field_order(error.field));

        errors
    }
}

fn field_order(field: &str) -> usize {
    [
        "fullName",
        "email",
        "phone",
        "address",
        "city",
        "state",
        "postalCode",
        "paymentMethod",
    ]
    .iter()
    .position(|candidate| *candidate == field)
    .unwrap_or(usize::MAX)
}

/// Checkout form as entered by the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(missing_docs, reason = "fields mirror ShippingAddress")]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,

    /// One of `cod`, `card` or `upi`
    #[serde(default = "default_payment_method")]
    pub payment_method: String,

    pub additional_notes: Option<String>,
}

fn default_payment_method() -> String {
    PaymentMethod::default().as_str().to_string()
}

/// A checkout form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout {
    /// Trimmed shipping details
    pub shipping_address: ShippingAddress,

    /// Parsed payment method
    pub payment_method: PaymentMethod,
}

/// A single invalid form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// camelCase field name
    pub field: &'static str,

    /// Message suitable for display next to the field
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Reasons checkout cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// No line items to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// One or more form fields are invalid.
    #[error("invalid checkout details: {}", join(.0))]
    InvalidFields(Vec<FieldError>),
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CheckoutForm {
    /// Validate the form, trimming surrounding whitespace from each field.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidFields`] listing every invalid field.
    pub fn validate(&self) -> Result<ValidatedCheckout, CheckoutError> {
        let notes = self
            .additional_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        let shipping_address = ShippingAddress {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            additional_notes: notes,
        };

        let mut errors = shipping_address.validate();

        let payment_method = self.payment_method.trim().parse::<PaymentMethod>();

        if payment_method.is_err() {
            errors.push(FieldError {
                field: "paymentMethod",
                message: "choose cod, card or upi",
            });
        }

        match payment_method {
            Ok(payment_method) if errors.is_empty() => Ok(ValidatedCheckout {
                shipping_address,
                payment_method,
            }),
            _ => Err(CheckoutError::InvalidFields(errors)),
        }
    }
}

/// Loose structural email check: one `@`, a non-empty local part and a
/// dotted domain without empty labels or whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Lucknow".to_string(),
            state: "Uttar Pradesh".to_string(),
            postal_code: "226001".to_string(),
            payment_method: "cod".to_string(),
            additional_notes: None,
        }
    }

    fn invalid_fields(result: Result<ValidatedCheckout, CheckoutError>) -> Vec<&'static str> {
        match result {
            Err(CheckoutError::InvalidFields(errors)) => {
                errors.into_iter().map(|error| error.field).collect()
            }
            Ok(_) | Err(CheckoutError::EmptyCart) => Vec::new(),
        }
    }

    #[test]
    fn valid_form_produces_shipping_address() -> TestResult {
        let validated = form().validate()?;

        assert_eq!(validated.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(validated.shipping_address.city, "Lucknow");
        assert_eq!(validated.shipping_address.additional_notes, None);

        Ok(())
    }

    #[test]
    fn whitespace_only_fields_are_missing() {
        let mut form = form();
        form.full_name = "   ".to_string();
        form.postal_code = String::new();

        assert_eq!(invalid_fields(form.validate()), vec!["fullName", "postalCode"]);
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut form = form();
        form.phone = "98765".to_string();

        assert_eq!(invalid_fields(form.validate()), vec!["phone"]);
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let mut form = form();
        form.payment_method = "paypal".to_string();

        assert_eq!(invalid_fields(form.validate()), vec!["paymentMethod"]);
    }

    #[test]
    fn all_failures_are_reported_in_form_order() {
        let mut form = form();
        form.payment_method = "cheque".to_string();
        form.email = "not-an-email".to_string();
        form.city = String::new();

        assert_eq!(
            invalid_fields(form.validate()),
            vec!["email", "city", "paymentMethod"]
        );
    }

    #[test]
    fn blank_notes_are_dropped() -> TestResult {
        let mut form = form();
        form.additional_notes = Some("  ".to_string());

        assert_eq!(form.validate()?.shipping_address.additional_notes, None);

        form.additional_notes = Some(" Ring twice ".to_string());

        assert_eq!(
            form.validate()?.shipping_address.additional_notes.as_deref(),
            Some("Ring twice")
        );

        Ok(())
    }

    #[test]
    fn payment_method_defaults_to_cash_on_delivery() -> TestResult {
        let form: CheckoutForm = serde_json::from_str(
            r#"{"fullName":"A","email":"a@b.in","phone":"0123456789","address":"x","city":"y","state":"z","postalCode":"1"}"#,
        )?;

        assert_eq!(form.payment_method, "cod");

        Ok(())
    }

    #[test]
    fn email_check() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co.in"));
        assert!(!is_valid_email("asha@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha@example..com"));
        assert!(!is_valid_email("as ha@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn payment_methods_round_trip_through_strings() -> TestResult {
        for method in [PaymentMethod::CashOnDelivery, PaymentMethod::Card, PaymentMethod::Upi] {
            assert_eq!(method.as_str().parse::<PaymentMethod>()?, method);
        }

        Ok(())
    }
}
