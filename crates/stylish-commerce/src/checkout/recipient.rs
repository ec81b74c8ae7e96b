//! Recipient form.

use crate::error::CommerceError;
use crate::validate::{is_filled, is_valid_email, is_valid_mobile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preferred delivery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliverySlot {
    /// 08:00-12:00.
    Morning,
    /// 14:00-18:00.
    Afternoon,
    /// No preference.
    Anytime,
}

impl DeliverySlot {
    /// All slots in display order.
    pub const ALL: [DeliverySlot; 3] = [
        DeliverySlot::Morning,
        DeliverySlot::Afternoon,
        DeliverySlot::Anytime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverySlot::Morning => "morning",
            DeliverySlot::Afternoon => "afternoon",
            DeliverySlot::Anytime => "anytime",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliverySlot::Morning => "08:00-12:00",
            DeliverySlot::Afternoon => "14:00-18:00",
            DeliverySlot::Anytime => "Anytime",
        }
    }
}

impl FromStr for DeliverySlot {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(DeliverySlot::Morning),
            "afternoon" => Ok(DeliverySlot::Afternoon),
            "anytime" => Ok(DeliverySlot::Anytime),
            other => Err(CommerceError::UnknownDeliverySlot(other.to_string())),
        }
    }
}

impl fmt::Display for DeliverySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field of the recipient form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientField {
    Name,
    Phone,
    Email,
    Address,
    DeliverySlot,
}

impl RecipientField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientField::Name => "name",
            RecipientField::Phone => "phone",
            RecipientField::Email => "email",
            RecipientField::Address => "address",
            RecipientField::DeliverySlot => "time",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecipientField::Name => "recipient name",
            RecipientField::Phone => "mobile phone",
            RecipientField::Email => "email",
            RecipientField::Address => "address",
            RecipientField::DeliverySlot => "delivery time",
        }
    }
}

impl fmt::Display for RecipientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Who receives the order and when.
///
/// All five fields are required. The delivery slot is optional here only
/// because the form starts out unselected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(rename = "time")]
    pub delivery_slot: Option<DeliverySlot>,
}

impl Recipient {
    /// Create a fully populated recipient.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        delivery_slot: DeliverySlot,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            delivery_slot: Some(delivery_slot),
        }
    }

    /// First empty field in form order, if any.
    pub fn first_missing_field(&self) -> Option<RecipientField> {
        if !is_filled(&self.name) {
            Some(RecipientField::Name)
        } else if !is_filled(&self.phone) {
            Some(RecipientField::Phone)
        } else if !is_filled(&self.email) {
            Some(RecipientField::Email)
        } else if !is_filled(&self.address) {
            Some(RecipientField::Address)
        } else if self.delivery_slot.is_none() {
            Some(RecipientField::DeliverySlot)
        } else {
            None
        }
    }

    /// Check that all fields are filled.
    pub fn is_complete(&self) -> bool {
        self.first_missing_field().is_none()
    }

    /// First field whose content is malformed, if any.
    ///
    /// Only the phone and email have format rules.
    pub fn first_malformed_field(&self) -> Option<RecipientField> {
        if !is_valid_mobile(&self.phone) {
            Some(RecipientField::Phone)
        } else if !is_valid_email(&self.email) {
            Some(RecipientField::Email)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Recipient {
        Recipient::new(
            "Ada",
            "0912345678",
            "ada@test.com",
            "No. 1, Sec. 1, Roosevelt Rd.",
            DeliverySlot::Morning,
        )
    }

    #[test]
    fn test_complete_recipient() {
        let r = complete();
        assert!(r.is_complete());
        assert_eq!(r.first_malformed_field(), None);
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let mut r = complete();
        r.address = String::new();
        r.delivery_slot = None;
        assert_eq!(r.first_missing_field(), Some(RecipientField::Address));

        r.address = "x".to_string();
        assert_eq!(r.first_missing_field(), Some(RecipientField::DeliverySlot));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut r = complete();
        r.name = "   ".to_string();
        assert_eq!(r.first_missing_field(), Some(RecipientField::Name));
    }

    #[test]
    fn test_malformed_phone_and_email() {
        let mut r = complete();
        r.phone = "12345".to_string();
        assert_eq!(r.first_malformed_field(), Some(RecipientField::Phone));

        r.phone = "0912345678".to_string();
        r.email = "not-an-email".to_string();
        assert_eq!(r.first_malformed_field(), Some(RecipientField::Email));
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("Afternoon".parse::<DeliverySlot>().unwrap(), DeliverySlot::Afternoon);
        assert!("evening".parse::<DeliverySlot>().is_err());
    }

    #[test]
    fn test_recipient_wire_format() {
        let json = serde_json::to_value(complete()).unwrap();
        assert_eq!(json["time"], "morning");
        assert_eq!(json["phone"], "0912345678");
    }
}
