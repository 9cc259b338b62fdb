//! Office address
//!
//! The one kind listed by explicit display order rather than recency; the
//! order endpoint rewrites `display_order` for the whole set in a single
//! transaction.

use serde::{Deserialize, Serialize};

use super::content::Resource;
use super::validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Office label shown on the site ("Head Office", "Nairobi", ...).
    pub label: String,
    pub street: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Resource for Address {
    const KIND: &'static str = "address";
    const LABEL: &'static str = "Address";
    const ORDERED: bool = true;

    type Payload = Address;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.label.trim().is_empty() {
            return Err("Label is required".into());
        }
        if payload.street.trim().is_empty() {
            return Err("Street is required".into());
        }
        if payload.city.trim().is_empty() {
            return Err("City is required".into());
        }
        if payload.country.trim().is_empty() {
            return Err("Country is required".into());
        }
        if let Some(email) = &payload.email {
            if !email.is_empty() && !validate::is_valid_email(email) {
                return Err("Invalid email address".into());
            }
        }
        if let Some(phone) = &payload.phone {
            if !phone.is_empty() && !validate::is_valid_phone(phone) {
                return Err("Invalid phone number".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            label: "Head Office".into(),
            street: "1 Market St".into(),
            city: "Springfield".into(),
            country: "USA".into(),
            phone: Some("+1 555 010 2030".into()),
            email: Some("office@example.com".into()),
        }
    }

    #[test]
    fn valid_address_passes() {
        assert!(Address::validate(&address()).is_ok());
    }

    #[test]
    fn bad_contact_details_fail() {
        let mut a = address();
        a.email = Some("nope".into());
        assert!(Address::validate(&a).is_err());

        let mut a = address();
        a.phone = Some("call me".into());
        assert!(Address::validate(&a).is_err());
    }
}
