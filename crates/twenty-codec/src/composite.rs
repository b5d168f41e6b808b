//! Composite field values.
//!
//! Each struct mirrors the nested object the API sends for its field type.
//! Every wire key is always emitted on encode (missing values as `null` or
//! empty string) so a decode/encode pass reproduces the keys it was given.

use serde::{Deserialize, Deserializer, Serialize};

/// `null` and a missing key both decode to the type's default.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Address
// ============================================================================

/// ADDRESS: `addressStreet1`, `addressCity`, ... `addressLat`, `addressLng`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address_street1: Option<String>,
    #[serde(default)]
    pub address_street2: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_postcode: Option<String>,
    #[serde(default)]
    pub address_country: Option<String>,
    #[serde(default)]
    pub address_lat: Option<f64>,
    #[serde(default)]
    pub address_lng: Option<f64>,
}

impl Address {
    /// Non-empty address parts joined with `", "`.
    pub fn one_line(&self) -> String {
        [
            &self.address_street1,
            &self.address_street2,
            &self.address_city,
            &self.address_state,
            &self.address_postcode,
            &self.address_country,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.address_lat?, self.address_lng?))
    }
}

// ============================================================================
// Full name
// ============================================================================

/// FULL_NAME: `firstName`, `lastName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullName {
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: String,
}

impl FullName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"First Last"`, without stray spaces when a part is empty.
    pub fn full(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ============================================================================
// Emails
// ============================================================================

/// EMAILS: `primaryEmail`, `additionalEmails`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emails {
    #[serde(default, deserialize_with = "nullable")]
    pub primary_email: String,
    #[serde(default)]
    pub additional_emails: Option<Vec<String>>,
}

impl Emails {
    pub fn new(primary_email: impl Into<String>) -> Self {
        Self {
            primary_email: primary_email.into(),
            additional_emails: None,
        }
    }

    pub fn with_additional(mut self, email: impl Into<String>) -> Self {
        self.additional_emails
            .get_or_insert_with(Vec::new)
            .push(email.into());
        self
    }

    /// Primary first, then additional addresses; empty strings skipped.
    pub fn all(&self) -> Vec<&str> {
        std::iter::once(self.primary_email.as_str())
            .chain(self.additional_emails.iter().flatten().map(String::as_str))
            .filter(|e| !e.is_empty())
            .collect()
    }
}

// ============================================================================
// Phones
// ============================================================================

/// One additional phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    #[serde(default, deserialize_with = "nullable")]
    pub number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub country_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub calling_code: String,
}

/// PHONES: `primaryPhoneNumber`, `primaryPhoneCountryCode`,
/// `primaryPhoneCallingCode`, `additionalPhones`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phones {
    #[serde(default, deserialize_with = "nullable")]
    pub primary_phone_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_phone_country_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_phone_calling_code: String,
    #[serde(default)]
    pub additional_phones: Option<Vec<Phone>>,
}

impl Phones {
    pub fn new(number: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            primary_phone_number: number.into(),
            primary_phone_country_code: country_code.into(),
            ..Self::default()
        }
    }

    /// `"<calling code> <number>"`, or just the number without a calling code.
    pub fn primary_display(&self) -> String {
        if self.primary_phone_calling_code.is_empty() {
            self.primary_phone_number.clone()
        } else {
            format!(
                "{} {}",
                self.primary_phone_calling_code, self.primary_phone_number
            )
        }
    }
}

// ============================================================================
// Links
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
}

/// LINKS: `primaryLinkUrl`, `primaryLinkLabel`, `secondaryLinks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(default, deserialize_with = "nullable")]
    pub primary_link_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_link_label: String,
    #[serde(default)]
    pub secondary_links: Option<Vec<Link>>,
}

impl Links {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            primary_link_url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_secondary(mut self, url: impl Into<String>, label: impl Into<String>) -> Self {
        self.secondary_links.get_or_insert_with(Vec::new).push(Link {
            url: url.into(),
            label: label.into(),
        });
        self
    }

    /// Every URL, primary first; empty strings skipped.
    pub fn urls(&self) -> Vec<&str> {
        std::iter::once(self.primary_link_url.as_str())
            .chain(self.secondary_links.iter().flatten().map(|l| l.url.as_str()))
            .filter(|u| !u.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_name_handles_null_parts() {
        let name: FullName =
            serde_json::from_value(json!({"firstName": "Ada", "lastName": null})).unwrap();
        assert_eq!(name.first_name, "Ada");
        assert_eq!(name.full(), "Ada");
    }

    #[test]
    fn test_address_one_line() {
        let address = Address {
            address_street1: Some("1 Main St".into()),
            address_city: Some("Paris".into()),
            address_country: Some("France".into()),
            address_street2: Some(String::new()),
            ..Address::default()
        };
        assert_eq!(address.one_line(), "1 Main St, Paris, France");
        assert_eq!(address.coordinates(), None);
    }

    #[test]
    fn test_emails_and_links_helpers() {
        let emails = Emails::new("a@x.com").with_additional("b@x.com");
        assert_eq!(emails.all(), vec!["a@x.com", "b@x.com"]);

        let links = Links::new("https://x.com").with_secondary("https://y.com", "Y");
        assert_eq!(links.urls(), vec!["https://x.com", "https://y.com"]);
    }

    #[test]
    fn test_phone_display() {
        let mut phones = Phones::new("612345678", "FR");
        assert_eq!(phones.primary_display(), "612345678");
        phones.primary_phone_calling_code = "+33".into();
        assert_eq!(phones.primary_display(), "+33 612345678");
    }
}
