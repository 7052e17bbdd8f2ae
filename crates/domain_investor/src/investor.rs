//! Investor records and their create/update inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::InvestorId;

use crate::contact::PhoneNumber;
use crate::validation::ValidatedInvestor;

/// Postal address with names resolved from the region table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorAddress {
    pub province_code: String,
    pub province_name: String,
    pub ward_code: String,
    pub ward_name: String,
    /// Street, building, and the like
    pub address_line: Option<String>,
}

/// A fund investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: InvestorId,
    pub name: String,
    pub phone: PhoneNumber,
    pub email: Option<String>,
    pub address: Option<InvestorAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investor {
    /// Creates a new investor from validated data
    pub fn new(validated: ValidatedInvestor) -> Self {
        let now = Utc::now();
        Self {
            id: InvestorId::new_v7(),
            name: validated.name,
            phone: validated.phone,
            email: validated.email,
            address: validated.address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field with validated data
    pub fn apply(&mut self, validated: ValidatedInvestor) {
        self.name = validated.name;
        self.phone = validated.phone;
        self.email = validated.email;
        self.address = validated.address;
        self.updated_at = Utc::now();
    }

    /// Returns the editable fields as an unvalidated draft
    pub fn to_draft(&self) -> InvestorDraft {
        let address = self.address.as_ref();
        InvestorDraft {
            name: self.name.clone(),
            phone: self.phone.to_string(),
            email: self.email.clone(),
            province_code: address.map(|a| a.province_code.clone()),
            ward_code: address.map(|a| a.ward_code.clone()),
            address_line: address.and_then(|a| a.address_line.clone()),
        }
    }
}

/// Unvalidated investor fields, as submitted on creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub province_code: Option<String>,
    pub ward_code: Option<String>,
    pub address_line: Option<String>,
}

/// A partial update
///
/// `None` leaves a field unchanged. For the optional fields (`email`,
/// `address_line`) an empty string clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub province_code: Option<String>,
    pub ward_code: Option<String>,
    pub address_line: Option<String>,
}

impl InvestorPatch {
    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.province_code.is_none()
            && self.ward_code.is_none()
            && self.address_line.is_none()
    }

    /// Overlays the patch on an existing investor
    ///
    /// The result is the full record that must pass validation before the
    /// update is accepted.
    pub fn merge_into(&self, current: &Investor) -> InvestorDraft {
        let mut draft = current.to_draft();

        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            draft.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            draft.email = non_blank(email);
        }
        if let Some(province_code) = &self.province_code {
            draft.province_code = non_blank(province_code);
        }
        if let Some(ward_code) = &self.ward_code {
            draft.ward_code = non_blank(ward_code);
        }
        if let Some(address_line) = &self.address_line {
            draft.address_line = non_blank(address_line);
        }

        draft
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
