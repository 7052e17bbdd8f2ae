//! Investor validation rules
//!
//! # Rules
//!
//! - Name must be non-blank and at most 200 characters
//! - Phone must be a canonical mobile number (see [`crate::contact`])
//! - Email, if present, must look like an address
//! - Address, if present, needs both a province and a ward, and the ward
//!   must belong to the province
//!
//! All field problems are collected before failing so the client can fix
//! them in one round trip. A failure reading the region table aborts
//! immediately instead.

use crate::contact::{validate_email, validate_phone, PhoneNumber};
use crate::error::{InvestorError, ValidationError};
use crate::investor::{InvestorAddress, InvestorDraft};
use crate::region::{validate_address, RegionDirectory};

/// Maximum investor name length, in characters
pub const MAX_NAME_LENGTH: usize = 200;

/// Investor fields that passed validation, normalized for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvestor {
    pub name: String,
    pub phone: PhoneNumber,
    pub email: Option<String>,
    pub address: Option<InvestorAddress>,
}

/// Validator for investor records
///
/// The same rules run on creation and on update. For updates the caller
/// passes the merged record (see [`crate::investor::InvestorPatch::merge_into`]),
/// never just the changed fields.
pub struct InvestorValidator;

impl InvestorValidator {
    /// Validates a complete investor record
    ///
    /// # Arguments
    ///
    /// * `draft` - The full set of investor fields
    /// * `regions` - Province/ward reference table
    ///
    /// # Returns
    ///
    /// The normalized record, with province and ward names resolved
    ///
    /// # Errors
    ///
    /// `InvestorError::Validation` listing every field problem, or
    /// `InvestorError::Port` if the region table cannot be read.
    pub fn validate(
        draft: &InvestorDraft,
        regions: &dyn RegionDirectory,
    ) -> Result<ValidatedInvestor, InvestorError> {
        let mut errors = Vec::new();

        let name = Self::validate_name(&draft.name, &mut errors);

        let phone = match validate_phone(&draft.phone) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errors.extend(e.errors);
                None
            }
        };

        let email = match draft.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            Some(raw) => match validate_email(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.extend(e.errors);
                    None
                }
            },
            None => None,
        };

        let address = match Self::resolve_address(draft, regions) {
            Ok(address) => address,
            Err(InvestorError::Validation(e)) => {
                errors.extend(e.errors);
                None
            }
            Err(other) => return Err(other),
        };

        match phone {
            Some(phone) if errors.is_empty() => Ok(ValidatedInvestor {
                name,
                phone,
                email,
                address,
            }),
            _ => Err(ValidationError::from_errors(errors).into()),
        }
    }

    fn validate_name(raw: &str, errors: &mut Vec<String>) -> String {
        let name = raw.trim();
        if name.is_empty() {
            errors.push("Investor name is required".to_string());
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(format!(
                "Investor name must be at most {} characters",
                MAX_NAME_LENGTH
            ));
        }
        name.to_string()
    }

    fn resolve_address(
        draft: &InvestorDraft,
        regions: &dyn RegionDirectory,
    ) -> Result<Option<InvestorAddress>, InvestorError> {
        let province_code = trimmed(&draft.province_code);
        let ward_code = trimmed(&draft.ward_code);
        let address_line = trimmed(&draft.address_line);

        match (province_code, ward_code) {
            (None, None) if address_line.is_some() => Err(InvestorError::invalid(
                "Province and ward are required with an address line",
            )),
            (None, None) => Ok(None),
            (Some(_), None) => Err(InvestorError::invalid("Ward is required when a province is given")),
            (None, Some(_)) => Err(InvestorError::invalid("Province is required when a ward is given")),
            (Some(province_code), Some(ward_code)) => {
                let resolved = validate_address(regions, province_code, ward_code)?;
                Ok(Some(InvestorAddress {
                    province_code: resolved.province.code,
                    province_name: resolved.province.name,
                    ward_code: resolved.ward.code,
                    ward_name: resolved.ward.name,
                    address_line: address_line.map(str::to_string),
                }))
            }
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
