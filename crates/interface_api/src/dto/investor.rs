//! Investor DTOs

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use core_kernel::CanonicalZone;
use domain_investor::{Investor, InvestorAddress, InvestorDraft, InvestorPatch, InvestorQuery};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvestorRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    #[serde(default)]
    pub name: String,
    /// Missing or numeric phones reach the phone rules as text
    #[validate(length(max = 32, message = "is too long"))]
    #[serde(default, deserialize_with = "phone_text")]
    pub phone: Option<String>,
    #[validate(length(max = 254, message = "is too long"))]
    pub email: Option<String>,
    #[validate(length(max = 16, message = "is too long"))]
    pub province_code: Option<String>,
    #[validate(length(max = 16, message = "is too long"))]
    pub ward_code: Option<String>,
    #[validate(length(max = 500, message = "is too long"))]
    pub address_line: Option<String>,
}

impl From<CreateInvestorRequest> for InvestorDraft {
    fn from(request: CreateInvestorRequest) -> Self {
        InvestorDraft {
            name: request.name,
            phone: request.phone.unwrap_or_default(),
            email: request.email,
            province_code: request.province_code,
            ward_code: request.ward_code,
            address_line: request.address_line,
        }
    }
}

/// Partial update; omitted fields stay as stored
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInvestorRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 32, message = "is too long"))]
    #[serde(default, deserialize_with = "phone_text")]
    pub phone: Option<String>,
    #[validate(length(max = 254, message = "is too long"))]
    pub email: Option<String>,
    #[validate(length(max = 16, message = "is too long"))]
    pub province_code: Option<String>,
    #[validate(length(max = 16, message = "is too long"))]
    pub ward_code: Option<String>,
    #[validate(length(max = 500, message = "is too long"))]
    pub address_line: Option<String>,
}

impl From<UpdateInvestorRequest> for InvestorPatch {
    fn from(request: UpdateInvestorRequest) -> Self {
        InvestorPatch {
            name: request.name,
            phone: request.phone,
            email: request.email,
            province_code: request.province_code,
            ward_code: request.ward_code,
            address_line: request.address_line,
        }
    }
}

/// Reads a phone given as a string or a bare JSON number
///
/// Spreadsheet exports send `912345678.0`; it is kept verbatim as text so the
/// phone rules reject it with a readable message.
fn phone_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(de::Error::custom(format!("phone must be text, got {}", other))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListInvestorsParams {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub province_code: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<ListInvestorsParams> for InvestorQuery {
    fn from(params: ListInvestorsParams) -> Self {
        InvestorQuery {
            name_contains: params.name,
            phone: params.phone,
            province_code: params.province_code,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvestorResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<InvestorAddress>,
    pub created_at: DateTime<Tz>,
    pub updated_at: DateTime<Tz>,
}

impl InvestorResponse {
    /// Builds the response with timestamps in the display zone
    pub fn new(investor: Investor, zone: &CanonicalZone) -> Self {
        InvestorResponse {
            id: *investor.id.as_uuid(),
            name: investor.name,
            phone: investor.phone.to_string(),
            email: investor.email,
            address: investor.address,
            created_at: zone.normalize_utc(investor.created_at),
            updated_at: zone.normalize_utc(investor.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WardResponse {
    pub code: String,
    pub name: String,
}
