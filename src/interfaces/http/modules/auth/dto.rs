//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{DeliveryAccount, DeliveryDetails, NewRegistration};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Token payload returned after a successful sign-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JwtResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 20, message = "first name must be 1–20 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 20, message = "last name must be 1–20 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "invalid email format"),
        length(max = 50, message = "email must be at most 50 characters")
    )]
    pub email: String,
    #[validate(length(max = 50, message = "governorate must be at most 50 characters"))]
    pub governorate: String,
    #[validate(length(max = 100, message = "address must be at most 100 characters"))]
    pub address: String,
    #[validate(length(min = 6, max = 40, message = "password must be 6–40 characters"))]
    pub password: String,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: String,
    /// Requested role labels ("admin", "delivery"); any other label maps to
    /// the default role. Absent means default.
    pub role: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeliverySignupRequest {
    #[validate(length(min = 1, max = 20, message = "first name must be 1–20 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 20, message = "last name must be 1–20 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "invalid email format"),
        length(max = 50, message = "email must be at most 50 characters")
    )]
    pub email: String,
    #[validate(length(max = 50, message = "governorate must be at most 50 characters"))]
    pub governorate: String,
    #[validate(length(max = 100, message = "address must be at most 100 characters"))]
    pub address: String,
    #[validate(length(min = 6, max = 40, message = "password must be 6–40 characters"))]
    pub password: String,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: String,
    pub role: Option<Vec<String>>,
    #[validate(length(min = 1, max = 8, message = "cin must be 1–8 characters"))]
    pub cin: String,
    #[validate(length(max = 30, message = "account holder must be at most 30 characters"))]
    pub account_holder: String,
    #[validate(length(max = 30, message = "bank name must be at most 30 characters"))]
    pub bank_name: String,
    #[validate(length(max = 30, message = "agency name must be at most 30 characters"))]
    pub agency_name: String,
    #[validate(length(max = 30, message = "agency city must be at most 30 characters"))]
    pub agency_city: String,
    #[validate(length(max = 30, message = "rib must be at most 30 characters"))]
    pub rib: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Delivery record returned by the file-upload endpoint.
/// Carries file metadata only, never the raw bytes or the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryAccountDto {
    pub account_id: String,
    pub email: String,
    pub cin: String,
    pub account_holder: String,
    pub bank_name: String,
    pub agency_name: String,
    pub agency_city: String,
    pub rib: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<u64>,
}

impl From<DeliveryAccount> for DeliveryAccountDto {
    fn from(delivery: DeliveryAccount) -> Self {
        let (file_name, file_type, file_size) = match delivery.file {
            Some(meta) => (Some(meta.name), Some(meta.content_type), Some(meta.size)),
            None => (None, None, None),
        };

        Self {
            account_id: delivery.account_id,
            email: delivery.email,
            cin: delivery.details.cin,
            account_holder: delivery.details.account_holder,
            bank_name: delivery.details.bank_name,
            agency_name: delivery.details.agency_name,
            agency_city: delivery.details.agency_city,
            rib: delivery.details.rib,
            file_name,
            file_type,
            file_size,
        }
    }
}

impl From<SignupRequest> for NewRegistration {
    fn from(request: SignupRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            governorate: request.governorate,
            address: request.address,
            phone: request.phone,
            password: request.password,
            roles: request.role,
        }
    }
}

impl DeliverySignupRequest {
    /// Split the request into the shared registration part and the
    /// delivery-specific banking fields.
    pub fn into_parts(self) -> (NewRegistration, DeliveryDetails) {
        let registration = NewRegistration {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            governorate: self.governorate,
            address: self.address,
            phone: self.phone,
            password: self.password,
            roles: self.role,
        };
        let details = DeliveryDetails {
            cin: self.cin,
            account_holder: self.account_holder,
            bank_name: self.bank_name,
            agency_name: self.agency_name,
            agency_city: self.agency_city,
            rib: self.rib,
        };
        (registration, details)
    }
}
