//! HTTP route handlers.

pub mod auth;
pub mod health;
pub mod parkings;
pub mod pickups;
pub mod reservations;
pub mod schools;
pub mod students;

use domain::models::address::AddressInput;
use persistence::repositories::AddressFields;

/// Borrow an address payload in the form the repositories take.
pub(crate) fn address_fields(input: &AddressInput) -> AddressFields<'_> {
    AddressFields {
        line1: &input.line1,
        line2: input.line2.as_deref(),
        city: &input.city,
        state: &input.state,
        postal_code: &input.postal_code,
        country: &input.country,
        latitude: input.latitude,
        longitude: input.longitude,
    }
}
