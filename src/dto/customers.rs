use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Customer;

/// Body of `POST /customers` and `PUT /customers/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub shipping_address: String,
}

impl CustomerPayload {
    pub fn into_customer(self, id: impl Into<String>) -> Customer {
        Customer {
            id: id.into(),
            name: self.name,
            surname: self.surname,
            username: self.username,
            email: self.email,
            shipping_address: self.shipping_address,
        }
    }
}

impl From<&Customer> for CustomerPayload {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            surname: c.surname.clone(),
            username: c.username.clone(),
            email: c.email.clone(),
            shipping_address: c.shipping_address.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerList {
    #[schema(value_type = Vec<Customer>)]
    pub items: Vec<Customer>,
}
