//! Core domain models

use chrono::{DateTime, NaiveDate, Utc};
use clowder_auth::Role;
use clowder_geo::{Locatable, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cat record: the owned, located resource everything revolves around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cat {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub cat_name: String,
    /// Weight in kilograms
    pub weight: f64,
    /// Date of birth
    pub birthdate: NaiveDate,
    /// Stored picture filename, if one was uploaded
    pub filename: Option<String>,
    /// Where the cat lives
    pub location: Point,
    /// The user that owns this cat. Set at creation from the caller's
    /// identity; changed only through the admin-only reassign operation.
    pub owner: Uuid,
    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Cat {
    pub fn new(
        cat_name: String,
        weight: f64,
        birthdate: NaiveDate,
        location: Point,
        owner: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cat_name,
            weight,
            birthdate,
            filename: None,
            location,
            owner,
            created_at: Utc::now(),
        }
    }
}

impl Locatable for Cat {
    fn location(&self) -> Point {
        self.location
    }
}

/// A registered user.
///
/// Credentials are deliberately absent: password handling and token
/// issuance live with the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub user_name: String,
    /// Contact address
    pub email: String,
    /// Role, `user` unless promoted out of band
    pub role: Role,
    /// When this account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name,
            email,
            role: Role::User,
            created_at: Utc::now(),
        }
    }
}

/// Request to create a new cat. The owner is never part of the payload;
/// it comes from the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCatRequest {
    pub cat_name: String,
    pub weight: f64,
    pub birthdate: NaiveDate,
    pub location: Point,
    pub filename: Option<String>,
}

/// Partial update of a cat. Absent fields are left untouched; the owner
/// cannot be changed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCatRequest {
    pub cat_name: Option<String>,
    pub weight: Option<f64>,
    pub birthdate: Option<NaiveDate>,
    pub location: Option<Point>,
}

impl UpdateCatRequest {
    /// Apply the present fields onto an existing record.
    pub fn apply(&self, cat: &mut Cat) {
        if let Some(cat_name) = &self.cat_name {
            cat.cat_name = cat_name.clone();
        }
        if let Some(weight) = self.weight {
            cat.weight = weight;
        }
        if let Some(birthdate) = self.birthdate {
            cat.birthdate = birthdate;
        }
        if let Some(location) = self.location {
            cat.location = location;
        }
    }
}

/// Request to hand a cat to a different owner. Admin-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignOwnerRequest {
    pub owner: Uuid,
}

/// Request to create a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub email: String,
}
