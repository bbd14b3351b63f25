//! User Record

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::value_objects::{Gender, Role};
use super::Timestamped;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub role: Role,
    pub dob: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, gender: Gender, dob: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(), name: name.into(), email: String::new(), gender, role: Role::User,
            dob, created_at,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self { self.role = role; self }
    pub fn with_email(mut self, email: impl Into<String>) -> Self { self.email = email.into(); self }

    /// Completed years of age on `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.dob.year();
        if (today.month(), today.day()) < (self.dob.month(), self.dob.day()) {
            age -= 1;
        }
        age
    }
}

impl Timestamped for User {
    fn created_at(&self) -> DateTime<Utc> { self.created_at }
}
