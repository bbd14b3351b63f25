//! Value Objects for store records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive `[start, end]` creation-time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange { pub start: DateTime<Utc>, pub end: DateTime<Utc> }

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self { Self { start, end } }
    pub fn contains(&self, at: DateTime<Utc>) -> bool { at >= self.start && at <= self.end }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender { Male, Female, Others }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role { Admin, #[default] User }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    #[serde(alias = "Deliverd")]
    Delivered,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundStatus { #[default] Processing, Refunded }

/// Numeric order fields that can be summed into a monthly series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderAmount { Total, Discount, Tax, ShippingCharges }

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Male => "Male", Self::Female => "Female", Self::Others => "Others" }
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Admin => "Admin", Self::User => "User" }
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Processing => "Processing", Self::Shipped => "Shipped", Self::Delivered => "Delivered" }
    }
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Processing => "Processing", Self::Refunded => "Refunded" }
    }
}

impl fmt::Display for Gender { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) } }
impl fmt::Display for Role { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) } }
impl fmt::Display for OrderStatus { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) } }
impl fmt::Display for RefundStatus { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) } }

/// Raised when a stored enum column holds an unknown value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant { pub kind: &'static str, pub value: String }
impl std::error::Error for UnknownVariant {}
impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "unknown {} '{}'", self.kind, self.value) }
}

fn unknown(kind: &'static str, value: &str) -> UnknownVariant { UnknownVariant { kind, value: value.to_string() } }

impl FromStr for Gender {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s { "Male" => Ok(Self::Male), "Female" => Ok(Self::Female), "Others" => Ok(Self::Others), _ => Err(unknown("gender", s)) }
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s { "Admin" => Ok(Self::Admin), "User" => Ok(Self::User), _ => Err(unknown("role", s)) }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            // legacy rows carry the misspelt status
            "Delivered" | "Deliverd" => Ok(Self::Delivered),
            _ => Err(unknown("order status", s)),
        }
    }
}

impl FromStr for RefundStatus {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s { "Processing" => Ok(Self::Processing), "Refunded" => Ok(Self::Refunded), _ => Err(unknown("refund status", s)) }
    }
}
