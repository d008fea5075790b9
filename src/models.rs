use std::{borrow::Cow, fmt, str::FromStr};

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{
        RefOr,
        schema::{ObjectBuilder, Schema, Type},
    },
};

use crate::error::{AppError, AppResult};

/// Returned when adding to a cart line would push its quantity past `i64::MAX`.
pub const QUANTITY_TOO_LARGE: &str = "quantity is too large";

/// Opaque 24-hex reference identifier linking records across stores.
///
/// Only the form is validated; nothing checks the referenced record exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(ObjectId);

impl RefId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw).ok().map(Self)
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for RefId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for RefId {
    type Err = bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

// bson's own serde impl writes `{"$oid": ..}`; the API speaks plain hex strings.
impl Serialize for RefId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for RefId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for RefId {
    fn schema() -> RefOr<Schema> {
        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(Type::String)
                .pattern(Some("^[0-9a-fA-F]{24}$"))
                .build(),
        ))
    }
}

impl ToSchema for RefId {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("RefId")
    }
}

/// Billing unit of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RentType {
    Hour,
    Day,
    Month,
}

impl RentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentType::Hour => "hour",
            RentType::Day => "day",
            RentType::Month => "month",
        }
    }

    /// Name of the product field holding the price for this unit.
    pub fn price_field(&self) -> &'static str {
        match self {
            RentType::Hour => "pricePerHour",
            RentType::Day => "pricePerDay",
            RentType::Month => "pricePerMonth",
        }
    }
}

impl FromStr for RentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(RentType::Hour),
            "day" => Ok(RentType::Day),
            "month" => Ok(RentType::Month),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product's price. Serialized flattened, so exactly one of
/// `pricePerHour`, `pricePerDay` or `pricePerMonth` appears on the record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum RentalPrice {
    #[serde(rename = "pricePerHour")]
    Hour(f64),
    #[serde(rename = "pricePerDay")]
    Day(f64),
    #[serde(rename = "pricePerMonth")]
    Month(f64),
}

impl RentalPrice {
    pub fn new(rent_type: RentType, amount: f64) -> Self {
        match rent_type {
            RentType::Hour => RentalPrice::Hour(amount),
            RentType::Day => RentalPrice::Day(amount),
            RentType::Month => RentalPrice::Month(amount),
        }
    }

    /// Splits into `(per_hour, per_day, per_month)` columns.
    pub fn columns(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        match *self {
            RentalPrice::Hour(amount) => (Some(amount), None, None),
            RentalPrice::Day(amount) => (None, Some(amount), None),
            RentalPrice::Month(amount) => (None, None, Some(amount)),
        }
    }

    /// Inverse of [`RentalPrice::columns`]; `None` unless exactly one column is set.
    pub fn from_columns(
        per_hour: Option<f64>,
        per_day: Option<f64>,
        per_month: Option<f64>,
    ) -> Option<Self> {
        match (per_hour, per_day, per_month) {
            (Some(amount), None, None) => Some(RentalPrice::Hour(amount)),
            (None, Some(amount), None) => Some(RentalPrice::Day(amount)),
            (None, None, Some(amount)) => Some(RentalPrice::Month(amount)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: RefId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub category: String,
    #[serde(flatten)]
    pub price: RentalPrice,
    pub images: Vec<String>,
    pub owner_id: RefId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: RefId,
    pub quantity: i64,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: RefId,
    pub user_id: RefId,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: RefId, item: CartItem, now: DateTime<Utc>) -> Self {
        Self {
            id: RefId::new(),
            user_id,
            items: vec![item],
            created_at: now,
            updated_at: now,
        }
    }

    /// Folds `item` into the cart, keeping at most one entry per product.
    ///
    /// An existing entry keeps its name/price/category/images; only its
    /// quantity grows and its `added_at` moves to `now`. The cart is left
    /// untouched when the summed quantity would overflow.
    pub fn merge_item(&mut self, item: CartItem, now: DateTime<Utc>) -> AppResult<()> {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or_else(|| AppError::bad_request(QUANTITY_TOO_LARGE))?;
                existing.added_at = now;
            }
            None => self.items.push(item),
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Result of an add-to-cart call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMerge {
    Created(RefId),
    Updated(RefId),
}

/// Payment state of a rental. Creation always records `unpaid` and no
/// operation moves it further, so the stored column only admits that value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "unpaid" => Some(PaymentStatus::Unpaid),
            _ => None,
        }
    }
}

/// Lifecycle state of a rental; `pending` is the only state an operation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(TransactionStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalTransaction {
    #[serde(rename = "_id")]
    pub id: RefId,
    pub product_id: RefId,
    pub owner_id: RefId,
    pub renter_id: RefId,
    pub renttype: RentType,
    pub duration: f64,
    pub total_amount: f64,
    pub transaction_date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub security_deposit: f64,
    pub payment_status: PaymentStatus,
    pub status: TransactionStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
