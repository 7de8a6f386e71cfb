use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub asset_name: String,
    pub quantity: i64,
    pub bought_price: f64,
    pub current_price: f64,

    // quantity * bought_price
    pub total_investment: f64,
    // quantity * current_price
    pub current_investment: f64,

    pub date: DateTime<Utc>,

    #[serde(rename = "user")]
    pub owner: String,

    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Holding {
    pub fn new(owner: ObjectId, req: NewHolding) -> Self {
        let mut holding = Holding {
            id: ObjectId::new(),
            asset_name: req.asset_name,
            quantity: req.quantity,
            bought_price: req.bought_price,
            current_price: req.current_price,
            total_investment: 0.0,
            current_investment: 0.0,
            date: req.date,
            owner: owner.to_hex(),
            created_at: Utc::now(),
            updated_at: None,
        };
        holding.recompute();
        holding
    }

    pub fn recompute(&mut self) {
        let qty = self.quantity as f64;
        self.total_investment = qty * self.bought_price;
        self.current_investment = qty * self.current_price;
    }

    /// Field-by-field merge: only the supplied fields replace stored values.
    pub fn merge(&mut self, patch: UpdateHolding) {
        if let Some(v) = patch.asset_name {
            self.asset_name = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.bought_price {
            self.bought_price = v;
        }
        if let Some(v) = patch.current_price {
            self.current_price = v;
        }
        if let Some(v) = patch.date {
            self.date = v;
        }
        self.recompute();
        self.updated_at = Some(Utc::now());
    }
}

#[derive(Debug, Deserialize)]
pub struct NewHolding {
    pub asset_name: String,
    pub quantity: i64,
    pub bought_price: f64,
    pub current_price: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateHolding {
    #[serde(default)]
    pub asset_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub bought_price: Option<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}
