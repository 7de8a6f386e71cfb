use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Trade type that is journaled instead of stored as a trade.
pub const DAY_TRADE: &str = "Day Trade";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub asset_name: String,
    pub quantity: i64,
    pub trade_type: String,
    pub trade_category: String,
    pub enter_price: f64,
    pub exit_price: f64,
    #[serde(default)]
    pub stop_loss: f64,

    // quantity * enter_price
    pub total_traded: f64,
    // quantity * exit_price - total_traded
    pub profit_or_loss: f64,

    pub strategy_name: String,
    pub strategy_description: String,
    pub date: DateTime<Utc>,

    #[serde(rename = "user")]
    pub owner: String,

    pub created_at: DateTime<Utc>,
}

impl Trade {
    pub fn new(owner: ObjectId, req: NewTrade) -> Self {
        let mut trade = Trade {
            id: ObjectId::new(),
            asset_name: String::new(),
            quantity: 0,
            trade_type: String::new(),
            trade_category: String::new(),
            enter_price: 0.0,
            exit_price: 0.0,
            stop_loss: 0.0,
            total_traded: 0.0,
            profit_or_loss: 0.0,
            strategy_name: String::new(),
            strategy_description: String::new(),
            date: req.date,
            owner: owner.to_hex(),
            created_at: Utc::now(),
        };
        trade.replace_with(req);
        trade
    }

    /// Wholesale replacement of the client-editable fields. Totals are
    /// always derived here, never taken from the client.
    pub fn replace_with(&mut self, req: NewTrade) {
        let (total_traded, profit_or_loss) = totals(req.quantity, req.enter_price, req.exit_price);

        self.asset_name = req.asset_name;
        self.quantity = req.quantity;
        self.trade_type = req.trade_type;
        self.trade_category = req.trade_category;
        self.enter_price = req.enter_price;
        self.exit_price = req.exit_price;
        self.stop_loss = 0.0;
        self.total_traded = total_traded;
        self.profit_or_loss = profit_or_loss;
        self.strategy_name = req.strategy_name;
        self.strategy_description = req.strategy_description;
        self.date = req.date;
    }
}

pub fn totals(quantity: i64, enter_price: f64, exit_price: f64) -> (f64, f64) {
    let qty = quantity as f64;
    let traded = qty * enter_price;
    (traded, qty * exit_price - traded)
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTrade {
    pub asset_name: String,
    pub quantity: i64,
    pub trade_type: String,
    pub asset_type: String,
    pub trade_category: String,
    pub enter_price: f64,
    pub exit_price: f64,
    pub strategy_name: String,
    pub strategy_description: String,
    pub date: DateTime<Utc>,
}

impl NewTrade {
    pub fn is_day_trade(&self) -> bool {
        self.trade_type == DAY_TRADE
    }
}
