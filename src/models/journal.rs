use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub asset_name: String,
    pub quantity: i64,
    pub asset_type: String,
    // origin tag: "Holding", "Trade", "Deleted Trade" or free text
    pub journal_for: String,
    pub trade_category: String,
    pub enter_price: f64,
    pub exit_price: f64,
    pub stop_loss: f64,
    pub strategy_name: String,
    pub strategy_description: String,

    #[serde(rename = "user")]
    pub owner: String,

    pub date: DateTime<Utc>,
}

impl Journal {
    /// Explicitly authored entry. The supplied date is ignored on create.
    pub fn new(owner: ObjectId, req: NewJournal) -> Self {
        let mut journal = Journal {
            id: ObjectId::new(),
            asset_name: String::new(),
            quantity: 0,
            asset_type: String::new(),
            journal_for: String::new(),
            trade_category: String::new(),
            enter_price: 0.0,
            exit_price: 0.0,
            stop_loss: 0.0,
            strategy_name: String::new(),
            strategy_description: String::new(),
            owner: owner.to_hex(),
            date: Utc::now(),
        };
        journal.replace_with(req);
        journal.date = Utc::now();
        journal
    }

    pub fn replace_with(&mut self, req: NewJournal) {
        self.asset_name = req.asset_name;
        self.quantity = req.quantity;
        self.asset_type = req.asset_type;
        self.journal_for = req.journal_for;
        self.trade_category = req.trade_category;
        self.enter_price = req.enter_price;
        self.exit_price = req.exit_price;
        self.stop_loss = req.stop_loss;
        self.strategy_name = req.strategy_name;
        self.strategy_description = req.strategy_description;
        self.date = req.date;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJournal {
    pub asset_name: String,
    pub quantity: i64,
    pub asset_type: String,
    pub journal_for: String,
    pub trade_category: String,
    pub enter_price: f64,
    pub exit_price: f64,
    pub stop_loss: f64,
    pub strategy_name: String,
    pub strategy_description: String,
    pub date: DateTime<Utc>,
}
