use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A squad roster row. Monetary amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SquadPlayer {
    pub id: String,
    pub name: String,
    pub position: String,
    pub position_group: String,
    pub age: u8,
    pub nationality: String,
    pub current_ability: u8,
    pub potential_ability: u8,
    pub value: i64,
    pub wage: i64,
    pub contract_until: String,
    pub morale: String,
    pub condition: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// One line of the monthly income or expenditure breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinanceEntry {
    pub category: String,
    pub amount: i64,
    pub percentage: f64,
    pub trend: Trend,
}
