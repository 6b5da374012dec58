//! Plan Value Object
//!
//! Purchasable subscription plans.

use serde::Serialize;

use crate::domain::value_object::lamports::Lamports;
use crate::error::{PaymentError, PaymentResult};

/// Subscription plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    /// Identifier sent to the backend (`free`, `pro`)
    pub id: &'static str,
    pub name: &'static str,
    /// Monthly price in SOL
    pub price_sol: f64,
    pub features: &'static [&'static str],
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.price_sol <= 0.0
    }

    pub fn price(&self) -> PaymentResult<Lamports> {
        Lamports::from_sol(self.price_sol)
    }
}

/// Free tier
pub const FREE: Plan = Plan {
    id: "free",
    name: "Free",
    price_sol: 0.0,
    features: &[
        "10 AI summaries per day",
        "Basic bias detection",
        "1 news category",
        "Email digest",
    ],
};

/// Paid tier
pub const PRO: Plan = Plan {
    id: "pro",
    name: "Pro",
    price_sol: 0.5,
    features: &[
        "Unlimited AI summaries",
        "Advanced bias detection",
        "Up to 5 news categories",
        "Real-time notifications",
        "AI Q&A assistant",
        "Multi-agent analysis",
        "Priority support",
    ],
};

/// Every plan, cheapest first
pub const ALL: &[Plan] = &[FREE, PRO];

/// Look up a plan by id (case-insensitive)
pub fn find(id: &str) -> PaymentResult<&'static Plan> {
    ALL.iter()
        .find(|plan| plan.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| PaymentError::UnknownPlan(id.to_string()))
}

/// Look up a plan that can actually be bought
pub fn purchasable(id: &str) -> PaymentResult<&'static Plan> {
    let plan = find(id)?;
    if plan.is_free() {
        return Err(PaymentError::PlanNotPurchasable(plan.name.to_string()));
    }
    Ok(plan)
}
