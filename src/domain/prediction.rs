use serde::{Deserialize, Serialize};

/// Probability above which a customer is High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Probability above which a customer is at least Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;
/// Probability above which the predicted label is 1 (churn).
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Coarse three-level bucketing of the churn probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Strictly-greater comparisons: 0.7 itself is Medium, 0.4 itself is Low.
    pub fn from_probability(p: f64) -> Self {
        if p > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if p > MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// The response body of POST /predict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub churn_prediction:  u8,
    pub churn_probability: f64,
    pub risk_level:        RiskLevel,
}

impl Prediction {
    pub fn from_probability(p: f64) -> Self {
        let p = p.clamp(0.0, 1.0);
        Self {
            churn_prediction:  u8::from(p > DECISION_THRESHOLD),
            churn_probability: p,
            risk_level:        RiskLevel::from_probability(p),
        }
    }
}
