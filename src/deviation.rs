//! Self-relative loss deviation detection.
//!
//! Flags legs where a competitor lost unusually much time compared to their own
//! average and variability, not compared to the field. Only strictly positive
//! leg losses enter the statistics: a leg the competitor won or tied contributes
//! nothing to their loss pattern.

use serde::Serialize;

use crate::splits::LegFigures;
use crate::types::Seconds;

/// Deviation thresholds in standard deviations, inclusive.
const SIGNIFICANT_SIGMA: f64 = 1.5;
const MAJOR_SIGMA: f64 = 2.5;
const CRITICAL_SIGMA: f64 = 4.0;

/// How anomalous a single leg loss is against the competitor's own pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub enum LossSeverity {
    #[default]
    None,
    /// At least 1.5 standard deviations above the competitor's mean loss.
    Significant,
    /// At least 2.5 standard deviations above.
    Major,
    /// At least 4.0 standard deviations above.
    Critical,
}

/// Mean and population standard deviation of a competitor's positive leg losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct LossStats {
    pub average: f64,
    pub std_dev: f64,
}

impl LossStats {
    /// Classify one leg loss against these statistics.
    ///
    /// With zero variance (one or zero positive losses, or all equal) every
    /// loss classifies as [`LossSeverity::None`]; there is no pattern to
    /// deviate from.
    pub fn classify(&self, loss: Seconds) -> LossSeverity {
        if self.std_dev == 0.0 {
            return LossSeverity::None;
        }
        let deviation = (f64::from(loss) - self.average) / self.std_dev;
        if deviation >= CRITICAL_SIGMA {
            LossSeverity::Critical
        } else if deviation >= MAJOR_SIGMA {
            LossSeverity::Major
        } else if deviation >= SIGNIFICANT_SIGMA {
            LossSeverity::Significant
        } else {
            LossSeverity::None
        }
    }
}

/// Compute loss statistics over one competitor's leg figures.
pub fn loss_stats(legs: &[LegFigures]) -> LossStats {
    let losses: Vec<f64> =
        legs.iter().filter_map(|f| f.leg_loss).filter(|&l| l > 0).map(f64::from).collect();
    if losses.is_empty() {
        return LossStats::default();
    }

    let count = losses.len() as f64;
    let average = losses.iter().sum::<f64>() / count;
    let variance = losses.iter().map(|l| (l - average).powi(2)).sum::<f64>() / count;
    LossStats { average, std_dev: variance.sqrt() }
}
