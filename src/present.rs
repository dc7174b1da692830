//! Turns a raw price into what the page shows: headline text, a gauge and an
//! echo of the inputs.

use serde::Serialize;

use crate::features::REFERENCE_YEAR;
use crate::types::CarInputs;

pub const GAUGE_TITLE: &str = "Price Range (in Lakhs)";
pub const GAUGE_MIN: f64 = 0.0;
pub const GAUGE_MAX: f64 = 50.0;

pub fn price_text(price: f64) -> String {
    format!("₹{:.2} Lakhs", price)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Low,
    Mid,
    High,
}

impl GaugeBand {
    pub const ALL: [GaugeBand; 3] = [GaugeBand::Low, GaugeBand::Mid, GaugeBand::High];

    /// `[lo, hi)` in Lakhs; the last band is closed at the axis end.
    pub fn range(self) -> (f64, f64) {
        match self {
            GaugeBand::Low => (0.0, 10.0),
            GaugeBand::Mid => (10.0, 25.0),
            GaugeBand::High => (25.0, GAUGE_MAX),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            GaugeBand::Low => "lightgray",
            GaugeBand::Mid => "gray",
            GaugeBand::High => "darkgray",
        }
    }

    pub fn of(needle: f64) -> Self {
        if needle < 10.0 {
            GaugeBand::Low
        } else if needle < 25.0 {
            GaugeBand::Mid
        } else {
            GaugeBand::High
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GaugeStep {
    pub band: GaugeBand,
    pub range: (f64, f64),
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Gauge {
    pub title: &'static str,
    pub axis: (f64, f64),
    /// Unclamped prediction, shown as the gauge number.
    pub value: f64,
    /// Needle position, pinned to the axis.
    pub needle: f64,
    pub band: GaugeBand,
    pub steps: Vec<GaugeStep>,
}

impl Gauge {
    pub fn new(value: f64) -> Self {
        let needle = value.clamp(GAUGE_MIN, GAUGE_MAX);
        Self {
            title: GAUGE_TITLE,
            axis: (GAUGE_MIN, GAUGE_MAX),
            value,
            needle,
            band: GaugeBand::of(needle),
            steps: GaugeBand::ALL
                .into_iter()
                .map(|band| GaugeStep { band, range: band.range(), color: band.color() })
                .collect(),
        }
    }
}

/// Input echo, grouped the way the form groups its widgets.
#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub car_details: Vec<String>,
    pub additional_features: Vec<String>,
}

impl InputSummary {
    pub fn new(inputs: &CarInputs) -> Self {
        Self {
            car_details: vec![
                format!("Year: {}", inputs.year),
                format!("Present Price: ₹{:?} Lakhs", inputs.present_price),
                format!("Kilometers Driven: {} km", group_thousands(inputs.driven_kms)),
                format!("Fuel Type: {}", inputs.fuel_type),
                format!("Owner: {}", inputs.owner),
            ],
            additional_features: vec![
                format!("Selling Type: {}", inputs.selling_type),
                format!("Transmission: {}", inputs.transmission),
                format!("Car Age: {} years", REFERENCE_YEAR - inputs.year),
            ],
        }
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FuelType, SellingType, Transmission};

    #[test]
    fn price_text_has_two_decimals() {
        assert_eq!(price_text(7.35), "₹7.35 Lakhs");
        assert_eq!(price_text(12.0), "₹12.00 Lakhs");
        assert_eq!(price_text(-0.456), "₹-0.46 Lakhs");
    }

    #[test]
    fn gauge_bands() {
        assert_eq!(Gauge::new(7.35).band, GaugeBand::Low);
        assert_eq!(Gauge::new(10.0).band, GaugeBand::Mid);
        assert_eq!(Gauge::new(24.99).band, GaugeBand::Mid);
        assert_eq!(Gauge::new(25.0).band, GaugeBand::High);
        assert_eq!(Gauge::new(50.0).band, GaugeBand::High);
    }

    #[test]
    fn needle_is_pinned_to_axis() {
        let g = Gauge::new(63.2);
        assert_eq!(g.value, 63.2);
        assert_eq!(g.needle, 50.0);
        let g = Gauge::new(-1.5);
        assert_eq!(g.needle, 0.0);
        assert_eq!(g.band, GaugeBand::Low);
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(50_000), "50,000");
        assert_eq!(group_thousands(500_000), "500,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn summary_echoes_inputs() {
        let s = InputSummary::new(&CarInputs {
            year: 2020,
            present_price: 5.0,
            driven_kms: 50_000,
            fuel_type: FuelType::Cng,
            owner: 1,
            selling_type: SellingType::Dealer,
            transmission: Transmission::Automatic,
        });
        assert_eq!(s.car_details[1], "Present Price: ₹5.0 Lakhs");
        assert_eq!(s.car_details[2], "Kilometers Driven: 50,000 km");
        assert_eq!(s.car_details[3], "Fuel Type: CNG");
        assert_eq!(s.additional_features[0], "Selling Type: Dealer");
        assert_eq!(s.additional_features[2], "Car Age: 4 years");
    }
}
