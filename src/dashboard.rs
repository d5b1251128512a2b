//! Dashboard KPI data.
//!
//! The dashboard shows static figures per reporting period. The numbers
//! are the mock series the web console shipped with; the backend does not
//! yet expose an aggregate endpoint.

/// Reporting period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Monthly, Period::Quarterly, Period::Yearly];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Monthly => "Monthly",
            Period::Quarterly => "Quarterly",
            Period::Yearly => "Yearly",
        }
    }

    pub fn next(&self) -> Period {
        match self {
            Period::Monthly => Period::Quarterly,
            Period::Quarterly => Period::Yearly,
            Period::Yearly => Period::Monthly,
        }
    }
}

/// Direction of change versus the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: &'static str,
    pub trend: Trend,
}

/// The four headline cards for a period.
pub fn kpi_cards(period: Period) -> [KpiCard; 4] {
    match period {
        Period::Monthly => [
            KpiCard { title: "Fleet Operations", value: "147", trend: Trend::Up },
            KpiCard { title: "Inspection Queue", value: "23", trend: Trend::Up },
            KpiCard { title: "Hull Assessments", value: "12", trend: Trend::Up },
            KpiCard { title: "Critical Alerts", value: "7", trend: Trend::Down },
        ],
        Period::Quarterly => [
            KpiCard { title: "Fleet Operations", value: "152", trend: Trend::Up },
            KpiCard { title: "Inspection Queue", value: "45", trend: Trend::Up },
            KpiCard { title: "Hull Assessments", value: "67", trend: Trend::Up },
            KpiCard { title: "Critical Alerts", value: "15", trend: Trend::Down },
        ],
        Period::Yearly => [
            KpiCard { title: "Fleet Operations", value: "165", trend: Trend::Up },
            KpiCard { title: "Inspection Queue", value: "89", trend: Trend::Up },
            KpiCard { title: "Hull Assessments", value: "203", trend: Trend::Up },
            KpiCard { title: "Critical Alerts", value: "31", trend: Trend::Down },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_period_has_four_cards() {
        for period in Period::ALL {
            let cards = kpi_cards(period);
            assert_eq!(cards.len(), 4);
            assert_eq!(cards[0].title, "Fleet Operations");
            assert_eq!(cards[3].trend, Trend::Down);
        }
    }

    #[test]
    fn test_period_cycles() {
        assert_eq!(Period::Monthly.next(), Period::Quarterly);
        assert_eq!(Period::Quarterly.next(), Period::Yearly);
        assert_eq!(Period::Yearly.next(), Period::Monthly);
    }
}
