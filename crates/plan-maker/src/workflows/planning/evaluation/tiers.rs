/// Which side of a threshold earns its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    /// `value >= threshold`; tiers listed from highest threshold to lowest.
    AtLeast,
    /// `value <= threshold`; tiers listed from lowest threshold to highest.
    AtMost,
}

/// Ordered `(threshold, points)` lookup; the first tier the value satisfies wins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TierTable {
    pub bound: Bound,
    pub tiers: &'static [(f64, f64)],
    /// Points when no tier matches.
    pub floor: f64,
}

impl TierTable {
    pub(crate) const fn at_least(tiers: &'static [(f64, f64)], floor: f64) -> Self {
        Self {
            bound: Bound::AtLeast,
            tiers,
            floor,
        }
    }

    pub(crate) const fn at_most(tiers: &'static [(f64, f64)], floor: f64) -> Self {
        Self {
            bound: Bound::AtMost,
            tiers,
            floor,
        }
    }

    pub(crate) fn points(&self, value: f64) -> f64 {
        self.tiers
            .iter()
            .find(|(threshold, _)| match self.bound {
                Bound::AtLeast => value >= *threshold,
                Bound::AtMost => value <= *threshold,
            })
            .map(|(_, points)| *points)
            .unwrap_or(self.floor)
    }

    /// Largest contribution this table can award.
    pub(crate) fn ceiling(&self) -> f64 {
        self.tiers
            .iter()
            .map(|(_, points)| *points)
            .fold(self.floor, f64::max)
    }
}

pub(crate) const GROWTH_RATE: TierTable =
    TierTable::at_least(&[(30.0, 20.0), (20.0, 15.0), (10.0, 10.0)], 5.0);

pub(crate) const BREAK_EVEN_MONTHS: TierTable =
    TierTable::at_most(&[(18.0, 15.0), (24.0, 12.0), (36.0, 8.0)], 3.0);

pub(crate) const LTV_CAC_RATIO: TierTable = TierTable::at_least(
    &[(5.0, 20.0), (4.0, 17.0), (3.0, 13.0), (2.0, 8.0)],
    3.0,
);

/// ROI in percent.
pub(crate) const RETURN_ON_INVESTMENT: TierTable = TierTable::at_least(
    &[(500.0, 15.0), (300.0, 12.0), (200.0, 9.0), (100.0, 5.0)],
    2.0,
);

pub(crate) const TEAM_SIZE: TierTable = TierTable::at_least(&[(5.0, 10.0), (3.0, 7.0)], 3.0);

pub(crate) const YEAR5_REVENUE: TierTable = TierTable::at_least(
    &[
        (100_000_000.0, 25.0),
        (50_000_000.0, 22.0),
        (10_000_000.0, 18.0),
        (1_000_000.0, 12.0),
    ],
    5.0,
);

pub(crate) const PROFIT_MARGIN: TierTable = TierTable::at_least(
    &[(40.0, 20.0), (30.0, 17.0), (20.0, 13.0), (10.0, 8.0)],
    3.0,
);

pub(crate) const REVENUE_GROWTH: TierTable = TierTable::at_least(
    &[(20.0, 20.0), (10.0, 17.0), (5.0, 13.0), (2.0, 8.0)],
    3.0,
);

/// Market size in billions.
pub(crate) const MARKET_SIZE: TierTable = TierTable::at_least(
    &[(500.0, 20.0), (100.0, 17.0), (50.0, 13.0), (10.0, 8.0)],
    3.0,
);

pub(crate) const GROWTH_POTENTIAL: TierTable =
    TierTable::at_least(&[(50.0, 15.0), (20.0, 12.0), (10.0, 8.0)], 3.0);

pub(crate) const PROBLEM_LENGTH: TierTable =
    TierTable::at_least(&[(200.0, 15.0), (100.0, 10.0)], 5.0);

pub(crate) const SUCCESS_FACTORS: TierTable =
    TierTable::at_least(&[(4.0, 15.0), (3.0, 10.0)], 5.0);

pub(crate) const REASONING_LENGTH: TierTable =
    TierTable::at_least(&[(200.0, 15.0), (100.0, 10.0), (50.0, 5.0)], 0.0);
