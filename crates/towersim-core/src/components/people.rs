//! People-related components: Needs, VisitorInfo, Satisfaction, EmploymentInfo.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound of every need and of the satisfaction score
pub const MAX_LEVEL: f32 = 100.0;

/// Need growth per second before archetype modifiers:
/// hunger, entertainment, comfort, shopping
const BASE_GROWTH: [f32; 4] = [0.8, 0.6, 0.4, 0.5];

/// Kinds of need a visitor can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedKind {
    Hunger,
    Entertainment,
    Comfort,
    Shopping,
}

impl NeedKind {
    pub const ALL: [NeedKind; 4] = [
        NeedKind::Hunger,
        NeedKind::Entertainment,
        NeedKind::Comfort,
        NeedKind::Shopping,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NeedKind::Hunger => "Hungry",
            NeedKind::Entertainment => "Bored",
            NeedKind::Comfort => "Tired",
            NeedKind::Shopping => "Wants to shop",
        }
    }
}

/// Visitor archetype, fixed at creation. Biases how fast each need grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    BusinessPerson,
    Tourist,
    Shopper,
    Casual,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::BusinessPerson,
        Archetype::Tourist,
        Archetype::Shopper,
        Archetype::Casual,
    ];

    /// Growth multipliers in [`NeedKind::ALL`] order
    pub fn growth_multipliers(&self) -> [f32; 4] {
        match self {
            Archetype::BusinessPerson => [1.2, 0.6, 1.0, 0.5],
            Archetype::Tourist => [1.0, 1.5, 1.2, 0.8],
            Archetype::Shopper => [0.9, 0.8, 0.8, 1.8],
            Archetype::Casual => [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Desire levels that drive visitor behavior - 0 (satisfied) to 100 (desperate)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Needs {
    pub hunger: f32,
    pub entertainment: f32,
    pub comfort: f32,
    pub shopping: f32,
    pub archetype: Archetype,
}

impl Needs {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            hunger: 0.0,
            entertainment: 0.0,
            comfort: 0.0,
            shopping: 0.0,
            archetype,
        }
    }

    /// Needs with each level drawn from [0, 50)
    pub fn random(archetype: Archetype, rng: &mut impl Rng) -> Self {
        Self {
            hunger: rng.gen_range(0.0..50.0),
            entertainment: rng.gen_range(0.0..50.0),
            comfort: rng.gen_range(0.0..50.0),
            shopping: rng.gen_range(0.0..50.0),
            archetype,
        }
    }

    pub fn get(&self, kind: NeedKind) -> f32 {
        match kind {
            NeedKind::Hunger => self.hunger,
            NeedKind::Entertainment => self.entertainment,
            NeedKind::Comfort => self.comfort,
            NeedKind::Shopping => self.shopping,
        }
    }

    fn slot(&mut self, kind: NeedKind) -> &mut f32 {
        match kind {
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Entertainment => &mut self.entertainment,
            NeedKind::Comfort => &mut self.comfort,
            NeedKind::Shopping => &mut self.shopping,
        }
    }

    /// Needs grow toward 100 over time
    pub fn grow(&mut self, seconds: f32) {
        let multipliers = self.archetype.growth_multipliers();
        for (i, kind) in NeedKind::ALL.into_iter().enumerate() {
            let value = self.slot(kind);
            *value = (*value + BASE_GROWTH[i] * multipliers[i] * seconds).clamp(0.0, MAX_LEVEL);
        }
    }

    /// Lower a need, clamped to [0, 100]
    pub fn reduce(&mut self, kind: NeedKind, amount: f32) {
        let value = self.slot(kind);
        *value = (*value - amount).clamp(0.0, MAX_LEVEL);
    }

    /// The largest need and its kind. Ties go to the earlier kind in [`NeedKind::ALL`].
    pub fn highest(&self) -> (NeedKind, f32) {
        let mut best = (NeedKind::Hunger, self.hunger);
        for kind in NeedKind::ALL.into_iter().skip(1) {
            let value = self.get(kind);
            if value > best.1 {
                best = (kind, value);
            }
        }
        best
    }

    pub fn highest_value(&self) -> f32 {
        self.highest().1
    }

    pub fn highest_kind(&self) -> NeedKind {
        self.highest().0
    }

    pub fn average(&self) -> f32 {
        (self.hunger + self.entertainment + self.comfort + self.shopping) / 4.0
    }
}

/// What a visitor is currently trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitorActivity {
    Visiting,
    Shopping,
    JobSeeking,
    Leaving,
}

impl VisitorActivity {
    /// Leaving and job-seeking visitors don't pick destinations or interact
    pub fn is_engaged_elsewhere(&self) -> bool {
        matches!(self, VisitorActivity::Leaving | VisitorActivity::JobSeeking)
    }
}

/// Visitor role state. Exists only while the actor behaves as a visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorInfo {
    pub activity: VisitorActivity,
    pub is_interacting: bool,
    /// Seconds spent in the current interaction window
    pub interaction_time: f32,
    /// Length of the current interaction window; 0 until one starts at this destination
    pub required_interaction_time: f32,
    pub time_at_destination: f32,
    pub target_facility_floor: Option<i32>,
    /// Seconds since the visitor entered the tower
    pub visit_duration: f32,
}

impl VisitorInfo {
    pub fn new(activity: VisitorActivity) -> Self {
        Self {
            activity,
            is_interacting: false,
            interaction_time: 0.0,
            required_interaction_time: 0.0,
            time_at_destination: 0.0,
            target_facility_floor: None,
            visit_duration: 0.0,
        }
    }

    /// Forget any interaction at the previous destination
    pub fn reset_interaction(&mut self) {
        self.is_interacting = false;
        self.interaction_time = 0.0;
        self.required_interaction_time = 0.0;
        self.time_at_destination = 0.0;
    }

    pub fn is_leaving(&self) -> bool {
        self.activity == VisitorActivity::Leaving
    }
}

/// Smoothed happiness score derived from needs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Satisfaction {
    pub score: f32,
    pub wait_time_penalty: f32,
}

impl Satisfaction {
    pub fn new(score: f32) -> Self {
        Self {
            score: score.clamp(0.0, MAX_LEVEL),
            wait_time_penalty: 0.0,
        }
    }

    /// Move a fraction of the way toward `target`, staying within [0, 100]
    pub fn approach(&mut self, target: f32, rate: f32) {
        self.score = (self.score + (target - self.score) * rate).clamp(0.0, MAX_LEVEL);
    }
}

impl Default for Satisfaction {
    fn default() -> Self {
        Self::new(75.0)
    }
}

/// Employment record, attached exactly once when a job seeker is hired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentInfo {
    pub job_title: String,
    pub workplace_floor: i32,
    pub workplace_column: f32,
    pub shift_start_hour: u32,
    pub shift_end_hour: u32,
    pub currently_on_shift: bool,
}

impl EmploymentInfo {
    /// Whether the shift covers `hour` (0-24). Shifts may wrap past midnight.
    pub fn covers_hour(&self, hour: f32) -> bool {
        let hour = hour.rem_euclid(24.0);
        let start = self.shift_start_hour as f32;
        let end = self.shift_end_hour as f32;
        if start <= end {
            (start..end).contains(&hour)
        } else {
            hour >= start || hour < end
        }
    }
}

/// Marker for an off-duty employee temporarily wandering the tower as a visitor
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OffDutyOuting;
