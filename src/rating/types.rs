pub type TeamId = i64;
pub type FixtureId = i64;
pub type RatingValue = f64;

/// Independent skill dimensions, each with its own Elo-style rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Goal,
    Winner,
    TotalShots,
    BallPossession,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Goal,
        Dimension::Winner,
        Dimension::TotalShots,
        Dimension::BallPossession,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Dimension::Goal => "goalElo",
            Dimension::Winner => "winnerElo",
            Dimension::TotalShots => "totalShotsElo",
            Dimension::BallPossession => "ballPossessionElo",
        }
    }

    /// Statistic backing this dimension, if it comes from the observation records
    pub fn metric(&self) -> Option<Metric> {
        match self {
            Dimension::TotalShots => Some(Metric::TotalShots),
            Dimension::BallPossession => Some(Metric::BallPossession),
            Dimension::Goal | Dimension::Winner => None,
        }
    }
}

/// In-match statistics recorded per (fixture, team)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalShots,
    BallPossession,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::TotalShots, Metric::BallPossession];

    pub fn as_str(&self) -> &str {
        match self {
            Metric::TotalShots => "totalShots",
            Metric::BallPossession => "ballPossession",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Metric::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// One value per tracked dimension, addressed through `Dimension`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerDimension<T> {
    pub goal: T,
    pub winner: T,
    pub total_shots: T,
    pub ball_possession: T,
}

impl<T: Copy> PerDimension<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            goal: value,
            winner: value,
            total_shots: value,
            ball_possession: value,
        }
    }

    pub fn get(&self, dimension: Dimension) -> T {
        match dimension {
            Dimension::Goal => self.goal,
            Dimension::Winner => self.winner,
            Dimension::TotalShots => self.total_shots,
            Dimension::BallPossession => self.ball_possession,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: T) {
        match dimension {
            Dimension::Goal => self.goal = value,
            Dimension::Winner => self.winner = value,
            Dimension::TotalShots => self.total_shots = value,
            Dimension::BallPossession => self.ball_possession = value,
        }
    }
}

pub type DimensionRatings = PerDimension<RatingValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRatings {
    pub team_id: TeamId,
    pub ratings: DimensionRatings,
}

/// One side of a completed match as seen by the rating engine
#[derive(Debug, Clone, PartialEq)]
pub struct SideRecord {
    pub team_id: TeamId,
    pub goals: Option<u32>,
    pub total_shots: Option<f64>,
    pub ball_possession: Option<f64>,
}

impl SideRecord {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            goals: None,
            total_shots: None,
            ball_possession: None,
        }
    }

    /// Raw value feeding the given dimension. `Winner` has no raw value.
    pub fn raw_value(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Goal => self.goals.map(f64::from),
            Dimension::TotalShots => self.total_shots,
            Dimension::BallPossession => self.ball_possession,
            Dimension::Winner => None,
        }
    }
}

/// A fixture joined with both sides' statistics
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub fixture_id: FixtureId,
    pub timestamp: i64,
    pub home: SideRecord,
    pub away: SideRecord,
}

/// How a level score is encoded for the winner dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPolicy {
    /// Both sides score 0.5
    Split,
    /// Draws count as an away win
    AwayWin,
}
