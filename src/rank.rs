/// Weight of a pull request relative to a single commit.
const PULL_REQUEST_WEIGHT: u64 = 5;

/// Coarse activity tier shown in the card badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    C,
    B,
    A,
    S,
    SPlus,
}

impl Rank {
    /// Minimum score per tier, highest first.
    const THRESHOLDS: [(u64, Rank); 4] = [
        (2000, Rank::SPlus),
        (1000, Rank::S),
        (500, Rank::A),
        (200, Rank::B),
    ];

    pub fn from_score(score: u64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::C)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SPlus => "S+",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Rank::C => "#8be9fd",
            Rank::B => "#f1fa8c",
            Rank::A => "#50fa7b",
            Rank::S => "#00f0ff",
            Rank::SPlus => "#ff00d4",
        }
    }

    pub fn shadow_color(self) -> &'static str {
        self.color()
    }
}

/// Badge data derived from a user's activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankResult {
    pub rank: Rank,
    pub label: &'static str,
    pub color: &'static str,
    pub shadow_color: &'static str,
}

pub fn score(commits: u64, pull_requests: u64) -> u64 {
    commits.saturating_add(pull_requests.saturating_mul(PULL_REQUEST_WEIGHT))
}

pub fn calculate_rank(commits: u64, pull_requests: u64) -> RankResult {
    let rank = Rank::from_score(score(commits, pull_requests));
    RankResult {
        rank,
        label: rank.label(),
        color: rank.color(),
        shadow_color: rank.shadow_color(),
    }
}
