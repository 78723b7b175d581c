/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub position: usize,
    pub user_id: i64,
    pub username: Option<String>,
    pub balance: i64,
}

/// Top users by balance, plus the requester's rank when they are not listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    /// 1-based rank of the requester; `None` when listed in `entries` or unknown.
    pub requester_position: Option<usize>,
    pub total_users: usize,
}
