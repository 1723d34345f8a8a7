/// One language of one repository, as reported by GitHub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLanguageEdge {
    /// Bytes of this language in the repository.
    pub size: u64,
    pub name: String,
    /// Hex colour assigned by GitHub; some languages have none.
    pub color: Option<String>,
}

/// Languages of a single repository, largest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepositoryLanguages {
    pub edges: Vec<RawLanguageEdge>,
}

/// Everything the card needs from GitHub for one user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserStats {
    /// Commit contributions over the API's default window (one year).
    pub commits: u64,
    pub pull_requests: u64,
    pub repositories: Vec<RepositoryLanguages>,
}

/// A language selected for display on the card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopLanguage {
    pub name: String,
    pub color: String,
    /// Share of the total aggregated size, rounded, 0 to 100.
    pub percent: u8,
    pub size: u64,
    pub icon_url: String,
}
