use crate::card::{self, CardData};
use crate::config::AppConfig;
use crate::error::CardError;
use crate::github::StatsSource;
use crate::languages;
use crate::rank;

/// Fetches the user's stats from GitHub and renders the card.
///
/// Credentials are checked before anything else, so a misconfigured service never reaches
/// the network.
pub async fn fetch_and_render_card(
    source: &dyn StatsSource,
    config: &AppConfig,
) -> Result<String, CardError> {
    let credentials = config.credentials()?;

    let stats = source.fetch_user_stats(credentials.username).await?;

    let summary = languages::top_languages(&stats.repositories);
    let rank = rank::calculate_rank(stats.commits, stats.pull_requests);

    tracing::debug!(
        login = credentials.username,
        commits = stats.commits,
        pull_requests = stats.pull_requests,
        rank = rank.label,
        languages = summary.top.len(),
        total_size = summary.total_size,
        "Rendering stats card"
    );

    let display_name = config.header_name(credentials.username);
    card::render_card(&CardData {
        display_name: &display_name,
        subtitle: &config.subtitle,
        rank,
        commits: stats.commits,
        pull_requests: stats.pull_requests,
        languages: &summary.top,
    })
}
