use super::window::RankRange;

/// Build the ranking URL for a page: `{base}#{rank_start},{region},{game_type}`
pub fn build_ranking_url(base_url: &str, page: u32, region: &str, game_type: u8) -> String {
    let rank_start = RankRange::for_page(page).start;
    format!(
        "{}#{},{},{}",
        base_url,
        rank_start,
        encode_region(region),
        game_type
    )
}

fn encode_region(region: &str) -> String {
    urlencoding::encode(region.trim()).into_owned()
}
