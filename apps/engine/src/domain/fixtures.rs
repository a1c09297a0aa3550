use super::cards_types::CardId;

/// Centralized helper for parsing hardcoded card tokens in fixtures and tests.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse hardcoded card id tokens (e.g., `["c_11", "t_3"]`).
    ///
    /// Only for tokens known to be valid; panics otherwise.
    pub fn parse_hardcoded(tokens: &[&str]) -> Vec<CardId> {
        tokens
            .iter()
            .map(|s| {
                #[allow(clippy::expect_used)]
                s.parse::<CardId>().expect("hardcoded valid card token")
            })
            .collect()
    }

    pub fn one(token: &str) -> CardId {
        #[allow(clippy::expect_used)]
        token.parse::<CardId>().expect("hardcoded valid card token")
    }
}
