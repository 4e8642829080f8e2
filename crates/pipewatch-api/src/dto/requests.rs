use serde::Deserialize;

/// Query parameters for the result-history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsQuery {
    /// How many of the most recent results to return. Defaults to 10.
    #[serde(default)]
    pub limit: Option<usize>,
}
