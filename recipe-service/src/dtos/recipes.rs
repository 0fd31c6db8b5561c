use serde::{Deserialize, Serialize};

/// Body of a successful recipe generation call.
///
/// The text is relayed from the model verbatim; title, ingredients and
/// instructions are prompt-level instructions to the model, not a parsed
/// contract.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe: String,
}
