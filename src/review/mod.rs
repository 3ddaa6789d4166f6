//! Interactive review of generated commit messages.

pub mod state;
pub mod terminal;

pub use state::{Phase, ReviewLoop, ReviewOutcome, ReviewState, Transition};
pub use terminal::{DialoguerTerminal, ReviewAction, Terminal};

use crate::error::GenerateError;
use crate::llm::{GenerationRequest, MessageGenerator};
use crate::output::Console;

/// Make one generation call, announcing it on the console first.
///
/// Used for every entry into the generating state, and on its own in
/// print-only mode where no review follows.
pub async fn generate_message<G: MessageGenerator + ?Sized>(
    generator: &G,
    console: &Console,
    request: &GenerationRequest,
) -> Result<String, GenerateError> {
    console.info(&format!(
        "Generating commit message using {}...",
        request.model
    ));
    generator.generate(request).await
}
