use crate::{
    error::{MarkitError, Result},
    generator::MarketingGenerator,
    models::{GenerationParams, GenerationResult, PackageTier},
    order::OrderId,
};
use serde::Serialize;

/// Where a submit-generate-display cycle currently is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Submitting,
    Success {
        order_id: OrderId,
        package_tier: PackageTier,
        images: Vec<String>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting)
    }

    /// Clears the previous outcome. Refused while a generation is in flight.
    pub fn begin(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(MarkitError::GenerationInProgress);
        }
        self.state = SessionState::Submitting;
        Ok(())
    }

    pub fn finish(&mut self, outcome: Result<GenerationResult>) -> &SessionState {
        self.state = match outcome {
            Ok(result) => {
                let order_id = OrderId::generate();
                log::info!("Order {} ready with {} preview(s)", order_id, result.len());
                SessionState::Success {
                    order_id,
                    package_tier: result.package_tier,
                    images: result.images,
                }
            }
            Err(e) => {
                log::warn!("Generation failed: {}", e);
                SessionState::Failed {
                    message: e.to_string(),
                }
            }
        };
        &self.state
    }

    /// One full cycle: validate, generate, record the outcome.
    pub async fn run(
        &mut self,
        generator: &MarketingGenerator,
        params: &GenerationParams,
    ) -> Result<&SessionState> {
        self.begin()?;
        let outcome = match params.validate() {
            Ok(()) => generator.generate(params).await,
            Err(e) => Err(e),
        };
        Ok(self.finish(outcome))
    }
}
