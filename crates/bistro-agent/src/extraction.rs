//! Party-size extraction tiers.
//!
//! - **Rules**: `QuantityExtractor`, no network.
//! - **Generator**: asks the text generator for `{"people": <int|null>}`.
//! - **Tiered**: rules first, generator only when the rules find nothing.
//!
//! Malformed generator output is recovered locally as "unknown" (`None`);
//! only a failed generator call is an error.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use bistro_protocol::ChatMessage;

use crate::error::AssistantResult;
use crate::llm::TextGenerator;
use crate::prompts;
use crate::quantity::QuantityExtractor;

/// Which extraction tier the orchestrator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    Rules,
    #[default]
    Generator,
    Tiered,
}

/// Produces a party size from free text.
#[async_trait]
pub trait PartySizeExtractor: Send + Sync {
    /// `Ok(None)` means the quantity is unknown.
    async fn extract(&self, text: &str) -> AssistantResult<Option<u32>>;

    /// Name of this tier (for logging).
    fn tier_name(&self) -> &str;
}

/// Build the extractor selected by `mode`.
pub fn build_extractor(
    mode: ExtractionMode,
    generator: Arc<dyn TextGenerator>,
) -> Box<dyn PartySizeExtractor> {
    match mode {
        ExtractionMode::Rules => Box::new(RuleExtractor::new()),
        ExtractionMode::Generator => Box::new(GeneratorExtractor::new(generator)),
        ExtractionMode::Tiered => Box::new(TieredExtractor::new(
            Box::new(RuleExtractor::new()),
            Box::new(GeneratorExtractor::new(generator)),
        )),
    }
}

pub struct RuleExtractor {
    quantity: QuantityExtractor,
}

impl RuleExtractor {
    pub fn new() -> Self {
        Self {
            quantity: QuantityExtractor::new(),
        }
    }
}

impl Default for RuleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PartySizeExtractor for RuleExtractor {
    async fn extract(&self, text: &str) -> AssistantResult<Option<u32>> {
        Ok(self.quantity.extract(text))
    }

    fn tier_name(&self) -> &str {
        "rules"
    }
}

/// Delegates extraction to the text generator with a strict JSON prompt.
pub struct GeneratorExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl GeneratorExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl PartySizeExtractor for GeneratorExtractor {
    async fn extract(&self, text: &str) -> AssistantResult<Option<u32>> {
        let messages = [
            ChatMessage::system(prompts::EXTRACTION_DIRECTIVE),
            ChatMessage::user(text),
        ];
        let raw = self.generator.generate_json(&messages).await?;
        let people = parse_people(&raw);
        if people.is_none() {
            tracing::debug!(raw = %raw, "generator extraction gave no usable party size");
        }
        Ok(people)
    }

    fn tier_name(&self) -> &str {
        "generator"
    }
}

/// Composite extractor that tries the local rules first, then the generator.
pub struct TieredExtractor {
    local: Box<dyn PartySizeExtractor>,
    remote: Box<dyn PartySizeExtractor>,
}

impl TieredExtractor {
    pub fn new(local: Box<dyn PartySizeExtractor>, remote: Box<dyn PartySizeExtractor>) -> Self {
        Self { local, remote }
    }
}

#[async_trait]
impl PartySizeExtractor for TieredExtractor {
    async fn extract(&self, text: &str) -> AssistantResult<Option<u32>> {
        if let Some(n) = self.local.extract(text).await? {
            return Ok(Some(n));
        }

        tracing::debug!(
            local = self.local.tier_name(),
            remote = self.remote.tier_name(),
            "local extraction missed, falling back"
        );
        self.remote.extract(text).await
    }

    fn tier_name(&self) -> &str {
        "tiered"
    }
}

#[derive(Deserialize)]
struct PeopleReply {
    #[serde(default)]
    people: Option<serde_json::Value>,
}

/// Read `{"people": <int|null>}`. Anything else is `None`.
///
/// A whole-valued float such as `4.0` is read as the integer.
fn parse_people(raw: &str) -> Option<u32> {
    let reply: PeopleReply = match serde_json::from_str(raw.trim()) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "extraction output is not the expected JSON object");
            return None;
        }
    };
    let people = reply.people?;
    let n = match people.as_u64() {
        Some(n) => n,
        // Models sometimes answer `4.0`; only whole numbers count.
        None => people
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))? as u64,
    };
    u32::try_from(n).ok().filter(|n| *n > 0)
}
