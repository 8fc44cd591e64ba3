//! LLM-backed narrative renderer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;
use crate::port::outbound::narrative::{InsightPayload, NarrativeRenderer};

const INSTRUCTION: &str = "당신은 소매업체의 현장 관리 전문가이자 데이터 분석가입니다. \
아래 JSON은 한 매장과 매출이 비슷한 매장들의 비교 데이터입니다(금액 단위: 원, 매출은 만원). \
아이템별 판매 현황, 재고 관리, 개선 전략의 세 관점으로 분석하고, \
각 섹션은 【】 표시로 구분하며 구체적인 수치와 퍼센트를 포함해 500-600자 내외로 작성하세요.";

/// Writes insights by prompting an [`Llm`] with the serialized payload.
pub struct LlmNarrator {
    llm: Arc<dyn Llm>,
}

impl LlmNarrator {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Prompt text for a payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn prompt(payload: &InsightPayload) -> Result<String> {
        let data = serde_json::to_string(payload)?;
        Ok(format!("{INSTRUCTION}\n\n{data}"))
    }
}

#[async_trait]
impl NarrativeRenderer for LlmNarrator {
    fn name(&self) -> &'static str {
        self.llm.name()
    }

    async fn render(&self, payload: &InsightPayload) -> Result<String> {
        let prompt = Self::prompt(payload)?;
        debug!(store = %payload.store_name, chars = prompt.len(), provider = self.llm.name(), "requesting narrative");
        let text = self.llm.complete(&prompt).await?;
        if text.trim().is_empty() {
            return Err(Error::EmptyResponse(self.llm.name().into()));
        }
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::llm::mock::MockLlm;
    use crate::domain::metrics::ComparisonOutcome;
    use crate::domain::peer::PeerOutcome;
    use crate::domain::period::Period;

    fn payload() -> InsightPayload {
        InsightPayload::new(
            "ST-001".into(),
            "롯데본점",
            Period::parse("202512").unwrap(),
            1000,
            &PeerOutcome::NoBaseline,
            ComparisonOutcome::NoComparison,
        )
    }

    #[test]
    fn prompt_embeds_payload_json() {
        let prompt = LlmNarrator::prompt(&payload()).unwrap();
        assert!(prompt.contains("\"store_name\":\"롯데본점\""));
        assert!(prompt.contains("\"period\":\"202512\""));
        assert!(prompt.contains("no_comparison"));
    }

    #[tokio::test]
    async fn blank_reply_is_error() {
        let narrator = LlmNarrator::new(Arc::new(MockLlm::replying("  \n")));
        let err = narrator.render(&payload()).await.unwrap_err();
        assert!(matches!(err, Error::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn reply_is_trimmed() {
        let narrator = LlmNarrator::new(Arc::new(MockLlm::replying("\n【분석】 좋음\n")));
        assert_eq!(narrator.render(&payload()).await.unwrap(), "【분석】 좋음");
        assert_eq!(narrator.name(), "mock");
    }
}
