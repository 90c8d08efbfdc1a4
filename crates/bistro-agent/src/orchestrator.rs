//! Conversation orchestrator: one user utterance in, one phrased reply out.
//!
//! Routes by intent:
//! - reservation: party-size extraction, table lookup, factual intermediate
//!   text, then rephrasing by the generator
//! - anything else: a single compose request carrying the intent label
//!
//! Every outgoing sentence passes through the generator under the
//! rephrase-only directive. A turn makes at most two generator calls and
//! keeps no state between calls; the inventory is shared read-only.

use std::sync::Arc;

use bistro_protocol::{AssistantResponse, ChatMessage, Intent, ReservationDetails};
use bistro_tables::TableInventory;

use crate::error::AssistantResult;
use crate::extraction::{self, ExtractionMode, PartySizeExtractor};
use crate::intent::IntentClassifier;
use crate::llm::TextGenerator;
use crate::prompts;

pub struct Orchestrator {
    classifier: IntentClassifier,
    generator: Arc<dyn TextGenerator>,
    extractor: Box<dyn PartySizeExtractor>,
    inventory: Arc<TableInventory>,
}

impl Orchestrator {
    /// Build an orchestrator with the extraction tier selected by `mode`.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        inventory: Arc<TableInventory>,
        mode: ExtractionMode,
    ) -> Self {
        let extractor = extraction::build_extractor(mode, generator.clone());
        Self::with_extractor(generator, inventory, extractor)
    }

    pub fn with_extractor(
        generator: Arc<dyn TextGenerator>,
        inventory: Arc<TableInventory>,
        extractor: Box<dyn PartySizeExtractor>,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            generator,
            extractor,
            inventory,
        }
    }

    pub fn inventory(&self) -> &TableInventory {
        &self.inventory
    }

    /// Handle one user utterance.
    ///
    /// Only a failed generator call is an error; an unclear party size
    /// turns into a clarification question.
    pub async fn handle(&self, user_text: &str) -> AssistantResult<AssistantResponse> {
        let intent = self.classifier.classify(user_text);
        tracing::debug!(intent = %intent, text = %user_text, "intent classified");

        if intent != Intent::Reservation {
            let assistant_text = self
                .phrase(prompts::compose_request(intent, user_text))
                .await?;
            tracing::info!(intent = %intent, "turn handled");
            return Ok(AssistantResponse {
                intent,
                assistant_text,
                reservation: None,
            });
        }

        let (intermediate, details) = self.plan_reservation(user_text).await?;
        let assistant_text = self
            .phrase(prompts::rephrase_request(&intermediate))
            .await?;

        Ok(AssistantResponse {
            intent,
            assistant_text,
            reservation: Some(details),
        })
    }

    /// Decide what to tell the user about their reservation request.
    async fn plan_reservation(
        &self,
        user_text: &str,
    ) -> AssistantResult<(String, ReservationDetails)> {
        let Some(party_size) = self.extractor.extract(user_text).await? else {
            tracing::info!(
                intent = %Intent::Reservation,
                tier = self.extractor.tier_name(),
                "party size unknown, asking"
            );
            let details = ReservationDetails {
                party_size: None,
                table_match: None,
            };
            return Ok((prompts::ASK_PARTY_SIZE.to_string(), details));
        };

        let result = self.inventory.find_table(party_size);
        tracing::info!(
            intent = %Intent::Reservation,
            tier = self.extractor.tier_name(),
            party_size,
            outcome = ?result.outcome,
            rationale = %result.rationale,
            "table lookup done"
        );

        let text = prompts::match_message(party_size, &result.outcome);
        let details = ReservationDetails {
            party_size: Some(party_size),
            table_match: Some(result),
        };
        Ok((text, details))
    }

    /// Send a user message to the generator under the rephrase directive.
    async fn phrase(&self, user_message: String) -> AssistantResult<String> {
        let messages = [
            ChatMessage::system(prompts::REPHRASE_DIRECTIVE),
            ChatMessage::user(user_message),
        ];
        self.generator.generate(&messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistantError;
    use crate::mock::ScriptedGenerator;
    use bistro_protocol::{ChatRole, MatchOutcome, Table, TableId};

    fn inventory(tables: Vec<Table>) -> Arc<TableInventory> {
        Arc::new(TableInventory::new(tables).unwrap())
    }

    fn orchestrator(
        generator: Arc<ScriptedGenerator>,
        tables: Vec<Table>,
        mode: ExtractionMode,
    ) -> Orchestrator {
        Orchestrator::new(generator, inventory(tables), mode)
    }

    #[tokio::test]
    async fn reservation_exact_match() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"people": 4}"#.into()),
            Ok("La table 2 peut vous accueillir. Souhaitez-vous confirmer ?".into()),
        ]));
        let orch = orchestrator(
            generator.clone(),
            vec![Table::new(1, 2, true), Table::new(2, 6, true)],
            ExtractionMode::Generator,
        );

        let resp = orch.handle("Je veux réserver une table pour 4").await.unwrap();
        assert_eq!(resp.intent, Intent::Reservation);
        assert_eq!(
            resp.assistant_text,
            "La table 2 peut vous accueillir. Souhaitez-vous confirmer ?"
        );

        let details = resp.reservation.unwrap();
        assert_eq!(details.party_size, Some(4));
        assert_eq!(
            details.table_match.unwrap().outcome,
            MatchOutcome::Exact(TableId(2))
        );

        let requests = generator.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].json);
        assert!(!requests[1].json);
        assert_eq!(requests[1].messages[0].role, ChatRole::System);
        assert_eq!(requests[1].messages[0].content, prompts::REPHRASE_DIRECTIVE);
        let rephrase = &requests[1].messages[1].content;
        assert!(rephrase.starts_with("Reformule ce texte"));
        assert!(rephrase.contains("la table 2"));
        assert!(rephrase.contains("Souhaitez-vous confirmer ?"));
    }

    #[tokio::test]
    async fn reservation_alternative() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"people": 4}"#.into()),
            Ok("ok".into()),
        ]));
        let orch = orchestrator(
            generator.clone(),
            vec![Table::new(1, 2, true)],
            ExtractionMode::Generator,
        );

        let resp = orch.handle("une table pour 4").await.unwrap();
        assert_eq!(
            resp.reservation.unwrap().table_match.unwrap().outcome,
            MatchOutcome::Alternative(TableId(1))
        );
        assert!(generator.requests()[1].messages[1]
            .content
            .contains("table alternative"));
    }

    #[tokio::test]
    async fn reservation_no_table() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"people": 4}"#.into()),
            Ok("Désolé.".into()),
        ]));
        let orch = orchestrator(
            generator.clone(),
            vec![Table::new(1, 6, false)],
            ExtractionMode::Generator,
        );

        let resp = orch.handle("une table pour 4").await.unwrap();
        assert_eq!(
            resp.reservation.unwrap().table_match.unwrap().outcome,
            MatchOutcome::None
        );
        assert!(generator.requests()[1].messages[1]
            .content
            .contains(prompts::NO_TABLE_AVAILABLE));
    }

    #[tokio::test]
    async fn malformed_extraction_asks_for_party_size() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("Je pense que 4 personnes".into()),
            Ok("Combien serez-vous ?".into()),
        ]));
        let orch = orchestrator(
            generator.clone(),
            vec![Table::new(1, 4, true)],
            ExtractionMode::Generator,
        );

        let resp = orch.handle("je voudrais réserver").await.unwrap();
        assert_eq!(resp.assistant_text, "Combien serez-vous ?");
        let details = resp.reservation.unwrap();
        assert_eq!(details.party_size, None);
        assert!(details.table_match.is_none());
        assert!(generator.requests()[1].messages[1]
            .content
            .contains(prompts::ASK_PARTY_SIZE));
    }

    #[tokio::test]
    async fn null_people_asks_for_party_size() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"people": null}"#.into()),
            Ok("Pour combien de personnes ?".into()),
        ]));
        let orch = orchestrator(generator, vec![], ExtractionMode::Generator);

        let resp = orch.handle("a table please").await.unwrap();
        assert_eq!(resp.reservation.unwrap().party_size, None);
    }

    #[tokio::test]
    async fn non_reservation_single_compose_call() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok(
            "Nous sommes ouverts de 12h à 23h.".into(),
        )]));
        let orch = orchestrator(generator.clone(), vec![], ExtractionMode::Generator);

        let resp = orch.handle("Quels sont vos horaires ?").await.unwrap();
        assert_eq!(resp.intent, Intent::Info);
        assert_eq!(resp.assistant_text, "Nous sommes ouverts de 12h à 23h.");
        assert!(resp.reservation.is_none());

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages[1].content,
            "Intent détecté : info. Demande du client : Quels sont vos horaires ?"
        );
    }

    #[tokio::test]
    async fn unknown_intent_is_composed_like_any_other() {
        let generator = Arc::new(ScriptedGenerator::always("Bonjour !"));
        let orch = orchestrator(generator.clone(), vec![], ExtractionMode::Generator);

        let resp = orch.handle("Bonjour").await.unwrap();
        assert_eq!(resp.intent, Intent::Unknown);
        assert!(generator.requests()[0].messages[1]
            .content
            .contains("Intent détecté : unknown"));
    }

    #[tokio::test]
    async fn rules_mode_makes_one_call() {
        let generator = Arc::new(ScriptedGenerator::always("ok"));
        let orch = orchestrator(
            generator.clone(),
            vec![Table::new(1, 4, true)],
            ExtractionMode::Rules,
        );

        let resp = orch.handle("une table pour deux").await.unwrap();
        assert_eq!(resp.reservation.unwrap().party_size, Some(2));
        assert_eq!(generator.requests().len(), 1);
    }

    #[tokio::test]
    async fn extraction_failure_propagates() {
        let generator = Arc::new(ScriptedGenerator::unavailable());
        let orch = orchestrator(generator, vec![], ExtractionMode::Generator);

        let err = orch.handle("une table pour 4").await.unwrap_err();
        assert!(matches!(err, AssistantError::GenerationUnavailable(_)));
    }

    #[tokio::test]
    async fn rephrase_failure_propagates() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"people": 2}"#.into()),
            Err(AssistantError::GenerationUnavailable("timeout".into())),
        ]));
        let orch = orchestrator(
            generator,
            vec![Table::new(1, 2, true)],
            ExtractionMode::Generator,
        );

        let err = orch.handle("une table pour 2").await.unwrap_err();
        assert!(matches!(err, AssistantError::GenerationUnavailable(_)));
    }

    #[tokio::test]
    async fn inventory_is_not_mutated_by_exact_match() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(r#"{"people": 2}"#.into()),
            Ok("ok".into()),
            Ok(r#"{"people": 2}"#.into()),
            Ok("ok".into()),
        ]));
        let orch = orchestrator(
            generator,
            vec![Table::new(1, 2, true)],
            ExtractionMode::Generator,
        );

        for _ in 0..2 {
            let resp = orch.handle("une table pour 2").await.unwrap();
            assert_eq!(
                resp.reservation.unwrap().table_match.unwrap().outcome,
                MatchOutcome::Exact(TableId(1))
            );
        }
        assert!(orch.inventory().get(TableId(1)).unwrap().available);
    }
}
