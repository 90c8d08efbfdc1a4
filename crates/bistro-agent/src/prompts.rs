//! Prompt texts and intermediate (pre-phrasing) messages.
//!
//! Target locale is French. Intermediate texts are factual; the generator
//! only restates them and must never turn an offer into a confirmation.

use bistro_protocol::{Intent, MatchOutcome};

/// System directive for every user-facing generation.
pub const REPHRASE_DIRECTIVE: &str = "Tu es un assistant virtuel de restaurant. \
Tu reformules la réponse que je t'envoie, en français, de manière claire et polie. \
Très important : tu ne dois JAMAIS confirmer une réservation, ni inventer une disponibilité, \
ni proposer spontanément une table. \
Tu ne fais QUE reformuler le texte fourni. \
Tu ne dois rien ajouter, rien déduire, rien inventer.";

/// System directive for structured party-size extraction.
pub const EXTRACTION_DIRECTIVE: &str = "Analyse le message utilisateur et renvoie STRICTEMENT \
un JSON de la forme : {\"people\": <nombre ou null>}.\n\
N'invente rien. Si le nombre n'est pas clair, people = null.";

/// Asked when the party size could not be determined.
pub const ASK_PARTY_SIZE: &str = "Pour quelle taille de groupe souhaitez-vous réserver ?";

pub const NO_TABLE_AVAILABLE: &str = "Je suis désolé, aucune table n'est disponible pour le moment.";

/// User message wrapping an intermediate reservation text for rephrasing.
pub fn rephrase_request(text: &str) -> String {
    format!("Reformule ce texte sans rien ajouter ni interpréter :\n{text}")
}

/// User message for non-reservation intents.
pub fn compose_request(intent: Intent, user_text: &str) -> String {
    format!("Intent détecté : {intent}. Demande du client : {user_text}")
}

/// Factual text describing a table lookup. Offers end with a question.
pub fn match_message(party_size: u32, outcome: &MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Exact(id) => format!(
            "Très bien, j'ai une table disponible pour {party_size} personnes : la table {id}. \
             Souhaitez-vous confirmer ?"
        ),
        MatchOutcome::Alternative(id) => format!(
            "Je n'ai pas de table parfaite pour {party_size} personnes, mais une table \
             alternative est disponible : table {id}. Souhaitez-vous la réserver ?"
        ),
        MatchOutcome::None => NO_TABLE_AVAILABLE.to_string(),
    }
}
