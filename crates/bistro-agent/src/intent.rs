//! Keyword-based intent classifier.
//!
//! Lower-cases the utterance and checks substring containment against four
//! keyword sets in priority order. The first set with a hit wins; there is
//! no scoring, so overlapping keywords resolve purely by order.

use bistro_protocol::Intent;

/// Keyword sets in priority order.
const KEYWORD_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::Reservation,
        &["réserver", "réservation", "reservation", "table", "book", "booking"],
    ),
    (Intent::Menu, &["menu", "plat", "dish", "allergène", "allergen"]),
    (
        Intent::Order,
        &["à emporter", "emporter", "take away", "takeaway", "commande"],
    ),
    (
        Intent::Info,
        &["horaire", "heures", "ouvert", "adresse", "location"],
    ),
];

/// Maps raw user text to one of the five intents. Pure and total.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();
        KEYWORD_RULES
            .iter()
            .find(|(_, keywords)| matches_any(&lower, keywords))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Unknown)
    }
}

/// Check if the text contains any of the given patterns.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        IntentClassifier::new().classify(text)
    }

    #[test]
    fn reservation_french() {
        assert_eq!(classify("Je veux réserver une table pour 4"), Intent::Reservation);
        assert_eq!(classify("Une réservation pour ce soir"), Intent::Reservation);
    }

    #[test]
    fn reservation_english() {
        assert_eq!(classify("Can I BOOK for tonight?"), Intent::Reservation);
    }

    #[test]
    fn menu() {
        assert_eq!(classify("Quel est le plat du jour ?"), Intent::Menu);
        assert_eq!(classify("Any allergens in the dessert?"), Intent::Menu);
    }

    #[test]
    fn order() {
        assert_eq!(classify("Je voudrais passer une commande"), Intent::Order);
        assert_eq!(classify("Is takeaway possible?"), Intent::Order);
    }

    #[test]
    fn info() {
        assert_eq!(classify("Quels sont vos horaires ?"), Intent::Info);
        assert_eq!(classify("Vous êtes ouvert dimanche ?"), Intent::Info);
    }

    #[test]
    fn unknown_when_nothing_matches() {
        assert_eq!(classify("Bonjour"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn reservation_beats_menu() {
        assert_eq!(
            classify("Je veux une table et voir le menu"),
            Intent::Reservation
        );
    }

    #[test]
    fn priority_not_match_count() {
        // Three info keywords, one menu keyword: menu still wins.
        assert_eq!(
            classify("horaires, adresse, heures d'ouverture et le menu"),
            Intent::Menu
        );
    }

    #[test]
    fn order_beats_info() {
        assert_eq!(
            classify("À emporter, vous êtes ouvert à quelle heure ? horaire ?"),
            Intent::Order
        );
    }

    #[test]
    fn case_insensitive_with_accents() {
        assert_eq!(classify("RÉSERVER"), Intent::Reservation);
        assert_eq!(classify("ALLERGÈNES"), Intent::Menu);
    }

    #[test]
    fn idempotent() {
        let text = "Une table pour deux, et le menu ?";
        assert_eq!(classify(text), classify(text));
    }
}
