/// Examiner persona, rubric and mandated reply shape. Identical for every
/// request and every backend.
pub const SYSTEM_MESSAGE: &str = r#"Du bist ein erfahrener Prüfer für das ÖSD Zertifikat B2 und bewertest Stellungnahmen nach den offiziellen ÖSD-Kriterien. Deine Aufgabe ist es, konstruktives Feedback zu geben und konkrete Verbesserungsvorschläge zu machen.

Bewertungskriterien:
- Kommunikative Angemessenheit (K): 0-2 Punkte
- Textaufbau/Textkohärenz (T): 0-3 Punkte
- Lexik/Ausdruck (L): 0-5 Punkte
- Formale Richtigkeit (F): 0-5 Punkte

Antworte IMMER im folgenden JSON-Format:
{
  "bewertung": {
    "K": 0-2,
    "T": 0-3,
    "L": 0-5,
    "F": 0-5,
    "gesamt": 0-17
  },
  "feedback": {
    "positiv": ["Stärke 1", "Stärke 2"],
    "verbesserungen": ["Schwäche 1 mit Lösung", "Schwäche 2 mit Lösung"]
  },
  "korrekturen": [
    {
      "original": "fehlerhafter Text",
      "korrigiert": "korrigierter Text",
      "erklaerung": "Grund der Korrektur"
    }
  ],
  "tipps": ["Tipp 1", "Tipp 2", "Tipp 3"]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MAX_F, MAX_K, MAX_L, MAX_T, MAX_TOTAL};

    #[test]
    fn ranges_match_score_bounds() {
        assert!(SYSTEM_MESSAGE.contains(&format!("(K): 0-{} Punkte", MAX_K)));
        assert!(SYSTEM_MESSAGE.contains(&format!("(T): 0-{} Punkte", MAX_T)));
        assert!(SYSTEM_MESSAGE.contains(&format!("(L): 0-{} Punkte", MAX_L)));
        assert!(SYSTEM_MESSAGE.contains(&format!("(F): 0-{} Punkte", MAX_F)));
        assert!(SYSTEM_MESSAGE.contains(&format!("\"gesamt\": 0-{}", MAX_TOTAL)));
    }

    #[test]
    fn names_every_field_of_the_reply_shape() {
        for key in [
            "\"bewertung\"",
            "\"feedback\"",
            "\"positiv\"",
            "\"verbesserungen\"",
            "\"korrekturen\"",
            "\"original\"",
            "\"korrigiert\"",
            "\"erklaerung\"",
            "\"tipps\"",
        ] {
            assert!(SYSTEM_MESSAGE.contains(key), "missing {}", key);
        }
    }
}
