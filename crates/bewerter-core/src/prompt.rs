use crate::tasks::TaskVariant;

pub const DEFAULT_TARGET_WORDS: usize = 120;

/// Whitespace-separated token count of a submission.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compose the user prompt for one submission.
///
/// Sources and punkte are emitted verbatim and in catalog order.
pub fn build_user_prompt(
    task: &TaskVariant,
    text: &str,
    word_count: usize,
    target_words: usize,
) -> String {
    let sources = task
        .sources
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join("\n");
    let punkte = task
        .punkte
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Aufgabe: Thema: {}\n\n\
         {}:\n{}\n\n\
         Zu behandelnde Punkte:\n{}\n\n\
         Schüler-Text:\n\"{}\"\n\n\
         Wortanzahl: {} (Ziel: ~{} Wörter)\n\n\
         Bewerte diese Stellungnahme nach den ÖSD B2-Kriterien und gib detailliertes Feedback mit konkreten Verbesserungsvorschlägen.",
        task.title,
        task.kind.heading(),
        sources,
        punkte,
        text,
        word_count,
        target_words
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskCatalog;

    #[test]
    fn counts_words_across_mixed_whitespace() {
        assert_eq!(count_words("  eins zwei\n\tdrei  "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn prompt_lists_every_source_and_point_in_order() {
        let catalog = TaskCatalog::builtin();
        for id in ["A", "B"] {
            let task = catalog.get(id).unwrap();
            let prompt = build_user_prompt(task, "Mein Text.", 2, DEFAULT_TARGET_WORDS);

            let mut cursor = 0;
            for s in &task.sources {
                let quoted = format!("\"{}\"", s);
                let pos = prompt[cursor..].find(&quoted).expect("source missing");
                cursor += pos + quoted.len();
            }
            for (i, p) in task.punkte.iter().enumerate() {
                let line = format!("{}. {}", i + 1, p);
                let pos = prompt[cursor..].find(&line).expect("point missing");
                cursor += pos + line.len();
            }
        }
    }

    #[test]
    fn prompt_layout_for_variant_a() {
        let catalog = TaskCatalog::builtin();
        let prompt = build_user_prompt(catalog.get("A").unwrap(), "Hallo Welt", 2, 120);
        assert!(prompt.starts_with("Aufgabe: Thema: Kind und Beruf\n\nAussagen:\n\"Job und Kind"));
        assert!(prompt.contains("\n\nZu behandelnde Punkte:\n1. Wie denken Sie über diese Äußerungen?\n"));
        assert!(prompt.contains("Schüler-Text:\n\"Hallo Welt\"\n\nWortanzahl: 2 (Ziel: ~120 Wörter)"));
        assert!(prompt.ends_with("konkreten Verbesserungsvorschlägen."));
    }

    #[test]
    fn variant_b_uses_headline_heading() {
        let catalog = TaskCatalog::builtin();
        let prompt = build_user_prompt(catalog.get("B").unwrap(), "x", 1, 120);
        assert!(prompt.contains("Schlagzeilen:\n\"Die traditionelle Familie"));
        assert!(!prompt.contains("Aussagen:"));
    }
}
