use content_scoring::text::{count_occurrences, locate_occurrences, normalize, KeywordMatcher};

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "Café chaud",
    "L’Été à Paris — c’est « magique » !",
    "perte de poids rapide, puis perte de poids durable",
    "crème anti-âge_bio\u{200B}logique",
    "ΟΔΟΣ Straße İstanbul ﬁnal ½",
    "e\u{301}te\u{301} / été / ÉTÉ",
    "tab\tnew\nline\r\nend",
];

#[test]
fn normalization_is_idempotent_over_samples() {
    for sample in SAMPLES {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "sample {sample:?}");
        assert!(!once.starts_with(' ') && !once.ends_with(' '));
        assert!(!once.contains("  "));
    }
}

#[test]
fn counting_ignores_case_and_accents() {
    assert_eq!(count_occurrences("Café chaud", "cafe"), 1);
    assert_eq!(count_occurrences("café chaud", "café"), 1);
    assert_eq!(count_occurrences("e\u{301}te\u{301} / été / ÉTÉ", "été"), 3);
}

#[test]
fn counting_never_leaks_into_longer_words() {
    assert_eq!(count_occurrences("la crèmerie est ouverte", "crème"), 0);
    assert_eq!(count_occurrences("protéinée, protéines, protéine", "protéine"), 1);
}

#[test]
fn counting_handles_phrases() {
    assert_eq!(
        count_occurrences("perte de poids rapide, puis perte de poids durable", "perte de poids"),
        2
    );
    assert_eq!(count_occurrences("perte de perte de poids", "perte de poids"), 1);
}

#[test]
fn counting_has_no_stemming() {
    assert_eq!(count_occurrences("les protéines sont essentielles", "protéine"), 0);
}

#[test]
fn repeated_phrase_is_capped_by_contextual_matches() {
    // two token windows, but only one non-overlapping match in the source
    assert_eq!(count_occurrences("très très très bien", "très très"), 1);
}

#[test]
fn phrase_split_by_punctuation_is_discounted() {
    let text = "Le sport santé progresse. Sport, santé et bien-être.";
    assert_eq!(count_occurrences(text, "sport santé"), 1);
    assert_eq!(count_occurrences(text, "bien-être"), 1);
    assert_eq!(count_occurrences(text, "bien être"), 1);
}

#[test]
fn prepared_matcher_agrees_with_one_shot_counting() {
    let matcher = KeywordMatcher::new("l'eau");
    for text in ["de l’eau et de l'eau", "l eau", "leau", ""] {
        assert_eq!(matcher.count(text), count_occurrences(text, "l'eau"), "text {text:?}");
    }
}

#[test]
fn located_spans_cover_the_source_glyphs() {
    let text = "Buvez de l’eau. L'EAU, toujours l'eau !";
    let slices: Vec<&str> = locate_occurrences(text, "l'eau")
        .into_iter()
        .map(|span| &text[span])
        .collect();
    assert_eq!(slices, ["l’eau", "L'EAU", "l'eau"]);
}
