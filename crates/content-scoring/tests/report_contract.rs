use content_scoring::{analyze, GuideSpec};
use serde_json::{json, Value};

fn report(text: &str, payload: Value) -> Value {
    let guide = GuideSpec::from_payload(&payload).expect("payload parses");
    serde_json::to_value(analyze(text, &guide)).expect("report serializes")
}

#[test]
fn report_uses_the_published_field_names() {
    let value = report(
        "Le café chaud, un café serré.",
        json!({
            "KW_obligatoires": [["café", 1, 10, 1], ["thé", 1, 5]],
            "KW_complementaires": [["chaud", 1, 2]],
            "ngrams": ["café chaud", "café froid"],
            "mots_requis": 300
        }),
    );

    let object = value.as_object().expect("report is an object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "base_score",
            "kw_complementaires",
            "kw_obligatoires",
            "malus",
            "max_suroptimisation",
            "mots_requis",
            "ngrams_found",
            "premiers_mots",
            "score_complementaires",
            "score_details",
            "score_obligatoires",
            "score_seo",
            "suroptimisation",
            "word_count",
        ]
    );

    assert_eq!(
        value["score_details"],
        json!({
            "obligatoires_success": 1,
            "total_obligatoires": 2,
            "complementaires_success": 1,
            "total_complementaires": 1,
            "malus_count": 1
        })
    );
    assert_eq!(
        value["kw_obligatoires"]["café"],
        json!({"count": 2, "required": 1, "importance": 10, "completed": true})
    );
    assert_eq!(value["kw_obligatoires"]["thé"]["completed"], json!(false));
    assert_eq!(value["ngrams_found"], json!(["café chaud"]));
    assert_eq!(value["premiers_mots"], json!({"count": 6, "target": 200}));
    assert_eq!(value["mots_requis"], json!(300));
    assert_eq!(value["max_suroptimisation"], json!(5));
}

#[test]
fn scores_serialize_rounded_to_one_decimal() {
    let value = report(
        "café café café",
        json!({
            "KW_obligatoires": [["café", 1, 10], ["thé", 1, 5], ["lait", 1, 3]],
            "KW_complementaires": []
        }),
    );

    assert_eq!(value["score_obligatoires"], json!(23.3));
    assert_eq!(value["malus"], json!(6.7));
    assert_eq!(value["score_seo"], json!(16.7));
    assert_eq!(value["suroptimisation"], json!(33));
}

#[test]
fn zero_minimum_keyword_counts_as_completed() {
    let value = report(
        "",
        json!({"KW_obligatoires": [], "KW_complementaires": [["mot", 0, 1, 0, 0]]}),
    );

    assert_eq!(value["score_complementaires"], json!(30.0));
    assert_eq!(value["score_seo"], json!(30.0));
    assert_eq!(value["malus"], json!(0.0));
}

#[test]
fn degenerate_guide_scores_zero() {
    let value = report("du texte sans guide", json!({}));

    assert_eq!(value["score_seo"], json!(0.0));
    assert_eq!(value["kw_obligatoires"], json!({}));
    assert_eq!(value["kw_complementaires"], json!({}));
    assert_eq!(value["suroptimisation"], json!(0));
    assert_eq!(value["word_count"], json!(4));
}
