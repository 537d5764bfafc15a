mod report;
mod scoring;

pub use report::{
    ngrams_found, suroptimization, word_count, AnalysisResult, FirstWords, FIRST_WORDS_TARGET,
};
pub use scoring::{
    compute, KeywordMatch, ScoreBreakdown, ScoreDetails, COMPLEMENTARY_WEIGHT, MALUS_WEIGHT,
    MANDATORY_WEIGHT,
};

use crate::guide::{GuideSpec, KeywordGroup, KeywordRequirement};
use crate::text::{tokenize, KeywordMatcher, Reconciliation};
use tracing::debug;

/// A guide with every keyword pattern compiled, reusable across texts.
pub struct GuideAnalyzer<'g> {
    guide: &'g GuideSpec,
    matchers: Vec<(&'g KeywordRequirement, KeywordMatcher)>,
}

impl<'g> GuideAnalyzer<'g> {
    pub fn new(guide: &'g GuideSpec) -> Self {
        let matchers = guide
            .requirements
            .iter()
            .map(|requirement| (requirement, KeywordMatcher::new(&requirement.keyword)))
            .collect();

        Self { guide, matchers }
    }

    pub fn with_reconciliation(mut self, reconciliation: Reconciliation) -> Self {
        self.matchers = self
            .matchers
            .into_iter()
            .map(|(requirement, matcher)| (requirement, matcher.with_reconciliation(reconciliation)))
            .collect();
        self
    }

    pub fn guide(&self) -> &GuideSpec {
        self.guide
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let haystack = tokenize(text);
        let mut mandatory = Vec::new();
        let mut complementary = Vec::new();

        for (requirement, matcher) in &self.matchers {
            let found = KeywordMatch::evaluate(requirement, matcher.count_in(text, &haystack));
            match requirement.group {
                KeywordGroup::Mandatory => mandatory.push(found),
                KeywordGroup::Complementary => complementary.push(found),
            }
        }

        let score = compute(&mandatory, &complementary);
        let result = report::assemble(text, self.guide, score, mandatory, complementary);

        debug!(
            query = self.guide.query.as_deref().unwrap_or_default(),
            score_seo = result.score.score_seo,
            malus = result.score.malus,
            word_count = result.word_count,
            "text analysed"
        );

        result
    }
}

/// Scores `text` against `guide`.
pub fn analyze(text: &str, guide: &GuideSpec) -> AnalysisResult {
    GuideAnalyzer::new(guide).analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> GuideSpec {
        GuideSpec {
            query: Some("whey ou creatine".to_string()),
            requirements: vec![
                KeywordRequirement::new("créatine", 2, None, 44, KeywordGroup::Mandatory),
                KeywordRequirement::new("whey", 1, Some(2), 35, KeywordGroup::Mandatory),
                KeywordRequirement::new("prise de masse", 1, None, 20, KeywordGroup::Complementary),
            ],
            ngrams: vec!["créatine monohydrate".to_string()],
            required_word_count: 300,
            max_suroptimization: 5,
            score_target: Some(54),
        }
    }

    #[test]
    fn analysis_combines_every_component() {
        let text = "La créatine monohydrate et la whey. Whey, whey : la CRÉATINE aide la prise de masse.";
        let result = analyze(text, &guide());

        let counts: Vec<(&str, u32, bool)> = result
            .mandatory
            .iter()
            .map(|kw| (kw.keyword.as_str(), kw.count, kw.completed))
            .collect();
        assert_eq!(counts, [("créatine", 2, true), ("whey", 3, true)]);
        assert_eq!(result.complementary[0].count, 1);

        assert_eq!(result.score.details.over_optimized_count, 1);
        assert_eq!(result.score.score_mandatory, 70.0);
        assert_eq!(result.score.score_complementary, 30.0);
        assert_eq!(result.score.malus, 6.7);
        assert_eq!(result.score.score_seo, 93.3);
        assert_eq!(result.suroptimization, 33);
        assert_eq!(result.ngrams_found, ["créatine monohydrate"]);
        assert_eq!(result.word_count, 15);
        assert_eq!(result.required_word_count, 300);
        assert_eq!(result.first_words, FirstWords { count: 15, target: 200 });
    }

    #[test]
    fn analyzer_is_reusable_across_texts() {
        let guide = guide();
        let analyzer = GuideAnalyzer::new(&guide);

        let empty = analyzer.analyze("");
        assert_eq!(empty.score.score_seo, 0.0);
        assert_eq!(empty.word_count, 0);

        let partial = analyzer.analyze("whey");
        assert_eq!(partial.score.score_mandatory, 35.0);
        assert_eq!(partial, analyze("whey", &guide));
    }

    #[test]
    fn empty_guide_scores_zero_for_any_text() {
        let result = analyze("du texte sans guide", &GuideSpec::default());
        assert_eq!(result.score.score_seo, 0.0);
        assert_eq!(result.suroptimization, 0);
        assert_eq!(result.word_count, 4);
    }
}
