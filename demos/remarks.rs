use rand::{rngs::StdRng, SeedableRng};
use remark_generator::{
    GeneratorConfig, RemarkMatcher, RemarkSource, RemarkTable, Sentiment, SimilarityAlgorithm,
    TokenFrequency,
};

fn main() -> remark_generator::Result<()> {
    // build matcher
    let config = GeneratorConfig::default().with_top_n(2);
    let matcher = RemarkMatcher::with_config(RemarkTable::builtin()?, config)?;
    println!("shape: {:?}", matcher.shape());

    // raw ranking, cosine then unnormalized dot
    let freq = TokenFrequency::from_text("old rusty boots");
    for algorithm in [SimilarityAlgorithm::CosineSimilarity, SimilarityAlgorithm::Dot] {
        let mut hits = matcher.vectorizer().similarity(&freq, &algorithm);
        hits.sort_by_score();
        hits.list.truncate(5);
        println!("{:?} {:#?}", algorithm, hits);
    }

    // matches + remarks, seeded so the output is stable
    let mut rng = StdRng::seed_from_u64(2024);
    for (context, sentiment) in [
        ("old rusty boots", Sentiment::Positive),
        ("my toast got burnt", Sentiment::Negative),
        ("quantum flux capacitor", Sentiment::Positive),
    ] {
        let generation = matcher.generate(context, sentiment, &mut rng);
        println!("{context} [{sentiment}] -> {} | {}", generation.matches, generation.outcome);
    }
    Ok(())
}
