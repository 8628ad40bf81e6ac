use litmap::pipeline::{Reducer, TreeBuilder};
use litmap::{ids_per_cluster, SingleLinkage, TermWeights};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_cut_partitions_every_document(
        data in prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 3), 1..24),
        k in 1usize..8
    ) {
        // Skip if k > n
        if k <= data.len() {
            let tree = SingleLinkage::new().build(&data).unwrap();
            let assignment = tree.cut(k).unwrap();

            prop_assert_eq!(assignment.len(), data.len());
            for &cluster in &assignment {
                prop_assert!(cluster < k);
            }

            // Every document index exactly once across the id -> indices map,
            // and no cluster is empty.
            let members = ids_per_cluster(&assignment);
            prop_assert_eq!(members.len(), k);
            let mut covered: Vec<usize> = members.values().flatten().copied().collect();
            covered.sort_unstable();
            let expected: Vec<usize> = (0..data.len()).collect();
            prop_assert_eq!(covered, expected);
        }
    }

    #[test]
    fn prop_recut_is_idempotent(
        data in prop::collection::vec(prop::collection::vec(-5.0f32..5.0, 2), 2..16),
        k in 1usize..6
    ) {
        if k <= data.len() {
            let tree = SingleLinkage::new().build(&data).unwrap();
            prop_assert_eq!(tree.cut(k).unwrap(), tree.cut(k).unwrap());
        }
    }

    #[test]
    fn prop_labeler_is_deterministic(
        rows in prop::collection::vec(prop::collection::vec(0.0f32..1.0, 4), 2..10),
        k in 1usize..4
    ) {
        if k <= rows.len() {
            let vocabulary: Vec<String> =
                ["alpha", "beta", "gamma", "delta"].iter().map(|s| (*s).to_owned()).collect();
            let weights = TermWeights::from_parts(vocabulary, rows.clone()).unwrap();

            // Round-robin assignment over k clusters.
            let assignment: Vec<usize> = (0..rows.len()).map(|i| i % k).collect();
            let members = ids_per_cluster(&assignment);

            let first = litmap::cluster_keywords(&weights, &members, 2).unwrap();
            let second = litmap::cluster_keywords(&weights, &members, 2).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), members.len());
        }
    }
}

/// Deterministic stand-in for the external 2-D reducer.
struct HeadReducer;

impl Reducer for HeadReducer {
    fn reduce(&self, vectors: &[Vec<f32>]) -> litmap::Result<Vec<[f32; 2]>> {
        Ok(vectors
            .iter()
            .map(|v| {
                [
                    v.first().copied().unwrap_or(0.0),
                    v.get(1).copied().unwrap_or(0.0),
                ]
            })
            .collect())
    }
}

#[test]
fn end_to_end_alignment_invariant() {
    use litmap::{Document, Pipeline, PipelineConfig, WordVectors};

    let model = WordVectors::from_pairs([
        ("rna", vec![1.0f32, 0.0]),
        ("gene", vec![0.9, 0.1]),
        ("brain", vec![0.0, 1.0]),
        ("neuron", vec![0.1, 0.9]),
    ])
    .unwrap();

    let documents: Vec<Document> = (0..8)
        .map(|i| Document {
            title: format!("paper {i}"),
            abstract_text: format!("abstract {i}"),
            year: 2010 + i as i32,
            citation_count: (i * 13) as u64,
            influential_citation_count: i as u64,
            url: format!("https://example.org/{i}"),
        })
        .collect();
    let tokens: Vec<Vec<String>> = (0..8)
        .map(|i| {
            let words: &[&str] = if i < 4 { &["rna", "gene"] } else { &["brain", "neuron"] };
            words.iter().map(|w| (*w).to_owned()).collect()
        })
        .collect();

    let mut pipeline = Pipeline::new(model, HeadReducer, SingleLinkage::new()).with_config(
        PipelineConfig {
            cluster_count: 2,
            n_keywords: 2,
            max_year: 2022,
        },
    );

    let n = documents.len();
    let data = pipeline.analyze(documents, tokens).unwrap();
    assert_eq!(data.points.len(), n);

    // Same tree, every valid k: the assignment stays aligned and complete.
    for k in 1..=n {
        let data = pipeline.set_cluster_count(k).unwrap();
        assert_eq!(data.points.len(), n);
        assert_eq!(data.clusters.len(), k);

        for point in &data.points {
            assert!(point.log_cit.is_finite());
            assert!((0.0..=1.0).contains(&point.opacity));
        }
        for centroid in &data.clusters {
            assert!(!centroid.label.is_empty());
        }
    }
}
