//! End-to-end run on a toy corpus: analyze once, then re-cut at a second
//! cluster count without recomputing the embedding.

use litmap::{
    Document, Pipeline, PipelineConfig, Reducer, Result, SingleLinkage, WordVectors,
};

/// Toy stand-in for the external 2-D reducer (UMAP in a real deployment):
/// project each sentence vector onto its first two components.
struct HeadReducer;

impl Reducer for HeadReducer {
    fn reduce(&self, vectors: &[Vec<f32>]) -> Result<Vec<[f32; 2]>> {
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

fn doc(title: &str, year: i32, citations: u64) -> Document {
    Document {
        title: title.to_owned(),
        abstract_text: format!("A study of {title}."),
        year,
        citation_count: citations,
        influential_citation_count: citations / 10,
        url: format!("https://example.org/{}", title.replace(' ', "-")),
    }
}

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

fn main() {
    // Tiny word-vector model spanning two topics.
    let model = WordVectors::from_pairs([
        ("rna", vec![1.0, 0.0]),
        ("gene", vec![0.9, 0.1]),
        ("expression", vec![0.8, 0.2]),
        ("brain", vec![0.0, 1.0]),
        ("neuron", vec![0.1, 0.9]),
        ("memory", vec![0.2, 0.8]),
    ])
    .unwrap();

    let documents = vec![
        doc("rna sequencing methods", 2016, 210),
        doc("gene expression atlases", 2019, 80),
        doc("single cell rna landscapes", 2021, 35),
        doc("cortical neuron morphology", 2014, 150),
        doc("memory consolidation in the brain", 2018, 60),
        doc("neuron firing models", 2022, 4),
    ];
    let token_lists = vec![
        tokens(&["rna", "sequencing", "gene"]),
        tokens(&["gene", "expression", "atlas"]),
        tokens(&["rna", "expression", "cell"]),
        tokens(&["neuron", "brain", "morphology"]),
        tokens(&["memory", "brain", "consolidation"]),
        tokens(&["neuron", "firing", "memory"]),
    ];

    let mut pipeline = Pipeline::new(model, HeadReducer, SingleLinkage::new()).with_config(
        PipelineConfig {
            cluster_count: 2,
            n_keywords: 3,
            max_year: 2022,
        },
    );

    // --- Full analysis (vectorize, embed, build tree, cache, cut) ---
    let data = pipeline.analyze(documents, token_lists).unwrap();
    println!("=== analyze (k=2) ===");
    for point in &data.points {
        println!(
            "  {:30} ({:5.2}, {:5.2}) size {:.2} opacity {:.2} => [{}]",
            point.title, point.x, point.y, point.log_cit, point.opacity, point.cluster
        );
    }
    for centroid in &data.clusters {
        println!("  label at ({:5.2}, {:5.2}): {}", centroid.x, centroid.y, centroid.label);
    }

    // --- Change the cluster count: only the cheap tail reruns ---
    let data = pipeline.set_cluster_count(3).unwrap();
    println!("\n=== set_cluster_count(3) ===");
    for centroid in &data.clusters {
        println!("  label at ({:5.2}, {:5.2}): {}", centroid.x, centroid.y, centroid.label);
    }
}
