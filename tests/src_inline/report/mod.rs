use super::json::render_report_json;
use super::text::render_report_text;
use super::*;
use crate::chrf::{CHRF3, ChrFConfig};

fn corpus(sentences: &[&str]) -> Vec<Vec<String>> {
    sentences
        .iter()
        .map(|s| s.split_whitespace().map(str::to_string).collect())
        .collect()
}

fn report_for(ev: &ChrFEvaluator, hyp: &[&str], reference: &[&str]) -> ScoreReport {
    let hyp = corpus(hyp);
    let reference = corpus(reference);
    let stats = ev.statistics(&hyp, &reference);
    ScoreReport::new(ev, &stats, hyp.len(), reference.len())
}

#[test]
fn test_quantiles() {
    let v = vec![0.1, 0.2, 0.3, 0.4, 0.5];
    assert_eq!(median(&v), 0.3);
    assert_eq!(p90(&v), 0.5);
    assert_eq!(p10(&v), 0.2);
    assert!((mean(&v) - 0.3).abs() < 1e-12);
    assert_eq!(median(&[]), 0.0);
    assert_eq!(mean(&[]), 0.0);
}

#[test]
fn test_report_matches_score() {
    let ev = ChrFEvaluator::new(ChrFConfig {
        order: 2,
        ..ChrFConfig::default()
    })
    .unwrap();
    let report = report_for(&ev, &["abcd", "extra"], &["abce"]);
    assert_eq!(report.tool, "kira-chrf");
    assert_eq!(report.metric, "ChrF-1");
    assert_eq!(report.n_hypotheses, 2);
    assert_eq!(report.n_references, 1);
    assert_eq!(report.n_pairs, 1);
    assert!(!report.degenerate);
    assert!((report.precision.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert!((report.recall.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(
        report.score,
        ev.score(&corpus(&["abcd", "extra"]), &corpus(&["abce"]))
    );
}

#[test]
fn test_report_degenerate_hides_ratios() {
    let report = report_for(&CHRF3, &["hi"], &["hi"]);
    assert!(report.degenerate);
    assert_eq!(report.precision, None);
    assert_eq!(report.recall, None);
    assert_eq!(report.score, 1.0);

    let text = render_report_text(&report);
    assert!(text.contains("Metric: ChrF-3\n"));
    assert!(text.contains("ChrP: n/a\n"));
    assert!(text.contains("Score: 1.000000\n"));
    assert!(text.contains("exact string equality"));
}

#[test]
fn test_text_report_notes_truncation_and_sentences() {
    let ev = ChrFEvaluator::default();
    let hyp = corpus(&["evaluation", "metrics", "unused"]);
    let reference = corpus(&["evaluation", "metric"]);
    let stats = ev.statistics(&hyp, &reference);
    let report = ScoreReport::new(&ev, &stats, hyp.len(), reference.len())
        .with_sentence_scores(ev.sentence_scores(&hyp, &reference));

    let text = render_report_text(&report);
    assert!(text.contains("Ignored: \" \"\n"));
    assert!(text.contains("Scored pairs: 2\n"));
    assert!(text.contains("trailing sentences were not scored"));
    assert!(text.contains("Sentence scores (n=2)"));
    assert!(text.contains("1\t1.000000\n"));
}

#[test]
fn test_json_report_fields() {
    let ev = ChrFEvaluator::default();
    let hyp = corpus(&["evaluation"]);
    let stats = ev.statistics(&hyp, &hyp);
    let report = ScoreReport::new(&ev, &stats, 1, 1);

    let json = render_report_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"], "kira-chrf");
    assert_eq!(value["metric"], "ChrF-1");
    assert_eq!(value["order"], 6);
    assert_eq!(value["ignored"][0], " ");
    assert_eq!(value["score"], 1.0);
    assert_eq!(value["precision"], 1.0);
    assert!(value.get("sentences").is_none());
}
