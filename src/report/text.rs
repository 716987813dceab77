use crate::report::{ScoreReport, format_f64_6};

pub fn render_report_text(report: &ScoreReport) -> String {
    let mut out = String::new();

    out.push_str("Character n-gram F-score Report\n");
    out.push_str("===============================\n\n");

    out.push_str(&format!("Metric: {}\n", report.metric));
    out.push_str(&format!(
        "Order: {}\nBeta: {}\nIgnored: {}\n\n",
        report.order,
        report.beta,
        ignored_label(&report.ignored)
    ));

    out.push_str(&format!(
        "Hypotheses: {}\nReferences: {}\nScored pairs: {}\n",
        report.n_hypotheses, report.n_references, report.n_pairs
    ));
    if report.n_hypotheses != report.n_references {
        out.push_str("Note: corpora differ in length; trailing sentences were not scored.\n");
    }
    out.push('\n');

    out.push_str(&format!("ChrP: {}\n", optional(report.precision)));
    out.push_str(&format!("ChrR: {}\n", optional(report.recall)));
    out.push_str(&format!("Score: {}\n", format_f64_6(report.score)));
    if report.degenerate {
        out.push_str(
            "Note: last pair is shorter than the n-gram order; score is exact string equality.\n",
        );
    }

    if let Some(s) = &report.sentences {
        out.push_str(&format!(
            "\nSentence scores (n={}): mean={}, median={}, p10={}, p90={}\n",
            s.scores.len(),
            format_f64_6(s.mean),
            format_f64_6(s.median),
            format_f64_6(s.p10),
            format_f64_6(s.p90)
        ));
        for (i, score) in s.scores.iter().enumerate() {
            out.push_str(&format!("{}\t{}\n", i + 1, format_f64_6(*score)));
        }
    }

    out
}

fn optional(v: Option<f64>) -> String {
    v.map(format_f64_6).unwrap_or_else(|| "n/a".to_string())
}

fn ignored_label(ignored: &[String]) -> String {
    if ignored.is_empty() {
        return "none".to_string();
    }
    ignored
        .iter()
        .map(|c| format!("{:?}", c))
        .collect::<Vec<_>>()
        .join(", ")
}
