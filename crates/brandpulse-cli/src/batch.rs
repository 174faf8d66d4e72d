//! JSON-lines batch prediction.
//!
//! Each input line is a JSON object with optional `text` and `brand` string
//! fields. The object is echoed back with a `label` field added; other fields
//! pass through untouched. Blank lines are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, bail};
use brandpulse_ai::{PredictionRequest, Predictor};
use serde_json::Value;

/// Read from `input` (a path, or `-` for stdin) and write labelled lines to stdout.
pub fn run(predictor: &Predictor, input: &str) -> anyhow::Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if input == "-" {
        predict_lines(predictor, io::stdin().lock(), &mut out)
    } else {
        let file = File::open(input).with_context(|| format!("opening {input}"))?;
        predict_lines(predictor, BufReader::new(file), &mut out)
    }
}

/// Label every JSON line from `reader`, returning the number of records written.
pub fn predict_lines<R: BufRead, W: Write>(
    predictor: &Predictor,
    reader: R,
    mut writer: W,
) -> anyhow::Result<usize> {
    let mut written = 0;
    for (i, line) in reader.lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("reading line {lineno}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let mut record: Value =
            serde_json::from_str(&line).with_context(|| format!("line {lineno}: invalid JSON"))?;
        let Some(obj) = record.as_object_mut() else {
            bail!("line {lineno}: expected a JSON object");
        };
        let request: PredictionRequest = serde_json::from_value(Value::Object(obj.clone()))
            .with_context(|| format!("line {lineno}: `text` and `brand` must be strings"))?;

        let label = predictor.predict_request(&request);
        obj.insert("label".to_string(), Value::String(label.to_string()));

        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn demo_predictor() -> Predictor {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("demo");
        Predictor::load(&dir).unwrap()
    }

    fn run_lines(input: &str) -> anyhow::Result<(usize, Vec<Value>)> {
        let mut out = Vec::new();
        let n = predict_lines(&demo_predictor(), input.as_bytes(), &mut out)?;
        let records = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        Ok((n, records))
    }

    #[test]
    fn labels_each_line_in_order() {
        let input = concat!(
            r#"{"text": "I love these, amazing!", "brand": "nike"}"#,
            "\n",
            r#"{"text": "worst purchase, want a refund", "brand": "adidas"}"#,
            "\n\n",
            r#"{}"#,
            "\n",
        );
        let (n, records) = run_lines(input).unwrap();
        assert_eq!(n, 3);
        let labels: Vec<&str> = records
            .iter()
            .map(|r| r["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["positive", "negative", "neutral"]);
    }

    #[test]
    fn extra_fields_pass_through() {
        let (_, records) = run_lines(r#"{"id": 7, "text": "great", "brand": null}"#).unwrap();
        assert_eq!(records[0]["id"], 7);
        assert_eq!(records[0]["text"], "great");
        assert!(records[0]["label"].is_string());
    }

    #[test]
    fn bad_lines_report_line_number() {
        let err = run_lines("{\"text\": \"ok\"}\nnot json\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));

        let err = run_lines("[1, 2]\n").unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));

        let err = run_lines(r#"{"text": 42}"#).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
