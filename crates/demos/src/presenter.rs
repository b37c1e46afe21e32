//! Console rendering of extracted results. Display only: vectors are
//! previewed, never truncated in the values handed to callers.

use embeddings::EmbeddingResult;
use llm::{ChatOutcome, TierCheck, TierReport};
use std::io::{self, Write};

pub const PREVIEW_LEN: usize = 10;

const RULE: &str = "============================================================";

/// `[v0, v1, ...]` with at most `limit` elements. Whole numbers keep their
/// decimal point (`1.0`, not `1`).
pub fn format_preview(values: &[f64], limit: usize) -> String {
    let shown: Vec<String> = values.iter().take(limit).map(|v| format!("{:?}", v)).collect();
    format!("[{}]", shown.join(", "))
}

pub fn render_embedding(out: &mut dyn Write, kind: &str, result: &EmbeddingResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "✅ Generated {} embedding", kind)?;
    writeln!(out, "   dimension: {}", result.dimension())?;
    writeln!(out, "   embedding type: {}", result.embedding_type)?;
    writeln!(
        out,
        "   first {} values: {}",
        PREVIEW_LEN,
        format_preview(&result.embedding, PREVIEW_LEN)
    )?;
    Ok(())
}

pub fn render_banner(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", RULE)
}

pub fn render_chat_outcome(out: &mut dyn Write, outcome: &ChatOutcome) -> io::Result<()> {
    render_banner(out, "Full response")?;

    writeln!(out, "\n[Response Metadata]")?;
    writeln!(
        out,
        "Request ID: {}",
        outcome.request_id.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "HTTP Status Code: {}", outcome.status)?;

    writeln!(out, "\n[HTTP Headers]")?;
    for (name, values) in &outcome.headers {
        for value in values {
            writeln!(out, "{}: {}", name, value)?;
        }
    }

    writeln!(out, "\n[Response Body]")?;
    let pretty = serde_json::to_string_pretty(&outcome.body).map_err(io::Error::other)?;
    writeln!(out, "{}", pretty)?;

    writeln!(out)?;
    render_banner(out, "Key fields")?;
    writeln!(out, "\nResponse text:")?;
    writeln!(out, "{}", outcome.text)?;

    if let Some(usage) = &outcome.usage {
        writeln!(
            out,
            "\nTokens: {} in / {} out",
            usage.input_tokens, usage.output_tokens
        )?;
    }

    if let Some(report) = &outcome.tier {
        render_tier(out, report)?;
    }
    Ok(())
}

pub fn render_tier(out: &mut dyn Write, report: &TierReport) -> io::Result<()> {
    writeln!(out, "\nService tier verification:")?;
    writeln!(out, "  requested tier: {}", report.requested)?;
    writeln!(out, "  actual tier:    {}", report.actual)?;
    match report.check() {
        TierCheck::Confirmed => {
            writeln!(out, "  ✅ Confirmed: served by the {} tier", report.requested)
        }
        TierCheck::Mismatch => writeln!(
            out,
            "  ⚠️  Note: served by the {} tier, not the {} tier",
            report.actual, report.requested
        ),
    }
}

/// Full body followed by the generated text, as the image understanding
/// demo prints it.
pub fn render_understanding(out: &mut dyn Write, outcome: &ChatOutcome) -> io::Result<()> {
    writeln!(out, "[Full Response]")?;
    let pretty = serde_json::to_string_pretty(&outcome.body).map_err(io::Error::other)?;
    writeln!(out, "{}", pretty)?;
    writeln!(out, "\n[Response Content Text]")?;
    writeln!(out, "{}", outcome.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_core::ServiceTier;

    fn rendered<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn should_show_only_first_ten_values() {
        let values: Vec<f64> = (0..1024).map(|i| i as f64).collect();
        let preview = format_preview(&values, PREVIEW_LEN);
        assert_eq!(preview, "[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]");
    }

    #[test]
    fn should_show_exactly_ten_without_trailing_comma() {
        let values = vec![0.5; 10];
        let preview = format_preview(&values, PREVIEW_LEN);
        assert_eq!(preview.matches("0.5").count(), 10);
        assert!(preview.ends_with("0.5]"));
        assert!(!preview.contains(", ]"));
    }

    #[test]
    fn should_show_short_vectors_whole() {
        assert_eq!(format_preview(&[0.25, -1.5], PREVIEW_LEN), "[0.25, -1.5]");
        assert_eq!(format_preview(&[], PREVIEW_LEN), "[]");
    }

    #[test]
    fn should_keep_decimal_point_on_whole_numbers() {
        assert_eq!(format_preview(&[0.0, -2.0, 0.5], PREVIEW_LEN), "[0.0, -2.0, 0.5]");
    }

    #[test]
    fn should_render_embedding_summary() {
        let result = EmbeddingResult {
            embedding: vec![0.125; 1024],
            embedding_type: "TEXT".to_string(),
        };

        let text = rendered(|out| render_embedding(out, "text", &result));
        assert!(text.contains("Generated text embedding"));
        assert!(text.contains("dimension: 1024"));
        assert!(text.contains("embedding type: TEXT"));
        assert_eq!(text.matches("0.125").count(), 10);
    }

    #[test]
    fn should_render_tier_confirmation_and_mismatch() {
        let confirmed = TierReport::new(ServiceTier::Flex, Some("flex"));
        let text = rendered(|out| render_tier(out, &confirmed));
        assert!(text.contains("Confirmed"));

        let mismatch = TierReport::new(ServiceTier::Flex, Some("default"));
        let text = rendered(|out| render_tier(out, &mismatch));
        assert!(text.contains("served by the default tier, not the flex tier"));

        let unknown = TierReport::new(ServiceTier::Flex, None);
        let text = rendered(|out| render_tier(out, &unknown));
        assert!(text.contains("actual tier:    unknown"));
        assert!(!text.contains("Confirmed"));
    }
}
