use std::path::Path;

use anyhow::Result;

use crate::AnalyzeOutputFormat;
use glean::ExtractMode;

pub async fn cmd_analyze(
    file: &Path,
    mode: ExtractMode,
    lang: Option<&str>,
    format: AnalyzeOutputFormat,
) -> Result<()> {
    let extraction = super::run_extraction(file, mode, lang).await?;
    let analysis = glean::analyze(&extraction.text);

    match format {
        AnalyzeOutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        AnalyzeOutputFormat::Text => {
            println!("📊 Words: {}", analysis.word_count);
            println!("   Characters: {}", analysis.char_count);
            println!("   Lines: {}", analysis.line_count);
            println!("   Hashtags: {}", analysis.hashtag_count);
            println!("   Mentions: {}", analysis.mention_count);
            println!("   Emojis: {}", analysis.emoji_count);

            println!();
            if analysis.suggestions.is_empty() {
                println!("✨ Looks good! No major issues detected.");
            } else {
                println!("💡 Suggestions:");
                for (idx, suggestion) in analysis.suggestions.iter().enumerate() {
                    println!("   {}. {suggestion}", idx + 1);
                }
            }
        }
    }

    Ok(())
}
