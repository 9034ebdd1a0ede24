use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// Parse a record from markdown content with YAML frontmatter.
///
/// ```text
/// let interaction: Interaction = parse_from_markdown(&content, "Interaction")?;
/// ```
pub fn parse_from_markdown<T: DeserializeOwned>(content: &str, type_name: &str) -> Result<T> {
    let frontmatter = extract_yaml_frontmatter(content)?;
    serde_yaml::from_value(frontmatter)
        .with_context(|| format!("Failed to parse {type_name} from frontmatter"))
}

/// Extract YAML frontmatter delimited by `---` lines.
///
/// The closing delimiter must sit at the same indentation as the opening one, so an
/// indented `---` inside a block scalar (free-text comments) does not end the block.
pub fn extract_yaml_frontmatter(content: &str) -> Result<serde_yaml::Value> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || !lines[0].trim().starts_with("---") {
        bail!("No frontmatter delimiter found at start of content");
    }

    let opening_indent = lines[0].len() - lines[0].trim_start().len();

    let end_idx = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| {
            let trimmed = line.trim_start();
            trimmed.starts_with("---") && line.len() - trimmed.len() == opening_indent
        })
        .map(|(idx, _)| idx)
        .ok_or_else(|| anyhow::anyhow!("Frontmatter not properly closed with ---"))?;

    let yaml_content = lines[1..end_idx].join("\n");

    serde_yaml::from_str(&yaml_content).context("Failed to parse YAML frontmatter")
}
