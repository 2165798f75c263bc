//! Recipe file parsing and chunking

/// A parsed recipe file
#[derive(Debug, Clone)]
pub struct RecipeFile {
    /// Dish name from the first heading, or the file stem
    pub dish_name: String,
    /// Category from the header block, "unknown" when absent
    pub category: String,
    /// Difficulty from the header block, "unknown" when absent
    pub difficulty: String,
    /// Document body without the heading and header lines
    pub body: String,
}

/// Parse a recipe markdown file.
///
/// Expected shape: an optional `# Dish Name` heading, optional
/// `Category:` / `Difficulty:` header lines (bare or bulleted), then the
/// recipe body. Missing pieces fall back rather than failing.
pub fn parse_recipe(text: &str, fallback_name: &str) -> RecipeFile {
    let mut dish_name: Option<String> = None;
    let mut category: Option<String> = None;
    let mut difficulty: Option<String> = None;
    let mut body_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if dish_name.is_none() {
            if let Some(heading) = trimmed.strip_prefix("# ") {
                dish_name = Some(heading.trim().to_string());
                continue;
            }
        }

        let unbulleted = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
            .unwrap_or(trimmed);

        if let Some(value) = header_value(unbulleted, "category") {
            if category.is_none() {
                category = Some(value);
                continue;
            }
        }
        if let Some(value) = header_value(unbulleted, "difficulty") {
            if difficulty.is_none() {
                difficulty = Some(value);
                continue;
            }
        }

        body_lines.push(line);
    }

    RecipeFile {
        dish_name: dish_name.unwrap_or_else(|| fallback_name.to_string()),
        category: category.unwrap_or_else(|| "unknown".to_string()),
        difficulty: difficulty.unwrap_or_else(|| "unknown".to_string()),
        body: body_lines.join("\n").trim().to_string(),
    }
}

fn header_value(line: &str, key: &str) -> Option<String> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case(key) {
        return None;
    }
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_lowercase())
}

/// Split a recipe body into chunks at paragraph boundaries.
///
/// Paragraphs accumulate until the size cap; chunks below the minimum size
/// are skipped.
pub fn chunk_body(body: &str, chunk_size: usize, min_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in body.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if !current.is_empty() && current.len() + paragraph.len() + 2 > chunk_size {
            if current.len() >= min_chunk_size {
                chunks.push(current.clone());
            }
            current.clear();
        }

        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    if current.len() >= min_chunk_size {
        chunks.push(current);
    }

    chunks
}
