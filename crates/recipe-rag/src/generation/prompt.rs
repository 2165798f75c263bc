//! Prompt templates for routing, rewriting, and recipe-grounded generation

use crate::types::ParentDocument;

/// Prompt builder for the recipe Q&A pipeline
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build generation context from the expanded parent documents
    pub fn build_context(documents: &[ParentDocument]) -> String {
        let mut context = String::new();

        for (i, doc) in documents.iter().enumerate() {
            context.push_str(&format!(
                "[{}] {} (category: {}, difficulty: {})\n\n{}\n\n---\n\n",
                i + 1,
                doc.dish_name,
                doc.metadata.category,
                doc.metadata.difficulty,
                doc.content
            ));
        }

        context
    }

    /// Classification prompt for the query router
    pub fn router_prompt(query: &str) -> String {
        format!(
            r#"Classify the cooking question into exactly one of three answer shapes:

- list: the user wants an enumerable set of dishes or options (e.g. "what dishes can I make with eggs")
- detail: the user wants ordered, step-by-step cooking instructions
- basic: any other question shape

Respond with one word only: list, detail, or basic.

QUESTION: {query}

ANSWER:"#
        )
    }

    /// Rewrite prompt used to improve retrieval recall
    pub fn rewrite_prompt(query: &str) -> String {
        format!(
            r#"Rewrite the cooking question so a recipe search engine retrieves better passages.

RULES:
1. Keep the dish names, ingredients, and cooking techniques from the original
2. Expand vague phrasing into concrete recipe vocabulary
3. Do not answer the question
4. Respond with the rewritten question only, no explanations or quotes

QUESTION: {query}

REWRITTEN:"#
        )
    }

    /// Prompt for enumerable list answers (blocking generation)
    pub fn list_prompt(query: &str, context: &str) -> String {
        format!(
            r#"You are a cooking assistant that ONLY uses the recipe excerpts below.

RULES:
1. Answer with an enumerated list of dishes drawn from the context
2. One line per dish: name, then a short reason it fits the question
3. Do not invent dishes that are not in the context
4. If nothing in the context fits, say so plainly

CONTEXT:
{context}

QUESTION: {query}

ANSWER:"#
        )
    }

    /// Prompt for procedural step-by-step answers (streaming generation)
    pub fn detail_prompt(query: &str, context: &str) -> String {
        format!(
            r#"You are a cooking assistant that ONLY uses the recipe excerpts below.

RULES:
1. Answer with numbered, ordered cooking steps
2. Include concrete quantities, times, and heat levels when the context provides them
3. Do not invent steps or ingredients that are not in the context
4. If the context does not cover the dish, say so plainly

CONTEXT:
{context}

QUESTION: {query}

ANSWER:"#
        )
    }

    /// Prompt for general answers (streaming generation)
    pub fn basic_prompt(query: &str, context: &str) -> String {
        format!(
            r#"You are a cooking assistant that ONLY uses the recipe excerpts below.

RULES:
1. Answer the question directly and conversationally
2. Ground every claim in the context; do not use outside knowledge
3. If the context does not contain the answer, say so plainly

CONTEXT:
{context}

QUESTION: {query}

ANSWER:"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;
    use uuid::Uuid;

    #[test]
    fn test_context_numbers_documents_in_order() {
        let docs = vec![
            ParentDocument::new(
                Uuid::new_v4(),
                "Egg Tart",
                "Pastry shell with custard.",
                ChunkMetadata::new("Egg Tart", "dessert", "medium"),
            ),
            ParentDocument::new(
                Uuid::new_v4(),
                "Congee",
                "Slow-simmered rice porridge.",
                ChunkMetadata::new("Congee", "breakfast", "easy"),
            ),
        ];

        let context = PromptBuilder::build_context(&docs);
        let first = context.find("[1] Egg Tart").expect("first doc present");
        let second = context.find("[2] Congee").expect("second doc present");
        assert!(first < second);
        assert!(context.contains("category: dessert"));
    }

    #[test]
    fn test_prompts_embed_query_and_context() {
        let prompt = PromptBuilder::detail_prompt("how to fold dumplings", "CTX");
        assert!(prompt.contains("how to fold dumplings"));
        assert!(prompt.contains("CTX"));

        let router = PromptBuilder::router_prompt("steamed fish");
        assert!(router.contains("list, detail, or basic"));
    }
}
