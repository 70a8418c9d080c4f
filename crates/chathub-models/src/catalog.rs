use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One selectable model: the name shown in the UI, the OpenRouter routing id,
/// and a short description for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub display_name: String,
    pub backend_id: String,
    pub description: String,
}

impl ModelEntry {
    pub fn new(
        display_name: impl Into<String>,
        backend_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            backend_id: backend_id.into(),
            description: description.into(),
        }
    }
}

/// Static table of selectable models, keyed by display name.
///
/// Built once at startup and never mutated afterwards. Entry order is
/// significant: the first entry is the default selection.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    entries: Vec<ModelEntry>,
}

impl ModelCatalog {
    /// The stock catalog of hosted models reachable through OpenRouter.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ModelEntry::new(
                    "GPT-4o (OpenAI)",
                    "openai/gpt-4o",
                    "Flagship general model, strong at complex reasoning and everyday tasks.",
                ),
                ModelEntry::new(
                    "Claude 3.5 Sonnet (Anthropic)",
                    "anthropic/claude-3.5-sonnet",
                    "Balanced model that excels at code, math, and writing.",
                ),
                ModelEntry::new(
                    "Gemini 2.5 Pro (Google)",
                    "google/gemini-2.5-pro",
                    "Large context window, well suited to long documents.",
                ),
                ModelEntry::new(
                    "Llama 3.1 8B Instruct (Meta)",
                    "meta-llama/llama-3.1-8b-instruct",
                    "Fast open-weights model for general chat and quick replies.",
                ),
                ModelEntry::new(
                    "Mistral Large",
                    "mistralai/mistral-large",
                    "Top-tier Mistral model, strong in multilingual and technical fields.",
                ),
            ],
        }
    }

    /// Build a catalog from explicit entries, validating that it is non-empty
    /// and that every display name maps to exactly one backend id.
    pub fn from_entries(entries: Vec<ModelEntry>) -> Result<Self> {
        if entries.is_empty() {
            anyhow::bail!("Model catalog must contain at least one entry");
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|e| e.display_name == entry.display_name)
            {
                anyhow::bail!("Duplicate model display name: {}", entry.display_name);
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    /// The default selection: the first catalog entry.
    pub fn default_entry(&self) -> &ModelEntry {
        // from_entries rejects empty catalogs, builtin is never empty
        &self.entries[0]
    }

    pub fn get(&self, display_name: &str) -> Option<&ModelEntry> {
        self.entries
            .iter()
            .find(|e| e.display_name == display_name)
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.get(display_name).is_some()
    }
}
