//! The orchestration facade

use crate::config::StudioSettings;
use crate::error::ServiceError;
use quill_context::{ContextAggregator, ContinuationPaths, RevisionPaths};
use quill_domain::traits::{GenerationRequest, ModelProvider};
use quill_domain::Extraction;
use quill_extractor::parse_extraction;
use quill_llm::{AnyProvider, ProviderKind};
use quill_prompt::{ContinuationPrompt, ExtractionPrompt, RevisionPrompt, DEFAULT_WORD_COUNT};
use quill_store::FileStore;
use std::time::Instant;
use tracing::{debug, info};

/// Request to continue the active manuscript.
#[derive(Debug, Clone, Default)]
pub struct ContinuationRequest {
    /// Author directives for the chapter to be written
    pub directives: Option<String>,
    /// Target word count; defaults to the prompt layer's standard target
    pub word_count: Option<u32>,
}

/// Request to revise a selected passage.
#[derive(Debug, Clone)]
pub struct RevisionRequest {
    /// The passage the author wants revised (required)
    pub selected_text: String,
    /// The author's grievances and directives for the passage
    pub directives: Option<String>,
}

/// Request to extract character updates from a passage.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// The passage to analyze (required)
    pub selected_text: String,
}

/// Result of an extraction operation.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The parsed character updates
    pub extraction: Extraction,
    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Model identifier used for the call
    pub model: String,
    /// Number of records recovered
    pub records: usize,
    /// True if the records came from the low-precision fallback parse
    pub fallback: bool,
    /// Wall-clock time for the whole operation in milliseconds
    pub processing_time_ms: u64,
}

/// The writing-studio facade: three operations over one vault.
///
/// Stateless across calls; concurrent requests against one service do not
/// interfere. The provider is injected so tests run against a mock.
pub struct StudioService<P>
where
    P: ModelProvider,
{
    settings: StudioSettings,
    aggregator: ContextAggregator,
    provider: P,
}

impl StudioService<AnyProvider> {
    /// Construct a service whose provider is chosen by the settings'
    /// provider name.
    pub fn from_settings(settings: StudioSettings) -> Result<Self, ServiceError> {
        settings.validate().map_err(ServiceError::Config)?;
        let kind: ProviderKind = settings
            .provider
            .parse()
            .map_err(|e: quill_llm::LlmError| ServiceError::Config(e.to_string()))?;
        let provider = AnyProvider::new(kind, settings.api_key.clone());
        Self::new(settings, provider)
    }
}

impl<P> StudioService<P>
where
    P: ModelProvider,
    P::Error: std::fmt::Display,
{
    /// Create a service over validated settings and an injected provider.
    pub fn new(settings: StudioSettings, provider: P) -> Result<Self, ServiceError> {
        settings.validate().map_err(ServiceError::Config)?;
        Ok(Self {
            settings,
            aggregator: ContextAggregator::new(FileStore::new()),
            provider,
        })
    }

    /// Continue the active manuscript.
    pub async fn continue_manuscript(
        &self,
        request: ContinuationRequest,
    ) -> Result<String, ServiceError> {
        info!("Continuation requested");

        let paths = ContinuationPaths {
            manuscript: &self.settings.manuscript_path,
            story_bible: &self.settings.story_bible_path,
            extractions: &self.settings.extractions_path,
            sliding_window: &self.settings.sliding_window_path,
        };
        let context = self
            .aggregator
            .continuation_context(&self.settings.vault_root, &paths)
            .await;

        let prompt = ContinuationPrompt::new(&context)
            .directives(request.directives.as_deref().unwrap_or(""))
            .word_count(request.word_count.unwrap_or(DEFAULT_WORD_COUNT))
            .build();

        self.call_model(prompt).await
    }

    /// Produce a single revised alternative for a selected passage.
    pub async fn revise_passage(&self, request: RevisionRequest) -> Result<String, ServiceError> {
        if request.selected_text.trim().is_empty() {
            return Err(ServiceError::EmptySelection);
        }
        info!("Revision requested ({} chars selected)", request.selected_text.len());

        let paths = RevisionPaths {
            story_bible: &self.settings.story_bible_path,
            extractions: &self.settings.extractions_path,
            sliding_window: &self.settings.sliding_window_path,
            character_folder: &self.settings.character_folder,
        };
        let context = self
            .aggregator
            .revision_context(&self.settings.vault_root, &paths)
            .await;

        let prompt = RevisionPrompt::new(&context, &request.selected_text)
            .directives(request.directives.as_deref().unwrap_or(""))
            .build();

        self.call_model(prompt).await
    }

    /// Extract character updates from a selected passage.
    pub async fn extract_characters(
        &self,
        request: ExtractionRequest,
    ) -> Result<ExtractionOutcome, ServiceError> {
        if request.selected_text.trim().is_empty() {
            return Err(ServiceError::EmptySelection);
        }
        let start = Instant::now();
        info!("Extraction requested ({} chars selected)", request.selected_text.len());

        let context = self
            .aggregator
            .extraction_context(
                &self.settings.vault_root,
                &self.settings.story_bible_path,
                &self.settings.character_folder,
            )
            .await;

        let prompt = ExtractionPrompt::new(&request.selected_text)
            .with_notes(&context.character_notes)
            .with_story_bible(context.story_bible.as_text())
            .build();

        let output = self.call_model(prompt).await?;
        let extraction = parse_extraction(&output);

        let metadata = ExtractionMetadata {
            model: self.settings.model.clone(),
            records: extraction.len(),
            fallback: extraction.is_advisory(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} records{}",
            metadata.records,
            if metadata.fallback { " (fallback)" } else { "" }
        );

        Ok(ExtractionOutcome {
            extraction,
            metadata,
        })
    }

    /// Current character notes, shown to the author before extraction.
    pub async fn character_notes(&self) -> quill_domain::CharacterNoteSet {
        self.aggregator
            .character_notes(&self.settings.vault_root, &self.settings.character_folder)
            .await
    }

    async fn call_model(&self, prompt: String) -> Result<String, ServiceError> {
        debug!("Prompt length: {} chars", prompt.len());

        let request = GenerationRequest {
            prompt,
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
        };

        self.provider
            .generate(&request)
            .await
            .map_err(|e| ServiceError::Provider(e.to_string()))
    }
}
