//! Use case for generating the frontend API modules

use std::sync::Arc;

use crate::application::{
    ApplicationError, GenerateApiRequest, GenerateHooks, GenerationSummary, OutputService,
};
use crate::generation::{ModuleBuilder, OpenApiLoader, PostProcessor};
use crate::infrastructure::templates::TemplateLoader;

/// Loads the document, builds every module, writes the files and runs the
/// formatter, with the hooks around it all
pub struct GenerateApiUseCase {
    loader: Arc<dyn OpenApiLoader>,
    template_loader: Arc<dyn TemplateLoader>,
    output_service: Arc<dyn OutputService>,
    post_processor: Arc<dyn PostProcessor>,
    hooks: Arc<dyn GenerateHooks>,
}

impl GenerateApiUseCase {
    pub fn new(
        loader: Arc<dyn OpenApiLoader>,
        template_loader: Arc<dyn TemplateLoader>,
        output_service: Arc<dyn OutputService>,
        post_processor: Arc<dyn PostProcessor>,
        hooks: Arc<dyn GenerateHooks>,
    ) -> Self {
        Self {
            loader,
            template_loader,
            output_service,
            post_processor,
            hooks,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateApiRequest,
    ) -> Result<GenerationSummary, ApplicationError> {
        let GenerateApiRequest { workspace, config } = request;
        config.validate()?;

        // 1. Acquire the document; any failure aborts the run
        let source = config.document_source(&workspace);
        tracing::info!(source = %source, "Loading OpenAPI document");
        let document = self.loader.load(&source).await?;

        self.hooks.before_generate(&document).await;

        // 2. Templates and grouping
        let templates = self
            .template_loader
            .load_templates(&config.templates_dir(&workspace))
            .await?;
        let builder = ModuleBuilder::new(&document, &config.types, &config.naming, &templates);
        let groups = builder.groups();
        tracing::info!(
            modules = groups.len(),
            strategy = %config.naming.naming_strategy,
            "Discovered modules"
        );

        // 3. Build and write module by module
        let output_dir = config.output_dir(&workspace);
        self.output_service.ensure_directory(&output_dir).await?;

        let mut generated_files = Vec::new();
        for (key, operations) in &groups {
            tracing::info!(module = %key, operations = operations.len(), "Generating module");
            let module = builder.build_module(key, operations);
            let artifacts = module.artifacts(&output_dir);

            self.output_service.write_artifacts(&artifacts).await?;
            for artifact in &artifacts {
                tracing::info!(module = %key, path = %artifact.path.display(), "Generated file");
            }
            generated_files.extend(artifacts.into_iter().map(|artifact| artifact.path));
        }

        // 4. Formatting never invalidates what was written
        if config.formatting.run_prettier && !generated_files.is_empty() {
            match self.post_processor.process(&generated_files, &workspace).await {
                Ok(()) => tracing::info!(files = generated_files.len(), "Formatted generated files"),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Formatting failed, run the formatter on the generated files manually"
                ),
            }
        }

        let summary = GenerationSummary {
            module_count: groups.len(),
            generated_files,
        };
        self.hooks.after_generate(&summary).await;

        Ok(summary)
    }
}
