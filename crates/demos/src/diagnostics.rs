use nova_core::{EmbeddingSettings, ErrorCategory, FlexSettings, NovaError, UnderstandingSettings};
use std::io::{self, Write};
use std::path::PathBuf;

const BEDROCK_CONSOLE: &str = "https://console.aws.amazon.com/bedrock/";

/// What the operator needs to know to act on a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct HintContext {
    pub model_name: &'static str,
    pub model_id: String,
    pub region: String,
    pub image_path: Option<PathBuf>,
}

impl HintContext {
    pub fn for_text_embedding(settings: &EmbeddingSettings) -> Self {
        Self {
            model_name: "Amazon Nova Multimodal Embeddings",
            model_id: settings.model_id.clone(),
            region: settings.region.clone(),
            image_path: None,
        }
    }

    pub fn for_image_embedding(settings: &EmbeddingSettings) -> Self {
        Self {
            image_path: Some(settings.image_path.clone()),
            ..Self::for_text_embedding(settings)
        }
    }

    pub fn for_flex(settings: &FlexSettings) -> Self {
        Self {
            model_name: "Amazon Nova 2 Lite",
            model_id: settings.model_id.clone(),
            region: settings.region.clone(),
            image_path: Some(settings.image_path.clone()),
        }
    }

    pub fn for_understanding(settings: &UnderstandingSettings) -> Self {
        Self {
            model_name: "Amazon Nova Lite",
            model_id: settings.model_id.clone(),
            region: settings.region.clone(),
            image_path: Some(settings.image_path.clone()),
        }
    }
}

pub struct Diagnosis {
    pub headline: Option<String>,
    pub steps: Vec<String>,
}

pub fn diagnose(error: &NovaError, ctx: &HintContext) -> Diagnosis {
    match error.category() {
        ErrorCategory::Validation => Diagnosis {
            headline: Some("Model not enabled or request rejected".to_string()),
            steps: vec![
                format!("Open the Bedrock console: {}", BEDROCK_CONSOLE),
                "Choose 'Model access' in the left-hand menu".to_string(),
                "Click 'Manage model access'".to_string(),
                format!("Find '{}' and enable it", ctx.model_name),
                "Wait a few minutes for model access to take effect".to_string(),
            ],
        },
        ErrorCategory::Auth => Diagnosis {
            headline: Some("AWS credential problem".to_string()),
            steps: vec![
                "Configure AWS credentials: run `aws configure` or set AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY".to_string(),
                format!(
                    "Make sure your IAM permissions allow bedrock:InvokeModel on {}",
                    ctx.model_id
                ),
            ],
        },
        ErrorCategory::Io => {
            let path = ctx
                .image_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the input file".to_string());
            Diagnosis {
                headline: Some("Image file problem".to_string()),
                steps: vec![
                    format!("Make sure the image file exists: {}", path),
                    "Or set image_path in nova.toml (or NOVA_IMAGE_PATH) to the correct path"
                        .to_string(),
                ],
            }
        }
        ErrorCategory::Output => Diagnosis {
            headline: Some("Could not write the result".to_string()),
            steps: vec![
                "Standard output was closed before the result was printed".to_string(),
                "Run the demo without piping into a command that exits early, or redirect to a file".to_string(),
            ],
        },
        ErrorCategory::Transport => Diagnosis {
            headline: Some("Could not reach Bedrock".to_string()),
            steps: vec![
                format!(
                    "Check network access to bedrock-runtime.{}.amazonaws.com",
                    ctx.region
                ),
                "Raise timeout_secs in nova.toml if calls are timing out".to_string(),
            ],
        },
        ErrorCategory::Service => Diagnosis {
            headline: Some("Bedrock could not serve the request".to_string()),
            steps: vec![
                "The call was not retried; run the demo again later".to_string(),
                format!("Check service quotas for {} in {}", ctx.model_id, ctx.region),
            ],
        },
        ErrorCategory::MalformedResponse => Diagnosis {
            headline: Some("Unexpected response body".to_string()),
            steps: vec![format!(
                "Make sure model_id '{}' is a {} model",
                ctx.model_id, ctx.model_name
            )],
        },
        ErrorCategory::InvalidInput | ErrorCategory::Config => Diagnosis {
            headline: Some("Invalid configuration".to_string()),
            steps: vec!["Fix the value named above in nova.toml".to_string()],
        },
        ErrorCategory::Other => Diagnosis {
            headline: None,
            steps: vec![
                format!("Make sure {} is enabled in the Bedrock console", ctx.model_name),
                "Make sure AWS credentials are configured correctly".to_string(),
                format!("Make sure you are using the {} region", ctx.region),
                "Check that your IAM permissions include bedrock:InvokeModel".to_string(),
            ],
        },
    }
}

pub fn report(out: &mut dyn Write, error: &NovaError, ctx: &HintContext) -> io::Result<()> {
    let diagnosis = diagnose(error, ctx);
    writeln!(out, "\n❌ Error: {}", error)?;
    writeln!(out, "\n💡 Next steps:")?;
    if let Some(headline) = &diagnosis.headline {
        writeln!(out, "  ⚠️  {}", headline)?;
    }
    for (i, step) in diagnosis.steps.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step)?;
    }
    Ok(())
}
