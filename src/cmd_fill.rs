//! `detect` and `fill` commands: drive a form session from the terminal.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use voxform_config::Config;
use voxform_core::{
    AttachOutcome, EventOutcome, FormSession, ImageFile, RegionEvent, RegionId, RegionKind,
    RegionState, RemoteInterpreter, SessionOptions,
};
use voxform_export::ExportFormat;

#[derive(Debug, Error)]
pub(crate) enum FillError {
    #[error("Form has no region #{0}; run `voxform detect` to list them")]
    NoRegion(usize),

    #[error("Region #{0} is not listening (frozen, or not a text field)")]
    NotListening(usize),
}

/// Arguments of `voxform fill`.
pub(crate) struct FillArgs {
    pub file: PathBuf,
    pub say: Vec<(usize, String)>,
    pub image: Vec<(usize, String)>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub endpoint: Option<String>,
}

fn session_options(config: &Config) -> SessionOptions {
    SessionOptions {
        confidence_threshold: config.voice.confidence_threshold,
        prompt: config.voice.prompt.clone(),
        voice_available: true,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn load(config: &Config, file: &Path) -> Result<FormSession, Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(file).await?;
    Ok(FormSession::load(display_name(file), &html, session_options(config))?)
}

fn region(session: &FormSession, index: usize) -> Result<RegionId, FillError> {
    session.region_at(index).ok_or(FillError::NoRegion(index))
}

fn print_regions(session: &FormSession) {
    let summary = session.summary();
    println!("{} ({} regions)", summary.file_name, summary.regions.len());
    println!("{:<6} {:<11} {:<7} TEXT", "INDEX", "KIND", "STATE");
    for region in &summary.regions {
        let kind = match region.kind {
            RegionKind::Field => "field",
            RegionKind::ImageSlot => "image_slot",
        };
        let state = match region.state {
            RegionState::Live => "live",
            RegionState::Frozen => "frozen",
        };
        println!("{:<6} {:<11} {:<7} {}", region.index, kind, state, region.text);
    }
}

/// `voxform detect <file>`
pub(crate) async fn detect(config: &Config, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = load(config, file).await?;
    print_regions(&session);
    Ok(())
}

/// `voxform fill <file> ...`
pub(crate) async fn fill(config: &Config, args: FillArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Validate the format before spending any remote calls.
    let format: ExportFormat = args.format.parse()?;
    let mut session = load(config, &args.file).await?;

    let endpoint = args.endpoint.unwrap_or_else(|| config.voice.endpoint.clone());
    let interpreter = RemoteInterpreter::new(endpoint);

    for (index, transcript) in &args.say {
        let id = region(&session, *index)?;
        if session.dispatch(&id, RegionEvent::ActivateVoice)? != EventOutcome::Listening {
            return Err(FillError::NotListening(*index).into());
        }
        let Some(outcome) = session.handle_transcript(&interpreter, transcript).await else {
            continue;
        };
        if outcome.applied {
            println!("#{} <- \"{}\"", index, session.text(&id).unwrap_or_default().trim());
        } else {
            warn!(
                region = *index,
                confidence = outcome.instruction.confidence,
                "Instruction not applied"
            );
            println!(
                "#{} unchanged (confidence {:.2})",
                index, outcome.instruction.confidence
            );
        }
    }

    for (index, path) in &args.image {
        let id = region(&session, *index)?;
        let bytes = tokio::fs::read(path).await?;
        let file = ImageFile::new(display_name(Path::new(path)), bytes);
        match session.attach_image(&id, &file)? {
            AttachOutcome::Replaced(_) | AttachOutcome::Inserted(_) => {
                println!("#{} <- image {}", index, path);
            }
            AttachOutcome::Ignored => println!("#{} ignored image {}", index, path),
        }
    }

    let artifact = voxform_export::export(&session, format)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    tokio::fs::write(&output, &artifact.bytes).await?;
    info!(path = %output.display(), bytes = artifact.bytes.len(), "Export written");
    println!("Wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxform_protocols::FillInstruction;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORM: &str = "<p>Customer: ________</p><table><tr><th>Company</th><td></td></tr></table>";

    #[tokio::test]
    async fn test_fill_writes_export() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/voice-agent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(FillInstruction::replace("Acme", 0.9)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let form = dir.path().join("order.html");
        std::fs::write(&form, FORM).unwrap();
        let output = dir.path().join("out.html");

        let args = FillArgs {
            file: form,
            say: vec![(1, "Acme".to_string())],
            image: Vec::new(),
            format: "html".to_string(),
            output: Some(output.clone()),
            endpoint: Some(format!("{}/api/voice-agent", server.uri())),
        };
        fill(&Config::default(), args).await.unwrap();

        let html = std::fs::read_to_string(output).unwrap();
        assert!(html.contains("Acme"));
    }

    #[tokio::test]
    async fn test_fill_rejects_unknown_region() {
        let dir = tempfile::tempdir().unwrap();
        let form = dir.path().join("order.html");
        std::fs::write(&form, FORM).unwrap();

        let args = FillArgs {
            file: form,
            say: vec![(9, "Acme".to_string())],
            image: Vec::new(),
            format: "html".to_string(),
            output: Some(dir.path().join("out.html")),
            endpoint: Some("http://127.0.0.1:9/api/voice-agent".to_string()),
        };
        let err = fill(&Config::default(), args).await.unwrap_err();
        assert!(err.to_string().contains("#9"));
    }

    #[tokio::test]
    async fn test_fill_rejects_unknown_format() {
        let args = FillArgs {
            file: PathBuf::from("does-not-matter.html"),
            say: Vec::new(),
            image: Vec::new(),
            format: "docx".to_string(),
            output: None,
            endpoint: None,
        };
        let err = fill(&Config::default(), args).await.unwrap_err();
        assert!(err.to_string().contains("docx"));
    }
}
