//! Submission request, validation, and the draft-generation pipeline

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::config::PipelineTimings;
use crate::escritura::attachments::{PdfAttachment, MAX_ATTACHMENTS};
use crate::escritura::errors::EscrituraError;
use crate::escritura::generator;
use crate::models::{Escritura, StatusEscritura, TipoEscritura};
use crate::storage;

/// Payload collected by the submission form (or the `nova` CLI command).
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub tipo: Option<TipoEscritura>,
    pub tipo_outro: String,
    pub partes_envolvidas: String,
    pub valor_negocio: Option<f64>,
    pub observacoes: String,
    pub anexos: Vec<PdfAttachment>,
}

impl Submission {
    pub fn add_attachment(&mut self, anexo: PdfAttachment) -> Result<(), EscrituraError> {
        if self.anexos.len() >= MAX_ATTACHMENTS {
            return Err(EscrituraError::TooManyAttachments {
                limit: MAX_ATTACHMENTS,
            });
        }
        self.anexos.push(anexo);
        Ok(())
    }

    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.anexos.len() {
            self.anexos.remove(index);
        }
    }

    /// Checked at submit time, first failure wins. Returns the selected type
    /// so later stages need not re-check it.
    pub fn validate(&self) -> Result<TipoEscritura, EscrituraError> {
        let tipo = match self.tipo {
            Some(tipo) => tipo,
            None => {
                return Err(EscrituraError::Validation(
                    "Por favor, selecione o tipo de escritura".to_string(),
                ))
            }
        };
        if tipo == TipoEscritura::Outro && self.tipo_outro.trim().is_empty() {
            return Err(EscrituraError::Validation(
                "Por favor, especifique o tipo da escritura".to_string(),
            ));
        }
        if self.anexos.is_empty() {
            return Err(EscrituraError::Validation(
                "Por favor, envie pelo menos um documento".to_string(),
            ));
        }
        Ok(tipo)
    }
}

/// Progress reported over the pipeline channel. The three-phase shape
/// (submitted, processing, complete) is what the progress bar renders.
#[derive(Debug, Clone)]
pub enum SubmissionProgress {
    Submitted,
    Processing,
    Complete {
        id: String,
        numero_protocolo: String,
    },
    Failed {
        message: String,
    },
}

impl SubmissionProgress {
    pub fn percent(&self) -> u16 {
        match self {
            SubmissionProgress::Submitted => 20,
            SubmissionProgress::Processing => 60,
            SubmissionProgress::Complete { .. } => 100,
            SubmissionProgress::Failed { .. } => 0,
        }
    }
}

/// Display protocol number derived from the submission instant.
pub fn protocol_number(now: DateTime<Utc>) -> String {
    format!("PROT-{:09}", now.timestamp_millis() % 1_000_000_000)
}

/// Start the pipeline on the runtime. Progress arrives on the returned
/// channel; a started run always finishes (stopping it midway would strand a
/// `processando` record), so callers cancel by ignoring the receiver.
pub fn start(
    database_path: String,
    attachments_dir: PathBuf,
    submission: Submission,
    timings: PipelineTimings,
) -> mpsc::UnboundedReceiver<SubmissionProgress> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        if let Err(e) = run(&database_path, &attachments_dir, submission, &timings, &tx).await {
            error!("✗ Submission pipeline failed: {}", e);
            let _ = tx.send(SubmissionProgress::Failed {
                message: e.to_string(),
            });
        }
    });

    rx
}

/// The pipeline: register attachments and insert the record as `processando`,
/// generate the draft, then finalize it as `aguardando_revisao`.
pub async fn run(
    database_path: &str,
    attachments_dir: &Path,
    submission: Submission,
    timings: &PipelineTimings,
    progress: &mpsc::UnboundedSender<SubmissionProgress>,
) -> Result<Escritura, EscrituraError> {
    let tipo = submission.validate()?;

    let agora = Utc::now();
    let numero_protocolo = protocol_number(agora);
    info!(
        "Starting submission {} ({}, {} attachment(s))",
        numero_protocolo,
        tipo.as_str(),
        submission.anexos.len()
    );

    let mut escritura = Escritura::new(tipo, &numero_protocolo, agora);
    if tipo == TipoEscritura::Outro {
        escritura.tipo_outro = Some(submission.tipo_outro.trim().to_string());
    }
    if tipo.requires_value() {
        escritura.valor_negocio = submission.valor_negocio;
    }
    escritura.partes_envolvidas = submission.partes_envolvidas.clone();
    if !submission.observacoes.trim().is_empty() {
        escritura.observacoes = Some(submission.observacoes.clone());
    }

    let _ = progress.send(SubmissionProgress::Submitted);

    // Upload stand-in: copy the attachments into the per-record directory
    let record_dir = attachments_dir.join(&escritura.id);
    std::fs::create_dir_all(&record_dir)?;
    for (index, anexo) in submission.anexos.iter().enumerate() {
        // Indexed to keep duplicate file names apart
        let dest = record_dir.join(format!("{:02}-{}", index + 1, anexo.file_name));
        std::fs::copy(&anexo.path, &dest)?;
        escritura
            .documentos_urls
            .push(dest.to_string_lossy().to_string());
    }
    storage::save_escritura(&escritura, database_path).await?;
    tokio::time::sleep(std::time::Duration::from_millis(timings.upload_ms)).await;

    let _ = progress.send(SubmissionProgress::Processing);
    escritura.conteudo_gerado = generator::draft(&escritura, &submission.anexos);
    tokio::time::sleep(std::time::Duration::from_millis(timings.generation_ms)).await;

    escritura.status = StatusEscritura::AguardandoRevisao;
    storage::save_escritura(&escritura, database_path).await?;

    let _ = progress.send(SubmissionProgress::Complete {
        id: escritura.id.clone(),
        numero_protocolo: escritura.numero_protocolo.clone(),
    });
    info!("✓ Submission {} ready for review", escritura.numero_protocolo);

    Ok(escritura)
}
