//! Review workflow state machine
//!
//! Transitions: aguardando_revisao -> em_revisao (saved edit) -> aprovada or
//! rejeitada. Terminal records refuse every further transition.

use chrono::{DateTime, Utc};

use crate::escritura::errors::EscrituraError;
use crate::models::{Escritura, StatusEscritura};

/// Reviewer identity, resolved from configuration and passed explicitly into
/// each transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Reviewer {
    pub full_name: String,
    pub email: String,
}

fn ensure_open(escritura: &Escritura) -> Result<(), EscrituraError> {
    if escritura.status.is_terminal() {
        return Err(EscrituraError::TerminalState {
            id: escritura.id.clone(),
            status: escritura.status,
        });
    }
    Ok(())
}

/// Copy the edit buffer into the record and mark it under review.
pub fn save_edit(escritura: &mut Escritura, conteudo: &str) -> Result<(), EscrituraError> {
    ensure_open(escritura)?;
    escritura.conteudo_gerado = conteudo.to_string();
    escritura.status = StatusEscritura::EmRevisao;
    Ok(())
}

/// Approve the deed. Stamps the reviewer and revision time and keeps the
/// current edit buffer as the final content.
pub fn approve(
    escritura: &mut Escritura,
    reviewer: &Reviewer,
    conteudo: &str,
    data_revisao: DateTime<Utc>,
) -> Result<(), EscrituraError> {
    ensure_open(escritura)?;
    escritura.status = StatusEscritura::Aprovada;
    escritura.revisado_por = Some(reviewer.email.clone());
    escritura.data_revisao = Some(data_revisao);
    escritura.conteudo_gerado = conteudo.to_string();
    Ok(())
}

/// Reject the deed. The reason must be non-empty after trimming and is stored
/// exactly as typed.
pub fn reject(
    escritura: &mut Escritura,
    reviewer: &Reviewer,
    motivo: &str,
    data_revisao: DateTime<Utc>,
) -> Result<(), EscrituraError> {
    ensure_open(escritura)?;
    if motivo.trim().is_empty() {
        return Err(EscrituraError::Validation(
            "Por favor, informe o motivo da rejeição".to_string(),
        ));
    }
    escritura.status = StatusEscritura::Rejeitada;
    escritura.revisado_por = Some(reviewer.email.clone());
    escritura.data_revisao = Some(data_revisao);
    escritura.motivo_rejeicao = Some(motivo.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoEscritura;

    fn reviewer() -> Reviewer {
        Reviewer {
            full_name: "Usuário Exemplo".to_string(),
            email: "usuario@exemplo.com".to_string(),
        }
    }

    fn pending_escritura() -> Escritura {
        let mut escritura =
            Escritura::new(TipoEscritura::CompraVenda, "PROT-000000001", Utc::now());
        escritura.status = StatusEscritura::AguardandoRevisao;
        escritura.conteudo_gerado = "Conteúdo gerado da escritura...".to_string();
        escritura
    }

    #[test]
    fn save_edit_updates_content_and_status() {
        let mut escritura = pending_escritura();
        save_edit(&mut escritura, "texto revisado").unwrap();
        assert_eq!(escritura.conteudo_gerado, "texto revisado");
        assert_eq!(escritura.status, StatusEscritura::EmRevisao);

        // Saving the same text again is a no-op on the observable state
        save_edit(&mut escritura, "texto revisado").unwrap();
        assert_eq!(escritura.conteudo_gerado, "texto revisado");
        assert_eq!(escritura.status, StatusEscritura::EmRevisao);
    }

    #[test]
    fn approve_stamps_reviewer_and_keeps_buffer() {
        let mut escritura = pending_escritura();
        let when = Utc::now();
        approve(&mut escritura, &reviewer(), "versão final", when).unwrap();

        assert_eq!(escritura.status, StatusEscritura::Aprovada);
        assert_eq!(escritura.revisado_por.as_deref(), Some("usuario@exemplo.com"));
        assert_eq!(escritura.data_revisao, Some(when));
        assert_eq!(escritura.conteudo_gerado, "versão final");
        assert!(escritura.motivo_rejeicao.is_none());
    }

    #[test]
    fn approve_works_from_em_revisao() {
        let mut escritura = pending_escritura();
        save_edit(&mut escritura, "ajustado").unwrap();
        approve(&mut escritura, &reviewer(), "ajustado", Utc::now()).unwrap();
        assert_eq!(escritura.status, StatusEscritura::Aprovada);
    }

    #[test]
    fn reject_requires_reason_and_stores_it_verbatim() {
        let mut escritura = pending_escritura();

        assert!(matches!(
            reject(&mut escritura, &reviewer(), "   ", Utc::now()),
            Err(EscrituraError::Validation(_))
        ));
        assert_eq!(escritura.status, StatusEscritura::AguardandoRevisao);
        assert!(escritura.motivo_rejeicao.is_none());

        reject(
            &mut escritura,
            &reviewer(),
            "missing signature page",
            Utc::now(),
        )
        .unwrap();
        assert_eq!(escritura.status, StatusEscritura::Rejeitada);
        assert_eq!(
            escritura.motivo_rejeicao.as_deref(),
            Some("missing signature page")
        );
        assert!(escritura.revisado_por.is_some());
        assert!(escritura.data_revisao.is_some());
    }

    #[test]
    fn terminal_records_refuse_every_transition() {
        let mut aprovada = pending_escritura();
        approve(&mut aprovada, &reviewer(), "final", Utc::now()).unwrap();

        assert!(matches!(
            save_edit(&mut aprovada, "tarde demais"),
            Err(EscrituraError::TerminalState { .. })
        ));
        assert!(matches!(
            approve(&mut aprovada, &reviewer(), "de novo", Utc::now()),
            Err(EscrituraError::TerminalState { .. })
        ));
        assert!(matches!(
            reject(&mut aprovada, &reviewer(), "motivo", Utc::now()),
            Err(EscrituraError::TerminalState { .. })
        ));
        // The refused calls left the record untouched
        assert_eq!(aprovada.conteudo_gerado, "final");
        assert_eq!(aprovada.status, StatusEscritura::Aprovada);
        assert!(aprovada.motivo_rejeicao.is_none());

        let mut rejeitada = pending_escritura();
        reject(&mut rejeitada, &reviewer(), "ilegível", Utc::now()).unwrap();
        assert!(matches!(
            approve(&mut rejeitada, &reviewer(), "x", Utc::now()),
            Err(EscrituraError::TerminalState { .. })
        ));
    }

    #[test]
    fn motivo_present_exactly_when_rejected() {
        let mut escritura = pending_escritura();
        assert!(escritura.motivo_rejeicao.is_none());

        save_edit(&mut escritura, "editada").unwrap();
        assert!(escritura.motivo_rejeicao.is_none());

        reject(&mut escritura, &reviewer(), "faltou firma", Utc::now()).unwrap();
        assert!(escritura
            .motivo_rejeicao
            .as_deref()
            .is_some_and(|m| !m.is_empty()));
    }
}
