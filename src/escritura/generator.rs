//! Draft deed text generation
//!
//! Stands in for the AI generation backend: assembles a deterministic draft
//! from the submitted metadata and attachment inventory.

use std::fmt::Write as _;

use crate::escritura::attachments::PdfAttachment;
use crate::models::{Escritura, TipoEscritura};

pub fn draft(escritura: &Escritura, anexos: &[PdfAttachment]) -> String {
    let mut text = String::new();

    let _ = writeln!(text, "{}", heading(escritura));
    let _ = writeln!(text);
    let _ = writeln!(text, "PROTOCOLO: {}", escritura.numero_protocolo);
    let _ = writeln!(
        text,
        "DATA: {}",
        escritura.criado_em.format("%d/%m/%Y %H:%M")
    );
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "SAIBAM quantos esta pública escritura virem que, na data acima, neste"
    );
    let _ = writeln!(
        text,
        "cartório, compareceram as partes abaixo qualificadas, juridicamente"
    );
    let _ = writeln!(text, "capazes, reconhecidas entre si.");

    if !escritura.partes_envolvidas.trim().is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "PARTES ENVOLVIDAS: {}", escritura.partes_envolvidas);
    }

    if let Some(valor) = escritura.valor_negocio {
        let _ = writeln!(text);
        let _ = writeln!(text, "VALOR DO NEGÓCIO: R$ {:.2}", valor);
    }

    if let Some(observacoes) = escritura
        .observacoes
        .as_deref()
        .filter(|o| !o.trim().is_empty())
    {
        let _ = writeln!(text);
        let _ = writeln!(text, "OBSERVAÇÕES: {}", observacoes);
    }

    let _ = writeln!(text);
    let _ = writeln!(text, "DOCUMENTOS APRESENTADOS:");
    for (index, anexo) in anexos.iter().enumerate() {
        let _ = writeln!(
            text,
            "  {}. {} ({} página(s), {:.2} MB)",
            index + 1,
            anexo.file_name,
            anexo.pages,
            anexo.size_mb()
        );
    }

    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "O presente instrumento foi gerado automaticamente a partir dos"
    );
    let _ = writeln!(
        text,
        "documentos apresentados e aguarda conferência e revisão do tabelião"
    );
    let _ = writeln!(text, "responsável.");

    text
}

fn heading(escritura: &Escritura) -> String {
    match escritura.tipo {
        TipoEscritura::Outro => escritura
            .tipo_outro
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.to_uppercase())
            .unwrap_or_else(|| "ESCRITURA PÚBLICA".to_string()),
        tipo => format!("ESCRITURA PÚBLICA DE {}", tipo.label().to_uppercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escritura::attachments::PdfAttachment;
    use chrono::{TimeZone, Utc};

    fn anexo(file_name: &str) -> PdfAttachment {
        PdfAttachment {
            path: format!("/tmp/{}", file_name).into(),
            file_name: file_name.to_string(),
            size_bytes: 1024 * 1024,
            pages: 2,
        }
    }

    #[test]
    fn draft_carries_heading_parties_value_and_documents() {
        let mut escritura = Escritura::new(
            TipoEscritura::CompraVenda,
            "PROT-123456789",
            Utc.with_ymd_and_hms(2026, 8, 24, 14, 30, 0).unwrap(),
        );
        escritura.partes_envolvidas = "João Silva e Maria Santos".to_string();
        escritura.valor_negocio = Some(500000.0);
        escritura.observacoes = Some("Documentos conferidos.".to_string());

        let text = draft(&escritura, &[anexo("certidao.pdf")]);

        assert!(text.starts_with("ESCRITURA PÚBLICA DE COMPRA E VENDA"));
        assert!(text.contains("PROTOCOLO: PROT-123456789"));
        assert!(text.contains("DATA: 24/08/2026 14:30"));
        assert!(text.contains("PARTES ENVOLVIDAS: João Silva e Maria Santos"));
        assert!(text.contains("VALOR DO NEGÓCIO: R$ 500000.00"));
        assert!(text.contains("OBSERVAÇÕES: Documentos conferidos."));
        assert!(text.contains("1. certidao.pdf (2 página(s), 1.00 MB)"));
    }

    #[test]
    fn draft_is_deterministic() {
        let escritura = Escritura::new(
            TipoEscritura::Divorcio,
            "PROT-000000002",
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        );
        let anexos = [anexo("sentenca.pdf")];
        assert_eq!(draft(&escritura, &anexos), draft(&escritura, &anexos));
    }

    #[test]
    fn outro_uses_free_text_heading() {
        let mut escritura = Escritura::new(
            TipoEscritura::Outro,
            "PROT-000000003",
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        );
        escritura.tipo_outro = Some("Escritura de Permuta".to_string());

        let text = draft(&escritura, &[anexo("minuta.pdf")]);
        assert!(text.starts_with("ESCRITURA DE PERMUTA"));
    }

    #[test]
    fn optional_sections_are_omitted_when_empty() {
        let escritura = Escritura::new(
            TipoEscritura::UniaoEstavel,
            "PROT-000000004",
            Utc.with_ymd_and_hms(2026, 5, 5, 5, 5, 5).unwrap(),
        );
        let text = draft(&escritura, &[anexo("declaracao.pdf")]);
        assert!(!text.contains("PARTES ENVOLVIDAS"));
        assert!(!text.contains("VALOR DO NEGÓCIO"));
        assert!(!text.contains("OBSERVAÇÕES"));
    }
}
