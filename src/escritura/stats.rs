//! Dashboard counters

use crate::models::{Escritura, StatusEscritura};

/// The four dashboard cards. `em_revisao` and `rejeitada` are deliberately
/// uncounted; those records remain visible in the list with their status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub aguardando_revisao: usize,
    pub aprovadas: usize,
    pub processando: usize,
}

impl DashboardStats {
    pub fn compute(escrituras: &[Escritura]) -> Self {
        let mut stats = Self::default();
        for escritura in escrituras {
            stats.total += 1;
            match escritura.status {
                StatusEscritura::AguardandoRevisao => stats.aguardando_revisao += 1,
                StatusEscritura::Aprovada => stats.aprovadas += 1,
                StatusEscritura::Processando => stats.processando += 1,
                StatusEscritura::EmRevisao | StatusEscritura::Rejeitada => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoEscritura;
    use chrono::Utc;

    fn with_status(status: StatusEscritura) -> Escritura {
        let mut escritura = Escritura::new(TipoEscritura::Doacao, "PROT-000000000", Utc::now());
        escritura.status = status;
        escritura
    }

    #[test]
    fn empty_collection_yields_zeros() {
        assert_eq!(DashboardStats::compute(&[]), DashboardStats::default());
    }

    #[test]
    fn counts_follow_status_predicates() {
        let escrituras = vec![
            with_status(StatusEscritura::AguardandoRevisao),
            with_status(StatusEscritura::Aprovada),
            with_status(StatusEscritura::Processando),
            with_status(StatusEscritura::AguardandoRevisao),
            with_status(StatusEscritura::Aprovada),
        ];

        let stats = DashboardStats::compute(&escrituras);
        assert_eq!(stats.total, escrituras.len());
        assert_eq!(stats.aguardando_revisao, 2);
        assert_eq!(stats.aprovadas, 2);
        assert_eq!(stats.processando, 1);
    }

    #[test]
    fn em_revisao_and_rejeitada_count_toward_total_only() {
        let escrituras = vec![
            with_status(StatusEscritura::EmRevisao),
            with_status(StatusEscritura::Rejeitada),
        ];

        let stats = DashboardStats::compute(&escrituras);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.aguardando_revisao, 0);
        assert_eq!(stats.aprovadas, 0);
        assert_eq!(stats.processando, 0);
        assert_ne!(
            stats.aguardando_revisao + stats.aprovadas + stats.processando,
            stats.total
        );
    }
}
