use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escritura {
    pub id: String,
    pub numero_protocolo: String,
    pub tipo: TipoEscritura,
    pub tipo_outro: Option<String>,
    pub valor_negocio: Option<f64>,
    pub partes_envolvidas: String,
    pub observacoes: Option<String>,
    pub documentos_urls: Vec<String>,
    pub conteudo_gerado: String,
    pub status: StatusEscritura,
    pub revisado_por: Option<String>,
    pub data_revisao: Option<DateTime<Utc>>,
    pub motivo_rejeicao: Option<String>,
    pub criado_em: DateTime<Utc>,
}

impl Escritura {
    pub fn new(
        tipo: TipoEscritura,
        numero_protocolo: impl Into<String>,
        criado_em: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            numero_protocolo: numero_protocolo.into(),
            tipo,
            tipo_outro: None,
            valor_negocio: None,
            partes_envolvidas: String::new(),
            observacoes: None,
            documentos_urls: Vec::new(),
            conteudo_gerado: String::new(),
            status: StatusEscritura::Processando,
            revisado_por: None,
            data_revisao: None,
            motivo_rejeicao: None,
            criado_em,
        }
    }

    /// Title shown in listings. For `outro` the free-text label already names
    /// the deed, so it is used as-is.
    pub fn display_title(&self) -> String {
        match self.tipo {
            TipoEscritura::Outro => self
                .tipo_outro
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or("Escritura")
                .to_string(),
            tipo => format!("Escritura de {}", tipo.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoEscritura {
    CompraVenda,
    Doacao,
    UniaoEstavel,
    PactoAntenupcial,
    Divorcio,
    InventarioPartilha,
    CessaoDireitos,
    Outro,
}

impl TipoEscritura {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEscritura::CompraVenda => "compra_venda",
            TipoEscritura::Doacao => "doacao",
            TipoEscritura::UniaoEstavel => "uniao_estavel",
            TipoEscritura::PactoAntenupcial => "pacto_antenupcial",
            TipoEscritura::Divorcio => "divorcio",
            TipoEscritura::InventarioPartilha => "inventario_partilha",
            TipoEscritura::CessaoDireitos => "cessao_direitos",
            TipoEscritura::Outro => "outro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipoEscritura::CompraVenda => "Compra e Venda",
            TipoEscritura::Doacao => "Doação",
            TipoEscritura::UniaoEstavel => "União Estável",
            TipoEscritura::PactoAntenupcial => "Pacto Antenupcial",
            TipoEscritura::Divorcio => "Divórcio",
            TipoEscritura::InventarioPartilha => "Inventário e Partilha",
            TipoEscritura::CessaoDireitos => "Cessão de Direitos",
            TipoEscritura::Outro => "Outro",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "compra_venda" => Some(TipoEscritura::CompraVenda),
            "doacao" => Some(TipoEscritura::Doacao),
            "uniao_estavel" => Some(TipoEscritura::UniaoEstavel),
            "pacto_antenupcial" => Some(TipoEscritura::PactoAntenupcial),
            "divorcio" => Some(TipoEscritura::Divorcio),
            "inventario_partilha" => Some(TipoEscritura::InventarioPartilha),
            "cessao_direitos" => Some(TipoEscritura::CessaoDireitos),
            "outro" => Some(TipoEscritura::Outro),
            _ => None,
        }
    }

    pub fn all() -> [TipoEscritura; 8] {
        [
            TipoEscritura::CompraVenda,
            TipoEscritura::Doacao,
            TipoEscritura::UniaoEstavel,
            TipoEscritura::PactoAntenupcial,
            TipoEscritura::Divorcio,
            TipoEscritura::InventarioPartilha,
            TipoEscritura::CessaoDireitos,
            TipoEscritura::Outro,
        ]
    }

    /// Types for which a monetary value is collected on submission.
    pub fn requires_value(&self) -> bool {
        matches!(
            self,
            TipoEscritura::CompraVenda
                | TipoEscritura::Doacao
                | TipoEscritura::InventarioPartilha
                | TipoEscritura::CessaoDireitos
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEscritura {
    Processando,
    AguardandoRevisao,
    EmRevisao,
    Aprovada,
    Rejeitada,
}

impl StatusEscritura {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusEscritura::Processando => "processando",
            StatusEscritura::AguardandoRevisao => "aguardando_revisao",
            StatusEscritura::EmRevisao => "em_revisao",
            StatusEscritura::Aprovada => "aprovada",
            StatusEscritura::Rejeitada => "rejeitada",
        }
    }

    /// Uppercased display form used on status badges.
    pub fn label(&self) -> &'static str {
        match self {
            StatusEscritura::Processando => "PROCESSANDO",
            StatusEscritura::AguardandoRevisao => "AGUARDANDO REVISAO",
            StatusEscritura::EmRevisao => "EM REVISAO",
            StatusEscritura::Aprovada => "APROVADA",
            StatusEscritura::Rejeitada => "REJEITADA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "processando" => Some(StatusEscritura::Processando),
            "aguardando_revisao" => Some(StatusEscritura::AguardandoRevisao),
            "em_revisao" => Some(StatusEscritura::EmRevisao),
            "aprovada" => Some(StatusEscritura::Aprovada),
            "rejeitada" => Some(StatusEscritura::Rejeitada),
            _ => None,
        }
    }

    /// Approved and rejected records accept no further workflow transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusEscritura::Aprovada | StatusEscritura::Rejeitada)
    }
}
