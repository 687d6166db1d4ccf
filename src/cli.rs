use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::TipoEscritura;

#[derive(Parser)]
#[command(name = "cartorio")]
#[command(about = "Digital notary workflow: submit deed requests, generate drafts, review and export escrituras")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file path (overrides CARTORIO_DB_PATH)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the terminal UI
    Tui {
        /// Open the review screen for this escritura id on startup
        #[arg(long)]
        id: Option<String>,
    },

    /// Submit a new escritura and run the draft pipeline to completion
    Nova {
        /// Deed type (compra_venda, doacao, uniao_estavel, pacto_antenupcial,
        /// divorcio, inventario_partilha, cessao_direitos, outro)
        #[arg(short, long)]
        tipo: String,

        /// Free-text label, required when --tipo outro
        #[arg(long)]
        tipo_outro: Option<String>,

        /// Parties involved
        #[arg(short, long, default_value = "")]
        partes: String,

        /// Business value in BRL
        #[arg(short, long)]
        valor: Option<f64>,

        /// Extra notes passed to the draft generator
        #[arg(short, long)]
        observacoes: Option<String>,

        /// PDF document to attach (repeatable)
        #[arg(short, long)]
        documento: Vec<PathBuf>,

        /// Attach every PDF found under this directory
        #[arg(long)]
        pasta: Option<PathBuf>,
    },

    /// List recent escrituras with the dashboard counters
    Listar {
        /// Maximum number of rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Approve an escritura awaiting review
    Aprovar {
        /// Escritura id
        id: String,
    },

    /// Reject an escritura with a reason
    Rejeitar {
        /// Escritura id
        id: String,

        /// Reason sent back to the requester
        #[arg(short, long)]
        motivo: String,
    },

    /// Export the deed text to a file
    Exportar {
        /// Escritura id
        id: String,

        /// Output directory (defaults to the configured export dir)
        #[arg(short, long)]
        saida: Option<PathBuf>,
    },

    /// Populate the database with demo records
    Seed,
}

impl Commands {
    pub fn parse_tipo(tipo: &str) -> Result<TipoEscritura, anyhow::Error> {
        TipoEscritura::parse(&tipo.to_lowercase()).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown deed type: {}. Supported types: compra_venda, doacao, uniao_estavel, \
                 pacto_antenupcial, divorcio, inventario_partilha, cessao_direitos, outro",
                tipo
            )
        })
    }
}
