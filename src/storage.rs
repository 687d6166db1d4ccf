use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::path::Path;

use crate::models::{Escritura, StatusEscritura, TipoEscritura};

pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database_path: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Path::new(database_path).exists() {
            std::fs::File::create(database_path)?;
        }

        let database_url = format!("sqlite://{}", database_path);
        let pool = SqlitePool::connect(&database_url).await?;

        // Initialize schema
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS escrituras (
                id TEXT PRIMARY KEY,
                numero_protocolo TEXT NOT NULL,
                tipo TEXT NOT NULL,
                tipo_outro TEXT,
                valor_negocio REAL,
                partes_envolvidas TEXT NOT NULL,
                observacoes TEXT,
                documentos_urls TEXT NOT NULL,
                conteudo_gerado TEXT NOT NULL,
                status TEXT NOT NULL,
                revisado_por TEXT,
                data_revisao TEXT,
                motivo_rejeicao TEXT,
                criado_em TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_status ON escrituras(status);
            CREATE INDEX IF NOT EXISTS idx_criado_em ON escrituras(criado_em);
            CREATE INDEX IF NOT EXISTS idx_numero_protocolo ON escrituras(numero_protocolo);
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Storage { pool })
    }

    /// Insert or replace a full escritura row. Used both for creation by the
    /// submission pipeline and for persisting review transitions.
    pub async fn save_escritura(&self, escritura: &Escritura) -> Result<()> {
        let documentos_json = serde_json::to_string(&escritura.documentos_urls)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO escrituras
            (id, numero_protocolo, tipo, tipo_outro, valor_negocio, partes_envolvidas,
             observacoes, documentos_urls, conteudo_gerado, status, revisado_por,
             data_revisao, motivo_rejeicao, criado_em)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&escritura.id)
        .bind(&escritura.numero_protocolo)
        .bind(escritura.tipo.as_str())
        .bind(&escritura.tipo_outro)
        .bind(escritura.valor_negocio)
        .bind(&escritura.partes_envolvidas)
        .bind(&escritura.observacoes)
        .bind(&documentos_json)
        .bind(&escritura.conteudo_gerado)
        .bind(escritura.status.as_str())
        .bind(&escritura.revisado_por)
        .bind(escritura.data_revisao.map(|d| d.to_rfc3339()))
        .bind(&escritura.motivo_rejeicao)
        .bind(escritura.criado_em.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_escritura(&self, id: &str) -> Result<Option<Escritura>> {
        let row = sqlx::query("SELECT * FROM escrituras WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_escritura(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Escritura>> {
        let rows = sqlx::query("SELECT * FROM escrituras ORDER BY criado_em DESC LIMIT ?")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let mut escrituras = Vec::new();
        for row in rows {
            escrituras.push(row_to_escritura(&row)?);
        }

        Ok(escrituras)
    }

    pub async fn count_escrituras(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM escrituras")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }
}

fn row_to_escritura(row: &sqlx::sqlite::SqliteRow) -> Result<Escritura> {
    let tipo_str: String = row.get("tipo");
    let status_str: String = row.get("status");
    let documentos_str: String = row.get("documentos_urls");
    let criado_em_str: String = row.get("criado_em");
    let data_revisao_str: Option<String> = row.get("data_revisao");

    let tipo = TipoEscritura::parse(&tipo_str)
        .ok_or_else(|| anyhow::anyhow!("unknown tipo value in database: {}", tipo_str))?;
    let status = StatusEscritura::parse(&status_str)
        .ok_or_else(|| anyhow::anyhow!("unknown status value in database: {}", status_str))?;
    let documentos_urls: Vec<String> = serde_json::from_str(&documentos_str)?;
    let criado_em = parse_timestamp(&criado_em_str)?;
    let data_revisao = match data_revisao_str {
        Some(s) => Some(parse_timestamp(&s)?),
        None => None,
    };

    Ok(Escritura {
        id: row.get("id"),
        numero_protocolo: row.get("numero_protocolo"),
        tipo,
        tipo_outro: row.get("tipo_outro"),
        valor_negocio: row.get("valor_negocio"),
        partes_envolvidas: row.get("partes_envolvidas"),
        observacoes: row.get("observacoes"),
        documentos_urls,
        conteudo_gerado: row.get("conteudo_gerado"),
        status,
        revisado_por: row.get("revisado_por"),
        data_revisao,
        motivo_rejeicao: row.get("motivo_rejeicao"),
        criado_em,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

// Public convenience functions

pub async fn list_recent(database_path: &str, limit: usize) -> Result<Vec<Escritura>> {
    let storage = Storage::new(database_path).await?;
    storage.list_recent(limit).await
}

pub async fn get_escritura(database_path: &str, id: &str) -> Result<Option<Escritura>> {
    let storage = Storage::new(database_path).await?;
    storage.get_escritura(id).await
}

pub async fn save_escritura(escritura: &Escritura, database_path: &str) -> Result<()> {
    let storage = Storage::new(database_path).await?;
    storage.save_escritura(escritura).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn sample_escritura(criado_em: DateTime<Utc>) -> Escritura {
        let mut escritura = Escritura::new(TipoEscritura::CompraVenda, "PROT-000000001", criado_em);
        escritura.valor_negocio = Some(500000.0);
        escritura.partes_envolvidas = "João Silva e Maria Santos".to_string();
        escritura.observacoes = Some("Documentos conferidos.".to_string());
        escritura.documentos_urls = vec!["anexos/abc/certidao.pdf".to_string()];
        escritura.conteudo_gerado = "Conteúdo gerado da escritura...".to_string();
        escritura
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).await.unwrap();

        let mut escritura = sample_escritura(Utc::now());
        escritura.status = StatusEscritura::Rejeitada;
        escritura.revisado_por = Some("usuario@exemplo.com".to_string());
        escritura.data_revisao = Some(Utc::now());
        escritura.motivo_rejeicao = Some("missing signature page".to_string());

        storage.save_escritura(&escritura).await.unwrap();
        let loaded = storage.get_escritura(&escritura.id).await.unwrap().unwrap();
        assert_eq!(loaded, escritura);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).await.unwrap();

        let loaded = storage.get_escritura("nao-existe").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_list_recent_orders_by_creation_descending() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).await.unwrap();

        let base = Utc::now();
        for i in 0..3 {
            let mut escritura = sample_escritura(base + Duration::seconds(i));
            escritura.numero_protocolo = format!("PROT-{:09}", i);
            storage.save_escritura(&escritura).await.unwrap();
        }

        let listed = storage.list_recent(50).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].numero_protocolo, "PROT-000000002");
        assert_eq!(listed[2].numero_protocolo, "PROT-000000000");

        let limited = storage.list_recent(2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].numero_protocolo, "PROT-000000002");
    }

    #[tokio::test]
    async fn test_save_replaces_existing_row() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).await.unwrap();

        let mut escritura = sample_escritura(Utc::now());
        escritura.status = StatusEscritura::AguardandoRevisao;
        storage.save_escritura(&escritura).await.unwrap();

        escritura.status = StatusEscritura::Aprovada;
        escritura.revisado_por = Some("usuario@exemplo.com".to_string());
        escritura.data_revisao = Some(Utc::now());
        storage.save_escritura(&escritura).await.unwrap();

        assert_eq!(storage.count_escrituras().await.unwrap(), 1);
        let loaded = storage.get_escritura(&escritura.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, StatusEscritura::Aprovada);
        assert!(loaded.revisado_por.is_some());
    }
}
